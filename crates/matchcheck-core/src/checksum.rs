//! SHA-256 content digests for files covered by the ledger.
//!
//! Files are streamed in fixed-size chunks so memory stays bounded no matter
//! how large the dataset grows. The chunk size never affects the digest.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default read buffer for hashing.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Smallest chunk size accepted from configuration.
pub const MIN_CHUNK_SIZE: usize = 4 * 1024;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute SHA-256 of a file with the default chunk size.
pub fn sha256_path(path: &Path) -> Result<String> {
    sha256_path_chunked(path, DEFAULT_CHUNK_SIZE)
}

/// Compute SHA-256 of a file reading `chunk_size` bytes at a time.
/// Chunk sizes below [`MIN_CHUNK_SIZE`] are raised to it.
pub fn sha256_path_chunked(path: &Path, chunk_size: usize) -> Result<String> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    sha256_reader(f, chunk_size).with_context(|| format!("read {}", path.display()))
}

/// Hash everything `reader` yields and return the digest as lowercase hex.
pub fn sha256_reader<R: Read>(mut reader: R, chunk_size: usize) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(MIN_CHUNK_SIZE)];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// True if `s` looks like a lowercase hex SHA-256 digest.
pub fn is_digest_hex(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
