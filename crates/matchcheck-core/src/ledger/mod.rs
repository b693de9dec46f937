//! Checksum ledger: per-file SHA-256 digests under the data directory.
//!
//! The ledger file is plain text, one `<digest>  <posix path>` line per file,
//! sorted by path and terminated by a newline. It is the only durable state:
//! read wholesale by [`verify`], written wholesale by [`generate`].

mod discover;
mod generate;
mod parse;
mod verify;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::MatchcheckConfig;

pub use discover::{discover, DataFile, Discovery};
pub use generate::{build_ledger, generate, GenerateOutcome};
pub use parse::parse_ledger;
pub use verify::{verify, VerifyOutcome, VerifyReport};

/// Suffix of the temp file written before the ledger is renamed into place.
pub const TEMP_SUFFIX: &str = ".part";

/// Where the ledger lives and what it covers.
#[derive(Debug, Clone)]
pub struct LedgerSettings {
    /// Project root; ledger paths are relative to it.
    pub root: PathBuf,
    /// Data directory, relative to `root` (or absolute).
    pub data_dir: PathBuf,
    /// Ledger file, relative to `root` (or absolute).
    pub ledger_file: PathBuf,
    /// Hashing read buffer size.
    pub chunk_size: usize,
}

impl LedgerSettings {
    pub fn from_config(root: &Path, cfg: &MatchcheckConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            data_dir: cfg.data_dir.clone(),
            ledger_file: cfg.ledger_file.clone(),
            chunk_size: cfg.chunk_size,
        }
    }

    pub fn data_root(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(&self.ledger_file)
    }
}

/// Mapping from relative POSIX path to hex digest, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: BTreeMap<String, String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the digest for `path`.
    pub fn insert(&mut self, path: impl Into<String>, digest: impl Into<String>) {
        self.entries.insert(path.into(), digest.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d.as_str()))
    }

    /// Serialize to the on-disk format, including the trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.entries.len() * 96);
        for (path, digest) in self.iter() {
            out.push_str(digest);
            out.push_str("  ");
            out.push_str(path);
            out.push('\n');
        }
        out
    }

    /// Read a ledger file. Returns `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Ledger>> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read ledger: {}", path.display())),
        };
        Ok(Some(parse_ledger(&text)))
    }

    /// Write the ledger atomically: temp file, fsync, rename over `path`.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let tmp = temp_path(path);
        let written = write_synced(&tmp, self.render().as_bytes()).and_then(|()| {
            std::fs::rename(&tmp, path)
                .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))
        });
        if written.is_err() {
            // No half-written `.part` left next to the ledger.
            let _ = std::fs::remove_file(&tmp);
        }
        written
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut f =
        std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    f.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;
    Ok(())
}

/// Path for the temp file: appends `.part` to the ledger path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
