//! Build the ledger from the current data files and persist it.

use anyhow::Result;
use std::path::PathBuf;

use super::{discover, DataFile, Discovery, Ledger, LedgerSettings};
use crate::checksum::sha256_path_chunked;

/// What `generate` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Nothing to cover; the ledger was left untouched.
    NoDataFiles { root_missing: bool },
    /// Ledger written with `entries` lines.
    Written { ledger_path: PathBuf, entries: usize },
}

impl GenerateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerateOutcome::Written { .. })
    }
}

/// Hash every file, one at a time, into a fresh ledger.
pub fn build_ledger(files: &[DataFile], chunk_size: usize) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    for file in files {
        let digest = sha256_path_chunked(&file.path, chunk_size)?;
        tracing::debug!(path = %file.rel_path, %digest, "hashed");
        ledger.insert(file.rel_path.clone(), digest);
    }
    Ok(ledger)
}

/// Discover data files, hash them and overwrite the ledger.
pub fn generate(settings: &LedgerSettings) -> Result<GenerateOutcome> {
    let ledger_path = settings.ledger_path();
    let files = match discover(&settings.root, &settings.data_dir, Some(&ledger_path))? {
        Discovery::RootMissing => return Ok(GenerateOutcome::NoDataFiles { root_missing: true }),
        Discovery::Empty => return Ok(GenerateOutcome::NoDataFiles { root_missing: false }),
        Discovery::Files(files) => files,
    };

    let ledger = build_ledger(&files, settings.chunk_size)?;
    ledger.write_atomic(&ledger_path)?;
    tracing::info!(
        "wrote ledger {} with {} entries",
        ledger_path.display(),
        ledger.len()
    );
    Ok(GenerateOutcome::Written {
        ledger_path,
        entries: ledger.len(),
    })
}
