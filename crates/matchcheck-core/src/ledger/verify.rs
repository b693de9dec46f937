//! Re-hash current data files and compare against the persisted ledger.

use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;

use super::{discover, Discovery, Ledger, LedgerSettings};
use crate::checksum::sha256_path_chunked;

/// Per-file comparison results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Number of data files hashed.
    pub checked: usize,
    /// Files whose digest differs or that the ledger does not list, in path order.
    pub mismatched: Vec<String>,
    /// Ledger entries with no file on disk. Reported, not a failure.
    pub stale: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.mismatched.is_empty()
    }

    /// First `n` mismatched paths.
    pub fn sample(&self, n: usize) -> &[String] {
        &self.mismatched[..self.mismatched.len().min(n)]
    }
}

/// What `verify` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// No data files to check.
    NoDataFiles { root_missing: bool },
    /// The ledger file does not exist; no file was hashed.
    LedgerMissing { ledger_path: PathBuf },
    /// Every discovered file was compared.
    Checked(VerifyReport),
}

impl VerifyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Checked(r) if r.is_ok())
    }
}

/// Compare every discovered file with the ledger without stopping at the first mismatch.
pub fn verify(settings: &LedgerSettings) -> Result<VerifyOutcome> {
    let ledger_path = settings.ledger_path();
    let files = match discover(&settings.root, &settings.data_dir, Some(&ledger_path))? {
        Discovery::RootMissing => return Ok(VerifyOutcome::NoDataFiles { root_missing: true }),
        Discovery::Empty => return Ok(VerifyOutcome::NoDataFiles { root_missing: false }),
        Discovery::Files(files) => files,
    };

    let Some(expected) = Ledger::read(&ledger_path)? else {
        tracing::warn!("ledger missing at {}", ledger_path.display());
        return Ok(VerifyOutcome::LedgerMissing { ledger_path });
    };

    let mut report = VerifyReport::default();
    for file in &files {
        let got = sha256_path_chunked(&file.path, settings.chunk_size)?;
        report.checked += 1;
        match expected.get(&file.rel_path) {
            Some(exp) if exp == got => {}
            Some(exp) => {
                tracing::debug!(path = %file.rel_path, expected = %exp, %got, "digest mismatch");
                report.mismatched.push(file.rel_path.clone());
            }
            None => {
                tracing::debug!(path = %file.rel_path, "not listed in ledger");
                report.mismatched.push(file.rel_path.clone());
            }
        }
    }

    let on_disk: HashSet<&str> = files.iter().map(|f| f.rel_path.as_str()).collect();
    report.stale = expected
        .iter()
        .filter(|(path, _)| !on_disk.contains(path))
        .map(|(path, _)| path.to_string())
        .collect();
    for path in &report.stale {
        tracing::warn!("ledger entry without file: {}", path);
    }

    tracing::info!(
        checked = report.checked,
        mismatched = report.mismatched.len(),
        stale = report.stale.len(),
        "ledger verification finished"
    );
    Ok(VerifyOutcome::Checked(report))
}
