//! `matchcheck checksums [--check]` – write or verify the checksum ledger.

use anyhow::Result;
use matchcheck_core::config::MatchcheckConfig;
use matchcheck_core::ledger::{self, GenerateOutcome, LedgerSettings, VerifyOutcome};
use std::io::Write;
use std::path::Path;

/// Returns Ok(false) when there is nothing to hash, the ledger is missing, or files drifted.
pub fn run_checksums(
    root: &Path,
    cfg: &MatchcheckConfig,
    check: bool,
    out: &mut impl Write,
) -> Result<bool> {
    let settings = LedgerSettings::from_config(root, cfg);
    let ledger_name = cfg.ledger_file.display();
    let data_name = cfg.data_dir.display();

    if !check {
        return match ledger::generate(&settings)? {
            GenerateOutcome::NoDataFiles { .. } => {
                writeln!(out, "No data files found under ./{data_name}/")?;
                Ok(false)
            }
            GenerateOutcome::Written { entries, .. } => {
                writeln!(out, "Wrote {ledger_name} with {entries} entries")?;
                Ok(true)
            }
        };
    }

    match ledger::verify(&settings)? {
        VerifyOutcome::NoDataFiles { .. } => {
            writeln!(out, "No data files found under ./{data_name}/")?;
            Ok(false)
        }
        VerifyOutcome::LedgerMissing { .. } => {
            writeln!(
                out,
                "{ledger_name} is missing. Generate with: matchcheck checksums"
            )?;
            Ok(false)
        }
        VerifyOutcome::Checked(report) => {
            if !report.stale.is_empty() {
                writeln!(
                    out,
                    "Note: {} ledger entries have no file on disk (example: {:?})",
                    report.stale.len(),
                    &report.stale[..report.stale.len().min(cfg.mismatch_sample)]
                )?;
            }
            if report.is_ok() {
                writeln!(out, "{ledger_name} matches current data files")?;
                return Ok(true);
            }
            writeln!(
                out,
                "Mismatched checksums for {} files (example: {:?})",
                report.mismatched.len(),
                report.sample(cfg.mismatch_sample)
            )?;
            writeln!(out, "{ledger_name} does not match current data files.")?;
            writeln!(out, "Re-generate with: matchcheck checksums")?;
            Ok(false)
        }
    }
}
