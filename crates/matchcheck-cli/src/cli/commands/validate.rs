//! `matchcheck validate` – run the dataset validation battery.

use anyhow::{Context, Result};
use matchcheck_core::config::MatchcheckConfig;
use matchcheck_core::validate;
use std::io::Write;
use std::path::Path;

use crate::cli::OutputFormat;

/// Print every check result and the summary. Returns Ok(false) if any check failed.
/// A missing dataset is an error, not a failed check.
pub fn run_validate(
    root: &Path,
    cfg: &MatchcheckConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<bool> {
    let dataset = root.join(&cfg.dataset_file);
    let report = validate::validate_file(&dataset, &cfg.schema())?;

    match format {
        OutputFormat::Text => out.write_all(report.render_text().as_bytes())?,
        OutputFormat::Json => {
            let json = report.to_json().context("serialize report")?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(report.passed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = Vec::new();
        let err = run_validate(
            dir.path(),
            &MatchcheckConfig::default(),
            OutputFormat::Text,
            &mut buf,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Missing required file:"));
        assert!(buf.is_empty());
    }

    #[test]
    fn failing_dataset_prints_markers_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = MatchcheckConfig::default();
        let path = dir.path().join(&cfg.dataset_file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "match_id\n1\n1\n").unwrap();

        let mut buf = Vec::new();
        let ok = run_validate(dir.path(), &cfg, OutputFormat::Text, &mut buf).unwrap();
        assert!(!ok);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("❌ match_id has duplicates: 1\n"));
        assert!(text.starts_with("❌ Missing columns: competition_code"));
        assert!(text.ends_with("issue(s).\n"));
    }

    #[test]
    fn json_format_is_parseable() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = MatchcheckConfig::default();
        let path = dir.path().join(&cfg.dataset_file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "match_id\n1\n").unwrap();

        let mut buf = Vec::new();
        run_validate(dir.path(), &cfg, OutputFormat::Json, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.trim_start().starts_with('{'));
        assert!(text.contains("\"passed\": false"));
    }
}
