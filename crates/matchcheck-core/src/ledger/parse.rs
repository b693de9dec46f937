//! Tolerant reader for the ledger text format.

use super::Ledger;
use crate::checksum::is_digest_hex;

/// Parse ledger text into a [`Ledger`].
///
/// Blank lines and `#` comments are ignored. Each remaining line is split at
/// its first whitespace run: the digest before it, the path (which may itself
/// contain spaces) after it. Lines with fewer than two tokens are skipped
/// rather than failing the whole load. A later line for the same path
/// replaces an earlier one.
pub fn parse_ledger(text: &str) -> Ledger {
    let mut ledger = Ledger::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((digest, path)) = line
            .split_once(char::is_whitespace)
            .map(|(d, rest)| (d, rest.trim()))
            .filter(|(_, path)| !path.is_empty())
        else {
            tracing::warn!("ledger line {} skipped: expected `<digest>  <path>`", lineno + 1);
            continue;
        };
        if !is_digest_hex(digest) {
            tracing::debug!("ledger line {} has non-hex digest for {}", lineno + 1, path);
        }
        ledger.insert(path, digest);
    }
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;

    const D1: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const D2: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    #[test]
    fn parses_two_space_format() {
        let text = format!("{D1}  data/a.csv\n{D2}  data/sub/b.csv\n");
        let ledger = parse_ledger(&text);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("data/a.csv"), Some(D1));
        assert_eq!(ledger.get("data/sub/b.csv"), Some(D2));
    }

    #[test]
    fn skips_comments_blank_and_short_lines() {
        let text = format!("# generated\n\n   \n{D1}\nonly-one-token\n{D2}  data/b.csv\n");
        let ledger = parse_ledger(&text);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("data/b.csv"), Some(D2));
    }

    #[test]
    fn later_duplicate_wins() {
        let text = format!("{D1}  data/a.csv\n{D2}  data/a.csv\n");
        let ledger = parse_ledger(&text);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("data/a.csv"), Some(D2));
    }

    #[test]
    fn tolerates_single_space_and_tabs() {
        let text = format!("{D1} data/a.csv\n{D2}\tdata/b.csv\r\n");
        let ledger = parse_ledger(&text);
        assert_eq!(ledger.get("data/a.csv"), Some(D1));
        assert_eq!(ledger.get("data/b.csv"), Some(D2));
    }

    #[test]
    fn path_keeps_inner_spaces() {
        let text = format!("{D1}  data/match report.csv\n{D2}\t data/a b  c.csv  \n");
        let ledger = parse_ledger(&text);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("data/match report.csv"), Some(D1));
        assert_eq!(ledger.get("data/a b  c.csv"), Some(D2));
    }

    #[test]
    fn render_then_parse_keeps_entries() {
        let mut ledger = Ledger::new();
        ledger.insert("data/z.csv", D1);
        ledger.insert("data/a.csv", D2);
        let text = ledger.render();
        assert_eq!(text, format!("{D2}  data/a.csv\n{D1}  data/z.csv\n"));
        assert_eq!(parse_ledger(&text), ledger);
    }
}
