//! Cell-level parsing shared by type inference and the row checks.

/// Tokens read as missing values, compared against the untrimmed cell.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for an empty cell or a conventional NA token. Whitespace-only cells
/// are values, not nulls.
pub fn is_null(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell)
}

/// Parse an integer literal. Floats with no fractional part (`2.0`) count too,
/// so a float-typed column still compares numerically.
pub fn parse_int(cell: &str) -> Option<i64> {
    let s = cell.trim();
    if is_null(s) {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parse any numeric literal.
pub fn parse_float(cell: &str) -> Option<f64> {
    let s = cell.trim();
    if is_null(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| !f.is_nan())
}

pub fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim() {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

/// Strict integer literal: optional sign and digits only.
pub(crate) fn is_int_literal(cell: &str) -> bool {
    cell.trim().parse::<i64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tokens() {
        assert!(is_null(""));
        assert!(!is_null("  "));
        assert!(!is_null(" NA"));
        assert!(is_null("#N/A N/A"));
        assert!(is_null("-1.#QNAN"));
        assert!(is_null("NaN"));
        assert!(is_null("<NA>"));
        assert!(!is_null("0"));
        assert!(!is_null("Draw"));
    }

    #[test]
    fn int_parsing() {
        assert_eq!(parse_int("3"), Some(3));
        assert_eq!(parse_int(" -2 "), Some(-2));
        assert_eq!(parse_int("2.0"), Some(2));
        assert_eq!(parse_int("2.5"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("two"), None);
        assert!(is_int_literal("42"));
        assert!(!is_int_literal("42.0"));
    }

    #[test]
    fn float_and_bool_parsing() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("nan"), None);
        assert_eq!(parse_float("x"), None);
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
