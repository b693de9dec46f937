//! Pass/fail results and their human-readable and JSON renderings.

use serde::Serialize;

pub const PASS_MARKER: &str = "✅";
pub const FAIL_MARKER: &str = "❌";

/// Outcome of one named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Stable identifier of the check that produced this result.
    pub check: &'static str,
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    pub fn pass(check: &'static str, message: impl Into<String>) -> Self {
        Self {
            check,
            ok: true,
            message: message.into(),
        }
    }

    pub fn fail(check: &'static str, message: impl Into<String>) -> Self {
        Self {
            check,
            ok: false,
            message: message.into(),
        }
    }

    pub fn marker(&self) -> &'static str {
        if self.ok {
            PASS_MARKER
        } else {
            FAIL_MARKER
        }
    }
}

/// Ordered list of check results for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = CheckResult>) {
        self.results.extend(results);
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.ok)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.ok)
    }

    /// Find the first result for `check`.
    pub fn get(&self, check: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.check == check)
    }

    /// One-line overall summary.
    pub fn summary_line(&self) -> String {
        match self.failure_count() {
            0 => format!("{PASS_MARKER} Dataset validation passed."),
            n => format!("Validation failed with {n} issue(s)."),
        }
    }

    /// Every result with its marker, then the summary line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for r in &self.results {
            out.push_str(r.marker());
            out.push(' ');
            out.push_str(&r.message);
            out.push('\n');
        }
        out.push_str(&self.summary_line());
        out.push('\n');
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            passed: bool,
            failures: usize,
            results: &'a [CheckResult],
        }
        serde_json::to_string_pretty(&JsonReport {
            passed: self.passed(),
            failures: self.failure_count(),
            results: &self.results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_text_marks_each_result() {
        let mut report = Report::new();
        report.push(CheckResult::pass("schema.missing", "Schema: expected columns present"));
        report.push(CheckResult::fail("types", "Column 'matchday' should be integer dtype (got float64)"));
        let text = report.render_text();
        assert_eq!(
            text,
            "✅ Schema: expected columns present\n\
             ❌ Column 'matchday' should be integer dtype (got float64)\n\
             Validation failed with 1 issue(s).\n"
        );
        assert!(!report.passed());
    }

    #[test]
    fn empty_failures_pass() {
        let mut report = Report::new();
        report.push(CheckResult::pass("pk", "PK: match_id is unique"));
        assert!(report.passed());
        assert_eq!(report.summary_line(), "✅ Dataset validation passed.");
    }

    #[test]
    fn json_carries_counts() {
        let mut report = Report::new();
        report.push(CheckResult::fail("pk", "match_id has duplicates: 2"));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["passed"], false);
        assert_eq!(json["failures"], 1);
        assert_eq!(json["results"][0]["check"], "pk");
        assert_eq!(json["results"][0]["message"], "match_id has duplicates: 2");
    }
}
