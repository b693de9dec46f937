//! Dataset validator: schema, column types and row integrity.
//!
//! All check groups always run; a failure in one never hides the others. The
//! report lists results in a stable order: schema, types, then integrity in
//! the order the checks are defined below.

mod integrity;
mod rules;
mod schema;

use std::path::Path;

use crate::dataset::{self, DatasetError, Table};
use crate::report::{CheckResult, Report};

pub use integrity::{
    check_dates, check_goal_difference, check_match_outcome, check_non_negative, check_points,
    check_primary_key, check_total_goals, PRIMARY_KEY,
};
pub use rules::{parse_utc, Outcome};
pub use schema::{check_schema, check_types, Schema};

/// Every integrity check, in report order.
pub fn check_integrity(table: &Table, schema: &Schema) -> Vec<CheckResult> {
    let mut res = vec![
        check_primary_key(table),
        check_goal_difference(table),
        check_total_goals(table),
        check_match_outcome(table),
        check_points(table),
        check_dates(table),
    ];
    res.extend(check_non_negative(table, &schema.score_columns));
    res
}

/// Run the full battery against an already loaded table.
pub fn run(table: &Table, schema: &Schema) -> Report {
    let mut report = Report::new();
    report.extend(check_schema(table, schema));
    report.extend(check_types(table, schema));
    report.extend(check_integrity(table, schema));
    tracing::info!(
        checks = report.results.len(),
        failures = report.failure_count(),
        "dataset validation finished"
    );
    report
}

/// Load the dataset at `path` and validate it.
pub fn validate_file(path: &Path, schema: &Schema) -> Result<Report, DatasetError> {
    let table = dataset::load(path)?;
    Ok(run(&table, schema))
}
