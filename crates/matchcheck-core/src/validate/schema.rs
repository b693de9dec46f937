//! Expected column set of the match dataset.

use crate::dataset::Table;
use crate::report::CheckResult;

const EXPECTED_COLUMNS: &[&str] = &[
    "competition_code",
    "competition_name",
    "season",
    "match_id",
    "matchday",
    "stage",
    "status",
    "date_utc",
    "referee",
    "referee_id",
    "home_team_id",
    "home_team",
    "away_team_id",
    "away_team",
    "fulltime_home",
    "fulltime_away",
    "halftime_home",
    "halftime_away",
    "goal_difference",
    "total_goals",
    "match_outcome",
    "home_points",
    "away_points",
];

const INTEGER_COLUMNS: &[&str] = &[
    "match_id",
    "matchday",
    "referee_id",
    "home_team_id",
    "away_team_id",
    "fulltime_home",
    "fulltime_away",
    "halftime_home",
    "halftime_away",
    "goal_difference",
    "total_goals",
    "home_points",
    "away_points",
];

const SCORE_COLUMNS: &[&str] = &[
    "fulltime_home",
    "fulltime_away",
    "halftime_home",
    "halftime_away",
    "total_goals",
];

/// Column lists the validator checks against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Exact column set (order-independent).
    pub expected_columns: Vec<String>,
    /// Columns that must have integer storage type.
    pub integer_columns: Vec<String>,
    /// Columns that must never be negative.
    pub score_columns: Vec<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            expected_columns: owned(EXPECTED_COLUMNS),
            integer_columns: owned(INTEGER_COLUMNS),
            score_columns: owned(SCORE_COLUMNS),
        }
    }
}

fn owned(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

/// Missing and unexpected columns, each reported as its own result.
pub fn check_schema(table: &Table, schema: &Schema) -> Vec<CheckResult> {
    let missing: Vec<&str> = schema
        .expected_columns
        .iter()
        .map(String::as_str)
        .filter(|c| !table.has_column(c))
        .collect();
    let extra: Vec<&str> = table
        .column_names()
        .filter(|c| !schema.expected_columns.iter().any(|e| e == *c))
        .collect();

    let mut res = Vec::with_capacity(2);
    if missing.is_empty() {
        res.push(CheckResult::pass(
            "schema.missing",
            "Schema: expected columns present",
        ));
    } else {
        res.push(CheckResult::fail(
            "schema.missing",
            format!("Missing columns: {}", missing.join(", ")),
        ));
    }
    if extra.is_empty() {
        res.push(CheckResult::pass(
            "schema.extra",
            "Schema: no unexpected columns",
        ));
    } else {
        res.push(CheckResult::fail(
            "schema.extra",
            format!("Unexpected extra columns: {}", extra.join(", ")),
        ));
    }
    res
}

/// One failure per integer column whose storage type is not integer.
/// Columns absent from the table are left to the schema check.
pub fn check_types(table: &Table, schema: &Schema) -> Vec<CheckResult> {
    let mut res: Vec<CheckResult> = schema
        .integer_columns
        .iter()
        .filter_map(|name| table.column(name))
        .filter(|col| !col.dtype().is_integer())
        .map(|col| {
            CheckResult::fail(
                "types",
                format!(
                    "Column '{}' should be integer dtype (got {})",
                    col.name(),
                    col.dtype()
                ),
            )
        })
        .collect();
    if res.is_empty() {
        res.push(CheckResult::pass(
            "types",
            "Types: integer columns are integer dtypes",
        ));
    }
    res
}
