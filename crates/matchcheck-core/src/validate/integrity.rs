//! Row-level integrity checks. Every row is inspected; violations are counted,
//! never short-circuited.

use std::collections::HashSet;

use super::rules::{parse_utc, Outcome};
use crate::dataset::{Column, Table};
use crate::report::CheckResult;

pub const PRIMARY_KEY: &str = "match_id";

/// Look up the columns a check needs, or produce the failure naming what is absent.
fn require<'t, const N: usize>(
    table: &'t Table,
    check: &'static str,
    names: [&str; N],
) -> Result<[&'t Column; N], CheckResult> {
    let found: Vec<&Column> = names.iter().filter_map(|n| table.column(n)).collect();
    found.try_into().map_err(|_| {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| !table.has_column(n))
            .collect();
        CheckResult::fail(
            check,
            format!("cannot check {check}: missing column(s) {}", missing.join(", ")),
        )
    })
}

fn count_rows(rows: usize, bad: impl Fn(usize) -> bool) -> usize {
    (0..rows).filter(|&i| bad(i)).count()
}

/// `match_id` must have no nulls and no duplicates.
pub fn check_primary_key(table: &Table) -> CheckResult {
    const CHECK: &str = "pk";
    let [ids] = match require(table, CHECK, [PRIMARY_KEY]) {
        Ok(c) => c,
        Err(r) => return r,
    };

    let nulls = count_rows(table.row_count(), |i| ids.is_null(i));
    if nulls > 0 {
        return CheckResult::fail(CHECK, format!("{PRIMARY_KEY} contains {nulls} nulls"));
    }

    // Integer-valued ids compare numerically so `7` and `7.0` collide.
    let mut seen: HashSet<String> = HashSet::with_capacity(table.row_count());
    let duplicates = (0..table.row_count())
        .filter(|&i| {
            let key = match ids.int(i) {
                Some(v) => v.to_string(),
                None => ids.raw(i).trim().to_string(),
            };
            !seen.insert(key)
        })
        .count();
    if duplicates > 0 {
        return CheckResult::fail(
            CHECK,
            format!("{PRIMARY_KEY} has duplicates: {duplicates}"),
        );
    }
    CheckResult::pass(CHECK, format!("PK: {PRIMARY_KEY} is unique"))
}

/// `goal_difference == fulltime_home - fulltime_away` for every row.
pub fn check_goal_difference(table: &Table) -> CheckResult {
    const CHECK: &str = "derived.goal_difference";
    let [home, away, gd] = match require(
        table,
        CHECK,
        ["fulltime_home", "fulltime_away", "goal_difference"],
    ) {
        Ok(c) => c,
        Err(r) => return r,
    };
    let bad = count_rows(table.row_count(), |i| {
        match (home.int(i), away.int(i), gd.int(i)) {
            (Some(h), Some(a), Some(g)) => h.checked_sub(a) != Some(g),
            _ => true,
        }
    });
    if bad > 0 {
        CheckResult::fail(CHECK, format!("goal_difference mismatch for {bad} rows"))
    } else {
        CheckResult::pass(CHECK, "Derived: goal_difference matches FT scores")
    }
}

/// `total_goals == fulltime_home + fulltime_away` for every row.
pub fn check_total_goals(table: &Table) -> CheckResult {
    const CHECK: &str = "derived.total_goals";
    let [home, away, total] = match require(
        table,
        CHECK,
        ["fulltime_home", "fulltime_away", "total_goals"],
    ) {
        Ok(c) => c,
        Err(r) => return r,
    };
    let bad = count_rows(table.row_count(), |i| {
        match (home.int(i), away.int(i), total.int(i)) {
            (Some(h), Some(a), Some(t)) => h.checked_add(a) != Some(t),
            _ => true,
        }
    });
    if bad > 0 {
        CheckResult::fail(CHECK, format!("total_goals mismatch for {bad} rows"))
    } else {
        CheckResult::pass(CHECK, "Derived: total_goals matches FT scores")
    }
}

fn outcome_at(home: &Column, away: &Column, row: usize) -> Option<Outcome> {
    Some(Outcome::from_scores(home.int(row)?, away.int(row)?))
}

/// `match_outcome` must be the label the fulltime score implies.
pub fn check_match_outcome(table: &Table) -> CheckResult {
    const CHECK: &str = "derived.match_outcome";
    let [home, away, outcome] = match require(
        table,
        CHECK,
        ["fulltime_home", "fulltime_away", "match_outcome"],
    ) {
        Ok(c) => c,
        Err(r) => return r,
    };
    let bad = count_rows(table.row_count(), |i| {
        outcome_at(home, away, i).map(Outcome::as_str) != Some(outcome.raw(i))
    });
    if bad > 0 {
        CheckResult::fail(
            CHECK,
            format!("match_outcome mismatch vs FT scores for {bad} rows"),
        )
    } else {
        CheckResult::pass(CHECK, "Derived: match_outcome matches FT scores")
    }
}

/// `(home_points, away_points)` must be (3,0), (0,3) or (1,1) per the fulltime score.
pub fn check_points(table: &Table) -> CheckResult {
    const CHECK: &str = "derived.points";
    let [home, away, home_pts, away_pts] = match require(
        table,
        CHECK,
        ["fulltime_home", "fulltime_away", "home_points", "away_points"],
    ) {
        Ok(c) => c,
        Err(r) => return r,
    };
    let bad = count_rows(table.row_count(), |i| {
        let want = outcome_at(home, away, i).map(Outcome::points);
        let got = home_pts.int(i).zip(away_pts.int(i));
        want.is_none() || want != got
    });
    if bad > 0 {
        CheckResult::fail(
            CHECK,
            format!("home_points/away_points mismatch vs FT scores for {bad} rows"),
        )
    } else {
        CheckResult::pass(CHECK, "Derived: points match FT scores")
    }
}

/// Every `date_utc` must parse to a UTC instant.
pub fn check_dates(table: &Table) -> CheckResult {
    const CHECK: &str = "date_utc";
    let [dates] = match require(table, CHECK, ["date_utc"]) {
        Ok(c) => c,
        Err(r) => return r,
    };
    let bad = count_rows(table.row_count(), |i| parse_utc(dates.raw(i)).is_none());
    if bad > 0 {
        CheckResult::fail(CHECK, format!("date_utc has {bad} unparsable values"))
    } else {
        CheckResult::pass(CHECK, "date_utc is parseable (UTC)")
    }
}

/// One failure per score column holding a negative value.
pub fn check_non_negative(table: &Table, score_columns: &[String]) -> Vec<CheckResult> {
    const CHECK: &str = "non_negative";
    let mut res = Vec::new();
    let mut missing = Vec::new();
    for name in score_columns {
        let Some(col) = table.column(name) else {
            missing.push(name.as_str());
            continue;
        };
        let negative = (0..col.len()).any(|i| col.float(i).is_some_and(|v| v < 0.0));
        if negative {
            res.push(CheckResult::fail(CHECK, format!("{name} has negative values")));
        }
    }
    if !missing.is_empty() {
        res.push(CheckResult::fail(
            CHECK,
            format!("cannot check {CHECK}: missing column(s) {}", missing.join(", ")),
        ));
    }
    if res.is_empty() {
        res.push(CheckResult::pass(CHECK, "Scores: no negative values"));
    }
    res
}
