//! PR progression over time and year-over-year comparison.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::events::{FEWEST_MOVES, MULTI_BLIND};
use crate::rows::ResultRow;
use crate::time_format::{ResultKind, format_result, ranking_key};

/// One improvement of the running best.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressPoint {
    /// Date of the competition that set it.
    pub date: NaiveDate,
    /// Raw value in the upstream encoding.
    pub value: i64,
    /// Value as shown in tables.
    pub formatted: String,
    /// Competition where it was set.
    pub competition_name: String,
}

fn value_of(row: &ResultRow, kind: ResultKind) -> i64 {
    match kind {
        ResultKind::Single => row.best,
        ResultKind::Average => row.average,
    }
}

fn ensure_event(rows: &[ResultRow], event: &str) -> Result<()> {
    if rows.iter().any(|r| r.event == event) {
        Ok(())
    } else {
        Err(DashboardError::UnknownEvent(event.to_owned()))
    }
}

/// Every strict improvement of the running best for `event`, oldest first.
///
/// Only dated rows take part; a row whose competition date is unknown
/// cannot be placed on the timeline.
///
/// # Errors
///
/// Returns [`DashboardError::UnknownEvent`] if no row has `event`.
pub fn pr_history(rows: &[ResultRow], event: &str, kind: ResultKind) -> Result<Vec<ProgressPoint>> {
    ensure_event(rows, event)?;
    let mut best: Option<i64> = None;
    let mut points = Vec::new();
    for row in rows.iter().filter(|r| r.event == event) {
        let Some(date) = row.date else { continue };
        let value = value_of(row, kind);
        let key = ranking_key(value, event);
        if value <= 0 || best.is_some_and(|b| key >= b) {
            continue;
        }
        best = Some(key);
        points.push(ProgressPoint {
            date,
            value,
            formatted: format_result(value, event, kind),
            competition_name: row.competition_name.clone(),
        });
    }
    Ok(points)
}

/// Best value per calendar year for `event`. Undated rows are ignored.
pub fn yearly_bests(rows: &[ResultRow], event: &str, kind: ResultKind) -> BTreeMap<i32, i64> {
    let mut years: BTreeMap<i32, i64> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.event == event) {
        let value = value_of(row, kind);
        let Some(date) = row.date else { continue };
        if value <= 0 {
            continue;
        }
        years
            .entry(date.year())
            .and_modify(|b| {
                if ranking_key(value, event) < ranking_key(*b, event) {
                    *b = value;
                }
            })
            .or_insert(value);
    }
    years
}

/// Best of one year against the best of another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearComparison {
    /// Event code.
    pub event: String,
    pub kind: ResultKind,
    pub base_year: i32,
    pub target_year: i32,
    /// Best raw value of the base year.
    pub base_value: i64,
    /// Best raw value of the target year.
    pub target_value: i64,
    pub base_formatted: String,
    pub target_formatted: String,
    /// `base - target` in seconds (moves for fewest-moves); positive is better.
    pub improvement: f64,
    /// `"sec"` or `"moves"`.
    pub unit: &'static str,
    /// Improvement as a percentage of the base value.
    pub percent: f64,
}

/// The latest two years with results, as `(base, target)`.
pub fn default_years(yearly: &BTreeMap<i32, i64>) -> Option<(i32, i32)> {
    let mut latest = yearly.keys().rev();
    let target = *latest.next()?;
    let base = *latest.next()?;
    Some((base, target))
}

/// Compare the best of `base_year` with the best of `target_year`.
///
/// Returns `Ok(None)` for multi-blind, whose packed values have no
/// meaningful difference.
///
/// # Errors
///
/// Returns [`DashboardError::UnknownEvent`] if no row has `event`, or
/// [`DashboardError::InvalidPeriod`] if either year has no valid result.
pub fn compare_years(
    rows: &[ResultRow],
    event: &str,
    kind: ResultKind,
    base_year: i32,
    target_year: i32,
) -> Result<Option<YearComparison>> {
    ensure_event(rows, event)?;
    if event == MULTI_BLIND {
        return Ok(None);
    }
    let yearly = yearly_bests(rows, event, kind);
    let lookup = |year: i32| {
        yearly
            .get(&year)
            .copied()
            .ok_or_else(|| DashboardError::InvalidPeriod(format!("no {event} {kind} in {year}")))
    };
    let base_value = lookup(base_year)?;
    let target_value = lookup(target_year)?;

    let fmc_single = event == FEWEST_MOVES && kind == ResultKind::Single;
    let divisor = if fmc_single { 1.0 } else { 100.0 };
    let delta = (base_value - target_value) as f64;

    Ok(Some(YearComparison {
        event: event.to_owned(),
        kind,
        base_year,
        target_year,
        base_value,
        target_value,
        base_formatted: format_result(base_value, event, kind),
        target_formatted: format_result(target_value, event, kind),
        improvement: delta / divisor,
        unit: if event == FEWEST_MOVES { "moves" } else { "sec" },
        percent: delta / base_value as f64 * 100.0,
    }))
}
