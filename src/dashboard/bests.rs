//! Personal bests per event, optionally restricted to a period.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::events::EVENTS;
use crate::rows::ResultRow;
use crate::time_format::{ResultKind, format_result, ranking_key};

/// Which rows a personal-bests view considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Period {
    /// Every row, dated or not.
    All,
    /// The twelve months up to and including today.
    PastYear,
    /// 1 January of today's year up to today.
    CurrentYear,
    /// An inclusive date range.
    Range { from: NaiveDate, to: NaiveDate },
}

impl Period {
    /// An inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidPeriod`] if `from` is after `to`.
    pub fn range(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(DashboardError::InvalidPeriod(format!(
                "range start {from} is after end {to}"
            )));
        }
        Ok(Self::Range { from, to })
    }

    /// Inclusive bounds relative to `today`; `None` for [`Period::All`].
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::All => None,
            Self::PastYear => {
                let start = today.checked_sub_months(Months::new(12)).unwrap_or(NaiveDate::MIN);
                Some((start, today))
            }
            Self::CurrentYear => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                Some((start, today))
            }
            Self::Range { from, to } => Some((from, to)),
        }
    }

    /// Whether a row dated `date` falls inside the period. Undated rows
    /// only belong to [`Period::All`].
    pub fn contains(&self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match (self.bounds(today), date) {
            (None, _) => true,
            (Some((start, end)), Some(d)) => start <= d && d <= end,
            (Some(_), None) => false,
        }
    }
}

/// A best result and where it was set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestResult {
    /// Raw value in the upstream encoding.
    pub value: i64,
    /// Value as shown in tables.
    pub formatted: String,
    pub competition_id: String,
    pub competition_name: String,
    /// `None` when the competition date is unknown.
    pub date: Option<NaiveDate>,
}

/// Best single and average of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventBests {
    /// Event code.
    pub event: String,
    pub event_name: String,
    /// Best single in the period, if any.
    pub single: Option<BestResult>,
    /// Best average in the period, if any.
    pub average: Option<BestResult>,
}

/// Best single and average per catalogue event inside `period`.
///
/// Events appear in catalogue order; events outside the catalogue are not shown.
/// Among equal values the earliest row wins, undated rows last.
pub fn personal_bests(rows: &[ResultRow], period: &Period, today: NaiveDate) -> Vec<EventBests> {
    let in_period: Vec<&ResultRow> = rows
        .iter()
        .filter(|r| period.contains(r.date, today))
        .collect();

    EVENTS
        .iter()
        .filter_map(|(code, name)| {
            let single = best_of(&in_period, code, ResultKind::Single);
            let average = best_of(&in_period, code, ResultKind::Average);
            if single.is_none() && average.is_none() {
                return None;
            }
            Some(EventBests {
                event: (*code).to_owned(),
                event_name: (*name).to_owned(),
                single,
                average,
            })
        })
        .collect()
}

fn best_of(rows: &[&ResultRow], event: &str, kind: ResultKind) -> Option<BestResult> {
    rows.iter()
        .filter(|r| r.event == event)
        .map(|r| {
            let value = match kind {
                ResultKind::Single => r.best,
                ResultKind::Average => r.average,
            };
            (value, *r)
        })
        .filter(|(value, _)| *value > 0)
        .min_by_key(|(value, r)| (ranking_key(*value, event), r.date.is_none(), r.date))
        .map(|(value, r)| BestResult {
            value,
            formatted: format_result(value, event, kind),
            competition_id: r.competition_id.clone(),
            competition_name: r.competition_name.clone(),
            date: r.date,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{date, row};

    fn sample() -> Vec<ResultRow> {
        vec![
            row("Old", "2019-05-01", "333", 1200, 1400),
            row("Mid", "2025-11-01", "333", 1100, 1500),
            row("New", "2026-03-01", "333", 1150, 1300),
            row("New", "2026-03-01", "333fm", 30, 3233),
            row("New", "2026-03-01", "333mts", 5000, 0),
        ]
    }

    #[test]
    fn all_time_bests_in_catalogue_order() {
        let bests = personal_bests(&sample(), &Period::All, date("2026-10-16"));
        let events: Vec<&str> = bests.iter().map(|b| b.event.as_str()).collect();
        assert_eq!(events, vec!["333", "333fm"]);
        let three = &bests[0];
        assert_eq!(three.single.as_ref().map(|b| b.value), Some(1100));
        assert_eq!(three.average.as_ref().map(|b| b.formatted.as_str()), Some("13.00"));
        assert_eq!(bests[1].single.as_ref().map(|b| b.formatted.as_str()), Some("30"));
        assert_eq!(bests[1].average.as_ref().map(|b| b.formatted.as_str()), Some("32.33"));
    }

    #[test]
    fn current_year_only() {
        let bests = personal_bests(&sample(), &Period::CurrentYear, date("2026-10-16"));
        let single = bests[0].single.as_ref().expect("single");
        assert_eq!(single.value, 1150);
        assert_eq!(single.competition_name, "New Open");
    }

    #[test]
    fn past_year_spans_twelve_months() {
        let bests = personal_bests(&sample(), &Period::PastYear, date("2026-10-16"));
        assert_eq!(bests[0].single.as_ref().map(|b| b.value), Some(1100));
        assert_eq!(
            Period::PastYear.bounds(date("2026-10-16")),
            Some((date("2025-10-16"), date("2026-10-16")))
        );
    }

    #[test]
    fn ties_go_to_earliest() {
        let rows = vec![
            row("First", "2020-01-01", "222", 300, 0),
            row("Second", "2021-01-01", "222", 300, 0),
        ];
        let bests = personal_bests(&rows, &Period::All, date("2026-10-16"));
        let single = bests[0].single.as_ref().expect("single");
        assert_eq!(single.competition_id, "First");
        assert!(bests[0].average.is_none());
    }

    #[test]
    fn empty_period_has_no_bests() {
        let period = Period::range(date("2000-01-01"), date("2000-12-31")).expect("range");
        assert!(personal_bests(&sample(), &period, date("2026-10-16")).is_empty());
    }

    #[test]
    fn undated_rows_only_in_all_time() {
        let mut r = row("X", "2026-01-01", "333", 900, 0);
        r.date = None;
        assert!(Period::All.contains(r.date, date("2026-10-16")));
        assert!(!Period::CurrentYear.contains(r.date, date("2026-10-16")));
    }

    #[test]
    fn inverted_range_rejected() {
        let err = Period::range(date("2022-01-01"), date("2021-01-01")).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidPeriod(_)));
    }
}
