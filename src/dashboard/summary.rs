//! Summary page: identity, activity, medals, records and PR milestones.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::country::flag_emoji;
use crate::events::{compare_events, event_name};
use crate::pr::count_prs;
use crate::profile::Profile;
use crate::rows::ResultRow;
use crate::time_format::{ResultKind, format_result, ranking_key};

/// Medal counts from the official profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Medals {
    pub gold: u64,
    pub silver: u64,
    pub bronze: u64,
}

/// Records currently held, from the official profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordsHeld {
    pub national: u64,
    pub continental: u64,
    pub world: u64,
}

impl RecordsHeld {
    /// Whether any record is held.
    pub fn any(&self) -> bool {
        self.national + self.continental + self.world > 0
    }
}

/// A standing personal best and where it was set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub event: String,
    pub kind: ResultKind,
    pub value: i64,
    pub formatted: String,
    pub competition_name: String,
    pub date: NaiveDate,
}

/// Everything shown on the summary page.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// WCA id as requested.
    pub wca_id: String,
    /// Display name.
    pub name: String,
    pub country_iso2: String,
    /// Flag emoji for the country.
    pub flag: String,
    /// From the official profile, else the number of distinct competitions.
    pub competition_count: u64,
    /// From the official profile, else the number of rounds.
    pub total_solves: u64,
    pub medals: Medals,
    pub records: RecordsHeld,
    /// Calendar years from the first to the latest competition, inclusive.
    pub years_active: i32,
    /// Date of the first dated competition.
    pub first_date: Option<NaiveDate>,
    /// Date of the latest dated competition.
    pub last_date: Option<NaiveDate>,
    /// Event with the most rounds.
    pub most_played_event: Option<String>,
    /// PRs across all events; `sin+avg` counts twice.
    pub pr_total: u32,
    /// Event with the most PRs and its count.
    pub top_pr_event: Option<(String, u32)>,
    /// Standing PR set the longest ago.
    pub oldest_active_pr: Option<Milestone>,
    /// Standing PR set most recently.
    pub most_recent_pr: Option<Milestone>,
    /// Name of the latest competition.
    pub last_competition: Option<String>,
}

/// Build the summary for `profile`. Events in `skip_events` are left out of
/// the record milestones.
pub fn summarize(profile: &Profile, skip_events: &[String]) -> Summary {
    let rows = &profile.rows;
    let info = &profile.info;

    let distinct_competitions = rows
        .iter()
        .map(|r| r.competition_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let competition_count = info.u64("competition_count").unwrap_or(distinct_competitions);
    let total_solves = info
        .u64("total_solves")
        .filter(|n| *n > 0)
        .unwrap_or(rows.len() as u64);

    let first_date = rows.iter().filter_map(|r| r.date).min();
    let last_date = rows.iter().filter_map(|r| r.date).max();
    let years_active = match (first_date, last_date) {
        (Some(first), Some(last)) => last.year() - first.year() + 1,
        _ => 0,
    };

    let prs = count_prs(rows);
    let (oldest_active_pr, most_recent_pr) = milestones(rows, skip_events);

    Summary {
        wca_id: profile.wca_id.clone(),
        name: profile.display_name().to_owned(),
        country_iso2: profile.country_iso2().to_owned(),
        flag: flag_emoji(profile.country_iso2()),
        competition_count,
        total_solves,
        medals: Medals {
            gold: info.count("medals.gold"),
            silver: info.count("medals.silver"),
            bronze: info.count("medals.bronze"),
        },
        records: RecordsHeld {
            national: info.count("records.national"),
            continental: info.count("records.continental"),
            world: info.count("records.world"),
        },
        years_active,
        first_date,
        last_date,
        most_played_event: most_played_event(rows),
        pr_total: prs.total,
        top_pr_event: prs.top_event().map(|(e, n)| (e.to_owned(), n)),
        oldest_active_pr,
        most_recent_pr,
        last_competition: rows.last().map(|r| r.competition_name.clone()),
    }
}

/// Event with the most rounds; ties go to the earlier catalogue event.
pub fn most_played_event(rows: &[ResultRow]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.event.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(ea, na), (eb, nb)| na.cmp(nb).then_with(|| compare_events(eb, ea)))
        .map(|(e, _)| e.to_owned())
}

/// Oldest and most recent of the standing personal bests.
///
/// Each event contributes its best single and best average; among equal
/// values the earliest is the standing one. Undated rows are ignored.
pub fn milestones(rows: &[ResultRow], skip_events: &[String]) -> (Option<Milestone>, Option<Milestone>) {
    let mut events: Vec<&str> = rows.iter().map(|r| r.event.as_str()).collect();
    events.sort_by(|a, b| compare_events(a, b));
    events.dedup();

    let mut standing: Vec<Milestone> = Vec::new();
    for event in events {
        if skip_events.iter().any(|s| s == event) {
            continue;
        }
        for kind in [ResultKind::Single, ResultKind::Average] {
            if let Some(m) = standing_best(rows, event, kind) {
                standing.push(m);
            }
        }
    }

    let oldest = standing.iter().min_by_key(|m| m.date).cloned();
    let newest = standing.iter().max_by_key(|m| m.date).cloned();
    (oldest, newest)
}

fn standing_best(rows: &[ResultRow], event: &str, kind: ResultKind) -> Option<Milestone> {
    rows.iter()
        .filter(|r| r.event == event)
        .filter_map(|r| {
            let value = match kind {
                ResultKind::Single => r.best,
                ResultKind::Average => r.average,
            };
            Some((value, r.date?, r))
        })
        .filter(|(value, _, _)| *value > 0)
        .min_by_key(|(value, date, _)| (ranking_key(*value, event), *date))
        .map(|(value, date, row)| Milestone {
            event: event.to_owned(),
            kind,
            value,
            formatted: format_result(value, event, kind),
            competition_name: row.competition_name.clone(),
            date,
        })
}

/// `"Mar 2016 - Oct 2024"`, or `-` when there are no dated rows.
pub fn date_range_label(summary: &Summary) -> String {
    match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => {
            format!("{} - {}", first.format("%b %Y"), last.format("%b %Y"))
        }
        _ => "-".to_owned(),
    }
}

/// Display name of the most-played event, or `-`.
pub fn most_played_label(summary: &Summary) -> String {
    summary
        .most_played_event
        .as_deref()
        .map_or_else(|| "-".to_owned(), |e| event_name(e).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{profile_with, row};
    use serde_json::json;
    use wca_data::FlatRecord;

    fn skip() -> Vec<String> {
        vec!["333ft".into(), "magic".into(), "mmagic".into()]
    }

    #[test]
    fn counts_fall_back_to_rows() {
        let profile = profile_with(vec![
            row("A", "2019-01-05", "333", 1500, 1700),
            row("A", "2019-01-05", "222", 500, 600),
            row("B", "2021-06-01", "333", 1400, 1600),
        ]);
        let s = summarize(&profile, &skip());
        assert_eq!(s.competition_count, 2);
        assert_eq!(s.total_solves, 3);
        assert_eq!(s.years_active, 3);
        assert_eq!(s.most_played_event.as_deref(), Some("333"));
        assert_eq!(s.last_competition.as_deref(), Some("B Open"));
        assert_eq!(date_range_label(&s), "Jan 2019 - Jun 2021");
    }

    #[test]
    fn official_profile_counts_win() {
        let mut profile = profile_with(vec![row("A", "2019-01-05", "333", 1500, 1700)]);
        profile.info = FlatRecord::from_value(&json!({
            "competition_count": 42,
            "medals": {"gold": 3, "silver": 1, "bronze": 0},
            "records": {"national": 1, "continental": 0, "world": 0},
            "person": {"name": "Official", "country": {"iso2": "ES"}}
        }));
        let s = summarize(&profile, &skip());
        assert_eq!(s.competition_count, 42);
        assert_eq!(s.medals.gold, 3);
        assert!(s.records.any());
        assert_eq!(s.name, "Official");
        assert_eq!(s.flag, "🇪🇸");
    }

    #[test]
    fn pr_totals_and_top_event() {
        let mut profile = profile_with(vec![
            row("A", "2019-01-05", "333", 1500, 1700),
            row("B", "2020-01-05", "333", 1400, 1600),
            row("B", "2020-01-05", "222", 500, 0),
        ]);
        crate::pr::label_prs(&mut profile.rows);
        let s = summarize(&profile, &skip());
        assert_eq!(s.pr_total, 5);
        assert_eq!(s.top_pr_event, Some(("333".to_owned(), 4)));
    }

    #[test]
    fn milestones_use_earliest_of_tied_bests() {
        let rows = vec![
            row("A", "2018-03-01", "222", 450, 0),
            row("B", "2019-03-01", "333", 1000, 1200),
            row("C", "2022-03-01", "333", 1000, 1100),
            row("D", "2023-03-01", "222", 450, 0),
        ];
        let (oldest, newest) = milestones(&rows, &skip());
        let oldest = oldest.expect("oldest");
        let newest = newest.expect("newest");
        assert_eq!((oldest.event.as_str(), oldest.kind), ("222", ResultKind::Single));
        assert_eq!(oldest.competition_name, "A Open");
        assert_eq!((newest.event.as_str(), newest.kind), ("333", ResultKind::Average));
        assert_eq!(newest.formatted, "11.00");
    }

    #[test]
    fn milestones_skip_retired_events() {
        let rows = vec![
            row("A", "2010-01-01", "magic", 100, 0),
            row("B", "2020-01-01", "333", 1000, 0),
        ];
        let (oldest, _) = milestones(&rows, &skip());
        assert_eq!(oldest.expect("oldest").event, "333");
    }

    #[test]
    fn empty_profile_has_no_milestones() {
        let s = summarize(&profile_with(vec![]), &skip());
        assert!(s.oldest_active_pr.is_none());
        assert_eq!(s.years_active, 0);
        assert_eq!(most_played_label(&s), "-");
        assert_eq!(date_range_label(&s), "-");
    }
}
