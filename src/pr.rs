//! Personal-record detection over chronologically ordered rows.
//!
//! For each event a running best single and running best average are kept.
//! Non-positive values (DNF, DNS, "no average") never count. A value is a PR
//! only if it is strictly better than the running best; ties are not PRs.
//! One linear pass, each event independent of the others.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::rows::ResultRow;
use crate::time_format::ranking_key;

/// Which records a row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrLabel {
    /// New best single.
    Single,
    /// New best average.
    Average,
    /// New best single and average in the same round.
    SingleAndAverage,
}

impl PrLabel {
    /// Label as shown in result tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Average => "average",
            Self::SingleAndAverage => "sin+avg",
        }
    }

    /// Whether the single was a PR.
    pub fn has_single(&self) -> bool {
        matches!(self, Self::Single | Self::SingleAndAverage)
    }

    /// Whether the average was a PR.
    pub fn has_average(&self) -> bool {
        matches!(self, Self::Average | Self::SingleAndAverage)
    }

    fn from_flags(single: bool, average: bool) -> Option<Self> {
        match (single, average) {
            (true, true) => Some(Self::SingleAndAverage),
            (true, false) => Some(Self::Single),
            (false, true) => Some(Self::Average),
            (false, false) => None,
        }
    }
}

impl fmt::Display for PrLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PrLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Running bests for one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningBest {
    single: Option<i64>,
    average: Option<i64>,
}

impl RunningBest {
    /// Feed the next round and return its label, updating the bests.
    ///
    /// Values must be comparable with `<`; see [`ranking_key`].
    pub fn observe(&mut self, single: i64, average: i64) -> Option<PrLabel> {
        let single_pr = improves(self.single, single);
        let average_pr = improves(self.average, average);
        if single_pr {
            self.single = Some(single);
        }
        if average_pr {
            self.average = Some(average);
        }
        PrLabel::from_flags(single_pr, average_pr)
    }

    /// Best single so far.
    pub fn single(&self) -> Option<i64> {
        self.single
    }

    /// Best average so far.
    pub fn average(&self) -> Option<i64> {
        self.average
    }
}

fn improves(best: Option<i64>, value: i64) -> bool {
    value > 0 && best.is_none_or(|b| value < b)
}

/// Label a chronological sequence of `(event, single, average)` triples.
///
/// Values are compared through [`ranking_key`], so old and current
/// multi-blind encodings rank consistently.
pub fn pr_labels<'a, I>(results: I) -> Vec<Option<PrLabel>>
where
    I: IntoIterator<Item = (&'a str, i64, i64)>,
{
    let mut bests: HashMap<&'a str, RunningBest> = HashMap::new();
    results
        .into_iter()
        .map(|(event, single, average)| {
            bests
                .entry(event)
                .or_default()
                .observe(ranking_key(single, event), ranking_key(average, event))
        })
        .collect()
}

/// Fill `pr` on every row. Rows must be in chronological order.
pub fn label_prs(rows: &mut [ResultRow]) {
    let labels = pr_labels(
        rows.iter()
            .map(|r| (r.event.as_str(), r.best, r.average))
            .collect::<Vec<_>>(),
    );
    for (row, label) in rows.iter_mut().zip(labels) {
        row.pr = label;
    }
}

/// PR totals per event. A `sin+avg` row counts twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrCounts {
    /// PRs per event code.
    pub per_event: BTreeMap<String, u32>,
    /// PRs across all events.
    pub total: u32,
}

impl PrCounts {
    /// Event with the most PRs; ties go to the earlier catalogue event.
    pub fn top_event(&self) -> Option<(&str, u32)> {
        self.per_event
            .iter()
            .map(|(e, n)| (e.as_str(), *n))
            .max_by(|(ea, na), (eb, nb)| {
                na.cmp(nb)
                    .then_with(|| crate::events::compare_events(eb, ea))
            })
    }
}

/// Count labelled PRs.
pub fn count_prs<'a, I>(rows: I) -> PrCounts
where
    I: IntoIterator<Item = &'a ResultRow>,
{
    let mut counts = PrCounts::default();
    for row in rows {
        let Some(label) = row.pr else { continue };
        let n = u32::from(label.has_single()) + u32::from(label.has_average());
        *counts.per_event.entry(row.event.clone()).or_insert(0) += n;
        counts.total += n;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RoundKind;
    use PrLabel::{Average, Single, SingleAndAverage};

    fn row(event: &str, best: i64, average: i64) -> ResultRow {
        ResultRow {
            competition_id: "C".into(),
            competition_name: "C".into(),
            date: None,
            country: String::new(),
            event: event.into(),
            round: "Final".into(),
            round_kind: RoundKind::Final,
            position: None,
            best,
            average,
            solves: vec![],
            pr: None,
        }
    }

    #[test]
    fn first_valid_result_is_a_pr() {
        let labels = pr_labels([("333", 1500, 1700)]);
        assert_eq!(labels, vec![Some(SingleAndAverage)]);
    }

    #[test]
    fn strict_improvement_required() {
        let labels = pr_labels([
            ("333", 1500, 1700),
            ("333", 1500, 1700), // tie: not a PR
            ("333", 1400, 1800), // single only
            ("333", 1450, 1600), // average only
            ("333", 1300, 1500), // both
            ("333", 1600, 1900), // neither
        ]);
        assert_eq!(
            labels,
            vec![
                Some(SingleAndAverage),
                None,
                Some(Single),
                Some(Average),
                Some(SingleAndAverage),
                None
            ]
        );
    }

    #[test]
    fn sentinels_and_zero_never_count() {
        let labels = pr_labels([
            ("333", -1, 0),     // DNF single, no average
            ("333", -2, -1),    // DNS, DNF average
            ("333", 2000, 0),   // first real single
            ("333", 2100, 2300) // first real average
        ]);
        assert_eq!(labels, vec![None, None, Some(Single), Some(Average)]);
    }

    #[test]
    fn sentinels_do_not_reset_running_best() {
        let labels = pr_labels([("333", 1000, 1200), ("333", -1, -1), ("333", 1100, 1300)]);
        assert_eq!(labels, vec![Some(SingleAndAverage), None, None]);
    }

    #[test]
    fn events_are_independent() {
        let labels = pr_labels([
            ("333", 1000, 1200),
            ("222", 5000, 6000), // slower, but first for 2x2
            ("333", 900, 1300),
            ("222", 400, 500),
        ]);
        assert_eq!(
            labels,
            vec![
                Some(SingleAndAverage),
                Some(SingleAndAverage),
                Some(Single),
                Some(SingleAndAverage)
            ]
        );
    }

    #[test]
    fn multi_blind_mixed_encodings_rank_by_points() {
        let labels = pr_labels([
            ("333mbf", 1_970_301_800, 0), // old format, 2/3 30:00
            ("333mbf", 990_060_001, 0),   // 1/2: smaller number, fewer points
            ("333mbf", 980_200_001, 0),   // 2/3 33:20: same points, slower
            ("333mbf", 980_150_001, 0),   // 2/3 25:00: same points, faster
            ("333mbf", 970_360_001, 0),   // 3/4: more points
        ]);
        assert_eq!(labels, vec![Some(Single), None, None, Some(Single), Some(Single)]);
    }

    #[test]
    fn old_multi_blind_after_current_encoding() {
        // 4/4 in the old encoding beats a 2/2 packed in the current one.
        let labels = pr_labels([("333mbf", 970_120_000, 0), ("333mbf", 1_950_403_000, 0)]);
        assert_eq!(labels, vec![Some(Single), Some(Single)]);
    }

    #[test]
    fn labelling_is_deterministic() {
        let input = [("333", 1000, 1100), ("333", 990, 1200), ("333", 995, 1050)];
        assert_eq!(pr_labels(input), pr_labels(input));
    }

    #[test]
    fn running_best_tracks_minimums() {
        let mut best = RunningBest::default();
        best.observe(1000, 0);
        best.observe(900, 1100);
        best.observe(950, 1000);
        assert_eq!(best.single(), Some(900));
        assert_eq!(best.average(), Some(1000));
    }

    #[test]
    fn label_prs_fills_rows() {
        let mut rows = vec![row("333", 1000, 1200), row("333", 1000, 1100), row("333", 999, 0)];
        label_prs(&mut rows);
        let labels: Vec<Option<PrLabel>> = rows.iter().map(|r| r.pr).collect();
        assert_eq!(labels, vec![Some(SingleAndAverage), Some(Average), Some(Single)]);
    }

    #[test]
    fn counts_double_for_sin_avg() {
        let mut rows = vec![row("333", 1000, 1200), row("333", 900, 1300), row("222", 500, 600)];
        label_prs(&mut rows);
        let counts = count_prs(&rows);
        assert_eq!(counts.per_event["333"], 3);
        assert_eq!(counts.per_event["222"], 2);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.top_event(), Some(("333", 3)));
    }

    #[test]
    fn top_event_tie_prefers_catalogue_order() {
        let mut counts = PrCounts::default();
        counts.per_event.insert("sq1".into(), 2);
        counts.per_event.insert("222".into(), 2);
        assert_eq!(counts.top_event(), Some(("222", 2)));
    }

    #[test]
    fn labels_display_and_serialize() {
        assert_eq!(SingleAndAverage.to_string(), "sin+avg");
        let json = serde_json::to_string(&Some(Single)).expect("serialize");
        assert_eq!(json, "\"single\"");
    }
}
