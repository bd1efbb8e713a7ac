//! Dashboard pages computed from a loaded [`crate::profile::Profile`].
//!
//! Every page is a pure function of the profile (plus "today" where a
//! period is involved) returning a serialisable view model, except the
//! neighbours page which fetches competitor lists. The scramble explorer
//! works on a competition's scramble list rather than a profile.

pub mod bests;
pub mod competitions;
pub mod neighbours;
pub mod progression;
pub mod rankings;
pub mod scrambles;
pub mod statistics;
pub mod summary;

pub use bests::{EventBests, Period, personal_bests};
pub use competitions::{CompetitionEntry, CompetitionMap, Heatmap, competition_list, heatmap, map_points};
pub use neighbours::{NeighbourBoard, find_neighbours, neighbour_board};
pub use progression::{YearComparison, compare_years, pr_history, yearly_bests};
pub use rankings::{EventRanks, rankings};
pub use scrambles::{EventScrambles, scramble_sheet};
pub use statistics::{Statistics, statistics};
pub use summary::{Summary, summarize};

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use wca_data::Competition;
    use wca_data::types::{CompetitionDate, Coordinates, Venue};

    use crate::profile::Profile;
    use crate::rows::{ResultRow, RoundKind};

    pub(crate) fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
    }

    /// A final-round row at competition `comp` ("`comp` Open", Spain).
    pub(crate) fn row(comp: &str, day: &str, event: &str, best: i64, average: i64) -> ResultRow {
        ResultRow {
            competition_id: comp.into(),
            competition_name: format!("{comp} Open"),
            date: Some(date(day)),
            country: "ES".into(),
            event: event.into(),
            round: "Final".into(),
            round_kind: RoundKind::Final,
            position: Some(1),
            best,
            average,
            solves: vec![],
            pr: None,
        }
    }

    pub(crate) fn competition(id: &str, day: &str, coords: Option<(f64, f64)>) -> Competition {
        Competition {
            id: id.into(),
            name: format!("{id} Open"),
            country: "ES".into(),
            date: CompetitionDate {
                from: Some(date(day)),
                ..Default::default()
            },
            venue: Venue {
                name: String::new(),
                coordinates: coords.map(|(latitude, longitude)| Coordinates {
                    latitude,
                    longitude,
                }),
            },
            ..Default::default()
        }
    }

    pub(crate) fn profile_with(rows: Vec<ResultRow>) -> Profile {
        Profile {
            wca_id: "2016TEST01".into(),
            name: "Test Cuber".into(),
            country: "ES".into(),
            rows,
            competitions: HashMap::new(),
            ..Default::default()
        }
    }
}
