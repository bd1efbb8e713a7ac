//! Current world, continental and national ranks per event.

use serde::Serialize;
use wca_data::FlatRecord;

use crate::events::{event_name, sort_events};
use crate::profile::Profile;

/// Ranks for one result type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ranks {
    /// World rank.
    pub world: Option<u64>,
    /// Continental rank.
    pub continent: Option<u64>,
    /// National rank.
    pub country: Option<u64>,
}

impl Ranks {
    fn lookup(info: &FlatRecord, event: &str, kind: &str) -> Self {
        let rank = |scope: &str| info.u64(&format!("personal_records.{event}.{kind}.{scope}"));
        Self {
            world: rank("world_rank"),
            continent: rank("continent_rank"),
            country: rank("country_rank"),
        }
    }
}

/// Single and average ranks of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRanks {
    /// Event code.
    pub event: String,
    pub event_name: String,
    /// Ranks of the best single.
    pub single: Ranks,
    /// Ranks of the best average.
    pub average: Ranks,
}

/// Ranks for every event the person has results in, catalogue order.
///
/// Events without a world rank for either single or average are left out.
pub fn rankings(profile: &Profile) -> Vec<EventRanks> {
    let mut events: Vec<&str> = profile.rows.iter().map(|r| r.event.as_str()).collect();
    sort_events(&mut events);
    events.dedup();

    events
        .into_iter()
        .filter_map(|event| {
            let single = Ranks::lookup(&profile.info, event, "single");
            let average = Ranks::lookup(&profile.info, event, "average");
            if single.world.is_none() && average.world.is_none() {
                return None;
            }
            Some(EventRanks {
                event: event.to_owned(),
                event_name: event_name(event).to_owned(),
                single,
                average,
            })
        })
        .collect()
}
