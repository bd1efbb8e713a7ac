//! Round and PR counts per event.

use std::collections::HashMap;

use serde::Serialize;

use crate::events::EVENTS;
use crate::pr::count_prs;
use crate::rows::ResultRow;

/// A per-event tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCount {
    /// Event code.
    pub event: String,
    pub event_name: String,
    /// Rounds or PRs, depending on the table.
    pub count: u32,
}

/// The statistics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Rounds competed per catalogue event.
    pub rounds_per_event: Vec<EventCount>,
    /// PRs per catalogue event; `sin+avg` counts twice.
    pub prs_per_event: Vec<EventCount>,
    /// PRs across every event, catalogue or not.
    pub pr_total: u32,
}

/// Rounds and PRs per catalogue event, in catalogue order.
pub fn statistics(rows: &[ResultRow]) -> Statistics {
    let mut rounds: HashMap<&str, u32> = HashMap::new();
    for row in rows {
        *rounds.entry(row.event.as_str()).or_insert(0) += 1;
    }
    let prs = count_prs(rows);

    Statistics {
        rounds_per_event: tally(|e| rounds.get(e).copied()),
        prs_per_event: tally(|e| prs.per_event.get(e).copied()),
        pr_total: prs.total,
    }
}

fn tally(lookup: impl Fn(&str) -> Option<u32>) -> Vec<EventCount> {
    EVENTS
        .iter()
        .filter_map(|&(code, name)| {
            lookup(code).filter(|n| *n > 0).map(|count| EventCount {
                event: code.to_owned(),
                event_name: name.to_owned(),
                count,
            })
        })
        .collect()
}
