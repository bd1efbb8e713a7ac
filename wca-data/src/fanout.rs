//! Bounded concurrent fan-out of competition metadata lookups.
//!
//! A person's history references dozens to hundreds of competitions, each
//! needing its own metadata document. Lookups are independent, so they run
//! through [`futures::StreamExt::buffer_unordered`] with a fixed width and
//! results are collected in whatever order they complete.

use std::collections::{HashMap, HashSet};

use futures::StreamExt;

use crate::source::ProfileSource;
use crate::types::Competition;

/// Fetch metadata for every distinct id in `ids`.
///
/// Missing competitions (404) and failed lookups are left out of the map;
/// failures are logged at warn level and never abort the batch.
pub async fn fetch_competitions<S: ProfileSource>(
    source: &S,
    ids: &[String],
    max_concurrent: usize,
) -> HashMap<String, Competition> {
    let mut seen = HashSet::new();
    let unique: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect();

    tracing::debug!(
        count = unique.len(),
        width = max_concurrent.max(1),
        "fetching competition metadata"
    );

    let outcomes: Vec<_> = futures::stream::iter(unique)
        .map(|id| async move { (id, source.competition(id).await) })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut found = HashMap::with_capacity(outcomes.len());
    for (id, outcome) in outcomes {
        match outcome {
            Ok(Some(competition)) => {
                found.insert(id.to_owned(), competition);
            }
            Ok(None) => {
                tracing::debug!(competition = id, "no metadata published");
            }
            Err(err) => {
                tracing::warn!(competition = id, error = %err, "competition lookup failed");
            }
        }
    }
    found
}
