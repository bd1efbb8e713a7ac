//! Loading a person's complete profile from a [`ProfileSource`].

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use wca_data::fanout::fetch_competitions;
use wca_data::{Competition, FlatRecord, ProfileSource};

use crate::pr::label_prs;
use crate::rows::{ResultRow, build_rows};

/// Everything the dashboard pages need about one person.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Profile {
    /// WCA id as requested.
    pub wca_id: String,
    /// Name from the results export.
    pub name: String,
    /// Country from the results export.
    pub country: String,
    /// Number of competitions according to the results export.
    pub number_of_competitions: u32,
    /// Rows in chronological order with PR labels filled in.
    pub rows: Vec<ResultRow>,
    /// Official profile; empty when it could not be fetched.
    #[serde(skip)]
    pub info: FlatRecord,
    /// Metadata for every competition that could be fetched.
    #[serde(skip)]
    pub competitions: HashMap<String, Competition>,
}

impl Profile {
    /// Name from the official profile, then the export, then the id.
    pub fn display_name(&self) -> &str {
        self.info
            .str("person.name")
            .filter(|n| !n.is_empty())
            .or_else(|| Some(self.name.as_str()).filter(|n| !n.is_empty()))
            .unwrap_or(&self.wca_id)
    }

    /// ISO 3166-1 alpha-2 country, or `N/A`.
    pub fn country_iso2(&self) -> &str {
        self.info
            .str("person.country.iso2")
            .or_else(|| self.info.str("person.country_iso2"))
            .or_else(|| Some(self.country.as_str()).filter(|c| !c.is_empty()))
            .unwrap_or("N/A")
    }

    /// Distinct competition ids in chronological order.
    pub fn competition_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.competition_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Rows newest first, the order result tables are shown in.
    pub fn rows_newest_first(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().rev()
    }
}

/// Fetch results, competition metadata and the official profile for
/// `wca_id`, then build PR-labelled rows.
///
/// Returns `None` when the person is unknown, has no results, or the
/// results document could not be fetched. A missing official profile
/// degrades to an empty [`FlatRecord`].
pub async fn load_profile<S: ProfileSource>(source: &S, wca_id: &str) -> Option<Profile> {
    let person = match source.person_results(wca_id).await {
        Ok(Some(person)) if !person.is_empty() => person,
        Ok(_) => {
            tracing::info!(wca_id, "no results published");
            return None;
        }
        Err(err) => {
            tracing::warn!(wca_id, error = %err, "results lookup failed");
            return None;
        }
    };

    let ids: Vec<String> = person.results.keys().cloned().collect();
    let competitions = fetch_competitions(source, &ids, source.fetch_concurrency()).await;
    tracing::debug!(
        wca_id,
        referenced = ids.len(),
        resolved = competitions.len(),
        "competition metadata fetched"
    );

    let mut rows = build_rows(&person, &competitions);
    label_prs(&mut rows);

    let info = match source.person_info(wca_id).await {
        Ok(Some(info)) => info,
        Ok(None) => {
            tracing::debug!(wca_id, "no official profile");
            FlatRecord::default()
        }
        Err(err) => {
            tracing::warn!(wca_id, error = %err, "official profile lookup failed");
            FlatRecord::default()
        }
    };

    Some(Profile {
        wca_id: wca_id.to_owned(),
        name: person.name,
        country: person.country,
        number_of_competitions: person.number_of_competitions,
        rows,
        info,
        competitions,
    })
}
