//! In-memory caches for fetched documents.
//!
//! Competition metadata and published scrambles are keyed by competition id
//! and live for the life of the client; person documents are keyed by normalised WCA id and expire
//! after the configured TTL. Uses [`moka`] for async-friendly caching with
//! automatic eviction.

use std::time::Duration;

use moka::future::Cache;

use crate::config::ClientConfig;
use crate::flatten::FlatRecord;
use crate::types::{Competition, PersonResults, Scramble};

/// Maximum number of cached person documents of each kind.
const MAX_PERSON_ENTRIES: u64 = 64;

/// Maximum number of cached scramble lists.
const MAX_SCRAMBLE_ENTRIES: u64 = 32;

/// Caches shared by every clone of a [`crate::WcaClient`].
#[derive(Clone)]
pub struct DataCache {
    competitions: Cache<String, Competition>,
    person_results: Cache<String, PersonResults>,
    person_info: Cache<String, FlatRecord>,
    scrambles: Cache<String, Vec<Scramble>>,
}

impl DataCache {
    /// Build caches sized from `config`.
    ///
    /// A `cache_ttl_seconds` of 0 disables person-document caching.
    pub fn new(config: &ClientConfig) -> Self {
        let person_capacity = if config.cache_ttl_seconds == 0 {
            0
        } else {
            MAX_PERSON_ENTRIES
        };
        let ttl = Duration::from_secs(config.cache_ttl_seconds.max(1));
        Self {
            competitions: Cache::builder()
                .max_capacity(config.cache_capacity)
                .build(),
            person_results: Cache::builder()
                .max_capacity(person_capacity)
                .time_to_live(ttl)
                .build(),
            person_info: Cache::builder()
                .max_capacity(person_capacity)
                .time_to_live(ttl)
                .build(),
            scrambles: Cache::builder()
                .max_capacity(MAX_SCRAMBLE_ENTRIES)
                .build(),
        }
    }

    /// Cached competition metadata.
    pub async fn competition(&self, id: &str) -> Option<Competition> {
        self.competitions.get(id.trim()).await
    }

    /// Store competition metadata. Re-inserting an id overwrites it.
    pub async fn insert_competition(&self, competition: Competition) {
        let key = competition.id.trim().to_owned();
        self.competitions.insert(key, competition).await;
    }

    /// Whether metadata for `id` is already cached.
    pub fn has_competition(&self, id: &str) -> bool {
        self.competitions.contains_key(id.trim())
    }

    /// Cached result history for a person.
    pub async fn person_results(&self, wca_id: &str) -> Option<PersonResults> {
        self.person_results.get(&normalise_wca_id(wca_id)).await
    }

    /// Store a person's result history.
    pub async fn insert_person_results(&self, wca_id: &str, results: PersonResults) {
        self.person_results
            .insert(normalise_wca_id(wca_id), results)
            .await;
    }

    /// Cached official info record for a person.
    pub async fn person_info(&self, wca_id: &str) -> Option<FlatRecord> {
        self.person_info.get(&normalise_wca_id(wca_id)).await
    }

    /// Store a person's official info record.
    pub async fn insert_person_info(&self, wca_id: &str, info: FlatRecord) {
        self.person_info.insert(normalise_wca_id(wca_id), info).await;
    }

    /// Cached scramble list for a competition.
    pub async fn scrambles(&self, competition_id: &str) -> Option<Vec<Scramble>> {
        self.scrambles.get(competition_id.trim()).await
    }

    /// Store a competition's scramble list.
    pub async fn insert_scrambles(&self, competition_id: &str, scrambles: Vec<Scramble>) {
        self.scrambles
            .insert(competition_id.trim().to_owned(), scrambles)
            .await;
    }
}

/// WCA ids are case-insensitive in practice; store them upper-cased.
pub fn normalise_wca_id(wca_id: &str) -> String {
    wca_id.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competition(id: &str, name: &str) -> Competition {
        Competition {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn wca_id_normalisation() {
        assert_eq!(normalise_wca_id(" 2016lope37 "), "2016LOPE37");
        assert_eq!(normalise_wca_id("2016LOPE37"), "2016LOPE37");
    }

    #[tokio::test]
    async fn competition_miss_returns_none() {
        let cache = DataCache::new(&ClientConfig::default());
        assert!(cache.competition("Nowhere2020").await.is_none());
        assert!(!cache.has_competition("Nowhere2020"));
    }

    #[tokio::test]
    async fn competition_insert_and_retrieve() {
        let cache = DataCache::new(&ClientConfig::default());
        cache
            .insert_competition(competition("MadridOpen2019", "Madrid Open 2019"))
            .await;
        let cached = cache.competition("MadridOpen2019").await.expect("cached");
        assert_eq!(cached.name, "Madrid Open 2019");
        assert!(cache.has_competition("MadridOpen2019"));
    }

    #[tokio::test]
    async fn overwrite_same_competition_updates_value() {
        let cache = DataCache::new(&ClientConfig::default());
        cache.insert_competition(competition("A2020", "Old")).await;
        cache.insert_competition(competition("A2020", "New")).await;
        let cached = cache.competition("A2020").await.expect("cached");
        assert_eq!(cached.name, "New");
    }

    #[tokio::test]
    async fn person_lookups_ignore_case() {
        let cache = DataCache::new(&ClientConfig::default());
        let person = PersonResults {
            id: "2016LOPE37".into(),
            name: "Test".into(),
            ..Default::default()
        };
        cache.insert_person_results("2016lope37", person).await;
        let cached = cache.person_results("2016LOPE37").await.expect("cached");
        assert_eq!(cached.name, "Test");
    }

    #[tokio::test]
    async fn person_info_cached_independently() {
        let cache = DataCache::new(&ClientConfig::default());
        let info = FlatRecord::from_value(&serde_json::json!({"person": {"name": "Test"}}));
        cache.insert_person_info("2016LOPE37", info).await;
        assert!(cache.person_info("2016LOPE37").await.is_some());
        assert!(cache.person_results("2016LOPE37").await.is_none());
    }

    #[tokio::test]
    async fn scrambles_keyed_by_competition() {
        let cache = DataCache::new(&ClientConfig::default());
        let list = vec![Scramble {
            event_id: "333".into(),
            scramble: "R U".into(),
            ..Default::default()
        }];
        cache.insert_scrambles("Open2024 ", list).await;
        let cached = cache.scrambles("Open2024").await.expect("cached");
        assert_eq!(cached[0].scramble, "R U");
        assert!(cache.scrambles("Other2024").await.is_none());
    }
}
