//! HTTP-backed [`ProfileSource`] with caching and request pacing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::DataCache;
use crate::config::ClientConfig;
use crate::error::WcaError;
use crate::fanout::fetch_competitions;
use crate::flatten::FlatRecord;
use crate::http::build_client;
use crate::source::ProfileSource;
use crate::sources::{CommunityExport, OfficialApi};
use crate::throttle::Throttle;
use crate::types::{Competition, Competitor, PersonResults, Scramble};

/// Client for both WCA data sources.
///
/// Cheap to clone; clones share the HTTP connection pool, the caches and
/// the neighbours throttle.
#[derive(Clone)]
pub struct WcaClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    community: CommunityExport,
    official: OfficialApi,
    cache: DataCache,
    throttle: Arc<Throttle>,
}

impl WcaClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WcaError::Config`] if the configuration is invalid, or
    /// [`WcaError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, WcaError> {
        config.validate()?;
        let http = build_client(&config)?;
        Ok(Self {
            http,
            community: CommunityExport::new(config.community_base_url.clone()),
            official: OfficialApi::new(config.official_base_url.clone()),
            cache: DataCache::new(&config),
            throttle: Arc::new(Throttle::from_config(&config)),
            config: Arc::new(config),
        })
    }

    /// Client with [`ClientConfig::default()`].
    ///
    /// # Errors
    ///
    /// Same as [`WcaClient::new`].
    pub fn with_defaults() -> Result<Self, WcaError> {
        Self::new(ClientConfig::default())
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Metadata for many competitions at once, fetched with bounded
    /// concurrency and served from cache where possible.
    pub async fn competitions(&self, ids: &[String]) -> HashMap<String, Competition> {
        fetch_competitions(self, ids, self.config.max_concurrent_fetches).await
    }

    /// Published scrambles of a competition, `Ok(None)` when the upstream
    /// has none. Requests go through the same throttle as competitor lists
    /// and successful lists are cached.
    ///
    /// # Errors
    ///
    /// Returns [`WcaError::RateLimited`] when the upstream throttles us, or
    /// another [`WcaError`] if the request fails.
    pub async fn competition_scrambles(
        &self,
        competition_id: &str,
    ) -> Result<Option<Vec<Scramble>>, WcaError> {
        if let Some(hit) = self.cache.scrambles(competition_id).await {
            tracing::trace!(competition_id, "scramble list cache hit");
            return Ok(Some(hit));
        }
        self.throttle.wait().await;
        match self.official.scrambles(&self.http, competition_id).await {
            Ok(fetched) => {
                self.throttle.record_success().await;
                if let Some(ref list) = fetched {
                    self.cache.insert_scrambles(competition_id, list.clone()).await;
                }
                Ok(fetched)
            }
            Err(err @ WcaError::RateLimited(_)) => {
                self.throttle.record_rate_limited().await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

impl ProfileSource for WcaClient {
    async fn person_results(&self, wca_id: &str) -> Result<Option<PersonResults>, WcaError> {
        if let Some(hit) = self.cache.person_results(wca_id).await {
            tracing::trace!(wca_id, "person results cache hit");
            return Ok(Some(hit));
        }
        let fetched = self.community.person(&self.http, wca_id).await?;
        if let Some(ref person) = fetched {
            self.cache
                .insert_person_results(wca_id, person.clone())
                .await;
        }
        Ok(fetched)
    }

    async fn person_info(&self, wca_id: &str) -> Result<Option<FlatRecord>, WcaError> {
        if let Some(hit) = self.cache.person_info(wca_id).await {
            tracing::trace!(wca_id, "person info cache hit");
            return Ok(Some(hit));
        }
        let fetched = self.official.person(&self.http, wca_id).await?;
        if let Some(ref info) = fetched {
            self.cache.insert_person_info(wca_id, info.clone()).await;
        }
        Ok(fetched)
    }

    async fn competition(&self, competition_id: &str) -> Result<Option<Competition>, WcaError> {
        if let Some(hit) = self.cache.competition(competition_id).await {
            tracing::trace!(competition_id, "competition cache hit");
            return Ok(Some(hit));
        }
        let fetched = self
            .community
            .competition(&self.http, competition_id)
            .await?;
        if let Some(ref competition) = fetched {
            self.cache.insert_competition(competition.clone()).await;
        }
        Ok(fetched)
    }

    async fn competitors(
        &self,
        competition_id: &str,
    ) -> Result<Option<Vec<Competitor>>, WcaError> {
        self.throttle.wait().await;
        match self.official.competitors(&self.http, competition_id).await {
            Ok(list) => {
                self.throttle.record_success().await;
                Ok(list)
            }
            Err(err @ WcaError::RateLimited(_)) => {
                self.throttle.record_rate_limited().await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn fetch_concurrency(&self) -> usize {
        self.config.max_concurrent_fetches
    }
}
