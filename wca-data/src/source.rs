//! Trait definition for profile data backends.
//!
//! [`crate::WcaClient`] implements [`ProfileSource`] over HTTP; tests and
//! offline tooling can supply their own implementation.

use crate::error::WcaError;
use crate::flatten::FlatRecord;
use crate::types::{Competition, Competitor, PersonResults};

/// Where profile data comes from.
///
/// Every lookup returns `Ok(None)` when the upstream has no record for the
/// requested id. All implementations must be `Send + Sync` so lookups can be
/// fanned out concurrently.
pub trait ProfileSource: Send + Sync {
    /// A person's complete result history.
    ///
    /// # Errors
    ///
    /// Returns [`WcaError`] if the request fails or the document is malformed.
    fn person_results(
        &self,
        wca_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<PersonResults>, WcaError>> + Send;

    /// A person's official profile, flattened into key paths.
    ///
    /// # Errors
    ///
    /// Returns [`WcaError`] if the request fails or the document is malformed.
    fn person_info(
        &self,
        wca_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<FlatRecord>, WcaError>> + Send;

    /// Metadata for one competition.
    ///
    /// # Errors
    ///
    /// Returns [`WcaError`] if the request fails or the document is malformed.
    fn competition(
        &self,
        competition_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Competition>, WcaError>> + Send;

    /// Everyone registered for one competition.
    ///
    /// # Errors
    ///
    /// Returns [`WcaError::RateLimited`] when the upstream throttles us, or
    /// another [`WcaError`] if the request fails.
    fn competitors(
        &self,
        competition_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<Competitor>>, WcaError>> + Send;

    /// How many competition lookups may run at once.
    fn fetch_concurrency(&self) -> usize {
        8
    }
}
