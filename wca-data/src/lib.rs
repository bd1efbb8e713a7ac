//! # wca-data
//!
//! Typed, cached access to public World Cube Association data.
//!
//! Two upstreams are read, both with plain HTTP GETs and a custom
//! User-Agent:
//!
//! - a community-maintained static export with full result histories and
//!   per-competition metadata
//! - the official REST API with person profiles (ranks, medals, records),
//!   competitor lists and published scrambles
//!
//! ## Design
//!
//! - [`ProfileSource`] is the seam between fetching and analysis
//! - Competition metadata is fanned out with bounded concurrency into a
//!   cache owned by the client
//! - Competitor-list and scramble requests go through a cooperative
//!   [`throttle::Throttle`]
//! - HTTP 404 is "no data" (`Ok(None)`), never an error

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod fanout;
pub mod flatten;
pub mod http;
pub mod source;
pub mod sources;
pub mod throttle;
pub mod types;

pub use client::WcaClient;
pub use config::ClientConfig;
pub use error::{Result, WcaError};
pub use flatten::FlatRecord;
pub use source::ProfileSource;
pub use types::{Competition, Competitor, PersonResults, RoundResult, Scramble, DNF, DNS};

/// Fetch a person's result history with a default client.
///
/// Convenience wrapper for one-off lookups; keep a [`WcaClient`] around to
/// benefit from its caches.
///
/// # Errors
///
/// Returns [`WcaError`] if the client cannot be built or the request fails.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wca_data::Result<()> {
/// if let Some(person) = wca_data::fetch_person_results("2016LOPE37").await? {
///     println!("{} has results from {} competitions", person.name, person.results.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_person_results(wca_id: &str) -> Result<Option<PersonResults>> {
    WcaClient::with_defaults()?.person_results(wca_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_are_usable() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(DNF, -1);
        assert_eq!(DNS, -2);
    }
}
