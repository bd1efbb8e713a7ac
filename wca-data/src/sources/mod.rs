//! Data source endpoints.
//!
//! Each module wraps one upstream: the community-maintained static export
//! and the official WCA REST API. Both issue plain GETs through
//! [`crate::http::get_json`].

pub mod community;
pub mod official;

pub use community::CommunityExport;
pub use official::OfficialApi;
