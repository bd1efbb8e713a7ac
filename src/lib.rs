//! MyCubing: competition history and personal-record dashboards for WCA
//! cubers.
//!
//! # Architecture
//!
//! - **Data access** lives in the `wca-data` crate: HTTP fetches from the
//!   community results export and the official API, caching and fan-out
//! - **Rows**: a person's results joined with competition metadata and put
//!   in chronological order ([`rows`])
//! - **PR labelling**: one pass over the rows marking single/average
//!   improvements per event ([`pr`])
//! - **Pages**: summary, personal bests, statistics, progression,
//!   competitions, rankings and neighbours ([`dashboard`])
//! - **Output**: text tables ([`render`]) or JSON via `serde`

pub mod config;
pub mod country;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod pr;
pub mod profile;
pub mod render;
pub mod rows;
pub mod time_format;

pub use config::{AppConfig, DashboardConfig, OutputFormat};
pub use error::{DashboardError, Result};
pub use pr::{PrCounts, PrLabel, count_prs, label_prs};
pub use profile::{Profile, load_profile};
pub use rows::{ResultRow, RoundKind, build_rows};
pub use time_format::{MultiBlind, ResultKind, format_centiseconds, format_result, ranking_key};
