//! Error types for the mycubing dashboard.

use wca_data::WcaError;

/// Top-level error type for profile loading and dashboard pages.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Fetching or decoding WCA data failed.
    #[error("data error: {0}")]
    Data(#[from] WcaError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The person exists but has no results, or does not exist at all.
    #[error("no results found for {0}")]
    NoResults(String),

    /// Event code not present in the person's results.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// A period or year selection that cannot be applied.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DashboardError>;
