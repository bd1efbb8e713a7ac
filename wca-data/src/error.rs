//! Error types for the wca-data crate.
//!
//! All errors carry stable string messages suitable for display to users.
//! A missing resource (HTTP 404) is not an error: fetchers return `Ok(None)`.

/// Errors that can occur while fetching WCA data.
#[derive(Debug, thiserror::Error)]
pub enum WcaError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status other than 404.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The server asked us to slow down (HTTP 429).
    #[error("rate limited by {0}")]
    RateLimited(String),
}

/// Convenience type alias for wca-data results.
pub type Result<T> = std::result::Result<T, WcaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = WcaError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_status() {
        let err = WcaError::Status {
            status: 500,
            url: "https://example.com/persons/X".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected status 500 from https://example.com/persons/X"
        );
    }

    #[test]
    fn display_parse() {
        let err = WcaError::Parse("missing field `results`".into());
        assert_eq!(err.to_string(), "parse error: missing field `results`");
    }

    #[test]
    fn display_config() {
        let err = WcaError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn display_rate_limited() {
        let err = WcaError::RateLimited("www.worldcubeassociation.org".into());
        assert_eq!(
            err.to_string(),
            "rate limited by www.worldcubeassociation.org"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WcaError>();
    }
}
