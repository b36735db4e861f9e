//! Error types for the harvester.
//!
//! Non-success HTTP statuses are not errors here: they are reported through
//! [`crate::http::FetchOutcome`] and the run continues. Everything in
//! `HarvesterError` is fatal for a run.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// HTTP transport failed (connection, timeout, malformed request).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A link could not be turned into an absolute URL.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A CSS selector failed to compile.
    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Detail page has no fact sheet link.
    #[error("No fact sheet link found for {name} on {detail_link}")]
    MissingFactSheet { name: String, detail_link: String },

    /// Document URL has no usable last path segment.
    #[error("Cannot derive a file name from URL: {0}")]
    NoFileName(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
