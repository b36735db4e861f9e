//! HTTP client wrapper for fetching catalog pages and fact sheets.
//!
//! A non-success status never fails a fetch. It is logged, tagged on the
//! returned [`Fetched`] and the body stays available to the caller.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use crate::error::Result;

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("herb-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout` - Per-request timeout
///
/// # Returns
/// A `reqwest::blocking::Client` configured with the timeout and user agent.
pub fn create_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Whether a fetch came back with a success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchOutcome {
    Success,
    /// The server answered, but not with 2xx. The body may be an error page.
    HttpStatus(StatusCode),
}

impl FetchOutcome {
    fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            Self::Success
        } else {
            Self::HttpStatus(status)
        }
    }
}

/// A received response tagged with its outcome.
#[derive(Debug)]
pub struct Fetched {
    response: Response,
    outcome: FetchOutcome,
}

impl Fetched {
    pub fn url(&self) -> &str {
        self.response.url().as_str()
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Content length announced by the server, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Human readable description of a failed status, `None` on success.
    pub fn problem(&self) -> Option<String> {
        match self.outcome {
            FetchOutcome::Success => None,
            FetchOutcome::HttpStatus(status) => Some(format!("{status} for url ({})", self.url())),
        }
    }

    /// Consume the response and decode the body as text.
    pub fn text(self) -> Result<String> {
        Ok(self.response.text()?)
    }

    /// Consume the response into a reader over the raw body.
    pub fn into_reader(self) -> impl Read {
        self.response
    }
}

/// Issue a GET request for `url`.
///
/// Transport failures (DNS, refused connection, timeout) are returned as
/// errors. Any response the server sends is returned, whatever its status.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to fetch
pub fn fetch(client: &Client, url: &str) -> Result<Fetched> {
    tracing::debug!(url, "GET");
    let response = client.get(url).send()?;
    let outcome = FetchOutcome::from_status(response.status());

    let fetched = Fetched { response, outcome };
    if let Some(problem) = fetched.problem() {
        tracing::debug!(url, status = %fetched.status(), "There was a problem: {problem}");
    }
    Ok(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client(Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(FetchOutcome::from_status(StatusCode::OK), FetchOutcome::Success);
        assert_eq!(
            FetchOutcome::from_status(StatusCode::NOT_FOUND),
            FetchOutcome::HttpStatus(StatusCode::NOT_FOUND)
        );
        assert_eq!(
            FetchOutcome::from_status(StatusCode::SERVICE_UNAVAILABLE),
            FetchOutcome::HttpStatus(StatusCode::SERVICE_UNAVAILABLE)
        );
    }

    #[test]
    fn test_fetch_invalid_url_is_fatal() {
        let client = create_client(Duration::from_secs(1)).unwrap();
        assert!(fetch(&client, "not a url").is_err());
    }
}
