//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the verifier:
//! - Building the HTTP client with a descriptive user agent
//! - Single GET requests for pages and artifacts (no retries)
//!
//! Automatic decompression is left off so that the `content-length` header and
//! the body bytes describe the artifact exactly as published.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::ReleaseCheckError;
use reqwest::header::{HeaderMap, CONTENT_LENGTH};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// Final URL after redirects
    pub url: String,

    /// HTTP status code
    pub status: StatusCode,

    /// Response headers
    pub headers: HeaderMap,

    /// Raw body bytes
    pub body: Vec<u8>,
}

impl FetchedResource {
    /// Returns the declared `content-length`, if present and numeric
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `agent` - The user agent configuration
/// * `http` - Client tuning (optional request timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use release_check::config::{HttpConfig, UserAgentConfig};
/// use release_check::verifier::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    // Format: Name/Version (+ContactURL)
    let user_agent = format!("{}/{} (+{})", agent.name, agent.version, agent.contact_url);

    let mut builder = Client::builder().user_agent(user_agent);

    if let Some(secs) = http.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a URL and reads the whole body
///
/// A non-success status is returned as-is for the caller to assert on; only
/// transport failures (connection, TLS, body read) are errors.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch(client: &Client, url: &str) -> Result<FetchedResource, ReleaseCheckError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ReleaseCheckError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let final_url = response.url().to_string();
    let headers = response.headers().clone();

    let body = response
        .bytes()
        .await
        .map_err(|source| ReleaseCheckError::Http {
            url: url.to_string(),
            source,
        })?
        .to_vec();

    tracing::debug!("{} -> {} ({} bytes)", url, status.as_u16(), body.len());

    Ok(FetchedResource {
        url: final_url,
        status,
        headers,
        body,
    })
}
