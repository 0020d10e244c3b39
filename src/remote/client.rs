// src/remote/client.rs

//! Blocking HTTP client for owning-service lookups
//!
//! One request per call: no retry, no backoff. The timeout is always set,
//! so a hung service can't hold a request thread forever.

use crate::error::{EntityKind, Error, LookupKey, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to one service's base URL
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: Url,
}

impl ServiceClient {
    /// Create a client for the service at `base_url`
    ///
    /// Must be called outside of an async context; the blocking client runs
    /// its own runtime.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InitError(format!("Invalid service URL '{base_url}': {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::InitError(format!(
                "Service URL must be an http(s) base address, got '{base_url}'"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InitError(format!("Cannot extend URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a single entity
    ///
    /// Any 4xx answer means the entity doesn't exist. Connection failures,
    /// timeouts, other statuses and undecodable bodies are all transient
    /// failures; callers don't distinguish between them.
    pub fn fetch<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        kind: EntityKind,
        key: LookupKey,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!("Fetching {} ({}) from {}", kind, key, url);

        let response = self.client.get(url.clone()).send().map_err(|e| {
            let cause = if e.is_timeout() { "timed out" } else { "failed" };
            warn!("GET {} {}: {}", url, cause, e);
            Error::TransientFailure(format!("GET {url} {cause}: {e}"))
        })?;

        let status = response.status();
        if status.is_client_error() {
            debug!("{} ({}) not found: HTTP {}", kind, key, status);
            return Err(Error::NotFound { kind, key });
        }
        if !status.is_success() {
            warn!("HTTP {} from {}", status, url);
            return Err(Error::TransientFailure(format!("HTTP {status} from {url}")));
        }

        response.json::<T>().map_err(|e| {
            warn!("Malformed {} response from {}: {}", kind, url, e);
            Error::TransientFailure(format!("Malformed {kind} response from {url}: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_urls() {
        assert!(ServiceClient::new("not a url", DEFAULT_TIMEOUT).is_err());
        assert!(ServiceClient::new("ftp://users:21", DEFAULT_TIMEOUT).is_err());
        assert!(ServiceClient::new("mailto:chef@example.com", DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = ServiceClient::new("http://users:8081", DEFAULT_TIMEOUT).unwrap();
        let url = client.endpoint(&["api", "user", "u1"]).unwrap();
        assert_eq!(url.as_str(), "http://users:8081/api/user/u1");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ServiceClient::new("http://gateway/users/", DEFAULT_TIMEOUT).unwrap();
        let url = client.endpoint(&["api", "user", "u1"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway/users/api/user/u1");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ServiceClient::new("http://users:8081", DEFAULT_TIMEOUT).unwrap();
        let url = client
            .endpoint(&["api", "user", "email", "chef+test@example.com"])
            .unwrap();
        assert_eq!(url.path(), "/api/user/email/chef+test@example.com");

        let url = client.endpoint(&["api", "ingredient", "a/b c"]).unwrap();
        assert_eq!(url.path(), "/api/ingredient/a%2Fb%20c");
    }
}
