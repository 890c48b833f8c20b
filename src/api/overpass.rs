use std::time::Duration;

use crate::config::OverpassConfig;
use crate::error::{FetchError, Result};

/// Thin blocking client for an Overpass `interpreter` endpoint
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl OverpassClient {
    pub fn new(config: &OverpassConfig) -> Result<Self> {
        // None disables reqwest's 30s blocking default
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run one Overpass QL query and return the response body untouched
    ///
    /// Single attempt. A non-2xx status is an error and the body is discarded.
    pub fn interpret(&self, query: &str) -> Result<Vec<u8>> {
        tracing::debug!(url = %self.url, query_len = query.len(), "POST overpass query");

        // Overpass expects a form-encoded body: data=<query>
        let response = self
            .http
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().map_err(FetchError::Body)?;
        tracing::debug!(%status, bytes = body.len(), "overpass response received");

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_configured_url() {
        let config = OverpassConfig {
            url: "http://127.0.0.1:9/api/interpreter".to_string(),
            ..OverpassConfig::default()
        };
        let client = OverpassClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:9/api/interpreter");
    }

    #[test]
    fn test_connection_failure_is_request_error() {
        // Port 9 (discard) is closed on any sane test host
        let config = OverpassConfig {
            url: "http://127.0.0.1:9/api/interpreter".to_string(),
            timeout_secs: Some(5),
            ..OverpassConfig::default()
        };
        let client = OverpassClient::new(&config).unwrap();

        let err = client.interpret("[timeout:1];").unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
