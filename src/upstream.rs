//! Authenticated client for the upstream reputation backend.
//!
//! Every request carries `Authorization: Bearer <key>` and
//! `Content-Type: application/json`. One attempt per call: no retries, no
//! backoff, and no timeout beyond the transport default. Any non-2xx status
//! or non-JSON body is a [`FetchError`].
//!
//! Endpoints are given as path segments, not strings. Each segment is
//! percent-encoded on its own, so a caller-supplied id can never add `/`,
//! `?` or `#` to the upstream path.

use anyhow::{bail, Context, Result};
use reqwest::{Client, Method, Url};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
    key: String,
}

impl UpstreamClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid upstream base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Upstream base URL cannot take a path: {}", config.base_url);
        }

        let http = Client::builder()
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            http,
            base_url,
            key: config.key().to_string(),
        })
    }

    pub async fn get(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Value, FetchError> {
        self.request(Method::GET, segments, query, None).await
    }

    pub async fn post(&self, segments: &[&str], body: &Value) -> Result<Value, FetchError> {
        self.request(Method::POST, segments, &[], Some(body)).await
    }

    pub async fn patch(&self, segments: &[&str], body: &Value) -> Result<Value, FetchError> {
        self.request(Method::PATCH, segments, &[], Some(body)).await
    }

    /// Sends one request and decodes the response body as JSON.
    pub async fn request(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, FetchError> {
        let mut req = self
            .http
            .request(method, self.endpoint_url(segments))
            .header("Authorization", format!("Bearer {}", self.key))
            .header("Content-Type", "application/json");

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Appends `segments` to the base URL path, one encoded segment each.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the path is always writable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UpstreamClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        UpstreamClient::new(&config).unwrap()
    }

    #[test]
    fn test_segments_appended_to_base_path() {
        let up = client("http://backend.local/v1/");
        let url = up.endpoint_url(&["users", "u1", "badges"]);
        assert_eq!(url.as_str(), "http://backend.local/v1/users/u1/badges");
    }

    #[test]
    fn test_segment_separators_are_encoded() {
        let up = client("http://backend.local");
        let url = up.endpoint_url(&["users", "../admin/keys?x=#frag", "badges"]);
        assert_eq!(url.path_segments().unwrap().count(), 3);
        assert!(url.path().starts_with("/users/"));
        assert!(url.path().ends_with("/badges"));
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(UpstreamClient::new(&config).is_err());
    }
}
