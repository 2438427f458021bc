//! GitHub REST API helper.
//!
//! Requests use the GitHub v3 media type and, when a token is configured,
//! `Authorization: token <token>`. A failed request falls back to
//! [`hustle_core::mock::github_data`] for the same path.

use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::client::Fetched;
use crate::config::{Config, GithubConfig};
use crate::error::FetchError;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        // GitHub rejects requests without a User-Agent.
        let http = Client::builder()
            .user_agent(concat!("proof-of-hustle/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token().to_string(),
        })
    }

    pub async fn user(&self, username: &str) -> Fetched<Value> {
        self.fetch(&format!("/users/{}", username)).await
    }

    pub async fn repos(&self, username: &str) -> Fetched<Value> {
        self.fetch(&format!("/users/{}/repos", username)).await
    }

    /// GETs `endpoint`, substituting mock data on any failure.
    pub async fn fetch(&self, endpoint: &str) -> Fetched<Value> {
        match self.get_json(endpoint).await {
            Ok(data) => Fetched::Live(data),
            Err(reason) => {
                warn!(endpoint, kind = reason.kind(), error = %reason, "GitHub request failed, using mock data");
                Fetched::Fallback {
                    data: hustle_core::mock::github_data(endpoint),
                    reason,
                }
            }
        }
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, FetchError> {
        let mut req = self
            .http
            .get(format!("{}{}", self.base_url, endpoint))
            .header("Accept", GITHUB_ACCEPT);
        if !self.token.is_empty() {
            req = req.header("Authorization", format!("token {}", self.token));
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// `poh github <username>`: print the user's profile and public repo count.
pub async fn run_github(config: &Config, username: &str) -> Result<()> {
    let client = GithubClient::new(&config.github)?;
    let (user, repos) = tokio::join!(client.user(username), client.repos(username));

    if user.is_fallback() || repos.is_fallback() {
        println!("(GitHub unavailable, showing placeholder data)");
    }

    let user = user.into_inner();
    let login = user["login"].as_str().unwrap_or(username);
    println!("GitHub user: {}", login);
    if let Some(name) = user["name"].as_str() {
        println!("  Name:          {}", name);
    }
    if let Some(count) = user["public_repos"].as_u64() {
        println!("  Public repos:  {}", count);
    }

    let repos = repos.into_inner();
    let names: Vec<&str> = repos
        .as_array()
        .map(|arr| arr.iter().filter_map(|r| r["name"].as_str()).collect())
        .unwrap_or_default();
    if !names.is_empty() {
        println!("  Repositories:  {}", names.join(", "));
    }

    Ok(())
}
