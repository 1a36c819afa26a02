//! Repository metadata from the GitHub REST API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

use readme_common::types::{RepoRecord, DEFAULT_DESCRIPTION, UNKNOWN};

use super::{date_only, non_blank, DataSource, Unavailable};
use crate::config::GithubConfig;

const USER_AGENT: &str = concat!("readme-updater/", env!("CARGO_PKG_VERSION"));

/// Raw `GET /repos/{owner}/{name}` payload, only the fields cards use
#[derive(Debug, Deserialize)]
struct RawRepo {
    name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    updated_at: Option<String>,
}

pub struct GithubRepoSource {
    client: Client,
    api_base: String,
    token: Option<String>,
    require_token: bool,
}

impl GithubRepoSource {
    pub fn new(config: &GithubConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, config, token))
    }

    pub fn with_client(client: Client, config: &GithubConfig, token: Option<String>) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: non_blank(token),
            require_token: config.require_token,
        }
    }
}

#[async_trait]
impl DataSource for GithubRepoSource {
    type Record = RepoRecord;

    async fn fetch(&self, identifier: &str) -> Result<RepoRecord, Unavailable> {
        if self.token.is_none() && self.require_token {
            tracing::warn!("⚠️ GITHUB_TOKEN not found. Skipping {}", identifier);
            return Err(Unavailable::MissingCredentials);
        }

        let url = format!("{}/repos/{}", self.api_base, identifier);
        tracing::debug!("Fetching repository metadata from {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Unavailable::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Unavailable::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Unavailable::Transport(e.to_string()))?;

        normalize_repo(&body)
    }
}

/// Normalize a repository payload, applying display defaults.
pub fn normalize_repo(body: &str) -> Result<RepoRecord, Unavailable> {
    let raw: RawRepo =
        serde_json::from_str(body).map_err(|e| Unavailable::Malformed(e.to_string()))?;

    let name = non_blank(raw.name).ok_or(Unavailable::MissingField("name"))?;

    Ok(RepoRecord {
        name,
        description: non_blank(raw.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        language: non_blank(raw.language).unwrap_or_else(|| UNKNOWN.to_string()),
        stars: raw.stargazers_count.unwrap_or(0),
        forks: raw.forks_count.unwrap_or(0),
        updated_at: date_only(raw.updated_at.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_payload() {
        let body = r#"{
            "id": 1,
            "name": "widget",
            "full_name": "acme/widget",
            "description": "Makes widgets",
            "language": "Python",
            "stargazers_count": 12,
            "forks_count": 3,
            "updated_at": "2025-06-01T12:34:56Z"
        }"#;
        let record = normalize_repo(body).unwrap();
        assert_eq!(record.name, "widget");
        assert_eq!(record.description, "Makes widgets");
        assert_eq!(record.language, "Python");
        assert_eq!(record.stars, 12);
        assert_eq!(record.forks, 3);
        assert_eq!(record.updated_at, "2025-06-01");
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let body = r#"{"name": "widget", "description": null, "language": null}"#;
        let record = normalize_repo(body).unwrap();
        assert_eq!(record, RepoRecord::named("widget"));
    }

    #[test]
    fn test_empty_description_uses_default() {
        let record = normalize_repo(r#"{"name": "widget", "description": ""}"#).unwrap();
        assert_eq!(record.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_missing_name_is_unavailable() {
        assert_eq!(
            normalize_repo(r#"{"description": "orphan"}"#),
            Err(Unavailable::MissingField("name"))
        );
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(normalize_repo("<html>"), Err(Unavailable::Malformed(_))));
        assert!(matches!(normalize_repo("[]"), Err(Unavailable::Malformed(_))));
    }

    #[tokio::test]
    async fn test_require_token_skips_without_request() {
        let config = GithubConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            require_token: true,
            ..GithubConfig::default()
        };
        let source = GithubRepoSource::new(&config, Some("  ".to_string())).unwrap();
        assert_eq!(
            source.fetch("acme/widget").await,
            Err(Unavailable::MissingCredentials)
        );
    }
}
