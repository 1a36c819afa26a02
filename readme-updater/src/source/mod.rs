//! External data sources.
//!
//! A source turns one identifier into one normalized record. Any failure on the
//! way (transport, status, payload, credentials) comes back as [`Unavailable`]
//! and the caller skips the entity.

pub mod github;
pub mod tracks;

use async_trait::async_trait;
use chrono::DateTime;
use thiserror::Error;

pub use github::GithubRepoSource;
pub use tracks::TrackViewSource;

use readme_common::types::UNKNOWN;

/// Why a record could not be produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    #[error("no credentials configured")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("no rows returned")]
    Empty,

    #[error("required field `{0}` missing")]
    MissingField(&'static str),
}

#[async_trait]
pub trait DataSource: Send + Sync {
    type Record: Send;

    /// Single attempt, no retry.
    async fn fetch(&self, identifier: &str) -> Result<Self::Record, Unavailable>;
}

/// Reduce a timestamp to its date, `YYYY-MM-DD`.
///
/// RFC 3339 values are parsed; anything else keeps its first ten characters.
/// Missing or blank values become `"Unknown"`.
pub fn date_only(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return UNKNOWN.to_string(),
    };

    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => raw.chars().take(10).collect(),
    }
}

/// `Some` only for strings with visible content.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
