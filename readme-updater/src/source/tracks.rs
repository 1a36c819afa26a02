//! Top-track rows read from a row-store view over its REST interface

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use readme_common::types::TrackRecord;

use super::{non_blank, DataSource, Unavailable};
use crate::config::{Credentials, TrackConfig};

#[derive(Debug, Deserialize)]
struct RawTrackRow {
    track_name: Option<String>,
    artist_name: Option<String>,
    play_count: Option<u64>,
}

pub struct TrackViewSource {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl TrackViewSource {
    pub fn new(config: &TrackConfig, credentials: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, credentials))
    }

    pub fn with_client(client: Client, credentials: &Credentials) -> Self {
        Self {
            client,
            base_url: non_blank(credentials.supabase_url.clone())
                .map(|url| url.trim_end_matches('/').to_string()),
            api_key: non_blank(credentials.supabase_key.clone()),
        }
    }
}

#[async_trait]
impl DataSource for TrackViewSource {
    type Record = TrackRecord;

    /// Reads the first row of the view named `identifier`.
    async fn fetch(&self, identifier: &str) -> Result<TrackRecord, Unavailable> {
        let (Some(base_url), Some(api_key)) = (&self.base_url, &self.api_key) else {
            tracing::warn!("⚠️ SUPABASE_URL or SUPABASE_KEY not set. Skipping {}", identifier);
            return Err(Unavailable::MissingCredentials);
        };

        let url = format!("{}/rest/v1/{}?select=*&limit=1", base_url, identifier);
        tracing::debug!("Fetching top track row from {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", api_key.as_str())
            .bearer_auth(api_key)
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

        normalize_track(&body)
    }
}

/// Normalize a view response (a JSON array of rows) into its first row.
pub fn normalize_track(body: &str) -> Result<TrackRecord, Unavailable> {
    let rows: Vec<RawTrackRow> =
        serde_json::from_str(body).map_err(|e| Unavailable::Malformed(e.to_string()))?;

    let row = rows.into_iter().next().ok_or(Unavailable::Empty)?;
    let track_name = non_blank(row.track_name).ok_or(Unavailable::MissingField("track_name"))?;

    Ok(TrackRecord {
        track_name,
        artist_name: row.artist_name.unwrap_or_default(),
        play_count: row.play_count.unwrap_or(0),
    })
}
