use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use readme_common::text::ELLIPSIS;

use crate::error::UpdateError;

pub const DEFAULT_WRAP_WIDTH: usize = 50;

/// Smallest line budget that still fits one character before a cut marker
pub const MIN_WRAP_WIDTH: usize = ELLIPSIS.len() + 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Markdown document overwritten on every run
    #[serde(default = "default_readme_path")]
    pub readme_path: PathBuf,

    #[serde(default)]
    pub templates: TemplatePaths,

    #[serde(default)]
    pub github: GithubConfig,

    /// Repositories in the order their cards appear in the document
    #[serde(default)]
    pub repos: Vec<RepoEntity>,

    #[serde(default)]
    pub tracks: TrackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatePaths {
    #[serde(default = "default_repo_card_template")]
    pub repo_card: PathBuf,

    #[serde(default = "default_track_card_template")]
    pub track_card: PathBuf,

    #[serde(default = "default_readme_template")]
    pub readme: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base of the link wrapped around each card in the document
    #[serde(default = "default_link_base")]
    pub link_base: String,

    #[serde(default = "default_repo_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_card_width")]
    pub card_width: u32,

    /// Line budget for two-line descriptions
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip repositories instead of querying unauthenticated when no token is set
    #[serde(default)]
    pub require_token: bool,
}

/// One configured repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoEntity {
    /// `owner/name`
    pub full: String,
    /// Display name on the card and alt text in the document
    pub name: String,
    /// Local image path or remote URL
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    #[serde(default = "default_track_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_card_width")]
    pub card_width: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub views: Vec<TrackEntity>,
}

/// One configured top-track view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackEntity {
    /// Name of the view to read a row from
    pub view: String,
    pub filename: String,
    pub label: String,
    /// Document placeholder the card reference is bound to
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// Credentials read once at startup.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub github_token: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_readme_path() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_repo_card_template() -> PathBuf {
    PathBuf::from("data/templates/repo_card_template.svg")
}

fn default_track_card_template() -> PathBuf {
    PathBuf::from("data/templates/track_template.svg")
}

fn default_readme_template() -> PathBuf {
    PathBuf::from("data/templates/readme_template.md")
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_link_base() -> String {
    "https://github.com".to_string()
}

fn default_repo_output_dir() -> String {
    "data/repos".to_string()
}

fn default_track_output_dir() -> String {
    "data/tracks".to_string()
}

fn default_card_width() -> u32 {
    350
}

fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for TemplatePaths {
    fn default() -> Self {
        Self {
            repo_card: default_repo_card_template(),
            track_card: default_track_card_template(),
            readme: default_readme_template(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            link_base: default_link_base(),
            output_dir: default_repo_output_dir(),
            card_width: default_card_width(),
            wrap_width: default_wrap_width(),
            timeout_secs: default_timeout_secs(),
            require_token: false,
        }
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            output_dir: default_track_output_dir(),
            card_width: default_card_width(),
            timeout_secs: default_timeout_secs(),
            views: Vec::new(),
        }
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            readme_path: default_readme_path(),
            templates: TemplatePaths::default(),
            github: GithubConfig::default(),
            repos: Vec::new(),
            tracks: TrackConfig::default(),
        }
    }
}

impl UpdaterConfig {
    pub fn from_file(path: &str) -> Result<Self, UpdateError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| UpdateError::Config(format!("Failed to read config file '{}': {}", path, e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, UpdateError> {
        let config: UpdaterConfig = toml::from_str(content)
            .map_err(|e| UpdateError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject line budgets too small for a cut description, and entity lists
    /// whose derived file names would overwrite each other.
    fn validate(&self) -> Result<(), UpdateError> {
        if self.github.wrap_width < MIN_WRAP_WIDTH {
            return Err(UpdateError::Config(format!(
                "github.wrap_width must be at least {}, got {}",
                MIN_WRAP_WIDTH, self.github.wrap_width
            )));
        }

        // Cards of colliding repositories would overwrite each other on disk
        let mut seen = std::collections::HashMap::new();
        for repo in &self.repos {
            let key = readme_common::safe_key(&repo.full);
            if let Some(earlier) = seen.insert(key.clone(), repo.full.as_str()) {
                return Err(UpdateError::Config(format!(
                    "Repositories '{}' and '{}' both map to card file '{}.svg'; \
                     card file names must be unique, rename or remove one entry",
                    earlier, repo.full, key
                )));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for track in &self.tracks.views {
            if !seen.insert(track.filename.as_str()) {
                return Err(UpdateError::Config(format!(
                    "Track card file '{}' is configured twice",
                    track.filename
                )));
            }
        }
        Ok(())
    }
}
