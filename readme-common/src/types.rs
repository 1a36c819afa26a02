use serde::{Deserialize, Serialize};

pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_LANGUAGE_COLOR: &str = "#CCCCCC";

/// Normalized repository metadata, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Repository name as reported by the source
    pub name: String,
    /// Falls back to [`DEFAULT_DESCRIPTION`]
    pub description: String,
    /// Primary language, falls back to [`UNKNOWN`]
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    /// Date of the last update as `YYYY-MM-DD`, or [`UNKNOWN`]
    pub updated_at: String,
}

impl RepoRecord {
    /// A record carrying only a name, every other field at its default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            language: UNKNOWN.to_string(),
            stars: 0,
            forks: 0,
            updated_at: UNKNOWN.to_string(),
        }
    }
}

/// One top-track row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_name: String,
    /// Empty when the row has no artist
    pub artist_name: String,
    pub play_count: u64,
}

/// Card markup plus the file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub filename: String,
    pub markup: String,
}

impl RenderedCard {
    pub fn new(filename: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            markup: markup.into(),
        }
    }
}

/// Filesystem-safe key for an entity identifier.
///
/// Every character that is not an ASCII letter, digit or `_` becomes `_`,
/// e.g. `k4nkan/save-spotify-logs` → `k4nkan_save_spotify_logs`.
pub fn safe_key(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Accent color for a repository language.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "Python" => "#3572A5",
        "JavaScript" => "#F1E05A",
        "TypeScript" => "#2B7489",
        "HTML" => "#E34C26",
        "CSS" => "#563D7C",
        "Vue" => "#41B883",
        "Jupyter Notebook" => "#DA5B0B",
        "Shell" => "#89E051",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_key() {
        assert_eq!(safe_key("acme/widget"), "acme_widget");
        assert_eq!(safe_key("k4nkan/k4nkan.github.io"), "k4nkan_k4nkan_github_io");
        assert_eq!(safe_key("k4nkan/save-spotify-logs"), "k4nkan_save_spotify_logs");
        assert_eq!(safe_key("already_safe"), "already_safe");
    }

    #[test]
    fn test_safe_key_is_stable() {
        assert_eq!(safe_key("a/b.c-d"), safe_key("a/b.c-d"));
    }

    #[test]
    fn test_language_color() {
        assert_eq!(language_color("Python"), "#3572A5");
        assert_eq!(language_color("Jupyter Notebook"), "#DA5B0B");
        assert_eq!(language_color("Rust"), DEFAULT_LANGUAGE_COLOR);
        assert_eq!(language_color(UNKNOWN), DEFAULT_LANGUAGE_COLOR);
        assert_eq!(language_color(""), DEFAULT_LANGUAGE_COLOR);
    }

    #[test]
    fn test_named_record_defaults() {
        let record = RepoRecord::named("widget");
        assert_eq!(record.description, DEFAULT_DESCRIPTION);
        assert_eq!(record.language, UNKNOWN);
        assert_eq!(record.stars, 0);
        assert_eq!(record.updated_at, UNKNOWN);
    }
}
