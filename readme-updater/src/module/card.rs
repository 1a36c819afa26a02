//! SVG card building
//!
//! Fills a card template with one record and writes the result under the
//! card output directory.

use base64::{engine::general_purpose, Engine as _};
use std::path::{Path, PathBuf};

use readme_common::template::{has_placeholder, render, Bindings};
use readme_common::types::{language_color, safe_key, RenderedCard, RepoRecord, TrackRecord};
use readme_common::wrap_text;

use crate::config::{GithubConfig, RepoEntity, TrackConfig, TrackEntity, DEFAULT_WRAP_WIDTH};
use crate::error::{Result, UpdateError};

pub struct CardBuilder {
    template: String,
    /// Relative to the run root; also used for `src` in the document
    output_dir: String,
    card_width: u32,
    wrap_width: usize,
}

impl CardBuilder {
    pub fn new(template: impl Into<String>, output_dir: impl Into<String>, card_width: u32) -> Self {
        Self {
            template: template.into(),
            output_dir: output_dir.into(),
            card_width,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }

    pub fn for_repos(template: impl Into<String>, config: &GithubConfig) -> Self {
        Self::new(template, config.output_dir.clone(), config.card_width)
            .with_wrap_width(config.wrap_width)
    }

    pub fn for_tracks(template: impl Into<String>, config: &TrackConfig) -> Self {
        Self::new(template, config.output_dir.clone(), config.card_width)
    }

    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    /// Card file name for a repository, derived from `owner/name`.
    pub fn repo_filename(entity: &RepoEntity) -> String {
        format!("{}.svg", safe_key(&entity.full))
    }

    pub async fn build_repo(&self, entity: &RepoEntity, record: &RepoRecord, root: &Path) -> RenderedCard {
        let icon_url = match &entity.icon {
            Some(icon) => resolve_icon(icon, root).await,
            None => String::new(),
        };

        let mut bindings = Bindings::new()
            .with("icon_url", escape_xml(&icon_url))
            .with("repo_name", escape_xml(&entity.name))
            .with("name", escape_xml(&record.name))
            .with("last_update", escape_xml(&record.updated_at))
            .with("language", escape_xml(&record.language))
            .with("language_color", language_color(&record.language))
            .with("stars", record.stars)
            .with("forks", record.forks);

        if has_placeholder(&self.template, "description_line_1") {
            let (line1, line2) = wrap_text(&record.description, self.wrap_width);
            bindings.insert("description_line_1", escape_xml(&line1));
            bindings.insert("description_line_2", escape_xml(&line2));
        } else {
            bindings.insert("repo_description", escape_xml(&record.description));
        }

        RenderedCard::new(Self::repo_filename(entity), render(&self.template, &bindings))
    }

    pub fn build_track(&self, entity: &TrackEntity, record: &TrackRecord) -> RenderedCard {
        let bindings = Bindings::new()
            .with("track_name", escape_xml(&record.track_name))
            .with("artist_name", escape_xml(&record.artist_name))
            .with("play_count", record.play_count)
            .with("label", escape_xml(&entity.label));

        RenderedCard::new(entity.filename.clone(), render(&self.template, &bindings))
    }

    /// Write `card` under `root`, replacing any previous file.
    pub async fn write(&self, card: &RenderedCard, root: &Path) -> Result<PathBuf> {
        let dir = root.join(&self.output_dir);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| UpdateError::WriteFailure { path: dir.clone(), source })?;

        let path = dir.join(&card.filename);
        tokio::fs::write(&path, &card.markup)
            .await
            .map_err(|source| UpdateError::WriteFailure { path: path.clone(), source })?;

        Ok(path)
    }

    /// Relative image source of a card as seen from the document.
    pub fn image_src(&self, filename: &str) -> String {
        format!("./{}/{}", self.output_dir.trim_end_matches('/'), filename)
    }

    /// `<a><img/></a>` tag linking a repository card to the repository.
    pub fn repo_reference(&self, link_base: &str, entity: &RepoEntity, filename: &str) -> String {
        format!(
            r#"<a href="{}/{}"><img src="{}" alt="{}" width="{}" /></a>"#,
            link_base.trim_end_matches('/'),
            escape_xml(&entity.full),
            self.image_src(filename),
            escape_xml(&entity.name),
            self.card_width
        )
    }

    pub fn track_reference(&self, entity: &TrackEntity) -> String {
        format!(
            r#"<img src="{}" alt="{}" width="{}" />"#,
            self.image_src(&entity.filename),
            escape_xml(&entity.label),
            self.card_width
        )
    }
}

/// Resolve an icon reference for embedding.
///
/// An existing local file becomes a base64 `data:` URI. Remote URLs and paths
/// that do not exist are returned unchanged.
pub async fn resolve_icon(reference: &str, root: &Path) -> String {
    if reference.starts_with("http") {
        return reference.to_string();
    }

    let path = root.join(reference);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return reference.to_string(),
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => format!(
            "data:{};base64,{}",
            icon_mime_type(&path),
            general_purpose::STANDARD.encode(bytes)
        ),
        Err(e) => {
            tracing::warn!("Failed to read icon {:?}: {}", path, e);
            reference.to_string()
        }
    }
}

fn icon_mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
