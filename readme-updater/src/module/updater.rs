//! One README update run
//!
//! Loads every template first, then fetches and renders each configured entity
//! in order. Entities whose data is unavailable, or whose card cannot be
//! written, are left out of the document; the run goes on. A missing template
//! or an unwritable document ends the run.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use readme_common::template::Bindings;
use readme_common::types::{RepoRecord, TrackRecord};

use super::card::CardBuilder;
use super::readme::DocumentAssembler;
use crate::config::UpdaterConfig;
use crate::error::{Result, UpdateError};
use crate::source::{DataSource, Unavailable};

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Card files written, in document order
    pub rendered: Vec<PathBuf>,
    /// Entities left out because their data was unavailable
    pub skipped: Vec<(String, Unavailable)>,
    /// Entities whose card could not be written
    pub failed: Vec<String>,
    pub document: PathBuf,
}

struct Templates {
    repo_card: Option<String>,
    track_card: Option<String>,
    readme: String,
}

impl Templates {
    /// Only the card templates some configured entity needs are required.
    async fn load(config: &UpdaterConfig, root: &Path) -> Result<Self> {
        let repo_card = if config.repos.is_empty() {
            None
        } else {
            Some(load_template(&root.join(&config.templates.repo_card)).await?)
        };
        let track_card = if config.tracks.views.is_empty() {
            None
        } else {
            Some(load_template(&root.join(&config.templates.track_card)).await?)
        };
        let readme = load_template(&root.join(&config.templates.readme)).await?;

        Ok(Self {
            repo_card,
            track_card,
            readme,
        })
    }
}

async fn load_template(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| UpdateError::TemplateMissing {
            path: path.to_path_buf(),
            source,
        })
}

pub struct ReadmeUpdater<R, T> {
    config: UpdaterConfig,
    /// Directory every configured relative path is resolved against
    root: PathBuf,
    repos: R,
    tracks: T,
}

impl<R, T> ReadmeUpdater<R, T>
where
    R: DataSource<Record = RepoRecord>,
    T: DataSource<Record = TrackRecord>,
{
    pub fn new(config: UpdaterConfig, root: impl AsRef<Path>, repos: R, tracks: T) -> Self {
        Self {
            config,
            root: root.as_ref().to_path_buf(),
            repos,
            tracks,
        }
    }

    /// Run, stamping the document with the wall-clock time of assembly.
    pub async fn run(&self) -> Result<RunReport> {
        self.run_with_clock(Utc::now).await
    }

    /// Run with `now` as the document timestamp.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport> {
        self.run_with_clock(move || now).await
    }

    /// Run, reading `clock` once after every entity has been fetched.
    pub async fn run_with_clock<C>(&self, clock: C) -> Result<RunReport>
    where
        C: FnOnce() -> DateTime<Utc>,
    {
        let templates = Templates::load(&self.config, &self.root).await?;
        let mut report = RunReport::default();

        tracing::info!("🎧 Fetching tracks...");
        let extra_sections = match &templates.track_card {
            Some(template) => self.render_tracks(template, &mut report).await,
            None => Bindings::new(),
        };

        tracing::info!("📦 Fetching repo stats...");
        let card_refs = match &templates.repo_card {
            Some(template) => self.render_repos(template, &mut report).await,
            None => Vec::new(),
        };

        let assembler = DocumentAssembler::new(templates.readme);
        let document = assembler.assemble(&card_refs, &extra_sections, clock());

        let readme_path = self.root.join(&self.config.readme_path);
        tokio::fs::write(&readme_path, document)
            .await
            .map_err(|source| UpdateError::WriteFailure {
                path: readme_path.clone(),
                source,
            })?;
        report.document = readme_path;

        tracing::info!(
            "✅ README updated: {} cards, {} skipped, {} failed",
            report.rendered.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    async fn render_repos(&self, template: &str, report: &mut RunReport) -> Vec<String> {
        let github = &self.config.github;
        let builder = CardBuilder::for_repos(template, github);
        let mut card_refs = Vec::new();

        for entity in &self.config.repos {
            let record = match self.repos.fetch(&entity.full).await {
                Ok(record) => record,
                Err(reason) => {
                    tracing::warn!("❌ Failed to fetch {}: {}", entity.full, reason);
                    report.skipped.push((entity.full.clone(), reason));
                    continue;
                }
            };

            let card = builder.build_repo(entity, &record, &self.root).await;
            match builder.write(&card, &self.root).await {
                Ok(path) => {
                    tracing::info!("✅ Repo SVG generated: {}", path.display());
                    card_refs.push(builder.repo_reference(&github.link_base, entity, &card.filename));
                    report.rendered.push(path);
                }
                Err(e) => {
                    tracing::error!("❌ {}", e);
                    report.failed.push(entity.full.clone());
                }
            }
        }

        card_refs
    }

    /// Renders every track card; returns the document bindings for the
    /// configured placeholders. A placeholder whose card is missing is bound
    /// to an empty string.
    async fn render_tracks(&self, template: &str, report: &mut RunReport) -> Bindings {
        let builder = CardBuilder::for_tracks(template, &self.config.tracks);
        let mut sections = Bindings::new();

        for entity in &self.config.tracks.views {
            let reference = match self.tracks.fetch(&entity.view).await {
                Ok(record) => {
                    let card = builder.build_track(entity, &record);
                    match builder.write(&card, &self.root).await {
                        Ok(path) => {
                            tracing::info!("✅ SVG generated: {}", path.display());
                            report.rendered.push(path);
                            builder.track_reference(entity)
                        }
                        Err(e) => {
                            tracing::error!("❌ {}", e);
                            report.failed.push(entity.view.clone());
                            String::new()
                        }
                    }
                }
                Err(reason) => {
                    tracing::warn!("❌ Failed to fetch {}: {}", entity.view, reason);
                    report.skipped.push((entity.view.clone(), reason));
                    String::new()
                }
            };

            if let Some(placeholder) = &entity.placeholder {
                sections.insert(placeholder.clone(), reference);
            }
        }

        sections
    }
}
