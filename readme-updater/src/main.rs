use readme_updater::config::{Credentials, UpdaterConfig};
use readme_updater::module::ReadmeUpdater;
use readme_updater::source::{GithubRepoSource, TrackViewSource};

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Regenerate the profile README and its SVG cards.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration
    #[arg(short, long, default_value = "readme.toml")]
    config: String,

    /// Directory relative paths in the configuration are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Overrides `log_level` from the configuration
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    supabase_key: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = UpdaterConfig::from_file(&args.config)?;
    let log_level = args.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    // Initialize logging
    let _logging_guard = readme_updater::logging::init_logging(
        args.root.join(&config.log_dir),
        "readme-updater",
        &log_level,
    )?;

    tracing::info!("README updater starting...");
    tracing::info!(
        "{} repositories, {} track views configured",
        config.repos.len(),
        config.tracks.views.len()
    );

    let credentials = Credentials {
        github_token: args.github_token,
        supabase_url: args.supabase_url,
        supabase_key: args.supabase_key,
    };

    let repos = GithubRepoSource::new(&config.github, credentials.github_token.clone())?;
    let tracks = TrackViewSource::new(&config.tracks, &credentials)?;

    let updater = ReadmeUpdater::new(config, &args.root, repos, tracks);
    let report = updater.run().await.context("README update failed")?;

    tracing::info!("README written to {}", report.document.display());
    Ok(())
}
