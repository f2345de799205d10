//! Toybox Chef main entry point
//!
//! This is the command-line interface for the Arvind Gupta Toys archive chef.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use toybox_chef::chef::{load_chef_config, preview, ytdl_resolver, Chef};
use toybox_chef::config::Config;
use toybox_chef::output::print_statistics;
use toybox_chef::skip::SkipList;
use toybox_chef::video::clear_cache;
use tracing_subscriber::EnvFilter;

/// Toybox Chef: imports the Arvind Gupta Toys film archive
///
/// Scrapes the archive's film page, groups its videos by language and
/// topic, keeps the ones with a permissive license and writes the
/// resulting channel tree as JSON.
#[derive(Parser, Debug)]
#[command(name = "toybox-chef")]
#[command(version)]
#[command(about = "Imports the Arvind Gupta Toys film archive", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults target the archive page)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Delete the persisted skip-list before running
    #[arg(long)]
    clear_skip_cache: bool,

    /// Delete the per-video metadata cache before running
    #[arg(long)]
    update: bool,

    /// Fetch and segment the page, print the topic maps and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) =
        load_chef_config(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.dry_run {
        return handle_dry_run(&config).await;
    }

    if cli.clear_skip_cache {
        SkipList::clear(&config.paths.skip_cache)
            .context("Failed to clear the skip-list")?;
    }

    if cli.update {
        clear_cache(Path::new(&config.paths.video_cache_dir))
            .context("Failed to clear the video metadata cache")?;
        tracing::info!("Cleared video cache {}", config.paths.video_cache_dir);
    }

    handle_run(config, config_hash).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("toybox_chef=info,warn"),
            1 => EnvFilter::new("toybox_chef=debug,info"),
            2 => EnvFilter::new("toybox_chef=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the layout and topics of every language
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Toybox Chef Dry Run ===\n");
    println!("Source: {}", config.source.url);
    println!("Video domains: {}", config.source.video_domains.join(", "));
    println!("Output: {}\n", config.paths.output);

    let text = preview(config).await?;
    print!("{}", text);

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main import
async fn handle_run(config: Config, config_hash: Option<String>) -> anyhow::Result<()> {
    let resolver = ytdl_resolver(&config).await?;

    let output_path = PathBuf::from(&config.paths.output);
    let mut chef = Chef::new(config, Box::new(resolver))?;
    if let Some(hash) = config_hash {
        chef = chef.with_config_hash(hash);
    }

    let report = match chef.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Chef run failed: {}", e);
            return Err(e.into());
        }
    };

    report.write_channel(&output_path)?;
    tracing::info!("Skip-list now holds {} entries", report.skip_ids_written);

    print_statistics(&report.stats);
    Ok(())
}
