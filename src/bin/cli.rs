//! quiwatch CLI
//!
//! Runs one watch pass over the configured qui.help boards: fetch, diff
//! against the baseline, announce new posts, persist, back up.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quiwatch::{error::Result, models::Config, pipeline, storage::BaselineStore};

/// quiwatch - forum watcher for qui.help
#[derive(Parser, Debug)]
#[command(
    name = "quiwatch",
    version,
    about = "Watches qui.help forum boards and announces new posts"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Override the baseline cache file path
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all boards once and announce new posts (the default)
    Run,

    /// Validate the configuration file
    Validate,

    /// Show what the baseline currently knows
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(cache) = cli.cache {
        config.storage.cache_file = cache.to_string_lossy().into_owned();
    }

    let store = BaselineStore::new(&config.storage.cache_file);

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            config.validate()?;
            pipeline::run_watcher(&config, &store).await?;
            log::info!("Done!");
        }

        Command::Validate => {
            config.validate()?;
            log::info!(
                "Config OK: {} sources, cache file {}",
                config.sources.len(),
                config.storage.cache_file
            );
        }

        Command::Info => {
            let baseline = store.load().await?;
            if baseline.is_empty() {
                log::info!("No baseline yet at {}", store.path().display());
            } else {
                for (url, links) in &baseline {
                    log::info!("{}: {} known posts", url, links.len());
                }
            }
        }
    }

    Ok(())
}
