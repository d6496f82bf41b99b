use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::{info, warn};

use galloader::config::Config;
use galloader::downloader::AlbumDownloader;

#[derive(Parser)]
#[command(name = "galloader")]
#[command(about = "Sequential gallery album downloader with filename guessing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Download albums by URL (defaults to the config's album list)
    Download {
        /// Album listing page URLs
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Init => {
            if Path::new(&cli.config).exists() {
                warn!("Configuration file {} already exists, leaving it alone", cli.config);
            } else {
                Config::default().save(&cli.config)?;
                info!("Wrote default configuration to {}", cli.config);
            }
        }
        Commands::Download { urls } => {
            let config = if Path::new(&cli.config).exists() {
                Config::load(&cli.config)?
            } else {
                Config::default()
            };

            let urls = if urls.is_empty() {
                config
                    .albums
                    .iter()
                    .filter(|album| album.active)
                    .map(|album| album.url.clone())
                    .collect()
            } else {
                urls
            };

            if urls.is_empty() {
                warn!("No album URLs given and none configured; nothing to do");
                return Ok(());
            }

            let downloader = AlbumDownloader::new(&config);
            for url in urls {
                info!("Processing album: {}", url);
                match downloader.process_album(&url).await {
                    Ok(report) => info!(
                        "Completed album '{}': {}/{} images",
                        report.album.name, report.downloaded, report.album.total_images
                    ),
                    // A bad album should not sink the rest of the run.
                    Err(e) => warn!("Skipping album {}: {}", url, e),
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("galloader={}", level))
        .with_target(false)
        .init();

    Ok(())
}
