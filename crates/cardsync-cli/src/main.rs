use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use cardsync::{run_sync, SyncConfig};

#[derive(Parser)]
#[command(name = "cardsync")]
#[command(about = "Sync the card sheet and derived images to the remote store", long_about = None)]
struct Cli {
    /// Bearer token for the remote GraphQL API.
    #[arg(long)]
    token: String,

    /// Base directory for the derived image chain.
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,

    /// Directory receiving a copy of the large variant for preview-active
    /// cards.
    #[arg(long)]
    mirror_dir: Option<PathBuf>,

    /// CSV export URL of the source sheet.
    #[arg(long, default_value = cardsync::sheet::DEFAULT_SHEET_URL)]
    sheet_url: String,

    /// Remote GraphQL endpoint.
    #[arg(long, default_value = cardsync::remote::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Compute and log every decision without sending mutations.
    #[arg(long)]
    dry_run: bool,
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    info!("Starting cardsync v{}", env!("CARGO_PKG_VERSION"));

    let config = SyncConfig {
        sheet_url: cli.sheet_url,
        endpoint: cli.endpoint,
        token: cli.token,
        images_dir: cli.images_dir,
        mirror_dir: cli.mirror_dir,
        dry_run: cli.dry_run,
    };

    let report = run_sync(&config).await.context("sync run failed")?;
    println!("{report}");

    Ok(())
}
