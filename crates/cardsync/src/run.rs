//! Run orchestration.
//!
//! Initialization is explicit: directories, the remote client and the
//! lookup tables are built here and passed down by reference; there is no
//! process-wide state. Failures during initialization are fatal, per-card
//! failures are logged and the run continues.

use std::path::PathBuf;

use log::{error, info, warn};

use crate::error::SyncError;
use crate::pipeline::{ImageDirs, Pipeline};
use crate::reconcile::{Reconciler, SyncReport};
use crate::remote::{GraphqlClient, LookupTables, RemoteApi, DEFAULT_ENDPOINT};
use crate::sheet;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub sheet_url: String,
    pub endpoint: String,
    pub token: String,
    pub images_dir: PathBuf,
    pub mirror_dir: Option<PathBuf>,
    pub dry_run: bool,
}

impl SyncConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            sheet_url: sheet::DEFAULT_SHEET_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: token.into(),
            images_dir: PathBuf::from("images"),
            mirror_dir: None,
            dry_run: false,
        }
    }
}

/// Loads the sheet, derives images for every card, then reconciles against
/// the remote store. Every card passes through the full derivation chain
/// before the next one starts, and reconciliation begins only after all
/// cards have derived.
pub async fn run_sync(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    let mut dirs = ImageDirs::new(&config.images_dir);
    if let Some(mirror) = &config.mirror_dir {
        dirs = dirs.with_mirror(mirror);
    }
    dirs.create()?;

    let http = reqwest::Client::new();

    let cards = sheet::fetch_cards(&http, &config.sheet_url).await?;
    info!("Loaded {} cards from the sheet", cards.len());

    let pipeline = Pipeline::new(dirs, http.clone());
    let mut derive_failures = 0usize;
    for card in &cards {
        match pipeline.derive(card).await {
            Ok(outcome) if outcome.is_cached() => {}
            Ok(outcome) => info!(
                "Derived {} stage(s) for '{}'",
                outcome.created.len(),
                card.uid
            ),
            Err(e) => {
                error!("Image derivation failed for '{}': {}", card.uid, e);
                derive_failures += 1;
            }
        }
    }
    if derive_failures > 0 {
        warn!("{derive_failures} card(s) failed image derivation");
    }

    let client = GraphqlClient::new(http, &config.endpoint, &config.token);
    let lookups = LookupTables::load(&client).await?;
    let remote_cards = client.fetch_cards().await?;
    info!("Fetched {} remote cards", remote_cards.len());

    let reconciler = Reconciler::new(&client, &lookups).dry_run(config.dry_run);
    let report = reconciler.reconcile(&cards, remote_cards).await?;
    info!("Reconcile complete: {report}");

    Ok(report)
}
