use std::collections::HashMap;
use std::fmt;

use log::{debug, error, info};

use crate::model::{Card, CardKind};
use crate::remote::{
    CardUpdate, ImageCreate, ImageUpdate, LookupTables, PreviewUpdate, RemoteApi, RemoteCard,
};

use super::diff;
use super::error::ReconcileError;

/// Aggregate counts for one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub cards_updated: usize,
    pub previews_updated: usize,
    pub images_updated: usize,
    pub images_created: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} cards / {} previews / {} images updated, {} images created, {} unchanged, {} failed",
            self.created,
            self.cards_updated,
            self.previews_updated,
            self.images_updated,
            self.images_created,
            self.unchanged,
            self.failed
        )
    }
}

/// Diffs the local card set against the remote one and issues the minimal
/// create/update calls.
///
/// Per-card failures (rejected mutation, unknown kind) are logged and
/// counted; only run-level problems (duplicate remote uids) abort the whole
/// reconciliation.
pub struct Reconciler<'a> {
    api: &'a dyn RemoteApi,
    lookups: &'a LookupTables,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(api: &'a dyn RemoteApi, lookups: &'a LookupTables) -> Self {
        Self {
            api,
            lookups,
            dry_run: false,
        }
    }

    /// When enabled, every decision is computed and logged but no mutation
    /// is sent. The report counts what would have happened.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub async fn reconcile(
        &self,
        cards: &[Card],
        remote_cards: Vec<RemoteCard>,
    ) -> Result<SyncReport, ReconcileError> {
        let index = index_by_uid(&remote_cards)?;
        let mut report = SyncReport::default();
        let mut to_create = Vec::new();

        for card in cards {
            match index.get(card.uid.as_str()) {
                None => to_create.push(card),
                Some(remote) => self.reconcile_existing(card, remote, &mut report).await,
            }
        }

        for card in to_create {
            match self.create_card(card).await {
                Ok(()) => report.created += 1,
                Err(e) => {
                    error!("Failed to create card '{}': {}", card.uid, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Compares the three sub-resources independently; each difference
    /// produces its own update call, and one failing does not stop the
    /// others.
    async fn reconcile_existing(&self, card: &Card, remote: &RemoteCard, report: &mut SyncReport) {
        let mut touched = false;

        let fields = diff::preview_diff(&remote.preview, card);
        if !fields.is_empty() {
            touched = true;
            info!(
                "Preview for '{}' differs ({})",
                card.uid,
                fields.join(", ")
            );
            let update = PreviewUpdate {
                id: remote.preview.id.clone(),
                previewer: card.previewer.clone(),
                preview_url: card.preview_url.clone(),
                is_active: card.preview_active,
            };
            if self.dry_run {
                info!("[dry-run] would update preview for '{}'", card.uid);
                report.previews_updated += 1;
            } else {
                match self.api.update_preview(&update).await {
                    Ok(()) => report.previews_updated += 1,
                    Err(e) => {
                        error!("Failed to update preview for '{}': {}", card.uid, e);
                        report.failed += 1;
                    }
                }
            }
        }

        let fields = diff::image_diff(&remote.image, card);
        if !fields.is_empty() {
            touched = true;
            info!("Image for '{}' differs ({})", card.uid, fields.join(", "));
            if remote.image.is_empty() {
                let create = ImageCreate {
                    card_id: remote.id.clone(),
                    original: card.original_image_url.clone(),
                    large: card.large_image_url.clone(),
                    medium: card.medium_image_url.clone(),
                    small: card.small_image_url.clone(),
                    thumbnail: card.thumbnail_image_url.clone(),
                };
                if self.dry_run {
                    info!("[dry-run] would create image for '{}'", card.uid);
                    report.images_created += 1;
                } else {
                    match self.api.create_image(&create).await {
                        Ok(()) => report.images_created += 1,
                        Err(e) => {
                            error!("Failed to create image for '{}': {}", card.uid, e);
                            report.failed += 1;
                        }
                    }
                }
            } else {
                let update = ImageUpdate {
                    id: remote.image.id.clone(),
                    original: card.original_image_url.clone(),
                    large: card.large_image_url.clone(),
                    medium: card.medium_image_url.clone(),
                    small: card.small_image_url.clone(),
                    thumbnail: card.thumbnail_image_url.clone(),
                };
                if self.dry_run {
                    info!("[dry-run] would update image for '{}'", card.uid);
                    report.images_updated += 1;
                } else {
                    match self.api.update_image(&update).await {
                        Ok(()) => report.images_updated += 1,
                        Err(e) => {
                            error!("Failed to update image for '{}': {}", card.uid, e);
                            report.failed += 1;
                        }
                    }
                }
            }
        }

        let fields = diff::card_diff(remote, card);
        if !fields.is_empty() {
            touched = true;
            info!("Card '{}' differs ({})", card.uid, fields.join(", "));
            let update = CardUpdate {
                id: remote.id.clone(),
                uid: card.uid.clone(),
                rarity: card.rarity.clone(),
                number: card.number,
                set: card.set.clone(),
                title: card.title.clone(),
                subtitle: card.subtitle.clone(),
                kind: card.kind.clone(),
                mp: card.mp,
            };
            if self.dry_run {
                info!("[dry-run] would update card '{}'", card.uid);
                report.cards_updated += 1;
            } else {
                match self.api.update_card(&update).await {
                    Ok(()) => report.cards_updated += 1,
                    Err(e) => {
                        error!("Failed to update card '{}': {}", card.uid, e);
                        report.failed += 1;
                    }
                }
            }
        }

        if !touched {
            debug!("Card '{}' is in sync", card.uid);
            report.unchanged += 1;
        }
    }

    async fn create_card(&self, card: &Card) -> Result<(), ReconcileError> {
        let kind = CardKind::parse(&card.kind).ok_or_else(|| ReconcileError::InvalidKind {
            uid: card.uid.clone(),
            kind: card.kind.clone(),
        })?;

        let refs = self.lookups.resolve(card);

        if self.dry_run {
            info!("[dry-run] would create {} card '{}'", kind, card.uid);
            return Ok(());
        }

        info!("Creating {} card '{}'", kind, card.uid);
        let response = self.api.create_card(kind, card, &refs).await?;
        debug!("Create response for '{}': {}", card.uid, response);
        Ok(())
    }
}

/// Indexes the remote set by uid. The remote store guarantees uniqueness;
/// if that is ever violated the run aborts instead of silently picking one.
fn index_by_uid(remote_cards: &[RemoteCard]) -> Result<HashMap<&str, &RemoteCard>, ReconcileError> {
    let mut index = HashMap::with_capacity(remote_cards.len());
    for remote in remote_cards {
        if index.insert(remote.uid.as_str(), remote).is_some() {
            return Err(ReconcileError::DuplicateUid {
                uid: remote.uid.clone(),
            });
        }
    }
    Ok(index)
}
