use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::reconcile::ReconcileError;
use crate::remote::RemoteError;

/// Top-level error for a sync run.
///
/// Only run-level failures surface here (sheet unreachable, remote store
/// unreachable, duplicate remote identities). Per-card failures are logged
/// and counted in the report instead.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sheet load failed: {0}")]
    Sheet(#[from] SheetError),

    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),

    #[error("Image pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to fetch sheet: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to parse sheet: {0}")]
    Parse(#[from] csv::Error),

    #[error("Sheet row {row} has an empty uid")]
    MissingUid { row: usize },

    #[error("Duplicate uid '{uid}' in sheet")]
    DuplicateUid { uid: String },
}

pub type Result<T> = std::result::Result<T, SyncError>;
