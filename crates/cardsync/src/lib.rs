pub mod error;
pub mod model;
pub mod pipeline;
pub mod reconcile;
pub mod remote;
pub mod run;
pub mod sheet;

pub use error::{Result, SheetError, SyncError};
pub use model::{Card, CardKind};
pub use pipeline::{DeriveOutcome, ImageDirs, Pipeline, PipelineError, PipelineWarning, Stage};
pub use reconcile::{ReconcileError, Reconciler, SyncReport};
pub use remote::{GraphqlClient, LookupTables, RemoteApi, RemoteCard, RemoteError};
pub use run::{run_sync, SyncConfig};
