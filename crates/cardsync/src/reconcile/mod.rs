//! The reconciler: diff local cards against the remote set and issue the
//! minimal create/update calls, per card and per sub-resource.

pub mod diff;
pub mod engine;
pub mod error;

pub use engine::{Reconciler, SyncReport};
pub use error::ReconcileError;
