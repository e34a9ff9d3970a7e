use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Invalid card kind '{kind}' for card '{uid}'")]
    InvalidKind { uid: String, kind: String },

    #[error("Duplicate uid '{uid}' in the remote card set")]
    DuplicateUid { uid: String },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
