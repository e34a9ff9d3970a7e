//! Remote card store: GraphQL transport, typed wire model, named
//! operations, and the per-run lookup tables.

pub mod api;
pub mod client;
pub mod error;
pub mod lookup;
pub mod types;

pub use api::{CardUpdate, ImageCreate, ImageUpdate, PreviewUpdate, RemoteApi};
pub use client::{GraphqlClient, DEFAULT_ENDPOINT};
pub use error::RemoteError;
pub use lookup::{LookupTables, ResolvedRefs};
pub use types::{
    RemoteCard, RemoteEffect, RemoteImage, RemotePreview, RemoteStat, RemoteTrait, StatRank,
    StatRankGroups,
};
