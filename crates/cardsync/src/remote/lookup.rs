//! Rank and trait lookup tables.
//!
//! Built once per run, before any reconciliation, then read-only. A key
//! with no remote counterpart is silently omitted from the resolution:
//! absence means "no matching remote entity", not an error.

use std::collections::HashMap;

use crate::model::Card;

use super::api::RemoteApi;
use super::error::RemoteError;
use super::types::{RemoteTrait, StatRank, StatRankGroups};

#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    strength: HashMap<i32, String>,
    intelligence: HashMap<i32, String>,
    special: HashMap<i32, String>,
    traits: HashMap<String, String>,
}

/// Remote id references resolved for one card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRefs {
    pub stats_ids: Vec<String>,
    pub trait_id: Option<String>,
}

impl LookupTables {
    /// Fetches the rank and trait entities and indexes them. Called once at
    /// startup; a failure here is fatal to the run.
    pub async fn load(api: &dyn RemoteApi) -> Result<Self, RemoteError> {
        let ranks = api.fetch_stat_ranks().await?;
        let traits = api.fetch_traits().await?;
        Ok(Self::from_parts(ranks, traits))
    }

    pub fn from_parts(ranks: StatRankGroups, traits: Vec<RemoteTrait>) -> Self {
        fn index(list: Vec<StatRank>) -> HashMap<i32, String> {
            list.into_iter().map(|s| (s.rank, s.id)).collect()
        }

        Self {
            strength: index(ranks.strength),
            intelligence: index(ranks.intelligence),
            special: index(ranks.special),
            traits: traits.into_iter().map(|t| (t.name, t.id)).collect(),
        }
    }

    /// Resolves a card's three stat ranks and trait name into remote ids,
    /// omitting any dimension without a match.
    pub fn resolve(&self, card: &Card) -> ResolvedRefs {
        let mut stats_ids = Vec::new();
        if let Some(id) = self.strength.get(&card.strength) {
            stats_ids.push(id.clone());
        }
        if let Some(id) = self.intelligence.get(&card.intelligence) {
            stats_ids.push(id.clone());
        }
        if let Some(id) = self.special.get(&card.special) {
            stats_ids.push(id.clone());
        }

        ResolvedRefs {
            stats_ids,
            trait_id: self.traits.get(&card.trait_name).cloned(),
        }
    }
}
