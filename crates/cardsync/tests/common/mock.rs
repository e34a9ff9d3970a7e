//! A recording mock of the remote API.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use cardsync::model::{Card, CardKind};
use cardsync::remote::{
    CardUpdate, ImageCreate, ImageUpdate, PreviewUpdate, RemoteApi, RemoteCard, RemoteError,
    RemoteTrait, ResolvedRefs, StatRank, StatRankGroups,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateCard {
        uid: String,
        kind: CardKind,
        stats_ids: Vec<String>,
        trait_id: Option<String>,
    },
    UpdateCard(CardUpdate),
    UpdatePreview(PreviewUpdate),
    UpdateImage(ImageUpdate),
    CreateImage(ImageCreate),
}

#[derive(Default)]
pub struct MockRemote {
    pub remote_cards: Vec<RemoteCard>,
    pub traits: Vec<RemoteTrait>,
    pub stat_ranks: StatRankGroups,
    /// When set, every mutation is rejected with an API error.
    pub fail_mutations: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock with one trait and one rank per stat dimension, matching the
    /// builder card's values.
    pub fn with_lookup_entities() -> Self {
        Self {
            traits: vec![RemoteTrait {
                id: "tr-hero".to_string(),
                name: "Hero".to_string(),
            }],
            stat_ranks: StatRankGroups {
                strength: vec![StatRank {
                    id: "str-3".to_string(),
                    rank: 3,
                }],
                intelligence: vec![StatRank {
                    id: "int-5".to_string(),
                    rank: 5,
                }],
                special: vec![StatRank {
                    id: "spc-2".to_string(),
                    rank: 2,
                }],
            },
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), RemoteError> {
        if self.fail_mutations {
            return Err(RemoteError::Api {
                message: "mutation rejected".to_string(),
            });
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl RemoteApi for MockRemote {
    async fn fetch_cards(&self) -> Result<Vec<RemoteCard>, RemoteError> {
        Ok(self.remote_cards.clone())
    }

    async fn fetch_traits(&self) -> Result<Vec<RemoteTrait>, RemoteError> {
        Ok(self.traits.clone())
    }

    async fn fetch_stat_ranks(&self) -> Result<StatRankGroups, RemoteError> {
        Ok(self.stat_ranks.clone())
    }

    async fn create_card(
        &self,
        kind: CardKind,
        card: &Card,
        refs: &ResolvedRefs,
    ) -> Result<Value, RemoteError> {
        self.record(Call::CreateCard {
            uid: card.uid.clone(),
            kind,
            stats_ids: refs.stats_ids.clone(),
            trait_id: refs.trait_id.clone(),
        })?;
        Ok(json!({ "createCard": { "id": format!("ck-{}", card.uid), "uid": card.uid } }))
    }

    async fn update_card(&self, update: &CardUpdate) -> Result<(), RemoteError> {
        self.record(Call::UpdateCard(update.clone()))
    }

    async fn update_preview(&self, update: &PreviewUpdate) -> Result<(), RemoteError> {
        self.record(Call::UpdatePreview(update.clone()))
    }

    async fn update_image(&self, update: &ImageUpdate) -> Result<(), RemoteError> {
        self.record(Call::UpdateImage(update.clone()))
    }

    async fn create_image(&self, create: &ImageCreate) -> Result<(), RemoteError> {
        self.record(Call::CreateImage(create.clone()))
    }
}
