//! Typed operations over the GraphQL transport.
//!
//! [`RemoteApi`] is the seam the reconciler talks through; production uses
//! [`GraphqlClient`], tests substitute a recording mock.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Card, CardKind};

use super::client::GraphqlClient;
use super::error::RemoteError;
use super::lookup::ResolvedRefs;
use super::types::{RemoteCard, RemoteTrait, StatRankGroups};

mod documents {
    pub const ALL_CARDS: &str = include_str!("queries/AllCards.graphql");
    pub const ALL_TRAITS: &str = include_str!("queries/AllTraits.graphql");
    pub const STAT_RANKS: &str = include_str!("queries/StatRanks.graphql");
    pub const CREATE_CHARACTER_CARD: &str =
        include_str!("queries/CreateCharacterCardWithPreview.graphql");
    pub const CREATE_EVENT_CARD: &str = include_str!("queries/CreateEventCardWithPreview.graphql");
    pub const CREATE_BATTLE_CARD: &str =
        include_str!("queries/CreateBattleCardWithPreview.graphql");
    pub const UPDATE_CARD: &str = include_str!("queries/UpdateCard.graphql");
    pub const UPDATE_PREVIEW: &str = include_str!("queries/UpdatePreview.graphql");
    pub const UPDATE_IMAGE: &str = include_str!("queries/UpdateImage.graphql");
    pub const CREATE_IMAGE: &str = include_str!("queries/CreateImage.graphql");
}

/// The closed kind → creation document table. Validation happens before
/// routing, so every reachable kind has a document.
pub fn creation_document(kind: CardKind) -> &'static str {
    match kind {
        CardKind::Character => documents::CREATE_CHARACTER_CARD,
        CardKind::Event => documents::CREATE_EVENT_CARD,
        CardKind::Battle => documents::CREATE_BATTLE_CARD,
    }
}

/// Variables for the kind-specific creation mutations: every card field
/// plus the resolved stat/trait references. Unresolved dimensions are
/// omitted entirely rather than sent as nulls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CardCreate<'a> {
    #[serde(flatten)]
    card: &'a Card,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stats_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trait_id: Option<String>,
}

/// Top-level field update. Carries exactly the compared fields and the
/// card's server identity; sub-resource references are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    pub id: String,
    pub uid: String,
    pub rarity: String,
    pub number: i32,
    pub set: String,
    pub title: String,
    pub subtitle: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub mp: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewUpdate {
    pub id: String,
    pub previewer: String,
    pub preview_url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpdate {
    pub id: String,
    pub original: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCreate {
    pub card_id: String,
    pub original: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub thumbnail: String,
}

/// Everything the reconciler needs from the remote store.
///
/// Every mutation is idempotent-by-intent: safe to retry manually, and an
/// error is always distinguishable from a successful empty result.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn fetch_cards(&self) -> Result<Vec<RemoteCard>, RemoteError>;
    async fn fetch_traits(&self) -> Result<Vec<RemoteTrait>, RemoteError>;
    async fn fetch_stat_ranks(&self) -> Result<StatRankGroups, RemoteError>;

    async fn create_card(
        &self,
        kind: CardKind,
        card: &Card,
        refs: &ResolvedRefs,
    ) -> Result<Value, RemoteError>;
    async fn update_card(&self, update: &CardUpdate) -> Result<(), RemoteError>;
    async fn update_preview(&self, update: &PreviewUpdate) -> Result<(), RemoteError>;
    async fn update_image(&self, update: &ImageUpdate) -> Result<(), RemoteError>;
    async fn create_image(&self, create: &ImageCreate) -> Result<(), RemoteError>;
}

#[async_trait]
impl RemoteApi for GraphqlClient {
    async fn fetch_cards(&self) -> Result<Vec<RemoteCard>, RemoteError> {
        #[derive(Deserialize)]
        struct AllCards {
            #[serde(default, rename = "allCards")]
            all_cards: Vec<RemoteCard>,
        }

        let data = self.request(documents::ALL_CARDS, None).await?;
        let wrapper: AllCards = serde_json::from_value(data)?;
        Ok(wrapper.all_cards)
    }

    async fn fetch_traits(&self) -> Result<Vec<RemoteTrait>, RemoteError> {
        #[derive(Deserialize)]
        struct AllTraits {
            #[serde(default, rename = "allTraits")]
            all_traits: Vec<RemoteTrait>,
        }

        let data = self.request(documents::ALL_TRAITS, None).await?;
        let wrapper: AllTraits = serde_json::from_value(data)?;
        Ok(wrapper.all_traits)
    }

    async fn fetch_stat_ranks(&self) -> Result<StatRankGroups, RemoteError> {
        let data = self.request(documents::STAT_RANKS, None).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn create_card(
        &self,
        kind: CardKind,
        card: &Card,
        refs: &ResolvedRefs,
    ) -> Result<Value, RemoteError> {
        let variables = serde_json::to_value(CardCreate {
            card,
            stats_ids: refs.stats_ids.clone(),
            trait_id: refs.trait_id.clone(),
        })?;

        let data = self
            .request(creation_document(kind), Some(variables))
            .await?;
        debug!("Created {} card '{}': {}", kind, card.uid, data);
        Ok(data)
    }

    async fn update_card(&self, update: &CardUpdate) -> Result<(), RemoteError> {
        let variables = serde_json::to_value(update)?;
        let data = self.request(documents::UPDATE_CARD, Some(variables)).await?;
        debug!("Card updated: {data}");
        Ok(())
    }

    async fn update_preview(&self, update: &PreviewUpdate) -> Result<(), RemoteError> {
        let variables = serde_json::to_value(update)?;
        let data = self
            .request(documents::UPDATE_PREVIEW, Some(variables))
            .await?;
        debug!("Preview updated: {data}");
        Ok(())
    }

    async fn update_image(&self, update: &ImageUpdate) -> Result<(), RemoteError> {
        let variables = serde_json::to_value(update)?;
        let data = self
            .request(documents::UPDATE_IMAGE, Some(variables))
            .await?;
        debug!("Image updated: {data}");
        Ok(())
    }

    async fn create_image(&self, create: &ImageCreate) -> Result<(), RemoteError> {
        let variables = serde_json::to_value(create)?;
        let data = self
            .request(documents::CREATE_IMAGE, Some(variables))
            .await?;
        debug!("Image created: {data}");
        Ok(())
    }
}
