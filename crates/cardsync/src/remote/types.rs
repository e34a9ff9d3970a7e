//! Typed wire model of the remote store's responses.
//!
//! The remote returns `null` for sub-resources that were never created;
//! those collapse to their zero value on deserialization so the reconciler
//! can treat "missing" and "empty" uniformly.

use serde::{Deserialize, Deserializer};

/// The remote store's view of one card: server-assigned identity plus three
/// independently versioned sub-resources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteCard {
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
    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,

    #[serde(rename = "trait", deserialize_with = "null_as_default")]
    pub trait_ref: RemoteTrait,
    #[serde(deserialize_with = "null_as_default")]
    pub effect: RemoteEffect,
    #[serde(deserialize_with = "null_as_default")]
    pub stats: Vec<RemoteStat>,
    #[serde(deserialize_with = "null_as_default")]
    pub image: RemoteImage,
    #[serde(deserialize_with = "null_as_default")]
    pub preview: RemotePreview,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemotePreview {
    pub id: String,
    pub previewer: String,
    pub preview_url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteImage {
    pub id: String,
    pub original: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub thumbnail: String,
}

impl RemoteImage {
    /// All five variant URLs unset means the image sub-resource was never
    /// created for this card.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
            && self.large.is_empty()
            && self.medium.is_empty()
            && self.small.is_empty()
            && self.thumbnail.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteStat {
    pub id: String,
    #[serde(rename = "type")]
    pub stat_type: String,
    pub rank: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteTrait {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteEffect {
    pub id: String,
    pub symbol: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatRank {
    pub id: String,
    pub rank: i32,
}

/// Stat rank entities grouped per dimension, as returned by the aliased
/// rank query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatRankGroups {
    pub strength: Vec<StatRank>,
    pub intelligence: Vec<StatRank>,
    pub special: Vec<StatRank>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
