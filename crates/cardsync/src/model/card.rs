use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the source sheet, keyed by `uid`.
///
/// Deserialization targets the sheet's snake_case column headers;
/// serialization produces the camelCase field names the remote store
/// expects. Fields tagged `skip_serializing` never go over the wire as-is:
/// the kind selects the creation mutation, and the stat ranks and trait name
/// are resolved into id references first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Card {
    pub uid: String,

    #[serde(default)]
    pub rarity: String,

    #[serde(default, deserialize_with = "int_or_empty")]
    pub number: i32,

    #[serde(default)]
    pub set: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,

    #[serde(default, rename(deserialize = "type"), skip_serializing)]
    pub kind: String,

    #[serde(default, rename(deserialize = "trait"), skip_serializing)]
    pub trait_name: String,

    #[serde(default, deserialize_with = "int_or_empty")]
    pub mp: i32,

    #[serde(default)]
    pub symbol: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub effect: String,

    #[serde(default, deserialize_with = "int_or_empty", skip_serializing)]
    pub strength: i32,

    #[serde(default, deserialize_with = "int_or_empty", skip_serializing)]
    pub intelligence: i32,

    #[serde(default, deserialize_with = "int_or_empty", skip_serializing)]
    pub special: i32,

    #[serde(
        default,
        rename(serialize = "previewUrl"),
        skip_serializing_if = "String::is_empty"
    )]
    pub preview_url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub previewer: String,

    #[serde(default, deserialize_with = "bool_or_empty", skip_serializing)]
    pub preview_active: bool,

    #[serde(default, rename(serialize = "originalImage"))]
    pub original_image_url: String,

    #[serde(default, rename(serialize = "largeImage"))]
    pub large_image_url: String,

    #[serde(default, rename(serialize = "mediumImage"))]
    pub medium_image_url: String,

    #[serde(default, rename(serialize = "smallImage"))]
    pub small_image_url: String,

    #[serde(default, rename(serialize = "thumbnailImage"))]
    pub thumbnail_image_url: String,
}

impl Card {
    /// The on-disk filename shared by every derived variant of this card.
    pub fn filename(&self) -> String {
        format!("{}.jpg", self.uid)
    }
}

/// The closed set of card kinds the remote store has creation mutations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Character,
    Event,
    Battle,
}

impl CardKind {
    pub const ALL: [CardKind; 3] = [CardKind::Character, CardKind::Event, CardKind::Battle];

    /// Parses a raw sheet value. `None` for anything outside the closed set;
    /// the reconciler turns that into a typed error instead of guessing.
    pub fn parse(raw: &str) -> Option<CardKind> {
        match raw {
            "Character" => Some(CardKind::Character),
            "Event" => Some(CardKind::Event),
            "Battle" => Some(CardKind::Battle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Character => "Character",
            CardKind::Event => "Event",
            CardKind::Battle => "Battle",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sheet cells are frequently blank; treat an empty cell as 0 instead of a
/// parse error.
fn int_or_empty<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(serde::de::Error::custom)
}

/// Blank cells are false; otherwise accept the usual spellings.
fn bool_or_empty<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean value '{other}'"
        ))),
    }
}
