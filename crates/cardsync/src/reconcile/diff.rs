//! Field-exact comparison of local cards against their remote counterparts.
//!
//! Each function returns the remote field names that differ; an empty list
//! means the sub-resource is in sync. Comparison is plain equality with no
//! normalization, trimming, or case folding.

use crate::model::Card;
use crate::remote::{RemoteCard, RemoteImage, RemotePreview};

pub fn preview_diff(remote: &RemotePreview, local: &Card) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if remote.previewer != local.previewer {
        fields.push("previewer");
    }
    if remote.preview_url != local.preview_url {
        fields.push("previewUrl");
    }
    if remote.is_active != local.preview_active {
        fields.push("isActive");
    }
    fields
}

pub fn image_diff(remote: &RemoteImage, local: &Card) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if remote.original != local.original_image_url {
        fields.push("original");
    }
    if remote.large != local.large_image_url {
        fields.push("large");
    }
    if remote.medium != local.medium_image_url {
        fields.push("medium");
    }
    if remote.small != local.small_image_url {
        fields.push("small");
    }
    if remote.thumbnail != local.thumbnail_image_url {
        fields.push("thumbnail");
    }
    fields
}

/// Compares only the top-level scalar fields. Stat, trait, preview and
/// image references are owned by the other comparisons.
pub fn card_diff(remote: &RemoteCard, local: &Card) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if remote.uid != local.uid {
        fields.push("uid");
    }
    if remote.rarity != local.rarity {
        fields.push("rarity");
    }
    if remote.number != local.number {
        fields.push("number");
    }
    if remote.set != local.set {
        fields.push("set");
    }
    if remote.title != local.title {
        fields.push("title");
    }
    if remote.subtitle != local.subtitle {
        fields.push("subtitle");
    }
    if remote.kind != local.kind {
        fields.push("type");
    }
    if remote.mp != local.mp {
        fields.push("mp");
    }
    fields
}
