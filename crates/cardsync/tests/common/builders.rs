//! Builders for test cards and their remote counterparts.

#![allow(dead_code)]

use cardsync::model::Card;
use cardsync::remote::{RemoteCard, RemoteImage, RemotePreview};

/// A fully populated local card.
pub fn card(uid: &str) -> Card {
    Card {
        uid: uid.to_string(),
        rarity: "Rare".to_string(),
        number: 1,
        set: "AW".to_string(),
        title: "Test Card".to_string(),
        subtitle: String::new(),
        kind: "Character".to_string(),
        trait_name: "Hero".to_string(),
        mp: 4,
        symbol: "+".to_string(),
        effect: "Draw a card.".to_string(),
        strength: 3,
        intelligence: 5,
        special: 2,
        preview_url: format!("https://p.example.com/{uid}"),
        previewer: "Previewer One".to_string(),
        preview_active: false,
        original_image_url: format!("https://i.example.com/{uid}/o.jpg"),
        large_image_url: format!("https://i.example.com/{uid}/l.jpg"),
        medium_image_url: format!("https://i.example.com/{uid}/m.jpg"),
        small_image_url: format!("https://i.example.com/{uid}/s.jpg"),
        thumbnail_image_url: format!("https://i.example.com/{uid}/t.jpg"),
    }
}

/// A remote card whose every compared field matches `card` exactly, so the
/// reconciler sees it as fully in sync.
pub fn remote_card_matching(card: &Card) -> RemoteCard {
    RemoteCard {
        id: format!("ck-{}", card.uid),
        uid: card.uid.clone(),
        rarity: card.rarity.clone(),
        number: card.number,
        set: card.set.clone(),
        title: card.title.clone(),
        subtitle: card.subtitle.clone(),
        kind: card.kind.clone(),
        mp: card.mp,
        preview: RemotePreview {
            id: format!("pv-{}", card.uid),
            previewer: card.previewer.clone(),
            preview_url: card.preview_url.clone(),
            is_active: card.preview_active,
        },
        image: RemoteImage {
            id: format!("im-{}", card.uid),
            original: card.original_image_url.clone(),
            large: card.large_image_url.clone(),
            medium: card.medium_image_url.clone(),
            small: card.small_image_url.clone(),
            thumbnail: card.thumbnail_image_url.clone(),
        },
        ..Default::default()
    }
}
