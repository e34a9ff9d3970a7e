//! Integration tests for the image derivation pipeline.
//!
//! Stage one's network fetch is stood in for by seeding the original file
//! on disk, which the existence check honors before ever touching the URL.

mod common;

use cardsync::pipeline::{PipelineError, Stage};

use common::builders::card;
use common::harness::{dimensions, ImageHarness};

/// A card whose original is already on disk, so no stage needs the network.
fn seeded_card(harness: &ImageHarness, uid: &str) -> cardsync::model::Card {
    let mut card = card(uid);
    card.original_image_url = String::new();
    harness.seed_original(&card, 800, 1200);
    card
}

#[tokio::test]
async fn test_full_chain_derives_from_seeded_original() {
    let harness = ImageHarness::new();
    let card = seeded_card(&harness, "AW1-001");

    let outcome = harness.pipeline().derive(&card).await.unwrap();

    assert_eq!(
        outcome.created,
        vec![Stage::Large, Stage::Medium, Stage::Small, Stage::Thumbnail]
    );
    assert!(outcome.warnings.is_empty());
    for stage in Stage::ALL {
        assert!(
            harness.stage_path(stage, &card).exists(),
            "missing {stage} file"
        );
    }
}

#[tokio::test]
async fn test_derived_variant_dimensions() {
    let harness = ImageHarness::new();
    let card = seeded_card(&harness, "AW1-001");

    harness.pipeline().derive(&card).await.unwrap();

    // 800x1200 source, center-cropped to 740x1040, then scaled to fixed
    // heights with proportional widths.
    assert_eq!(dimensions(&harness.stage_path(Stage::Large, &card)), (712, 1000));
    assert_eq!(dimensions(&harness.stage_path(Stage::Medium, &card)), (285, 400));
    assert_eq!(dimensions(&harness.stage_path(Stage::Small, &card)), (142, 200));
    assert_eq!(dimensions(&harness.stage_path(Stage::Thumbnail, &card)), (71, 100));
}

#[tokio::test]
async fn test_second_run_is_fully_cached() {
    let harness = ImageHarness::new();
    let card = seeded_card(&harness, "AW1-001");
    let pipeline = harness.pipeline();

    pipeline.derive(&card).await.unwrap();
    let mtimes: Vec<_> = Stage::ALL
        .iter()
        .map(|&s| harness.mtime(s, &card))
        .collect();

    let outcome = pipeline.derive(&card).await.unwrap();

    assert!(outcome.is_cached());
    let after: Vec<_> = Stage::ALL
        .iter()
        .map(|&s| harness.mtime(s, &card))
        .collect();
    assert_eq!(mtimes, after, "cached run must not rewrite any file");
}

#[tokio::test]
async fn test_deleted_medium_regenerates_from_large_only() {
    let harness = ImageHarness::new();
    let card = seeded_card(&harness, "AW1-001");
    let pipeline = harness.pipeline();

    pipeline.derive(&card).await.unwrap();
    std::fs::remove_file(harness.stage_path(Stage::Medium, &card)).unwrap();

    let original_mtime = harness.mtime(Stage::Original, &card);
    let large_mtime = harness.mtime(Stage::Large, &card);

    let outcome = pipeline.derive(&card).await.unwrap();

    assert_eq!(outcome.created, vec![Stage::Medium]);
    assert!(harness.stage_path(Stage::Medium, &card).exists());
    assert_eq!(harness.mtime(Stage::Original, &card), original_mtime);
    assert_eq!(harness.mtime(Stage::Large, &card), large_mtime);
}

#[tokio::test]
async fn test_missing_source_asset_leaves_no_files() {
    let harness = ImageHarness::new();
    let mut card = card("AW1-404");
    card.original_image_url = String::new();

    let err = harness.pipeline().derive(&card).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::MissingSourceAsset { ref uid } if uid == "AW1-404"
    ));
    assert!(harness.list_files().is_empty());
}

#[tokio::test]
async fn test_mirror_receives_copy_for_preview_active_card() {
    let harness = ImageHarness::with_mirror();
    let mut card = seeded_card(&harness, "AW1-001");
    card.preview_active = true;

    harness.pipeline().derive(&card).await.unwrap();

    let mirror_path = harness.mirror_path(&card);
    assert!(mirror_path.exists());
    assert_eq!(dimensions(&mirror_path), (712, 1000));
}

#[tokio::test]
async fn test_mirror_skipped_for_inactive_card() {
    let harness = ImageHarness::with_mirror();
    let card = seeded_card(&harness, "AW1-002");

    harness.pipeline().derive(&card).await.unwrap();

    assert!(!harness.mirror_path(&card).exists());
}

#[tokio::test]
async fn test_missing_mirror_directory_is_non_fatal() {
    let harness = ImageHarness::with_mirror();
    let mut card = seeded_card(&harness, "AW1-003");
    card.preview_active = true;

    std::fs::remove_dir_all(harness.dirs.mirror.as_ref().unwrap()).unwrap();

    let outcome = harness.pipeline().derive(&card).await.unwrap();

    // Large still lands in its own directory; the mirror failure is only a
    // warning.
    assert!(harness.stage_path(Stage::Large, &card).exists());
    assert_eq!(outcome.warnings.len(), 1);
}

#[tokio::test]
async fn test_corrupt_original_aborts_remaining_stages() {
    let harness = ImageHarness::new();
    let mut card = card("AW1-005");
    card.original_image_url = String::new();
    std::fs::write(
        harness.stage_path(Stage::Original, &card),
        b"not an image",
    )
    .unwrap();

    let err = harness.pipeline().derive(&card).await.unwrap_err();

    assert!(matches!(err, PipelineError::Image { .. }));
    for stage in [Stage::Large, Stage::Medium, Stage::Small, Stage::Thumbnail] {
        assert!(!harness.stage_path(stage, &card).exists());
    }
}

#[tokio::test]
async fn test_remove_then_derive_recreates_chain() {
    let harness = ImageHarness::new();
    let card = seeded_card(&harness, "AW1-006");
    let pipeline = harness.pipeline();

    pipeline.derive(&card).await.unwrap();
    pipeline.remove(&card).unwrap();
    assert!(harness.list_files().is_empty());

    // The original is gone too, so a fresh run needs the source URL again.
    harness.seed_original(&card, 800, 1200);
    let outcome = pipeline.derive(&card).await.unwrap();
    assert_eq!(outcome.created.len(), 4);
}
