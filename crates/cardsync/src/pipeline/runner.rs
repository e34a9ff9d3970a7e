use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, warn};

use crate::model::Card;

use super::dirs::{ImageDirs, Stage};
use super::error::{PipelineError, PipelineWarning};

/// Content box of a scanned card plus its border, in source pixels. The
/// center crop keeps this region and discards scanner slop around it.
const CONTENT_WIDTH: u32 = 680;
const CONTENT_HEIGHT: u32 = 980;
const BORDER: u32 = 30;

const LARGE_HEIGHT: u32 = 1000;
const MEDIUM_HEIGHT: u32 = 400;
const SMALL_HEIGHT: u32 = 200;
const THUMBNAIL_HEIGHT: u32 = 100;

/// Scans from this set ship with a color profile that renders wrong on the
/// web; they get rewritten against the generic RGB profile after download.
const COLOR_CORRECTED_SET: &str = "JL";

/// What one derivation run actually did.
#[derive(Debug, Default)]
pub struct DeriveOutcome {
    /// Stages that produced a new file this run; cached stages are absent.
    pub created: Vec<Stage>,
    /// Non-fatal side-effect failures, already logged.
    pub warnings: Vec<PipelineWarning>,
}

impl DeriveOutcome {
    /// True when every stage was already on disk.
    pub fn is_cached(&self) -> bool {
        self.created.is_empty()
    }
}

pub struct Pipeline {
    dirs: ImageDirs,
    http: reqwest::Client,
}

impl Pipeline {
    pub fn new(dirs: ImageDirs, http: reqwest::Client) -> Self {
        Self { dirs, http }
    }

    pub fn dirs(&self) -> &ImageDirs {
        &self.dirs
    }

    /// Runs the full derivation chain for one card.
    ///
    /// A stage failure aborts the remaining stages for this card only; the
    /// caller decides whether to continue with other cards. A fully cached
    /// card costs five existence checks and nothing else.
    pub async fn derive(&self, card: &Card) -> Result<DeriveOutcome, PipelineError> {
        let mut outcome = DeriveOutcome::default();

        self.stage_original(card, &mut outcome).await?;
        self.stage_large(card, &mut outcome)?;
        self.stage_scaled(card, Stage::Medium, MEDIUM_HEIGHT, &mut outcome)?;
        self.stage_scaled(card, Stage::Small, SMALL_HEIGHT, &mut outcome)?;
        self.stage_scaled(card, Stage::Thumbnail, THUMBNAIL_HEIGHT, &mut outcome)?;

        Ok(outcome)
    }

    /// Deletes every derived file for the card, forcing a fresh derivation
    /// on the next run. Files that are already gone are ignored.
    pub fn remove(&self, card: &Card) -> Result<(), PipelineError> {
        for stage in Stage::ALL {
            let path = self.dirs.stage_path(stage, &card.filename());
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(PipelineError::RemoveFile { path, source: e }),
            }
        }
        Ok(())
    }

    async fn stage_original(
        &self,
        card: &Card,
        outcome: &mut DeriveOutcome,
    ) -> Result<(), PipelineError> {
        let path = self.dirs.stage_path(Stage::Original, &card.filename());
        if path.exists() {
            return Ok(());
        }

        if card.original_image_url.is_empty() {
            return Err(PipelineError::MissingSourceAsset {
                uid: card.uid.clone(),
            });
        }

        info!("Downloading {}", card.original_image_url);
        let response = self
            .http
            .get(&card.original_image_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PipelineError::Fetch {
                url: card.original_image_url.clone(),
                source: e,
            })?;
        let bytes = response.bytes().await.map_err(|e| PipelineError::Fetch {
            url: card.original_image_url.clone(),
            source: e,
        })?;

        std::fs::write(&path, &bytes).map_err(|e| PipelineError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        if card.set == COLOR_CORRECTED_SET {
            if let Err(e) = color_correct(&path) {
                warn!("Unable to color correct {}: {}", path.display(), e);
                outcome.warnings.push(PipelineWarning::ColorCorrectFailed {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }

        outcome.created.push(Stage::Original);
        Ok(())
    }

    fn stage_large(&self, card: &Card, outcome: &mut DeriveOutcome) -> Result<(), PipelineError> {
        let src = self.dirs.stage_path(Stage::Original, &card.filename());
        let dst = self.dirs.stage_path(Stage::Large, &card.filename());
        if dst.exists() {
            return Ok(());
        }

        let original = open_image(&src)?;
        let cropped = crop_center(
            &original,
            CONTENT_WIDTH + 2 * BORDER,
            CONTENT_HEIGHT + 2 * BORDER,
        );
        let resized = resize_to_height(&cropped, LARGE_HEIGHT);

        if let Some(mirror) = &self.dirs.mirror {
            if card.preview_active {
                let mirror_path = mirror.join(card.filename());
                if let Err(e) = save_jpeg(&resized, &mirror_path) {
                    warn!("Failed to write mirror copy {}: {}", mirror_path.display(), e);
                    outcome.warnings.push(PipelineWarning::MirrorCopyFailed {
                        path: mirror_path,
                        error: e.to_string(),
                    });
                }
            }
        }

        save_jpeg(&resized, &dst)?;
        outcome.created.push(Stage::Large);
        Ok(())
    }

    fn stage_scaled(
        &self,
        card: &Card,
        stage: Stage,
        height: u32,
        outcome: &mut DeriveOutcome,
    ) -> Result<(), PipelineError> {
        let src = self.dirs.stage_path(Stage::Large, &card.filename());
        let dst = self.dirs.stage_path(stage, &card.filename());
        if dst.exists() {
            return Ok(());
        }

        let large = open_image(&src)?;
        let resized = resize_to_height(&large, height);

        save_jpeg(&resized, &dst)?;
        outcome.created.push(stage);
        Ok(())
    }
}

fn open_image(path: &Path) -> Result<DynamicImage, PipelineError> {
    image::open(path).map_err(|e| PipelineError::Image {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Center-crop to at most `width` x `height`, clamped to the source bounds.
fn crop_center(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let crop_w = width.min(w);
    let crop_h = height.min(h);
    let x = (w - crop_w) / 2;
    let y = (h - crop_h) / 2;
    img.crop_imm(x, y, crop_w, crop_h)
}

/// Resize so the result is exactly `height` tall, width scaled
/// proportionally.
fn resize_to_height(img: &DynamicImage, height: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let width = ((w as f64 * height as f64 / h as f64).round() as u32).max(1);
    img.resize_exact(width, height, FilterType::Triangle)
}

/// JPEG has no alpha channel; flatten to RGB before encoding.
fn save_jpeg(img: &DynamicImage, path: &Path) -> Result<(), PipelineError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    rgb.save(path).map_err(|e| PipelineError::Image {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(target_os = "macos")]
fn color_correct(path: &Path) -> std::io::Result<()> {
    let status = std::process::Command::new("sips")
        .arg("--matchTo")
        .arg("/System/Library/ColorSync/Profiles/Generic RGB Profile.icc")
        .arg(path)
        .status()?;

    if !status.success() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("sips exited with {status}"),
        ));
    }
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn color_correct(path: &Path) -> std::io::Result<()> {
    debug!("No color profile tooling on this platform, leaving {} as-is", path.display());
    Ok(())
}
