//! Test harness for isolated pipeline execution.
//!
//! Provides a temp-directory image tree, synthetic JPEG originals standing
//! in for the network fetch of stage one, and helpers to inspect what the
//! pipeline wrote.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::TempDir;

use cardsync::model::Card;
use cardsync::pipeline::{ImageDirs, Pipeline, Stage};

pub struct ImageHarness {
    temp_dir: TempDir,
    pub dirs: ImageDirs,
}

impl ImageHarness {
    /// Harness without a mirror directory.
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Harness with a mirror directory for preview-active copies.
    pub fn with_mirror() -> Self {
        Self::build(true)
    }

    fn build(mirror: bool) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let mut dirs = ImageDirs::new(temp_dir.path().join("images"));
        if mirror {
            let mirror_dir = temp_dir.path().join("mirror");
            std::fs::create_dir_all(&mirror_dir).expect("Failed to create mirror dir");
            dirs = dirs.with_mirror(mirror_dir);
        }
        dirs.create().expect("Failed to create image dirs");

        Self { temp_dir, dirs }
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.dirs.clone(), reqwest::Client::new())
    }

    /// Writes a synthetic JPEG original for the card, standing in for the
    /// stage-one download.
    pub fn seed_original(&self, card: &Card, width: u32, height: u32) -> PathBuf {
        let path = self.dirs.stage_path(Stage::Original, &card.filename());
        write_jpeg(&path, width, height);
        path
    }

    pub fn stage_path(&self, stage: Stage, card: &Card) -> PathBuf {
        self.dirs.stage_path(stage, &card.filename())
    }

    pub fn mtime(&self, stage: Stage, card: &Card) -> SystemTime {
        std::fs::metadata(self.stage_path(stage, card))
            .expect("Failed to stat derived file")
            .modified()
            .expect("Filesystem without mtimes")
    }

    pub fn mirror_path(&self, card: &Card) -> PathBuf {
        self.dirs
            .mirror
            .as_ref()
            .expect("Harness built without a mirror")
            .join(card.filename())
    }

    /// Every file under the image base directory, as relative paths.
    pub fn list_files(&self) -> Vec<PathBuf> {
        walkdir::WalkDir::new(&self.dirs.base)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.dirs.base)
                    .ok()
                    .map(|p| p.to_path_buf())
            })
            .collect()
    }
}

impl Default for ImageHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 96])
    }));
    img.save(path).expect("Failed to write JPEG fixture");
}

pub fn dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).expect("Failed to read image dimensions")
}
