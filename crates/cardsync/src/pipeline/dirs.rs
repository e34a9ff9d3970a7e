use std::fmt;
use std::path::{Path, PathBuf};

use super::error::PipelineError;

/// The five derivation stages, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Original,
    Large,
    Medium,
    Small,
    Thumbnail,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Original,
        Stage::Large,
        Stage::Medium,
        Stage::Small,
        Stage::Thumbnail,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            Stage::Original => "original",
            Stage::Large => "large",
            Stage::Medium => "medium",
            Stage::Small => "small",
            Stage::Thumbnail => "thumbnail",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The five sibling variant directories under one base path, plus an
/// optional external mirror directory that receives a copy of the large
/// variant for preview-active cards.
#[derive(Debug, Clone)]
pub struct ImageDirs {
    pub base: PathBuf,
    pub original: PathBuf,
    pub large: PathBuf,
    pub medium: PathBuf,
    pub small: PathBuf,
    pub thumbnail: PathBuf,
    pub mirror: Option<PathBuf>,
}

impl ImageDirs {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        let base = base.as_ref().to_path_buf();
        Self {
            original: base.join("original"),
            large: base.join("large"),
            medium: base.join("medium"),
            small: base.join("small"),
            thumbnail: base.join("thumbnail"),
            base,
            mirror: None,
        }
    }

    pub fn with_mirror<P: AsRef<Path>>(mut self, mirror: P) -> Self {
        self.mirror = Some(mirror.as_ref().to_path_buf());
        self
    }

    pub fn stage_dir(&self, stage: Stage) -> &Path {
        match stage {
            Stage::Original => &self.original,
            Stage::Large => &self.large,
            Stage::Medium => &self.medium,
            Stage::Small => &self.small,
            Stage::Thumbnail => &self.thumbnail,
        }
    }

    pub fn stage_path(&self, stage: Stage, filename: &str) -> PathBuf {
        self.stage_dir(stage).join(filename)
    }

    /// Creates the five variant directories. The mirror directory is an
    /// externally managed drop target and is never created here.
    pub fn create(&self) -> Result<(), PipelineError> {
        for stage in Stage::ALL {
            let dir = self.stage_dir(stage);
            std::fs::create_dir_all(dir).map_err(|e| PipelineError::CreateDirectory {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}
