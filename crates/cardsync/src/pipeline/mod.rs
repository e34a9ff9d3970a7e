//! Image derivation pipeline.
//!
//! One externally hosted original per card is turned into a fixed chain of
//! resized variants: Original → Large → Medium → Small → Thumbnail. Every
//! stage skips itself when its output file already exists, which makes the
//! whole chain resumable and safe to re-run. Existence-on-disk is the entire
//! cache: a changed source image behind an unchanged uid is never detected.
//! That is an accepted limitation, not a bug; [`Pipeline::remove`] is the
//! manual escape hatch.

pub mod dirs;
pub mod error;
pub mod runner;

pub use dirs::{ImageDirs, Stage};
pub use error::{PipelineError, PipelineWarning};
pub use runner::{DeriveOutcome, Pipeline};
