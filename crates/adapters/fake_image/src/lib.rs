//! # catpoint-adapter-fake-image
//!
//! Stand-in [`ImageAnalyzer`] that needs no recognition model.
//!
//! The analyzer derives a stable pseudo-confidence in `0..=100` from the
//! image bytes (FNV-1a hash), so the same frame always yields the same
//! verdict. It can also be pinned to a fixed verdict for demos.
//!
//! ## Dependency rule
//!
//! Depends on `catpoint-app` (port traits) and `catpoint-domain` only.

use catpoint_app::ports::ImageAnalyzer;
use catpoint_domain::error::CatpointError;
use catpoint_domain::image::Image;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Errors specific to the fake analyzer.
#[derive(Debug, thiserror::Error)]
pub enum FakeImageError {
    /// The frame contained no bytes.
    #[error("image is empty")]
    EmptyImage,

    /// The confidence threshold was outside `0..=100` or not a number.
    #[error("confidence threshold {0} out of range")]
    InvalidThreshold(f32),
}

impl From<FakeImageError> for CatpointError {
    fn from(err: FakeImageError) -> Self {
        Self::Analysis(Box::new(err))
    }
}

/// Deterministic cat detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeImageAnalyzer {
    verdict: Option<bool>,
}

impl FakeImageAnalyzer {
    /// Analyzer scoring images by their content hash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer that reports `verdict` for every non-empty image.
    #[must_use]
    pub fn always(verdict: bool) -> Self {
        Self {
            verdict: Some(verdict),
        }
    }

    /// Pseudo-confidence in percent that `image` shows a cat.
    #[must_use]
    pub fn confidence(image: &Image) -> f32 {
        let hash = image
            .as_bytes()
            .iter()
            .fold(FNV_OFFSET, |acc, &b| (acc ^ u64::from(b)).wrapping_mul(FNV_PRIME));
        // hash % 101 fits in a u8
        f32::from(u8::try_from(hash % 101).unwrap_or(0))
    }
}

impl ImageAnalyzer for FakeImageAnalyzer {
    fn image_contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, CatpointError> {
        if !(0.0..=100.0).contains(&confidence_threshold) {
            return Err(FakeImageError::InvalidThreshold(confidence_threshold).into());
        }
        if image.is_empty() {
            return Err(FakeImageError::EmptyImage.into());
        }

        let contains_cat = match self.verdict {
            Some(verdict) => verdict,
            None => Self::confidence(image) >= confidence_threshold,
        };
        tracing::debug!(
            bytes = image.len(),
            confidence_threshold,
            contains_cat,
            "fake image analysis"
        );
        Ok(contains_cat)
    }
}
