//! Image port — cat detection on camera frames.

use catpoint_domain::error::CatpointError;
use catpoint_domain::image::Image;

/// Decides whether a camera frame shows a cat.
pub trait ImageAnalyzer {
    /// Return `true` when the image contains a cat with a confidence of at
    /// least `confidence_threshold` percent.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Analysis`] if the analyzer cannot process the
    /// image.
    fn image_contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, CatpointError>;
}
