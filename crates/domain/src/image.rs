//! Image — an opaque camera frame handed to cat detection.

/// Encoded image bytes as captured by a camera.
///
/// The domain never decodes the buffer; interpreting it is up to the
/// image-analysis adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
}

impl Image {
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_wrapped_bytes() {
        let image = Image::from_bytes(vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(image.as_bytes(), &[0xFF, 0xD8, 0xFF]);
        assert_eq!(image.len(), 3);
    }

    #[test]
    fn should_be_empty_by_default() {
        assert!(Image::default().is_empty());
    }
}
