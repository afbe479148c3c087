//! Image decoder port.
//!
//! Abstracts "load this image source and tell me its natural size", which
//! is the only asynchronous operation detection needs.

use async_trait::async_trait;
use thiserror::Error;

use super::environment::Dimensions;

/// Errors that can occur while decoding an image source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageDecodeError {
    /// The source is not a well-formed `data:` URL.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The payload is not valid base64.
    #[error("Base64 decode failed: {0}")]
    Base64(String),

    /// The payload is not an image format the decoder understands.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The payload ended before the image header was complete.
    #[error("Truncated image data: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The host failed to load the image (the `onerror` path).
    #[error("Image failed to load: {0}")]
    LoadFailed(String),
}

/// Port for decoding an image source into its dimensions.
///
/// Implementations resolve exactly once per call, on both success and
/// failure. Timeouts are applied by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageDecoderPort: Send + Sync {
    /// Load `src` and return its decoded width and height.
    async fn decode(&self, src: &str) -> Result<Dimensions, ImageDecodeError>;
}
