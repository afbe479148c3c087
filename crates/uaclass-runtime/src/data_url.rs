//! `data:` URL image decoding.
//!
//! Decodes the payload of a `data:` URL and reads the natural size from the
//! image header. Only the header is inspected; pixel data is never
//! decompressed. GIF and PNG are understood, which covers every probe image
//! in use.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;
use uaclass_core::ports::{Dimensions, ImageDecodeError, ImageDecoderPort};

const GIF87A: &[u8] = b"GIF87a";
const GIF89A: &[u8] = b"GIF89a";
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Media type and raw bytes of a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Split a `data:[<media type>][;base64],<data>` URL.
///
/// Non-base64 payloads are taken as literal bytes.
pub fn parse_data_url(src: &str) -> Result<DataUrl, ImageDecodeError> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| ImageDecodeError::InvalidDataUrl("missing data: scheme".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageDecodeError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let (media_type, is_base64) = match meta.strip_suffix(";base64") {
        Some(media_type) => (media_type, true),
        None => (meta, false),
    };

    let bytes = if is_base64 {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| ImageDecodeError::Base64(e.to_string()))?
    } else {
        payload.as_bytes().to_vec()
    };

    Ok(DataUrl {
        media_type: media_type.to_ascii_lowercase(),
        bytes,
    })
}

fn require_len(bytes: &[u8], expected: usize) -> Result<(), ImageDecodeError> {
    if bytes.len() < expected {
        return Err(ImageDecodeError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Read the logical screen size from a GIF header.
fn gif_dimensions(bytes: &[u8]) -> Result<Dimensions, ImageDecodeError> {
    require_len(bytes, 10)?;
    let width = u16::from_le_bytes([bytes[6], bytes[7]]);
    let height = u16::from_le_bytes([bytes[8], bytes[9]]);
    Ok(Dimensions::new(u32::from(width), u32::from(height)))
}

/// Read width and height from the PNG `IHDR` chunk.
fn png_dimensions(bytes: &[u8]) -> Result<Dimensions, ImageDecodeError> {
    require_len(bytes, 24)?;
    if &bytes[12..16] != b"IHDR" {
        return Err(ImageDecodeError::UnsupportedFormat(
            "PNG without leading IHDR chunk".to_string(),
        ));
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Ok(Dimensions::new(width, height))
}

/// Sniff the image format from its magic bytes and read its size.
pub fn image_dimensions(bytes: &[u8]) -> Result<Dimensions, ImageDecodeError> {
    if bytes.starts_with(GIF87A) || bytes.starts_with(GIF89A) {
        gif_dimensions(bytes)
    } else if bytes.starts_with(PNG_SIGNATURE) {
        png_dimensions(bytes)
    } else {
        Err(ImageDecodeError::UnsupportedFormat(
            "unrecognized image signature".to_string(),
        ))
    }
}

/// [`ImageDecoderPort`] that decodes `data:` URLs in process.
#[derive(Debug, Clone, Default)]
pub struct DataUrlImageDecoder;

impl DataUrlImageDecoder {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageDecoderPort for DataUrlImageDecoder {
    async fn decode(&self, src: &str) -> Result<Dimensions, ImageDecodeError> {
        let url = parse_data_url(src)?;
        let size = image_dimensions(&url.bytes)?;
        debug!(
            media_type = %url.media_type,
            width = size.width,
            height = size.height,
            "Decoded data URL image"
        );
        Ok(size)
    }
}
