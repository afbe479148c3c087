//! Background color parsing and readable text color selection.
//!
//! Accepts the two textual forms produced by computed styles and design
//! tokens: the `rgb()`/`rgba()` functional form and `#rgb`/`#rrggbb` hex.
//! The readability decision uses the perceptual luma weights
//! `0.299 R + 0.587 G + 0.114 B`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static RGB_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^rgba?\((.+)\)$").expect("valid rgb pattern"));

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex pattern"));

/// Contrast scores below this value mean the background is light.
const LIGHT_BACKGROUND_THRESHOLD: f64 = 0.5;

/// Errors produced while parsing a background color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    /// Neither the `rgb()`/`rgba()` form nor the hex form matched.
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),

    #[error("expected 3 or 4 color components, got {0}")]
    InvalidComponentCount(usize),

    #[error("color component out of range: {0:?}")]
    ChannelOutOfRange(String),
}

/// An sRGB color with 8-bit channels. Alpha is accepted on input but not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in `0.0..=255.0`.
    #[must_use]
    pub fn luma(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// `1 - luma / 255`: 0.0 for white, 1.0 for black.
    #[must_use]
    pub fn contrast_score(self) -> f64 {
        1.0 - self.luma() / 255.0
    }

    /// Pick the text color that reads best on this background.
    #[must_use]
    pub fn text_color(self) -> TextColor {
        if self.contrast_score() < LIGHT_BACKGROUND_THRESHOLD {
            TextColor::Black
        } else {
            TextColor::White
        }
    }
}

/// The two text colors the resolver chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    /// Short hex literal used in stylesheets.
    pub const fn as_hex(self) -> &'static str {
        match self {
            Self::Black => "#000",
            Self::White => "#fff",
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_hex())
    }
}

/// Parse the arguments of an `rgb()`/`rgba()` call.
///
/// Whitespace is ignored anywhere. The optional fourth component must be a
/// number or a percentage but otherwise plays no part in the result.
fn parse_rgb_args(args: &str) -> Result<Rgb, ColorParseError> {
    let compact: String = args.chars().filter(|c| !c.is_whitespace()).collect();
    let parts: Vec<&str> = compact.split(',').collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(ColorParseError::InvalidComponentCount(parts.len()));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |raw: &str| -> Result<u8, ColorParseError> {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && (0.0..=255.0).contains(v))
            // rgb(127.6, ...) behaves like the integer part, as layout engines do
            .map(|v| v.trunc() as u8)
            .ok_or_else(|| ColorParseError::ChannelOutOfRange(raw.to_string()))
    };

    let rgb = Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);

    if let Some(alpha) = parts.get(3) {
        let number = alpha.strip_suffix('%').unwrap_or(*alpha);
        if !number.parse::<f64>().is_ok_and(f64::is_finite) {
            return Err(ColorParseError::ChannelOutOfRange((*alpha).to_string()));
        }
    }

    Ok(rgb)
}

/// Parse hex digits (without the `#`). Channel width is `len / 3`.
fn parse_hex_digits(digits: &str) -> Result<Rgb, ColorParseError> {
    let width = digits.len() / 3;
    let mut channels = [0u8; 3];

    for (i, slot) in channels.iter_mut().enumerate() {
        let raw = &digits[i * width..(i + 1) * width];
        let value = u8::from_str_radix(raw, 16)
            .map_err(|_| ColorParseError::ChannelOutOfRange(raw.to_string()))?;
        // #abc is shorthand for #aabbcc
        *slot = if width == 1 { value * 17 } else { value };
    }

    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}

/// Parse a background color string.
///
/// Accepted forms:
/// * `rgb(r, g, b)`
/// * `rgba(r, g, b, a)`
/// * `#rgb`
/// * `#rrggbb`
///
/// Named colors are not supported.
pub fn parse_color(input: &str) -> Result<Rgb, ColorParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(caps) = RGB_FUNCTION.captures(s) {
        return parse_rgb_args(&caps[1]);
    }

    if let Some(caps) = HEX_COLOR.captures(s) {
        return parse_hex_digits(&caps[1]);
    }

    Err(ColorParseError::InvalidColorFormat(input.to_string()))
}

/// Resolve the readable text color for a background color string.
pub fn resolve_text_color(background: &str) -> Result<TextColor, ColorParseError> {
    parse_color(background).map(Rgb::text_color)
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl TryFrom<&str> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_color(value)
    }
}
