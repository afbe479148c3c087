//! User font-size classification.
//!
//! Browsers render `1em` as 16px unless the user changed the default font
//! size. The measured pixel value is bucketed relative to that default.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Browser default for `1em`, in pixels.
pub const DEFAULT_FONT_SIZE_PX: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSizeBucket {
    Small,
    Normal,
    Large,
}

impl FontSizeBucket {
    /// Bucket a measured size against the expected default.
    pub const fn classify(measured_px: u32, default_px: u32) -> Self {
        if measured_px == default_px {
            Self::Normal
        } else if measured_px < default_px {
            Self::Small
        } else {
            Self::Large
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for FontSizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measured user font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSize {
    pub px: u32,
    pub bucket: FontSizeBucket,
}

impl FontSize {
    pub const fn new(px: u32, default_px: u32) -> Self {
        Self {
            px,
            bucket: FontSizeBucket::classify(px, default_px),
        }
    }

    /// The class pair, e.g. `i-ua_user-font-size_large i-ua_user-font-size_20px`.
    pub fn class_pair(&self, prefix: &str) -> String {
        format!(
            "{prefix}{bucket} {prefix}{px}px",
            bucket = self.bucket,
            px = self.px
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classes::DEFAULT_FONT_SIZE_PREFIX;

    #[test]
    fn test_classify() {
        assert_eq!(FontSizeBucket::classify(16, 16), FontSizeBucket::Normal);
        assert_eq!(FontSizeBucket::classify(12, 16), FontSizeBucket::Small);
        assert_eq!(FontSizeBucket::classify(20, 16), FontSizeBucket::Large);
    }

    #[test]
    fn test_class_pair_normal() {
        let pair = FontSize::new(16, DEFAULT_FONT_SIZE_PX).class_pair(DEFAULT_FONT_SIZE_PREFIX);
        assert_eq!(pair, "i-ua_user-font-size_normal i-ua_user-font-size_16px");
    }

    #[test]
    fn test_class_pair_large() {
        let pair = FontSize::new(20, DEFAULT_FONT_SIZE_PX).class_pair(DEFAULT_FONT_SIZE_PREFIX);
        assert!(pair.contains("_large"));
        assert!(pair.contains("_20px"));
    }

    #[test]
    fn test_custom_default() {
        assert_eq!(FontSize::new(18, 18).bucket, FontSizeBucket::Normal);
        assert_eq!(FontSize::new(16, 18).bucket, FontSizeBucket::Small);
    }
}
