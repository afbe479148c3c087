//! Browser capability flags and detection results.
//!
//! Capabilities describe what the current browsing environment can do.
//! Absence of a flag means the probe found no support or could not run;
//! both cases are treated the same way downstream.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::font_size::FontSize;

bitflags! {
    /// Boolean capabilities found by the synchronous probes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct BrowserCapabilities: u32 {
        /// `input` elements expose a `placeholder` property.
        const PLACEHOLDER = 0b0000_0001;

        /// The legacy `htmlfile` COM object could be instantiated.
        ///
        /// Only probed when the window is full screen on Win64, so this is
        /// unset everywhere else.
        const ACTIVEX     = 0b0000_0010;

        /// Navigator platform is exactly `Win64`.
        const WIN64       = 0b0000_0100;

        /// The viewport covers the whole screen.
        const FULL_SCREEN = 0b0000_1000;

        /// Full screen on Win64 with ActiveX disabled (IE10 in Metro mode).
        const IE_METRO    = 0b0001_0000;

        /// Inline `<svg>` markup yields elements in the SVG namespace.
        ///
        /// Never set on legacy Presto Opera.
        const INLINE_SVG  = 0b0010_0000;

        /// A CSS `animation-name` property is recognized.
        ///
        /// Never set on legacy Presto Opera.
        const ANIMATION   = 0b0100_0000;

        /// The host reported a touch device.
        const TOUCH       = 0b1000_0000;
    }
}

impl Default for BrowserCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for BrowserCapabilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BrowserCapabilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

impl BrowserCapabilities {
    pub const fn supports_placeholder(self) -> bool {
        self.contains(Self::PLACEHOLDER)
    }

    pub const fn is_ie_metro(self) -> bool {
        self.contains(Self::IE_METRO)
    }

    pub const fn supports_inline_svg(self) -> bool {
        self.contains(Self::INLINE_SVG)
    }

    pub const fn supports_animation(self) -> bool {
        self.contains(Self::ANIMATION)
    }

    pub const fn is_touch(self) -> bool {
        self.contains(Self::TOUCH)
    }
}

/// Result of one synchronous detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityReport {
    pub capabilities: BrowserCapabilities,

    /// First recognized transform property, e.g. `WebkitTransform`.
    pub transform_property: Option<String>,

    /// `None` when the measurement could not be taken.
    pub font_size: Option<FontSize>,
}

/// Outcome of the asynchronous data-URL image check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataUrlOutcome {
    /// The probe image decoded to exactly 1x1.
    Supported,
    /// Decoding failed or produced other dimensions.
    Unsupported,
    /// The decoder did not answer within the configured timeout.
    TimedOut,
    /// The caller cancelled the check.
    Cancelled,
}

impl DataUrlOutcome {
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Supported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let caps = BrowserCapabilities::default();
        assert!(caps.is_empty());
        assert!(!caps.supports_placeholder());
    }

    #[test]
    fn test_serde_roundtrip_as_bits() {
        let caps = BrowserCapabilities::PLACEHOLDER | BrowserCapabilities::TOUCH;
        let json = serde_json::to_string(&caps).unwrap();
        assert_eq!(json, "129");
        let back: BrowserCapabilities = serde_json::from_str(&json).unwrap();
        assert_eq!(back, caps);
    }

    #[test]
    fn test_unknown_bits_are_dropped() {
        let caps: BrowserCapabilities = serde_json::from_str("4294967295").unwrap();
        assert_eq!(caps, BrowserCapabilities::all());
    }

    #[test]
    fn test_only_supported_counts() {
        assert!(DataUrlOutcome::Supported.is_supported());
        assert!(!DataUrlOutcome::Unsupported.is_supported());
        assert!(!DataUrlOutcome::TimedOut.is_supported());
        assert!(!DataUrlOutcome::Cancelled.is_supported());
    }
}
