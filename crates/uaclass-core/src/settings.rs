//! Detector settings and validation.
//!
//! These are pure domain types with no infrastructure dependencies. Hosts
//! usually ship them as a small JSON document next to the page bundle.

use serde::{Deserialize, Serialize};

use crate::domain::classes::DEFAULT_FONT_SIZE_PREFIX;
use crate::domain::font_size::DEFAULT_FONT_SIZE_PX;

/// Default upper bound for the data-URL image check.
pub const DEFAULT_DATA_URL_TIMEOUT_MS: u64 = 5_000;

/// A 1x1 transparent GIF.
pub const DEFAULT_PROBE_IMAGE_SRC: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///ywAAAAAAQABAAACAUwAOw==";

/// Detector settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DetectorSettings {
    /// Time allowed for the data-URL image to decode, in milliseconds.
    pub data_url_timeout_ms: Option<u64>,

    /// Expected pixel height of `1em` with browser defaults.
    pub default_font_size_px: Option<u32>,

    /// Prefix for the two font-size classes.
    pub font_size_class_prefix: Option<String>,

    /// `data:` URL of the 1x1 image used by the data-URL check.
    pub probe_image_src: Option<String>,
}

impl DetectorSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            data_url_timeout_ms: Some(DEFAULT_DATA_URL_TIMEOUT_MS),
            default_font_size_px: Some(DEFAULT_FONT_SIZE_PX),
            font_size_class_prefix: Some(DEFAULT_FONT_SIZE_PREFIX.to_string()),
            probe_image_src: Some(DEFAULT_PROBE_IMAGE_SRC.to_string()),
        }
    }

    /// Parse settings from JSON, validating the result.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SettingsError::Malformed(e.to_string()))?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    #[must_use]
    pub const fn effective_data_url_timeout_ms(&self) -> u64 {
        match self.data_url_timeout_ms {
            Some(ms) => ms,
            None => DEFAULT_DATA_URL_TIMEOUT_MS,
        }
    }

    #[must_use]
    pub const fn effective_default_font_size_px(&self) -> u32 {
        match self.default_font_size_px {
            Some(px) => px,
            None => DEFAULT_FONT_SIZE_PX,
        }
    }

    #[must_use]
    pub fn effective_font_size_class_prefix(&self) -> &str {
        self.font_size_class_prefix
            .as_deref()
            .unwrap_or(DEFAULT_FONT_SIZE_PREFIX)
    }

    #[must_use]
    pub fn effective_probe_image_src(&self) -> &str {
        self.probe_image_src
            .as_deref()
            .unwrap_or(DEFAULT_PROBE_IMAGE_SRC)
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &DetectorSettingsUpdate) {
        if let Some(ref timeout) = other.data_url_timeout_ms {
            self.data_url_timeout_ms = *timeout;
        }
        if let Some(ref px) = other.default_font_size_px {
            self.default_font_size_px = *px;
        }
        if let Some(ref prefix) = other.font_size_class_prefix {
            self.font_size_class_prefix.clone_from(prefix);
        }
        if let Some(ref src) = other.probe_image_src {
            self.probe_image_src.clone_from(src);
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectorSettingsUpdate {
    pub data_url_timeout_ms: Option<Option<u64>>,
    pub default_font_size_px: Option<Option<u32>>,
    pub font_size_class_prefix: Option<Option<String>>,
    pub probe_image_src: Option<Option<String>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Data URL timeout must be between 1 and 60,000 ms, got {0}")]
    InvalidTimeout(u64),

    #[error("Default font size must be between 1 and 256 px, got {0}")]
    InvalidFontSize(u32),

    #[error("Font size class prefix must be non-empty and contain no whitespace")]
    InvalidClassPrefix,

    #[error("Probe image source must be a data: URL, got {0:?}")]
    InvalidProbeImage(String),

    #[error("Malformed settings: {0}")]
    Malformed(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &DetectorSettings) -> Result<(), SettingsError> {
    if let Some(timeout) = settings.data_url_timeout_ms {
        if !(1..=60_000).contains(&timeout) {
            return Err(SettingsError::InvalidTimeout(timeout));
        }
    }

    if let Some(px) = settings.default_font_size_px {
        if !(1..=256).contains(&px) {
            return Err(SettingsError::InvalidFontSize(px));
        }
    }

    // Class names cannot contain whitespace either, it would split the token
    if settings
        .font_size_class_prefix
        .as_ref()
        .is_some_and(|p| p.trim().is_empty() || p.contains(char::is_whitespace))
    {
        return Err(SettingsError::InvalidClassPrefix);
    }

    if let Some(ref src) = settings.probe_image_src {
        if !src.starts_with("data:") {
            return Err(SettingsError::InvalidProbeImage(src.clone()));
        }
    }

    Ok(())
}
