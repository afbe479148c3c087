//! Browser capability detection encoded as document-root CSS classes.
//!
//! The crate is split the same way as its adapters see it:
//!
//! - [`domain`]: pure types and algorithms (token set, capability flags,
//!   font-size buckets, background color contrast)
//! - [`ports`]: traits the host implements to expose the browsing environment
//! - [`services`]: the [`Detector`] probes and the [`DetectionOrchestrator`]
//! - [`settings`]: tunables with validation
//!
//! ```
//! use uaclass_core::resolve_text_color;
//!
//! assert_eq!(resolve_text_color("#ffffff").unwrap().as_hex(), "#000");
//! assert_eq!(resolve_text_color("rgb(255, 0, 0)").unwrap().as_hex(), "#fff");
//! ```
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    BrowserCapabilities, CapabilityReport, ColorParseError, DataUrlOutcome, FontSize,
    FontSizeBucket, Rgb, TextColor, TokenSet, parse_color, resolve_text_color,
};
pub use ports::{
    BrowserEnvironmentPort, Dimensions, DocumentRootPort, EnvironmentError, EnvironmentResult,
    ImageDecodeError, ImageDecoderPort,
};
pub use services::{DetectionOrchestrator, DetectionReport, Detector, tokens_from_report};
pub use settings::{
    DEFAULT_DATA_URL_TIMEOUT_MS, DEFAULT_PROBE_IMAGE_SRC, DetectorSettings, DetectorSettingsUpdate,
    SettingsError, validate_settings,
};

// Re-exported so adapters and hosts share one cancellation type
pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
use tokio_test as _;
