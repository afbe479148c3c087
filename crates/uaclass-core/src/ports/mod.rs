//! Port definitions (trait abstractions) for the browsing environment.
//!
//! Ports define the interfaces that the detector expects from the host
//! page. They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No browser-binding types in any signature
//! - One query per method; policy lives in `services`
//! - Failures are reported as errors, never panics

pub mod document;
pub mod environment;
pub mod image_decoder;

pub use document::DocumentRootPort;
pub use environment::{BrowserEnvironmentPort, Dimensions, EnvironmentError, EnvironmentResult};
pub use image_decoder::{ImageDecodeError, ImageDecoderPort};

#[cfg(test)]
pub use document::MockDocumentRootPort;
#[cfg(test)]
pub use environment::MockBrowserEnvironmentPort;
#[cfg(test)]
pub use image_decoder::MockImageDecoderPort;
