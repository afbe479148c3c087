//! Concrete adapters for `uaclass-core`.
//!
//! - [`snapshot`]: a recorded browsing environment loadable from JSON
//! - [`data_url`]: in-process `data:` URL image decoding
//! - [`document`]: an in-memory document root
//! - [`bootstrap`]: composition helpers
//! - [`logging`]: tracing subscriber setup
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod data_url;
pub mod document;
pub mod logging;
pub mod snapshot;

pub use bootstrap::{build_orchestrator, detect_snapshot, load_settings};
pub use data_url::{DataUrl, DataUrlImageDecoder, image_dimensions, parse_data_url};
pub use document::InMemoryDocumentRoot;
pub use logging::{DEFAULT_LOG_FILTER, init_tracing};
pub use snapshot::EnvironmentSnapshot;

#[cfg(test)]
use tokio_test as _;
