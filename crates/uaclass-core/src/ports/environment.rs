//! Browsing environment port.
//!
//! This port abstracts every query the probes make against the live page
//! (element creation, style lookups, navigator and screen metadata) so the
//! detector can run against a real browser binding, a recorded snapshot,
//! or a test double.
//!
//! # Design Notes
//!
//! - Core owns the trait and its error type
//! - Adapters own the implementation (see `uaclass-runtime`)
//! - Every method is a single query; combining answers is the detector's job

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while querying the browsing environment.
///
/// The detector never propagates these; a failed query means the
/// capability is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    /// The queried object or API does not exist in this environment.
    #[error("Not available: {0}")]
    Unavailable(String),

    /// The environment refused the operation (e.g. COM instantiation).
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Layout measurement could not be taken.
    #[error("Measurement failed: {0}")]
    Measurement(String),
}

/// Result type for environment queries.
pub type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides are non-zero.
    pub const fn is_measurable(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Port for querying the browsing environment.
///
/// # Example
///
/// ```ignore
/// use uaclass_core::ports::BrowserEnvironmentPort;
///
/// fn is_webkit(env: &dyn BrowserEnvironmentPort) -> bool {
///     env.root_style_has_property("WebkitTransform").unwrap_or(false)
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait BrowserEnvironmentPort: Send + Sync {
    /// Whether a freshly created `tag` element exposes `property`.
    fn element_has_property(&self, tag: &str, property: &str) -> EnvironmentResult<bool>;

    /// Whether the document root's style object recognizes `property`.
    fn root_style_has_property(&self, property: &str) -> EnvironmentResult<bool>;

    /// Instantiate a legacy COM object by programmatic id.
    ///
    /// Returns `Ok(true)` only when a usable object was produced.
    fn create_activex_object(&self, prog_id: &str) -> EnvironmentResult<bool>;

    /// `navigator.platform`, when a navigator exists.
    fn navigator_platform(&self) -> Option<String>;

    /// Inner window size, when reported.
    fn inner_size(&self) -> Option<Dimensions>;

    /// Screen size, when reported.
    fn screen_size(&self) -> Option<Dimensions>;

    /// Whether a global with this name exists on the window object.
    fn has_global(&self, name: &str) -> bool;

    /// Namespace URI of the first child produced by setting `markup` as the
    /// inner HTML of a scratch element. `None` when no child was produced.
    fn inline_markup_namespace(&self, markup: &str) -> EnvironmentResult<Option<String>>;

    /// Rendered height in pixels of a scratch element styled with the given
    /// CSS `height`.
    ///
    /// Implementations insert the element into the document, read its
    /// offset height and remove it again before returning, leaving no
    /// residual DOM mutation.
    fn measure_element_height(&self, css_height: &str) -> EnvironmentResult<f64>;

    /// Touch capability as reported by the host page.
    fn is_touch_device(&self) -> bool;
}
