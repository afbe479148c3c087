//! Class names written to the document root.
//!
//! These strings are consumed by stylesheets, so they are part of the public
//! contract and must not change between releases.

/// Always the first token of a detection pass.
pub const SCRIPT_MARKER: &str = "js";

/// Marker present in server-rendered markup before scripts run.
pub const ROOT_NO_SCRIPT: &str = "i-ua_js_no";
/// Replacement for [`ROOT_NO_SCRIPT`] once detection has committed.
pub const ROOT_SCRIPT_ENABLED: &str = "i-ua_js_yes";

pub const PLACEHOLDER_YES: &str = "i-ua_placeholder_yes";
pub const PLACEHOLDER_NO: &str = "i-ua_placeholder_no";

pub const IE10_METRO: &str = "m-ie10-metro";

pub const INLINE_SVG_YES: &str = "i-ua_inlinesvg_yes m-svg";
// Engines without inline SVG are also the ones that choke on data URLs.
pub const INLINE_SVG_NO: &str = "i-ua_inlinesvg_no no-data-url";

pub const ANIMATION_YES: &str = "i-ua_animation_yes";

pub const TOUCH: &str = "m-touch";

/// Appended after the asynchronous data-URL check fails.
pub const NO_DATA_URL: &str = "no-data-url";

/// Prefix of both font-size classes.
pub const DEFAULT_FONT_SIZE_PREFIX: &str = "i-ua_user-font-size_";

/// Apply a committed token string to an existing root class string.
///
/// The first [`ROOT_NO_SCRIPT`] marker becomes [`ROOT_SCRIPT_ENABLED`], then
/// the tokens are appended after a single space.
pub fn commit_root_classes(existing: &str, tokens: &str) -> String {
    let marked = existing.replacen(ROOT_NO_SCRIPT, ROOT_SCRIPT_ENABLED, 1);
    format!("{marked} {tokens}")
}

/// Append one more class fragment to a root class string.
pub fn append_root_class(existing: &str, class: &str) -> String {
    format!("{existing} {class}")
}
