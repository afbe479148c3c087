//! Recorded browsing environment.
//!
//! `EnvironmentSnapshot` implements `BrowserEnvironmentPort` from a plain
//! data record, typically captured from a real browser and stored as JSON.
//! It lets the full detection pipeline run server-side or in tests.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uaclass_core::ports::{BrowserEnvironmentPort, Dimensions, EnvironmentError, EnvironmentResult};

/// Markup whose parse result a snapshot records.
const RECORDED_SVG_MARKUP: &str = "<svg/>";

/// A recorded set of answers to environment queries.
///
/// Missing fields mean the environment did not provide that object or API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSnapshot {
    /// Properties exposed by freshly created elements, keyed by tag name.
    pub element_properties: HashMap<String, Vec<String>>,

    /// Properties recognized by the document root's style object.
    pub root_style_properties: Vec<String>,

    /// COM programmatic ids that can be instantiated. `None` when the
    /// environment has no `ActiveXObject` constructor at all.
    pub activex_objects: Option<Vec<String>>,

    pub navigator_platform: Option<String>,

    pub inner_size: Option<Dimensions>,

    pub screen_size: Option<Dimensions>,

    /// Names of notable window globals.
    pub globals: Vec<String>,

    /// Namespace URI of the element parsed from `<svg/>`, if any.
    pub inline_svg_namespace: Option<String>,

    /// Rendered height of `1em`. `None` when layout was unavailable.
    pub em_height_px: Option<f64>,

    pub touch: bool,
}

impl EnvironmentSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse environment snapshot")
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid snapshot {}", path.display()))
    }
}

impl BrowserEnvironmentPort for EnvironmentSnapshot {
    fn element_has_property(&self, tag: &str, property: &str) -> EnvironmentResult<bool> {
        Ok(self
            .element_properties
            .get(tag)
            .is_some_and(|props| props.iter().any(|p| p == property)))
    }

    fn root_style_has_property(&self, property: &str) -> EnvironmentResult<bool> {
        Ok(self.root_style_properties.iter().any(|p| p == property))
    }

    fn create_activex_object(&self, prog_id: &str) -> EnvironmentResult<bool> {
        let objects = self
            .activex_objects
            .as_ref()
            .ok_or_else(|| EnvironmentError::Unavailable("ActiveXObject".to_string()))?;
        if objects.iter().any(|id| id.eq_ignore_ascii_case(prog_id)) {
            Ok(true)
        } else {
            Err(EnvironmentError::AccessDenied(format!(
                "cannot create {prog_id}"
            )))
        }
    }

    fn navigator_platform(&self) -> Option<String> {
        self.navigator_platform.clone()
    }

    fn inner_size(&self) -> Option<Dimensions> {
        self.inner_size
    }

    fn screen_size(&self) -> Option<Dimensions> {
        self.screen_size
    }

    fn has_global(&self, name: &str) -> bool {
        self.globals.iter().any(|g| g == name)
    }

    fn inline_markup_namespace(&self, markup: &str) -> EnvironmentResult<Option<String>> {
        if markup != RECORDED_SVG_MARKUP {
            return Err(EnvironmentError::Unavailable(format!(
                "no recorded parse result for {markup}"
            )));
        }
        Ok(self.inline_svg_namespace.clone())
    }

    fn measure_element_height(&self, css_height: &str) -> EnvironmentResult<f64> {
        let em = self
            .em_height_px
            .ok_or_else(|| EnvironmentError::Measurement("layout not recorded".to_string()))?;

        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| EnvironmentError::Measurement(format!("bad height {css_height}")))
        };

        if let Some(value) = css_height.strip_suffix("em") {
            Ok(parse(value)? * em)
        } else if let Some(value) = css_height.strip_suffix("px") {
            parse(value)
        } else {
            Err(EnvironmentError::Measurement(format!(
                "unsupported height unit in {css_height}"
            )))
        }
    }

    fn is_touch_device(&self) -> bool {
        self.touch
    }
}
