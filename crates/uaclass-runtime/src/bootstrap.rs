//! Wiring helpers for hosts.
//!
//! Builds a ready-to-run `DetectionOrchestrator` from adapters and a
//! settings file, so embedders don't repeat the composition.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use uaclass_core::ports::{BrowserEnvironmentPort, DocumentRootPort};
use uaclass_core::{
    CancellationToken, DetectionOrchestrator, DetectionReport, Detector, DetectorSettings,
    validate_settings,
};

use crate::data_url::DataUrlImageDecoder;
use crate::document::InMemoryDocumentRoot;
use crate::snapshot::EnvironmentSnapshot;

/// Load and validate detector settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<DetectorSettings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    DetectorSettings::from_json(&json)
        .with_context(|| format!("Invalid settings {}", path.display()))
}

/// Compose an orchestrator around the in-process data URL decoder.
pub fn build_orchestrator(
    env: Arc<dyn BrowserEnvironmentPort>,
    document: Arc<dyn DocumentRootPort>,
    settings: DetectorSettings,
) -> Result<DetectionOrchestrator> {
    validate_settings(&settings)?;
    let detector = Detector::new(env, Arc::new(DataUrlImageDecoder::new())).with_settings(settings);
    Ok(DetectionOrchestrator::new(Arc::new(detector), document))
}

/// Run full detection against a recorded environment.
///
/// `initial_classes` is the root class string as served (normally
/// containing `i-ua_js_no`).
pub async fn detect_snapshot(
    snapshot: EnvironmentSnapshot,
    initial_classes: &str,
    settings: DetectorSettings,
) -> Result<DetectionReport> {
    let document = Arc::new(InMemoryDocumentRoot::new(initial_classes));
    let orchestrator = build_orchestrator(Arc::new(snapshot), document, settings)?;
    let report = orchestrator.run(&CancellationToken::new()).await;
    info!(classes = %report.root_classes, "Snapshot detection finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use uaclass_core::DataUrlOutcome;

    #[test]
    fn test_load_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"data_url_timeout_ms": 250}"#).unwrap();
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.effective_data_url_timeout_ms(), 250);
    }

    #[test]
    fn test_load_settings_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"default_font_size_px": 0}"#).unwrap();
        assert!(load_settings(file.path()).is_err());
    }

    #[test]
    fn test_build_rejects_invalid_settings() {
        let settings = DetectorSettings {
            font_size_class_prefix: Some(String::new()),
            ..Default::default()
        };
        let result = build_orchestrator(
            Arc::new(EnvironmentSnapshot::default()),
            Arc::new(InMemoryDocumentRoot::default()),
            settings,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_detect_snapshot() {
        let snapshot = EnvironmentSnapshot {
            root_style_properties: vec!["WebkitTransform".to_string()],
            em_height_px: Some(16.0),
            ..Default::default()
        };
        let report = detect_snapshot(snapshot, "i-ua_js_no", DetectorSettings::with_defaults())
            .await
            .unwrap();

        assert_eq!(report.data_url, DataUrlOutcome::Supported);
        assert_eq!(
            report.root_classes,
            "i-ua_js_yes js i-ua_placeholder_no i-ua_inlinesvg_no no-data-url \
             i-ua_user-font-size_normal i-ua_user-font-size_16px"
        );
        assert_eq!(
            report.report.transform_property.as_deref(),
            Some("WebkitTransform")
        );
    }
}
