//! Integration tests for the full detection pipeline.
//!
//! Drives `DetectionOrchestrator` end to end through hand-written fakes of
//! the environment, image decoder and document root.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uaclass_core::{
    BrowserEnvironmentPort, CancellationToken, DataUrlOutcome, DetectionOrchestrator, Detector,
    DetectorSettings, Dimensions, DocumentRootPort, EnvironmentError, EnvironmentResult,
    ImageDecodeError, ImageDecoderPort,
};

#[derive(Default)]
struct FakeEnvironment {
    placeholder: bool,
    style_properties: Vec<&'static str>,
    activex: bool,
    platform: Option<&'static str>,
    inner: Option<Dimensions>,
    screen: Option<Dimensions>,
    globals: Vec<&'static str>,
    svg_namespace: Option<&'static str>,
    em_height: Option<f64>,
    touch: bool,
    style_queries: AtomicUsize,
}

impl BrowserEnvironmentPort for FakeEnvironment {
    fn element_has_property(&self, tag: &str, property: &str) -> EnvironmentResult<bool> {
        Ok(self.placeholder && tag == "input" && property == "placeholder")
    }

    fn root_style_has_property(&self, property: &str) -> EnvironmentResult<bool> {
        self.style_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.style_properties.iter().any(|p| *p == property))
    }

    fn create_activex_object(&self, _prog_id: &str) -> EnvironmentResult<bool> {
        if self.activex {
            Ok(true)
        } else {
            Err(EnvironmentError::Unavailable("ActiveXObject".to_string()))
        }
    }

    fn navigator_platform(&self) -> Option<String> {
        self.platform.map(str::to_string)
    }

    fn inner_size(&self) -> Option<Dimensions> {
        self.inner
    }

    fn screen_size(&self) -> Option<Dimensions> {
        self.screen
    }

    fn has_global(&self, name: &str) -> bool {
        self.globals.iter().any(|g| *g == name)
    }

    fn inline_markup_namespace(&self, _markup: &str) -> EnvironmentResult<Option<String>> {
        Ok(self.svg_namespace.map(str::to_string))
    }

    fn measure_element_height(&self, _css_height: &str) -> EnvironmentResult<f64> {
        self.em_height
            .ok_or_else(|| EnvironmentError::Measurement("no layout".to_string()))
    }

    fn is_touch_device(&self) -> bool {
        self.touch
    }
}

struct FixedDecoder(Result<Dimensions, ImageDecodeError>);

#[async_trait]
impl ImageDecoderPort for FixedDecoder {
    async fn decode(&self, _src: &str) -> Result<Dimensions, ImageDecodeError> {
        self.0.clone()
    }
}

struct SlowDecoder(Duration);

#[async_trait]
impl ImageDecoderPort for SlowDecoder {
    async fn decode(&self, _src: &str) -> Result<Dimensions, ImageDecodeError> {
        tokio::time::sleep(self.0).await;
        Ok(Dimensions::new(1, 1))
    }
}

#[derive(Default)]
struct RecordingDocument {
    class_name: Mutex<String>,
    writes: Mutex<Vec<String>>,
}

impl RecordingDocument {
    fn with_classes(initial: &str) -> Self {
        Self {
            class_name: Mutex::new(initial.to_string()),
            writes: Mutex::new(Vec::new()),
        }
    }
}

impl DocumentRootPort for RecordingDocument {
    fn class_name(&self) -> String {
        self.class_name.lock().unwrap().clone()
    }

    fn set_class_name(&self, value: &str) {
        *self.class_name.lock().unwrap() = value.to_string();
        self.writes.lock().unwrap().push(value.to_string());
    }
}

fn modern_browser() -> FakeEnvironment {
    FakeEnvironment {
        placeholder: true,
        style_properties: vec!["transform", "animationName"],
        platform: Some("MacIntel"),
        inner: Some(Dimensions::new(1280, 720)),
        screen: Some(Dimensions::new(1440, 900)),
        svg_namespace: Some("http://www.w3.org/2000/svg"),
        em_height: Some(16.0),
        ..Default::default()
    }
}

fn metro_ie10() -> FakeEnvironment {
    FakeEnvironment {
        placeholder: true,
        style_properties: vec!["msTransform", "animationName"],
        platform: Some("Win64"),
        inner: Some(Dimensions::new(1366, 768)),
        screen: Some(Dimensions::new(1366, 768)),
        svg_namespace: Some("http://www.w3.org/2000/svg"),
        em_height: Some(20.0),
        touch: true,
        ..Default::default()
    }
}

fn presto_opera() -> FakeEnvironment {
    FakeEnvironment {
        placeholder: true,
        style_properties: vec!["OTransform", "animationName"],
        globals: vec!["opera"],
        svg_namespace: Some("http://www.w3.org/2000/svg"),
        em_height: Some(12.0),
        ..Default::default()
    }
}

fn orchestrator(
    env: FakeEnvironment,
    decoder: impl ImageDecoderPort + 'static,
    document: Arc<RecordingDocument>,
) -> DetectionOrchestrator {
    let detector = Detector::new(Arc::new(env), Arc::new(decoder));
    DetectionOrchestrator::new(Arc::new(detector), document)
}

#[tokio::test]
async fn test_modern_browser_run() {
    let document = Arc::new(RecordingDocument::with_classes("i-ua_js_no page"));
    let orchestrator = orchestrator(
        modern_browser(),
        FixedDecoder(Ok(Dimensions::new(1, 1))),
        Arc::clone(&document),
    );

    let result = orchestrator.run(&CancellationToken::new()).await;

    assert_eq!(
        result.committed_tokens,
        "js i-ua_placeholder_yes i-ua_inlinesvg_yes m-svg i-ua_animation_yes \
         i-ua_user-font-size_normal i-ua_user-font-size_16px"
    );
    assert_eq!(result.data_url, DataUrlOutcome::Supported);
    assert_eq!(
        result.root_classes,
        format!("i-ua_js_yes page {}", result.committed_tokens)
    );
    assert_eq!(document.writes.lock().unwrap().len(), 1);
    assert_eq!(
        result.report.transform_property.as_deref(),
        Some("transform")
    );
}

#[tokio::test]
async fn test_metro_mode_run() {
    let document = Arc::new(RecordingDocument::with_classes("i-ua_js_no"));
    let orchestrator = orchestrator(
        metro_ie10(),
        FixedDecoder(Ok(Dimensions::new(1, 1))),
        Arc::clone(&document),
    );

    let result = orchestrator.run(&CancellationToken::new()).await;

    assert_eq!(
        result.committed_tokens,
        "js i-ua_placeholder_yes m-ie10-metro i-ua_inlinesvg_yes m-svg i-ua_animation_yes \
         m-touch i-ua_user-font-size_large i-ua_user-font-size_20px"
    );
    assert_eq!(result.report.transform_property.as_deref(), Some("msTransform"));
}

#[tokio::test]
async fn test_legacy_opera_gets_late_no_data_url() {
    let document = Arc::new(RecordingDocument::with_classes("i-ua_js_no"));
    let orchestrator = orchestrator(
        presto_opera(),
        FixedDecoder(Err(ImageDecodeError::LoadFailed("onerror".to_string()))),
        Arc::clone(&document),
    );

    let result = orchestrator.run(&CancellationToken::new()).await;

    assert_eq!(
        result.committed_tokens,
        "js i-ua_placeholder_yes i-ua_inlinesvg_no no-data-url \
         i-ua_user-font-size_small i-ua_user-font-size_12px"
    );
    assert_eq!(result.data_url, DataUrlOutcome::Unsupported);

    // Two separate mutations, the late one is not deduplicated against the first
    let writes = document.writes.lock().unwrap();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[1], format!("{} no-data-url", writes[0]));
    assert_eq!(result.root_classes.matches("no-data-url").count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_decoder_times_out() {
    let document = Arc::new(RecordingDocument::with_classes(""));
    let detector = Detector::new(
        Arc::new(modern_browser()),
        Arc::new(SlowDecoder(Duration::from_secs(30))),
    )
    .with_settings(DetectorSettings {
        data_url_timeout_ms: Some(100),
        ..DetectorSettings::with_defaults()
    });
    let orchestrator = DetectionOrchestrator::new(Arc::new(detector), document.clone());

    let result = orchestrator.run(&CancellationToken::new()).await;

    assert_eq!(result.data_url, DataUrlOutcome::TimedOut);
    assert!(result.root_classes.ends_with(" no-data-url"));
}

#[test]
fn test_collect_tokens_does_not_touch_document() {
    let document = Arc::new(RecordingDocument::with_classes("i-ua_js_no"));
    let orchestrator = orchestrator(
        FakeEnvironment::default(),
        FixedDecoder(Ok(Dimensions::new(1, 1))),
        Arc::clone(&document),
    );

    let tokens = orchestrator.collect_tokens();

    assert_eq!(
        tokens.get_all(),
        "js i-ua_placeholder_no i-ua_inlinesvg_no no-data-url"
    );
    assert!(document.writes.lock().unwrap().is_empty());
    assert_eq!(document.class_name(), "i-ua_js_no");
}

#[test]
fn test_transform_lookup_runs_once_across_passes() {
    let env = Arc::new(modern_browser());
    let detector = Detector::new(
        env.clone(),
        Arc::new(FixedDecoder(Ok(Dimensions::new(1, 1)))),
    );

    assert_eq!(detector.css3_transform_property(), "transform");
    let after_first = env.style_queries.load(Ordering::SeqCst);
    assert_eq!(detector.css3_transform_property(), "transform");
    assert_eq!(env.style_queries.load(Ordering::SeqCst), after_first);
}
