//! Feature probes.
//!
//! `Detector` answers one capability question per method by querying the
//! injected [`BrowserEnvironmentPort`]. Environment failures never escape a
//! probe: they are logged and reported as "not supported".

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{BrowserCapabilities, CapabilityReport, DataUrlOutcome, FontSize};
use crate::ports::{BrowserEnvironmentPort, Dimensions, EnvironmentResult, ImageDecoderPort};
use crate::settings::DetectorSettings;

/// Transform property names in lookup priority order.
pub const TRANSFORM_PROPERTIES: [&str; 6] = [
    "transform",
    "MozTransform",
    "MsTransform",
    "msTransform",
    "WebkitTransform",
    "OTransform",
];

/// Animation property names; any one of them means support.
pub const ANIMATION_PROPERTIES: [&str; 2] = ["animationName", "webkitAnimationName"];

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

const ACTIVEX_PROG_ID: &str = "htmlfile";
const WIN64_PLATFORM: &str = "Win64";
// Presto-based Opera exposes this global; its SVG zoom and animated layers are broken.
const LEGACY_OPERA_GLOBAL: &str = "opera";

/// Log a failed environment query and fall back to the default answer.
fn or_absent<T: Default>(probe: &str, result: EnvironmentResult<T>) -> T {
    result.unwrap_or_else(|e| {
        debug!(probe, error = %e, "Environment query failed, treating capability as absent");
        T::default()
    })
}

/// Capability detector bound to one browsing environment.
pub struct Detector {
    env: Arc<dyn BrowserEnvironmentPort>,
    images: Arc<dyn ImageDecoderPort>,
    settings: DetectorSettings,
    transform_property: OnceLock<&'static str>,
}

impl Detector {
    /// Create a detector with default settings.
    pub fn new(env: Arc<dyn BrowserEnvironmentPort>, images: Arc<dyn ImageDecoderPort>) -> Self {
        Self {
            env,
            images,
            settings: DetectorSettings::with_defaults(),
            transform_property: OnceLock::new(),
        }
    }

    /// Replace the settings. Callers are expected to have validated them.
    #[must_use]
    pub fn with_settings(mut self, settings: DetectorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub const fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    pub fn is_placeholder_supported(&self) -> bool {
        or_absent(
            "placeholder",
            self.env.element_has_property("input", "placeholder"),
        )
    }

    /// First transform property the root style recognizes, or `""`.
    ///
    /// The environment is scanned on the first call only.
    pub fn css3_transform_property(&self) -> &'static str {
        *self
            .transform_property
            .get_or_init(|| self.scan_transform_property())
    }

    fn scan_transform_property(&self) -> &'static str {
        TRANSFORM_PROPERTIES
            .into_iter()
            .find(|name| or_absent("transform", self.env.root_style_has_property(name)))
            .unwrap_or("")
    }

    pub fn is_activex_enabled(&self) -> bool {
        or_absent("activex", self.env.create_activex_object(ACTIVEX_PROG_ID))
    }

    pub fn is_win64(&self) -> bool {
        self.env.navigator_platform().as_deref() == Some(WIN64_PLATFORM)
    }

    /// Whether the viewport exactly covers the screen.
    ///
    /// Missing or zero-sized measurements count as "not full screen".
    pub fn is_full_screen(&self) -> bool {
        match (self.env.inner_size(), self.env.screen_size()) {
            (Some(inner), Some(screen)) => {
                inner.is_measurable() && screen.is_measurable() && inner == screen
            }
            _ => false,
        }
    }

    /// IE10 in Windows 8 Metro mode runs full screen on Win64 with ActiveX off.
    pub fn is_ie_metro_mode(&self) -> bool {
        self.is_full_screen() && self.is_win64() && !self.is_activex_enabled()
    }

    fn is_legacy_opera(&self) -> bool {
        self.env.has_global(LEGACY_OPERA_GLOBAL)
    }

    pub fn is_svg_supported(&self) -> bool {
        if self.is_legacy_opera() {
            return false;
        }
        or_absent("inline-svg", self.env.inline_markup_namespace("<svg/>")).as_deref()
            == Some(SVG_NAMESPACE)
    }

    pub fn is_animation_supported(&self) -> bool {
        if self.is_legacy_opera() {
            return false;
        }
        ANIMATION_PROPERTIES
            .into_iter()
            .any(|name| or_absent("animation", self.env.root_style_has_property(name)))
    }

    pub fn is_touch_device(&self) -> bool {
        self.env.is_touch_device()
    }

    /// Measure the pixel height of `1em`.
    ///
    /// Fractional heights are truncated. Non-finite or negative readings
    /// are treated as a failed measurement.
    pub fn user_font_size(&self) -> Option<FontSize> {
        let measured = or_absent(
            "font-size",
            self.env.measure_element_height("1em").map(Some),
        )?;
        if !measured.is_finite() || measured < 0.0 || measured > f64::from(u32::MAX) {
            debug!(measured, "Discarding unusable font size measurement");
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let px = measured.trunc() as u32;
        Some(FontSize::new(
            px,
            self.settings.effective_default_font_size_px(),
        ))
    }

    /// Font-size bucket and exact pixel classes, space separated.
    pub fn user_font_size_classes(&self) -> Option<String> {
        self.user_font_size()
            .map(|size| size.class_pair(self.settings.effective_font_size_class_prefix()))
    }

    /// Run every synchronous probe once.
    pub fn capability_report(&self) -> CapabilityReport {
        let mut caps = BrowserCapabilities::empty();
        caps.set(
            BrowserCapabilities::PLACEHOLDER,
            self.is_placeholder_supported(),
        );

        let full_screen = self.is_full_screen();
        let win64 = self.is_win64();
        // ActiveX is only instantiated for metro candidates
        let activex = full_screen && win64 && self.is_activex_enabled();
        caps.set(BrowserCapabilities::FULL_SCREEN, full_screen);
        caps.set(BrowserCapabilities::WIN64, win64);
        caps.set(BrowserCapabilities::ACTIVEX, activex);
        caps.set(
            BrowserCapabilities::IE_METRO,
            full_screen && win64 && !activex,
        );

        caps.set(BrowserCapabilities::INLINE_SVG, self.is_svg_supported());
        caps.set(
            BrowserCapabilities::ANIMATION,
            self.is_animation_supported(),
        );
        caps.set(BrowserCapabilities::TOUCH, self.is_touch_device());

        let transform = self.css3_transform_property();
        let report = CapabilityReport {
            capabilities: caps,
            transform_property: (!transform.is_empty()).then(|| transform.to_string()),
            font_size: self.user_font_size(),
        };
        debug!(?report, "Capability probes finished");
        report
    }

    /// Check whether the known 1x1 GIF decodes from a `data:` URL.
    ///
    /// Resolves exactly once: on decode, on decode error, on timeout or on
    /// cancellation, whichever comes first.
    pub async fn check_data_url_support(&self, cancel: &CancellationToken) -> DataUrlOutcome {
        let src = self.settings.effective_probe_image_src();
        let limit = Duration::from_millis(self.settings.effective_data_url_timeout_ms());

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Data URL check cancelled");
                DataUrlOutcome::Cancelled
            }
            result = tokio::time::timeout(limit, self.images.decode(src)) => match result {
                Ok(Ok(size)) if size == Dimensions::new(1, 1) => DataUrlOutcome::Supported,
                Ok(Ok(size)) => {
                    debug!(
                        width = size.width,
                        height = size.height,
                        "Probe image has unexpected size"
                    );
                    DataUrlOutcome::Unsupported
                }
                Ok(Err(e)) => {
                    debug!(error = %e, "Probe image failed to decode");
                    DataUrlOutcome::Unsupported
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.settings.effective_data_url_timeout_ms(),
                        "Data URL check timed out"
                    );
                    DataUrlOutcome::TimedOut
                }
            },
        }
    }

    /// Callback form of [`Self::check_data_url_support`].
    ///
    /// `on_result` is invoked exactly once with `true` only for a 1x1 decode.
    pub async fn report_data_url_support<F>(&self, cancel: &CancellationToken, on_result: F)
    where
        F: FnOnce(bool) + Send,
    {
        let outcome = self.check_data_url_support(cancel).await;
        on_result(outcome.is_supported());
    }
}
