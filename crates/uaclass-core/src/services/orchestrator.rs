//! Detection orchestration.
//!
//! Runs the probes in a fixed order, turns their answers into class tokens
//! and writes them to the document root in two phases:
//!
//! 1. the synchronous token string, committed in a single mutation;
//! 2. the `no-data-url` class, appended later if the asynchronous image
//!    check does not report support.
//!
//! The second phase never touches the [`TokenSet`] of the first.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::classes::{
    self, ANIMATION_YES, IE10_METRO, INLINE_SVG_NO, INLINE_SVG_YES, NO_DATA_URL, PLACEHOLDER_NO,
    PLACEHOLDER_YES, SCRIPT_MARKER, TOUCH,
};
use crate::domain::{CapabilityReport, DataUrlOutcome, TokenSet};
use crate::ports::DocumentRootPort;
use crate::services::Detector;

/// Everything one full run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub report: CapabilityReport,

    /// Token string committed in the synchronous phase.
    pub committed_tokens: String,

    pub data_url: DataUrlOutcome,

    /// Root class string after both phases.
    pub root_classes: String,
}

/// Build the synchronous token set from a capability report.
///
/// Insertion order is fixed: script marker, placeholder, metro mode, inline
/// SVG, animation, touch, font size.
pub fn tokens_from_report(report: &CapabilityReport, font_size_prefix: &str) -> TokenSet {
    let caps = report.capabilities;
    let mut tokens = TokenSet::new();

    tokens
        .add(SCRIPT_MARKER)
        .add(if caps.supports_placeholder() {
            PLACEHOLDER_YES
        } else {
            PLACEHOLDER_NO
        })
        .add_opt(caps.is_ie_metro().then_some(IE10_METRO))
        .add(if caps.supports_inline_svg() {
            INLINE_SVG_YES
        } else {
            INLINE_SVG_NO
        })
        .add_opt(caps.supports_animation().then_some(ANIMATION_YES))
        .add_opt(caps.is_touch().then_some(TOUCH))
        .add_opt(
            report
                .font_size
                .map(|size| size.class_pair(font_size_prefix)),
        );

    tokens
}

/// Sequences probes and applies their classes to the document root.
pub struct DetectionOrchestrator {
    detector: Arc<Detector>,
    document: Arc<dyn DocumentRootPort>,
}

impl DetectionOrchestrator {
    pub fn new(detector: Arc<Detector>, document: Arc<dyn DocumentRootPort>) -> Self {
        Self { detector, document }
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    fn synchronous_pass(&self) -> (CapabilityReport, TokenSet) {
        let report = self.detector.capability_report();
        let prefix = self.detector.settings().effective_font_size_class_prefix();
        let tokens = tokens_from_report(&report, prefix);
        (report, tokens)
    }

    /// Run the synchronous probes and return their tokens without writing
    /// anything to the page.
    pub fn collect_tokens(&self) -> TokenSet {
        self.synchronous_pass().1
    }

    fn commit_pass(&self) -> (CapabilityReport, String) {
        let (report, tokens) = self.synchronous_pass();
        let committed = tokens.get_all();

        let root = classes::commit_root_classes(&self.document.class_name(), &committed);
        self.document.set_class_name(&root);
        info!(classes = %committed, "Committed detected classes");

        (report, committed)
    }

    /// Run the synchronous probes and commit their tokens to the document
    /// root. Returns the committed token string.
    pub fn commit(&self) -> String {
        self.commit_pass().1
    }

    /// Full two-phase run: commit the synchronous classes, then await the
    /// data-URL check and append `no-data-url` unless it reported support.
    pub async fn run(&self, cancel: &CancellationToken) -> DetectionReport {
        let (report, committed_tokens) = self.commit_pass();

        let data_url = self.detector.check_data_url_support(cancel).await;
        if data_url.is_supported() {
            debug!("Data URL images supported");
        } else {
            let root = classes::append_root_class(&self.document.class_name(), NO_DATA_URL);
            self.document.set_class_name(&root);
            info!(outcome = ?data_url, "Data URL images unsupported, appended {}", NO_DATA_URL);
        }

        DetectionReport {
            report,
            committed_tokens,
            data_url,
            root_classes: self.document.class_name(),
        }
    }
}
