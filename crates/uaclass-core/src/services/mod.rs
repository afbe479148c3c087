//! Core services - detection logic layer.
//!
//! This module contains the services that orchestrate between ports
//! (trait interfaces) and domain logic. Services here are pure
//! orchestrators - they don't know about concrete environments.

mod detector;
mod orchestrator;

pub use detector::{ANIMATION_PROPERTIES, Detector, SVG_NAMESPACE, TRANSFORM_PROPERTIES};
pub use orchestrator::{DetectionOrchestrator, DetectionReport, tokens_from_report};
