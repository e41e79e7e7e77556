//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! All types are serializable and implement strict validation.

mod assessment;
pub mod recommendations;
mod readings;
pub mod scoring;

pub use assessment::{Assessment, RiskLevel, RiskScore, ScoringMethod};
pub use readings::{BodyMeasurements, HealthReadings, FEATURE_NAMES};
pub use scoring::{NormalizationCaps, RuleCutoffs, Thresholds, Weights};
