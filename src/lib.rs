//! # vitalrisk
//!
//! Cardiovascular health risk assessment from four basic readings:
//! age, systolic blood pressure, total cholesterol and BMI.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (readings, scoring arithmetic, assessments, guidance)
//! - `ports`: Trait definitions for scorers and pre-trained classifiers
//! - `adapters`: Weighted, rule-points and model-backed scorers
//! - `application`: The assessment use case
//! - `config`: Scoring configuration (JSON file + environment)

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::{Assessment, HealthReadings, RiskLevel, ScoringMethod};

/// Result type for vitalrisk operations
pub type Result<T> = std::result::Result<T, VitalRiskError>;

/// Main error type for vitalrisk
#[derive(Debug, thiserror::Error)]
pub enum VitalRiskError {
    #[error("Invalid health readings: {0}")]
    Validation(String),

    #[error("Model error: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
