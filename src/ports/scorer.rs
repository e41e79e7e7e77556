//! Scorer port: Trait for risk scoring schemes.

use crate::domain::{HealthReadings, RiskScore, ScoringMethod};

/// Trait for turning validated readings into a risk score.
///
/// Implementations: weighted sum, rule points, and model-backed scoring.
pub trait RiskScorer: Send + Sync {
    /// The scheme this scorer implements.
    fn method(&self) -> ScoringMethod;

    /// Score a set of readings.
    ///
    /// Callers are expected to validate the readings first.
    ///
    /// # Errors
    /// Returns an error if the underlying model fails.
    fn score(&self, readings: &HealthReadings) -> crate::Result<RiskScore>;
}

impl<T: RiskScorer + ?Sized> RiskScorer for Box<T> {
    fn method(&self) -> ScoringMethod {
        (**self).method()
    }

    fn score(&self, readings: &HealthReadings) -> crate::Result<RiskScore> {
        (**self).score(readings)
    }
}
