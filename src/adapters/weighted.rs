//! Weighted-sum scorer.
//!
//! score = Σ weight · min(reading / cap, 1), rounded to two decimals,
//! then banded by the configured thresholds.

use crate::domain::scoring::{normalize, weighted_score};
use crate::domain::{
    HealthReadings, NormalizationCaps, RiskScore, ScoringMethod, Thresholds, Weights,
};
use crate::ports::RiskScorer;

/// Scorer for the weighted linear scheme.
#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    caps: NormalizationCaps,
    weights: Weights,
    thresholds: Thresholds,
}

impl WeightedScorer {
    /// Create a scorer with custom parameters.
    #[must_use]
    pub fn new(caps: NormalizationCaps, weights: Weights, thresholds: Thresholds) -> Self {
        Self {
            caps,
            weights,
            thresholds,
        }
    }
}

impl RiskScorer for WeightedScorer {
    fn method(&self) -> ScoringMethod {
        ScoringMethod::Weighted
    }

    fn score(&self, readings: &HealthReadings) -> crate::Result<RiskScore> {
        let normalized = normalize(readings, &self.caps);
        let value = weighted_score(&normalized, &self.weights);
        let level = self.thresholds.classify(value);

        tracing::debug!(
            "Weighted score {:.2} (moderate>={}, high>={}) -> {}",
            value,
            self.thresholds.moderate,
            self.thresholds.high,
            level
        );

        Ok(RiskScore::new(value, level))
    }
}
