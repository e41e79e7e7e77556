//! Scoring arithmetic shared by the weighted and rule-point schemes.
//!
//! Readings are normalized into [0, 1] by dividing by a fixed cap and
//! saturating at 1. The weighted scheme combines the normalized values
//! linearly and bands the result with two thresholds.

use serde::{Deserialize, Serialize};

use super::{HealthReadings, RiskLevel};

/// Upper reference values used to normalize each reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationCaps {
    pub age: f64,
    pub cholesterol: f64,
    pub systolic_bp: f64,
    pub bmi: f64,
}

impl Default for NormalizationCaps {
    fn default() -> Self {
        Self {
            age: 100.0,
            cholesterol: 300.0,
            systolic_bp: 200.0,
            bmi: 40.0,
        }
    }
}

impl NormalizationCaps {
    /// Check that every cap is a positive finite number.
    ///
    /// # Errors
    /// Returns a message naming the first offending cap.
    pub fn validate(&self) -> Result<(), String> {
        for (name, cap) in [
            ("age", self.age),
            ("cholesterol", self.cholesterol),
            ("systolic_bp", self.systolic_bp),
            ("bmi", self.bmi),
        ] {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(format!("Normalization cap for {name} must be positive, got {cap}"));
            }
        }
        Ok(())
    }
}

/// Readings mapped into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReadings {
    pub age: f64,
    pub cholesterol: f64,
    pub systolic_bp: f64,
    pub bmi: f64,
}

/// Normalize readings with `min(x / cap, 1)`.
#[must_use]
pub fn normalize(readings: &HealthReadings, caps: &NormalizationCaps) -> NormalizedReadings {
    NormalizedReadings {
        age: (readings.age / caps.age).min(1.0),
        cholesterol: (readings.cholesterol / caps.cholesterol).min(1.0),
        systolic_bp: (readings.systolic_bp / caps.systolic_bp).min(1.0),
        bmi: (readings.bmi / caps.bmi).min(1.0),
    }
}

/// Linear weights applied to normalized readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub age: f64,
    pub cholesterol: f64,
    pub systolic_bp: f64,
    pub bmi: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            age: 0.30,
            cholesterol: 0.30,
            systolic_bp: 0.25,
            bmi: 0.15,
        }
    }
}

impl Weights {
    /// Tolerance when checking that weights sum to one.
    pub const SUM_TOLERANCE: f64 = 1e-6;

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.age + self.cholesterol + self.systolic_bp + self.bmi
    }

    /// Weights must be finite, non-negative and sum to one.
    ///
    /// # Errors
    /// Returns a description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in [
            ("age", self.age),
            ("cholesterol", self.cholesterol),
            ("systolic_bp", self.systolic_bp),
            ("bmi", self.bmi),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(format!("Weight for {name} must be non-negative, got {w}"));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(format!("Weights must sum to 1.0, got {total}"));
        }
        Ok(())
    }
}

/// Round to two decimals on the exact decimal value of `x`.
///
/// Formatting rounds the exact binary value (ties to even), so
/// 0.34500000000000003 becomes 0.35 while an exact 0.125 becomes 0.12.
/// Scaling by 100 first would shift both cases.
#[must_use]
pub fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse::<f64>().unwrap_or(x)
}

/// Weighted sum of normalized readings, rounded to two decimals.
#[must_use]
pub fn weighted_score(normalized: &NormalizedReadings, weights: &Weights) -> f64 {
    let raw = weights.age * normalized.age
        + weights.cholesterol * normalized.cholesterol
        + weights.systolic_bp * normalized.systolic_bp
        + weights.bmi * normalized.bmi;
    round2(raw)
}

/// Band boundaries for the weighted score.
///
/// A score equal to a boundary falls into the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            moderate: 0.35,
            high: 0.65,
        }
    }
}

impl Thresholds {
    /// Classify a score into a risk band.
    #[must_use]
    pub fn classify(&self, score: f64) -> RiskLevel {
        if score < self.moderate {
            RiskLevel::Low
        } else if score < self.high {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    /// Requires `0 <= moderate < high <= 1`.
    ///
    /// # Errors
    /// Returns a description of the violation.
    pub fn validate(&self) -> Result<(), String> {
        let ordered = self.moderate.is_finite()
            && self.high.is_finite()
            && 0.0 <= self.moderate
            && self.moderate < self.high
            && self.high <= 1.0;
        if ordered {
            Ok(())
        } else {
            Err(format!(
                "Thresholds must satisfy 0 <= moderate < high <= 1, got moderate={} high={}",
                self.moderate, self.high
            ))
        }
    }
}

/// Per-factor cutoffs for the rule-points scheme.
///
/// Each reading at or above its cutoff adds one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleCutoffs {
    pub systolic_bp: f64,
    pub cholesterol: f64,
    pub bmi: f64,
    pub age: f64,
}

impl Default for RuleCutoffs {
    fn default() -> Self {
        Self {
            systolic_bp: 130.0,
            cholesterol: 200.0,
            bmi: 25.0,
            age: 45.0,
        }
    }
}

impl RuleCutoffs {
    /// Maximum number of points a reading set can earn.
    pub const MAX_POINTS: u8 = 4;

    /// Every cutoff must be a positive finite number.
    ///
    /// # Errors
    /// Returns a message naming the first offending cutoff.
    pub fn validate(&self) -> Result<(), String> {
        for (name, cutoff) in [
            ("systolic_bp", self.systolic_bp),
            ("cholesterol", self.cholesterol),
            ("bmi", self.bmi),
            ("age", self.age),
        ] {
            if !cutoff.is_finite() || cutoff <= 0.0 {
                return Err(format!("Rule cutoff for {name} must be positive, got {cutoff}"));
            }
        }
        Ok(())
    }

    /// Count the readings at or above their cutoff.
    #[must_use]
    pub fn points(&self, readings: &HealthReadings) -> u8 {
        [
            readings.systolic_bp >= self.systolic_bp,
            readings.cholesterol >= self.cholesterol,
            readings.bmi >= self.bmi,
            readings.age >= self.age,
        ]
        .into_iter()
        .map(u8::from)
        .sum()
    }

    /// 0 points is Low, 1-2 Moderate, 3 or more High.
    #[must_use]
    pub fn classify_points(points: u8) -> RiskLevel {
        match points {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }
}
