//! Health reading types for cardiovascular risk assessment.
//!
//! Four readings drive every scoring scheme: age, systolic blood pressure,
//! total cholesterol and body mass index.

use serde::{Deserialize, Serialize};

/// Clinical readings entered for one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HealthReadings {
    /// Age in years
    pub age: f64,

    /// Systolic blood pressure in mmHg
    pub systolic_bp: f64,

    /// Total cholesterol in mg/dL
    pub cholesterol: f64,

    /// Body mass index in kg/m²
    pub bmi: f64,
}

/// Height and weight, used when BMI is not entered directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    /// Height in centimetres
    pub height_cm: f64,

    /// Weight in kilograms
    pub weight_kg: f64,
}

impl BodyMeasurements {
    /// Body mass index: weight (kg) / height (m)².
    ///
    /// # Errors
    /// Returns an error if height or weight is not a positive finite number.
    pub fn bmi(&self) -> Result<f64, String> {
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(format!("Height {} cm must be positive", self.height_cm));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(format!("Weight {} kg must be positive", self.weight_kg));
        }

        let height_m = self.height_cm / 100.0;
        Ok(self.weight_kg / (height_m * height_m))
    }
}

impl HealthReadings {
    /// Create readings with BMI entered directly.
    #[must_use]
    pub fn new(age: f64, systolic_bp: f64, cholesterol: f64, bmi: f64) -> Self {
        Self {
            age,
            systolic_bp,
            cholesterol,
            bmi,
        }
    }

    /// Create readings deriving BMI from height and weight.
    ///
    /// # Errors
    /// Returns an error if the body measurements are unusable.
    pub fn from_body(
        age: f64,
        systolic_bp: f64,
        cholesterol: f64,
        body: &BodyMeasurements,
    ) -> Result<Self, String> {
        Ok(Self::new(age, systolic_bp, cholesterol, body.bmi()?))
    }

    /// Convert readings to a feature vector for classifier input.
    /// Order matches `FEATURE_NAMES`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.age, self.systolic_bp, self.cholesterol, self.bmi]
    }

    /// Validate that all readings are within plausible clinical ranges.
    ///
    /// # Errors
    /// Returns every violation found, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let checks: [(&str, f64, std::ops::RangeInclusive<f64>); 4] = [
            ("Age", self.age, 1.0..=120.0),
            ("Systolic BP", self.systolic_bp, 50.0..=260.0),
            ("Cholesterol", self.cholesterol, 50.0..=600.0),
            ("BMI", self.bmi, 10.0..=80.0),
        ];

        for (label, value, range) in checks {
            if !value.is_finite() {
                errors.push(format!("{label} must be a finite number"));
            } else if !range.contains(&value) {
                errors.push(format!(
                    "{label} {value} out of range [{}, {}]",
                    range.start(),
                    range.end()
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Classifier feature names, in `HealthReadings::to_vec` order.
pub const FEATURE_NAMES: [&str; 4] = ["age", "systolic_bp", "cholesterol", "bmi"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_to_vec_order() {
        let readings = HealthReadings::new(55.0, 138.0, 210.0, 27.5);
        let v = readings.to_vec();

        assert_eq!(v.len(), FEATURE_NAMES.len());
        assert!((v[0] - 55.0).abs() < f64::EPSILON);
        assert!((v[1] - 138.0).abs() < f64::EPSILON);
        assert!((v[2] - 210.0).abs() < f64::EPSILON);
        assert!((v[3] - 27.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmi_from_body() {
        let body = BodyMeasurements {
            height_cm: 180.0,
            weight_kg: 81.0,
        };
        let readings = HealthReadings::from_body(40.0, 120.0, 180.0, &body).expect("valid body");
        assert!((readings.bmi - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_rejects_zero_height() {
        let body = BodyMeasurements {
            height_cm: 0.0,
            weight_kg: 70.0,
        };
        assert!(body.bmi().is_err());
    }

    #[test]
    fn test_validation() {
        let valid = HealthReadings::new(55.0, 138.0, 210.0, 27.5);
        assert!(valid.validate().is_ok());

        // Above the normalization caps but still plausible.
        let saturating = HealthReadings::new(110.0, 240.0, 400.0, 55.0);
        assert!(saturating.validate().is_ok());

        let invalid = HealthReadings {
            age: 0.0,
            bmi: f64::NAN,
            ..HealthReadings::new(30.0, 120.0, 180.0, 22.0)
        };
        let errors = invalid.validate().expect_err("should reject");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Age"));
        assert!(errors[1].contains("finite"));
    }
}
