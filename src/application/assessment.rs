//! Assessment service: Orchestrates a single risk assessment.
//!
//! This service coordinates:
//! - Reading validation
//! - Scoring through the configured scheme
//! - Attaching level guidance and per-reading tips

use crate::adapters::{ClassifierScorer, LogisticModel, RulePointScorer, WeightedScorer};
use crate::config::ScoringConfig;
use crate::domain::recommendations::{factor_tips, guidance_for};
use crate::domain::{Assessment, HealthReadings, ScoringMethod};
use crate::ports::RiskScorer;
use crate::VitalRiskError;

/// Build the scorer selected by `config`.
///
/// # Errors
/// Returns an error if the configuration is invalid or the model fails to load.
pub fn build_scorer(config: &ScoringConfig) -> crate::Result<Box<dyn RiskScorer>> {
    config.validate()?;

    let scorer: Box<dyn RiskScorer> = match config.method {
        ScoringMethod::Weighted => Box::new(WeightedScorer::new(
            config.caps,
            config.weights,
            config.thresholds,
        )),
        ScoringMethod::RulePoints => Box::new(RulePointScorer::new(config.rule_cutoffs)),
        ScoringMethod::Model => {
            let dir = config.model_dir.as_deref().ok_or_else(|| {
                VitalRiskError::Config("Model scoring requires model_dir".to_string())
            })?;
            Box::new(ClassifierScorer::new(LogisticModel::load(dir)?)?)
        }
    };

    tracing::info!("Using {} scoring", scorer.method());
    Ok(scorer)
}

/// Service for running risk assessments.
pub struct AssessmentService<S: RiskScorer> {
    scorer: S,
}

impl<S: RiskScorer> AssessmentService<S> {
    /// Create a new assessment service.
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// The scheme used by this service.
    #[must_use]
    pub fn method(&self) -> ScoringMethod {
        self.scorer.method()
    }

    /// Assess a set of readings.
    ///
    /// # Errors
    /// Returns `VitalRiskError::Validation` listing every out-of-range reading,
    /// or the scorer's error.
    pub fn assess(
        &self,
        subject_id: Option<&str>,
        readings: HealthReadings,
    ) -> crate::Result<Assessment> {
        if let Err(errors) = readings.validate() {
            tracing::warn!("Rejected readings: {} validation error(s)", errors.len());
            return Err(VitalRiskError::Validation(errors.join("; ")));
        }

        tracing::debug!(
            "Scoring readings: age={} systolic_bp={} cholesterol={} bmi={:.1}",
            readings.age,
            readings.systolic_bp,
            readings.cholesterol,
            readings.bmi
        );
        let score = self.scorer.score(&readings)?;

        let recommendations = guidance_for(score.level)
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let tips = factor_tips(&readings)
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut assessment =
            Assessment::new(self.scorer.method(), readings, score, recommendations, tips);
        if let Some(subject) = subject_id {
            assessment = assessment.with_subject(subject);
        }

        tracing::info!(
            "Assessment complete: method={}, score={:.2}, risk={}",
            assessment.method,
            assessment.score.value,
            assessment.score.level
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::{ExportedModel, MODEL_FILE};
    use crate::domain::{RiskLevel, FEATURE_NAMES};

    fn weighted_service() -> AssessmentService<Box<dyn RiskScorer>> {
        AssessmentService::new(build_scorer(&ScoringConfig::default()).expect("build scorer"))
    }

    #[test]
    fn test_reference_assessment() {
        let service = weighted_service();
        let assessment = service
            .assess(Some("patient-a"), HealthReadings::new(70.0, 160.0, 260.0, 32.0))
            .expect("assess");

        assert_eq!(assessment.method, ScoringMethod::Weighted);
        assert_eq!(assessment.level(), RiskLevel::High);
        assert!((assessment.score.value - 0.79).abs() < 1e-9);
        assert_eq!(assessment.recommendations.len(), 5);
        assert_eq!(
            assessment.recommendations[0],
            "Immediate physician consultation (AHA)"
        );
        assert_eq!(assessment.factor_tips.len(), 4);
        assert_eq!(assessment.subject_id.as_deref(), Some("patient-a"));
    }

    #[test]
    fn test_low_risk_gets_low_guidance() {
        let service = weighted_service();
        let assessment = service
            .assess(None, HealthReadings::new(10.0, 90.0, 100.0, 18.0))
            .expect("assess");

        assert_eq!(assessment.level(), RiskLevel::Low);
        assert_eq!(assessment.recommendations.len(), 4);
        assert_eq!(assessment.factor_tips.len(), 1);
        assert!(assessment.subject_id.is_none());
    }

    #[test]
    fn test_validation_lists_all_errors() {
        let service = weighted_service();
        let err = service
            .assess(None, HealthReadings::new(0.0, 400.0, 200.0, 25.0))
            .expect_err("must reject");

        match err {
            VitalRiskError::Validation(msg) => {
                assert!(msg.contains("Age"));
                assert!(msg.contains("Systolic BP"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rule_points_service() {
        let config = ScoringConfig {
            method: ScoringMethod::RulePoints,
            ..ScoringConfig::default()
        };
        let service = AssessmentService::new(build_scorer(&config).expect("build scorer"));
        let assessment = service
            .assess(None, HealthReadings::new(50.0, 125.0, 210.0, 23.0))
            .expect("assess");

        assert_eq!(service.method(), ScoringMethod::RulePoints);
        assert_eq!(assessment.level(), RiskLevel::Moderate);
    }

    #[test]
    fn test_model_service_from_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let export = ExportedModel {
            feature_names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            coefficients: vec![1.0, 1.0, 1.0, 1.0],
            intercept: 0.0,
            scaler_mean: vec![50.0, 130.0, 210.0, 26.0],
            scaler_scale: vec![10.0, 10.0, 10.0, 10.0],
        };
        std::fs::write(
            temp.path().join(MODEL_FILE),
            serde_json::to_vec(&export).expect("serialize"),
        )
        .expect("write model");

        let config = ScoringConfig {
            method: ScoringMethod::Model,
            model_dir: Some(temp.path().to_path_buf()),
            ..ScoringConfig::default()
        };
        let service = AssessmentService::new(build_scorer(&config).expect("build scorer"));
        let assessment = service
            .assess(None, HealthReadings::new(70.0, 160.0, 260.0, 32.0))
            .expect("assess");

        assert_eq!(assessment.method, ScoringMethod::Model);
        assert_eq!(assessment.level(), RiskLevel::High);
        assert!(assessment.score.probability.is_some());
    }

    #[test]
    fn test_model_service_missing_model() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = ScoringConfig {
            method: ScoringMethod::Model,
            model_dir: Some(temp.path().to_path_buf()),
            ..ScoringConfig::default()
        };
        assert!(matches!(
            build_scorer(&config),
            Err(VitalRiskError::Model(_))
        ));
    }
}
