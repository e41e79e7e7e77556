//! Scoring configuration.
//!
//! Defaults reproduce the reference scheme exactly. A JSON file may override
//! any subset of fields, and a few environment variables override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{NormalizationCaps, RuleCutoffs, ScoringMethod, Thresholds, Weights};
use crate::VitalRiskError;

const METHOD_ENV: &str = "VITALRISK_METHOD";
const MODEL_DIR_ENV: &str = "VITALRISK_MODEL_DIR";
const MODERATE_THRESHOLD_ENV: &str = "VITALRISK_MODERATE_THRESHOLD";
const HIGH_THRESHOLD_ENV: &str = "VITALRISK_HIGH_THRESHOLD";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub method: ScoringMethod,
    pub caps: NormalizationCaps,
    pub weights: Weights,
    pub thresholds: Thresholds,
    pub rule_cutoffs: RuleCutoffs,
    /// Directory (or file) holding `model.json`; required for model scoring
    pub model_dir: Option<PathBuf>,
}

impl ScoringConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        tracing::debug!("Loaded scoring config from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    /// Returns `VitalRiskError::Config` if a variable holds an unparsable value.
    pub fn apply_env_overrides(&mut self) -> crate::Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// # Errors
    /// Returns `VitalRiskError::Config` if a value cannot be parsed.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(METHOD_ENV) {
            self.method = v
                .parse()
                .map_err(|e| VitalRiskError::Config(format!("{METHOD_ENV}: {e}")))?;
        }
        if let Some(v) = lookup(MODEL_DIR_ENV) {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                self.model_dir = Some(PathBuf::from(trimmed));
            }
        }
        if let Some(v) = lookup(MODERATE_THRESHOLD_ENV) {
            self.thresholds.moderate = parse_f64(MODERATE_THRESHOLD_ENV, &v)?;
        }
        if let Some(v) = lookup(HIGH_THRESHOLD_ENV) {
            self.thresholds.high = parse_f64(HIGH_THRESHOLD_ENV, &v)?;
        }
        Ok(())
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    /// Returns `VitalRiskError::Config` describing the first problem found.
    pub fn validate(&self) -> crate::Result<()> {
        self.caps.validate().map_err(VitalRiskError::Config)?;
        self.weights.validate().map_err(VitalRiskError::Config)?;
        self.thresholds.validate().map_err(VitalRiskError::Config)?;
        self.rule_cutoffs.validate().map_err(VitalRiskError::Config)?;

        if self.method == ScoringMethod::Model && self.model_dir.is_none() {
            return Err(VitalRiskError::Config(format!(
                "Model scoring requires model_dir (or {MODEL_DIR_ENV})"
            )));
        }
        Ok(())
    }
}

fn parse_f64(name: &str, value: &str) -> crate::Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| VitalRiskError::Config(format!("{name}: {e}")))
}
