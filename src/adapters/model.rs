//! Pre-trained model adapter.
//!
//! Loads a logistic-regression export (`model.json`) and exposes it through
//! the `RiskClassifier` port. A `manifest.json` next to the model binds the
//! file by SHA-256; when present, the digest must match before the model is
//! accepted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{HealthReadings, RiskScore, ScoringMethod, FEATURE_NAMES};
use crate::ports::{ModelError, RiskClassifier, RiskScorer};

/// Default model file name inside a model directory.
pub const MODEL_FILE: &str = "model.json";

/// Integrity manifest file name inside a model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Refuse models that are not bound by a manifest.
const REQUIRE_MANIFEST_ENV: &str = "VITALRISK_REQUIRE_MODEL_MANIFEST";

/// Logistic-regression parameters as exported by the training pipeline.
///
/// Inputs are standardized with `(x - mean) / scale` before the linear term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
}

/// SHA-256 digests of the files that make up a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<i64>,
    pub files: BTreeMap<String, String>,
}

impl ModelManifest {
    pub const VERSION: u32 = 1;

    /// Build a manifest covering `files` inside `dir`.
    ///
    /// # Errors
    /// Returns `ModelError::Load` if a file cannot be read.
    pub fn for_files(dir: &Path, files: &[&str]) -> Result<Self, ModelError> {
        let mut digests = BTreeMap::new();
        for name in files {
            let bytes = std::fs::read(dir.join(name))
                .map_err(|e| ModelError::Load(format!("Failed to read {name}: {e}")))?;
            digests.insert((*name).to_string(), sha256_hex(&bytes));
        }
        Ok(Self {
            version: Self::VERSION,
            created_at: Some(chrono::Utc::now().timestamp()),
            files: digests,
        })
    }

    /// Validate the model at `path` (directory or file) and write
    /// `manifest.json` next to it, binding the model file under its own name.
    ///
    /// Returns the manifest path and the manifest written.
    ///
    /// # Errors
    /// Returns an error if the model is unreadable or invalid, or if the
    /// manifest cannot be written.
    pub fn write_for_model(path: &Path) -> Result<(PathBuf, Self), ModelError> {
        let (base_dir, model_path) = resolve_model_path(path);
        let file_name = model_file_name(&model_path)?;

        let content = std::fs::read(&model_path)
            .map_err(|e| ModelError::Load(format!("Failed to read {model_path:?}: {e}")))?;
        let export: ExportedModel = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Load(format!("Invalid {file_name}: {e}")))?;
        LogisticModel::from_export(export)?;

        let manifest = Self::for_files(&base_dir, &[file_name])?;
        let bytes = serde_json::to_vec_pretty(&manifest)
            .map_err(|e| ModelError::Load(format!("Failed to serialize {MANIFEST_FILE}: {e}")))?;

        let manifest_path = base_dir.join(MANIFEST_FILE);
        std::fs::write(&manifest_path, bytes)
            .map_err(|e| ModelError::Load(format!("Failed to write {manifest_path:?}: {e}")))?;

        tracing::info!("Wrote {:?} binding {}", manifest_path, file_name);
        Ok((manifest_path, manifest))
    }
}

/// Split a model location into `(base_dir, model_path)`.
///
/// A file path is used as is; a directory holds `model.json`.
#[must_use]
pub fn resolve_model_path(path: &Path) -> (PathBuf, PathBuf) {
    if path.is_file() {
        let dir = path.parent().unwrap_or(Path::new("."));
        (dir.to_path_buf(), path.to_path_buf())
    } else {
        (path.to_path_buf(), path.join(MODEL_FILE))
    }
}

fn model_file_name(model_path: &Path) -> Result<&str, ModelError> {
    model_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ModelError::Load(format!("Invalid model path {model_path:?}")))
}

fn parse_bool_env(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Logistic-regression classifier over `HealthReadings` features.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    params: ExportedModel,
}

impl LogisticModel {
    /// Build a model from exported parameters.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidParameters` if the parameters are
    /// inconsistent or do not describe the expected features.
    pub fn from_export(params: ExportedModel) -> Result<Self, ModelError> {
        let n = params.feature_names.len();
        if params.feature_names != FEATURE_NAMES {
            return Err(ModelError::InvalidParameters(format!(
                "Model features {:?} do not match expected {:?}",
                params.feature_names, FEATURE_NAMES
            )));
        }
        if params.coefficients.len() != n
            || params.scaler_mean.len() != n
            || params.scaler_scale.len() != n
        {
            return Err(ModelError::InvalidParameters(
                "Model parameter lengths do not match feature_names length".into(),
            ));
        }

        let all_finite = params.intercept.is_finite()
            && params
                .coefficients
                .iter()
                .chain(&params.scaler_mean)
                .chain(&params.scaler_scale)
                .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::InvalidParameters(
                "Model parameters must be finite".into(),
            ));
        }
        if params.scaler_scale.iter().any(|s| *s == 0.0) {
            return Err(ModelError::InvalidParameters(
                "scaler_scale entries must be non-zero".into(),
            ));
        }

        Ok(Self { params })
    }

    /// Load a model from a directory (or a model file path).
    ///
    /// # Errors
    /// Returns an error if the file is missing, malformed, fails its manifest
    /// check, or is unbound while a manifest is required.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let (base_dir, model_path) = resolve_model_path(path);

        let content = std::fs::read(&model_path)
            .map_err(|e| ModelError::Load(format!("Failed to read {model_path:?}: {e}")))?;

        Self::verify_manifest(&base_dir, &model_path, &content)?;

        let params: ExportedModel = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Load(format!("Invalid model format: {e}")))?;
        let model = Self::from_export(params)?;

        tracing::info!(
            "Loaded model from {:?} (n_features={})",
            model_path,
            model.params.feature_names.len()
        );
        Ok(model)
    }

    fn verify_manifest(
        base_dir: &Path,
        model_path: &Path,
        content: &[u8],
    ) -> Result<(), ModelError> {
        let manifest_path: PathBuf = base_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            if parse_bool_env(REQUIRE_MANIFEST_ENV) {
                return Err(ModelError::Integrity(format!(
                    "{MANIFEST_FILE} missing in {base_dir:?} and {REQUIRE_MANIFEST_ENV} is set"
                )));
            }
            tracing::warn!("No {} found, loading unverified model", MANIFEST_FILE);
            return Ok(());
        }

        let raw = std::fs::read(&manifest_path)
            .map_err(|e| ModelError::Load(format!("Failed to read manifest: {e}")))?;
        let manifest: ModelManifest = serde_json::from_slice(&raw)
            .map_err(|e| ModelError::Integrity(format!("Invalid manifest format: {e}")))?;

        if manifest.version != ModelManifest::VERSION {
            return Err(ModelError::Integrity(format!(
                "Unsupported manifest version {}",
                manifest.version
            )));
        }

        let file_name = model_file_name(model_path)?;
        let expected = manifest.files.get(file_name).ok_or_else(|| {
            ModelError::Integrity(format!("{MANIFEST_FILE} does not bind {file_name}"))
        })?;

        let actual = sha256_hex(content);
        if !constant_time_eq_str(&actual, &expected.to_ascii_lowercase()) {
            return Err(ModelError::Integrity(format!(
                "SHA-256 mismatch for {file_name}"
            )));
        }

        tracing::debug!("Model {} verified against manifest", file_name);
        Ok(())
    }
}

impl RiskClassifier for LogisticModel {
    fn feature_names(&self) -> &[String] {
        &self.params.feature_names
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        let n = self.params.feature_names.len();
        if features.len() != n {
            return Err(ModelError::FeatureMismatch {
                got: features.len(),
                expected: n,
            });
        }

        let z = features
            .iter()
            .enumerate()
            .fold(self.params.intercept, |acc, (i, x)| {
                let standardized = (x - self.params.scaler_mean[i]) / self.params.scaler_scale[i];
                acc + self.params.coefficients[i] * standardized
            });

        let p1 = sigmoid(z);
        Ok([1.0 - p1, p1])
    }
}

/// Scorer backed by a binary classifier.
pub struct ClassifierScorer<C: RiskClassifier> {
    classifier: C,
}

impl<C: RiskClassifier> ClassifierScorer<C> {
    /// Wrap `classifier`, which must take features in `FEATURE_NAMES` order.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidParameters` if the classifier reports
    /// different feature names or order.
    pub fn new(classifier: C) -> Result<Self, ModelError> {
        if classifier.feature_names() != FEATURE_NAMES {
            return Err(ModelError::InvalidParameters(format!(
                "Classifier features {:?} do not match expected {:?}",
                classifier.feature_names(),
                FEATURE_NAMES
            )));
        }
        Ok(Self { classifier })
    }
}

impl<C: RiskClassifier> RiskScorer for ClassifierScorer<C> {
    fn method(&self) -> ScoringMethod {
        ScoringMethod::Model
    }

    fn score(&self, readings: &HealthReadings) -> crate::Result<RiskScore> {
        let features = readings.to_vec();
        let proba = self.classifier.predict_proba(&features)?;
        let class = self.classifier.predict(&features)?;
        let score = RiskScore::from_prediction(class, proba);

        tracing::debug!(
            "Model probabilities p0={:.3} p1={:.3}, class {} -> {}",
            proba[0],
            proba[1],
            class,
            score.level
        );

        Ok(score)
    }
}
