//! Classifier port: Trait for pre-trained risk models.
//!
//! The model is a black box that maps a feature vector to binary class
//! probabilities. Concrete models live in `adapters::model`.

/// Error type for classifier operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Model integrity check failed: {0}")]
    Integrity(String),

    #[error("Invalid model parameters: {0}")]
    InvalidParameters(String),

    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureMismatch { got: usize, expected: usize },
}

/// Trait for binary risk classifiers.
///
/// Class 1 means elevated risk.
pub trait RiskClassifier: Send + Sync {
    /// Names of the input features, in the order `predict_proba` expects.
    fn feature_names(&self) -> &[String];

    /// Class probabilities `[p(class 0), p(class 1)]`.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureMismatch` if `features` has the wrong length.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError>;

    /// Predicted class label.
    ///
    /// Class 1 only when `p1 > 0.5`; an exact 0.5 stays class 0.
    ///
    /// # Errors
    /// Propagates errors from `predict_proba`.
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError> {
        let proba = self.predict_proba(features)?;
        Ok(u8::from(proba[1] > 0.5))
    }
}
