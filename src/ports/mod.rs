//! Ports layer: Trait definitions for scoring and model operations.
//!
//! These traits define the boundaries between the application and the
//! interchangeable scoring schemes, including the opaque pre-trained model.

mod classifier;
mod scorer;

pub use classifier::{ModelError, RiskClassifier};
pub use scorer::RiskScorer;
