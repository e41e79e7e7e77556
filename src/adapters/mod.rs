//! Adapters layer: Concrete implementations of ports.
//!
//! - `weighted`: weighted sum of normalized readings
//! - `rule_points`: discrete per-reading points
//! - `model`: pre-trained logistic model loaded from JSON

pub mod model;
pub mod rule_points;
pub mod weighted;

pub use model::{ClassifierScorer, LogisticModel};
pub use rule_points::RulePointScorer;
pub use weighted::WeightedScorer;
