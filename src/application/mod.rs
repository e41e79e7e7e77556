//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the assessment use case.

mod assessment;

pub use assessment::{build_scorer, AssessmentService};
