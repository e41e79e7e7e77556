//! Rule-points scorer.
//!
//! Each reading at or above its cutoff adds one point; the point total picks
//! the band.

use crate::domain::{HealthReadings, RiskScore, RuleCutoffs, ScoringMethod};
use crate::ports::RiskScorer;

#[derive(Debug, Clone, Default)]
pub struct RulePointScorer {
    cutoffs: RuleCutoffs,
}

impl RulePointScorer {
    #[must_use]
    pub fn new(cutoffs: RuleCutoffs) -> Self {
        Self { cutoffs }
    }
}

impl RiskScorer for RulePointScorer {
    fn method(&self) -> ScoringMethod {
        ScoringMethod::RulePoints
    }

    fn score(&self, readings: &HealthReadings) -> crate::Result<RiskScore> {
        let points = self.cutoffs.points(readings);
        let level = RuleCutoffs::classify_points(points);

        tracing::debug!("Rule points {}/{} -> {}", points, RuleCutoffs::MAX_POINTS, level);

        Ok(RiskScore::new(
            f64::from(points) / f64::from(RuleCutoffs::MAX_POINTS),
            level,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    #[test]
    fn test_points_to_levels() {
        let scorer = RulePointScorer::default();

        let low = scorer
            .score(&HealthReadings::new(30.0, 118.0, 170.0, 22.0))
            .expect("score");
        assert_eq!(low.level, RiskLevel::Low);
        assert_eq!(low.value, 0.0);

        let moderate = scorer
            .score(&HealthReadings::new(50.0, 125.0, 210.0, 23.0))
            .expect("score");
        assert_eq!(moderate.level, RiskLevel::Moderate);
        assert!((moderate.value - 0.5).abs() < f64::EPSILON);

        let high = scorer
            .score(&HealthReadings::new(50.0, 135.0, 210.0, 23.0))
            .expect("score");
        assert_eq!(high.level, RiskLevel::High);
        assert!((high.value - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_cutoffs() {
        let scorer = RulePointScorer::new(RuleCutoffs {
            age: 60.0,
            ..RuleCutoffs::default()
        });
        let score = scorer
            .score(&HealthReadings::new(50.0, 118.0, 170.0, 22.0))
            .expect("score");
        assert_eq!(score.level, RiskLevel::Low);
    }
}
