//! Assessment result types.
//!
//! Represents the output of any risk scorer and the complete assessment
//! record handed back to callers.

use serde::{Deserialize, Serialize};

use super::HealthReadings;

/// Risk level classification for cardiovascular health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk, maintain current habits
    Low,
    /// Moderate risk, lifestyle changes and monitoring recommended
    Moderate,
    /// High risk, medical consultation advised
    High,
}

impl RiskLevel {
    /// All levels, lowest first.
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Moderate, Self::High];

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Maintain a healthy lifestyle",
            Self::Moderate => "Moderate risk - Lifestyle changes and monitoring recommended",
            Self::High => "High risk - Seek medical consultation",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" | "medium" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown risk level: {other}")),
        }
    }
}

/// Which scheme produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Weighted sum of normalized readings
    #[default]
    Weighted,
    /// One point per reading above its cutoff
    RulePoints,
    /// Pre-trained binary classifier
    Model,
}

impl std::fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weighted => write!(f, "weighted"),
            Self::RulePoints => write!(f, "rule_points"),
            Self::Model => write!(f, "model"),
        }
    }
}

impl std::str::FromStr for ScoringMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(Self::Weighted),
            "rule_points" | "rule-points" | "rules" => Ok(Self::RulePoints),
            "model" | "classifier" => Ok(Self::Model),
            other => Err(format!("Unknown scoring method: {other}")),
        }
    }
}

/// Raw output of a scorer (before recommendations are attached).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Score in [0, 1]; its meaning depends on the scoring method
    pub value: f64,

    /// Risk classification
    pub level: RiskLevel,

    /// Positive-class probability (model scoring only)
    pub probability: Option<f64>,

    /// Probability of the predicted class (model scoring only)
    pub confidence: Option<f64>,
}

impl RiskScore {
    /// Score without model probabilities.
    #[must_use]
    pub fn new(value: f64, level: RiskLevel) -> Self {
        Self {
            value,
            level,
            probability: None,
            confidence: None,
        }
    }

    /// Score from a binary prediction and its class probabilities `[p0, p1]`.
    ///
    /// Class 1 maps to High, class 0 to Low.
    #[must_use]
    pub fn from_prediction(class: u8, proba: [f64; 2]) -> Self {
        Self {
            value: proba[1],
            level: if class == 1 { RiskLevel::High } else { RiskLevel::Low },
            probability: Some(proba[1]),
            confidence: Some(proba[0].max(proba[1])),
        }
    }

    /// Confidence as a whole percentage, truncated (0.996 is 99).
    #[must_use]
    pub fn confidence_percent(&self) -> Option<u8> {
        self.confidence
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).floor() as u8)
    }
}

/// Complete assessment record including metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// Caller-supplied subject reference (if any)
    pub subject_id: Option<String>,

    /// Scheme that produced the score
    pub method: ScoringMethod,

    /// Readings the score was computed from
    pub readings: HealthReadings,

    /// The scorer output
    pub score: RiskScore,

    /// Guidance for the assessed risk level
    pub recommendations: Vec<String>,

    /// Guidance triggered by individual readings
    pub factor_tips: Vec<String>,

    /// Timestamp of assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment record.
    #[must_use]
    pub fn new(
        method: ScoringMethod,
        readings: HealthReadings,
        score: RiskScore,
        recommendations: Vec<String>,
        factor_tips: Vec<String>,
    ) -> Self {
        Self {
            id: uuid_v4(),
            subject_id: None,
            method,
            readings,
            score,
            recommendations,
            factor_tips,
            created_at: chrono::Utc::now(),
        }
    }

    /// Attach a subject reference.
    #[must_use]
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    /// Shorthand for the assessed level.
    #[must_use]
    pub fn level(&self) -> RiskLevel {
        self.score.level
    }
}

/// Generate a random UUID v4 using ChaCha20 seeded from OS entropy.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_parse_and_display() {
        for level in RiskLevel::ALL {
            let parsed: RiskLevel = level.to_string().parse().expect("round trip");
            assert_eq!(parsed, level);
        }
        assert_eq!("  Moderate ".parse::<RiskLevel>(), Ok(RiskLevel::Moderate));
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_scoring_method_parse() {
        assert_eq!("rules".parse::<ScoringMethod>(), Ok(ScoringMethod::RulePoints));
        assert_eq!("MODEL".parse::<ScoringMethod>(), Ok(ScoringMethod::Model));
        assert_eq!(ScoringMethod::default(), ScoringMethod::Weighted);
        assert!("random".parse::<ScoringMethod>().is_err());
    }

    #[test]
    fn test_scoring_method_serde_name() {
        let json = serde_json::to_string(&ScoringMethod::RulePoints).expect("serialize");
        assert_eq!(json, "\"rule_points\"");
    }

    #[test]
    fn test_score_from_prediction() {
        let high = RiskScore::from_prediction(1, [0.2, 0.8]);
        assert_eq!(high.level, RiskLevel::High);
        assert_eq!(high.probability, Some(0.8));
        assert_eq!(high.confidence, Some(0.8));

        let low = RiskScore::from_prediction(0, [0.9, 0.1]);
        assert_eq!(low.level, RiskLevel::Low);
        assert_eq!(low.confidence, Some(0.9));

        // The predicted class decides the level, not the probabilities.
        let overridden = RiskScore::from_prediction(1, [0.6, 0.4]);
        assert_eq!(overridden.level, RiskLevel::High);
    }

    #[test]
    fn test_confidence_percent_truncates() {
        assert_eq!(RiskScore::from_prediction(1, [0.004, 0.996]).confidence_percent(), Some(99));
        assert_eq!(RiskScore::from_prediction(0, [1.0, 0.0]).confidence_percent(), Some(100));
        assert_eq!(RiskScore::new(0.5, RiskLevel::Moderate).confidence_percent(), None);
    }

    #[test]
    fn test_assessment_creation() {
        let readings = HealthReadings::new(50.0, 140.0, 220.0, 28.0);
        let assessment = Assessment::new(
            ScoringMethod::Weighted,
            readings,
            RiskScore::new(0.6, RiskLevel::Moderate),
            vec!["Schedule physician consultation".into()],
            Vec::new(),
        )
        .with_subject("clinic-7");

        assert_eq!(assessment.level(), RiskLevel::Moderate);
        assert_eq!(assessment.subject_id.as_deref(), Some("clinic-7"));
        assert_eq!(assessment.id.len(), 36);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
        assert_eq!(&id1[14..15], "4");
    }
}
