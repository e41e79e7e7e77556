//! Evidence-cited guidance texts.
//!
//! Two sources of advice: a fixed list per risk level, and per-reading
//! tips triggered when an individual value crosses a clinical cutoff.

use super::{HealthReadings, RiskLevel, RuleCutoffs};

const LOW_GUIDANCE: [&str; 4] = [
    "Maintain Mediterranean or DASH diet (NIH)",
    "150 minutes/week physical activity (WHO)",
    "Annual BP and cholesterol screening (AHA)",
    "Maintain BMI below 25",
];

const MODERATE_GUIDANCE: [&str; 5] = [
    "Adopt DASH or Mediterranean diet (AHA)",
    "Reduce sodium intake below 2g/day (AHA)",
    "Home blood pressure monitoring advised",
    "Lipid profile every 6 months",
    "Schedule physician consultation",
];

const HIGH_GUIDANCE: [&str; 5] = [
    "Immediate physician consultation (AHA)",
    "Medication evaluation advised (ACC)",
    "Strict DASH diet required",
    "Smoking and alcohol cessation (WHO)",
    "Daily blood pressure monitoring",
];

pub const BLOOD_PRESSURE_TIP: &str = "Blood Pressure Control: American Heart Association (2022) recommends reducing salt intake and doing 150 minutes/week of moderate exercise to lower BP.";
pub const CHOLESTEROL_TIP: &str = "Cholesterol Management: Harvard Medical School research shows replacing saturated fats with nuts, olive oil, and fish can reduce LDL cholesterol.";
pub const WEIGHT_TIP: &str = "Weight Management: WHO studies indicate that losing 5-10% body weight significantly reduces cardiovascular risk.";
pub const AGE_SCREENING_TIP: &str = "Age-Based Screening: The Lancet (2021) recommends regular cardiovascular screening after age 45.";
pub const HEALTHY_PROFILE_TIP: &str = "Healthy Profile: Your values are within recommended limits. Maintain physical activity, balanced diet, and regular health checkups (WHO).";

/// Fixed guidance list for a risk level.
#[must_use]
pub fn guidance_for(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Low => &LOW_GUIDANCE,
        RiskLevel::Moderate => &MODERATE_GUIDANCE,
        RiskLevel::High => &HIGH_GUIDANCE,
    }
}

/// Tips for each reading at or above the default clinical cutoffs.
///
/// Order: blood pressure, cholesterol, weight, age. Never empty.
#[must_use]
pub fn factor_tips(readings: &HealthReadings) -> Vec<&'static str> {
    let cutoffs = RuleCutoffs::default();
    let mut tips = Vec::new();

    if readings.systolic_bp >= cutoffs.systolic_bp {
        tips.push(BLOOD_PRESSURE_TIP);
    }
    if readings.cholesterol >= cutoffs.cholesterol {
        tips.push(CHOLESTEROL_TIP);
    }
    if readings.bmi >= cutoffs.bmi {
        tips.push(WEIGHT_TIP);
    }
    if readings.age >= cutoffs.age {
        tips.push(AGE_SCREENING_TIP);
    }

    if tips.is_empty() {
        tips.push(HEALTHY_PROFILE_TIP);
    }
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guidance_table() {
        assert_eq!(guidance_for(RiskLevel::Low).len(), 4);
        assert_eq!(guidance_for(RiskLevel::Moderate).len(), 5);
        assert_eq!(guidance_for(RiskLevel::High).len(), 5);
        assert_eq!(
            guidance_for(RiskLevel::High)[0],
            "Immediate physician consultation (AHA)"
        );
        assert_eq!(guidance_for(RiskLevel::Low)[3], "Maintain BMI below 25");
    }

    #[test]
    fn test_factor_tips_order() {
        let readings = HealthReadings::new(60.0, 145.0, 230.0, 29.0);
        assert_eq!(
            factor_tips(&readings),
            vec![BLOOD_PRESSURE_TIP, CHOLESTEROL_TIP, WEIGHT_TIP, AGE_SCREENING_TIP]
        );
    }

    #[test]
    fn test_factor_tips_partial() {
        let readings = HealthReadings::new(30.0, 118.0, 205.0, 22.0);
        assert_eq!(factor_tips(&readings), vec![CHOLESTEROL_TIP]);
    }

    #[test]
    fn test_healthy_profile() {
        let readings = HealthReadings::new(30.0, 118.0, 170.0, 22.0);
        assert_eq!(factor_tips(&readings), vec![HEALTHY_PROFILE_TIP]);
    }
}
