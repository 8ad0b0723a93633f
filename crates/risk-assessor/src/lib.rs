//! Property Risk Assessment
//!
//! Additive risk scoring: start neutral at 50, add a fixed penalty per
//! triggered condition, clamp to 0..=100, then map to a level.

use analysis_core::{CalculatedMetrics, PropertyInput, RiskAssessment, RiskLevel};

const BASE_SCORE: i32 = 50;

/// Age beyond which a property is flagged for maintenance risk
const OLD_PROPERTY_YEARS: i32 = 50;

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAssessor;

impl RiskAssessor {
    pub fn new() -> Self {
        Self
    }

    /// `current_year` anchors the age check so the result depends only on inputs.
    pub fn assess(
        &self,
        metrics: &CalculatedMetrics,
        input: &PropertyInput,
        current_year: i32,
    ) -> RiskAssessment {
        let mut score = BASE_SCORE;
        let mut factors = Vec::new();

        let mut flag = |penalty: i32, factor: &str| {
            score += penalty;
            factors.push(factor.to_string());
        };

        if metrics.cap_rate < 4.0 {
            flag(20, "Low cap rate increases investment risk");
        } else if metrics.cap_rate > 12.0 {
            flag(15, "Very high cap rate may indicate market or property issues");
        }

        if metrics.monthly_cash_flow < 0.0 {
            flag(25, "Negative cash flow requires ongoing capital injection");
        }

        if metrics.debt_service_coverage < 1.2 {
            flag(15, "Low debt service coverage increases financial risk");
        }

        if metrics.break_even_ratio > 0.85 {
            flag(10, "High expense ratio reduces profit margins");
        }

        if let Some(year_built) = input.year_built {
            if current_year - year_built > OLD_PROPERTY_YEARS {
                flag(10, "Older property may require significant maintenance");
            }
        }

        let score = score.clamp(0, 100) as u8;
        RiskAssessment {
            level: RiskLevel::from_score(score),
            factors,
            score,
        }
    }
}
