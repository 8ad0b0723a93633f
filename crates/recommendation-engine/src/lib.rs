use analysis_core::{CalculatedMetrics, PropertyInput};

/// Rule-based advisory text.
///
/// Each rule is checked independently and several can fire; output keeps
/// rule order with no ranking or deduplication. An empty list means nothing
/// was flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(&self, metrics: &CalculatedMetrics, _input: &PropertyInput) -> Vec<String> {
        let rules: [(bool, &str); 8] = [
            (
                metrics.cap_rate < 4.0,
                "Consider negotiating a lower purchase price. Cap rate below 4% indicates potential overvaluation.",
            ),
            (
                metrics.cap_rate > 10.0,
                "Excellent cap rate! Verify property condition and local market stability.",
            ),
            (
                metrics.monthly_cash_flow < 0.0,
                "Negative cash flow detected. Consider increasing rent, reducing expenses, or renegotiating purchase price.",
            ),
            (
                metrics.monthly_cash_flow > 500.0,
                "Strong positive cash flow. This property shows excellent income potential.",
            ),
            (
                !metrics.one_percent_rule,
                "Property does not meet the 1% rule. Consider if the location justifies lower rental yield.",
            ),
            (
                metrics.debt_service_coverage < 1.2,
                "Low debt service coverage ratio. Consider larger down payment or better financing terms.",
            ),
            (
                metrics.price_per_square_foot.is_some_and(|p| p > 200.0),
                "High price per square foot. Verify this is justified by location and property quality.",
            ),
            (
                metrics.break_even_ratio > 0.8,
                "High expense ratio. Look for opportunities to reduce operating costs.",
            ),
        ];

        rules
            .into_iter()
            .filter(|(fired, _)| *fired)
            .map(|(_, message)| message.to_string())
            .collect()
    }
}
