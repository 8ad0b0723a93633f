use analysis_core::{AnalysisError, AnalysisResult, PropertyInput, PropertySubmission};
use chrono::{DateTime, Datelike, Utc};
use market_comparator::{MarketComparator, MarketTable};
use property_metrics::MetricsCalculator;
use recommendation_engine::RecommendationEngine;
use risk_assessor::RiskAssessor;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Runs the full property pipeline: validate, derive metrics, then market
/// comparison, risk and recommendations from those metrics.
///
/// Holds only immutable policy, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOrchestrator {
    metrics_calculator: MetricsCalculator,
    market_comparator: MarketComparator,
    risk_assessor: RiskAssessor,
    recommendation_engine: RecommendationEngine,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the market segment table
    pub fn with_market_table(mut self, table: MarketTable) -> Self {
        self.market_comparator = MarketComparator::with_table(table);
        self
    }

    /// Validate a raw submission and analyze it.
    pub fn analyze_submission(
        &self,
        submission: PropertySubmission,
    ) -> Result<AnalysisResult, AnalysisError> {
        let now = Utc::now();
        let input = submission.validate(now.year()).inspect_err(|e| {
            tracing::warn!("Rejected property submission: {}", e);
        })?;
        self.analyze_at(input, generate_property_id(now), now)
    }

    /// Analyze a property with a fresh id and the current time.
    pub fn analyze(&self, input: PropertyInput) -> Result<AnalysisResult, AnalysisError> {
        let now = Utc::now();
        self.analyze_at(input, generate_property_id(now), now)
    }

    /// Analyze with a caller-supplied id and clock. The current year used for
    /// validation and the property-age factor comes from `timestamp`.
    pub fn analyze_at(
        &self,
        input: PropertyInput,
        property_id: String,
        timestamp: DateTime<Utc>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let current_year = timestamp.year();

        if let Err(e) = input.validate(current_year) {
            tracing::warn!("Rejected property input for '{}': {}", input.address, e);
            return Err(e);
        }

        let calculated_metrics = self.metrics_calculator.compute(&input).inspect_err(|e| {
            tracing::error!("Metric computation failed for '{}': {}", input.address, e);
        })?;

        let market_comparison = self
            .market_comparator
            .compare(calculated_metrics.cap_rate, &input.address);
        let risk_assessment = self
            .risk_assessor
            .assess(&calculated_metrics, &input, current_year);
        let recommendations = self
            .recommendation_engine
            .recommend(&calculated_metrics, &input);

        tracing::info!(
            "Analysis completed for property: {} ({}, risk {:?} {})",
            input.address,
            property_id,
            risk_assessment.level,
            risk_assessment.score
        );

        Ok(AnalysisResult {
            property_id,
            address: input.address.clone(),
            input_data: input,
            calculated_metrics,
            market_comparison,
            recommendations,
            risk_assessment,
            timestamp,
        })
    }
}

/// `prop_<unix millis>_<9 random hex chars>`. No shared counter is involved,
/// so concurrent calls never coordinate.
pub fn generate_property_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("prop_{}_{}", now.timestamp_millis(), &random[..9])
}
