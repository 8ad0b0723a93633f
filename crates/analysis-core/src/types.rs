use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated property figures. Built through [`PropertySubmission::validate`]
/// or checked with [`PropertyInput::validate`] before any metric is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub address: String,
    pub price: f64,
    pub monthly_rent: f64,
    pub monthly_expenses: f64,
    pub down_payment: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
}

/// Raw request body: every key may be missing so that absent required
/// fields surface as validation errors instead of decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySubmission {
    pub address: Option<String>,
    pub price: Option<f64>,
    pub monthly_rent: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub down_payment: Option<f64>,
    pub square_feet: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub year_built: Option<f64>,
}

/// Financial metrics derived from a single [`PropertyInput`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedMetrics {
    /// Annual net income / price, as a percentage
    pub cap_rate: f64,
    /// Annual net income / down payment, as a percentage
    pub cash_on_cash: f64,
    pub monthly_cash_flow: f64,
    pub annual_income: f64,
    /// Alias of `cash_on_cash`; there is no separate ROI model
    pub roi: f64,
    pub break_even_ratio: f64,
    pub one_percent_rule: bool,
    /// Monthly cash flow over the estimated loan payment (not NOI-based)
    pub debt_service_coverage: f64,
    pub gross_rent_multiplier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_square_foot: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompetitiveRating {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl CompetitiveRating {
    /// Rate a cap rate against a segment average (both in percent).
    pub fn from_cap_rate(cap_rate: f64, average: f64) -> Self {
        match cap_rate {
            c if c >= average + 2.0 => CompetitiveRating::Excellent,
            c if c >= average => CompetitiveRating::Good,
            c if c >= average - 1.0 => CompetitiveRating::Average,
            _ => CompetitiveRating::BelowAverage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketComparison {
    pub average_cap_rate: f64,
    pub market_trend: MarketTrend,
    pub competitive_rating: CompetitiveRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=40 => RiskLevel::Low,
            41..=70 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Triggered factors, in evaluation order
    pub factors: Vec<String>,
    /// 0 to 100
    pub score: u8,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub property_id: String,
    pub address: String,
    pub input_data: PropertyInput,
    pub calculated_metrics: CalculatedMetrics,
    pub market_comparison: MarketComparison,
    pub recommendations: Vec<String>,
    pub risk_assessment: RiskAssessment,
    pub timestamp: DateTime<Utc>,
}
