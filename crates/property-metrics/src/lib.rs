pub mod mortgage;

pub use mortgage::{monthly_payment, ASSUMED_ANNUAL_RATE, ASSUMED_TERM_YEARS};

use analysis_core::{AnalysisError, CalculatedMetrics, PropertyInput};

/// Derives the full metric set from validated property figures.
///
/// Pure: the same input always yields the same metrics. Inputs are expected
/// to have passed [`PropertyInput::validate`]; a non-finite result despite
/// that is reported as [`AnalysisError::ComputationFault`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, input: &PropertyInput) -> Result<CalculatedMetrics, AnalysisError> {
        let annual_rent = input.monthly_rent * 12.0;
        let annual_expenses = input.monthly_expenses * 12.0;
        let annual_income = annual_rent - annual_expenses;
        let monthly_cash_flow = input.monthly_rent - input.monthly_expenses;

        let cap_rate = (annual_income / input.price) * 100.0;
        let cash_on_cash = (annual_income / input.down_payment) * 100.0;
        let break_even_ratio = input.monthly_expenses / input.monthly_rent;
        let one_percent_rule = input.monthly_rent >= input.price * 0.01;

        let loan_amount = input.price - input.down_payment;
        let monthly_loan_payment =
            monthly_payment(loan_amount, ASSUMED_ANNUAL_RATE, ASSUMED_TERM_YEARS)?;
        // Cash flow over debt service, deliberately not NOI-based
        let debt_service_coverage = monthly_cash_flow / monthly_loan_payment;
        let gross_rent_multiplier = input.price / annual_rent;
        let price_per_square_foot = input.square_feet.map(|sqft| input.price / sqft);

        let metrics = CalculatedMetrics {
            cap_rate,
            cash_on_cash,
            monthly_cash_flow,
            annual_income,
            roi: cash_on_cash,
            break_even_ratio,
            one_percent_rule,
            debt_service_coverage,
            gross_rent_multiplier,
            price_per_square_foot,
        };

        ensure_finite(&metrics)?;
        tracing::debug!(
            "Metrics for {}: cap rate {:.2}%, cash flow {:.2}/mo, DSCR {:.2}",
            input.address,
            metrics.cap_rate,
            metrics.monthly_cash_flow,
            metrics.debt_service_coverage
        );

        Ok(metrics)
    }
}

fn ensure_finite(metrics: &CalculatedMetrics) -> Result<(), AnalysisError> {
    let values = [
        ("capRate", metrics.cap_rate),
        ("cashOnCash", metrics.cash_on_cash),
        ("monthlyCashFlow", metrics.monthly_cash_flow),
        ("annualIncome", metrics.annual_income),
        ("breakEvenRatio", metrics.break_even_ratio),
        ("debtServiceCoverage", metrics.debt_service_coverage),
        ("grossRentMultiplier", metrics.gross_rent_multiplier),
        ("pricePerSquareFoot", metrics.price_per_square_foot.unwrap_or(0.0)),
    ];

    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(AnalysisError::ComputationFault(format!(
            "{name} is not finite ({value})"
        ))),
        None => Ok(()),
    }
}
