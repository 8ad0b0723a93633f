use analysis_core::AnalysisError;

/// Assumed annual interest rate for the financed balance. A policy constant,
/// not derived from the property or the market.
pub const ASSUMED_ANNUAL_RATE: f64 = 0.065;

/// Assumed loan term in years. A policy constant like [`ASSUMED_ANNUAL_RATE`].
pub const ASSUMED_TERM_YEARS: u32 = 30;

/// Fixed-rate amortized monthly payment.
///
/// payment = P * r * (1 + r)^n / ((1 + r)^n - 1), with r = annual_rate / 12
/// and n = years * 12. A zero rate degrades to straight-line repayment.
pub fn monthly_payment(principal: f64, annual_rate: f64, years: u32) -> Result<f64, AnalysisError> {
    if years == 0 {
        return Err(AnalysisError::ComputationFault(
            "mortgage term must be at least one year".to_string(),
        ));
    }

    let monthly_rate = annual_rate / 12.0;
    let num_payments = (years * 12) as i32;

    if monthly_rate == 0.0 {
        return Ok(principal / num_payments as f64);
    }

    let growth = (1.0 + monthly_rate).powi(num_payments);
    Ok(principal * monthly_rate * growth / (growth - 1.0))
}
