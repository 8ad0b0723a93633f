//! Input validation
//!
//! Every rule runs before a single metric is computed. Rules are evaluated
//! in full so the caller sees all offending fields at once.

use crate::{AnalysisError, FieldError, PropertyInput, PropertySubmission};

pub const MIN_YEAR_BUILT: i32 = 1800;

/// Bounds for money amounts and square footage. Keeping every ratio operand
/// inside this range keeps every derived metric finite.
pub const MIN_AMOUNT: f64 = 1.0;
pub const MAX_AMOUNT: f64 = 1e12;

impl PropertySubmission {
    /// Check presence of required fields, then numeric sanity, and produce a
    /// typed [`PropertyInput`].
    pub fn validate(self, current_year: i32) -> Result<PropertyInput, AnalysisError> {
        let mut errors = Vec::new();

        let address = match self.address {
            Some(a) if !a.trim().is_empty() => Some(a),
            _ => {
                errors.push(FieldError::new("address", "Property address is required"));
                None
            }
        };
        let price = required(&mut errors, "price", self.price, "Valid purchase price is required");
        let monthly_rent = required(
            &mut errors,
            "monthlyRent",
            self.monthly_rent,
            "Valid monthly rent is required",
        );
        let monthly_expenses = required(
            &mut errors,
            "monthlyExpenses",
            self.monthly_expenses,
            "Valid monthly expenses amount is required",
        );
        let down_payment = required(
            &mut errors,
            "downPayment",
            self.down_payment,
            "Valid down payment amount is required",
        );

        let year_built = match self.year_built {
            Some(y) if !y.is_finite() || y.fract() != 0.0 => {
                errors.push(FieldError::new("yearBuilt", "Year built must be a whole year"));
                None
            }
            Some(y) => Some(y as i32),
            None => None,
        };

        let (Some(address), Some(price), Some(monthly_rent), Some(monthly_expenses), Some(down_payment)) =
            (address, price, monthly_rent, monthly_expenses, down_payment)
        else {
            return Err(AnalysisError::Validation(errors));
        };

        let input = PropertyInput {
            address,
            price,
            monthly_rent,
            monthly_expenses,
            down_payment,
            square_feet: self.square_feet,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            year_built,
        };

        errors.extend(input.field_errors(current_year));
        if errors.is_empty() {
            Ok(input)
        } else {
            Err(AnalysisError::Validation(errors))
        }
    }
}

impl PropertyInput {
    /// Numeric sanity checks. Passing guarantees every metric ratio has a
    /// non-zero, finite denominator.
    pub fn validate(&self, current_year: i32) -> Result<(), AnalysisError> {
        let errors = self.field_errors(current_year);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::Validation(errors))
        }
    }

    fn field_errors(&self, current_year: i32) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.address.trim().is_empty() {
            errors.push(FieldError::new("address", "Property address is required"));
        }
        let price_ok = check_amount(&mut errors, "price", self.price, "Price");
        check_amount(&mut errors, "monthlyRent", self.monthly_rent, "Monthly rent");
        if !self.monthly_expenses.is_finite() || self.monthly_expenses < 0.0 {
            errors.push(FieldError::new(
                "monthlyExpenses",
                "Monthly expenses cannot be negative",
            ));
        } else if self.monthly_expenses > MAX_AMOUNT {
            errors.push(FieldError::new(
                "monthlyExpenses",
                format!("Monthly expenses cannot exceed {MAX_AMOUNT}"),
            ));
        }

        let down_ok = check_amount(&mut errors, "downPayment", self.down_payment, "Down payment");
        if price_ok && down_ok {
            if self.down_payment > self.price {
                errors.push(FieldError::new(
                    "downPayment",
                    "Down payment cannot exceed purchase price",
                ));
            } else if self.down_payment == self.price {
                errors.push(FieldError::new(
                    "downPayment",
                    "Down payment must leave a financed balance",
                ));
            }
        }

        if let Some(square_feet) = self.square_feet {
            check_amount(&mut errors, "squareFeet", square_feet, "Square footage");
        }

        for (field, value, message) in [
            ("bedrooms", self.bedrooms, "Number of bedrooms must be a positive number"),
            ("bathrooms", self.bathrooms, "Number of bathrooms must be a positive number"),
        ] {
            if matches!(value, Some(v) if !positive(v)) {
                errors.push(FieldError::new(field, message));
            }
        }

        if let Some(year) = self.year_built {
            if !(MIN_YEAR_BUILT..=current_year).contains(&year) {
                errors.push(FieldError::new(
                    "yearBuilt",
                    format!("Year built must be between {MIN_YEAR_BUILT} and {current_year}"),
                ));
            }
        }

        errors
    }
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<f64>,
    message: &str,
) -> Option<f64> {
    if value.is_none() {
        errors.push(FieldError::new(field, message));
    }
    value
}

/// Positive and within `MIN_AMOUNT..=MAX_AMOUNT`; pushes at most one error.
fn check_amount(errors: &mut Vec<FieldError>, field: &str, value: f64, label: &str) -> bool {
    if !positive(value) {
        errors.push(FieldError::new(field, format!("{label} must be a positive number")));
        false
    } else if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&value) {
        errors.push(FieldError::new(
            field,
            format!("{label} must be between {MIN_AMOUNT} and {MAX_AMOUNT}"),
        ));
        false
    } else {
        true
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
