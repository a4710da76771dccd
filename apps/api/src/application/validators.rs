use rust_decimal::Decimal;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::money::format_cedis,
};

/// Checks a payment amount against the outstanding balance.
pub fn validate_payment_amount(amount: Decimal, outstanding: Decimal) -> AppResult<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "Please enter a valid amount greater than zero".into(),
        ));
    }

    if amount > outstanding {
        return Err(AppError::InvalidInput(format!(
            "Amount cannot exceed outstanding balance of {}",
            format_cedis(outstanding)
        )));
    }

    Ok(())
}
