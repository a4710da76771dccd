//! Money formatting for the dashboard.
//!
//! Amounts arrive from the backend already computed; this module only rounds
//! and renders them.

use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "GH₵";

/// Rounds to two decimal places, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates to two decimal places. Used for payable maxima so the shown
/// value never exceeds the balance it came from.
pub fn floor_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Renders an amount as `GH₵ 75.00`. No thousands separators.
pub fn format_cedis(amount: Decimal) -> String {
    format!("{} {:.2}", CURRENCY_SYMBOL, round_money(amount))
}
