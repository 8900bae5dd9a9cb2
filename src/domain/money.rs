//! Amount parsing and formatting shared by entry forms.

use rust_decimal::Decimal;

use crate::errors::LedgerError;

/// Parses a user-supplied amount string into an exact decimal.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidAmount(raw.to_string()))
}

/// Formats an amount with the two fractional digits entry forms display.
pub fn format_amount(amount: &Decimal) -> String {
    format!("{}", amount.round_dp(2))
}
