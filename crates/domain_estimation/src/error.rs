//! Estimation domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the estimation domain
#[derive(Debug, Error)]
pub enum EstimationError {
    /// A cost line carries a negative unit price
    #[error("Negative unit price for {label}: {amount}")]
    NegativeUnitPrice { label: String, amount: Decimal },

    /// A cost line is priced in a different currency than the package
    #[error("Currency mismatch for {label}: expected {expected}, found {found}")]
    CurrencyMismatch {
        label: String,
        expected: String,
        found: String,
    },

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
