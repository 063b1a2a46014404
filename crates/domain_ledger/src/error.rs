//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{InstallmentId, MoneyError};

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An entry carries a negative amount
    #[error("Negative {field} on entry {entry_id}: {amount}")]
    NegativeAmount {
        entry_id: InstallmentId,
        field: &'static str,
        amount: Decimal,
    },

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
