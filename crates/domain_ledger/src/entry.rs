//! Installment entries
//!
//! An installment ("abono") records one partial payment a participant made
//! against a trip, in colones and/or dollars, together with the exchange
//! rate in force at the time and the companion headcount declared on that
//! visit. Entries are append-only: removing one is a caller-level filter
//! that never touches the others.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, ExchangeRate, InstallmentId, Money};

/// What an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A partial payment toward the trip balance
    Deposit,
    /// A spot held, usually with little or no money down
    Reservation,
    /// A terminal status marker; amounts on it still count toward sums
    Cancellation,
}

/// A single installment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentEntry {
    /// Unique identifier
    pub id: InstallmentId,
    /// When the installment was taken
    pub timestamp: DateTime<Utc>,
    /// What the entry records
    pub kind: EntryKind,
    /// Companion headcount declared with this entry; replaces, not adds to,
    /// earlier declarations
    pub companion_count: Option<u32>,
    /// Free-text companion names; advisory only, never validated against
    /// the declared count
    pub companion_names: Vec<String>,
    /// Amount paid in colones
    pub amount_crc: Money,
    /// Amount paid in dollars
    pub amount_usd: Money,
    /// Exchange rate recorded with this entry; required for the dollar
    /// portion to participate in the normalized colón total
    pub exchange_rate: Option<ExchangeRate>,
}

impl InstallmentEntry {
    /// Creates an entry with zero amounts
    pub fn new(kind: EntryKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: InstallmentId::new_v7(),
            timestamp,
            kind,
            companion_count: None,
            companion_names: Vec::new(),
            amount_crc: Money::zero(Currency::CRC),
            amount_usd: Money::zero(Currency::USD),
            exchange_rate: None,
        }
    }

    /// Sets the colón amount
    pub fn with_amount_crc(mut self, amount: Decimal) -> Self {
        self.amount_crc = Money::new(amount, Currency::CRC);
        self
    }

    /// Sets the dollar amount
    pub fn with_amount_usd(mut self, amount: Decimal) -> Self {
        self.amount_usd = Money::new(amount, Currency::USD);
        self
    }

    /// Sets the recorded exchange rate
    pub fn with_exchange_rate(mut self, rate: ExchangeRate) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Declares the companion headcount and names as of this entry
    pub fn with_companions(mut self, count: u32, names: Vec<String>) -> Self {
        self.companion_count = Some(count);
        self.companion_names = names;
        self
    }
}
