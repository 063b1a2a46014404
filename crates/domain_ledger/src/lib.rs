//! Ledger Domain - Installment Tracking and Settlement
//!
//! This crate tracks partial payments ("abonos") a participant makes
//! against a trip, in colones and dollars, and derives outstanding balance
//! and settlement state from the full entry list on every call.
//!
//! # Settlement Rules
//!
//! - Dollar amounts join the colón view at each entry's **own** recorded
//!   exchange rate, preserving historical accuracy
//! - A dollar amount without a rate is valid data that simply cannot be
//!   merged yet; it raises a flag, never an error
//! - A USD-priced trip settles via the normalized colón view **or** the
//!   raw dollar total, whichever is reached first
//! - Remaining balances may go negative (overpayment, credit) and are
//!   reported as such
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{settle, EntryKind, InstallmentEntry, TripPrice};
//!
//! let entries = vec![
//!     InstallmentEntry::new(EntryKind::Deposit, paid_at).with_amount_crc(amount),
//! ];
//!
//! let result = settle(&TripPrice::new(price), &entries)?;
//! println!("remaining: {}", result.remaining_crc);
//! ```

pub mod entry;
pub mod error;
pub mod settlement;

pub use entry::{EntryKind, InstallmentEntry};
pub use error::LedgerError;
pub use settlement::{
    current_companion_count, remove_entry, settle, SettlementResult, SettlementStatus, TripPrice,
};
