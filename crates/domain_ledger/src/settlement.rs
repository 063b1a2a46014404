//! Settlement computation
//!
//! Recomputes a participant's balance and settlement state from scratch on
//! every call: the ledger holds no incremental or cached state. Callers
//! pass the trip price and the full entry list and receive a
//! [`SettlementResult`].
//!
//! Dollar amounts convert into the colón view at each entry's own recorded
//! rate, never at the latest one, so historical totals stay accurate as
//! rates move.

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Currency, ExchangeRate, InstallmentId, Money};

use crate::entry::{EntryKind, InstallmentEntry};
use crate::error::LedgerError;

/// The package price a participant owes, in the trip's declared currency
///
/// The currency tag on the amount selects the settlement semantics: a
/// CRC-priced trip settles against the normalized colón total; a
/// USD-priced trip settles against either the normalized colón view or the
/// raw dollar total, whichever is reached first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPrice {
    amount: Money,
}

impl TripPrice {
    /// Creates a trip price
    pub fn new(amount: Money) -> Self {
        Self { amount }
    }

    /// Returns the price amount
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the trip's declared currency
    pub fn currency(&self) -> Currency {
        self.amount.currency()
    }
}

/// Settlement classification derived from the entry list
///
/// `Cancelled` is a terminal marker: the most recent entry being a
/// cancellation wins over every other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// A spot is held but no money has been recorded
    Reserved,
    /// Some money recorded, balance still outstanding
    Partial,
    /// Recorded payments meet or exceed the trip price
    Paid,
    /// The participant cancelled; recorded amounts remain in the sums
    Cancelled,
}

/// The result of settling a participant's ledger
///
/// `remaining_crc` and `remaining_usd` may be negative (overpayment or a
/// dollar credit against a colón-priced trip) and are surfaced as such,
/// never clamped to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Sum of all colón amounts
    pub total_paid_crc: Money,
    /// Sum of all dollar amounts
    pub total_paid_usd: Money,
    /// Colón total plus each rated dollar amount converted at its own rate
    pub total_paid_normalized_crc: Money,
    /// Colón target minus the normalized total; zero when a dollar-priced
    /// trip has no recorded rate to derive the target from
    pub remaining_crc: Money,
    /// Dollar balance; negative means a credit
    pub remaining_usd: Money,
    /// Whether recorded payments meet or exceed the trip price
    pub is_settled: bool,
    /// Rate of the most recent entry that recorded one
    pub last_exchange_rate: Option<ExchangeRate>,
    /// Set when a dollar amount could not join the normalized total for
    /// want of a recorded rate; the amount still appears in
    /// `total_paid_usd`
    pub has_unconverted_usd: bool,
    /// Derived settlement classification
    pub status: SettlementStatus,
}

/// Settles a participant's ledger against a trip price
///
/// Entries are stably sorted by timestamp first (insertion order breaks
/// ties), so "latest rate" and "latest companion count" derivations are
/// deterministic regardless of the order the caller stored them in.
/// Cancellation entries are labels, not reversals; their amounts sum like
/// any other entry's.
///
/// # Errors
///
/// Returns `LedgerError::NegativeAmount` if any entry carries a negative
/// colón or dollar amount. Validation runs over the whole list before any
/// computation.
pub fn settle(
    trip_price: &TripPrice,
    entries: &[InstallmentEntry],
) -> Result<SettlementResult, LedgerError> {
    for entry in entries {
        if entry.amount_crc.is_negative() {
            return Err(LedgerError::NegativeAmount {
                entry_id: entry.id,
                field: "amount_crc",
                amount: entry.amount_crc.amount(),
            });
        }
        if entry.amount_usd.is_negative() {
            return Err(LedgerError::NegativeAmount {
                entry_id: entry.id,
                field: "amount_usd",
                amount: entry.amount_usd.amount(),
            });
        }
    }

    debug!(entry_count = entries.len(), "settling participant ledger");

    let sorted = sort_by_timestamp(entries);

    let mut total_paid_crc = Money::zero(Currency::CRC);
    let mut total_paid_usd = Money::zero(Currency::USD);
    let mut converted_usd_crc = Money::zero(Currency::CRC);
    let mut has_unconverted_usd = false;

    for entry in &sorted {
        total_paid_crc = total_paid_crc.checked_add(&entry.amount_crc)?;
        total_paid_usd = total_paid_usd.checked_add(&entry.amount_usd)?;

        match entry.exchange_rate {
            Some(rate) => {
                converted_usd_crc =
                    converted_usd_crc.checked_add(&rate.convert(&entry.amount_usd)?)?;
            }
            None if entry.amount_usd.is_positive() => {
                has_unconverted_usd = true;
            }
            None => {}
        }
    }

    let total_paid_normalized_crc = total_paid_crc.checked_add(&converted_usd_crc)?;

    let last_exchange_rate = sorted.iter().rev().find_map(|e| e.exchange_rate);

    let (remaining_crc, remaining_usd, is_settled) = match trip_price.currency() {
        Currency::CRC => {
            let target_crc = trip_price.amount();
            let remaining_crc = target_crc.checked_sub(&total_paid_normalized_crc)?;
            // A dollar payment against a colón-priced trip is a credit,
            // tracked as negative remaining rather than discarded
            let remaining_usd = -total_paid_usd;
            let is_settled = total_paid_normalized_crc.amount() >= target_crc.amount();
            (remaining_crc, remaining_usd, is_settled)
        }
        Currency::USD => {
            let price_usd = trip_price.amount();
            let remaining_usd = price_usd.checked_sub(&total_paid_usd)?;
            let settled_via_usd = total_paid_usd.amount() >= price_usd.amount();
            match last_exchange_rate {
                Some(rate) => {
                    let target_crc = rate.convert(&price_usd)?;
                    let remaining_crc = target_crc.checked_sub(&total_paid_normalized_crc)?;
                    let settled_via_crc = target_crc.is_positive()
                        && total_paid_normalized_crc.amount() >= target_crc.amount();
                    (remaining_crc, remaining_usd, settled_via_crc || settled_via_usd)
                }
                // Without a recorded rate the colón target is undefined;
                // the colón balance reports as zero while the dollar
                // balance stays meaningful
                None => (Money::zero(Currency::CRC), remaining_usd, settled_via_usd),
            }
        }
    };

    let status = classify(&sorted, is_settled, &total_paid_crc, &total_paid_usd);

    Ok(SettlementResult {
        total_paid_crc,
        total_paid_usd,
        total_paid_normalized_crc,
        remaining_crc,
        remaining_usd,
        is_settled,
        last_exchange_rate,
        has_unconverted_usd,
        status,
    })
}

/// Returns the companion headcount currently in force
///
/// The count of the most recent entry that declared one; a new declaration
/// replaces the previous figure rather than adding to it. Zero when no
/// entry ever declared a count.
pub fn current_companion_count(entries: &[InstallmentEntry]) -> u32 {
    sort_by_timestamp(entries)
        .iter()
        .rev()
        .find_map(|e| e.companion_count)
        .unwrap_or(0)
}

/// Removes an entry by id
///
/// Pure filter: the surviving entries are untouched and the caller is
/// expected to recompute the settlement from the returned list. Removing
/// an id that is not present returns an equal list.
pub fn remove_entry(entries: &[InstallmentEntry], id: InstallmentId) -> Vec<InstallmentEntry> {
    entries.iter().filter(|e| e.id != id).cloned().collect()
}

/// Stable timestamp sort; insertion order is preserved for ties
fn sort_by_timestamp(entries: &[InstallmentEntry]) -> Vec<&InstallmentEntry> {
    let mut sorted: Vec<&InstallmentEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}

fn classify(
    sorted: &[&InstallmentEntry],
    is_settled: bool,
    total_paid_crc: &Money,
    total_paid_usd: &Money,
) -> SettlementStatus {
    if matches!(sorted.last(), Some(e) if e.kind == EntryKind::Cancellation) {
        return SettlementStatus::Cancelled;
    }
    if is_settled {
        return SettlementStatus::Paid;
    }
    if total_paid_crc.is_positive() || total_paid_usd.is_positive() {
        return SettlementStatus::Partial;
    }
    SettlementStatus::Reserved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn crc_price(units: i64) -> TripPrice {
        TripPrice::new(Money::from_whole(units, Currency::CRC))
    }

    fn usd_price(units: i64) -> TripPrice {
        TripPrice::new(Money::from_whole(units, Currency::USD))
    }

    fn rate(value: i64) -> ExchangeRate {
        ExchangeRate::new(Decimal::from(value)).unwrap()
    }

    #[test]
    fn test_empty_ledger_is_reserved() {
        let result = settle(&crc_price(40000), &[]).unwrap();

        assert!(result.total_paid_crc.is_zero());
        assert!(result.total_paid_usd.is_zero());
        assert_eq!(result.remaining_crc, Money::from_whole(40000, Currency::CRC));
        assert!(!result.is_settled);
        assert!(result.last_exchange_rate.is_none());
        assert_eq!(result.status, SettlementStatus::Reserved);
    }

    #[test]
    fn test_crc_only_payments_accumulate() {
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(9)).with_amount_crc(dec!(10000)),
            InstallmentEntry::new(EntryKind::Deposit, at(10)).with_amount_crc(dec!(15000)),
        ];

        let result = settle(&crc_price(40000), &entries).unwrap();

        assert_eq!(result.total_paid_crc.amount(), dec!(25000));
        assert_eq!(result.total_paid_normalized_crc.amount(), dec!(25000));
        assert_eq!(result.remaining_crc.amount(), dec!(15000));
        assert!(!result.is_settled);
        assert_eq!(result.status, SettlementStatus::Partial);
    }

    #[test]
    fn test_usd_converts_at_entry_rate() {
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(9))
                .with_amount_usd(dec!(50))
                .with_exchange_rate(rate(520)),
            InstallmentEntry::new(EntryKind::Deposit, at(10)).with_amount_crc(dec!(10000)),
        ];

        let result = settle(&usd_price(100), &entries).unwrap();

        assert_eq!(result.total_paid_normalized_crc.amount(), dec!(36000));
        assert_eq!(result.last_exchange_rate, Some(rate(520)));
        assert_eq!(result.remaining_crc.amount(), dec!(16000));
        assert!(!result.is_settled);
    }

    #[test]
    fn test_historical_rates_are_preserved() {
        // Two dollar entries at different rates convert independently
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(9))
                .with_amount_usd(dec!(10))
                .with_exchange_rate(rate(500)),
            InstallmentEntry::new(EntryKind::Deposit, at(10))
                .with_amount_usd(dec!(10))
                .with_exchange_rate(rate(540)),
        ];

        let result = settle(&crc_price(40000), &entries).unwrap();

        assert_eq!(result.total_paid_normalized_crc.amount(), dec!(10400));
        assert_eq!(result.last_exchange_rate, Some(rate(540)));
    }

    #[test]
    fn test_unrated_usd_sets_flag_and_stays_out_of_normalized() {
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(9)).with_amount_crc(dec!(5000)),
            InstallmentEntry::new(EntryKind::Deposit, at(10)).with_amount_usd(dec!(20)),
        ];

        let result = settle(&crc_price(40000), &entries).unwrap();

        assert!(result.has_unconverted_usd);
        assert_eq!(result.total_paid_normalized_crc.amount(), dec!(5000));
        assert_eq!(result.total_paid_usd.amount(), dec!(20));
    }

    #[test]
    fn test_usd_against_crc_trip_is_a_credit() {
        let entries = vec![InstallmentEntry::new(EntryKind::Deposit, at(9))
            .with_amount_usd(dec!(30))
            .with_exchange_rate(rate(500))];

        let result = settle(&crc_price(40000), &entries).unwrap();

        assert_eq!(result.remaining_usd.amount(), dec!(-30));
    }

    #[test]
    fn test_usd_trip_without_rate_reports_zero_crc_target() {
        let entries =
            vec![InstallmentEntry::new(EntryKind::Deposit, at(9)).with_amount_usd(dec!(40))];

        let result = settle(&usd_price(100), &entries).unwrap();

        // No rate ever recorded: colón view is undefined, reported as zero
        assert!(result.last_exchange_rate.is_none());
        assert_eq!(result.remaining_crc.amount(), dec!(0));
        assert_eq!(result.remaining_usd.amount(), dec!(60));
        assert!(!result.is_settled);
        assert!(result.has_unconverted_usd);
    }

    #[test]
    fn test_settled_via_raw_usd_total() {
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(9))
                .with_amount_usd(dec!(50))
                .with_exchange_rate(rate(520)),
            InstallmentEntry::new(EntryKind::Deposit, at(10)).with_amount_crc(dec!(10000)),
            InstallmentEntry::new(EntryKind::Deposit, at(11))
                .with_amount_usd(dec!(50))
                .with_exchange_rate(rate(520)),
        ];

        let result = settle(&usd_price(100), &entries).unwrap();

        assert_eq!(result.total_paid_usd.amount(), dec!(100));
        assert!(result.is_settled);
        assert_eq!(result.status, SettlementStatus::Paid);
    }

    #[test]
    fn test_overpayment_goes_negative() {
        let entries =
            vec![InstallmentEntry::new(EntryKind::Deposit, at(9)).with_amount_crc(dec!(45000))];

        let result = settle(&crc_price(40000), &entries).unwrap();

        assert_eq!(result.remaining_crc.amount(), dec!(-5000));
        assert!(result.is_settled);
        assert_eq!(result.status, SettlementStatus::Paid);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let entries =
            vec![InstallmentEntry::new(EntryKind::Deposit, at(9)).with_amount_crc(dec!(-100))];

        let err = settle(&crc_price(40000), &entries).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::NegativeAmount { field: "amount_crc", .. }
        ));
    }

    #[test]
    fn test_cancellation_amounts_still_sum() {
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(9)).with_amount_crc(dec!(10000)),
            InstallmentEntry::new(EntryKind::Cancellation, at(10)).with_amount_crc(dec!(5000)),
        ];

        let result = settle(&crc_price(40000), &entries).unwrap();

        assert_eq!(result.total_paid_crc.amount(), dec!(15000));
        assert_eq!(result.status, SettlementStatus::Cancelled);
    }

    #[test]
    fn test_unsorted_entries_are_sorted_before_latest_derivations() {
        // Later entry listed first; its rate must still win
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(11))
                .with_amount_usd(dec!(10))
                .with_exchange_rate(rate(540)),
            InstallmentEntry::new(EntryKind::Deposit, at(9))
                .with_amount_usd(dec!(10))
                .with_exchange_rate(rate(500)),
        ];

        let result = settle(&crc_price(40000), &entries).unwrap();
        assert_eq!(result.last_exchange_rate, Some(rate(540)));
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let entries = vec![
            InstallmentEntry::new(EntryKind::Deposit, at(9))
                .with_amount_usd(dec!(10))
                .with_exchange_rate(rate(500)),
            InstallmentEntry::new(EntryKind::Deposit, at(9))
                .with_amount_usd(dec!(10))
                .with_exchange_rate(rate(540)),
        ];

        let result = settle(&crc_price(40000), &entries).unwrap();
        assert_eq!(result.last_exchange_rate, Some(rate(540)));
    }

    #[test]
    fn test_companion_count_replaces_not_accumulates() {
        let entries = vec![
            InstallmentEntry::new(EntryKind::Reservation, at(9)).with_companions(0, vec![]),
            InstallmentEntry::new(EntryKind::Deposit, at(10))
                .with_companions(2, vec!["Ana".into(), "Luis".into()]),
            InstallmentEntry::new(EntryKind::Deposit, at(11)).with_companions(1, vec!["Ana".into()]),
        ];

        assert_eq!(current_companion_count(&entries), 1);
    }

    #[test]
    fn test_companion_count_defaults_to_zero() {
        let entries = vec![InstallmentEntry::new(EntryKind::Deposit, at(9))];
        assert_eq!(current_companion_count(&entries), 0);
    }

    #[test]
    fn test_remove_entry_filters_by_id() {
        let keep = InstallmentEntry::new(EntryKind::Deposit, at(9)).with_amount_crc(dec!(10000));
        let drop = InstallmentEntry::new(EntryKind::Deposit, at(10)).with_amount_crc(dec!(5000));

        let remaining = remove_entry(&[keep.clone(), drop.clone()], drop.id);

        assert_eq!(remaining, vec![keep]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let entries = vec![InstallmentEntry::new(EntryKind::Deposit, at(9))];
        let remaining = remove_entry(&entries, InstallmentId::new());
        assert_eq!(remaining, entries);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn entry_at(minute: u32, crc: i64, usd: i64, rate_value: Option<i64>) -> InstallmentEntry {
        let timestamp = chrono::Utc
            .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
            .unwrap()
            + chrono::Duration::minutes(minute as i64);
        let mut entry = InstallmentEntry::new(EntryKind::Deposit, timestamp)
            .with_amount_crc(Decimal::from(crc))
            .with_amount_usd(Decimal::from(usd));
        if let Some(value) = rate_value {
            entry = entry.with_exchange_rate(ExchangeRate::new(Decimal::from(value)).unwrap());
        }
        entry
    }

    proptest! {
        #[test]
        fn appending_never_decreases_normalized_total(
            amounts in prop::collection::vec((0i64..100_000, 0i64..1_000, 400i64..600), 0..10),
            extra_crc in 0i64..100_000,
            extra_usd in 0i64..1_000,
        ) {
            let price = TripPrice::new(Money::from_whole(500_000, Currency::CRC));
            let mut entries: Vec<InstallmentEntry> = amounts
                .iter()
                .enumerate()
                .map(|(i, &(crc, usd, rate))| entry_at(i as u32, crc, usd, Some(rate)))
                .collect();

            let before = settle(&price, &entries).unwrap();
            entries.push(entry_at(entries.len() as u32, extra_crc, extra_usd, Some(520)));
            let after = settle(&price, &entries).unwrap();

            prop_assert!(
                after.total_paid_normalized_crc.amount() >= before.total_paid_normalized_crc.amount()
            );
            prop_assert!(after.remaining_crc.amount() <= before.remaining_crc.amount());
        }

        #[test]
        fn removal_matches_never_inserted(
            amounts in prop::collection::vec((0i64..100_000, 0i64..1_000), 1..8),
            victim_index in 0usize..8,
        ) {
            let price = TripPrice::new(Money::from_whole(500_000, Currency::CRC));
            let entries: Vec<InstallmentEntry> = amounts
                .iter()
                .enumerate()
                .map(|(i, &(crc, usd))| entry_at(i as u32, crc, usd, Some(520)))
                .collect();
            let victim_index = victim_index % entries.len();
            let victim_id = entries[victim_index].id;

            let mut never_inserted = entries.clone();
            never_inserted.remove(victim_index);

            let removed = remove_entry(&entries, victim_id);
            prop_assert_eq!(
                settle(&price, &removed).unwrap(),
                settle(&price, &never_inserted).unwrap()
            );
        }

        #[test]
        fn settle_is_order_insensitive_for_totals(
            amounts in prop::collection::vec((0i64..100_000, 0i64..1_000), 0..8),
        ) {
            let price = TripPrice::new(Money::from_whole(500_000, Currency::CRC));
            let entries: Vec<InstallmentEntry> = amounts
                .iter()
                .enumerate()
                .map(|(i, &(crc, usd))| entry_at(i as u32, crc, usd, Some(520)))
                .collect();

            let mut reversed = entries.clone();
            reversed.reverse();

            let forward = settle(&price, &entries).unwrap();
            let backward = settle(&price, &reversed).unwrap();
            prop_assert_eq!(forward, backward);
        }
    }
}
