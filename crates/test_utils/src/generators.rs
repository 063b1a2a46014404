//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants, plus fake-data helpers for
//! free-text fields.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{Currency, ExchangeRate, Money};
use fake::faker::name::en::FirstName;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_estimation::{CostBucket, CostCategory, GuideMode};
use domain_ledger::{EntryKind, InstallmentEntry};

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::CRC), Just(Currency::USD)]
}

/// Strategy for generating non-negative whole-unit amounts
pub fn whole_amount_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000i64
}

/// Strategy for generating Money in colones
pub fn crc_money_strategy() -> impl Strategy<Value = Money> {
    whole_amount_strategy().prop_map(|units| Money::from_whole(units, Currency::CRC))
}

/// Strategy for generating Money in dollars
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    (0i64..10_000i64).prop_map(|units| Money::from_whole(units, Currency::USD))
}

/// Strategy for generating plausible exchange rates (₡300–₡800 per dollar)
pub fn exchange_rate_strategy() -> impl Strategy<Value = ExchangeRate> {
    (300i64..800i64).prop_map(|value| {
        ExchangeRate::new(Decimal::from(value)).expect("strategy range is positive")
    })
}

/// Strategy for generating cost buckets
pub fn cost_bucket_strategy() -> impl Strategy<Value = CostBucket> {
    prop_oneof![
        Just(CostBucket::Transport),
        Just(CostBucket::Guides),
        Just(CostBucket::Personal),
    ]
}

/// Strategy for generating guide input modes
pub fn guide_mode_strategy() -> impl Strategy<Value = GuideMode> {
    prop_oneof![Just(GuideMode::PerGroup), Just(GuideMode::PerPerson)]
}

/// Strategy for generating cost lines in colones
pub fn cost_category_strategy() -> impl Strategy<Value = CostCategory> {
    (cost_bucket_strategy(), crc_money_strategy(), 0u32..10).prop_map(
        |(bucket, unit_price, quantity)| {
            CostCategory::new(bucket, unit_price).with_quantity(quantity)
        },
    )
}

/// Strategy for generating entry kinds
pub fn entry_kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![
        Just(EntryKind::Deposit),
        Just(EntryKind::Reservation),
        Just(EntryKind::Cancellation),
    ]
}

/// Strategy for generating a single installment entry
///
/// The `sequence` index spaces timestamps a day apart so a generated list
/// is chronological by construction.
pub fn installment_entry_strategy(sequence: u32) -> impl Strategy<Value = InstallmentEntry> {
    (
        entry_kind_strategy(),
        0i64..500_000i64,
        0i64..1_000i64,
        proptest::option::of(exchange_rate_strategy()),
        proptest::option::of(0u32..5),
    )
        .prop_map(move |(kind, crc, usd, rate, companions)| {
            let mut entry = InstallmentEntry::new(kind, base_timestamp(sequence))
                .with_amount_crc(Decimal::from(crc))
                .with_amount_usd(Decimal::from(usd));
            if let Some(rate) = rate {
                entry = entry.with_exchange_rate(rate);
            }
            if let Some(count) = companions {
                entry = entry.with_companions(count, random_companion_names(count as usize));
            }
            entry
        })
}

/// Strategy for generating a chronological entry list
pub fn entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<InstallmentEntry>> {
    (0..=max_len).prop_flat_map(|len| {
        (0..len)
            .map(|i| installment_entry_strategy(i as u32))
            .collect::<Vec<_>>()
    })
}

/// Generates realistic companion names for free-text fields
pub fn random_companion_names(count: usize) -> Vec<String> {
    (0..count).map(|_| FirstName().fake()).collect()
}

fn base_timestamp(sequence: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::days(sequence as i64)
}
