//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the trip
//! settlement system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{Currency, ExchangeRate, InstallmentId, Money, ParticipantId, TripId};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard package price per person (₡40,000)
    pub fn crc_package_price() -> Money {
        Money::new(dec!(40000), Currency::CRC)
    }

    /// Whole-group bus cost for a two-leg trip
    pub fn crc_bus_leg() -> Money {
        Money::new(dec!(100000), Currency::CRC)
    }

    /// Standard guide day rate
    pub fn crc_guide_day() -> Money {
        Money::new(dec!(50000), Currency::CRC)
    }

    /// Standard meal price
    pub fn crc_meal() -> Money {
        Money::new(dec!(3000), Currency::CRC)
    }

    /// A dollar-denominated package price ($100)
    pub fn usd_package_price() -> Money {
        Money::new(dec!(100), Currency::USD)
    }

    /// A typical dollar installment ($50)
    pub fn usd_installment() -> Money {
        Money::new(dec!(50), Currency::USD)
    }

    /// A zero colón amount
    pub fn crc_zero() -> Money {
        Money::zero(Currency::CRC)
    }

    /// The reference exchange rate (₡520 per dollar)
    pub fn rate_520() -> ExchangeRate {
        ExchangeRate::new(dec!(520)).unwrap()
    }

    /// An older, lower exchange rate
    pub fn rate_500() -> ExchangeRate {
        ExchangeRate::new(dec!(500)).unwrap()
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// When registrations for the test trip open
    pub fn registration_open() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    /// A first installment early in the payment window
    pub fn first_payment() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()
    }

    /// A second installment a week later
    pub fn second_payment() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 12, 14, 0, 0).unwrap()
    }

    /// A final installment just before departure
    pub fn final_payment() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 2, 9, 15, 0).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic trip ID for testing
    pub fn trip_id() -> TripId {
        TripId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic participant ID for testing
    pub fn participant_id() -> ParticipantId {
        ParticipantId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic installment ID for testing
    pub fn installment_id() -> InstallmentId {
        InstallmentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }
}
