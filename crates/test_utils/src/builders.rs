//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::{DateTime, Duration, Utc};
use core_kernel::{ExchangeRate, Money};
use rust_decimal::Decimal;

use domain_estimation::{CostBucket, CostCategory, EstimationRequest, GuideMode};
use domain_ledger::{EntryKind, InstallmentEntry};

use crate::fixtures::{MoneyFixtures, TemporalFixtures};

/// Builder for constructing estimation requests
pub struct EstimationRequestBuilder {
    capacity: u32,
    package_price_per_person: Money,
    guide_mode: GuideMode,
    categories: Vec<CostCategory>,
}

impl Default for EstimationRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimationRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            capacity: 10,
            package_price_per_person: MoneyFixtures::crc_package_price(),
            guide_mode: GuideMode::PerGroup,
            categories: Vec::new(),
        }
    }

    /// Sets the group capacity
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the package price per person
    pub fn with_package_price(mut self, price: Money) -> Self {
        self.package_price_per_person = price;
        self
    }

    /// Sets the guide input mode
    pub fn with_guide_mode(mut self, mode: GuideMode) -> Self {
        self.guide_mode = mode;
        self
    }

    /// Adds a transport line
    pub fn with_transport(mut self, unit_price: Money, quantity: u32) -> Self {
        self.categories
            .push(CostCategory::new(CostBucket::Transport, unit_price).with_quantity(quantity));
        self
    }

    /// Adds a guide line
    pub fn with_guides(mut self, unit_price: Money, quantity: u32) -> Self {
        self.categories
            .push(CostCategory::new(CostBucket::Guides, unit_price).with_quantity(quantity));
        self
    }

    /// Adds a personal line
    pub fn with_personal(mut self, unit_price: Money, quantity: u32) -> Self {
        self.categories
            .push(CostCategory::new(CostBucket::Personal, unit_price).with_quantity(quantity));
        self
    }

    /// Builds the estimation request
    pub fn build(self) -> EstimationRequest {
        let mut request = EstimationRequest::new(
            self.capacity,
            self.package_price_per_person,
            self.guide_mode,
        );
        for category in self.categories {
            request = request.category(category);
        }
        request
    }
}

/// Builder for a participant's chronological entry list
///
/// Each recorded entry is stamped one day after the previous one, so the
/// list is always in ascending timestamp order without tests having to
/// manage dates.
pub struct LedgerBuilder {
    next_timestamp: DateTime<Utc>,
    entries: Vec<InstallmentEntry>,
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerBuilder {
    /// Creates a builder starting at the standard registration date
    pub fn new() -> Self {
        Self {
            next_timestamp: TemporalFixtures::registration_open(),
            entries: Vec::new(),
        }
    }

    /// Records a colón deposit
    pub fn deposit_crc(self, amount: Decimal) -> Self {
        self.push(EntryKind::Deposit, |e| e.with_amount_crc(amount))
    }

    /// Records a dollar deposit at the given rate
    pub fn deposit_usd(self, amount: Decimal, rate: ExchangeRate) -> Self {
        self.push(EntryKind::Deposit, |e| {
            e.with_amount_usd(amount).with_exchange_rate(rate)
        })
    }

    /// Records a dollar deposit with no recorded rate
    pub fn deposit_usd_unrated(self, amount: Decimal) -> Self {
        self.push(EntryKind::Deposit, |e| e.with_amount_usd(amount))
    }

    /// Records a reservation declaring a companion headcount
    pub fn reservation(self, companions: u32, names: Vec<String>) -> Self {
        self.push(EntryKind::Reservation, |e| {
            e.with_companions(companions, names)
        })
    }

    /// Records a cancellation marker
    pub fn cancellation(self) -> Self {
        self.push(EntryKind::Cancellation, |e| e)
    }

    /// Builds the entry list
    pub fn build(self) -> Vec<InstallmentEntry> {
        self.entries
    }

    fn push(
        mut self,
        kind: EntryKind,
        configure: impl FnOnce(InstallmentEntry) -> InstallmentEntry,
    ) -> Self {
        let entry = configure(InstallmentEntry::new(kind, self.next_timestamp));
        self.entries.push(entry);
        self.next_timestamp = self.next_timestamp + Duration::days(1);
        self
    }
}
