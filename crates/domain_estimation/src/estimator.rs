//! Trip cost estimation
//!
//! Computes general (whole-group) and individual (per-person) totals per
//! bucket, an overall per-person cost, and profit margins against a target
//! package price. The computation is pure: one request in, one result out.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::Money;

use crate::category::{CostBucket, CostCategory, GuideMode};
use crate::error::EstimationError;

/// A single estimation request
///
/// Created fresh per estimation call and never mutated; the request has no
/// identity beyond the call itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationRequest {
    /// Group size used as the proration denominator
    pub capacity: u32,
    /// Target package price per person
    pub package_price_per_person: Money,
    /// How guide cost lines are interpreted
    pub guide_mode: GuideMode,
    /// Flat list of cost lines, each tagged with its bucket
    pub categories: Vec<CostCategory>,
}

impl EstimationRequest {
    /// Creates a request with no cost lines
    pub fn new(capacity: u32, package_price_per_person: Money, guide_mode: GuideMode) -> Self {
        Self {
            capacity,
            package_price_per_person,
            guide_mode,
            categories: Vec::new(),
        }
    }

    /// Adds a cost line
    pub fn category(mut self, category: CostCategory) -> Self {
        self.categories.push(category);
        self
    }
}

/// General and individual totals for one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotals {
    /// Whole-group total
    pub general: Money,
    /// Per-person share
    pub individual: Money,
}

/// The result of a cost estimation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Totals per bucket; every bucket is present, zero-valued if unused
    pub totals_by_bucket: BTreeMap<CostBucket, BucketTotals>,
    /// Per-person cost across all buckets
    pub individual_total: Money,
    /// Whole-group cost (individual total times capacity)
    pub general_total: Money,
    /// Package price minus per-person cost; negative signals a loss
    pub profit_per_person: Money,
    /// Per-person profit times capacity
    pub profit_total: Money,
}

/// Estimates a trip's cost structure
///
/// Transport and guide lines are whole-group figures prorated by capacity
/// (guides optionally entered per-person, see [`GuideMode`]); personal
/// lines are per-person and never divided. All monetary results are
/// rounded to whole currency units at the point each bucket total is
/// produced.
///
/// A capacity of zero is normalized to 1: an estimate with unknown group
/// size is read as "per one person" rather than rejected.
///
/// # Errors
///
/// Returns `EstimationError` if any cost line has a negative unit price or
/// is priced in a different currency than the package price. Validation
/// happens before any computation.
pub fn estimate(request: &EstimationRequest) -> Result<EstimationResult, EstimationError> {
    let currency = request.package_price_per_person.currency();

    for category in &request.categories {
        let label = category
            .label
            .clone()
            .unwrap_or_else(|| category.bucket.name().to_string());

        if category.unit_price.is_negative() {
            return Err(EstimationError::NegativeUnitPrice {
                label,
                amount: category.unit_price.amount(),
            });
        }
        if category.unit_price.currency() != currency {
            return Err(EstimationError::CurrencyMismatch {
                label,
                expected: currency.to_string(),
                found: category.unit_price.currency().to_string(),
            });
        }
    }

    let capacity = if request.capacity == 0 {
        warn!("estimation requested with zero capacity, normalizing to 1");
        1
    } else {
        request.capacity
    };
    let capacity_factor = Decimal::from(capacity);

    let bucket_sum = |bucket: CostBucket| -> Money {
        request
            .categories
            .iter()
            .filter(|c| c.bucket == bucket)
            .fold(Money::zero(currency), |acc, c| acc + c.line_total())
    };

    let transport_general = bucket_sum(CostBucket::Transport).round_whole();
    let transport_individual = transport_general.divide(capacity_factor)?.round_whole();

    let guides_sum = bucket_sum(CostBucket::Guides);
    let (guides_general, guides_individual) = match request.guide_mode {
        GuideMode::PerGroup => {
            let general = guides_sum.round_whole();
            let individual = general.divide(capacity_factor)?.round_whole();
            (general, individual)
        }
        GuideMode::PerPerson => {
            let individual = guides_sum.round_whole();
            let general = individual.multiply(capacity_factor).round_whole();
            (general, individual)
        }
    };

    let personal_individual = bucket_sum(CostBucket::Personal).round_whole();
    let personal_general = personal_individual.multiply(capacity_factor).round_whole();

    let individual_total = transport_individual + guides_individual + personal_individual;
    let general_total = individual_total.multiply(capacity_factor).round_whole();

    let profit_per_person = request.package_price_per_person - individual_total;
    let profit_total = profit_per_person.multiply(capacity_factor).round_whole();

    let mut totals_by_bucket = BTreeMap::new();
    totals_by_bucket.insert(
        CostBucket::Transport,
        BucketTotals {
            general: transport_general,
            individual: transport_individual,
        },
    );
    totals_by_bucket.insert(
        CostBucket::Guides,
        BucketTotals {
            general: guides_general,
            individual: guides_individual,
        },
    );
    totals_by_bucket.insert(
        CostBucket::Personal,
        BucketTotals {
            general: personal_general,
            individual: personal_individual,
        },
    );

    Ok(EstimationResult {
        totals_by_bucket,
        individual_total,
        general_total,
        profit_per_person,
        profit_total,
    })
}
