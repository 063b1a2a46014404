//! Cost categories and proration buckets
//!
//! A trip's operating costs are entered as flat cost lines (bus, guide,
//! lodging, meals) and grouped into buckets that each carry their own
//! proration rule.

use core_kernel::Money;
use serde::{Deserialize, Serialize};

/// Proration bucket for a cost category
///
/// Transport and guide costs are whole-group figures divided by the trip's
/// capacity; personal costs (lodging, meals, entrance fees, permits) are
/// inherently per-person and are never divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBucket {
    Transport,
    Guides,
    Personal,
}

impl CostBucket {
    /// Returns a human-readable bucket name
    pub fn name(&self) -> &'static str {
        match self {
            CostBucket::Transport => "transport",
            CostBucket::Guides => "guides",
            CostBucket::Personal => "personal",
        }
    }
}

/// How guide cost inputs are interpreted
///
/// The estimation form offers two mutually exclusive ways of entering
/// guide costs; the caller picks exactly one, which removes any ambiguity
/// about which figure wins when both could be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideMode {
    /// Guide cost lines are whole-group figures, divided by capacity
    PerGroup,
    /// Guide cost lines are already per-person figures
    PerPerson,
}

/// One cost line of an estimation request
///
/// `quantity` is a repetition count: bus legs, guide days, nights of
/// lodging, meals per day. Non-repeated items (taxes, permits) leave it at
/// the default of 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCategory {
    /// Bucket the line belongs to
    pub bucket: CostBucket,
    /// Price per unit
    pub unit_price: Money,
    /// Repetition count
    pub quantity: u32,
    /// Optional caller-facing label (e.g. "bus", "breakfast")
    pub label: Option<String>,
}

impl CostCategory {
    /// Creates a cost line with a quantity of 1
    pub fn new(bucket: CostBucket, unit_price: Money) -> Self {
        Self {
            bucket,
            unit_price,
            quantity: 1,
            label: None,
        }
    }

    /// Sets the repetition count
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns this line's raw contribution (unit price times quantity)
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity.into())
    }
}
