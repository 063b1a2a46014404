//! Estimation Domain - Trip Cost Proration
//!
//! This crate computes a group trip's cost structure from flat cost lines:
//! whole-group and per-person totals per bucket, the overall per-person
//! cost, and the profit margin against a target package price.
//!
//! # Proration Rules
//!
//! - **Transport** lines are whole-group figures divided by capacity
//! - **Guides** lines are entered per-group or per-person ([`GuideMode`])
//! - **Personal** lines (lodging, meals, fees, permits) are per-person and
//!   never divided
//!
//! All monetary results are whole currency units; rounding happens where
//! each bucket total is produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_estimation::{estimate, CostBucket, CostCategory, EstimationRequest, GuideMode};
//!
//! let request = EstimationRequest::new(10, package_price, GuideMode::PerGroup)
//!     .category(CostCategory::new(CostBucket::Transport, bus_price).with_quantity(2));
//!
//! let result = estimate(&request)?;
//! println!("per person: {}", result.individual_total);
//! ```

pub mod category;
pub mod error;
pub mod estimator;

pub use category::{CostBucket, CostCategory, GuideMode};
pub use error::EstimationError;
pub use estimator::{estimate, BucketTotals, EstimationRequest, EstimationResult};
