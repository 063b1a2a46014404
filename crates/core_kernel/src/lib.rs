//! Core Kernel - Foundational types and utilities for the trip settlement system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic (whole-unit CRC/USD convention)
//! - Exchange rates for per-entry dollar-to-colón conversion
//! - Common identifiers and value objects

pub mod error;
pub mod identifiers;
pub mod money;

pub use error::CoreError;
pub use identifiers::{InstallmentId, ParticipantId, TripId};
pub use money::{Currency, ExchangeRate, Money, MoneyError};
