//! `pricebook-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod rounding;

pub use error::{DomainError, DomainResult};
pub use rounding::{round2, round4, round_to};
