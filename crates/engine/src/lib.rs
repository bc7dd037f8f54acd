//! Markup pricing engine (pure domain logic).
//!
//! This crate derives a markup multiplier from a cost configuration and
//! applies it to a product catalog, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage). Callers own persistence and
//! mutation; every operation here takes immutable inputs and returns new
//! values.
//!
//! Entry points:
//! - [`derive_markup`] — cost configuration to markup divisor/multiplier.
//! - [`price_product`] — one product through the markup formula.
//! - [`recompute_catalog`] — the whole catalog, order preserved.
//! - [`compute_kpis`] — aggregate view over a priced catalog.
//! - [`check_config`] — pre-flight check before saving a configuration.

pub mod config;
pub mod kpi;
pub mod markup;
pub mod product;

pub use config::Config;
pub use kpi::{Kpis, compute_kpis};
pub use markup::{
    ConfigCheck, InfeasibleCostStructure, MarkupResult, check_config, derive_markup,
};
pub use product::{PricedProduct, Product, price_product, recompute_catalog};
