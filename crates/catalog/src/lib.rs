//! Catalog management and reporting over the pricing engine.
//!
//! The engine prices products; this crate owns the ordered catalog around it:
//! duplicate-code enforcement, import normalization, filtering, and the
//! report/dashboard aggregations. Still pure domain logic — persistence of
//! the catalog itself stays with the storage collaborator.

pub mod catalog;
pub mod report;

pub use catalog::{Catalog, DEFAULT_CATEGORY, DEFAULT_DESIRED_MARGIN_PCT};
pub use report::{
    CategorySummary, Finding, LOW_MARGIN_FLOOR_PCT, PRICE_DRIFT_RATIO, SummaryStats, by_category,
    bottom_by_net_margin, findings, summary, top_by_net_margin,
};
