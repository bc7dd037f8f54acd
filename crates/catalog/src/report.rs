//! Report and dashboard aggregations over a priced catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pricebook_core::round2;
use pricebook_engine::PricedProduct;

/// Net margin floor below which a product is flagged for attention.
pub const LOW_MARGIN_FLOOR_PCT: f64 = 20.0;

/// Fraction of the suggested price past which a final-price override is
/// flagged as drift.
pub const PRICE_DRIFT_RATIO: f64 = 0.2;

/// Quick statistics shown next to the pricing table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub product_count: usize,
    pub avg_total_cost: f64,
    pub avg_final_price: f64,
    pub avg_net_margin_pct: f64,
}

/// Compute table-side summary statistics. Empty catalog yields zeros.
pub fn summary(products: &[PricedProduct]) -> SummaryStats {
    if products.is_empty() {
        return SummaryStats::default();
    }
    let n = products.len() as f64;
    SummaryStats {
        product_count: products.len(),
        avg_total_cost: round2(products.iter().map(|p| p.total_cost).sum::<f64>() / n),
        avg_final_price: round2(products.iter().map(|p| p.final_price()).sum::<f64>() / n),
        avg_net_margin_pct: round2(products.iter().map(|p| p.net_margin_pct).sum::<f64>() / n),
    }
}

/// Per-category rollup for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub product_count: usize,
    pub avg_net_margin_pct: f64,
    pub total_profit: f64,
}

/// Group the catalog by category, sorted by category name.
pub fn by_category(products: &[PricedProduct]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&str, Vec<&PricedProduct>> = BTreeMap::new();
    for product in products {
        groups
            .entry(product.product.category.as_str())
            .or_default()
            .push(product);
    }

    groups
        .into_iter()
        .map(|(category, members)| {
            let n = members.len() as f64;
            CategorySummary {
                category: category.to_string(),
                product_count: members.len(),
                avg_net_margin_pct: round2(
                    members.iter().map(|p| p.net_margin_pct).sum::<f64>() / n,
                ),
                total_profit: round2(members.iter().map(|p| p.unit_profit()).sum::<f64>()),
            }
        })
        .collect()
}

/// The `limit` most profitable products by net margin, descending.
pub fn top_by_net_margin(products: &[PricedProduct], limit: usize) -> Vec<&PricedProduct> {
    let mut ranked: Vec<&PricedProduct> = products.iter().collect();
    ranked.sort_by(|a, b| b.net_margin_pct.total_cmp(&a.net_margin_pct));
    ranked.truncate(limit);
    ranked
}

/// The `limit` least profitable products by net margin, ascending.
pub fn bottom_by_net_margin(products: &[PricedProduct], limit: usize) -> Vec<&PricedProduct> {
    let mut ranked: Vec<&PricedProduct> = products.iter().collect();
    ranked.sort_by(|a, b| a.net_margin_pct.total_cmp(&b.net_margin_pct));
    ranked.truncate(limit);
    ranked
}

/// An advisory surfaced on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Finding {
    /// Net margin sits below [`LOW_MARGIN_FLOOR_PCT`].
    LowMargin { code: String, net_margin_pct: f64 },
    /// Final price drifted more than [`PRICE_DRIFT_RATIO`] of the suggested
    /// price away from it.
    PriceDrift {
        code: String,
        price_delta: f64,
        suggested_price: f64,
    },
}

/// Scan the catalog for products worth the operator's attention.
pub fn findings(products: &[PricedProduct]) -> Vec<Finding> {
    let mut found = Vec::new();
    for product in products {
        if product.net_margin_pct < LOW_MARGIN_FLOOR_PCT {
            found.push(Finding::LowMargin {
                code: product.product.code.clone(),
                net_margin_pct: product.net_margin_pct,
            });
        }
        if product.price_delta.abs() > product.suggested_price * PRICE_DRIFT_RATIO {
            found.push(Finding::PriceDrift {
                code: product.product.code.clone(),
                price_delta: product.price_delta,
                suggested_price: product.suggested_price,
            });
        }
    }
    found
}
