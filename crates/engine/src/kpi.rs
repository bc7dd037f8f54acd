//! KPI aggregation over a priced catalog.

use serde::{Deserialize, Serialize};

use pricebook_core::round2;

use crate::config::Config;
use crate::product::PricedProduct;

/// Read-only dashboard figures derived from a priced catalog.
///
/// Holds no independent state; recompute on demand. Numeric figures are
/// rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kpis {
    /// Mean of the desired margins, over products that carry one.
    pub avg_desired_margin_pct: f64,
    /// Mean of the estimated net margins.
    pub avg_net_margin_pct: f64,
    /// Σ (final price − total cost) over the catalog.
    pub total_profit: f64,
    pub catalog_size: usize,
}

/// Aggregate KPIs over a priced catalog.
///
/// `_config` is accepted for future configuration-sensitive figures and is
/// currently unused by the formulas. An empty catalog yields all-zero KPIs.
pub fn compute_kpis(products: &[PricedProduct], _config: &Config) -> Kpis {
    if products.is_empty() {
        return Kpis::default();
    }

    // Mean over the products that carry a desired margin; absent values are
    // dropped from both numerator and denominator.
    let desired: Vec<f64> = products
        .iter()
        .filter_map(|p| p.product.desired_margin_pct)
        .collect();
    let avg_desired_margin_pct = if desired.is_empty() {
        0.0
    } else {
        desired.iter().sum::<f64>() / desired.len() as f64
    };

    let avg_net_margin_pct =
        products.iter().map(|p| p.net_margin_pct).sum::<f64>() / products.len() as f64;
    let total_profit = products.iter().map(PricedProduct::unit_profit).sum::<f64>();

    Kpis {
        avg_desired_margin_pct: round2(avg_desired_margin_pct),
        avg_net_margin_pct: round2(avg_net_margin_pct),
        total_profit: round2(total_profit),
        catalog_size: products.len(),
    }
}
