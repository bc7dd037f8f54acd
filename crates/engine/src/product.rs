//! Product records and per-product price computation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use pricebook_core::{round2, round4};

/// Raw product record as supplied by the caller.
///
/// `code` is unique within a catalog; uniqueness is enforced by the catalog
/// layer, not by the pricing functions. Missing numeric fields default to
/// zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub code: String,
    pub name: String,
    pub purchase_cost: f64,
    pub additional_expenses: f64,
    /// Margin the operator is aiming for. Absent values are dropped from the
    /// KPI mean rather than counted as zero.
    pub desired_margin_pct: Option<f64>,
    /// Caller-supplied sale price. Zero or less means "use the suggested
    /// price"; the sentinel is resolved by [`price_product`].
    pub final_price: f64,
    pub category: String,
    pub notes: String,
    /// Presentation-only fields attached by callers; passed through pricing
    /// unmodified.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A product with the engine's derived pricing fields filled in.
///
/// The raw record is flattened into the serialized form, so a priced product
/// reads as one flat mapping at the storage boundary. Repricing overwrites
/// every derived field; the resolved final price is written back into the raw
/// `final_price` field, which makes repricing with an unchanged markup pair a
/// no-op.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricedProduct {
    #[serde(flatten)]
    pub product: Product,
    /// `purchase_cost + additional_expenses`.
    pub total_cost: f64,
    /// Markup divisor expressed as a percentage, rounded to 4 places.
    pub markup_divisor_pct: f64,
    /// Multiplier the prices were computed with.
    pub markup_mult: f64,
    pub suggested_price: f64,
    /// `final_price − suggested_price`.
    pub price_delta: f64,
    /// `(final_price − total_cost) / final_price`, as a percentage of revenue.
    pub net_margin_pct: f64,
}

impl PricedProduct {
    /// Resolved final price (sentinel already substituted).
    pub fn final_price(&self) -> f64 {
        self.product.final_price
    }

    /// Profit on one unit at the final price.
    pub fn unit_profit(&self) -> f64 {
        self.product.final_price - self.total_cost
    }
}

/// Price one product with a previously derived markup pair.
///
/// Callers are responsible for deriving a feasible markup first. A degenerate
/// pair (multiplier 0 from an infeasible derivation) collapses the suggested
/// price to zero; that is defined behavior, not a product-level error.
pub fn price_product(product: &Product, markup_mult: f64, markup_divisor: f64) -> PricedProduct {
    let total_cost = product.purchase_cost + product.additional_expenses;
    let markup_divisor_pct = round4(markup_divisor * 100.0);
    let suggested_price = round2(total_cost * markup_mult);

    // "0-or-less means auto": keep a caller-supplied positive price, fall
    // back to the suggested one otherwise.
    let final_price = if product.final_price > 0.0 {
        product.final_price
    } else {
        suggested_price
    };

    let price_delta = round2(final_price - suggested_price);
    let net_margin_pct = if final_price > 0.0 {
        round2((final_price - total_cost) / final_price * 100.0)
    } else {
        0.0
    };

    let mut product = product.clone();
    product.final_price = final_price;

    PricedProduct {
        product,
        total_cost,
        markup_divisor_pct,
        markup_mult,
        suggested_price,
        price_delta,
        net_margin_pct,
    }
}

/// Reapply pricing to every product in an ordered catalog.
///
/// Each product is priced independently (no cross-product state) and input
/// order is preserved. An empty catalog is a no-op.
pub fn recompute_catalog(
    products: &[PricedProduct],
    markup_mult: f64,
    markup_divisor: f64,
) -> Vec<PricedProduct> {
    if products.is_empty() {
        return Vec::new();
    }

    let repriced: Vec<PricedProduct> = products
        .iter()
        .map(|p| price_product(&p.product, markup_mult, markup_divisor))
        .collect();

    tracing::debug!(count = repriced.len(), markup_mult, "recomputed catalog");
    repriced
}
