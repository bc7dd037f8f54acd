//! Ordered product catalog with code uniqueness and import normalization.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pricebook_core::{DomainError, DomainResult};
use pricebook_engine::{
    Config, Kpis, MarkupResult, PricedProduct, Product, compute_kpis, price_product,
    recompute_catalog,
};

/// Desired margin filled in for imported products that omit one.
pub const DEFAULT_DESIRED_MARGIN_PCT: f64 = 40.0;

/// Category filled in for products that omit one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Ordered collection of priced products, unique by product code.
///
/// The engine itself does not enforce code uniqueness; this layer does, so
/// every insert path goes through the same checks. Insertion order is
/// preserved across repricing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<PricedProduct>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-priced collection (e.g. read back from storage).
    pub fn from_products(products: Vec<PricedProduct>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[PricedProduct] {
        &self.products
    }

    pub fn into_products(self) -> Vec<PricedProduct> {
        self.products
    }

    pub fn find(&self, code: &str) -> Option<&PricedProduct> {
        self.products.iter().find(|p| p.product.code == code)
    }

    /// Price and insert a new product.
    ///
    /// Rejects an empty code or name, a duplicate code, and an infeasible
    /// markup (the operator must fix the configuration before adding
    /// products).
    pub fn add(&mut self, product: Product, markup: &MarkupResult) -> DomainResult<PricedProduct> {
        self.validate_insert(&product)?;
        Self::ensure_feasible(markup)?;

        let priced = price_product(&product, markup.multiplier, markup.divisor);
        tracing::debug!(code = %priced.product.code, suggested = priced.suggested_price, "product added");
        self.products.push(priced.clone());
        Ok(priced)
    }

    /// Remove a product by code, returning the removed record.
    pub fn remove(&mut self, code: &str) -> DomainResult<PricedProduct> {
        match self.products.iter().position(|p| p.product.code == code) {
            Some(idx) => Ok(self.products.remove(idx)),
            None => Err(DomainError::not_found(format!("product code '{code}'"))),
        }
    }

    /// Normalize and insert a batch of imported products.
    ///
    /// Missing optional fields get spreadsheet-import defaults (desired
    /// margin, category). The whole batch is validated up front so a failed
    /// import leaves the catalog untouched. Returns the number of products
    /// inserted.
    pub fn import(
        &mut self,
        drafts: Vec<Product>,
        markup: &MarkupResult,
    ) -> DomainResult<usize> {
        Self::ensure_feasible(markup)?;

        let drafts: Vec<Product> = drafts.into_iter().map(normalize_draft).collect();

        let mut batch_codes = BTreeSet::new();
        for draft in &drafts {
            self.validate_insert(draft)?;
            if !batch_codes.insert(draft.code.clone()) {
                return Err(DomainError::conflict(format!(
                    "product code '{}' appears twice in the import",
                    draft.code
                )));
            }
        }

        let count = drafts.len();
        self.products.extend(
            drafts
                .iter()
                .map(|p| price_product(p, markup.multiplier, markup.divisor)),
        );
        tracing::debug!(count, "products imported");
        Ok(count)
    }

    /// Reapply pricing to every product, preserving order.
    pub fn reprice(&mut self, markup: &MarkupResult) {
        self.products = recompute_catalog(&self.products, markup.multiplier, markup.divisor);
    }

    /// Case-insensitive substring match on the product name.
    pub fn filter_by_name(&self, needle: &str) -> Vec<&PricedProduct> {
        let needle = needle.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.product.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<&PricedProduct> {
        self.products
            .iter()
            .filter(|p| p.product.category == category)
            .collect()
    }

    /// Sorted, de-duplicated category list.
    pub fn categories(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.product.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// KPI view over the current catalog.
    pub fn kpis(&self, config: &Config) -> Kpis {
        compute_kpis(&self.products, config)
    }

    fn validate_insert(&self, product: &Product) -> DomainResult<()> {
        if product.code.trim().is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        if product.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if self.find(&product.code).is_some() {
            return Err(DomainError::conflict(format!(
                "product code '{}' already exists",
                product.code
            )));
        }
        Ok(())
    }

    fn ensure_feasible(markup: &MarkupResult) -> DomainResult<()> {
        match &markup.error {
            Some(err) => Err(DomainError::invariant(err.to_string())),
            None => Ok(()),
        }
    }
}

/// Fill spreadsheet-import defaults for optional fields.
fn normalize_draft(mut draft: Product) -> Product {
    if draft.desired_margin_pct.is_none() {
        draft.desired_margin_pct = Some(DEFAULT_DESIRED_MARGIN_PCT);
    }
    if draft.category.trim().is_empty() {
        draft.category = DEFAULT_CATEGORY.to_string();
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricebook_engine::derive_markup;

    fn doubling_markup() -> MarkupResult {
        // 50% total expenses: multiplier 2.0.
        let config = Config {
            taxes_pct: 50.0,
            ..Config::default()
        };
        derive_markup(&config)
    }

    fn infeasible_markup() -> MarkupResult {
        let config = Config {
            taxes_pct: 120.0,
            ..Config::default()
        };
        derive_markup(&config)
    }

    fn draft(code: &str, name: &str) -> Product {
        Product {
            code: code.to_string(),
            name: name.to_string(),
            purchase_cost: 50.0,
            category: "Drinks".to_string(),
            ..Product::default()
        }
    }

    #[test]
    fn add_prices_and_stores_the_product() {
        let mut catalog = Catalog::new();
        let priced = catalog.add(draft("A1", "Espresso"), &doubling_markup()).unwrap();

        assert_eq!(priced.suggested_price, 100.0);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("A1").is_some());
    }

    #[test]
    fn add_rejects_duplicate_code() {
        let mut catalog = Catalog::new();
        catalog.add(draft("A1", "Espresso"), &doubling_markup()).unwrap();

        let err = catalog
            .add(draft("A1", "Other"), &doubling_markup())
            .unwrap_err();
        match err {
            DomainError::Conflict(msg) => assert!(msg.contains("A1")),
            other => panic!("expected Conflict, got {other:?}"),
        }
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn add_rejects_blank_code_and_name() {
        let mut catalog = Catalog::new();
        let markup = doubling_markup();

        let err = catalog.add(draft("  ", "Espresso"), &markup).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = catalog.add(draft("A1", "   "), &markup).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn add_rejects_infeasible_markup() {
        let mut catalog = Catalog::new();
        let err = catalog
            .add(draft("A1", "Espresso"), &infeasible_markup())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn remove_returns_the_record_or_not_found() {
        let mut catalog = Catalog::new();
        catalog.add(draft("A1", "Espresso"), &doubling_markup()).unwrap();

        let removed = catalog.remove("A1").unwrap();
        assert_eq!(removed.product.code, "A1");
        assert!(catalog.is_empty());

        let err = catalog.remove("A1").unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn import_fills_defaults_and_prices_the_batch() {
        let mut catalog = Catalog::new();
        let drafts = vec![
            Product {
                category: String::new(),
                desired_margin_pct: None,
                ..draft("A1", "Espresso")
            },
            draft("A2", "Latte"),
        ];

        let count = catalog.import(drafts, &doubling_markup()).unwrap();
        assert_eq!(count, 2);

        let first = catalog.find("A1").unwrap();
        assert_eq!(first.product.category, DEFAULT_CATEGORY);
        assert_eq!(
            first.product.desired_margin_pct,
            Some(DEFAULT_DESIRED_MARGIN_PCT)
        );
        assert_eq!(first.suggested_price, 100.0);

        // Explicit values survive normalization.
        let second = catalog.find("A2").unwrap();
        assert_eq!(second.product.category, "Drinks");
    }

    #[test]
    fn import_is_atomic_on_duplicate_codes() {
        let mut catalog = Catalog::new();
        catalog.add(draft("A1", "Espresso"), &doubling_markup()).unwrap();

        let drafts = vec![draft("B1", "Mocha"), draft("A1", "Clash")];
        let err = catalog.import(drafts, &doubling_markup()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Nothing from the failed batch landed.
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("B1").is_none());
    }

    #[test]
    fn import_rejects_duplicates_within_the_batch() {
        let mut catalog = Catalog::new();
        let drafts = vec![draft("A1", "Espresso"), draft("A1", "Clash")];
        let err = catalog.import(drafts, &doubling_markup()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn reprice_updates_every_product_in_place() {
        let mut catalog = Catalog::new();
        catalog.add(draft("A1", "Espresso"), &doubling_markup()).unwrap();
        catalog.add(draft("A2", "Latte"), &doubling_markup()).unwrap();

        // 75% expenses: multiplier 4.0.
        let heavier = derive_markup(&Config {
            taxes_pct: 75.0,
            ..Config::default()
        });
        catalog.reprice(&heavier);

        assert_eq!(catalog.find("A1").unwrap().markup_mult, 4.0);
        assert_eq!(catalog.find("A2").unwrap().markup_mult, 4.0);
    }

    #[test]
    fn filters_match_name_case_insensitively_and_category_exactly() {
        let mut catalog = Catalog::new();
        let markup = doubling_markup();
        catalog.add(draft("A1", "Espresso Duplo"), &markup).unwrap();
        catalog.add(draft("A2", "Latte"), &markup).unwrap();
        catalog
            .add(
                Product {
                    category: "Food".to_string(),
                    ..draft("B1", "Croissant")
                },
                &markup,
            )
            .unwrap();

        let by_name = catalog.filter_by_name("espresso");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].product.code, "A1");

        let drinks = catalog.filter_by_category("Drinks");
        assert_eq!(drinks.len(), 2);

        assert_eq!(catalog.categories(), ["Drinks", "Food"]);
    }

    #[test]
    fn kpis_delegate_to_the_engine() {
        let mut catalog = Catalog::new();
        catalog.add(draft("A1", "Espresso"), &doubling_markup()).unwrap();

        let kpis = catalog.kpis(&Config::default());
        assert_eq!(kpis.catalog_size, 1);
        assert_eq!(kpis.total_profit, 50.0);
    }
}
