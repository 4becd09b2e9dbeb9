use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One catalog entry, fully reconciled from the three page readers.
///
/// A `Product` is built once per product-page visit and never mutated
/// afterwards; the catalog assembler keeps or replaces whole records when
/// the same canonical URL is discovered under more than one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Slug of the collection the product was discovered under. When the
    /// same URL appears in several collections, the last one wins.
    pub collection: String,
    /// Display name. Always non-empty; a product with no resolvable title
    /// is dropped before construction.
    pub title: String,
    /// Canonical product URL (query-stripped). Global identity key.
    pub url: String,
    /// Current price in major currency units. When any variant carries a
    /// price this is the minimum across variants, not the display price.
    pub price: Option<f64>,
    pub compare_at_price: Option<f64>,
    /// Currency code or symbol, best-effort (e.g. `"NGN"` or `"₦"`).
    pub currency: Option<String>,
    pub description: Option<String>,
    /// Absolute image URLs, query-stripped, deduplicated, sorted.
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    /// Variants in discovery order. May be empty.
    pub variants: Vec<Variant>,
    /// Option axis names (e.g. `["Size", "Color"]`) in the order the
    /// variant endpoint declared them. Empty for markup-inferred variants.
    pub option_names: Vec<String>,
    /// Option name → sorted distinct values observed across variants.
    pub option_values: BTreeMap<String, Vec<String>>,
}

impl Product {
    /// Returns the total number of variants for this product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` if at least one variant is known to be purchasable.
    #[must_use]
    pub fn has_available_variants(&self) -> bool {
        self.variants.iter().any(|v| v.available == Some(true))
    }
}

/// One purchasable configuration of a [`Product`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Variant {
    /// Human label, e.g. `"250ml / Black"`. Variant-endpoint titles and
    /// markup-inferred labels both land here.
    pub option_title: Option<String>,
    /// Major-unit price (already converted from the endpoint's minor units).
    pub price: Option<f64>,
    pub compare_at_price: Option<f64>,
    pub sku: Option<String>,
    pub available: Option<bool>,
    /// Option name → value for this variant. A name may map to `None` when
    /// the endpoint declared the axis but the variant left it blank.
    pub options: BTreeMap<String, Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_count_counts_variants() {
        let product = Product {
            collection: "sale".to_owned(),
            title: "Body Lotion".to_owned(),
            url: "https://thedivashop.ng/products/body-lotion".to_owned(),
            price: Some(1500.0),
            compare_at_price: None,
            currency: Some("₦".to_owned()),
            description: None,
            images: vec![],
            tags: vec![],
            vendor: None,
            product_type: None,
            variants: vec![Variant::default(), Variant::default()],
            option_names: vec![],
            option_values: BTreeMap::new(),
        };
        assert_eq!(product.variant_count(), 2);
    }

    #[test]
    fn has_available_variants_requires_explicit_true() {
        let mut product = Product {
            collection: "sale".to_owned(),
            title: "Soap".to_owned(),
            url: "https://thedivashop.ng/products/soap".to_owned(),
            price: None,
            compare_at_price: None,
            currency: None,
            description: None,
            images: vec![],
            tags: vec![],
            vendor: None,
            product_type: None,
            variants: vec![Variant::default()],
            option_names: vec![],
            option_values: BTreeMap::new(),
        };
        assert!(!product.has_available_variants());
        product.variants[0].available = Some(true);
        assert!(product.has_available_variants());
    }

    #[test]
    fn absent_optionals_serialize_as_null() {
        let variant = Variant::default();
        let json = serde_json::to_value(&variant).unwrap();
        assert!(json["price"].is_null());
        assert!(json["sku"].is_null());
        assert!(json["available"].is_null());
    }
}
