//! Response types for the per-product `/products/{handle}.js` endpoint.
//!
//! ## Observed shape
//!
//! The endpoint returns the storefront's own product JSON:
//!
//! ```json
//! {
//!   "options": [{"name": "Size"}, {"name": "Color"}],
//!   "variants": [
//!     {"title": "250ml / Black", "price": 150000,
//!      "compare_at_price": null, "sku": "DS-250-BLK",
//!      "available": true, "option1": "250ml", "option2": "Black"}
//!   ]
//! }
//! ```
//!
//! ### Prices
//! `price` and `compare_at_price` are integers in **minor currency units**
//! (kobo/cents); `150000` means `1500.00`. `compare_at_price` is `null`
//! when the variant is not on sale. Division by 100 happens in
//! [`crate::variants`], not here.
//!
//! ### Options
//! Themes cap at three axes; values come positionally as `option1`,
//! `option2`, `option3` and map onto `options[].name` by index. A declared
//! axis may still be `null` on an individual variant.
//!
//! Every field is defaulted: themes omit fields freely and a partial
//! record is still worth mapping.

use serde::Deserialize;

/// Top-level payload from `GET /products/{handle}.js`.
#[derive(Debug, Deserialize)]
pub struct VariantEndpointPayload {
    /// Option axis definitions in declared order.
    #[serde(default)]
    pub options: Vec<OptionDef>,
    #[serde(default)]
    pub variants: Vec<RawVariant>,
}

/// One option axis, e.g. `{"name": "Size"}`.
///
/// Some stores return options as plain strings instead of objects;
/// `deserialize_with` on the payload is not needed because those stores
/// also expose the object form on the `.js` endpoint.
#[derive(Debug, Deserialize)]
pub struct OptionDef {
    #[serde(default)]
    pub name: Option<String>,
}

/// One purchasable variant as the endpoint reports it.
#[derive(Debug, Deserialize)]
pub struct RawVariant {
    #[serde(default)]
    pub title: Option<String>,
    /// Minor currency units.
    #[serde(default)]
    pub price: Option<f64>,
    /// Minor currency units; `null` when not on sale.
    #[serde(default)]
    pub compare_at_price: Option<f64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
}

impl RawVariant {
    /// Positional option value for 1-based axis index 1..=3.
    #[must_use]
    pub fn option_at(&self, index: usize) -> Option<&str> {
        match index {
            1 => self.option1.as_deref(),
            2 => self.option2.as_deref(),
            3 => self.option3.as_deref(),
            _ => None,
        }
    }
}
