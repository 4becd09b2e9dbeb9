//! Variant-API reader: maps the `/products/{handle}.js` payload into the
//! canonical variant model.
//!
//! This reader is strictly best-effort. A missing endpoint, a non-2xx
//! response, or a malformed body all contribute nothing; the markup
//! fallback reader covers those products instead.

use std::collections::{BTreeMap, BTreeSet};

use shopsnap_core::Variant;

use crate::client::FetchClient;
use crate::types::{RawVariant, VariantEndpointPayload};

/// Variant data plus the option axes it was expressed against.
#[derive(Debug, Clone, Default)]
pub struct VariantSet {
    /// Discovery order.
    pub variants: Vec<Variant>,
    /// Axis names in declared order.
    pub option_names: Vec<String>,
    /// Axis name → distinct values observed across variants.
    pub option_values: BTreeMap<String, BTreeSet<String>>,
}

impl VariantSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Builds the variant endpoint URL for a product page URL, or `None` when
/// the URL has no recognizable product handle.
#[must_use]
pub fn variant_endpoint_url(origin: &str, product_url: &str) -> Option<String> {
    if !product_url.contains("/products/") {
        return None;
    }
    let handle = product_url
        .rsplit("/products/")
        .next()?
        .split('?')
        .next()?
        .trim_matches('/');
    if handle.is_empty() {
        return None;
    }
    Some(format!(
        "{}/products/{handle}.js",
        origin.trim_end_matches('/')
    ))
}

/// Fetches and maps the variant endpoint for one product.
///
/// Never fails: any error is logged at debug level and swallowed so the
/// pipeline can fall through to markup inference.
pub async fn fetch_variant_set(
    client: &FetchClient,
    origin: &str,
    product_url: &str,
) -> Option<VariantSet> {
    let url = variant_endpoint_url(origin, product_url)?;
    match client.fetch_json::<VariantEndpointPayload>(&url).await {
        Ok(payload) => Some(map_variant_payload(payload)),
        Err(err) => {
            tracing::debug!(url, error = %err, "variant endpoint unusable, falling back to markup");
            None
        }
    }
}

/// Pure mapping from the endpoint payload to a [`VariantSet`].
///
/// Option axes keep their declared order; each variant's positional
/// `option1..option3` values attach to the axis at the same index. Prices
/// convert from minor to major units.
#[must_use]
pub fn map_variant_payload(payload: VariantEndpointPayload) -> VariantSet {
    let option_names: Vec<String> = payload
        .options
        .iter()
        .filter_map(|opt| {
            opt.name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned)
        })
        .collect();

    let mut option_values: BTreeMap<String, BTreeSet<String>> = option_names
        .iter()
        .map(|name| (name.clone(), BTreeSet::new()))
        .collect();

    let variants = payload
        .variants
        .into_iter()
        .map(|raw| map_variant(&raw, &option_names, &mut option_values))
        .collect();

    VariantSet {
        variants,
        option_names,
        option_values,
    }
}

fn map_variant(
    raw: &RawVariant,
    option_names: &[String],
    option_values: &mut BTreeMap<String, BTreeSet<String>>,
) -> Variant {
    let mut options: BTreeMap<String, Option<String>> = BTreeMap::new();
    for (idx, name) in option_names.iter().enumerate() {
        let value = raw.option_at(idx + 1).map(str::to_owned);
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            option_values
                .entry(name.clone())
                .or_default()
                .insert(v.to_owned());
        }
        options.insert(name.clone(), value);
    }

    Variant {
        option_title: raw.title.clone(),
        price: raw.price.map(minor_to_major),
        compare_at_price: raw.compare_at_price.map(minor_to_major),
        sku: raw.sku.clone(),
        available: raw.available,
        options,
    }
}

/// Minor currency units (kobo/cents) to major-unit decimals.
fn minor_to_major(minor: f64) -> f64 {
    minor / 100.0
}

#[cfg(test)]
#[path = "variants_test.rs"]
mod tests;
