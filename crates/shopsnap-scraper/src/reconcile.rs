//! Field-level reconciliation of the three page readers.
//!
//! Each reader produces an optional partial record; this module folds them
//! into one `Product` (or nothing) with a fixed per-field precedence. It
//! is deliberately a pure function, no I/O and no reader dispatch, so every
//! precedence rule is testable with constructed partials.
//!
//! Precedence per field:
//! - `title`, `description`, `images`, `currency`: structured data first,
//!   markup second.
//! - `price`: minimum variant price, else structured offer price, else
//!   parsed markup price text.
//! - `compare_at_price`: minimum variant compare-price, else parsed markup
//!   compare text.
//! - variants and option axes: the variant endpoint when it produced
//!   anything, else markup inference (which carries no axis names).
//!
//! A product with no resolvable title is dropped entirely.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use shopsnap_core::Product;

use crate::markup::{dedup_by_title, parse_price_text, MarkupData};
use crate::structured::StructuredData;
use crate::variants::VariantSet;

fn currency_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[₦₵$€£]|NGN|USD|EUR|GBP").expect("currency regex is valid"))
}

/// Detects a currency symbol or code in price display text.
#[must_use]
pub fn detect_currency(text: &str) -> Option<String> {
    currency_marker().find(text).map(|m| m.as_str().to_owned())
}

/// Folds the three partial records into one `Product`.
///
/// Returns `None` (with a warning logged) when no reader produced a title;
/// an untitled record is useless downstream and is dropped rather than
/// emitted half-empty.
#[must_use]
pub fn reconcile(
    collection: &str,
    url: &str,
    structured: Option<StructuredData>,
    variant_set: Option<VariantSet>,
    markup: MarkupData,
) -> Option<Product> {
    let structured = structured.unwrap_or_default();

    let Some(title) = structured.title.or(markup.title) else {
        tracing::warn!(url, "no title resolved from any reader, dropping product");
        return None;
    };

    let images: Vec<String> = if structured.images.is_empty() {
        markup.images.into_iter().collect()
    } else {
        structured.images.into_iter().collect()
    };

    let description = structured.description.or(markup.description);

    let currency = structured.currency.or_else(|| {
        let combined = format!(
            "{}{}",
            markup.price_text.as_deref().unwrap_or(""),
            markup.compare_text.as_deref().unwrap_or("")
        );
        detect_currency(&combined)
    });

    // The endpoint's variants win whenever it produced any; markup
    // inference carries no option axes.
    let (variants, option_names, option_values) = match variant_set {
        Some(set) if !set.is_empty() => {
            let values: BTreeMap<String, Vec<String>> = set
                .option_values
                .into_iter()
                .map(|(name, vals)| (name, vals.into_iter().collect()))
                .collect();
            (dedup_by_title(set.variants), set.option_names, values)
        }
        _ => (markup.variants, Vec::new(), BTreeMap::new()),
    };

    let price = min_price(variants.iter().map(|v| v.price))
        .or(structured.price)
        .or_else(|| markup.price_text.as_deref().and_then(parse_price_text));

    let compare_at_price = min_price(variants.iter().map(|v| v.compare_at_price))
        .or_else(|| markup.compare_text.as_deref().and_then(parse_price_text));

    Some(Product {
        collection: collection.to_owned(),
        title,
        url: url.to_owned(),
        price,
        compare_at_price,
        currency,
        description,
        images,
        tags: markup.tags,
        vendor: markup.vendor,
        product_type: markup.product_type,
        variants,
        option_names,
        option_values,
    })
}

/// Minimum of the present values, `None` when none are present.
fn min_price(prices: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    prices
        .flatten()
        .fold(None, |acc, p| Some(acc.map_or(p, |m: f64| m.min(p))))
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
