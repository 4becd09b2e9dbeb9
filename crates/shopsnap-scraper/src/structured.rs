//! Embedded structured-metadata reader (JSON-LD).
//!
//! Product pages usually carry a `<script type="application/ld+json">`
//! block with a schema.org `Product` record. This is the most trustworthy
//! source for title, description, and gallery images, so the reconciler
//! gives it top precedence. Blocks that fail to parse are skipped; themes
//! routinely ship broken JSON-LD alongside valid blocks.

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use serde_json::Value;

/// Partial product record extracted from a JSON-LD `Product` block.
#[derive(Debug, Clone, Default)]
pub struct StructuredData {
    pub title: Option<String>,
    /// Major-unit price. For a multi-offer block this is the minimum
    /// across offers.
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    /// Query-stripped image URLs.
    pub images: BTreeSet<String>,
}

/// Scans a product page for JSON-LD blocks and extracts the first
/// `Product` record found. Returns `None` when no block declares a
/// `Product` type.
#[must_use]
pub fn extract_structured(body: &str) -> Option<StructuredData> {
    let document = Html::parse_document(body);
    let script_selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    for script in document.select(&script_selector) {
        let raw: String = script.text().collect();
        let Ok(data) = serde_json::from_str::<Value>(&raw) else {
            // Malformed block; the next one may still be valid.
            continue;
        };
        if let Some(product) = find_product_record(&data) {
            return Some(read_product_record(product));
        }
    }
    None
}

/// Accepts either a single object with `"@type": "Product"` or the first
/// such object inside a top-level array.
fn find_product_record(data: &Value) -> Option<&Value> {
    match data {
        Value::Object(map) if map.get("@type").and_then(Value::as_str) == Some("Product") => {
            Some(data)
        }
        Value::Array(items) => items.iter().find(|item| {
            item.get("@type").and_then(Value::as_str) == Some("Product")
        }),
        _ => None,
    }
}

fn read_product_record(product: &Value) -> StructuredData {
    let title = non_empty_str(product.get("name"));
    let description = non_empty_str(product.get("description"));
    let (price, currency) = read_offers(product.get("offers"));

    let mut images = BTreeSet::new();
    match product.get("image") {
        Some(Value::String(src)) => {
            images.insert(strip_query(src));
        }
        Some(Value::Array(items)) => {
            for item in items {
                if let Value::String(src) = item {
                    images.insert(strip_query(src));
                }
            }
        }
        _ => {}
    }

    StructuredData {
        title,
        price,
        currency,
        description,
        images,
    }
}

/// `offers` may be a single offer object or a list. A single offer yields
/// its own price and currency; a list yields the minimum numeric price and
/// the first non-null currency.
fn read_offers(offers: Option<&Value>) -> (Option<f64>, Option<String>) {
    match offers {
        Some(offer @ Value::Object(_)) => (
            numeric(offer.get("price")),
            non_empty_str(offer.get("priceCurrency")),
        ),
        Some(Value::Array(items)) => {
            let mut min_price: Option<f64> = None;
            let mut currency: Option<String> = None;
            for offer in items {
                if let Some(p) = numeric(offer.get("price")) {
                    min_price = Some(min_price.map_or(p, |m: f64| m.min(p)));
                }
                if currency.is_none() {
                    currency = non_empty_str(offer.get("priceCurrency"));
                }
            }
            (min_price, currency)
        }
        _ => (None, None),
    }
}

/// JSON-LD prices appear both as numbers and as numeric strings.
fn numeric(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn strip_query(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_owned()
}

#[cfg(test)]
#[path = "structured_test.rs"]
mod tests;
