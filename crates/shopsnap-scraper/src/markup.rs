//! Markup fallback reader: raw-HTML inference for products whose
//! structured metadata or variant endpoint came up short.
//!
//! Every extraction runs off the selector priority lists in
//! [`SelectorConfig`]; the first selector producing a non-empty match wins
//! for each field. Variant inference has two passes (select-control
//! options, then swatch/radio labels) whose concatenation is deduplicated
//! by lower-cased label.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use shopsnap_core::{SelectorConfig, Variant};

/// Labels longer than this are almost certainly descriptive copy that a
/// theme wrapped in a `<label>`, not a variant name.
const MAX_LABEL_LEN: usize = 80;

/// Partial product record inferred from page markup.
#[derive(Debug, Clone, Default)]
pub struct MarkupData {
    pub title: Option<String>,
    /// Raw display-price text, symbol and all (e.g. `"₦1,500.00"`).
    pub price_text: Option<String>,
    pub compare_text: Option<String>,
    pub description: Option<String>,
    /// Absolute, query-stripped, denylist-filtered image URLs.
    pub images: BTreeSet<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Vec<String>,
    /// Inferred variants, deduplicated by lower-cased label.
    pub variants: Vec<Variant>,
}

/// Price-with-optional-currency pattern matched inside option labels,
/// e.g. `"250ml - ₦1,500.00"`.
fn price_in_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([₦₵$€£]|NGN|USD|EUR|GBP)?\s?([0-9,]+(?:\.[0-9]{2})?)")
            .expect("price regex is valid")
    })
}

/// Runs every markup heuristic over a product page body.
#[must_use]
pub fn extract_markup(origin: &str, body: &str, selectors: &SelectorConfig) -> MarkupData {
    let document = Html::parse_document(body);

    let mut variants = select_option_variants(&document, selectors);
    variants.extend(swatch_label_variants(&document, selectors));

    MarkupData {
        title: first_text(&document, &selectors.title, " "),
        price_text: first_text(&document, &selectors.current_price, " "),
        compare_text: first_text(&document, &selectors.compare_price, " "),
        description: first_text(&document, &selectors.description, "\n"),
        images: harvest_images(&document, origin, selectors),
        vendor: first_text(&document, &selectors.vendor, " "),
        product_type: first_text(&document, &selectors.product_type, " "),
        tags: all_texts(&document, &selectors.tags),
        variants: dedup_by_title(variants),
    }
}

/// Drops variants whose label repeats an earlier one (case-insensitive) or
/// is blank. Entries with no label at all are kept; they may still carry
/// a price.
#[must_use]
pub fn dedup_by_title(variants: Vec<Variant>) -> Vec<Variant> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut deduped = Vec::with_capacity(variants.len());
    for variant in variants {
        match variant.option_title.as_deref().map(str::to_lowercase) {
            Some(key) if !key.is_empty() => {
                if seen.insert(key) {
                    deduped.push(variant);
                }
            }
            Some(_) => {} // blank label: drop
            None => deduped.push(variant),
        }
    }
    deduped
}

/// First pass: `<option>` entries inside add-to-cart selects. The label
/// becomes the variant title; an embedded price is pulled out of the label
/// text when present.
fn select_option_variants(document: &Html, selectors: &SelectorConfig) -> Vec<Variant> {
    let Ok(option_sel) = Selector::parse("option") else {
        return Vec::new();
    };

    let mut variants = Vec::new();
    for raw in &selectors.option_selects {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for select_el in document.select(&selector) {
            for option in select_el.select(&option_sel) {
                let label = joined_text(option, " ");
                if label.is_empty() {
                    continue;
                }
                let price = extract_label_price(&label);
                variants.push(Variant {
                    option_title: Some(label),
                    price,
                    ..Variant::default()
                });
            }
        }
    }
    variants
}

/// Second pass: labels attached to variant radios and swatches. Long text
/// is rejected to avoid swallowing descriptive copy.
fn swatch_label_variants(document: &Html, selectors: &SelectorConfig) -> Vec<Variant> {
    let mut variants = Vec::new();
    for raw in &selectors.option_labels {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for label_el in document.select(&selector) {
            let text = joined_text(label_el, " ");
            if !text.is_empty() && text.chars().count() < MAX_LABEL_LEN {
                variants.push(Variant {
                    option_title: Some(text),
                    ..Variant::default()
                });
            }
        }
    }
    variants
}

/// Gathers product images from the first selector in the priority list
/// that yields any accepted image, applying the decorative-image denylist
/// and URL normalization.
fn harvest_images(document: &Html, origin: &str, selectors: &SelectorConfig) -> BTreeSet<String> {
    for raw in &selectors.images {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        let mut images = BTreeSet::new();
        for img in document.select(&selector) {
            let src = img
                .value()
                .attr("data-src")
                .or_else(|| img.value().attr("src"));
            if let Some(accepted) = normalize_image_src(origin, src, &selectors.image_denylist) {
                images.insert(accepted);
            }
        }
        if !images.is_empty() {
            return images;
        }
    }
    BTreeSet::new()
}

/// Absolutizes an image source, rejects inline-data and denylisted URLs,
/// and strips the query string.
fn normalize_image_src(
    origin: &str,
    src: Option<&str>,
    denylist: &[String],
) -> Option<String> {
    let src = src?.trim();
    if src.is_empty() || src.starts_with("data:image") {
        return None;
    }
    let absolute = if let Some(rest) = src.strip_prefix("//") {
        format!("https://{rest}")
    } else if src.starts_with('/') {
        format!("{}{src}", origin.trim_end_matches('/'))
    } else {
        src.to_owned()
    };
    if denylist.iter().any(|token| absolute.contains(token)) {
        return None;
    }
    Some(absolute.split('?').next().unwrap_or(&absolute).to_owned())
}

/// Pulls a price out of an option label like `"250ml - ₦1,500.00"`.
///
/// A label can contain other numbers (sizes, pack counts), so a match
/// carrying a currency marker beats an earlier bare number.
fn extract_label_price(label: &str) -> Option<f64> {
    let mut bare: Option<f64> = None;
    for captures in price_in_label().captures_iter(label) {
        let value = captures.get(0).and_then(|m| parse_price_text(m.as_str()));
        if captures.get(1).is_some() {
            if value.is_some() {
                return value;
            }
        } else if bare.is_none() {
            bare = value;
        }
    }
    bare
}

/// Parses a price out of display text: currency symbols and thousands
/// separators removed, decimal point kept.
#[must_use]
pub fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// First selector in `raws` whose match has non-empty text wins.
fn first_text(document: &Html, raws: &[String], sep: &str) -> Option<String> {
    for raw in raws {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = joined_text(element, sep);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Non-empty texts of every element matched by any selector in `raws`.
fn all_texts(document: &Html, raws: &[String]) -> Vec<String> {
    let mut texts = Vec::new();
    for raw in raws {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = joined_text(element, " ");
            if !text.is_empty() {
                texts.push(text);
            }
        }
    }
    texts
}

/// Trimmed text nodes of `element` joined with `sep`.
fn joined_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;
