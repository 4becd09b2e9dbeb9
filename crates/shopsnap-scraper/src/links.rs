//! Product link extraction from listing pages.
//!
//! Shopify themes disagree about the class names on product-card anchors,
//! so extraction is two-tier: a list of known theme selectors first, then
//! a raw scan of every anchor for a `/products/` path. Either way the
//! result is canonicalized to `{origin}/products/{handle}` form so the
//! same product discovered through different collections compares equal.

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use shopsnap_core::SelectorConfig;

/// Extracts the scheme+host origin from a collection or page URL.
///
/// Given `"https://thedivashop.ng/collections/sale"`, returns
/// `"https://thedivashop.ng"`.
#[must_use]
pub fn store_origin(url: &str) -> String {
    reqwest::Url::parse(url).map_or_else(
        |_| {
            // fallback: take "https://host" by splitting on '/' and taking first 3 parts
            url.trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Returns the sorted, deduplicated set of canonical product URLs a
/// listing page links to.
#[must_use]
pub fn extract_product_links(origin: &str, body: &str, selectors: &SelectorConfig) -> Vec<String> {
    let document = Html::parse_document(body);

    let mut found: BTreeSet<String> = BTreeSet::new();
    for raw in &selectors.product_links {
        let Ok(selector) = Selector::parse(raw) else {
            tracing::debug!(selector = raw, "skipping unparseable link selector");
            continue;
        };
        for anchor in document.select(&selector) {
            if let Some(href) = anchor.value().attr("href") {
                if href.contains("/products/") {
                    found.insert(absolutize(origin, href));
                }
            }
        }
    }

    // Fallback: any anchor that mentions /products/ at all. Guarantees
    // recall on themes with unrecognized card markup.
    if found.is_empty() {
        if let Ok(all_anchors) = Selector::parse("a[href]") {
            for anchor in document.select(&all_anchors) {
                if let Some(href) = anchor.value().attr("href") {
                    if href.contains("/products/") {
                        found.insert(absolutize(origin, href));
                    }
                }
            }
        }
    }

    found
        .into_iter()
        .map(|url| canonicalize(origin, &url))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Resolves an href against the store origin when it is not already absolute.
fn absolutize(origin: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_owned()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("{}{}", origin.trim_end_matches('/'), href)
    }
}

/// Rewrites a product URL to its canonical `{origin}/products/{handle}`
/// form.
///
/// Collection-scoped links (`/collections/x/products/y`) are rebased onto
/// the store root; anything else just loses its query string.
fn canonicalize(origin: &str, url: &str) -> String {
    if url.contains("/collections/") && url.contains("/products/") {
        let handle = url
            .rsplit("/products/")
            .next()
            .unwrap_or("")
            .split('?')
            .next()
            .unwrap_or("")
            .trim_matches('/');
        format!("{}/products/{handle}", origin.trim_end_matches('/'))
    } else {
        url.split('?').next().unwrap_or(url).to_owned()
    }
}

#[cfg(test)]
#[path = "links_test.rs"]
mod tests;
