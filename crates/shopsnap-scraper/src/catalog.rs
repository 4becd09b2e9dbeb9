//! Catalog assembly: drives the per-collection and per-product pipeline
//! and owns the final URL-keyed deduplication.
//!
//! Failure containment matches the item granularity: a listing page that
//! will not fetch skips that page, a product page that will not fetch or
//! resolve a title skips that product. Nothing below the run level aborts
//! the run.

use std::collections::HashMap;

use shopsnap_core::{Product, ScrapeConfig};

use crate::client::FetchClient;
use crate::links::{extract_product_links, store_origin};
use crate::markup::extract_markup;
use crate::pagination::walk_collection_pages;
use crate::reconcile::reconcile;
use crate::structured::extract_structured;
use crate::variants::fetch_variant_set;

/// Scrapes every configured collection and returns the deduplicated
/// product list in deterministic order.
///
/// Requests are strictly sequential; the fetch client's politeness delay
/// is the only pacing. When the same product URL is discovered under
/// several collections, the record from the later collection wins but the
/// product keeps its first-seen position in the output.
pub async fn run(client: &FetchClient, config: &ScrapeConfig, roots: &[String]) -> Vec<Product> {
    let mut all: Vec<Product> = Vec::new();
    for root in roots {
        all.extend(scrape_collection(client, config, root).await);
    }
    dedup_by_url(all)
}

/// Scrapes one collection root: walks its pages, extracts product links
/// per page, and runs the full product pipeline per link.
pub async fn scrape_collection(
    client: &FetchClient,
    config: &ScrapeConfig,
    root: &str,
) -> Vec<Product> {
    println!("Scraping collection: {root}");
    let slug = collection_slug(root);
    let origin = store_origin(root);

    let page_urls = walk_collection_pages(client, &config.selectors, root).await;
    let mut products: Vec<Product> = Vec::new();

    for page_url in &page_urls {
        let body = match client.fetch_text(page_url).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(url = %page_url, error = %err, "failed to fetch listing page, skipping");
                continue;
            }
        };
        let links = extract_product_links(&origin, &body, &config.selectors);
        println!("  Found {} product links on {page_url}", links.len());

        for link in &links {
            if let Some(product) = scrape_product(client, config, &origin, &slug, link).await {
                products.push(product);
            }
        }
    }
    products
}

/// Runs the three readers and the reconciler for one product URL.
///
/// Returns `None` when the page will not fetch or no reader resolves a
/// title; both cases are logged and contained here.
pub async fn scrape_product(
    client: &FetchClient,
    config: &ScrapeConfig,
    origin: &str,
    collection: &str,
    url: &str,
) -> Option<Product> {
    let body = match client.fetch_text(url).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(url, error = %err, "failed to fetch product page, skipping");
            return None;
        }
    };

    let structured = extract_structured(&body);
    let markup = extract_markup(origin, &body, &config.selectors);
    let variant_set = fetch_variant_set(client, origin, url).await;

    reconcile(collection, url, structured, variant_set, markup)
}

/// Last path segment of a collection root, e.g. `"sale"` for
/// `https://thedivashop.ng/collections/sale`.
fn collection_slug(root: &str) -> String {
    root.split('?')
        .next()
        .unwrap_or(root)
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(root)
        .to_owned()
}

/// URL-keyed dedup: a later record replaces an earlier one with the same
/// URL in place, so the output order stays stable across runs.
fn dedup_by_url(products: Vec<Product>) -> Vec<Product> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut deduped: Vec<Product> = Vec::new();
    for product in products {
        match index.get(&product.url) {
            Some(&slot) => deduped[slot] = product,
            None => {
                index.insert(product.url.clone(), deduped.len());
                deduped.push(product);
            }
        }
    }
    deduped
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
