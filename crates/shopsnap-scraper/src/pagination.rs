//! Numbered-page pagination for collection listings.
//!
//! Collections paginate with `?page=N` query parameters. The walker visits
//! page 1 at the bare collection URL, then `?page=2`, `?page=3`, and so on.
//! Two stop rules, applied in this order on every visited page:
//!
//! 1. A page beyond the first with no product cards is discarded and the
//!    walk stops.
//! 2. A page with no "next page" link is kept and the walk stops.
//!
//! The page-inspection half is pure (`assess_listing_page`) so the stop
//! rules are testable without a network.

use scraper::{Html, Selector};
use shopsnap_core::SelectorConfig;

use crate::client::FetchClient;

/// Hard cap on pages walked per collection. Prevents infinite loops when a
/// broken theme renders a next-link on every page.
const MAX_PAGES: usize = 200;

/// What the walker needs to know about one listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPage {
    /// At least one product card matched the card selectors.
    pub has_cards: bool,
    /// A "next page" link is present.
    pub has_next: bool,
}

/// Inspects a listing page body for product cards and a next-page link.
#[must_use]
pub fn assess_listing_page(body: &str, selectors: &SelectorConfig) -> ListingPage {
    let document = Html::parse_document(body);
    ListingPage {
        has_cards: any_match(&document, &selectors.product_cards),
        has_next: any_match(&document, &selectors.next_page),
    }
}

fn any_match(document: &Html, raw_selectors: &[String]) -> bool {
    raw_selectors.iter().any(|raw| {
        Selector::parse(raw)
            .map(|sel| document.select(&sel).next().is_some())
            .unwrap_or(false)
    })
}

/// Walks a collection's pages and returns the URLs worth scraping, in
/// visit order. Page 1 is always the bare `root` URL, never `?page=1`.
///
/// A fetch failure stops the walk and keeps whatever pages were already
/// collected; the caller still processes those.
pub async fn walk_collection_pages(
    client: &FetchClient,
    selectors: &SelectorConfig,
    root: &str,
) -> Vec<String> {
    let root = root.trim_end_matches('/');
    let mut pages: Vec<String> = Vec::new();
    let mut page = 1usize;

    loop {
        if pages.len() >= MAX_PAGES {
            tracing::warn!(root, max_pages = MAX_PAGES, "pagination limit reached");
            break;
        }

        let url = if page == 1 {
            root.to_owned()
        } else {
            format!("{root}?page={page}")
        };

        let body = match client.fetch_text(&url).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(url, error = %err, "failed to fetch listing page, stopping walk");
                break;
            }
        };

        let assessment = assess_listing_page(&body, selectors);
        if page > 1 && !assessment.has_cards {
            break;
        }
        pages.push(url);
        if !assessment.has_next {
            break;
        }
        page += 1;
    }

    pages
}


#[cfg(test)]
#[path = "pagination_walk_test.rs"]
mod walk_tests;
