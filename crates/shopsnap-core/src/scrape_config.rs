//! Scrape configuration: fetch policy, selector priority lists, and the
//! default collection roots.
//!
//! Selector lists and the image denylist are configuration data rather than
//! module constants so the readers stay pure and tests can substitute
//! trimmed-down lists.

/// Network behavior for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Whole-request timeout per attempt.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// `Accept-Language` header sent with every request.
    pub accept_language: String,
    /// Total attempts per URL, including the first one.
    pub max_retries: u32,
    /// Base for the linear retry delay: the wait before attempt N+1 is
    /// `backoff_base_ms * N`.
    pub backoff_base_ms: u64,
    /// Sleep after every successful fetch. Doubles as the crude rate
    /// limiter toward the origin; keep it when parallelizing.
    pub politeness_delay_ms: u64,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 ",
                "(KHTML, like Gecko) Chrome/124.0 Safari/537.36"
            )
            .to_owned(),
            accept_language: "en-US,en;q=0.9".to_owned(),
            max_retries: 3,
            backoff_base_ms: 1000,
            politeness_delay_ms: 400,
        }
    }
}

/// CSS selector priority lists for the markup readers.
///
/// Each list is tried in order; the first selector yielding a non-empty
/// match wins. Shopify themes disagree about class names, which is why
/// every field carries several candidates ending in a broad fallback.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Anchors considered product links on a listing page.
    pub product_links: Vec<String>,
    /// Presence check for product cards, used by the pagination walker.
    pub product_cards: Vec<String>,
    /// "Next page" links in the pagination block.
    pub next_page: Vec<String>,
    pub title: Vec<String>,
    pub current_price: Vec<String>,
    pub compare_price: Vec<String>,
    pub description: Vec<String>,
    pub images: Vec<String>,
    pub vendor: Vec<String>,
    pub product_type: Vec<String>,
    pub tags: Vec<String>,
    /// `<select>` controls holding variant options inside an add-to-cart form.
    pub option_selects: Vec<String>,
    /// Labels attached to variant radio/swatch inputs.
    pub option_labels: Vec<String>,
    /// Substrings marking an image as decorative rather than a product
    /// photo (icons, spinners, promo banners, theme assets).
    pub image_denylist: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product_links: owned(&[
                "a.product-card",
                "a.full-unstyled-link",
                "a.product-item__title",
                "a.grid-view-item__link",
                "a.product-title",
            ]),
            product_cards: owned(&[
                ".product-grid .grid__item",
                ".collection .grid__item",
                ".product-card",
                ".product-grid-item",
            ]),
            next_page: owned(&[".pagination a[rel='next']", "a.pagination__next"]),
            title: owned(&[
                "h1.product__title",
                "h1.product-title",
                "h1.product-name",
                "h1",
            ]),
            current_price: owned(&[
                ".price__current",
                ".price .price-item--regular",
                ".product__price",
                "span.price-item--regular",
                ".price.price--large .price-item--regular",
            ]),
            compare_price: owned(&[
                ".price__was",
                ".price .price-item--compare",
                "span.price-item--sale",
                ".price-item--compare",
            ]),
            description: owned(&[
                ".product__description",
                ".product-description",
                "#tab-description",
                ".rte",
            ]),
            images: owned(&[
                ".product__media img",
                ".product-gallery img",
                ".product-images img",
                "img[src]",
            ]),
            vendor: owned(&[".product-meta__vendor", "a.product-vendor"]),
            product_type: owned(&[".product-meta__type", ".product__type"]),
            tags: owned(&[".product-tags a", ".tags a"]),
            option_selects: owned(&[
                ".product-form__input select",
                "form[action*='cart/add'] select",
            ]),
            option_labels: owned(&[
                ".product-form__input label",
                ".variant-input label",
                ".swatch__label",
            ]),
            image_denylist: owned(&[
                "icon",
                "placeholder",
                "spinner",
                "loading",
                "Fast_Delivery",
                "Quick_Customer_Support",
                "100_Authentic_Products",
                "Buy-More-Save-More",
                "/files/",
            ]),
        }
    }
}

/// Full configuration for one scrape run.
#[derive(Debug, Clone, Default)]
pub struct ScrapeConfig {
    pub fetch: FetchPolicy,
    pub selectors: SelectorConfig,
}

/// The nine collection roots scraped when no override is given on the
/// command line.
#[must_use]
pub fn default_collections() -> Vec<String> {
    owned(&[
        "https://thedivashop.ng/collections/darling",
        "https://thedivashop.ng/collections/amigos",
        "https://thedivashop.ng/collections/megagrowth",
        "https://thedivashop.ng/collections/tcb-naturals",
        "https://thedivashop.ng/collections/good-knight",
        "https://thedivashop.ng/collections/aer-pocket",
        "https://thedivashop.ng/collections/personal-care",
        "https://thedivashop.ng/collections/sale",
        "https://thedivashop.ng/collections/the-diva-shop-gift-card",
    ])
}
