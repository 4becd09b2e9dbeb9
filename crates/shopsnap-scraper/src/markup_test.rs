use super::*;

const ORIGIN: &str = "https://thedivashop.ng";

fn markup(body: &str) -> MarkupData {
    extract_markup(ORIGIN, body, &SelectorConfig::default())
}

// ---------------------------------------------------------------------------
// field selectors
// ---------------------------------------------------------------------------

#[test]
fn title_prefers_theme_selector_over_bare_h1() {
    let body = r#"
        <h1>Site banner heading</h1>
        <h1 class="product__title">Darling Braids</h1>"#;
    assert_eq!(markup(body).title.as_deref(), Some("Darling Braids"));
}

#[test]
fn title_falls_back_to_bare_h1() {
    let body = "<h1>Amigos Gel</h1>";
    assert_eq!(markup(body).title.as_deref(), Some("Amigos Gel"));
}

#[test]
fn price_and_compare_text_come_from_price_selectors() {
    let body = r#"
        <span class="price__current">₦1,500.00</span>
        <span class="price__was">₦1,800.00</span>"#;
    let data = markup(body);
    assert_eq!(data.price_text.as_deref(), Some("₦1,500.00"));
    assert_eq!(data.compare_text.as_deref(), Some("₦1,800.00"));
}

#[test]
fn description_joins_blocks_with_newlines() {
    let body = r#"<div class="product__description"><p>Line one.</p><p>Line two.</p></div>"#;
    assert_eq!(
        markup(body).description.as_deref(),
        Some("Line one.\nLine two.")
    );
}

#[test]
fn vendor_type_and_tags_are_best_effort() {
    let body = r#"
        <span class="product-meta__vendor">Darling</span>
        <span class="product-meta__type">Hair Extension</span>
        <div class="product-tags"><a>braids</a><a>synthetic</a></div>"#;
    let data = markup(body);
    assert_eq!(data.vendor.as_deref(), Some("Darling"));
    assert_eq!(data.product_type.as_deref(), Some("Hair Extension"));
    assert_eq!(data.tags, vec!["braids", "synthetic"]);
}

// ---------------------------------------------------------------------------
// images
// ---------------------------------------------------------------------------

#[test]
fn images_are_absolutized_and_query_stripped() {
    let body = r#"
        <div class="product__media">
          <img src="//cdn.example.com/braids.jpg?v=1">
          <img src="/cdn/shop/braids-back.jpg">
        </div>"#;
    let data = markup(body);
    assert!(data.images.contains("https://cdn.example.com/braids.jpg"));
    assert!(data
        .images
        .contains("https://thedivashop.ng/cdn/shop/braids-back.jpg"));
}

#[test]
fn decorative_images_are_denylisted() {
    let body = r#"
        <div class="product__media">
          <img src="/cdn/shop/product-shot.jpg">
          <img src="/cdn/shop/cart-icon.svg">
          <img src="/cdn/shop/Fast_Delivery.png">
          <img src="/cdn/shop/files/banner.png">
          <img src="data:image/gif;base64,R0lGOD">
        </div>"#;
    let data = markup(body);
    assert_eq!(data.images.len(), 1);
    assert!(data
        .images
        .contains("https://thedivashop.ng/cdn/shop/product-shot.jpg"));
}

#[test]
fn images_prefer_data_src_over_src() {
    let body = r#"
        <div class="product-gallery">
          <img data-src="/cdn/shop/real.jpg" src="/cdn/shop/loading.gif">
        </div>"#;
    let data = markup(body);
    assert!(data.images.contains("https://thedivashop.ng/cdn/shop/real.jpg"));
}

#[test]
fn earlier_image_selector_wins_over_catch_all() {
    let body = r#"
        <div class="product__media"><img src="/cdn/shop/gallery.jpg"></div>
        <img src="/cdn/shop/unrelated.jpg">"#;
    let data = markup(body);
    assert_eq!(data.images.len(), 1);
    assert!(data.images.contains("https://thedivashop.ng/cdn/shop/gallery.jpg"));
}

// ---------------------------------------------------------------------------
// variant inference
// ---------------------------------------------------------------------------

#[test]
fn select_options_become_variants_with_embedded_prices() {
    let body = r#"
        <form action="/cart/add">
          <select>
            <option>250ml - ₦1,500.00</option>
            <option>500ml - ₦2,800.00</option>
          </select>
        </form>"#;
    let data = markup(body);
    assert_eq!(data.variants.len(), 2);
    assert_eq!(
        data.variants[0].option_title.as_deref(),
        Some("250ml - ₦1,500.00")
    );
    assert_eq!(data.variants[0].price, Some(1500.0));
    assert_eq!(data.variants[1].price, Some(2800.0));
}

#[test]
fn label_price_falls_back_to_bare_number() {
    let body = r#"
        <form action="/cart/add">
          <select><option>Refill pack 1,200.00</option></select>
        </form>"#;
    assert_eq!(markup(body).variants[0].price, Some(1200.0));
}

#[test]
fn swatch_labels_become_titled_variants() {
    let body = r#"
        <div class="variant-input"><label>Black</label></div>
        <div class="variant-input"><label>Burgundy</label></div>"#;
    let data = markup(body);
    let titles: Vec<&str> = data
        .variants
        .iter()
        .filter_map(|v| v.option_title.as_deref())
        .collect();
    assert_eq!(titles, vec!["Black", "Burgundy"]);
}

#[test]
fn overlong_labels_are_rejected() {
    let long_text = "a".repeat(120);
    let body = format!(r#"<div class="variant-input"><label>{long_text}</label></div>"#);
    assert!(markup(&body).variants.is_empty());
}

#[test]
fn variants_are_deduplicated_by_lowercased_label() {
    let body = r#"
        <form action="/cart/add"><select><option>Black</option></select></form>
        <div class="variant-input"><label>BLACK</label></div>"#;
    let data = markup(body);
    assert_eq!(data.variants.len(), 1);
    assert_eq!(data.variants[0].option_title.as_deref(), Some("Black"));
}

#[test]
fn dedup_keeps_untitled_variants() {
    let variants = vec![
        Variant {
            option_title: None,
            price: Some(900.0),
            ..Variant::default()
        },
        Variant {
            option_title: Some("250ml".to_owned()),
            ..Variant::default()
        },
    ];
    assert_eq!(dedup_by_title(variants).len(), 2);
}

// ---------------------------------------------------------------------------
// parse_price_text
// ---------------------------------------------------------------------------

#[test]
fn parse_price_strips_symbols_and_commas() {
    assert_eq!(parse_price_text("₦1,500.00"), Some(1500.0));
    assert_eq!(parse_price_text("NGN 2,800"), Some(2800.0));
    assert_eq!(parse_price_text("$12.99"), Some(12.99));
}

#[test]
fn parse_price_rejects_text_without_digits() {
    assert_eq!(parse_price_text("Sold out"), None);
    assert_eq!(parse_price_text(""), None);
}
