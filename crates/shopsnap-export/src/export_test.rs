use std::collections::BTreeMap;
use std::fs;

use shopsnap_core::{Product, Variant};

use super::*;

fn sample_product() -> Product {
    let mut option_values = BTreeMap::new();
    option_values.insert(
        "Size".to_owned(),
        vec!["250ml".to_owned(), "500ml".to_owned()],
    );

    Product {
        collection: "personal-care".to_owned(),
        title: "Body Lotion".to_owned(),
        url: "https://thedivashop.ng/products/body-lotion".to_owned(),
        price: Some(1500.0),
        compare_at_price: Some(1800.0),
        currency: Some("₦".to_owned()),
        description: Some("Rich moisturizer.".to_owned()),
        images: vec!["https://cdn.example.com/lotion.jpg".to_owned()],
        tags: vec!["skincare".to_owned(), "lotion".to_owned()],
        vendor: Some("Diva".to_owned()),
        product_type: Some("Lotion".to_owned()),
        variants: vec![
            Variant {
                option_title: Some("250ml".to_owned()),
                price: Some(1500.0),
                ..Variant::default()
            },
            Variant {
                option_title: Some("500ml".to_owned()),
                price: Some(2800.0),
                ..Variant::default()
            },
        ],
        option_names: vec!["Size".to_owned()],
        option_values,
    }
}

fn bare_product() -> Product {
    Product {
        collection: "sale".to_owned(),
        title: "Mystery Soap".to_owned(),
        url: "https://thedivashop.ng/products/mystery-soap".to_owned(),
        price: None,
        compare_at_price: None,
        currency: None,
        description: None,
        images: vec![],
        tags: vec![],
        vendor: None,
        product_type: None,
        variants: vec![],
        option_names: vec![],
        option_values: BTreeMap::new(),
    }
}

#[test]
fn writes_both_files_and_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("data");
    let outputs = write_outputs(&[sample_product()], &out_dir).unwrap();
    assert!(outputs.json_path.exists());
    assert!(outputs.csv_path.exists());
}

#[test]
fn json_contains_nested_variants_and_nulls_for_absent_fields() {
    let dir = tempfile::tempdir().unwrap();
    let outputs = write_outputs(&[bare_product()], dir.path()).unwrap();
    let raw = fs::read_to_string(&outputs.json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value[0]["title"], "Mystery Soap");
    assert!(value[0]["price"].is_null());
    assert!(value[0]["vendor"].is_null());
    assert!(value[0]["variants"].as_array().unwrap().is_empty());
}

#[test]
fn csv_header_matches_expected_columns() {
    let dir = tempfile::tempdir().unwrap();
    let outputs = write_outputs(&[sample_product()], dir.path()).unwrap();
    let raw = fs::read_to_string(&outputs.csv_path).unwrap();
    let header = raw.lines().next().unwrap();
    assert_eq!(
        header,
        "collection,title,url,price,compare_at_price,currency,vendor,\
         product_type,tags,images,variant_count,variant_titles,\
         variant_option_names,variant_option_values"
    );
}

#[test]
fn csv_row_flattens_variants_and_options() {
    let row = csv_row(&sample_product());
    assert_eq!(row[0], "personal-care");
    assert_eq!(row[3], "1500.00");
    assert_eq!(row[4], "1800.00");
    assert_eq!(row[8], "skincare; lotion");
    assert_eq!(row[10], "2");
    assert_eq!(row[11], "250ml; 500ml");
    assert_eq!(row[12], "Size");
    assert_eq!(row[13], "Size: 250ml|500ml");
}

#[test]
fn csv_row_leaves_absent_fields_empty() {
    let row = csv_row(&bare_product());
    assert_eq!(row[3], "");
    assert_eq!(row[5], "");
    assert_eq!(row[10], "0");
    assert_eq!(row[13], "");
}

#[test]
fn rerunning_overwrites_and_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let products = [sample_product(), bare_product()];
    let first = write_outputs(&products, dir.path()).unwrap();
    let json_one = fs::read(&first.json_path).unwrap();
    let csv_one = fs::read(&first.csv_path).unwrap();

    let second = write_outputs(&products, dir.path()).unwrap();
    assert_eq!(json_one, fs::read(&second.json_path).unwrap());
    assert_eq!(csv_one, fs::read(&second.csv_path).unwrap());
}
