//! Snapshot writers: one JSON file with the full nested records, one flat
//! CSV with variants folded into joined columns.
//!
//! Both files are rewritten from scratch every run. Record order is
//! whatever the assembler produced, which is deterministic, so two runs
//! against identical responses give byte-identical files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use shopsnap_core::Product;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths of the files one run produced.
#[derive(Debug, Clone)]
pub struct Outputs {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Writes `products.json` and `products.csv` under `out_dir`, creating
/// the directory if needed and overwriting existing files.
///
/// # Errors
///
/// Returns [`ExportError`] when the directory cannot be created or either
/// file cannot be written.
pub fn write_outputs(products: &[Product], out_dir: &Path) -> Result<Outputs, ExportError> {
    fs::create_dir_all(out_dir)?;

    let json_path = out_dir.join("products.json");
    write_json(products, &json_path)?;

    let csv_path = out_dir.join("products.csv");
    write_csv(products, &csv_path)?;

    tracing::info!(
        count = products.len(),
        json = %json_path.display(),
        csv = %csv_path.display(),
        "snapshot written"
    );

    Ok(Outputs {
        json_path,
        csv_path,
    })
}

/// Full nested records, pretty-printed, `null` for absent optionals.
fn write_json(products: &[Product], path: &Path) -> Result<(), ExportError> {
    let mut file = fs::File::create(path)?;
    serde_json::to_writer_pretty(&mut file, products)?;
    // A trailing newline keeps the file friendly to line-based tooling.
    file.write_all(b"\n")?;
    Ok(())
}

/// One row per product; multi-valued fields joined with `"; "`.
fn write_csv(products: &[Product], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "collection",
        "title",
        "url",
        "price",
        "compare_at_price",
        "currency",
        "vendor",
        "product_type",
        "tags",
        "images",
        "variant_count",
        "variant_titles",
        "variant_option_names",
        "variant_option_values",
    ])?;

    for product in products {
        writer.write_record(csv_row(product))?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_row(product: &Product) -> Vec<String> {
    let variant_titles = product
        .variants
        .iter()
        .map(|v| v.option_title.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("; ");

    // Option-value groups follow the declared axis order, not map order.
    let option_values = product
        .option_names
        .iter()
        .map(|name| {
            let values = product
                .option_values
                .get(name)
                .map(|vals| vals.join("|"))
                .unwrap_or_default();
            format!("{name}: {values}")
        })
        .collect::<Vec<_>>()
        .join("; ");

    vec![
        product.collection.clone(),
        product.title.clone(),
        product.url.clone(),
        product.price.map(format_price).unwrap_or_default(),
        product.compare_at_price.map(format_price).unwrap_or_default(),
        product.currency.clone().unwrap_or_default(),
        product.vendor.clone().unwrap_or_default(),
        product.product_type.clone().unwrap_or_default(),
        product.tags.join("; "),
        product.images.join("; "),
        product.variant_count().to_string(),
        variant_titles,
        product.option_names.join(", "),
        option_values,
    ]
}

/// Two decimal places: prices are major-unit currency amounts.
fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
