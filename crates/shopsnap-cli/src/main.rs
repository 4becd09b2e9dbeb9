use std::path::Path;

use clap::Parser;
use shopsnap_core::default_collections;
use shopsnap_export::write_outputs;
use shopsnap_scraper::FetchClient;

/// Exit code for a user interrupt, mirroring shell convention (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

const OUT_DIR: &str = "data";

#[derive(Debug, Parser)]
#[command(name = "shopsnap")]
#[command(about = "Snapshot a storefront's product catalog to JSON and CSV")]
struct Cli {
    /// Collection root URLs to scrape. Replaces the built-in list wholesale;
    /// with no arguments the default collections are scraped.
    collections: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // An interrupt aborts the whole run immediately: no partial output,
    // distinct exit code.
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted.");
            std::process::exit(EXIT_INTERRUPTED);
        }
    });

    let config = shopsnap_core::load_config()?;
    let roots = if cli.collections.is_empty() {
        default_collections()
    } else {
        cli.collections
    };

    let client = FetchClient::new(&config.fetch)?;
    tracing::info!(collections = roots.len(), "starting scrape");
    let products = shopsnap_scraper::run(&client, &config, &roots).await;

    let purchasable = products
        .iter()
        .filter(|p| p.has_available_variants())
        .count();
    tracing::info!(
        total = products.len(),
        purchasable,
        "scrape complete"
    );

    let outputs = write_outputs(&products, Path::new(OUT_DIR))?;
    println!(
        "Wrote {} products to:\n  {}\n  {}",
        products.len(),
        outputs.json_path.display(),
        outputs.csv_path.display()
    );

    Ok(())
}
