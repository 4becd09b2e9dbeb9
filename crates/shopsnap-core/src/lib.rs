pub mod config;
pub mod model;
pub mod scrape_config;

pub use config::{load_config, load_config_from_env, ConfigError};
pub use model::{Product, Variant};
pub use scrape_config::{default_collections, FetchPolicy, ScrapeConfig, SelectorConfig};
