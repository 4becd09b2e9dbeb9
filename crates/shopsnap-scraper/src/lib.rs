pub mod catalog;
pub mod client;
pub mod error;
pub mod links;
pub mod markup;
pub mod pagination;
pub mod reconcile;
pub mod structured;
pub mod types;
pub mod variants;

pub use catalog::run;
pub use client::FetchClient;
pub use error::ScrapeError;
pub use reconcile::reconcile;
