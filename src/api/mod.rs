//! HTTP trigger endpoints
//!
//! Both jobs run synchronously inside their handler and answer with a plain
//! acknowledgement once the pipeline and its file writes have been issued.

pub mod clean;
pub mod health;
pub mod scrape;

pub use clean::clean_routes;
pub use health::health_routes;
pub use scrape::scrape_routes;
