pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, OutputOrder, Provider};
pub use error::CatalogError;
pub use types::*;
