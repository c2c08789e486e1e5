//! Client configuration: backend service locations, request limits and
//! session persistence.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, Defaults, PersistenceConfig, ServicesConfig};
