pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, StorageConfig};
pub use paths::{base_path_override, PathManager};
