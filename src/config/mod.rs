mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{default_store_path, ApiConfig, Config, LifecycleConfig, StorageConfig};
