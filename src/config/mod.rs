pub mod toml_config;

pub use toml_config::{AccountSeed, LedgerConfig, LoggingConfig};
