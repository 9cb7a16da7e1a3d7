pub mod config;
pub mod error;
pub mod types;

pub use config::{
    ConfigManager, DataConfig, LoggingConfig, SearchConfig, ServerConfig, Settings,
    SubgraphConfig,
};
pub use error::*;
pub use types::*;
