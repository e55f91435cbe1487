//! Core module - configuration and error types

mod config;
mod error;

pub use config::{Config, GeneralConfig, StorageConfig, TranslateConfig, APP_DIR_NAME};
pub use error::{Error, Result};
