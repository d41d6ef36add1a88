//! Filing Core - Foundation crate for filing-alert.
//!
//! Shared types, error handling and configuration loading used by the
//! scanner, mail and application crates.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - JSON/TOML configuration with platform config paths
//! - [`types`] - Shared newtypes and records (`FilingKey`, `FilingRecord`)
//!
//! # Example
//!
//! ```rust
//! use filing_core::{AppConfig, FilingKey};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_json_str(
//!     r#"{"search_urls": {"5.02": "https://efts.example/search?q=x"}}"#,
//! )?;
//! let key = FilingKey::new("5.02")?;
//! assert!(config.search_url(&key).is_ok());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult};
pub use types::{FilingKey, FilingRecord};
