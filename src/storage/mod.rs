//! # Storage Layer
//!
//! Persistence for Dojo CLI: problem files and configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Problems | Source file with comment header | `{problems_dir}/{provider}/{language}/{slug}.{ext}` |
//! | Config | TOML | `config.toml` in the platform config directory |
//!
//! ## Concurrency
//!
//! None. Every command runs to completion on its own; files are read and
//! written whole, without locks or atomic renames.
//!
//! ## Key Types
//!
//! - [`ProblemFormat`] - Encodes problem records to file text and back
//! - [`ProblemStore`] - Reads and writes problem files for one provider
//! - [`Config`] - User configuration

mod config;
mod format;
mod keeper;

pub use config::{Config, ConfigError, MainConfig, ProviderConfig, ProvidersConfig};
pub use format::{CodePrefixes, FormatError, ProblemFormat};
pub use keeper::{ProblemStore, StoreError};
