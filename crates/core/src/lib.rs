//! Core utilities for the Medina search engine
//!
//! This crate provides the functionality shared by the search crates:
//!
//! - **Error handling**: Coded errors naming the config file or key at fault
//! - **Configuration**: TOML-based search defaults and lexicon extensions with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use medina_core::config::Config;
//!
//! let config = Config::load(None).expect("Failed to load configuration");
//! config.schema.validate().expect("Invalid configuration");
//!
//! println!("Default threshold: {}", config.schema.search.threshold);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, LanguageConfig, SearchSettings};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
}
