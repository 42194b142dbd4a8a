//! # Stress UI Common Library
//!
//! Shared code for the stress-test results viewer:
//! - Error types
//! - Settings resolution (command line, environment, `.env`, TOML, defaults)

pub mod config;
pub mod error;

pub use config::Settings;
pub use error::{Error, Result};
