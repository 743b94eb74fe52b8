//! errors.rs - Custom error types for the twembed-core library.
//!
//! Only configuration and compilation can fail. Classification failures are
//! ordinary data (see `classification::ErrorKind`) and never surface here.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced while building a `Whitelist`, `Classifier` or `EmbedEngine`.
///
/// `#[non_exhaustive]` so new configuration failures can be added without
/// breaking downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EmbedError {
    #[error("Failed to compile attribute rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid base URL '{0}': {1}")]
    InvalidBaseUrl(String, String),

    #[error("Configuration validation failed:\n{0}")]
    InvalidConfig(String),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
