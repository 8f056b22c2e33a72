//! Error types for the bitplane crate

use thiserror::Error;

/// Errors raised by the fallible surfaces: width/config validation, table
/// construction and string parsing. Aggregate queries themselves never fail.
#[derive(Error, Debug)]
pub enum BitsError {
    #[error("bit width {0} is outside 1..=64")]
    InvalidWidth(u32),

    #[error("repeat count {0} must be at least 2")]
    InvalidRepeat(u32),

    #[error("table of {k}-set-bit values within {width} bits would hold {entries} entries")]
    TableTooLarge { k: u32, width: u32, entries: u128 },

    #[error("invalid binary digit {found:?} at index {index}")]
    InvalidDigit { index: usize, found: char },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, BitsError>;
