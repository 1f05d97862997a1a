//! Error types for the foliage LOD subsystem
//!
//! Per-pass operations never fail: malformed scene data degrades to
//! documented defaults. Errors only surface at the configuration boundary
//! (parsing and validation).

use std::fmt;

/// Result type for foliage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Foliage subsystem errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration values are inconsistent or out of range
    InvalidConfig(String),

    /// Configuration text could not be parsed
    ConfigParse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::ConfigParse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error at ERROR severity and build an `Error::InvalidConfig`.
///
/// # Example
///
/// ```ignore
/// return Err(foliage_err!("foliage::Config", "chunk_size must be > 0, got {}", size));
/// ```
#[macro_export]
macro_rules! foliage_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::foliage_error!($source, "{}", message);
        $crate::foliage::Error::InvalidConfig(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
