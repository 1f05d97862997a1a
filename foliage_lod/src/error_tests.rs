//! Unit tests for error.rs
//!
//! Tests Error variants, their Display output and the foliage_err! macro.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("chunk_size must be > 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid config"));
    assert!(display.contains("chunk_size must be > 0"));
}

#[test]
fn test_config_parse_display() {
    let err = Error::ConfigParse("expected a number".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Config parse error"));
    assert!(display.contains("expected a number"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidConfig("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::ConfigParse("bad".to_string());
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::InvalidConfig("bad".to_string()));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
fn test_foliage_err_builds_invalid_config() {
    fn fails() -> Result<()> {
        Err(crate::foliage_err!("foliage::Test", "value {} out of range", 7))
    }

    match fails() {
        Err(Error::InvalidConfig(msg)) => assert_eq!(msg, "value 7 out of range"),
        other => panic!("unexpected result: {:?}", other),
    }
}
