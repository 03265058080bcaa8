// SPDX-License-Identifier: PMPL-1.0-or-later
//! Adapter error types.
//!
//! The translation itself has no failure modes. Errors only arise at the
//! edges: loading configuration and decoding clauses from JSON.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown clause: {0}")]
    UnknownClause(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = AdapterError::InvalidConfig("token_length must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: token_length must be positive"
        );
    }

    #[test]
    fn test_serialization_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AdapterError = json_err.into();
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn test_io_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: AdapterError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }
}
