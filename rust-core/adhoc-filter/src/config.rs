// SPDX-License-Identifier: PMPL-1.0-or-later
//! Adapter configuration.
//!
//! Defaults:
//! - default_clause: WHERE
//! - option_name_prefix: "filter_"
//! - token_length: 11 base-36 characters per token
//! - sql: no datasource (latest-partition filters render subject only)

use std::path::Path;

use adhoc_sql::SqlContext;
use serde::{Deserialize, Serialize};

use crate::clause::Clause;
use crate::error::AdapterError;
use crate::token::RandomTokenSource;

/// Longest token the random source may be asked for.
pub const MAX_TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Clause used when the caller does not name one.
    pub default_clause: Clause,
    /// Literal prefix of generated filter option names.
    pub option_name_prefix: String,
    /// Length of each random token in a generated name.
    pub token_length: usize,
    /// Context handed to SQL rendering for computed columns.
    pub sql: SqlContext,
}

impl AdapterConfig {
    pub fn validate(&self) -> Result<(), AdapterError> {
        if self.option_name_prefix.is_empty() {
            return Err(AdapterError::InvalidConfig(
                "option_name_prefix must not be empty".to_string(),
            ));
        }
        if self.token_length == 0 || self.token_length > MAX_TOKEN_LENGTH {
            return Err(AdapterError::InvalidConfig(format!(
                "token_length must be between 1 and {MAX_TOKEN_LENGTH}, got {}",
                self.token_length
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, AdapterError> {
        let config: AdapterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            default_clause: Clause::Where,
            option_name_prefix: "filter_".to_string(),
            token_length: RandomTokenSource::DEFAULT_LENGTH,
            sql: SqlContext::default(),
        }
    }
}
