// SPDX-License-Identifier: PMPL-1.0-or-later
//! SQL translation error types.

use thiserror::Error;

/// Errors raised when parsing operator symbols or identifiers.
///
/// Rendering itself never fails; these only surface from `FromStr`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("unknown operator id: {0}")]
    UnknownOperatorId(String),
}
