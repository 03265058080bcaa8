// SPDX-License-Identifier: PMPL-1.0-or-later
//! Operator enumeration table.
//!
//! Filters name their comparison in two ways: the operation symbol carried on
//! the wire (`==`, `NOT IN`, ...) and a stable operator identifier (`EQUALS`,
//! `NOT_IN`, ...) used by the filter editor. [`OperatorId::descriptor`] maps
//! identifiers to symbols; [`OperatorId::from_operation`] goes the other way
//! through an inverse map built once on first use.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::SqlError;

/// Operation symbol of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "NOT LIKE")]
    NotLike,
    #[serde(rename = "ILIKE")]
    ILike,
    #[serde(rename = "REGEX")]
    Regex,
    #[serde(rename = "IS NULL")]
    IsNull,
    #[serde(rename = "IS NOT NULL")]
    IsNotNull,
    #[serde(rename = "IS TRUE")]
    IsTrue,
    #[serde(rename = "IS FALSE")]
    IsFalse,
    #[serde(rename = "LATEST PARTITION")]
    LatestPartition,
    #[serde(rename = "TEMPORAL_RANGE")]
    TemporalRange,
}

impl Operation {
    /// Every operation symbol.
    pub const ALL: [Operation; 18] = [
        Operation::Eq,
        Operation::NotEq,
        Operation::Lt,
        Operation::Lte,
        Operation::Gt,
        Operation::Gte,
        Operation::In,
        Operation::NotIn,
        Operation::Like,
        Operation::NotLike,
        Operation::ILike,
        Operation::Regex,
        Operation::IsNull,
        Operation::IsNotNull,
        Operation::IsTrue,
        Operation::IsFalse,
        Operation::LatestPartition,
        Operation::TemporalRange,
    ];

    /// Wire symbol, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Eq => "==",
            Operation::NotEq => "!=",
            Operation::Lt => "<",
            Operation::Lte => "<=",
            Operation::Gt => ">",
            Operation::Gte => ">=",
            Operation::In => "IN",
            Operation::NotIn => "NOT IN",
            Operation::Like => "LIKE",
            Operation::NotLike => "NOT LIKE",
            Operation::ILike => "ILIKE",
            Operation::Regex => "REGEX",
            Operation::IsNull => "IS NULL",
            Operation::IsNotNull => "IS NOT NULL",
            Operation::IsTrue => "IS TRUE",
            Operation::IsFalse => "IS FALSE",
            Operation::LatestPartition => "LATEST PARTITION",
            Operation::TemporalRange => "TEMPORAL_RANGE",
        }
    }

    /// Operations that take no comparator.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operation::IsNull | Operation::IsNotNull | Operation::IsTrue | Operation::IsFalse
        )
    }

    /// Operations whose comparator is a list.
    pub fn is_multi(self) -> bool {
        matches!(self, Operation::In | Operation::NotIn)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SqlError::UnknownOperation(s.to_string()))
    }
}

/// Stable operator identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatorId {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    NotIn,
    Like,
    #[serde(rename = "ILIKE")]
    ILike,
    NotLike,
    IsNotNull,
    IsNull,
    LatestPartition,
    IsTrue,
    IsFalse,
    TemporalRange,
}

/// Display label and operation symbol for an operator identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorDescriptor {
    pub display: &'static str,
    pub operation: Operation,
}

static OPERATION_TO_ID: LazyLock<HashMap<Operation, OperatorId>> = LazyLock::new(|| {
    let mut inverse = HashMap::with_capacity(OperatorId::ALL.len());
    // IS_TRUE and IS_FALSE share `==` with EQUALS; the earliest table entry wins.
    for id in OperatorId::ALL {
        inverse.entry(id.descriptor().operation).or_insert(id);
    }
    inverse
});

impl OperatorId {
    /// All identifiers in table order.
    pub const ALL: [OperatorId; 17] = [
        OperatorId::Equals,
        OperatorId::NotEquals,
        OperatorId::LessThan,
        OperatorId::LessThanOrEqual,
        OperatorId::GreaterThan,
        OperatorId::GreaterThanOrEqual,
        OperatorId::In,
        OperatorId::NotIn,
        OperatorId::Like,
        OperatorId::ILike,
        OperatorId::NotLike,
        OperatorId::IsNotNull,
        OperatorId::IsNull,
        OperatorId::LatestPartition,
        OperatorId::IsTrue,
        OperatorId::IsFalse,
        OperatorId::TemporalRange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperatorId::Equals => "EQUALS",
            OperatorId::NotEquals => "NOT_EQUALS",
            OperatorId::LessThan => "LESS_THAN",
            OperatorId::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            OperatorId::GreaterThan => "GREATER_THAN",
            OperatorId::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            OperatorId::In => "IN",
            OperatorId::NotIn => "NOT_IN",
            OperatorId::Like => "LIKE",
            OperatorId::ILike => "ILIKE",
            OperatorId::NotLike => "NOT_LIKE",
            OperatorId::IsNotNull => "IS_NOT_NULL",
            OperatorId::IsNull => "IS_NULL",
            OperatorId::LatestPartition => "LATEST_PARTITION",
            OperatorId::IsTrue => "IS_TRUE",
            OperatorId::IsFalse => "IS_FALSE",
            OperatorId::TemporalRange => "TEMPORAL_RANGE",
        }
    }

    pub fn descriptor(self) -> OperatorDescriptor {
        let (display, operation) = match self {
            OperatorId::Equals => ("Equal to (=)", Operation::Eq),
            OperatorId::NotEquals => ("Not equal to (≠)", Operation::NotEq),
            OperatorId::LessThan => ("Less than (<)", Operation::Lt),
            OperatorId::LessThanOrEqual => ("Less or equal (<=)", Operation::Lte),
            OperatorId::GreaterThan => ("Greater than (>)", Operation::Gt),
            OperatorId::GreaterThanOrEqual => ("Greater or equal (>=)", Operation::Gte),
            OperatorId::In => ("In", Operation::In),
            OperatorId::NotIn => ("Not in", Operation::NotIn),
            OperatorId::Like => ("Like", Operation::Like),
            OperatorId::ILike => ("Like (case insensitive)", Operation::ILike),
            OperatorId::NotLike => ("Not like", Operation::NotLike),
            OperatorId::IsNotNull => ("Is not null", Operation::IsNotNull),
            OperatorId::IsNull => ("Is null", Operation::IsNull),
            OperatorId::LatestPartition => {
                ("use latest_partition template", Operation::LatestPartition)
            }
            OperatorId::IsTrue => ("Is true", Operation::Eq),
            OperatorId::IsFalse => ("Is false", Operation::Eq),
            OperatorId::TemporalRange => ("TEMPORAL_RANGE", Operation::TemporalRange),
        };
        OperatorDescriptor { display, operation }
    }

    /// Reverse lookup by operation symbol.
    ///
    /// Returns `None` for operations no identifier describes (`REGEX`,
    /// `IS TRUE`, `IS FALSE`).
    pub fn from_operation(operation: Operation) -> Option<OperatorId> {
        OPERATION_TO_ID.get(&operation).copied()
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorId {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OperatorId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SqlError::UnknownOperatorId(s.to_string()))
    }
}
