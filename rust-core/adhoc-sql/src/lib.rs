// SPDX-License-Identifier: PMPL-1.0-or-later
//! Adhoc SQL
//!
//! Operator enumeration table and SQL fragment rendering for ad-hoc filters.
//! This crate is the single authority for SQL text: callers hand it a
//! `subject operator comparator` triple and never format SQL themselves.

pub mod error;
pub mod operators;
pub mod translate;
pub mod value;

pub use error::SqlError;
pub use operators::{OperatorDescriptor, OperatorId, Operation};
pub use translate::{
    simple_sql_expression, sql_operator, translate_to_sql, DatasourceRef, SimpleExpression,
    SqlContext,
};
