// SPDX-License-Identifier: PMPL-1.0-or-later
//! Adhoc Filter
//!
//! Translates simple filter clauses emitted by cross-filtering into the
//! canonical ad-hoc filter representation used for query construction.
//!
//! Plain column references become structured `SIMPLE` filters; computed
//! columns become `SQL` filters rendered by [`adhoc_sql`]. Clauses flagged as
//! extra are annotated with the scope of the layer that produced them and a
//! generated option name.
//!
//! ```
//! use adhoc_filter::{simple_filter_to_adhoc, Clause, FilterClause};
//! use adhoc_sql::Operation;
//!
//! let clause = FilterClause::new("region", Operation::Eq).with_val("US");
//! let filter = simple_filter_to_adhoc(&clause, Clause::Where);
//! assert_eq!(filter.expression_type().to_string(), "SIMPLE");
//! ```

pub mod adapter;
pub mod clause;
pub mod config;
pub mod error;
pub mod filter;
pub mod matching;
pub mod token;

pub use adapter::FilterAdapter;
pub use clause::{
    AdhocColumn, Clause, Column, ColumnExpressionType, FilterClause, FilterDataMapping,
    FilterDescriptor,
};
pub use config::AdapterConfig;
pub use error::AdapterError;
pub use filter::{AdhocExpression, AdhocFilter, ExpressionType, ExtraAnnotation};
pub use matching::{canonical_json, find_matching_filter_key};
pub use token::{RandomTokenSource, SequenceTokenSource, TokenSource};

/// Convert with a default adapter and random option-name tokens.
pub fn simple_filter_to_adhoc(clause: &FilterClause, target: Clause) -> AdhocFilter {
    FilterAdapter::default().simple_filter_to_adhoc(clause, target)
}
