// SPDX-License-Identifier: PMPL-1.0-or-later
//! Simple clause to ad-hoc filter translation.

use adhoc_sql::{translate_to_sql, OperatorId, SimpleExpression};
use serde_json::Value;
use tracing::debug;

use crate::clause::{Clause, Column, FilterClause};
use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::filter::{AdhocExpression, AdhocFilter, ExtraAnnotation};
use crate::matching;
use crate::token::{RandomTokenSource, TokenSource};

/// Converts filter clauses into ad-hoc filters.
///
/// The conversion is a single pass over the clause:
/// 1. Look up the clause in its filter data mapping to recover a layer scope
/// 2. Emit the SQL shape for computed columns, the simple shape otherwise
/// 3. Annotate extra clauses with the scope and a fresh option name
///
/// Step 3 draws two tokens per call, so converting the same extra clause
/// twice yields two different option names.
pub struct FilterAdapter<T: TokenSource = RandomTokenSource> {
    config: AdapterConfig,
    tokens: T,
}

impl FilterAdapter {
    /// Create an adapter drawing random tokens of the configured length.
    pub fn new(config: AdapterConfig) -> Result<Self, AdapterError> {
        let tokens = RandomTokenSource::new(config.token_length);
        Self::with_token_source(config, tokens)
    }
}

impl Default for FilterAdapter {
    fn default() -> Self {
        let config = AdapterConfig::default();
        let tokens = RandomTokenSource::new(config.token_length);
        Self { config, tokens }
    }
}

impl<T: TokenSource> FilterAdapter<T> {
    pub fn with_token_source(config: AdapterConfig, tokens: T) -> Result<Self, AdapterError> {
        config.validate()?;
        Ok(Self { config, tokens })
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// See [`matching::find_matching_filter_key`].
    pub fn find_matching_filter_key<'a>(&self, clause: &'a FilterClause) -> Option<&'a str> {
        matching::find_matching_filter_key(clause)
    }

    /// Convert using the configured default clause.
    pub fn convert(&self, clause: &FilterClause) -> AdhocFilter {
        self.simple_filter_to_adhoc(clause, self.config.default_clause)
    }

    pub fn simple_filter_to_adhoc(&self, clause: &FilterClause, target: Clause) -> AdhocFilter {
        let matching_key = matching::find_matching_filter_key(clause);
        let filter_scope: Option<Value> = matching_key.and_then(|key| {
            clause
                .layer_filter_scope
                .as_ref()
                .and_then(|scopes| scopes.get(key))
                .cloned()
        });

        let expression = match &clause.col {
            Column::Adhoc(col) => {
                let expr = SimpleExpression {
                    subject: format!("({})", col.sql_expression),
                    operator: Some(clause.op),
                    comparator: clause.val.clone(),
                };
                AdhocExpression::Sql {
                    sql_expression: translate_to_sql(&expr, &self.config.sql),
                }
            }
            Column::Physical(name) => {
                let operator_id = OperatorId::from_operation(clause.op);
                if operator_id.is_none() {
                    debug!(operator = %clause.op, "No operator id for operation");
                }
                AdhocExpression::Simple {
                    operator: clause.op,
                    operator_id,
                    subject: name.clone(),
                    comparator: clause.val.clone(),
                }
            }
        };

        let extra = clause.is_extra.then(|| ExtraAnnotation {
            is_extra: true,
            layer_filter_scope: filter_scope,
            filter_option_name: self.filter_option_name(),
        });

        debug!(
            column = clause.col.describe(),
            clause = %target,
            matching_key = matching_key.unwrap_or("-"),
            is_extra = clause.is_extra,
            "Converted filter clause"
        );

        AdhocFilter {
            expression,
            clause: target,
            extra,
        }
    }

    /// `<prefix><token>_<token>`, e.g. `filter_k3v9x0a1b2c_q8w7e6r5t4y`.
    pub fn filter_option_name(&self) -> String {
        let first = self.tokens.next_token();
        let second = self.tokens.next_token();
        format!("{}{}_{}", self.config.option_name_prefix, first, second)
    }
}
