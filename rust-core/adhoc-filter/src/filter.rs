// SPDX-License-Identifier: PMPL-1.0-or-later
//! Canonical ad-hoc filter representation.

use std::fmt;

use adhoc_sql::{OperatorId, Operation};
use serde::Serialize;
use serde_json::Value;

use crate::clause::Clause;

/// Which of the two filter shapes a value has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpressionType {
    #[serde(rename = "SIMPLE")]
    Simple,
    #[serde(rename = "SQL")]
    Sql,
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionType::Simple => write!(f, "SIMPLE"),
            ExpressionType::Sql => write!(f, "SQL"),
        }
    }
}

/// Filter body, tagged by `expressionType` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "expressionType")]
pub enum AdhocExpression {
    /// Structured `subject operator comparator` triple.
    #[serde(rename = "SIMPLE", rename_all = "camelCase")]
    Simple {
        operator: Operation,
        /// Absent when no operator identifier describes `operator`.
        #[serde(skip_serializing_if = "Option::is_none")]
        operator_id: Option<OperatorId>,
        subject: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        comparator: Option<Value>,
    },
    /// Rendered SQL fragment.
    #[serde(rename = "SQL", rename_all = "camelCase")]
    Sql { sql_expression: String },
}

/// Fields attached to filters injected by cross-filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraAnnotation {
    pub is_extra: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_filter_scope: Option<Value>,
    pub filter_option_name: String,
}

/// An ad-hoc filter as consumed by query construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdhocFilter {
    #[serde(flatten)]
    pub expression: AdhocExpression,
    pub clause: Clause,
    #[serde(flatten)]
    pub extra: Option<ExtraAnnotation>,
}

impl AdhocFilter {
    pub fn expression_type(&self) -> ExpressionType {
        match self.expression {
            AdhocExpression::Simple { .. } => ExpressionType::Simple,
            AdhocExpression::Sql { .. } => ExpressionType::Sql,
        }
    }

    pub fn is_extra(&self) -> bool {
        self.extra.as_ref().is_some_and(|e| e.is_extra)
    }

    pub fn filter_option_name(&self) -> Option<&str> {
        self.extra.as_ref().map(|e| e.filter_option_name.as_str())
    }

    pub fn layer_filter_scope(&self) -> Option<&Value> {
        self.extra.as_ref()?.layer_filter_scope.as_ref()
    }

    pub fn sql_expression(&self) -> Option<&str> {
        match &self.expression {
            AdhocExpression::Sql { sql_expression } => Some(sql_expression),
            AdhocExpression::Simple { .. } => None,
        }
    }

    pub fn operator_id(&self) -> Option<OperatorId> {
        match &self.expression {
            AdhocExpression::Simple { operator_id, .. } => *operator_id,
            AdhocExpression::Sql { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
