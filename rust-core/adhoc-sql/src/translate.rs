// SPDX-License-Identifier: PMPL-1.0-or-later
//! SQL fragment rendering for simple filter expressions.
//!
//! A simple expression is a `subject operator comparator` triple. Rendering
//! maps the operation symbol to its SQL keyword, then appends the comparator
//! values, quoting them when the first value is not numeric and wrapping list
//! operators in parentheses:
//!
//! ```text
//! (extract(year from ts)) > 2020
//! region IN ('US', 'CA')
//! name = 'O''Brien'
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};

use crate::operators::Operation;
use crate::value::{comparator_values, looks_numeric, option_label};

/// Physical table a filter runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceRef {
    pub schema: String,
    pub datasource_name: String,
}

/// Rendering context. Only the latest-partition operator reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlContext {
    #[serde(default)]
    pub datasource: Option<DatasourceRef>,
}

impl SqlContext {
    pub fn with_datasource(datasource: DatasourceRef) -> Self {
        Self {
            datasource: Some(datasource),
        }
    }
}

/// A `subject operator comparator` triple ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleExpression {
    pub subject: String,
    pub operator: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Value>,
}

/// SQL keyword for an operation.
///
/// `TEMPORAL_RANGE` has none, and `LATEST PARTITION` has none without a
/// datasource in the context.
pub fn sql_operator(operation: Operation, ctx: &SqlContext) -> Option<Cow<'static, str>> {
    let keyword = match operation {
        Operation::Eq => "=",
        Operation::NotEq => "<>",
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
        Operation::LatestPartition => {
            let ds = ctx.datasource.as_ref()?;
            return Some(Cow::Owned(format!(
                "= '{{{{ presto.latest_partition('{}.{}') }}}}'",
                ds.schema, ds.datasource_name
            )));
        }
        Operation::TemporalRange => return None,
    };
    Some(Cow::Borrowed(keyword))
}

/// Render a simple expression as a SQL fragment.
pub fn translate_to_sql(expr: &SimpleExpression, ctx: &SqlContext) -> String {
    let operator = match expr.operator {
        Some(op) => {
            let keyword = sql_operator(op, ctx);
            if keyword.is_none() {
                warn!(operator = %op, "Operator has no SQL rendering; emitting subject only");
            }
            keyword
        }
        None => None,
    };
    let sql = simple_sql_expression(&expr.subject, operator.as_deref(), expr.comparator.as_ref());
    trace!(sql = %sql, "Rendered simple expression");
    sql
}

/// Join subject, SQL operator keyword and comparator into SQL text.
///
/// Without both a subject and an operator the subject is returned as is.
pub fn simple_sql_expression(
    subject: &str,
    operator: Option<&str>,
    comparator: Option<&Value>,
) -> String {
    let mut expression = subject.to_string();
    let operator = match operator {
        Some(op) if !subject.is_empty() => op,
        _ => return expression,
    };
    expression.push(' ');
    expression.push_str(operator);

    let is_multi = operator == Operation::In.as_str() || operator == Operation::NotIn.as_str();
    let first_value = match comparator {
        Some(Value::Array(items)) if is_multi => items.first(),
        other => other,
    };
    let is_string = first_value.is_some_and(|v| !looks_numeric(v));

    let values = comparator_values(comparator);
    if values.is_empty() {
        return expression;
    }

    let formatted: Vec<String> = values
        .into_iter()
        .map(|v| {
            let label = option_label(v);
            if is_string {
                format!("'{}'", label.replace('\'', "''"))
            } else {
                label
            }
        })
        .collect();

    expression.push(' ');
    if is_multi {
        expression.push('(');
        expression.push_str(&formatted.join(", "));
        expression.push(')');
    } else {
        expression.push_str(&formatted.join(", "));
    }
    expression
}
