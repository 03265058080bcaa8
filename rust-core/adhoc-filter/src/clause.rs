// SPDX-License-Identifier: PMPL-1.0-or-later
//! Simple filter clauses as produced by cross-filtering.

use std::fmt;
use std::str::FromStr;

use adhoc_sql::Operation;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::AdapterError;

/// SQL clause a filter is applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Clause {
    #[default]
    Where,
    Having,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Where => write!(f, "WHERE"),
            Clause::Having => write!(f, "HAVING"),
        }
    }
}

impl FromStr for Clause {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WHERE" => Ok(Clause::Where),
            "HAVING" => Ok(Clause::Having),
            _ => Err(AdapterError::UnknownClause(s.to_string())),
        }
    }
}

/// Expression kind of a computed column. Only SQL expressions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnExpressionType {
    #[serde(rename = "SQL")]
    Sql,
}

/// A computed column carrying its own SQL expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocColumn {
    pub sql_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_type: Option<ColumnExpressionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_custom_label: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_grain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

impl AdhocColumn {
    pub fn new(sql_expression: impl Into<String>) -> Self {
        Self {
            sql_expression: sql_expression.into(),
            label: None,
            expression_type: None,
            has_custom_label: None,
            time_grain: None,
            column_type: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Column reference: a physical column name or a computed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Physical(String),
    Adhoc(AdhocColumn),
}

impl Column {
    pub fn is_adhoc(&self) -> bool {
        matches!(self, Column::Adhoc(_))
    }

    /// Text used in log output: the name, or the SQL expression.
    pub fn describe(&self) -> &str {
        match self {
            Column::Physical(name) => name,
            Column::Adhoc(col) => &col.sql_expression,
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Physical(name.to_string())
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::Physical(name)
    }
}

impl From<AdhocColumn> for Column {
    fn from(col: AdhocColumn) -> Self {
        Column::Adhoc(col)
    }
}

/// A previously seen filter, as stored in a [`FilterDataMapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub col: Column,
    pub op: Operation,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub val: Option<Value>,
}

impl FilterDescriptor {
    pub fn new(col: impl Into<Column>, op: Operation, val: Option<Value>) -> Self {
        Self {
            col: col.into(),
            op,
            val,
        }
    }
}

/// Insertion-ordered map from an opaque provenance key to the filters seen
/// under it.
///
/// Entries are raw JSON: anything that is not an array, and array items that
/// do not read as filters, are ignored by matching rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterDataMapping(Map<String, Value>);

impl FilterDataMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the filters seen under `key`, replacing any earlier entry.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        filters: &[FilterDescriptor],
    ) -> Result<(), AdapterError> {
        let value = serde_json::to_value(filters)?;
        self.0.insert(key.into(), value);
        Ok(())
    }

    /// Store an arbitrary JSON value under `key`.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for FilterDataMapping {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One filtering condition handed over by cross-filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    pub col: Column,
    pub op: Operation,
    /// `None` when the key is absent; an explicit JSON `null` is `Some(Null)`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub val: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_extra: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_data_mapping: Option<FilterDataMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_filter_scope: Option<Map<String, Value>>,
}

impl FilterClause {
    pub fn new(col: impl Into<Column>, op: Operation) -> Self {
        Self {
            col: col.into(),
            op,
            val: None,
            is_extra: false,
            grain: None,
            filter_data_mapping: None,
            layer_filter_scope: None,
        }
    }

    pub fn with_val(mut self, val: impl Into<Value>) -> Self {
        self.val = Some(val.into());
        self
    }

    /// Mark the clause as injected by cross-filtering.
    pub fn extra(mut self) -> Self {
        self.is_extra = true;
        self
    }

    pub fn with_filter_data_mapping(mut self, mapping: FilterDataMapping) -> Self {
        self.filter_data_mapping = Some(mapping);
        self
    }

    pub fn with_layer_filter_scope(mut self, scope: Map<String, Value>) -> Self {
        self.layer_filter_scope = Some(scope);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, AdapterError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Keep an explicit `null` distinct from a missing key.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clause_parse_case_insensitive() {
        assert_eq!("where".parse::<Clause>().unwrap(), Clause::Where);
        assert_eq!("Having".parse::<Clause>().unwrap(), Clause::Having);
        assert!("GROUP BY".parse::<Clause>().is_err());
    }

    #[test]
    fn test_clause_serde() {
        assert_eq!(serde_json::to_string(&Clause::Having).unwrap(), "\"HAVING\"");
        assert_eq!(Clause::default(), Clause::Where);
    }

    #[test]
    fn test_physical_column_from_json() {
        let clause = FilterClause::from_json(r#"{"col":"region","op":"==","val":"US"}"#).unwrap();
        assert_eq!(clause.col, Column::Physical("region".to_string()));
        assert_eq!(clause.op, Operation::Eq);
        assert_eq!(clause.val, Some(json!("US")));
        assert!(!clause.is_extra);
    }

    #[test]
    fn test_adhoc_column_from_json() {
        let clause = FilterClause::from_json(
            r#"{"col":{"sqlExpression":"extract(year from ts)","label":"year"},"op":">","val":2020}"#,
        )
        .unwrap();
        assert!(clause.col.is_adhoc());
        assert_eq!(clause.col.describe(), "extract(year from ts)");
    }

    #[test]
    fn test_absent_and_null_val_differ() {
        let absent = FilterClause::from_json(r#"{"col":"a","op":"IS NULL"}"#).unwrap();
        let null = FilterClause::from_json(r#"{"col":"a","op":"==","val":null}"#).unwrap();
        assert_eq!(absent.val, None);
        assert_eq!(null.val, Some(Value::Null));
    }

    #[test]
    fn test_unknown_operation_rejected() {
        assert!(FilterClause::from_json(r#"{"col":"a","op":"~="}"#).is_err());
    }

    #[test]
    fn test_extra_fields_from_json() {
        let clause = FilterClause::from_json(
            r#"{
                "col": "a", "op": "IN", "val": [1, 2], "isExtra": true,
                "filterDataMapping": {"layer2": [], "layer1": [{"col": "a", "op": "IN", "val": [1, 2]}]},
                "layerFilterScope": {"layer1": {"scope": ["ROOT_ID"]}}
            }"#,
        )
        .unwrap();
        assert!(clause.is_extra);
        let keys: Vec<&str> = clause
            .filter_data_mapping
            .as_ref()
            .unwrap()
            .iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["layer2", "layer1"]);
    }

    #[test]
    fn test_mapping_insert_typed() {
        let mut mapping = FilterDataMapping::new();
        mapping
            .insert("layer1", &[FilterDescriptor::new("a", Operation::Eq, Some(json!(5)))])
            .unwrap();
        assert_eq!(mapping.len(), 1);
        let (_, value) = mapping.iter().next().unwrap();
        assert_eq!(value, &json!([{"col": "a", "op": "==", "val": 5}]));
    }

    #[test]
    fn test_clause_serialises_camel_case() {
        let clause = FilterClause::new("a", Operation::Lt).with_val(3).extra();
        let json = serde_json::to_value(&clause).unwrap();
        assert_eq!(json, json!({"col": "a", "op": "<", "val": 3, "isExtra": true}));
    }
}
