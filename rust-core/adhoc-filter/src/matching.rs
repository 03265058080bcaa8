// SPDX-License-Identifier: PMPL-1.0-or-later
//! Provenance lookup for cross-filter clauses.
//!
//! A clause produced by cross-filtering may carry the filters each layer
//! emitted earlier. Finding the layer whose filters contain the clause lets
//! the adapter recover that layer's scope.

use adhoc_sql::value::integral_number;
use adhoc_sql::Operation;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::clause::{Column, FilterClause};

/// Key of the first mapping entry holding a filter equal to `clause`.
///
/// Entries are visited in insertion order and each array is scanned front to
/// back. A filter matches when its column and operation equal the clause's
/// and both values serialise identically (see [`canonical_json`]); an absent
/// value only matches an absent value.
pub fn find_matching_filter_key(clause: &FilterClause) -> Option<&str> {
    let mapping = clause.filter_data_mapping.as_ref()?;
    let target_val = clause.val.as_ref().map(canonical_json);

    for (key, filters) in mapping.iter() {
        let Value::Array(filters) = filters else {
            trace!(key, "Skipping non-array filter mapping entry");
            continue;
        };
        if filters
            .iter()
            .any(|filter| filter_matches(filter, &clause.col, clause.op, target_val.as_deref()))
        {
            return Some(key);
        }
    }
    None
}

fn filter_matches(filter: &Value, col: &Column, op: Operation, val: Option<&str>) -> bool {
    let Value::Object(fields) = filter else {
        return false;
    };

    let same_col = fields
        .get("col")
        .and_then(|v| Column::deserialize(v).ok())
        .is_some_and(|c| &c == col);
    if !same_col {
        return false;
    }

    let same_op = fields
        .get("op")
        .and_then(|v| Operation::deserialize(v).ok())
        .is_some_and(|o| o == op);
    if !same_op {
        return false;
    }

    fields.get("val").map(canonical_json).as_deref() == val
}

/// Serialise a value for structural comparison.
///
/// Integral floats are written as integers so `5` and `5.0` compare equal.
/// Object keys keep their original order.
pub fn canonical_json(value: &Value) -> String {
    normalize(value).to_string()
}

fn normalize(value: &Value) -> Value {
    match value {
        Value::Number(n) => integral_number(n).map(Value::from).unwrap_or_else(|| value.clone()),
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{AdhocColumn, FilterDataMapping};
    use serde_json::json;

    fn mapping(value: Value) -> FilterDataMapping {
        match value {
            Value::Object(map) => FilterDataMapping::from(map),
            _ => panic!("mapping fixture must be an object"),
        }
    }

    #[test]
    fn test_no_mapping_means_no_match() {
        let clause = FilterClause::new("a", Operation::Eq).with_val(5);
        assert_eq!(find_matching_filter_key(&clause), None);
    }

    #[test]
    fn test_matching_value() {
        let clause = FilterClause::new("a", Operation::Eq)
            .with_val(5)
            .with_filter_data_mapping(mapping(json!({"layer1": [{"col": "a", "op": "==", "val": 5}]})));
        assert_eq!(find_matching_filter_key(&clause), Some("layer1"));
    }

    #[test]
    fn test_different_value_no_match() {
        let clause = FilterClause::new("a", Operation::Eq)
            .with_val(6)
            .with_filter_data_mapping(mapping(json!({"layer1": [{"col": "a", "op": "==", "val": 5}]})));
        assert_eq!(find_matching_filter_key(&clause), None);
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let clause = FilterClause::new("a", Operation::In)
            .with_val(json!(["x", "y"]))
            .with_filter_data_mapping(mapping(json!({
                "first": [{"col": "b", "op": "IN", "val": ["x", "y"]}],
                "second": [{"col": "a", "op": "IN", "val": ["x", "y"]}],
                "third": [{"col": "a", "op": "IN", "val": ["x", "y"]}]
            })));
        assert_eq!(find_matching_filter_key(&clause), Some("second"));
    }

    #[test]
    fn test_structural_value_equality() {
        let clause = FilterClause::new("a", Operation::Eq)
            .with_val(json!({"lo": 1, "hi": 2.0}))
            .with_filter_data_mapping(mapping(json!({"k": [{"col": "a", "op": "==", "val": {"lo": 1.0, "hi": 2}}]})));
        assert_eq!(find_matching_filter_key(&clause), Some("k"));
    }

    #[test]
    fn test_list_order_matters() {
        let clause = FilterClause::new("a", Operation::In)
            .with_val(json!([1, 2]))
            .with_filter_data_mapping(mapping(json!({"k": [{"col": "a", "op": "IN", "val": [2, 1]}]})));
        assert_eq!(find_matching_filter_key(&clause), None);
    }

    #[test]
    fn test_absent_value_matches_only_absent() {
        let m = mapping(json!({
            "with_null": [{"col": "a", "op": "IS NULL", "val": null}],
            "without": [{"col": "a", "op": "IS NULL"}]
        }));
        let clause = FilterClause::new("a", Operation::IsNull).with_filter_data_mapping(m.clone());
        assert_eq!(find_matching_filter_key(&clause), Some("without"));

        let clause = FilterClause::new("a", Operation::IsNull)
            .with_val(Value::Null)
            .with_filter_data_mapping(m);
        assert_eq!(find_matching_filter_key(&clause), Some("with_null"));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let clause = FilterClause::new("a", Operation::Eq)
            .with_val(1)
            .with_filter_data_mapping(mapping(json!({
                "scalar": 42,
                "junk": ["nope", {"col": 7}, {"col": "a", "op": "???", "val": 1}],
                "good": [{"col": "a", "op": "==", "val": 1}]
            })));
        assert_eq!(find_matching_filter_key(&clause), Some("good"));
    }

    #[test]
    fn test_adhoc_column_matches_structurally() {
        let col = AdhocColumn::new("upper(name)").with_label("name");
        let clause = FilterClause::new(col, Operation::Like)
            .with_val("A%")
            .with_filter_data_mapping(mapping(json!({
                "k": [{"col": {"sqlExpression": "upper(name)", "label": "name"}, "op": "LIKE", "val": "A%"}]
            })));
        assert_eq!(find_matching_filter_key(&clause), Some("k"));
    }

    #[test]
    fn test_canonical_json_normalizes_integral_floats() {
        assert_eq!(canonical_json(&json!(5.0)), "5");
        assert_eq!(canonical_json(&json!([1.5, 2.0])), "[1.5,2]");
        assert_eq!(canonical_json(&json!("5")), "\"5\"");
    }
}
