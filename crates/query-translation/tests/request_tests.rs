//! Tests for the request model: the serde layer that maps loose JSON shapes
//! onto the typed variants, and translation of queries built directly.

use postgrest_query_translation::request::{
    Condition, ConditionMap, OrderBy, OrderTerm, Query, Range, Scalar, Select, SelectEntry,
    SelectMap,
};
use postgrest_query_translation::translation::query::translate;
use serde_json::json;
use similar_asserts::assert_eq;

#[test]
fn reserved_keys_become_fields_and_the_rest_conditions() {
    let query: Query = serde_json::from_value(json!({
        "select": "id",
        "limit": 10,
        "offset": 20,
        "id.eq": 1
    }))
    .unwrap();

    assert_eq!(query.select, Some(Select::Verbatim("id".to_string())));
    assert_eq!(query.limit, Some(10));
    assert_eq!(query.offset, Some(20));
    assert_eq!(query.conditions.len(), 1);
    assert_eq!(
        query.conditions.get("id.eq"),
        Some(&Condition::Scalar(Scalar::Number(1.into())))
    );
}

#[test]
fn condition_objects_stay_nested_until_translation() {
    // whether an object means a range literal or JSON-path drilling is
    // decided by the key's operator chain during translation, so the
    // serde layer never commits to a range
    let query: Query =
        serde_json::from_value(json!({ "period.ov": { "lower": 1, "upper": 10 } })).unwrap();
    assert!(matches!(
        query.conditions.get("period.ov"),
        Some(Condition::Nested(_))
    ));
}

#[test]
fn falsy_select_values_exclude_the_column() {
    let query: Query = serde_json::from_value(json!({
        "select": { "a": false, "b": 0, "c": "", "d": null, "e": true }
    }))
    .unwrap();
    let Some(Select::Map(entries)) = &query.select else {
        panic!("expected a select map");
    };
    for key in ["a", "b", "c", "d"] {
        assert_eq!(entries.get(key), Some(&SelectEntry::Exclude));
    }
    assert_eq!(entries.get("e"), Some(&SelectEntry::Include));
}

#[test]
fn a_select_key_marks_an_embed() {
    let query: Query = serde_json::from_value(json!({
        "select": {
            "directors": { "select": "id" },
            "json_data": { "age": true }
        }
    }))
    .unwrap();
    let Some(Select::Map(entries)) = &query.select else {
        panic!("expected a select map");
    };
    assert!(matches!(
        entries.get("directors"),
        Some(SelectEntry::Embed(_))
    ));
    assert!(matches!(entries.get("json_data"), Some(SelectEntry::Json(_))));
}

#[test]
fn malformed_shapes_fail_at_deserialization() {
    assert!(serde_json::from_value::<Query>(json!(true)).is_err());
    assert!(serde_json::from_value::<Query>(json!({ "limit": "ten" })).is_err());
    assert!(serde_json::from_value::<Query>(json!({ "order": 5 })).is_err());
    assert!(serde_json::from_value::<Query>(json!({ "tags.cs": [[1]] })).is_err());
}

#[test]
fn queries_built_directly_translate_the_same_way() {
    let mut conditions = ConditionMap::new();
    conditions.insert(
        "id.eq".to_string(),
        Condition::Scalar(Scalar::Number(1.into())),
    );
    conditions.insert(
        "range.sl".to_string(),
        Condition::Range(Range::new(
            Scalar::Number(1.into()),
            Scalar::Number(10.into()),
        )),
    );

    let mut select = SelectMap::new();
    select.insert("id".to_string(), SelectEntry::Include);
    select.insert("salary".to_string(), SelectEntry::Cast("text".to_string()));

    let query = Query {
        select: Some(Select::Map(select)),
        order: Some(OrderBy::List(vec![OrderTerm::ColumnWithDirection(
            "id".to_string(),
            "desc".to_string(),
        )])),
        conditions,
        ..Query::default()
    };

    let compiled = translate("/rest/v1", "employees", &query).unwrap();
    assert_eq!(compiled.path, "/rest/v1/employees");
    assert_eq!(
        compiled.query.plain(),
        "select=id,salary::text&order=id.desc&id=eq.1&range=sl.[1,10)"
    );
}
