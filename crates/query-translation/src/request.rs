//! The typed request model: a declarative description of one query against
//! a resource, plus the serde layer that maps the loose JSON shapes dynamic
//! clients produce onto explicit variants.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Condition keys (`[alias:]field[.op]*`) mapped to their values, in
/// insertion order. An `alias:` prefix only exists to let the same
/// field/operator combination appear twice in one map.
pub type ConditionMap = IndexMap<String, Condition>;

/// Selection keys (`[alias:]field`) mapped to their values, in insertion
/// order.
pub type SelectMap = IndexMap<String, SelectEntry>;

/// One declarative query. In the JSON form the reserved keys `columns`,
/// `select`, `order`, `limit` and `offset` become the corresponding fields;
/// every other key is a condition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub columns: Option<Columns>,
    pub select: Option<Select>,
    pub order: Option<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub conditions: ConditionMap,
}

/// A scalar literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// The raw, unquoted rendering. Quoting is applied separately, where the
/// grammar position calls for it.
impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Number(number) => write!(f, "{number}"),
            Scalar::String(text) => write!(f, "{text}"),
        }
    }
}

/// The value side of one condition entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Scalar(Scalar),
    Array(Vec<Scalar>),
    Range(Range),
    /// Either the operand of a logical operator or, on a key without an
    /// operator chain, sub-fields of a JSON column.
    Nested(ConditionMap),
}

/// An interval literal with inclusivity markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub lower: Scalar,
    pub upper: Scalar,
    pub include_lower: bool,
    pub include_upper: bool,
}

impl Range {
    /// A lower-inclusive, upper-exclusive range, the default reading.
    pub fn new(lower: Scalar, upper: Scalar) -> Range {
        Range {
            lower,
            upper,
            include_lower: true,
            include_upper: false,
        }
    }
}

/// The `select` specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Select {
    /// A preformatted column list, passed through untouched.
    Verbatim(String),
    /// Column names, comma-joined verbatim.
    List(Vec<String>),
    /// Column keys mapped to what should happen with each.
    Map(SelectMap),
}

/// The value side of one selection entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEntry {
    /// Drop the column (`false`, `0`, `""` or `null` in the JSON form).
    Exclude,
    /// Select the column as-is.
    Include,
    /// Select the column with a cast suffix.
    Cast(String),
    /// Embed a related resource; the nested query's own parameters surface
    /// on the parent, prefixed with the embed alias.
    Embed(Box<Query>),
    /// Select sub-fields of a JSON column.
    Json(JsonField),
}

/// Sub-columns of a JSON-typed field. The dynamic form's `'::'` pseudo-entry
/// is the explicit `cast` here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonField {
    pub cast: Option<String>,
    pub fields: SelectMap,
}

/// The `columns` write restriction.
#[derive(Debug, Clone, PartialEq)]
pub enum Columns {
    Verbatim(String),
    List(Vec<String>),
}

/// The `order` specification.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderBy {
    Verbatim(String),
    List(Vec<OrderTerm>),
    Map(IndexMap<String, OrderDirection>),
}

/// One entry of an order list.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderTerm {
    Column(String),
    ColumnWithDirection(String, String),
}

/// One entry of an order map. `Bare` emits just the field name and leaves
/// the direction to the server's default.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDirection {
    Bare,
    Direction(String),
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D>(deserializer: D) -> Result<Query, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Query::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl Query {
    /// Map the dynamic JSON form onto the typed model. `null` stands for no
    /// query at all.
    pub fn from_json(value: &Value) -> Result<Query, String> {
        match value {
            Value::Null => Ok(Query::default()),
            Value::Object(entries) => {
                let mut query = Query::default();
                for (key, entry) in entries {
                    match key.as_str() {
                        "columns" => query.columns = Some(columns_from_json(entry)?),
                        "select" => query.select = Some(select_from_json(entry)?),
                        "order" => query.order = Some(order_from_json(entry)?),
                        "limit" => query.limit = Some(unsigned_from_json(entry, "limit")?),
                        "offset" => query.offset = Some(unsigned_from_json(entry, "offset")?),
                        _ => {
                            query
                                .conditions
                                .insert(key.clone(), condition_from_json(entry)?);
                        }
                    }
                }
                Ok(query)
            }
            other => Err(format!("expected an object for a query, got: {other}")),
        }
    }
}

fn scalar_from_json(value: &Value) -> Result<Scalar, String> {
    match value {
        Value::Null => Ok(Scalar::Null),
        Value::Bool(flag) => Ok(Scalar::Bool(*flag)),
        Value::Number(number) => Ok(Scalar::Number(number.clone())),
        Value::String(text) => Ok(Scalar::String(text.clone())),
        other => Err(format!("expected a scalar value, got: {other}")),
    }
}

fn condition_from_json(value: &Value) -> Result<Condition, String> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Ok(Condition::Scalar(scalar_from_json(value)?))
        }
        Value::Array(items) => Ok(Condition::Array(
            items
                .iter()
                .map(scalar_from_json)
                .collect::<Result<_, _>>()?,
        )),
        // every object stays nested here; whether it means a range literal
        // or JSON-path drilling depends on the operator chain of its key,
        // which only the translation phase sees
        Value::Object(entries) => {
            let mut nested = ConditionMap::new();
            for (key, entry) in entries {
                nested.insert(key.clone(), condition_from_json(entry)?);
            }
            Ok(Condition::Nested(nested))
        }
    }
}

fn select_from_json(value: &Value) -> Result<Select, String> {
    match value {
        Value::String(text) => Ok(Select::Verbatim(text.clone())),
        Value::Array(items) => Ok(Select::List(strings_from_json(items, "select")?)),
        Value::Object(entries) => {
            let mut map = SelectMap::new();
            for (key, entry) in entries {
                map.insert(key.clone(), select_entry_from_json(entry)?);
            }
            Ok(Select::Map(map))
        }
        other => Err(format!("expected a select specification, got: {other}")),
    }
}

fn select_entry_from_json(value: &Value) -> Result<SelectEntry, String> {
    match value {
        Value::Null | Value::Bool(false) => Ok(SelectEntry::Exclude),
        Value::Bool(true) => Ok(SelectEntry::Include),
        Value::Number(number) => {
            if number.as_f64() == Some(0.0) {
                Ok(SelectEntry::Exclude)
            } else {
                Ok(SelectEntry::Include)
            }
        }
        Value::String(text) if text.is_empty() => Ok(SelectEntry::Exclude),
        Value::String(text) => Ok(SelectEntry::Cast(text.clone())),
        Value::Object(entries) if entries.contains_key("select") => {
            Ok(SelectEntry::Embed(Box::new(Query::from_json(value)?)))
        }
        Value::Object(entries) => {
            let mut json_field = JsonField::default();
            for (key, entry) in entries {
                if key == "::" {
                    match entry {
                        Value::String(cast) => json_field.cast = Some(cast.clone()),
                        other => {
                            return Err(format!("expected a string for '::', got: {other}"));
                        }
                    }
                } else {
                    json_field
                        .fields
                        .insert(key.clone(), select_entry_from_json(entry)?);
                }
            }
            Ok(SelectEntry::Json(json_field))
        }
        other => Err(format!("expected a selection value, got: {other}")),
    }
}

fn columns_from_json(value: &Value) -> Result<Columns, String> {
    match value {
        Value::String(text) => Ok(Columns::Verbatim(text.clone())),
        Value::Array(items) => Ok(Columns::List(strings_from_json(items, "columns")?)),
        other => Err(format!("expected a columns specification, got: {other}")),
    }
}

fn order_from_json(value: &Value) -> Result<OrderBy, String> {
    match value {
        Value::String(text) => Ok(OrderBy::Verbatim(text.clone())),
        Value::Array(items) => {
            let terms = items
                .iter()
                .map(order_term_from_json)
                .collect::<Result<_, _>>()?;
            Ok(OrderBy::List(terms))
        }
        Value::Object(entries) => {
            let mut map = IndexMap::new();
            for (key, entry) in entries {
                let direction = match entry {
                    Value::Bool(true) => OrderDirection::Bare,
                    Value::String(direction) => OrderDirection::Direction(direction.clone()),
                    other => {
                        return Err(format!("expected an order direction, got: {other}"));
                    }
                };
                map.insert(key.clone(), direction);
            }
            Ok(OrderBy::Map(map))
        }
        other => Err(format!("expected an order specification, got: {other}")),
    }
}

fn order_term_from_json(value: &Value) -> Result<OrderTerm, String> {
    match value {
        Value::String(field) => Ok(OrderTerm::Column(field.clone())),
        Value::Array(parts) => match parts.as_slice() {
            [Value::String(field), Value::String(direction)] => Ok(
                OrderTerm::ColumnWithDirection(field.clone(), direction.clone()),
            ),
            _ => Err("expected a [field, direction] pair".to_string()),
        },
        other => Err(format!("expected an order term, got: {other}")),
    }
}

fn unsigned_from_json(value: &Value, key: &str) -> Result<u64, String> {
    value
        .as_u64()
        .ok_or_else(|| format!("expected an unsigned integer for '{key}', got: {value}"))
}

fn strings_from_json(items: &[Value], key: &str) -> Result<Vec<String>, String> {
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => Ok(text.clone()),
            other => Err(format!("expected a string in '{key}', got: {other}")),
        })
        .collect()
}
