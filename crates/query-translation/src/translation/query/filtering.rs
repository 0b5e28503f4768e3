//! Handle horizontal filtering: operator chains, logical grouping, and JSON
//! path traversal.

use postgrest_query_string::string::Parameter;

use super::values;
use super::values::ArrayBrackets;
use crate::request::{Condition, ConditionMap, Range, Scalar};
use crate::translation::error::Error;

const LOGICAL_OPERATORS: [&str; 4] = ["and", "or", "not.and", "not.or"];

fn is_logical(key: &str) -> bool {
    LOGICAL_OPERATORS.contains(&key)
}

/// Translate a condition map into `(key, value)` parameters, in input
/// order. `json_prefix` carries the JSON path accumulated by drilling into
/// nested objects; it is empty at the top level.
pub fn translate_conditions(
    conditions: &ConditionMap,
    json_prefix: &str,
) -> Result<Vec<Parameter>, Error> {
    let mut parameters = vec![];
    for (raw_key, condition) in conditions {
        // an `alias:` prefix only disambiguates duplicate map keys; it
        // plays no part in the output.
        let key = strip_alias(raw_key);
        if is_logical(key) {
            translate_logical(&mut parameters, key, condition, json_prefix)?;
        } else {
            translate_comparison(&mut parameters, key, condition, json_prefix)?;
        }
    }
    Ok(parameters)
}

fn strip_alias(key: &str) -> &str {
    match key.split_once(':') {
        Some((_, rest)) => rest,
        None => key,
    }
}

fn translate_logical(
    parameters: &mut Vec<Parameter>,
    key: &str,
    condition: &Condition,
    json_prefix: &str,
) -> Result<(), Error> {
    let Condition::Nested(nested) = condition else {
        return Err(Error::ConditionType {
            key: key.to_string(),
        });
    };
    if !json_prefix.is_empty() {
        return Err(Error::NestedLogicalOperator {
            operator: key.to_string(),
            path: json_prefix.to_string(),
        });
    }

    let children = translate_conditions(nested, "")?;
    // empty groups vanish rather than rendering as `key=()`
    if children.is_empty() {
        return Ok(());
    }

    let rendered: Vec<String> = children
        .iter()
        .map(|child| {
            if is_logical(&child.key) {
                // a nested group's value is already parenthesized
                format!("{}{}", child.key, child.value)
            } else {
                format!("{}.{}", child.key, child.value)
            }
        })
        .collect();
    parameters.push(Parameter {
        key: key.to_string(),
        value: format!("({})", rendered.join(",")),
    });
    Ok(())
}

fn translate_comparison(
    parameters: &mut Vec<Parameter>,
    key: &str,
    condition: &Condition,
    json_prefix: &str,
) -> Result<(), Error> {
    let mut segments = key.split('.');
    let field = segments.next().unwrap_or_default();
    let operators: Vec<&str> = segments.collect();

    // a nested object on a key without operators stands for sub-fields of
    // a JSON column, not for a value
    if operators.is_empty() {
        if let Condition::Nested(nested) = condition {
            let prefix = if json_prefix.is_empty() {
                field.to_string()
            } else {
                format!("{json_prefix}->{field}")
            };
            parameters.extend(translate_conditions(nested, &prefix)?);
            return Ok(());
        }
    }

    let serialized = if operators.last() == Some(&"in") {
        match condition {
            Condition::Array(items) => values::serialize_array(items, ArrayBrackets::Parens),
            _ => {
                return Err(Error::ConditionType {
                    key: key.to_string(),
                })
            }
        }
    } else {
        match condition {
            Condition::Scalar(scalar) => values::serialize_scalar(scalar),
            Condition::Array(items) => values::serialize_array(items, ArrayBrackets::Braces),
            Condition::Range(range) => values::serialize_range(range),
            // the operator chain is what makes this object a range rather
            // than a JSON path; resolve its shape only now
            Condition::Nested(nested) => match range_from_nested(nested) {
                Some(range) => values::serialize_range(&range),
                None => {
                    return Err(Error::ConditionType {
                        key: key.to_string(),
                    })
                }
            },
        }
    };

    // `->>` extracts text, so string comparisons use it; everything else
    // stays in JSON land with `->`
    let parameter_key = if json_prefix.is_empty() {
        field.to_string()
    } else {
        let arrow = match condition {
            Condition::Scalar(Scalar::String(_)) => "->>",
            _ => "->",
        };
        format!("{json_prefix}{arrow}{field}")
    };
    let value = if operators.is_empty() {
        serialized
    } else {
        format!("{}.{}", operators.join("."), serialized)
    };

    parameters.push(Parameter {
        key: parameter_key,
        value,
    });
    Ok(())
}

/// A nested object under an operator chain stands for a range literal, not
/// JSON-path drilling. It must carry both bounds and nothing but range keys.
fn range_from_nested(nested: &ConditionMap) -> Option<Range> {
    if !nested.contains_key("lower") || !nested.contains_key("upper") {
        return None;
    }
    let mut range = Range::new(Scalar::Null, Scalar::Null);
    for (key, value) in nested {
        match (key.as_str(), value) {
            ("lower", Condition::Scalar(scalar)) => range.lower = scalar.clone(),
            ("upper", Condition::Scalar(scalar)) => range.upper = scalar.clone(),
            ("includeLower", Condition::Scalar(Scalar::Bool(flag))) => {
                range.include_lower = *flag;
            }
            ("includeUpper", Condition::Scalar(Scalar::Bool(flag))) => {
                range.include_upper = *flag;
            }
            _ => return None,
        }
    }
    Some(range)
}
