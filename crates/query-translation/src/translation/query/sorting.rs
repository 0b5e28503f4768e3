//! Render the order specification as the `order` parameter value.

use crate::request::{OrderBy, OrderDirection, OrderTerm};

pub fn translate_order(order: &OrderBy) -> String {
    match order {
        OrderBy::Verbatim(text) => text.clone(),
        OrderBy::List(terms) => {
            let rendered: Vec<String> = terms
                .iter()
                .map(|term| match term {
                    OrderTerm::Column(field) => field.clone(),
                    OrderTerm::ColumnWithDirection(field, direction) => {
                        format!("{field}.{direction}")
                    }
                })
                .collect();
            rendered.join(",")
        }
        OrderBy::Map(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(field, direction)| match direction {
                    OrderDirection::Bare => field.clone(),
                    OrderDirection::Direction(direction) => format!("{field}.{direction}"),
                })
                .collect();
            rendered.join(",")
        }
    }
}
