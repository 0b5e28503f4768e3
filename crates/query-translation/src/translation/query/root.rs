//! Translate a whole request: assemble the ordered parameter list and
//! attach it to the normalized resource path.

use postgrest_query_string::helpers::normalize_path;
use postgrest_query_string::string::{CompiledQuery, Parameter, QueryString};

use super::fields;
use super::fields::EmbedRegistry;
use super::filtering;
use super::sorting;
use crate::request::{Columns, Query};
use crate::translation::error::Error;

/// One translated (sub-)query: its parameters in canonical order, plus the
/// select text a parent embed token needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedQuery {
    pub select: Option<String>,
    pub parameters: Vec<Parameter>,
}

/// Translate the query for `collection` under `base_path` into a compiled
/// query string. Any error aborts the whole translation; no partial output
/// is ever produced.
pub fn translate(
    base_path: &str,
    collection: &str,
    query: &Query,
) -> Result<CompiledQuery, Error> {
    let translated = translate_query(query)?;
    tracing::debug!("translated query parameters: {:?}", translated.parameters);

    let mut query_string = QueryString::new();
    for parameter in translated.parameters {
        query_string.append(parameter.key, parameter.value);
    }
    Ok(CompiledQuery {
        path: normalize_path(base_path, collection),
        query: query_string,
    })
}

/// Translate one query level. The parameter order is fixed (columns,
/// select, order, limit, offset, conditions, flattened embeds), so output
/// is deterministic even though the server does not require it.
pub(crate) fn translate_query(query: &Query) -> Result<TranslatedQuery, Error> {
    let mut parameters: Vec<Parameter> = vec![];
    let mut embeds = EmbedRegistry::new();

    if let Some(columns) = &query.columns {
        parameters.push(pair("columns", render_columns(columns)));
    }

    let mut select_text = None;
    if let Some(select) = &query.select {
        let text = fields::translate_select(select, &mut embeds)?;
        parameters.push(pair("select", text.clone()));
        select_text = Some(text);
    }

    if let Some(order) = &query.order {
        parameters.push(pair("order", sorting::translate_order(order)));
    }
    if let Some(limit) = query.limit.filter(|limit| *limit != 0) {
        parameters.push(pair("limit", limit.to_string()));
    }
    if let Some(offset) = query.offset.filter(|offset| *offset != 0) {
        parameters.push(pair("offset", offset.to_string()));
    }

    parameters.extend(filtering::translate_conditions(&query.conditions, "")?);

    // flattening pass: every embed's parameters join this level's list
    // under an `alias.` prefix. `select` and `columns` stay behind, since
    // they are already folded into the parent's select text. deeper embeds
    // arrive here already flattened, which is what compounds nested alias
    // paths.
    for (alias, embedded) in embeds {
        for parameter in embedded.parameters {
            if parameter.key == "select" || parameter.key == "columns" {
                continue;
            }
            parameters.push(pair(format!("{alias}.{}", parameter.key), parameter.value));
        }
    }

    Ok(TranslatedQuery {
        select: select_text,
        parameters,
    })
}

fn pair(key: impl Into<String>, value: impl Into<String>) -> Parameter {
    Parameter {
        key: key.into(),
        value: value.into(),
    }
}

fn render_columns(columns: &Columns) -> String {
    match columns {
        Columns::Verbatim(text) => text.clone(),
        Columns::List(names) => names.join(","),
    }
}
