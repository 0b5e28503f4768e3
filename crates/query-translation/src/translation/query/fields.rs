//! Handle vertical filtering: the select column list, JSON sub-field
//! selection, and embedded resources.
//!
//! Embedding makes this module mutually recursive with `root`: every embed
//! is a full query of its own, translated with a fresh registry, whose
//! select text folds into the parent's column list and whose remaining
//! parameters the parent flattens under the embed alias.

use indexmap::IndexMap;

use super::root;
use super::root::TranslatedQuery;
use crate::request::{Select, SelectEntry, SelectMap};
use crate::translation::error::Error;

/// Sub-queries registered while translating one selection map, keyed by
/// embed alias. Created fresh for every translation call, never shared.
pub type EmbedRegistry = IndexMap<String, TranslatedQuery>;

/// Translate a select specification into the `select` parameter value,
/// registering one entry per embedded resource.
pub fn translate_select(select: &Select, embeds: &mut EmbedRegistry) -> Result<String, Error> {
    match select {
        Select::Verbatim(text) => Ok(text.clone()),
        Select::List(columns) => Ok(columns.join(",")),
        Select::Map(entries) => {
            let tokens = translate_entries(entries, &[], embeds)?;
            Ok(tokens.join(","))
        }
    }
}

fn translate_entries(
    entries: &SelectMap,
    json_chain: &[String],
    embeds: &mut EmbedRegistry,
) -> Result<Vec<String>, Error> {
    let mut tokens = vec![];
    for (key, entry) in entries {
        match entry {
            SelectEntry::Exclude => {}
            SelectEntry::Include => tokens.push(render_column(key, json_chain, None)),
            SelectEntry::Cast(cast) => tokens.push(render_column(key, json_chain, Some(cast))),
            SelectEntry::Embed(query) => {
                let translated = root::translate_query(query)?;
                let sub_select = translated.select.clone().unwrap_or_default();
                // alias collisions within one selection map overwrite
                embeds.insert(embed_alias(key).to_string(), translated);
                tokens.push(format!("{key}({sub_select})"));
            }
            SelectEntry::Json(json_field) => {
                let (alias, field) = split_alias(key);
                let mut chain = json_chain.to_vec();
                chain.push(field.to_string());
                let sub_tokens = translate_entries(&json_field.fields, &chain, embeds)?;
                if !sub_tokens.is_empty() && alias.is_none() && json_field.cast.is_none() {
                    // a plain pass-through JSON container is transparent
                    tokens.extend(sub_tokens);
                } else {
                    tokens.push(render_path(alias, &chain, json_field.cast.as_deref()));
                }
            }
        }
    }
    Ok(tokens)
}

fn render_column(key: &str, json_chain: &[String], cast: Option<&str>) -> String {
    let (alias, field) = split_alias(key);
    let mut path = json_chain.to_vec();
    path.push(field.to_string());
    render_path(alias, &path, cast)
}

fn render_path(alias: Option<&str>, path: &[String], cast: Option<&str>) -> String {
    let mut token = String::new();
    if let Some(alias) = alias {
        token.push_str(alias);
        token.push(':');
    }
    token.push_str(&path.join("->"));
    if let Some(cast) = cast {
        token.push_str("::");
        token.push_str(cast);
    }
    token
}

/// `[alias:]field`: the text before the first `:` is an output alias.
fn split_alias(key: &str) -> (Option<&str>, &str) {
    match key.split_once(':') {
        Some((alias, field)) => (Some(alias), field),
        None => (None, key),
    }
}

/// The alias an embedded resource's flattened parameters are prefixed with:
/// the key segment before any `:`, then before any `!` hint.
fn embed_alias(key: &str) -> &str {
    let head = key.split(':').next().unwrap_or(key);
    head.split('!').next().unwrap_or(head)
}

#[cfg(test)]
mod tests {
    use super::embed_alias;

    #[test]
    fn embed_alias_strips_hints_but_keeps_output_aliases() {
        assert_eq!(embed_alias("directors"), "directors");
        assert_eq!(embed_alias("directors!inner"), "directors");
        assert_eq!(embed_alias("nick:directors!inner"), "nick");
    }
}
