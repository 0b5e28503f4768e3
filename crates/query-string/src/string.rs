//! Type definitions of a low-level query string representation.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a parameter value is rendered for the wire.
/// The PostgREST grammar characters (parentheses, commas, dots, colons,
/// arrows, quotes around literals stay as `%22`) must survive literally
/// enough for the server's syntactic parser; only the characters that URL
/// syntax itself reserves are escaped.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>');

/// Keys additionally escape `=` so the pair separator stays unambiguous.
const KEY: &AsciiSet = &COMPONENT.add(b'=');

/// A single `key=value` query-string parameter. Keys are repeatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

/// An ordered list of query-string parameters. Order is deterministic and
/// preserved as appended, even though the server does not require it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryString {
    parameters: Vec<Parameter>,
}

impl QueryString {
    pub fn new() -> QueryString {
        QueryString { parameters: vec![] }
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.push(Parameter {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn pairs(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Render without percent-encoding. Useful for logs and tests, where the
    /// raw grammar is what matters.
    pub fn plain(&self) -> String {
        let rendered: Vec<String> = self
            .parameters
            .iter()
            .map(|parameter| format!("{}={}", parameter.key, parameter.value))
            .collect();
        rendered.join("&")
    }

    /// Render percent-encoded for the wire.
    pub fn encode(&self) -> String {
        let rendered: Vec<String> = self
            .parameters
            .iter()
            .map(|parameter| {
                format!(
                    "{}={}",
                    utf8_percent_encode(&parameter.key, KEY),
                    utf8_percent_encode(&parameter.value, COMPONENT)
                )
            })
            .collect();
        rendered.join("&")
    }
}

/// The final product of translation: a normalized resource path plus its
/// query string, ready to hand to an HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub path: String,
    pub query: QueryString,
}

impl CompiledQuery {
    /// The percent-encoded `path?query` form (bare path when there are no
    /// parameters).
    pub fn encode(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.encode())
        }
    }
}

impl std::fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}
