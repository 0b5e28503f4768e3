//! Serialize condition values: scalars, array literals, and range literals.

use crate::request::{Range, Scalar};

/// The bracket pair wrapped around an array literal. `in` lists use
/// parentheses; everything else uses braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayBrackets {
    Braces,
    Parens,
}

/// The canonical string form of a scalar.
pub fn serialize_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(value) => value.to_string(),
        Scalar::Number(number) => quote_reserved(number.to_string()),
        Scalar::String(text) => quote_reserved(text.clone()),
    }
}

/// Wrap a rendered value in double quotes when it would otherwise collide
/// with the grammar's own separators or keyword literals.
fn quote_reserved(text: String) -> String {
    let collides = text
        .chars()
        .any(|c| matches!(c, ',' | '.' | ':' | '(' | ')'))
        || matches!(text.as_str(), "null" | "true" | "false");
    if collides {
        format!("\"{text}\"")
    } else {
        text
    }
}

pub fn serialize_array(items: &[Scalar], brackets: ArrayBrackets) -> String {
    let rendered: Vec<String> = items.iter().map(serialize_scalar).collect();
    let (open, close) = match brackets {
        ArrayBrackets::Braces => ('{', '}'),
        ArrayBrackets::Parens => ('(', ')'),
    };
    format!("{open}{}{close}", rendered.join(","))
}

/// Range literal syntax is positional, so the bounds are emitted raw,
/// without quoting.
pub fn serialize_range(range: &Range) -> String {
    format!(
        "{}{},{}{}",
        if range.include_lower { '[' } else { '(' },
        range.lower,
        range.upper,
        if range.include_upper { ']' } else { ')' },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Scalar {
        Scalar::Number(text.parse().unwrap())
    }

    #[test]
    fn quotes_values_colliding_with_the_grammar() {
        assert_eq!(
            serialize_scalar(&Scalar::String("test.test".to_string())),
            "\"test.test\""
        );
        assert_eq!(
            serialize_scalar(&Scalar::String("null".to_string())),
            "\"null\""
        );
        assert_eq!(serialize_scalar(&number("3.14")), "\"3.14\"");
        assert_eq!(serialize_scalar(&number("1")), "1");
        assert_eq!(serialize_scalar(&Scalar::Null), "null");
        assert_eq!(serialize_scalar(&Scalar::Bool(true)), "true");
    }

    #[test]
    fn arrays_pick_their_brackets() {
        let items = [number("1"), number("2")];
        assert_eq!(serialize_array(&items, ArrayBrackets::Braces), "{1,2}");
        assert_eq!(serialize_array(&items, ArrayBrackets::Parens), "(1,2)");
        assert_eq!(serialize_array(&[], ArrayBrackets::Braces), "{}");
    }

    #[test]
    fn ranges_render_positionally() {
        let range = Range::new(number("1"), number("10"));
        assert_eq!(serialize_range(&range), "[1,10)");

        let exclusive_lower = Range {
            include_lower: false,
            include_upper: true,
            ..range
        };
        assert_eq!(serialize_range(&exclusive_lower), "(1,10]");
    }

    #[test]
    fn range_bounds_stay_raw() {
        let range = Range::new(
            Scalar::String("2020-01-01".to_string()),
            Scalar::String("2020.12.31".to_string()),
        );
        assert_eq!(serialize_range(&range), "[2020-01-01,2020.12.31)");
    }
}
