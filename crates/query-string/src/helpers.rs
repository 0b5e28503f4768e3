//! Helpers for assembling request paths.

/// Join a base path and a resource name, collapsing repeated `/`. A leading
/// `scheme://` prefix is left untouched so absolute base URLs survive.
pub fn normalize_path(base_path: &str, resource: &str) -> String {
    let joined = format!("{base_path}/{resource}");
    let (scheme, rest) = match joined.find("://") {
        Some(index) => joined.split_at(index + 3),
        None => ("", joined.as_str()),
    };

    let mut normalized = String::with_capacity(joined.len());
    normalized.push_str(scheme);
    let mut previous_was_slash = false;
    for c in rest.chars() {
        if c == '/' {
            if previous_was_slash {
                continue;
            }
            previous_was_slash = true;
        } else {
            previous_was_slash = false;
        }
        normalized.push(c);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn collapses_repeated_slashes() {
        assert_eq!(normalize_path("/api/", "films"), "/api/films");
        assert_eq!(normalize_path("", "films"), "/films");
    }

    #[test]
    fn preserves_scheme() {
        assert_eq!(
            normalize_path("https://example.com/rest//v1", "films"),
            "https://example.com/rest/v1/films"
        );
    }
}
