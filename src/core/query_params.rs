use std::collections::HashMap;

/// Parse query parameters from a full URI or a bare query string.
///
/// Values are percent-decoded; a key without `=` becomes a flag with an
/// empty value. Multiple values for the same key are not supported (the
/// last one wins).
pub fn parse_query_params(input: &str) -> HashMap<String, String> {
    let query = match input.find('?') {
        Some(idx) => &input[idx + 1..],
        None => input,
    };

    let mut params = HashMap::new();
    for param in query.split('&') {
        if param.is_empty() {
            continue;
        }
        if let Some(eq_idx) = param.find('=') {
            let key = &param[..eq_idx];
            let encoded_value = &param[eq_idx + 1..];
            let decoded = urlencoding::decode(encoded_value)
                .unwrap_or(std::borrow::Cow::Borrowed(encoded_value))
                .to_string();
            params.insert(key.to_string(), decoded);
        } else {
            params.insert(param.to_string(), String::new());
        }
    }

    params
}

/// Get a 1-based positive integer parameter, falling back on the default
/// for missing or malformed values. Used for pagination.
pub fn get_usize(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_uri_and_bare_query() {
        let from_uri = parse_query_params("/properties?guests=4&radius=Anywhere");
        assert_eq!(from_uri.get("guests").map(String::as_str), Some("4"));

        let from_query = parse_query_params("guests=4&radius=Anywhere");
        assert_eq!(from_query, from_uri);
    }

    #[test]
    fn decodes_values() {
        let params = parse_query_params("radius=Within%2050%20miles");
        assert_eq!(
            params.get("radius").map(String::as_str),
            Some("Within 50 miles")
        );
    }

    #[test]
    fn flag_without_value_is_kept_empty() {
        let params = parse_query_params("draft&page=2");
        assert_eq!(params.get("draft").map(String::as_str), Some(""));
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn get_usize_defaults_and_floors_at_one() {
        let params = parse_query_params("page=0&junk=x");
        assert_eq!(get_usize(&params, "page", 1), 1);
        assert_eq!(get_usize(&params, "missing", 3), 3);
        assert_eq!(get_usize(&params, "junk", 7), 7);
    }
}
