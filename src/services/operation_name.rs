//! Operation name derivation for requests that omit `operationName`.
//!
//! Blacklist decisions (auth bypass, log suppression, variable redaction) all key
//! on the operation name, so every layer must derive it the same way.

use std::sync::LazyLock;

use regex::Regex;

// `{`, optional whitespace, identifier, and optionally `: identifier`
// (`{ mutation: doThing(...)` or an aliased field).
static OPERATION_AFTER_BRACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\{[\t\n\x0B\x0C\r ]*([0-9A-Za-z_]+)",
        r"(?:[\t\n\x0B\x0C\r ]*:[\t\n\x0B\x0C\r ]*([0-9A-Za-z_]+))?",
    ))
    .expect("operation name pattern is valid")
});

/// Derive the operation name from raw query text.
///
/// Returns the first identifier after the first `{` that is followed by one,
/// or the identifier after `:` when the first word is a prefix such as
/// `mutation:`. Returns an empty string when nothing matches.
pub fn extract(query: &str) -> String {
    let Some(caps) = OPERATION_AFTER_BRACE.captures(query) else {
        return String::new();
    };

    caps.get(2)
        .or_else(|| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_than_one_space_after_brace() {
        assert_eq!(extract("{  qn }"), "qn");
    }

    #[test]
    fn tabs_and_newlines_after_brace() {
        assert_eq!(extract("{\n\t  anyMethod(param: [1,2,3]) }"), "anyMethod");
        assert_eq!(extract("{\r\n\x0B\x0Cfoo}"), "foo");
    }

    #[test]
    fn no_whitespace_after_brace() {
        assert_eq!(extract("{anyMethod(param: [1])}"), "anyMethod");
    }

    #[test]
    fn prefixed_operation_returns_second_word() {
        assert_eq!(extract("{ mutation: anyMethod2(param: [1,2,3]) }"), "anyMethod2");
        assert_eq!(extract("{ mutation:anyMethod2 }"), "anyMethod2");
    }

    #[test]
    fn skips_braces_without_identifier() {
        assert_eq!(extract("{ { anyMethod(param: [1]) } }"), "anyMethod");
    }

    #[test]
    fn named_query_uses_first_selection() {
        assert_eq!(extract("query Named { user_by_id(id: 1) { name } }"), "user_by_id");
    }

    #[test]
    fn no_match_is_empty() {
        assert_eq!(extract(""), "");
        assert_eq!(extract("anyMethod"), "");
        assert_eq!(extract("{   }"), "");
    }

    #[test]
    fn is_deterministic() {
        let query = "{ \n login(user: \"a\") }";
        assert_eq!(extract(query), extract(query));
    }
}
