//! Full-text search helpers for product names.
//!
//! Names are indexed as `to_tsvector('simple', name)` in the generated
//! `products.search_vector` column. The `simple` configuration lowercases
//! tokens without stemming or stop words, so search behaves the same for
//! any language.

/// PostgreSQL text search configuration used for both vector and query.
pub const TEXT_SEARCH_CONFIG: &str = "simple";

/// Split user input into tokens safe to embed in a `tsquery`.
///
/// Any character that is not alphanumeric acts as a separator, so
/// punctuation such as `-`, `'`, `&`, `:` or `!` can never reach the
/// tsquery parser. `_` splits too: the PostgreSQL parser drops it, and a
/// token made only of underscores would leave the query without lexemes.
fn tokenize(query: &str) -> Vec<&str> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Convert user input into a `to_tsquery` expression where every token must match.
///
/// Returns `None` when the input has no usable tokens.
///
/// # Examples
///
/// ```
/// use catalog_core::search::build_tsquery;
/// assert_eq!(build_tsquery("iPhone 15"), Some("iPhone & 15".to_string()));
/// assert_eq!(build_tsquery("usb-c, cable!"), Some("usb & c & cable".to_string()));
/// assert_eq!(build_tsquery(" ?! "), None);
/// ```
pub fn build_tsquery(query: &str) -> Option<String> {
    let terms = tokenize(query);
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" & "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_term() {
        assert_eq!(build_tsquery("iPhone"), Some("iPhone".to_string()));
    }

    #[test]
    fn multiple_terms_joined_with_and() {
        assert_eq!(
            build_tsquery("samsung  galaxy"),
            Some("samsung & galaxy".to_string())
        );
    }

    #[test]
    fn punctuation_splits_terms() {
        assert_eq!(
            build_tsquery("o'neill's (desk)"),
            Some("o & neill & s & desk".to_string())
        );
    }

    #[test]
    fn tsquery_operators_are_stripped() {
        assert_eq!(build_tsquery("a|b & !c:*"), Some("a & b & c".to_string()));
    }

    #[test]
    fn unicode_is_kept_and_underscores_split() {
        assert_eq!(
            build_tsquery("caffè_latte"),
            Some("caffè & latte".to_string())
        );
    }

    #[test]
    fn underscore_only_returns_none() {
        assert_eq!(build_tsquery("___"), None);
        assert_eq!(build_tsquery(" _ -_ "), None);
    }

    #[test]
    fn empty_or_punctuation_only_returns_none() {
        assert_eq!(build_tsquery(""), None);
        assert_eq!(build_tsquery("   "), None);
        assert_eq!(build_tsquery("--!!"), None);
    }
}
