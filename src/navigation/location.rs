//! Navigable locations.
//!
//! A location is kept as the exact string the host reported; it is only split
//! into parts when something needs the path, query, or fragment.

use std::fmt;

use serde::Serialize;

/// Path portion of `url`: everything before the first `?` or `#`.
pub fn strip_query_and_fragment(url: &str) -> &str {
    url.find(&['?', '#'][..]).map_or(url, |end| &url[..end])
}

/// A location split into path, query, and fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    /// Text after `?`, without the `?`.
    pub query: Option<String>,
    /// Text after `#`, without the `#`.
    pub fragment: Option<String>,
}

impl Location {
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (url, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        Self {
            path: path.to_string(),
            query,
            fragment,
        }
    }

    /// Decoded `key=value` pairs of the query string, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// `class_name` when `url` is exactly the current location, else `""`.
pub fn active<'a>(current: &str, url: &str, class_name: &'a str) -> &'a str {
    if url == current {
        class_name
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip() {
        assert_eq!(strip_query_and_fragment("/a?b=1#c"), "/a");
        assert_eq!(strip_query_and_fragment("/a#c?b"), "/a");
        assert_eq!(strip_query_and_fragment("/a?b?c"), "/a");
        assert_eq!(strip_query_and_fragment("/a"), "/a");
        assert_eq!(strip_query_and_fragment(""), "");
    }

    #[test]
    fn test_parse_parts() {
        let location = Location::parse("/search?q=rust%20lang&page=2#results");
        assert_eq!(location.path, "/search");
        assert_eq!(location.query.as_deref(), Some("q=rust%20lang&page=2"));
        assert_eq!(location.fragment.as_deref(), Some("results"));
        assert_eq!(
            location.query_pairs(),
            vec![("q".to_string(), "rust lang".to_string()), ("page".to_string(), "2".to_string())]
        );
        assert_eq!(location.to_string(), "/search?q=rust%20lang&page=2#results");
    }

    #[test]
    fn test_question_mark_inside_fragment() {
        let location = Location::parse("/a#frag?x");
        assert_eq!(location.path, "/a");
        assert_eq!(location.query, None);
        assert_eq!(location.fragment.as_deref(), Some("frag?x"));
        assert!(location.query_pairs().is_empty());
    }

    #[test]
    fn test_active() {
        assert_eq!(active("/a?x=1", "/a?x=1", "active"), "active");
        assert_eq!(active("/a?x=1", "/a", "active"), "");
        assert_eq!(active("/b", "/b", "selected"), "selected");
    }
}
