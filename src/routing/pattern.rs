//! Path pattern parsing.
//!
//! # Responsibilities
//! - Split a route `path` into literal and parameter segments
//! - Decode parameter modifiers (`?`, `+`, `*`)
//! - Recognize the whole-route wildcard `*`
//!
//! # Design Decisions
//! - Leading and trailing slashes are insignificant (`/a/b/` == `a/b`)
//! - Interior empty segments are kept (`a//b` has three segments)
//! - Only a pattern that is exactly `*` is a wildcard; a `*` segment inside a
//!   longer pattern is an ordinary literal

use std::fmt;

/// Modifier characters allowed after a parameter name.
const MODIFIER_CHARS: [char; 3] = ['?', '+', '*'];

/// Split a path into segments after trimming surrounding slashes.
///
/// The empty path yields a single empty segment, so `/` and `` compare equal.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.trim_start_matches('/')
        .trim_end_matches('/')
        .split('/')
        .collect()
}

/// Modifiers attached to a named parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// `?`: the segment may be missing.
    pub optional: bool,
    /// `+`: consumes the rest of the path, at least one segment.
    pub one_or_more: bool,
    /// `*`: consumes the rest of the path, possibly nothing.
    pub zero_or_more: bool,
}

impl Modifiers {
    fn parse(flags: &str) -> Self {
        Self {
            optional: flags.contains('?'),
            one_or_more: flags.contains('+'),
            zero_or_more: flags.contains('*'),
        }
    }

    /// Whether the parameter swallows every remaining segment.
    pub fn is_greedy(&self) -> bool {
        self.one_or_more || self.zero_or_more
    }

    /// Whether an empty or missing value fails the match.
    ///
    /// `+` wins over `?` when both are present; `*` always accepts emptiness.
    pub fn rejects_empty(&self) -> bool {
        !self.zero_or_more && (!self.optional || self.one_or_more)
    }
}

/// A `:name` segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSegment {
    pub name: String,
    pub modifiers: Modifiers,
}

/// One `/`-delimited component of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(ParamSegment),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(rest) => {
                let name = rest.trim_end_matches(&MODIFIER_CHARS[..]);
                let flags = &rest[name.len()..];
                Segment::Param(ParamSegment {
                    name: name.to_string(),
                    modifiers: Modifiers::parse(flags),
                })
            }
            None => Segment::Literal(raw.to_string()),
        }
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    wildcard: bool,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string. Parsing is total: any string is a pattern.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let wildcard = raw == "*";
        let segments = if wildcard {
            Vec::new()
        } else {
            split_segments(&raw).into_iter().map(Segment::parse).collect()
        };
        Self {
            raw,
            wildcard,
            segments,
        }
    }

    /// The pattern exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Position of the first greedy parameter that is followed by more segments.
    ///
    /// Such segments can never be reached by the matcher.
    pub fn misplaced_greedy(&self) -> Option<usize> {
        let last = self.segments.len().checked_sub(1)?;
        self.segments.iter().position(|segment| {
            matches!(segment, Segment::Param(p) if p.modifiers.is_greedy())
        }).filter(|&index| index < last)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_slashes() {
        assert_eq!(split_segments("/a/b/"), vec!["a", "b"]);
        assert_eq!(split_segments("a/b"), vec!["a", "b"]);
        assert_eq!(split_segments("//a//b//"), vec!["a", "", "b"]);
        assert_eq!(split_segments("/"), vec![""]);
        assert_eq!(split_segments(""), vec![""]);
    }

    #[test]
    fn test_param_modifiers() {
        let pattern = PathPattern::parse("/files/:id?/:rest+");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("files".into()),
                Segment::Param(ParamSegment {
                    name: "id".into(),
                    modifiers: Modifiers { optional: true, ..Default::default() },
                }),
                Segment::Param(ParamSegment {
                    name: "rest".into(),
                    modifiers: Modifiers { one_or_more: true, ..Default::default() },
                }),
            ]
        );
    }

    #[test]
    fn test_stacked_modifiers_are_stripped_from_name() {
        let pattern = PathPattern::parse(":path*?");
        match &pattern.segments()[0] {
            Segment::Param(p) => {
                assert_eq!(p.name, "path");
                assert!(p.modifiers.zero_or_more);
                assert!(p.modifiers.optional);
            }
            other => panic!("expected param, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Modifiers::default().rejects_empty());
        assert!(!Modifiers { optional: true, ..Default::default() }.rejects_empty());
        assert!(Modifiers { one_or_more: true, optional: true, ..Default::default() }.rejects_empty());
        assert!(!Modifiers { zero_or_more: true, ..Default::default() }.rejects_empty());
    }

    #[test]
    fn test_wildcard_only_as_whole_pattern() {
        assert!(PathPattern::parse("*").is_wildcard());
        let nested = PathPattern::parse("/a/*");
        assert!(!nested.is_wildcard());
        assert_eq!(nested.segments()[1], Segment::Literal("*".into()));
    }

    #[test]
    fn test_misplaced_greedy() {
        assert_eq!(PathPattern::parse("/a/:rest+").misplaced_greedy(), None);
        assert_eq!(PathPattern::parse("/:rest*/edit").misplaced_greedy(), Some(0));
        assert_eq!(PathPattern::parse("*").misplaced_greedy(), None);
    }
}
