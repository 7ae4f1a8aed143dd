//! Path matching logic.
//!
//! # Responsibilities
//! - Strip query and fragment from the navigation target
//! - Walk pattern and target segments position by position
//! - Extract and percent-decode named parameters
//!
//! # Design Decisions
//! - `*` matches everything, before any other check
//! - Raw pattern equal to the stripped target short-circuits with no params
//! - A required parameter with an empty value counts as absent and fails
//! - Greedy parameters end the walk as soon as they are assigned
//! - A segment that does not percent-decode to UTF-8 fails the match

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::navigation::location::strip_query_and_fragment;
use crate::routing::pattern::{split_segments, PathPattern, Segment};

/// Parameters extracted by a successful match, in pattern order.
///
/// Serialized as a map; deserialization keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value. Overwrites keep the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct ParamsVisitor;

impl<'de> Visitor<'de> for ParamsVisitor {
    type Value = Params;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Params, A::Error> {
        let mut params = Params::new();
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            params.insert(name, value);
        }
        Ok(params)
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ParamsVisitor)
    }
}

fn decode(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|value| value.into_owned())
}

impl PathPattern {
    /// Match this pattern against a navigation target.
    ///
    /// Returns `None` for no match, or the extracted parameters.
    pub fn matches(&self, target: &str) -> Option<Params> {
        if self.is_wildcard() {
            return Some(Params::new());
        }

        let path = strip_query_and_fragment(target);
        if self.as_str() == path {
            return Some(Params::new());
        }

        let pattern = self.segments();
        let target = split_segments(path);
        let mut params = Params::new();

        for i in 0..pattern.len().max(target.len()) {
            match pattern.get(i) {
                Some(Segment::Param(param)) => {
                    let value = target.get(i).copied().unwrap_or("");
                    if value.is_empty() && param.modifiers.rejects_empty() {
                        return None;
                    }
                    if param.modifiers.is_greedy() {
                        let rest = target
                            .get(i..)
                            .unwrap_or_default()
                            .iter()
                            .map(|segment| decode(segment))
                            .collect::<Option<Vec<_>>>()?;
                        params.insert(param.name.as_str(), rest.join("/"));
                        break;
                    }
                    params.insert(param.name.as_str(), decode(value)?);
                }
                Some(Segment::Literal(literal)) => {
                    if target.get(i) != Some(&literal.as_str()) {
                        return None;
                    }
                }
                None => return None,
            }
        }

        Some(params)
    }
}

/// Compile `pattern` and match it against `target` in one step.
pub fn match_path(pattern: &str, target: &str) -> Option<Params> {
    PathPattern::parse(pattern).matches(target)
}
