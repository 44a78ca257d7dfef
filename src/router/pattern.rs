//! Route patterns and path-parameter extraction.
//!
//! A pattern is a `/`-separated path whose segments are either literals or
//! whole-segment placeholders written `{name}`:
//!
//! ```
//! use cgiroute_rs::RoutePattern;
//!
//! let pattern: RoutePattern = "/greeting/{type}".parse().unwrap();
//! let params = pattern.matches("/greeting/hello").unwrap();
//! assert_eq!(params["type"], "hello");
//! assert!(pattern.matches("/greeting/hello/again").is_none());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::router::error::Error;

/// Values bound to placeholder names for one request.
pub type PathParams = HashMap<String, String>;

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly (case-sensitive).
    Literal(String),
    /// Matches any request segment and binds it to the name.
    Param(String),
}

/// The placeholder name of `segment`, if it is written `{name}`.
fn placeholder(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a route pattern.
    ///
    /// Placeholder names must be non-empty and unique, and a placeholder
    /// must span its whole segment.
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }

        let mut segments = Vec::new();
        for segment in pattern.split('/') {
            match placeholder(segment) {
                Some("") => return Err(invalid("placeholder name is empty")),
                Some(name) if name.contains(['{', '}']) => {
                    return Err(invalid("placeholder name contains a brace"));
                }
                Some(name) => {
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(Error::DuplicateParameter {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None if segment.contains(['{', '}']) => {
                    return Err(invalid("placeholders must span a whole segment"));
                }
                None => segments.push(Segment::Literal(segment.to_string())),
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as it was registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of literal segments; routes with more literals are more specific.
    pub fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Placeholder names in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `path` against this pattern, returning the bound parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let actual: Vec<&str> = path.split('/').collect();
        if actual.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, value) in self.segments.iter().zip(actual) {
            match segment {
                Segment::Literal(literal) if literal != value => return None,
                Segment::Literal(_) => {}
                Segment::Param(name) => {
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        Some(params)
    }
}

impl FromStr for RoutePattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutePattern::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Match a raw pattern string against `path` without validating the pattern.
///
/// Returns `(false, empty)` when the segment counts differ or a literal
/// segment differs.
pub fn match_path(pattern: &str, path: &str) -> (bool, PathParams) {
    let expected: Vec<&str> = pattern.split('/').collect();
    let actual: Vec<&str> = path.split('/').collect();
    if expected.len() != actual.len() {
        return (false, PathParams::new());
    }

    let mut params = PathParams::new();
    for (segment, value) in expected.into_iter().zip(actual) {
        match placeholder(segment) {
            Some(name) if !name.is_empty() => {
                params.insert(name.to_string(), value.to_string());
            }
            _ if segment == value => {}
            _ => return (false, PathParams::new()),
        }
    }
    (true, params)
}
