//! Path Patterns
//!
//! Parses route path patterns into segments and matches concrete paths
//! against them.
//!
//! # Supported Syntax
//!
//! ```text
//! /
//! /login
//! /plugin/:id
//! /repo/:owner/:name
//! ```
//!
//! A static segment is made of unreserved URL characters. A parameter
//! segment is `:` followed by an identifier and binds exactly one non-empty
//! path segment.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, map, recognize, value},
    multi::many1,
    sequence::{pair, preceded},
    IResult,
};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::router::error::{RouteError, RouteResult};

/// Parameter values bound during navigation, keyed by parameter name
pub type Params = BTreeMap<String, String>;

/// One `/`-separated piece of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text that must appear in the URL
    Static(String),
    /// Named parameter that binds the URL segment at this position
    Param(String),
}

/// A parsed route path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string such as `/plugin/:name`
    pub fn parse(raw: &str) -> RouteResult<Self> {
        let malformed = |reason: &str| RouteError::MalformedPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(malformed("pattern is empty"));
        }
        if !raw.starts_with('/') {
            return Err(malformed("pattern must start with '/'"));
        }
        if raw.len() > 1 && raw.ends_with('/') {
            return Err(malformed("pattern must not end with '/'"));
        }

        let segments = match parse_pattern(raw) {
            Ok((_, segments)) => segments,
            Err(e) => return Err(malformed(&format!("invalid segment syntax ({:?})", e))),
        };

        let mut seen = HashSet::new();
        for segment in &segments {
            match segment {
                Segment::Param(name) if !seen.insert(name.as_str()) => {
                    return Err(malformed(&format!("parameter ':{}' declared twice", name)));
                }
                Segment::Static(text) if text == "." || text == ".." => {
                    return Err(malformed("dot segments are not allowed"));
                }
                _ => {}
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written in the route table
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all parameter segments, in order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// True when the pattern has no parameter segments
    pub fn is_static(&self) -> bool {
        self.param_names().next().is_none()
    }

    /// Match already-split, percent-decoded path segments.
    ///
    /// Returns the bound parameters on success.
    pub fn match_segments(&self, path: &[String], case_sensitive: bool) -> Option<Params> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, actual) in self.segments.iter().zip(path) {
            match segment {
                Segment::Static(text) => {
                    if !static_eq(text, actual, case_sensitive) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if actual.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), actual.clone());
                }
            }
        }

        Some(params)
    }

    /// Render the pattern with concrete parameter values.
    ///
    /// Values are percent-encoded so that any string survives a later
    /// [`match_segments`](Self::match_segments) unchanged.
    pub fn render(&self, route: &str, params: &Params) -> RouteResult<String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Static(text) => out.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => {
                        out.push_str(&urlencoding::encode(value));
                    }
                    _ => {
                        return Err(RouteError::MissingParam {
                            route: route.to_string(),
                            param: name.clone(),
                        })
                    }
                },
            }
        }

        Ok(out)
    }

    /// True if every concrete path matched by `other` is also matched by
    /// `self`.
    pub fn covers(&self, other: &PathPattern, case_sensitive: bool) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), _) => true,
                    (Segment::Static(a), Segment::Static(b)) => static_eq(a, b, case_sensitive),
                    (Segment::Static(_), Segment::Param(_)) => false,
                })
    }

    /// True if both patterns match exactly the same concrete paths
    pub fn equivalent(&self, other: &PathPattern, case_sensitive: bool) -> bool {
        self.covers(other, case_sensitive) && other.covers(self, case_sensitive)
    }

    /// True if at least one concrete path is matched by both patterns
    pub fn intersects(&self, other: &PathPattern, case_sensitive: bool) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => static_eq(a, b, case_sensitive),
                    _ => true,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn static_eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

fn is_static_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_static(input: &str) -> IResult<&str, Segment> {
    map(take_while1(is_static_char), |s: &str| {
        Segment::Static(s.to_string())
    })(input)
}

fn parse_param(input: &str) -> IResult<&str, Segment> {
    map(
        preceded(
            char(':'),
            recognize(pair(
                take_while_m_n(1, 1, is_ident_start),
                take_while(is_ident_char),
            )),
        ),
        |s: &str| Segment::Param(s.to_string()),
    )(input)
}

fn parse_segment(input: &str) -> IResult<&str, Segment> {
    preceded(char('/'), alt((parse_param, parse_static)))(input)
}

fn parse_pattern(input: &str) -> IResult<&str, Vec<Segment>> {
    alt((
        value(Vec::new(), all_consuming(char('/'))),
        all_consuming(many1(parse_segment)),
    ))(input)
}
