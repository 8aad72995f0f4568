//! Viewport-width media queries.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::block;

/// Rejected breakpoint input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("breakpoint must be a length such as 768px, 48em or 40rem, got {0:?}")]
pub struct BreakpointError(pub String);

static LENGTH_RE: OnceLock<Regex> = OnceLock::new();

fn length_regex() -> &'static Regex {
    LENGTH_RE.get_or_init(|| {
        Regex::new(r"^\d+(\.\d+)?(px|em|rem)$")
            .unwrap_or_else(|error| panic!("breakpoint regex failed to compile: {error}"))
    })
}

/// A CSS length usable in a width media query.
///
/// ```
/// use feedback_board::style::{Breakpoint, at_breakpoint};
///
/// let tablet: Breakpoint = "768px".parse().unwrap();
/// assert!(at_breakpoint(&tablet, "gap: 2rem;").starts_with("@media (min-width: 768px)"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint(String);

impl Breakpoint {
    pub fn new(value: impl Into<String>) -> Result<Self, BreakpointError> {
        let value = value.into();
        if length_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(BreakpointError(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Breakpoint {
    type Err = BreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Apply `css` from `bp` upwards.
pub fn at_breakpoint(bp: &Breakpoint, css: &str) -> String {
    block(&format!("@media (min-width: {bp})"), css)
}

/// Apply `css` below `bp`; the ranges of the two helpers never overlap.
pub fn until_breakpoint(bp: &Breakpoint, css: &str) -> String {
    block(&format!("@media (max-width: calc({bp} - 1px))"), css)
}
