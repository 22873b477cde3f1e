//! Route matching logic.
//!
//! # Responsibilities
//! - Compare an app location path against a literal route path
//! - Apply the case-sensitivity and trailing-slash policy
//!
//! # Design Decisions
//! - Literal paths only: no params, no wildcards, no regex
//! - Case-insensitive and trailing-slash tolerant unless told otherwise
//! - Query and fragment are stripped by the router before matching

use std::fmt;

/// Trait for matching a location path against a route.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if the path selects this route.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one literal route path.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    path: String,
    sensitive: bool,
    strict: bool,
}

impl LiteralMatcher {
    pub fn new(path: impl Into<String>, sensitive: bool, strict: bool) -> Self {
        let path = path.into();
        let path = if strict { path } else { trim_slash(&path).to_string() };
        Self {
            path,
            sensitive,
            strict,
        }
    }
}

impl Matcher for LiteralMatcher {
    fn matches(&self, path: &str) -> bool {
        let candidate = if self.strict { path } else { trim_slash(path) };
        if self.sensitive {
            candidate == self.path
        } else {
            candidate.eq_ignore_ascii_case(&self.path)
        }
    }
}

/// Drop a single trailing slash, keeping the root path intact.
pub(crate) fn trim_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    }
}
