//! Access rule matching logic.
//!
//! # Responsibilities
//! - Match request path prefixes (asset directories, loader endpoint)
//! - Match an explicit query-string bypass flag
//! - Match the referer against the site origin
//!
//! # Design Decisions
//! - Path and referer matching are plain, case-sensitive `starts_with`
//! - A repeated bypass parameter never matches
//! - No regex to guarantee O(n) matching

use crate::security::context::RequestContext;

/// A condition that, when met, lets a request through the access gate.
pub trait AccessRule: Send + Sync + std::fmt::Debug {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Returns true if the request is permitted by this rule.
    fn permits(&self, ctx: &RequestContext) -> bool;
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixRule {
    label: &'static str,
    prefix: String,
}

impl PathPrefixRule {
    /// Create a new path prefix rule.
    pub fn new(label: &'static str, prefix: impl Into<String>) -> Self {
        Self {
            label,
            prefix: prefix.into(),
        }
    }
}

impl AccessRule for PathPrefixRule {
    fn name(&self) -> &'static str {
        self.label
    }

    fn permits(&self, ctx: &RequestContext) -> bool {
        ctx.path.starts_with(&self.prefix)
    }
}

/// Matches `?<param>=<value>` when the parameter occurs exactly once.
#[derive(Debug, Clone)]
pub struct QueryFlagRule {
    param: String,
    value: String,
}

impl QueryFlagRule {
    pub fn new(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            value: value.into(),
        }
    }
}

impl AccessRule for QueryFlagRule {
    fn name(&self) -> &'static str {
        "query_bypass"
    }

    fn permits(&self, ctx: &RequestContext) -> bool {
        matches!(ctx.query_values(&self.param).as_slice(), [only] if *only == self.value)
    }
}

/// Matches a `Referer` that starts with the site origin.
#[derive(Debug, Clone)]
pub struct RefererPrefixRule {
    origin: String,
}

impl RefererPrefixRule {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

impl AccessRule for RefererPrefixRule {
    fn name(&self) -> &'static str {
        "referer"
    }

    fn permits(&self, ctx: &RequestContext) -> bool {
        ctx.referer.starts_with(&self.origin)
    }
}
