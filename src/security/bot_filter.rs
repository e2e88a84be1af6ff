//! User-agent blocklist.

use crate::http::response::Rejection;
use crate::security::context::RequestContext;
use crate::security::pipeline::{RequestFilter, Verdict};

/// Rejects any request whose user agent contains a blocklisted token.
#[derive(Debug, Clone)]
pub struct BotFilter {
    tokens: Vec<String>,
}

impl BotFilter {
    /// Tokens are lowercased once here; the context already carries a lowercased agent.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// First blocklisted token found in `user_agent`, if any.
    pub fn matched_token(&self, user_agent: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| user_agent.contains(token.as_str()))
            .map(String::as_str)
    }
}

impl RequestFilter for BotFilter {
    fn name(&self) -> &'static str {
        "bot_filter"
    }

    fn check(&self, ctx: &RequestContext) -> Verdict {
        match self.matched_token(&ctx.user_agent) {
            Some(token) => Verdict::Reject(Rejection::BotDetected {
                token: token.to_string(),
            }),
            None => Verdict::Pass,
        }
    }
}
