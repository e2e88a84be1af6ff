//! Access gate.
//! Allows asset paths, the loader endpoint, an explicit bypass flag, or
//! same-site referers. Everything else is rejected.

use crate::config::{AccessConfig, LoaderConfig, SiteConfig};
use crate::http::response::Rejection;
use crate::security::context::RequestContext;
use crate::security::pipeline::{RequestFilter, Verdict};
use crate::security::rules::{AccessRule, PathPrefixRule, QueryFlagRule, RefererPrefixRule};

/// Ordered list of rules; the first rule that permits the request wins.
#[derive(Debug)]
pub struct AccessGate {
    rules: Vec<Box<dyn AccessRule>>,
}

impl AccessGate {
    pub fn new(rules: Vec<Box<dyn AccessRule>>) -> Self {
        Self { rules }
    }

    /// Asset prefixes, then the loader path, then the bypass flag, then the referer.
    pub fn from_config(access: &AccessConfig, site: &SiteConfig, loader: &LoaderConfig) -> Self {
        let mut rules: Vec<Box<dyn AccessRule>> = Vec::new();

        for prefix in &access.exempt_prefixes {
            rules.push(Box::new(PathPrefixRule::new("asset_prefix", prefix.clone())));
        }
        rules.push(Box::new(PathPrefixRule::new("loader_path", loader.path.clone())));
        rules.push(Box::new(QueryFlagRule::new(
            access.bypass_param.clone(),
            access.bypass_value.clone(),
        )));
        rules.push(Box::new(RefererPrefixRule::new(site.allowed_origin.clone())));

        Self::new(rules)
    }

    /// Name of the first rule permitting the request.
    pub fn permitting_rule(&self, ctx: &RequestContext) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.permits(ctx))
            .map(|rule| rule.name())
    }
}

impl RequestFilter for AccessGate {
    fn name(&self) -> &'static str {
        "access_gate"
    }

    fn check(&self, ctx: &RequestContext) -> Verdict {
        match self.permitting_rule(ctx) {
            Some(rule) => {
                tracing::debug!(path = %ctx.path, rule, "Access permitted");
                Verdict::Pass
            }
            None => Verdict::Reject(Rejection::AccessDenied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;

    fn gate() -> AccessGate {
        let config = GateConfig::default();
        AccessGate::from_config(&config.access, &config.site, &config.loader)
    }

    fn request(path: &str, query: Option<&str>, referer: &str) -> RequestContext {
        RequestContext {
            path: path.into(),
            query: query.map(Into::into),
            referer: referer.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_assets_allowed_without_referer() {
        let gate = gate();
        for path in ["/css/site.css", "/js/app.js", "/images/logo.png"] {
            assert_eq!(gate.check(&request(path, None, "")), Verdict::Pass);
        }
        assert_eq!(
            gate.permitting_rule(&request("/images/a.png", None, "")),
            Some("asset_prefix")
        );
    }

    #[test]
    fn test_loader_path_allowed() {
        let gate = gate();
        assert_eq!(
            gate.permitting_rule(&request("/frontend-loader", None, "")),
            Some("loader_path")
        );
        assert_eq!(
            gate.permitting_rule(&request("/frontend-loader/extra", None, "")),
            Some("loader_path")
        );
    }

    #[test]
    fn test_bypass_flag_allowed() {
        let gate = gate();
        assert_eq!(
            gate.permitting_rule(&request("/checkout", Some("loader=true"), "")),
            Some("query_bypass")
        );
        assert_eq!(
            gate.check(&request("/checkout", Some("loader=yes"), "")),
            Verdict::Reject(Rejection::AccessDenied)
        );
    }

    #[test]
    fn test_referer_gate() {
        let gate = gate();
        assert_eq!(
            gate.permitting_rule(&request("/", None, "https://joiedamour.shop/")),
            Some("referer")
        );
        assert_eq!(
            gate.check(&request("/", None, "")),
            Verdict::Reject(Rejection::AccessDenied)
        );
        assert_eq!(
            gate.check(&request("/", None, "https://google.com/")),
            Verdict::Reject(Rejection::AccessDenied)
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let gate = gate();
        let ctx = request("/css/a.css", Some("loader=true"), "https://joiedamour.shop/");
        assert_eq!(gate.permitting_rule(&ctx), Some("asset_prefix"));
    }
}
