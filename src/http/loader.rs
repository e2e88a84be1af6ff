//! Frontend loader endpoint.
//!
//! Client-side code calls this before rendering to learn whether the visitor
//! may see the site. The answer is data; the endpoint never blocks anything.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName},
    response::{IntoResponse, Response},
};

use crate::config::{LoaderConfig, SiteConfig};
use crate::http::response::LoaderDecision;
use crate::observability::metrics;
use crate::security::context::header_str;
use crate::security::pipeline::timezone_header;

/// Origin and timezone allowlists for the loader endpoint.
#[derive(Debug, Clone)]
pub struct LoaderPolicy {
    allowed_origin: String,
    timezone_header: HeaderName,
    allowed_timezones: Vec<String>,
}

impl LoaderPolicy {
    pub fn from_config(site: &SiteConfig, loader: &LoaderConfig) -> Self {
        Self {
            allowed_origin: site.allowed_origin.clone(),
            timezone_header: timezone_header(&loader.timezone_header),
            allowed_timezones: loader.allowed_timezones.clone(),
        }
    }

    /// Origin must equal the site origin exactly; the timezone must be listed verbatim.
    pub fn decide(&self, origin: &str, timezone: &str) -> LoaderDecision {
        if origin != self.allowed_origin {
            return LoaderDecision::InvalidOrigin;
        }
        if !self.allowed_timezones.iter().any(|tz| tz == timezone) {
            return LoaderDecision::TimezoneBlocked;
        }
        LoaderDecision::Allowed
    }
}

/// `GET` handler for the loader path.
pub async fn frontend_loader(
    State(policy): State<Arc<LoaderPolicy>>,
    headers: HeaderMap,
) -> Response {
    let origin = header_str(&headers, &header::ORIGIN);
    let timezone = header_str(&headers, &policy.timezone_header);

    let decision = policy.decide(&origin, &timezone);
    tracing::info!(
        origin = %origin,
        timezone = %timezone,
        decision = decision.label(),
        "Loader check"
    );
    metrics::record_loader_decision(decision.label());

    decision.into_response()
}
