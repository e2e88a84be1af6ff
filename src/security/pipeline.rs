//! Ordered request filter pipeline and its axum middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::GateConfig;
use crate::http::request::RequestIdExt;
use crate::http::response::Rejection;
use crate::observability::metrics;
use crate::security::access_control::AccessGate;
use crate::security::bot_filter::BotFilter;
use crate::security::context::RequestContext;

/// Result of one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Hand the request to the next filter.
    Pass,
    /// Halt with this rejection.
    Reject(Rejection),
}

/// A pure predicate over the request context.
pub trait RequestFilter: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn check(&self, ctx: &RequestContext) -> Verdict;
}

/// Filters evaluated in order; the first rejection halts evaluation.
#[derive(Debug)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn RequestFilter>>,
    timezone_header: HeaderName,
}

impl FilterPipeline {
    pub fn new(filters: Vec<Box<dyn RequestFilter>>, timezone_header: HeaderName) -> Self {
        Self {
            filters,
            timezone_header,
        }
    }

    /// Bot filter first, then the access gate.
    ///
    /// Assumes a validated config; an invalid timezone header name falls back
    /// to `x-client-timezone`.
    pub fn from_config(config: &GateConfig) -> Self {
        let bot = BotFilter::new(&config.bot.blocked_agents);
        let gate = AccessGate::from_config(&config.access, &config.site, &config.loader);
        Self::new(
            vec![Box::new(bot), Box::new(gate)],
            timezone_header(&config.loader.timezone_header),
        )
    }

    /// Run every filter in order until one rejects.
    pub fn evaluate(&self, ctx: &RequestContext) -> Result<(), Rejection> {
        for filter in &self.filters {
            if let Verdict::Reject(rejection) = filter.check(ctx) {
                tracing::trace!(filter = filter.name(), reason = rejection.reason(), "Filter rejected");
                return Err(rejection);
            }
        }
        Ok(())
    }

    pub fn timezone_header(&self) -> &HeaderName {
        &self.timezone_header
    }
}

pub(crate) fn timezone_header(name: &str) -> HeaderName {
    HeaderName::from_bytes(name.as_bytes())
        .unwrap_or_else(|_| HeaderName::from_static("x-client-timezone"))
}

/// Middleware running the pipeline ahead of route dispatch.
pub async fn gate_middleware(
    State(pipeline): State<Arc<FilterPipeline>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let request_id = request.request_id().unwrap_or("unknown").to_string();

    let (parts, body) = request.into_parts();
    let ctx = RequestContext::from_parts(&parts, pipeline.timezone_header());

    let response = match pipeline.evaluate(&ctx) {
        Ok(()) => next.run(Request::from_parts(parts, body)).await,
        Err(rejection) => {
            tracing::warn!(
                request_id = %request_id,
                path = %ctx.path,
                reason = rejection.reason(),
                user_agent = %ctx.user_agent,
                "Request rejected"
            );
            metrics::record_rejection(rejection.reason());
            rejection.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}
