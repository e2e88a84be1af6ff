//! Terminal responses produced by the gate.
//!
//! # Responsibilities
//! - Map filter rejections to `403 Forbidden` plain-text responses
//! - Map loader decisions to their status code and JSON payload
//!
//! # Design Decisions
//! - Rejections are values, not errors: they end one request and nothing else
//! - A blocked timezone is a soft deny (200 with `allowed: false`)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why a filter halted the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The user agent contained a blocklisted token.
    #[error("Bots are not allowed")]
    BotDetected { token: String },

    /// No access rule permitted the request.
    #[error("Access Restricted")]
    AccessDenied,
}

impl Rejection {
    /// Metric and log label.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::BotDetected { .. } => "bot_detected",
            Rejection::AccessDenied => "access_denied",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, self.to_string()).into_response()
    }
}

/// Outcome of the frontend loader check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderDecision {
    Allowed,
    InvalidOrigin,
    TimezoneBlocked,
}

/// JSON body returned by the loader endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoaderPayload {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl LoaderDecision {
    pub fn status(self) -> StatusCode {
        match self {
            LoaderDecision::InvalidOrigin => StatusCode::FORBIDDEN,
            LoaderDecision::Allowed | LoaderDecision::TimezoneBlocked => StatusCode::OK,
        }
    }

    pub fn payload(self) -> LoaderPayload {
        let error = match self {
            LoaderDecision::Allowed => None,
            LoaderDecision::InvalidOrigin => Some("Invalid origin"),
            LoaderDecision::TimezoneBlocked => Some("Timezone blocked"),
        };
        LoaderPayload {
            allowed: error.is_none(),
            error,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoaderDecision::Allowed => "allowed",
            LoaderDecision::InvalidOrigin => "invalid_origin",
            LoaderDecision::TimezoneBlocked => "timezone_blocked",
        }
    }
}

impl IntoResponse for LoaderDecision {
    fn into_response(self) -> Response {
        (self.status(), Json(self.payload())).into_response()
    }
}
