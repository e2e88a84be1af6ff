//! Static site server with a user-agent blocklist and a referer gate.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ request id → trace → timeout → CORS
//!                                                      │
//!                                                      ▼
//!                                  ┌───────────────────────────────────┐
//!                                  │ security::pipeline                │
//!                                  │   bot_filter  ──reject──▶ 403     │
//!                                  │   access_gate ──reject──▶ 403     │
//!                                  └─────────────────┬─────────────────┘
//!                                                    ▼
//!                         ┌──────────────────────────┼───────────────────────┐
//!                         ▼                          ▼                       ▼
//!                 /frontend-loader            static file under        index document
//!                 (origin + timezone)         the site root            (any other path)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
