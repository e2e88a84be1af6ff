//! Request filtering subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → context.rs (derive user agent, path, query, referer, origin, timezone)
//!     → bot_filter.rs (user-agent blocklist)        → 403 "Bots are not allowed"
//!     → access_control.rs (rules.rs, first match)  → 403 "Access Restricted"
//!     → Pass to route dispatch
//! ```
//!
//! # Design Decisions
//! - Fixed order: bot filter, then access gate, then routing
//! - Filters are pure functions of the context; no state between requests
//! - Header data is client-supplied and spoofable: this is filtering, not authorization

pub mod access_control;
pub mod bot_filter;
pub mod context;
pub mod pipeline;
pub mod rules;

pub use access_control::AccessGate;
pub use bot_filter::BotFilter;
pub use context::RequestContext;
pub use pipeline::{gate_middleware, FilterPipeline, RequestFilter, Verdict};
