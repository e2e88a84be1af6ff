//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Filters and handlers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID attached to rejection logs
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
