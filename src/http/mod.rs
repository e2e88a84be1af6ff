//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → security::pipeline (bot filter, access gate)
//!     → loader.rs (origin + timezone check) | static file | index fallback
//!     → response.rs (rejections, loader payloads)
//!     → Send to client
//! ```

pub mod loader;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::{LoaderDecision, Rejection};
pub use server::HttpServer;
