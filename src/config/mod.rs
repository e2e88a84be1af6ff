//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig::apply_env (PORT override)
//!     → GateConfig (validated, immutable)
//!     → handed to each filter and handler at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AccessConfig, BotConfig, CorsConfig, GateConfig, ListenerConfig, LoaderConfig, LogFormat,
    ObservabilityConfig, SiteConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
