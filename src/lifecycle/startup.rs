//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Apply environment and command-line overrides in that order
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Overrides are validated together with the file

use std::path::Path;

use crate::config::{load_config, validate_config, ConfigError, GateConfig};

/// Build the effective configuration: file (or defaults), then `PORT`, then `--port`.
pub fn prepare_config(path: Option<&Path>, port: Option<u16>) -> Result<GateConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration file");
            load_config(path)?
        }
        None => GateConfig::default(),
    };

    config.apply_env();
    if let Some(port) = port {
        config.listener.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
