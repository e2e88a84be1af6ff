//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Site identity and static asset locations.
    pub site: SiteConfig,

    /// User-agent blocklist.
    pub bot: BotConfig,

    /// Access gate exemptions.
    pub access: AccessConfig,

    /// Frontend loader endpoint settings.
    pub loader: LoaderConfig,

    /// Cross-origin resource sharing.
    pub cors: CorsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GateConfig {
    /// Apply environment overrides.
    ///
    /// `PORT` replaces `listener.port` when it parses as a port number.
    pub fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var("PORT") {
            self.apply_port_override(&raw);
        }
    }

    pub(crate) fn apply_port_override(&mut self, raw: &str) {
        match raw.trim().parse::<u16>() {
            Ok(port) => self.listener.port = port,
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Ignoring unparsable PORT");
            }
        }
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by the `PORT` environment variable.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Site identity and the directory served to clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical site origin (scheme + host, no trailing slash).
    pub allowed_origin: String,

    /// Directory holding the static site.
    pub static_root: String,

    /// Entry document sent for every unmatched path.
    pub index_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "https://joiedamour.shop".to_string(),
            static_root: "public".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

/// User-agent blocklist.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    /// Substring tokens matched case-insensitively against `User-Agent`.
    pub blocked_agents: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        let tokens = [
            "bot",
            "crawl",
            "spider",
            "slurp",
            "bing",
            "ahrefs",
            "semrush",
            "facebookexternalhit",
            "python-requests",
            "curl",
            "wget",
            "java",
            "headless",
        ];
        Self {
            blocked_agents: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Paths and query flags that skip the referer check.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Path prefixes that are always allowed (asset directories).
    pub exempt_prefixes: Vec<String>,

    /// Query parameter that requests a loader bypass.
    pub bypass_param: String,

    /// Exact value the bypass parameter must carry.
    pub bypass_value: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            exempt_prefixes: vec!["/css".to_string(), "/js".to_string(), "/images".to_string()],
            bypass_param: "loader".to_string(),
            bypass_value: "true".to_string(),
        }
    }
}

/// Frontend loader endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Route of the loader endpoint.
    pub path: String,

    /// Header carrying the client-reported IANA timezone.
    pub timezone_header: String,

    /// Timezones that receive `{"allowed": true}`.
    // Kolkata/Calcutta are Indian zones, although the loader was described as
    // Japan-only. The literal values are kept until that intent is settled.
    pub allowed_timezones: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            path: "/frontend-loader".to_string(),
            timezone_header: "x-client-timezone".to_string(),
            allowed_timezones: vec!["Asia/Kolkata".to_string(), "Asia/Calcutta".to_string()],
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Mount a permissive CORS layer in front of the filters.
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let config = GateConfig::default();
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.site.allowed_origin, "https://joiedamour.shop");
        assert_eq!(config.bot.blocked_agents.len(), 13);
        assert_eq!(config.bot.blocked_agents[0], "bot");
        assert_eq!(config.loader.path, "/frontend-loader");
        assert!(config.cors.enabled);
    }

    #[test]
    fn test_port_override() {
        let mut config = GateConfig::default();
        config.apply_port_override("8088");
        assert_eq!(config.listener.port, 8088);

        config.apply_port_override("not-a-port");
        assert_eq!(config.listener.port, 8088);

        config.apply_port_override("70000");
        assert_eq!(config.listener.port, 8088);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GateConfig = toml::from_str(
            r#"
            [site]
            allowed_origin = "https://example.test"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.allowed_origin, "https://example.test");
        assert_eq!(config.site.static_root, "public");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.access.exempt_prefixes, vec!["/css", "/js", "/images"]);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }
}
