use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Identity and API surface of the service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Mount point of every REST route
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Raises the default log level to `debug` when `RUST_LOG` is unset
    #[serde(default)]
    pub debug: bool,
    /// Acting user when a request carries no `X-User` header
    #[serde(default = "default_user")]
    pub default_user: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            api_prefix: default_api_prefix(),
            debug: false,
            default_user: default_user(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout_seconds(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// pretty | json | compact
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

/// Root of the YAML configuration file.
///
/// `service` and `server` always exist (every field has a default);
/// `logging` and `metrics` may be omitted entirely, which the validator
/// reports as defaults applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: HttpConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    pub fn metrics(&self) -> MetricsConfig {
        self.metrics.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_config() {
        let yaml = include_str!("../../../config/confman.yaml");
        let cfg: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.service.name, "Configuration Manager");
        assert_eq!(cfg.service.api_prefix, "/api");
        assert_eq!(cfg.service.default_user, "admin");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.cors_origins, vec!["http://localhost:5174"]);
        assert_eq!(cfg.logging().format, "pretty");
        assert!(!cfg.metrics().enabled);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg: AppConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.request_timeout_seconds, 30);
        assert!(cfg.logging.is_none());
        assert_eq!(cfg.metrics().port, 9090);
    }

    #[test]
    fn test_partial_section() {
        let yaml = "server:\n  port: 8100\nmetrics:\n  enabled: true\n";
        let cfg: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.server.port, 8100);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.metrics().enabled);
        assert_eq!(cfg.metrics().port, 9090);
    }
}
