use crate::*;
use thiserror::Error;
use url::Url;

const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Default user is required")]
    MissingDefaultUser,

    #[error("Invalid api_prefix '{0}': must start with '/' and must not end with '/'")]
    InvalidApiPrefix(String),

    #[error("Invalid server host '{0}': must be an IP address")]
    InvalidHost(String),

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("Invalid CORS origin '{origin}': {message}")]
    InvalidCorsOrigin { origin: String, message: String },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Metrics port {0} collides with the server port")]
    PortCollision(u16),

    #[error("Environment variable in '{field}' is missing or invalid: {value}")]
    InvalidEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

pub fn validate_config(config: &AppConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(&config.service, &mut report);
    validate_server(&config.server, &mut report);
    validate_logging(config.logging.as_ref(), &mut report);
    validate_metrics(config.metrics.as_ref(), &config.server, &mut report);

    report
}

fn check_env(field: &str, value: &str, report: &mut ValidationReport) {
    if has_unresolved_env_vars(value) {
        report.add_error(ValidationError::InvalidEnvVar {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

fn validate_service(service: &ServiceConfig, report: &mut ValidationReport) {
    if service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }
    check_env("service.name", &service.name, report);

    let prefix = &service.api_prefix;
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        report.add_error(ValidationError::InvalidApiPrefix(prefix.clone()));
    }

    if service.default_user.trim().is_empty() {
        report.add_error(ValidationError::MissingDefaultUser);
    }
    check_env("service.default_user", &service.default_user, report);

    if service.debug {
        report.add_warning("service.debug", "Debug mode is enabled; do not use in production");
    }
}

fn validate_server(server: &HttpConfig, report: &mut ValidationReport) {
    if has_unresolved_env_vars(&server.host) {
        check_env("server.host", &server.host, report);
    } else if server.host.parse::<std::net::IpAddr>().is_err() {
        report.add_error(ValidationError::InvalidHost(server.host.clone()));
    }

    if server.port == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "server.port".to_string(),
        });
    } else if server.port < 1024 {
        report.add_warning(
            "server.port",
            &format!("Port {} is privileged and requires elevated permissions", server.port),
        );
    }

    if server.request_timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "server.request_timeout_seconds".to_string(),
        });
    }

    if server.cors_origins.is_empty() {
        report.add_warning(
            "server.cors_origins",
            "No CORS origins configured; browsers on other origins will be rejected",
        );
    }

    for origin in &server.cors_origins {
        if origin == "*" {
            report.add_warning("server.cors_origins", "Wildcard CORS origin allows any site");
            continue;
        }
        if has_unresolved_env_vars(origin) {
            check_env("server.cors_origins", origin, report);
            continue;
        }
        if let Err(message) = check_origin(origin) {
            report.add_error(ValidationError::InvalidCorsOrigin {
                origin: origin.clone(),
                message,
            });
        }
    }
}

fn check_origin(origin: &str) -> std::result::Result<(), String> {
    let url = Url::parse(origin).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

fn validate_logging(logging: Option<&LoggingConfig>, report: &mut ValidationReport) {
    let Some(logging) = logging else {
        report.add_default("logging.format", &default_log_format());
        return;
    };

    if !LOG_FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }
}

fn validate_metrics(
    metrics: Option<&MetricsConfig>,
    server: &HttpConfig,
    report: &mut ValidationReport,
) {
    let Some(metrics) = metrics else {
        report.add_default("metrics.enabled", &default_metrics_enabled().to_string());
        return;
    };

    if !metrics.enabled {
        return;
    }

    if metrics.port == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "metrics.port".to_string(),
        });
    } else if metrics.port == server.port {
        report.add_error(ValidationError::PortCollision(metrics.port));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid() -> AppConfig {
        AppConfig {
            logging: Some(LoggingConfig::default()),
            metrics: Some(MetricsConfig::default()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let report = validate_config(&valid());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
        assert!(report.defaults_applied.is_empty());
    }

    #[test]
    fn test_missing_sections_report_defaults() {
        let report = validate_config(&AppConfig::default());
        assert!(report.is_valid());

        let fields: Vec<&str> = report
            .defaults_applied
            .iter()
            .map(|d| d.field.as_str())
            .collect();
        assert_eq!(fields, vec!["logging.format", "metrics.enabled"]);
    }

    #[test]
    fn test_api_prefix() {
        for prefix in ["api", "/api/", "/", ""] {
            let mut cfg = valid();
            cfg.service.api_prefix = prefix.to_string();
            let report = validate_config(&cfg);
            assert_matches!(report.errors.as_slice(), [ValidationError::InvalidApiPrefix(_)]);
        }

        let mut cfg = valid();
        cfg.service.api_prefix = "/v1/api".to_string();
        assert!(validate_config(&cfg).is_valid());
    }

    #[test]
    fn test_service_fields() {
        let mut cfg = valid();
        cfg.service.name = " ".to_string();
        cfg.service.default_user = String::new();
        cfg.service.debug = true;

        let report = validate_config(&cfg);
        assert!(report.errors.contains(&ValidationError::MissingServiceName));
        assert!(report.errors.contains(&ValidationError::MissingDefaultUser));
        assert_eq!(report.warnings[0].field, "service.debug");
    }

    #[test]
    fn test_server_fields() {
        let mut cfg = valid();
        cfg.server.host = "localhost".to_string();
        cfg.server.port = 0;
        cfg.server.request_timeout_seconds = 0;

        let report = validate_config(&cfg);
        assert_eq!(report.errors.len(), 3);
        assert_matches!(report.errors[0], ValidationError::InvalidHost(_));
    }

    #[test]
    fn test_cors_origins() {
        let mut cfg = valid();
        cfg.server.cors_origins = vec![
            "http://localhost:5174".to_string(),
            "not a url".to_string(),
            "ftp://files.example.com".to_string(),
            "*".to_string(),
        ];

        let report = validate_config(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert!(report
            .errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidCorsOrigin { .. })));
        assert_eq!(report.warnings.len(), 1);

        cfg.server.cors_origins.clear();
        let report = validate_config(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].field, "server.cors_origins");
    }

    #[test]
    fn test_log_format() {
        let mut cfg = valid();
        cfg.logging = Some(LoggingConfig {
            format: "xml".to_string(),
        });
        let report = validate_config(&cfg);
        assert_matches!(report.errors.as_slice(), [ValidationError::InvalidLogFormat(_)]);

        cfg.logging = Some(LoggingConfig {
            format: "JSON".to_string(),
        });
        assert!(validate_config(&cfg).is_valid());
    }

    #[test]
    fn test_metrics_port_collision() {
        let mut cfg = valid();
        cfg.metrics = Some(MetricsConfig {
            enabled: true,
            port: cfg.server.port,
        });
        let report = validate_config(&cfg);
        assert_eq!(report.errors, vec![ValidationError::PortCollision(8000)]);

        // Only checked when the exporter is on
        cfg.metrics = Some(MetricsConfig {
            enabled: false,
            port: 8000,
        });
        assert!(validate_config(&cfg).is_valid());
    }

    #[test]
    fn test_unresolved_env_var() {
        let mut cfg = valid();
        cfg.service.name = "${CONFMAN_VALIDATOR_UNSET}".to_string();
        cfg.server.host = "${CONFMAN_VALIDATOR_HOST}".to_string();

        let report = validate_config(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert!(report
            .errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidEnvVar { .. })));
    }
}
