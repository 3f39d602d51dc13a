use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());
    parse_config(&content)
}

/// Parse YAML text after environment variable substitution.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let substituted = substitution::substitute_env_vars(content)?;

    // An empty file is a valid, all-defaults configuration.
    if substituted.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    serde_yaml::from_str(&substituted).with_context(|| "Failed to parse YAML configuration")
}

/// Configuration written by `init`: every section spelled out.
#[instrument]
pub fn generate_default_config() -> AppConfig {
    AppConfig {
        service: ServiceConfig::default(),
        server: HttpConfig::default(),
        logging: Some(LoggingConfig::default()),
        metrics: Some(MetricsConfig::default()),
    }
}

#[instrument]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &AppConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml =
        serde_yaml::to_string(config).with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_save_and_load() {
        let path = env::temp_dir().join(format!("confman-test-{}.yaml", std::process::id()));
        let config = generate_default_config();

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
        assert!(validate_config(&loaded).is_valid());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_parse_with_env() {
        env::set_var("CONFMAN_PARSER_PORT", "8200");
        let cfg = parse_config("server:\n  port: ${CONFMAN_PARSER_PORT}\n").unwrap();
        assert_eq!(cfg.server.port, 8200);
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
        assert!(parse_config("server: [1, 2").is_err());
    }
}
