//! Configuration Manager CLI and Server Binary
//!
//! Entry point for initializing, validating and serving the instrument
//! configuration API.

use anyhow::{Context, Result};
use api::{build_router, AppState, RouterOptions};
use cli::{Cli, Commands};
use config::{
    generate_default_config, load_config, save_config, validate_config, AppConfig,
    ValidationReport,
};
use observability::{init_logging, init_metrics, LogFormat};
use server::{
    validate_port_available, validate_port_range, HttpServer, ServerConfig, ServerExt,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start { config, host, port } => start_command(config, host, port).await,
        Commands::Validate { config } => {
            init_logging("confman", LogFormat::Pretty, false)?;
            validate_command(config).await
        }
        Commands::Init { output, force } => {
            init_logging("confman", LogFormat::Pretty, false)?;
            init_command(output, force).await
        }
    }
}

/// Load the file if present; a missing file means all defaults.
fn load_or_default(path: &Path) -> Result<(AppConfig, bool)> {
    if path.exists() {
        Ok((load_config(path)?, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}

async fn start_command<P: AsRef<Path>>(
    config_path: P,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let config_path = config_path.as_ref();
    let (mut config, from_file) = load_or_default(config_path)?;

    if let Some(host) = host_override {
        config.server.host = host;
    }
    if let Some(port) = port_override {
        config.server.port = port;
    }

    let format = LogFormat::parse(&config.logging().format).unwrap_or_default();
    init_logging(&config.service.name, format, config.service.debug)?;

    if !from_file {
        warn!(path = ?config_path, "Configuration file not found, using defaults");
    }
    debug!(?config, "Effective configuration");

    let report = validate_config(&config);
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }
    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start server due to configuration errors");
    }

    let metrics = config.metrics();
    if metrics.enabled {
        init_metrics(metrics.port)?;
    }

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);
    validate_port_range(server_config.port)?;
    validate_port_available(&server_config).await?;

    let state = AppState::in_memory(config.service.default_user.clone());
    let options = RouterOptions {
        api_prefix: config.service.api_prefix.clone(),
        request_timeout: Duration::from_secs(config.server.request_timeout_seconds),
        cors_origins: config.server.cors_origins.clone(),
        ..RouterOptions::new(config.service.name.clone())
    };

    info!(
        service = %config.service.name,
        host = %server_config.host,
        port = server_config.port,
        api_prefix = %options.api_prefix,
        "Starting configuration manager"
    );

    let server = HttpServer::new(server_config, build_router(state, options));
    server.run_with_ctrl_c().await?;

    info!("Configuration manager stopped");
    Ok(())
}

fn print_report(report: &ValidationReport) {
    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
    }
}

async fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");
    print_report(&report);

    if !report.is_valid() {
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!("API prefix: {}", config.service.api_prefix);
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Log format: {}", config.logging().format);
    if config.metrics().enabled {
        println!("Metrics port: {}", config.metrics().port);
    }

    Ok(())
}

async fn init_command<P: AsRef<Path>>(output_path: P, force: bool) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    if output_path.exists() && !force {
        anyhow::bail!(
            "{:?} already exists; pass --force to overwrite it",
            output_path
        );
    }

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Edit the configuration file to customize settings");
    println!(
        "  2. Run 'confman validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'confman start --config {:?}' to start the server",
        output_path
    );

    Ok(())
}
