//! Port validation utilities
//!
//! Checking a port before binding is racy: another process can take it in
//! between. This gives early, readable feedback at startup; the real bind
//! remains the source of truth.

use tokio::net::TcpListener;
use tracing::{debug, error, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Check that the configured HTTP port can be bound right now
pub async fn validate_port_available(config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    debug!(%addr, "Checking HTTP port");

    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            drop(listener);
            debug!(port = config.port, "HTTP port is available");
            Ok(())
        }
        Err(e) => {
            error!(port = config.port, error = %e, "HTTP port is NOT available");
            Err(ServerError::port_in_use(config.port, e.to_string()))
        }
    }
}

/// Reject port 0 for explicit binding and warn about privileged ports
pub fn validate_port_range(port: u16) -> Result<()> {
    if port == 0 {
        return Err(ServerError::ConfigError(
            "Port cannot be 0 (ephemeral port assignment not supported for explicit binding)"
                .to_string(),
        ));
    }
    if port < 1024 {
        warn!(
            "Port {} is a privileged port (requires root/admin privileges)",
            port
        );
    }
    Ok(())
}
