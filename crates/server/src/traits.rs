//! Server traits for lifecycle handling
//!
//! [`Server`] is the contract every listener implements; [`ServerExt`]
//! adds the spawn and Ctrl+C helpers on top of it.

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Core server trait.
///
/// # Example
///
/// ```ignore
/// use server::{Server, ServerExt, HttpServer, ServerConfig};
///
/// let server = HttpServer::new(ServerConfig::new("127.0.0.1", 8000), router);
/// server.run_with_ctrl_c().await?;
/// ```
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Name used in log lines
    fn name(&self) -> &str;

    /// Address the server is bound to, `None` until it is listening
    fn address(&self) -> Option<SocketAddr>;

    /// True while the server is accepting connections
    fn is_running(&self) -> bool;

    /// Runs the server until the shutdown token is cancelled.
    ///
    /// Implementations bind, serve until `shutdown` fires, drain in-flight
    /// requests and return `Ok(())` on a clean stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or hits a fatal I/O error.
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}

/// Extension trait providing convenience methods for servers.
///
/// Implemented for every [`Server`].
pub trait ServerExt: Server + Sized {
    /// Spawns the server on a new task and returns its handle and shutdown token.
    fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let handle = tokio::spawn(async move { self.run(token_clone).await });
        (handle, token)
    }

    /// Runs the server until Ctrl+C (SIGINT) is received.
    fn run_with_ctrl_c(self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            let shutdown = crate::shutdown::ShutdownController::with_ctrl_c();
            self.run(shutdown.token()).await
        }
    }
}

impl<T: Server + Sized> ServerExt for T {}
