//! Server lifecycle
//!
//! [`LocalServer`] owns the listener's start/stop state machine:
//! `Stopped -> Starting -> Running -> Stopping -> Stopped`. The controlling
//! context only ever calls `start` and `stop`; both are fast, and all
//! request serving happens on spawned tasks.

use scanlink_core::{Error, EventSender, Result, SessionConfig};
use scanlink_log::ScanLog;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::http::create_router;
use crate::state::AppState;

/// Lifecycle state of a [`LocalServer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// One bound listener plus the handles needed to shut it down
struct RunningServer {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// The HTTP listener and its lifecycle
///
/// At most one instance is active per `LocalServer`. A `SessionConfig`
/// snapshot is captured at start; operator edits after that point only
/// affect the next start.
pub struct LocalServer {
    status: ServerStatus,
    running: Option<RunningServer>,
}

impl LocalServer {
    /// Create a stopped server
    pub fn new() -> Self {
        Self {
            status: ServerStatus::Stopped,
            running: None,
        }
    }

    /// Current lifecycle state
    pub fn status(&self) -> ServerStatus {
        self.status
    }

    /// Whether a listener is currently bound
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Address of the bound listener, if running
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.local_addr)
    }

    /// Bind and start serving
    ///
    /// Valid only from `Stopped`; a second start while running is rejected
    /// with [`Error::AlreadyRunning`] and leaves the original server intact.
    /// Bind failures are reported synchronously and the server stays
    /// `Stopped`. On success the listener is served on a spawned task, so
    /// the caller never blocks on network I/O.
    pub async fn start(
        &mut self,
        host: IpAddr,
        config: SessionConfig,
        events: EventSender,
        log: Arc<ScanLog>,
    ) -> Result<SocketAddr> {
        if self.running.is_some() {
            return Err(Error::AlreadyRunning);
        }
        if config.token.is_empty() {
            return Err(Error::Config(
                "pairing token must not be empty".to_string(),
            ));
        }

        self.status = ServerStatus::Starting;
        let addr = SocketAddr::new(host, config.port);
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(source) => {
                self.status = ServerStatus::Stopped;
                return Err(Error::Bind { addr, source });
            }
        };
        let local_addr = match listener.local_addr() {
            Ok(local_addr) => local_addr,
            Err(source) => {
                self.status = ServerStatus::Stopped;
                return Err(Error::Bind { addr, source });
            }
        };

        let state = Arc::new(AppState::new(config, events, log));
        let router = create_router(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let shutdown = async {
                shutdown_rx.await.ok();
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                // Per-request failures are handled inside the handlers; an
                // error here means the listener itself died.
                warn!("Server error: {}", e);
            }
        });

        self.running = Some(RunningServer {
            local_addr,
            shutdown_tx,
            task,
        });
        self.status = ServerStatus::Running;
        info!("Server listening on {}", local_addr);
        Ok(local_addr)
    }

    /// Gracefully shut down
    ///
    /// Stops accepting new connections, lets in-flight requests finish, and
    /// waits for the listener to be released so an immediate restart on the
    /// same port succeeds. A no-op when already stopped.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        self.status = ServerStatus::Stopping;
        let _ = running.shutdown_tx.send(());
        if let Err(e) = running.task.await {
            if e.is_panic() {
                warn!("Server task panicked during shutdown: {}", e);
            }
        }
        self.status = ServerStatus::Stopped;
        info!("Server stopped");
    }
}

impl Default for LocalServer {
    fn default() -> Self {
        Self::new()
    }
}
