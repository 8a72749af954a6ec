//! Server process wrapper - owns the HTTP listener and the store together.
//!
//! Lifecycle: `Stopped -> Starting -> Running -> Stopping -> Stopped`.
//! Both `start` and `stop` must run inside an actix runtime
//! (`#[actix_web::main]` or `#[actix_web::test]`).

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing_actix_web::TracingLogger;

use blog_core::error::RepoError;
use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, MEMORY_URL, connect_repository};

use crate::config::AppConfig;
use crate::handlers;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// Upper bound on draining in-flight requests during `stop`.
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Server lifecycle errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Server is already running")]
    AlreadyRunning,

    #[error("Server is not running")]
    NotRunning,

    #[error("Store unavailable: {0}")]
    Store(#[from] RepoError),

    #[error("Failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Stopped,
    Starting,
    Running,
    Stopping,
}

struct RunningServer {
    addr: SocketAddr,
    handle: ServerHandle,
    task: JoinHandle<std::io::Result<()>>,
    repo: Arc<dyn PostRepository>,
}

enum Lifecycle {
    Stopped,
    Starting,
    Running(RunningServer),
    Stopping,
}

impl Lifecycle {
    fn status(&self) -> ServerStatus {
        match self {
            Lifecycle::Stopped => ServerStatus::Stopped,
            Lifecycle::Starting => ServerStatus::Starting,
            Lifecycle::Running(_) => ServerStatus::Running,
            Lifecycle::Stopping => ServerStatus::Stopping,
        }
    }
}

/// Starts and stops the blog API.
pub struct BlogServer {
    host: String,
    workers: Option<usize>,
    /// Pool settings; the URL is supplied per `start`.
    database: DatabaseConfig,
    lifecycle: Mutex<Lifecycle>,
}

impl Default for BlogServer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlogServer {
    /// Server bound to localhost with default pool sizes.
    pub fn new() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            workers: None,
            database: DatabaseConfig::new(MEMORY_URL),
            lifecycle: Mutex::new(Lifecycle::Stopped),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            host: config.host.clone(),
            workers: config.workers,
            database: config.database.clone(),
            lifecycle: Mutex::new(Lifecycle::Stopped),
        }
    }

    /// Set the number of HTTP worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn status(&self) -> ServerStatus {
        self.lifecycle().status()
    }

    /// Address of the bound listener while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.lifecycle() {
            Lifecycle::Running(running) => Some(running.addr),
            _ => None,
        }
    }

    /// Open the store at `database_url`, then bind `port` (0 picks a free port).
    ///
    /// On failure, or if the returned future is dropped before it resolves,
    /// nothing stays bound and the server is back in `Stopped`.
    pub async fn start(&self, database_url: &str, port: u16) -> Result<SocketAddr, ServerError> {
        let guard = self.begin_start()?;

        let config = DatabaseConfig {
            url: database_url.to_string(),
            ..self.database.clone()
        };
        let repo = connect_repository(&config).await.map_err(|e| {
            tracing::error!("Failed to open store: {}", e);
            ServerError::Store(e)
        })?;

        self.launch(repo, port, guard).await
    }

    /// Like [`start`](Self::start), with an already opened store.
    pub async fn start_with_repository(
        &self,
        repo: Arc<dyn PostRepository>,
        port: u16,
    ) -> Result<SocketAddr, ServerError> {
        let guard = self.begin_start()?;
        self.launch(repo, port, guard).await
    }

    /// Stop accepting connections, drain in-flight requests, then close the store.
    pub async fn stop(&self) -> Result<(), ServerError> {
        let running = {
            let mut lifecycle = self.lifecycle();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Stopping) {
                Lifecycle::Running(running) => running,
                other => {
                    *lifecycle = other;
                    return Err(ServerError::NotRunning);
                }
            }
        };

        tracing::info!(addr = %running.addr, "Stopping server");
        running.handle.stop(true).await;

        match running.task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("HTTP server exited with error: {}", e),
            Err(e) => tracing::warn!("HTTP server task failed: {}", e),
        }

        let closed = running.repo.close().await;
        *self.lifecycle() = Lifecycle::Stopped;
        tracing::info!("Server stopped");

        closed.map_err(ServerError::Store)
    }

    /// Never held across an `.await`.
    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_start(&self) -> Result<StartGuard<'_>, ServerError> {
        let mut lifecycle = self.lifecycle();
        if !matches!(*lifecycle, Lifecycle::Stopped) {
            return Err(ServerError::AlreadyRunning);
        }
        *lifecycle = Lifecycle::Starting;
        Ok(StartGuard { server: self })
    }

    async fn launch(
        &self,
        repo: Arc<dyn PostRepository>,
        port: u16,
        guard: StartGuard<'_>,
    ) -> Result<SocketAddr, ServerError> {
        let state = AppState::new(repo.clone());

        let mut http = HttpServer::new(move || {
            App::new()
                .wrap(RequestIdMiddleware)
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(state.clone()))
                .configure(handlers::configure_routes)
        })
        .disable_signals()
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS);
        if let Some(workers) = self.workers {
            http = http.workers(workers);
        }

        let bound = match http.bind((self.host.as_str(), port)) {
            Ok(bound) => bound,
            Err(e) => {
                tracing::error!(host = %self.host, port, "Failed to bind listener: {}", e);
                if let Err(close_err) = repo.close().await {
                    tracing::warn!("Failed to close store: {}", close_err);
                }
                return Err(ServerError::Bind(e));
            }
        };

        let addr = bound
            .addrs()
            .first()
            .copied()
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], port)));

        let server = bound.run();
        let handle = server.handle();
        let task = actix_web::rt::spawn(server);

        guard.complete(RunningServer {
            addr,
            handle,
            task,
            repo,
        });

        tracing::info!(%addr, "Server running");
        Ok(addr)
    }
}

/// Held while a start is in flight. Dropping it before `complete`, through an
/// error return or a cancelled future, puts the server back in `Stopped`.
struct StartGuard<'a> {
    server: &'a BlogServer,
}

impl StartGuard<'_> {
    fn complete(self, running: RunningServer) {
        *self.server.lifecycle() = Lifecycle::Running(running);
        std::mem::forget(self);
    }
}

impl Drop for StartGuard<'_> {
    fn drop(&mut self) {
        let mut lifecycle = self.server.lifecycle();
        if matches!(*lifecycle, Lifecycle::Starting) {
            *lifecycle = Lifecycle::Stopped;
        }
    }
}
