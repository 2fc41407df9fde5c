//! HTTP server for the public directory.

use axum::Router;
use log::{error, info, warn};
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Static server startup errors. All are fatal at startup.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to start server runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Router serving every path from `public_dir`. Directory requests get the
/// directory's `index.html`.
pub fn router(public_dir: &Path) -> Router {
    Router::new().fallback_service(ServeDir::new(public_dir))
}

/// Handle to the running server thread.
pub struct StaticServer {
    local_addr: SocketAddr,
    _thread: JoinHandle<()>,
}

impl StaticServer {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

/// Bind `port` on all interfaces and serve `public_dir` from a background
/// thread.
///
/// Binding happens before this returns, so a taken port is reported to the
/// caller. The thread lives until the process exits.
pub fn spawn_static_server(port: u16, public_dir: PathBuf) -> Result<StaticServer, ServerError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("static-server-worker")
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = runtime
        .block_on(TcpListener::bind(addr))
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| ServerError::Bind { addr, source })?;

    if !public_dir.is_dir() {
        warn!(
            "Public directory {} does not exist; every request will 404",
            public_dir.display()
        );
    }
    info!(
        "Static file server listening on http://{} serving {}",
        local_addr,
        public_dir.display()
    );

    let app = router(&public_dir);
    let thread = std::thread::Builder::new()
        .name("static-server".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                if let Err(e) = axum::serve(listener, app).await {
                    error!("Static file server stopped: {}", e);
                }
            });
        })
        .map_err(ServerError::Runtime)?;

    Ok(StaticServer {
        local_addr,
        _thread: thread,
    })
}
