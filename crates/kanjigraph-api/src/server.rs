use crate::{create_router, AppState};
use kanjigraph_core::{KanjiGraphError, Result, ServerConfig};
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

pub struct Server {
    state: AppState,
    addr: SocketAddr,
}

impl Server {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { state, addr }
    }

    /// Resolves `host:port` from configuration; host names are looked up.
    pub async fn bind_addr(config: &ServerConfig) -> Result<SocketAddr> {
        tokio::net::lookup_host((config.host.as_str(), config.port))
            .await?
            .next()
            .ok_or_else(|| {
                KanjiGraphError::Config(format!("cannot resolve host {:?}", config.host))
            })
    }

    pub async fn run(self) -> Result<()> {
        let router = create_router(self.state);

        let listener = {
            let socket = if self.addr.is_ipv6() {
                tokio::net::TcpSocket::new_v6()
            } else {
                tokio::net::TcpSocket::new_v4()
            }?;

            let _ = socket.set_reuseaddr(true);
            let _ = socket.set_keepalive(true);
            socket.bind(self.addr)?;
            socket.listen(1024)?
        };

        info!("KanjiGraph API listening on http://{}", self.addr);
        info!("  GET /health");
        info!("  GET /v1/subgraph?kanji=<kanji|keyword>&threshold=<n>&direction=<d>");
        info!("  GET /v1/lesson/<lesson>");
        info!("  GET /v1/lineage?kanji=<kanji|keyword>");
        info!("  GET /v1/query?q=<words>");
        info!("  GET /v1/decompose/<kanji>");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
