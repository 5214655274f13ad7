//! HTTP server startup and shutdown

use tokio::net::TcpListener;

use crate::api;
use crate::utils::{AppError, AppResult};

use super::config::Config;
use super::state::ServerState;

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (shared with tests or tools)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Bind and serve until ctrl-c
    pub async fn run(self) -> AppResult<()> {
        let state = match self.state {
            Some(s) => s,
            None => ServerState::new(self.config.clone()),
        };
        let app = api::build_app(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Cannot bind {addr}: {e}")))?;
        tracing::info!(%addr, environment = %self.config.environment, "Price server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}
