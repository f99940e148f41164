//! # HTTP Server
//!
//! Combines the card and observability routers and serves them.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::card_routes::{card_routes, CardState};
use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use crate::dao::CardsDao;
use crate::observability::{Logger, MetricsRegistry};

/// HTTP server for the Card service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `dao` with fresh request counters
    pub fn new(config: HttpServerConfig, dao: CardsDao) -> Self {
        let router = Self::build_router(&config, dao, Arc::new(MetricsRegistry::new()));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        dao: CardsDao,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let card_state = Arc::new(CardState::new(dao, Arc::clone(&metrics)));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(card_routes(card_state))
            .nest("/observability", observability_routes(metrics))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        let bound = listener.local_addr()?.to_string();

        Logger::info("SERVER_STARTING", &[("addr", bound.as_str())]);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
