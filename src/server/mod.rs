use crate::config::Config;
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tvstreams_catalog::{CatalogStore, HttpProber, QueryResolver};

pub mod routes_addon;

/// Shared application context. Read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub resolver: Arc<QueryResolver>,
    pub manifest: Arc<Manifest>,
}

impl AppContext {
    /// Wire a loaded catalog to the configured resolver and manifest.
    pub fn new(config: &Config, store: CatalogStore) -> Self {
        let prober = HttpProber::with_timeout(config.streams.probe_timeout());
        let resolver = QueryResolver::new(
            Arc::new(store),
            config.addon.binding(),
            Arc::new(prober),
        )
        .with_liveness_check(config.streams.liveness_check);

        Self {
            resolver: Arc::new(resolver),
            manifest: Arc::new(Manifest::from(&config.addon)),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(cors::Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(routes_addon::addon_routes())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Request handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong!").into_response()
}

/// Start the HTTP server over an already loaded catalog
pub async fn start_server(config: Config, store: CatalogStore) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::new(&config, store);
    tracing::info!(
        "Serving {} series (liveness check {})",
        ctx.resolver.store().len(),
        if ctx.resolver.liveness_check() { "enabled" } else { "disabled" }
    );

    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Addon running on http://{}/manifest.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
