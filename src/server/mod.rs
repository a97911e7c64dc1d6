use crate::config::Config;
use crate::library::{CatalogSource, FileSource};
use crate::streaming;
use anyhow::{Context, Result};
use axum::{
    handler::Handler,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod error;

/// Shared application context
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Resolves ids to files and opens them
    pub source: Arc<dyn FileSource>,
    /// Content-Type sent with every stream response
    pub content_type: HeaderValue,
    /// Read/write step for the transmit loop
    pub chunk_size: usize,
}

impl AppContext {
    /// Build a context backed by the library catalog from `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let source = Arc::new(CatalogSource::from_config(&config.library));
        Self::with_source(config, source)
    }

    /// Build a context around an arbitrary file source.
    pub fn with_source(config: Config, source: Arc<dyn FileSource>) -> Result<Self> {
        let content_type = HeaderValue::from_str(&config.streaming.content_type)
            .with_context(|| {
                format!("Invalid content type: {:?}", config.streaming.content_type)
            })?;
        Ok(Self {
            chunk_size: config.streaming.chunk_size.max(1),
            content_type,
            source,
            config: Arc::new(config),
        })
    }
}

/// One entry of the route table.
pub struct Route {
    pub method: MethodFilter,
    pub path: &'static str,
    service: MethodRouter<AppContext>,
}

impl Route {
    fn new<H, T>(method: MethodFilter, path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppContext>,
        T: 'static,
    {
        Self {
            method,
            path,
            service: on(method, handler),
        }
    }
}

/// Every route the server answers.
pub fn route_table() -> Vec<Route> {
    vec![
        Route::new(MethodFilter::GET, "/health", health_check),
        Route::new(MethodFilter::GET, "/watch/{id}", streaming::watch),
    ]
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    route_table()
        .into_iter()
        .fold(Router::new(), |router, route| {
            router.route(route.path, route.service)
        })
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::from_config(config)?;
    tracing::info!(
        "Library at {:?} with {} videos",
        ctx.config.library.media_dir,
        ctx.config.library.videos.len()
    );

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

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
