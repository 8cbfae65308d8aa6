pub mod error;
pub mod lookup;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use bill_client::remote::BillSource;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;
pub use lookup::BillResponse;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn BillSource>,
}

impl AppState {
    pub fn new<S: BillSource + 'static>(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/bill", get(lookup::lookup_bill).options(preflight))
        .route("/health", get(health))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Serve the lookup API until ctrl-c.
pub async fn serve(bind_addr: &str, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.bind_addr: {e}"))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "bill lookup API listening");

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    Ok(())
}
