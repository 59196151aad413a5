//! # HTTP API
//!
//! axum server for the booking form.
//!
//! | Route              | Purpose                                   |
//! |--------------------|-------------------------------------------|
//! | `GET /`            | Form page with default values             |
//! | `POST /`           | Form submission, page with the result     |
//! | `POST /api/predict`| JSON prediction                           |
//! | `GET /api/metrics` | Deployed model metrics                    |
//! | `GET /health`      | Liveness probe                            |
//!
//! Artifacts are loaded once into [`AppState`] and shared read-only by every
//! request. Predictions run inline on the request task.

mod handlers;
pub mod page;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use flightcast_core::{load_metrics, load_model, ArtifactError, ModelMetrics, Predictor};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Largest request body accepted, in bytes. A booking form is a few hundred.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

// =============================================================================
// STATE
// =============================================================================

/// Process-lifetime handles shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    pub metrics: ModelMetrics,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>, metrics: ModelMetrics) -> Self {
        Self { predictor, metrics }
    }

    /// Load the model and metrics artifacts from disk.
    pub fn load(model_path: &Path, metrics_path: &Path) -> Result<Self, ArtifactError> {
        let model = load_model(model_path)?;
        info!(
            path = %model_path.display(),
            name = model.name(),
            version = model.version(),
            kind = model.kind(),
            "model loaded"
        );

        let metrics = load_metrics(metrics_path)?;
        info!(
            path = %metrics_path.display(),
            accuracy = metrics.accuracy,
            roc_auc = metrics.roc_auc,
            f1_score = metrics.f1_score,
            "metrics loaded"
        );

        Ok(Self::new(Arc::new(model), metrics))
    }
}

// =============================================================================
// ROUTER
// =============================================================================

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/predict", post(handlers::api_predict))
        .route("/metrics", get(handlers::api_metrics));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
