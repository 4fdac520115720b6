//! HTTP interface: axum router over [`PixLimitService`].

pub mod dto;
pub mod error;
pub mod handlers;

use crate::application::service::PixLimitService;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

pub type AppState = Arc<PixLimitService>;

/// Builds the application router.
///
/// `cors_origins` empty means no CORS layer is installed.
pub fn router(service: AppState, cors_origins: &[String]) -> Router {
    let clients = Router::new()
        .route("/", post(handlers::create_client))
        .route("/{document}", get(handlers::list_accounts))
        .route(
            "/{document}/{account_id}",
            get(handlers::get_client).delete(handlers::delete_client),
        )
        .route("/{document}/{account_id}/limit", patch(handlers::set_limit))
        .route(
            "/{document}/{account_id}/transactions",
            post(handlers::process_transaction),
        );

    let app = Router::new()
        .route("/health", get(handlers::health))
        .nest(handlers::BASE_PATH, clients)
        .with_state(service);

    match cors_layer(cors_origins) {
        Some(layer) => app.layer(layer),
        None => app,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Serves `app` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "pix limit service listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
