use axum::{
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::http::{content, health, menu, AppState};
use crate::infrastructure::{InfraError, InfraResult};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/content",
            get(content::get_content).post(content::save_content),
        )
        .route("/api/menu", get(menu::get_menu))
        .route("/api/menu/rows", get(menu::get_rows))
        .route("/api/menu/navigation", get(menu::get_navigation))
        .route("/api/menu/entries", post(menu::add_root))
        .route(
            "/api/menu/entries/{id}",
            patch(menu::update_entry).delete(menu::delete_entry),
        )
        .route("/api/menu/entries/{id}/children", post(menu::add_child))
        .route("/api/menu/reorder", post(menu::reorder))
        .route("/api/menu/drag/start", post(menu::drag_start))
        .route("/api/menu/drag/drop", post(menu::drag_drop))
        .route("/api/menu/drag/cancel", post(menu::drag_cancel))
        .route("/api/menu/save", post(menu::save_menu))
        .route("/api/menu/reload", post(menu::reload_menu))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(container: &ServiceContainer) -> InfraResult<()> {
    let addr = container.settings.bind_addr()?;
    let app = build_router(AppState::from_container(container));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| InfraError::io(format!("bind {addr}"), e))?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| InfraError::io("serve http", e))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
    }
}
