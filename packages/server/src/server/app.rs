//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    create_note_handler, delete_note_handler, delete_user_notes_handler, get_note_handler,
    list_all_notes_handler, list_user_notes_handler, ping_handler, update_note_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
}

/// CORS policy: credentials allowed, any method and header.
///
/// Without an allow-list every origin is accepted by echoing it back
/// (a literal `*` cannot be combined with credentials).
pub fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match allowed_origins {
        Some(origins) => AllowOrigin::list(origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        })),
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Build the Axum application router
pub fn build_app(server_deps: ServerDeps, allowed_origins: Option<&[String]>) -> Router {
    let app_state = AxumAppState {
        server_deps: Arc::new(server_deps),
    };

    Router::new()
        .route(
            "/notes",
            post(create_note_handler).get(list_all_notes_handler),
        )
        .route(
            "/notes/{user_id}",
            get(list_user_notes_handler).delete(delete_user_notes_handler),
        )
        .route(
            "/notes/{user_id}/{note_id}",
            get(get_note_handler)
                .put(update_note_handler)
                .delete(delete_note_handler),
        )
        .route("/ping", get(ping_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
