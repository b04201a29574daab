use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct PingResponse {
    status: &'static str,
}

/// Liveness probe; never touches the store.
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse { status: "ok" })
}
