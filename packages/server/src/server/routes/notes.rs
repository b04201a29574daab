use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domains::notes::activities::{self, CreateNoteInput};
use crate::domains::notes::Note;
use crate::server::app::AxumAppState;
use crate::server::error::ApiResult;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub user_id: String,
    /// Generated server-side when absent, null or empty
    #[serde(default)]
    pub note_id: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /notes
pub async fn create_note_handler(
    Extension(state): Extension<AxumAppState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let Json(req) = payload?;

    let note = activities::create_note(
        CreateNoteInput {
            user_id: req.user_id,
            note_id: req.note_id,
            content: req.content,
        },
        &state.server_deps,
    )
    .await?;

    Ok(Json(note))
}

/// GET /notes
pub async fn list_all_notes_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(activities::list_all_notes(&state.server_deps).await?))
}

/// GET /notes/{user_id}
pub async fn list_user_notes_handler(
    Extension(state): Extension<AxumAppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(
        activities::list_notes_for_user(&user_id, &state.server_deps).await?,
    ))
}

/// GET /notes/{user_id}/{note_id}
pub async fn get_note_handler(
    Extension(state): Extension<AxumAppState>,
    Path((user_id, note_id)): Path<(String, String)>,
) -> ApiResult<Json<Note>> {
    Ok(Json(
        activities::get_note(&user_id, &note_id, &state.server_deps).await?,
    ))
}

/// PUT /notes/{user_id}/{note_id}
pub async fn update_note_handler(
    Extension(state): Extension<AxumAppState>,
    Path((user_id, note_id)): Path<(String, String)>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let Json(req) = payload?;

    let note =
        activities::update_note(&user_id, &note_id, &req.content, &state.server_deps).await?;

    Ok(Json(note))
}

/// DELETE /notes/{user_id}/{note_id}
pub async fn delete_note_handler(
    Extension(state): Extension<AxumAppState>,
    Path((user_id, note_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    activities::delete_note(&user_id, &note_id, &state.server_deps).await?;
    Ok(MessageResponse::new("Note deleted"))
}

/// DELETE /notes/{user_id}
pub async fn delete_user_notes_handler(
    Extension(state): Extension<AxumAppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    activities::delete_all_notes_for_user(&user_id, &state.server_deps).await?;
    Ok(MessageResponse::new(format!(
        "All notes deleted for user {}",
        user_id
    )))
}
