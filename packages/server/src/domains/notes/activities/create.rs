//! Create note activity.

use tracing::info;

use crate::domains::notes::errors::{NoteError, NoteResult};
use crate::domains::notes::models::Note;
use crate::kernel::ServerDeps;

pub struct CreateNoteInput {
    pub user_id: String,
    pub note_id: Option<String>,
    pub content: String,
}

/// Create (or overwrite) a note.
///
/// The write is unconditional: an existing note with the same
/// (userId, noteId) is replaced in full, including createdAt.
pub async fn create_note(input: CreateNoteInput, deps: &ServerDeps) -> NoteResult<Note> {
    if input.user_id.is_empty() {
        return Err(NoteError::Validation("userId must not be empty".to_string()));
    }

    let note = Note::new(input.user_id, input.note_id, input.content);
    note.save(deps.note_store.as_ref()).await?;

    info!(user_id = %note.user_id, note_id = %note.note_id, "Created note");

    Ok(note)
}
