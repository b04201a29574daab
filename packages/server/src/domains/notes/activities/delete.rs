//! Delete activities.
//!
//! `delete_all_notes_for_user` reads the owner's notes and then issues batched
//! deletes. The two steps are not transactional: notes written for the owner
//! after the read survive, and notes removed concurrently are skipped silently.

use tracing::info;

use crate::domains::notes::errors::{NoteError, NoteResult};
use crate::domains::notes::models::{Note, NoteKey};
use crate::kernel::ServerDeps;

/// Delete a single note. Deleting a note that does not exist is a no-op.
pub async fn delete_note(user_id: &str, note_id: &str, deps: &ServerDeps) -> NoteResult<()> {
    Note::delete(user_id, note_id, deps.note_store.as_ref()).await?;
    info!(user_id = %user_id, note_id = %note_id, "Deleted note");
    Ok(())
}

/// Delete every note owned by `user_id`.
///
/// Returns the number of delete requests submitted. Fails with `NotFound`
/// when the owner has no notes.
pub async fn delete_all_notes_for_user(user_id: &str, deps: &ServerDeps) -> NoteResult<usize> {
    let store = deps.note_store.as_ref();
    let keys: Vec<NoteKey> = Note::find_for_user(user_id, store)
        .await?
        .iter()
        .map(NoteKey::from)
        .collect();

    if keys.is_empty() {
        return Err(NoteError::NotFound("No notes found for this user".to_string()));
    }

    Note::delete_many(&keys, store).await?;
    info!(user_id = %user_id, count = keys.len(), "Deleted all notes for user");

    Ok(keys.len())
}
