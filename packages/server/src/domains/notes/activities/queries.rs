//! Read-only note activities.

use tracing::debug;

use crate::domains::notes::errors::{NoteError, NoteResult};
use crate::domains::notes::models::Note;
use crate::kernel::ServerDeps;

/// Every note across all owners (unbounded scan)
pub async fn list_all_notes(deps: &ServerDeps) -> NoteResult<Vec<Note>> {
    let notes = Note::find_all(deps.note_store.as_ref()).await?;
    debug!(count = notes.len(), "Scanned all notes");
    Ok(notes)
}

/// Notes owned by `user_id`, ordered by note id; unknown owners yield an empty list
pub async fn list_notes_for_user(user_id: &str, deps: &ServerDeps) -> NoteResult<Vec<Note>> {
    let notes = Note::find_for_user(user_id, deps.note_store.as_ref()).await?;
    debug!(user_id = %user_id, count = notes.len(), "Queried notes for user");
    Ok(notes)
}

pub async fn get_note(user_id: &str, note_id: &str, deps: &ServerDeps) -> NoteResult<Note> {
    Note::find(user_id, note_id, deps.note_store.as_ref())
        .await?
        .ok_or_else(|| NoteError::NotFound("Note not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::TestDependencies;

    async fn seeded() -> TestDependencies {
        let test_deps = TestDependencies::new();
        for (user_id, note_id) in [("u2", "b"), ("u1", "z"), ("u1", "a"), ("u1", "m")] {
            test_deps
                .note_store
                .insert(Note::new(user_id.to_string(), Some(note_id.to_string()), "x".to_string()))
                .await;
        }
        test_deps
    }

    #[tokio::test]
    async fn lists_user_notes_in_note_id_order() {
        let test_deps = seeded().await;

        let notes = list_notes_for_user("u1", &test_deps.server_deps()).await.unwrap();

        let ids: Vec<_> = notes.iter().map(|n| n.note_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }

    #[tokio::test]
    async fn unknown_or_empty_owner_lists_nothing() {
        let test_deps = seeded().await;
        let deps = test_deps.server_deps();

        assert!(list_notes_for_user("nobody", &deps).await.unwrap().is_empty());
        assert!(list_notes_for_user("", &deps).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_all_spans_owners() {
        let test_deps = seeded().await;

        let notes = list_all_notes(&test_deps.server_deps()).await.unwrap();

        assert_eq!(notes.len(), 4);
    }

    #[tokio::test]
    async fn missing_note_is_not_found() {
        let test_deps = seeded().await;

        let err = get_note("u1", "nope", &test_deps.server_deps()).await.unwrap_err();

        assert!(matches!(err, NoteError::NotFound(ref msg) if msg == "Note not found"));
    }
}
