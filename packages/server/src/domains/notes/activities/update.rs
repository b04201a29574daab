//! Update note activity.

use tracing::info;

use crate::domains::notes::errors::{NoteError, NoteResult};
use crate::domains::notes::models::Note;
use crate::kernel::ServerDeps;

/// Replace the content of an existing note and refresh updatedAt.
///
/// The store write is conditioned on the note existing, so this never
/// creates a note. A missing note fails with `PreconditionFailed`.
pub async fn update_note(
    user_id: &str,
    note_id: &str,
    content: &str,
    deps: &ServerDeps,
) -> NoteResult<Note> {
    let note = Note::update_content(user_id, note_id, content, deps.note_store.as_ref())
        .await?
        .ok_or_else(|| NoteError::PreconditionFailed("Note not found".to_string()))?;

    info!(user_id = %user_id, note_id = %note_id, "Updated note");

    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::TestDependencies;

    #[tokio::test]
    async fn changes_content_and_updated_at_only() {
        let test_deps = TestDependencies::new();
        let original = Note::new("u1".to_string(), Some("n1".to_string()), "hello".to_string());
        test_deps.note_store.insert(original.clone()).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let updated = update_note("u1", "n1", "world", &test_deps.server_deps())
            .await
            .unwrap();

        assert_eq!(updated.content, "world");
        assert_eq!(updated.note_id, original.note_id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(test_deps.note_store.get("u1", "n1").await, Some(updated));
    }

    #[tokio::test]
    async fn missing_note_fails_without_creating_it() {
        let test_deps = TestDependencies::new();

        let err = update_note("u1", "ghost", "world", &test_deps.server_deps())
            .await
            .unwrap_err();

        assert!(matches!(err, NoteError::PreconditionFailed(_)));
        assert_eq!(test_deps.note_store.get("u1", "ghost").await, None);
    }
}
