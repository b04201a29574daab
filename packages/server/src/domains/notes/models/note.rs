use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::utc_timestamp;
use crate::kernel::BaseNoteStore;

/// Stored attribute name of the partition key
pub const USER_ID_ATTR: &str = "userId";
/// Stored attribute name of the sort key
pub const NOTE_ID_ATTR: &str = "noteId";

/// A user-owned text note, serialized exactly as it is stored.
///
/// `updated_at` is optional so items written before updatedAt existed still load;
/// every note written by this service carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub user_id: String,
    pub note_id: String,
    pub content: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Composite primary key of a note
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteKey {
    pub user_id: String,
    pub note_id: String,
}

impl From<&Note> for NoteKey {
    fn from(note: &Note) -> Self {
        Self {
            user_id: note.user_id.clone(),
            note_id: note.note_id.clone(),
        }
    }
}

impl Note {
    /// Build a fresh note stamped with the current time.
    ///
    /// A missing or empty `note_id` is replaced with a random UUID.
    pub fn new(user_id: String, note_id: Option<String>, content: String) -> Self {
        let note_id = note_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = utc_timestamp();

        Self {
            user_id,
            note_id,
            content,
            created_at: now.clone(),
            updated_at: Some(now),
        }
    }

    pub fn key(&self) -> NoteKey {
        NoteKey::from(self)
    }
}

// =============================================================================
// Note Queries
// =============================================================================

impl Note {
    /// Write the note, overwriting any existing item with the same key
    pub async fn save(&self, store: &dyn BaseNoteStore) -> Result<()> {
        store.put_note(self).await
    }

    pub async fn find(
        user_id: &str,
        note_id: &str,
        store: &dyn BaseNoteStore,
    ) -> Result<Option<Self>> {
        store.get_note(user_id, note_id).await
    }

    pub async fn find_all(store: &dyn BaseNoteStore) -> Result<Vec<Self>> {
        store.scan_notes().await
    }

    pub async fn find_for_user(user_id: &str, store: &dyn BaseNoteStore) -> Result<Vec<Self>> {
        store.query_notes(user_id).await
    }

    /// Replace content and refresh updatedAt; `None` when the note does not exist
    pub async fn update_content(
        user_id: &str,
        note_id: &str,
        content: &str,
        store: &dyn BaseNoteStore,
    ) -> Result<Option<Self>> {
        store
            .update_note_content(user_id, note_id, content, &utc_timestamp())
            .await
    }

    pub async fn delete(user_id: &str, note_id: &str, store: &dyn BaseNoteStore) -> Result<()> {
        store.delete_note(user_id, note_id).await
    }

    pub async fn delete_many(keys: &[NoteKey], store: &dyn BaseNoteStore) -> Result<()> {
        store.batch_delete_notes(keys).await
    }
}
