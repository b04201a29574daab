// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "a missing note is a 404") lives in the notes domain activities.
//
// Naming convention: Base* for trait names (e.g., BaseNoteStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::notes::models::{Note, NoteKey};

// =============================================================================
// Note Store Trait (Infrastructure - single key-value table)
// =============================================================================

/// Key-value access to the notes table.
///
/// The table is keyed by `userId` (partition) and `noteId` (sort). Every call
/// maps onto exactly one store operation, except `batch_delete_notes`, which
/// may be split into several batch requests.
#[async_trait]
pub trait BaseNoteStore: Send + Sync {
    /// Write a note, replacing any item with the same key
    async fn put_note(&self, note: &Note) -> Result<()>;

    async fn get_note(&self, user_id: &str, note_id: &str) -> Result<Option<Note>>;

    /// Full table scan across all owners
    async fn scan_notes(&self) -> Result<Vec<Note>>;

    /// All notes in one partition, ordered by note id
    async fn query_notes(&self, user_id: &str) -> Result<Vec<Note>>;

    /// Set content and updatedAt on an existing item.
    ///
    /// Returns the updated item, or `None` if no item exists at the key
    /// (nothing is written in that case).
    async fn update_note_content(
        &self,
        user_id: &str,
        note_id: &str,
        content: &str,
        updated_at: &str,
    ) -> Result<Option<Note>>;

    /// Delete a note; missing keys are not an error
    async fn delete_note(&self, user_id: &str, note_id: &str) -> Result<()>;

    /// Delete many notes with batched writes (not atomic across the batch)
    async fn batch_delete_notes(&self, keys: &[NoteKey]) -> Result<()>;
}
