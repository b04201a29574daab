// TestDependencies - mock implementations for testing
//
// Provides stores that can be injected into ServerDeps for tests.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::{BaseNoteStore, InMemoryNoteStore, ServerDeps};
use crate::domains::notes::models::{Note, NoteKey};

// =============================================================================
// Failing Note Store
// =============================================================================

/// Store whose every call fails, standing in for an unreachable table
pub struct FailingNoteStore {
    message: String,
}

impl FailingNoteStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Default for FailingNoteStore {
    fn default() -> Self {
        Self::new("store unavailable")
    }
}

#[async_trait]
impl BaseNoteStore for FailingNoteStore {
    async fn put_note(&self, _note: &Note) -> Result<()> {
        bail!("{}", self.message)
    }

    async fn get_note(&self, _user_id: &str, _note_id: &str) -> Result<Option<Note>> {
        bail!("{}", self.message)
    }

    async fn scan_notes(&self) -> Result<Vec<Note>> {
        bail!("{}", self.message)
    }

    async fn query_notes(&self, _user_id: &str) -> Result<Vec<Note>> {
        bail!("{}", self.message)
    }

    async fn update_note_content(
        &self,
        _user_id: &str,
        _note_id: &str,
        _content: &str,
        _updated_at: &str,
    ) -> Result<Option<Note>> {
        bail!("{}", self.message)
    }

    async fn delete_note(&self, _user_id: &str, _note_id: &str) -> Result<()> {
        bail!("{}", self.message)
    }

    async fn batch_delete_notes(&self, _keys: &[NoteKey]) -> Result<()> {
        bail!("{}", self.message)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// In-memory dependencies with direct access to the backing store
pub struct TestDependencies {
    pub note_store: Arc<InMemoryNoteStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            note_store: Arc::new(InMemoryNoteStore::new()),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.note_store.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
