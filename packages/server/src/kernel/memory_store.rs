//! In-process note store.
//!
//! Keeps notes in a `BTreeMap` keyed by (userId, noteId) so partition queries
//! come back in sort-key order, matching the hosted table.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domains::notes::models::{Note, NoteKey};
use crate::kernel::BaseNoteStore;

#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: RwLock<BTreeMap<(String, String), Note>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert directly, bypassing the trait (test seeding)
    pub async fn insert(&self, note: Note) {
        self.notes
            .write()
            .await
            .insert((note.user_id.clone(), note.note_id.clone()), note);
    }

    pub async fn get(&self, user_id: &str, note_id: &str) -> Option<Note> {
        self.notes
            .read()
            .await
            .get(&(user_id.to_string(), note_id.to_string()))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl BaseNoteStore for InMemoryNoteStore {
    async fn put_note(&self, note: &Note) -> Result<()> {
        self.insert(note.clone()).await;
        Ok(())
    }

    async fn get_note(&self, user_id: &str, note_id: &str) -> Result<Option<Note>> {
        Ok(self.get(user_id, note_id).await)
    }

    async fn scan_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes.read().await.values().cloned().collect())
    }

    async fn query_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        Ok(self
            .notes
            .read()
            .await
            .range((user_id.to_string(), String::new())..)
            .take_while(|((owner, _), _)| owner == user_id)
            .map(|(_, note)| note.clone())
            .collect())
    }

    async fn update_note_content(
        &self,
        user_id: &str,
        note_id: &str,
        content: &str,
        updated_at: &str,
    ) -> Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        Ok(notes
            .get_mut(&(user_id.to_string(), note_id.to_string()))
            .map(|note| {
                note.content = content.to_string();
                note.updated_at = Some(updated_at.to_string());
                note.clone()
            }))
    }

    async fn delete_note(&self, user_id: &str, note_id: &str) -> Result<()> {
        self.notes
            .write()
            .await
            .remove(&(user_id.to_string(), note_id.to_string()));
        Ok(())
    }

    async fn batch_delete_notes(&self, keys: &[NoteKey]) -> Result<()> {
        let mut notes = self.notes.write().await;
        for key in keys {
            notes.remove(&(key.user_id.clone(), key.note_id.clone()));
        }
        Ok(())
    }
}
