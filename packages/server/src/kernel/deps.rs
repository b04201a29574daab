//! Server dependencies for activities (using traits for testability)
//!
//! The store handle is built once at startup and shared read-only by every
//! request; the service keeps no other state between requests.

use std::sync::Arc;

use crate::kernel::BaseNoteStore;

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub note_store: Arc<dyn BaseNoteStore>,
}

impl ServerDeps {
    pub fn new(note_store: Arc<dyn BaseNoteStore>) -> Self {
        Self { note_store }
    }
}
