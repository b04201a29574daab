//! Test harness for HTTP-level integration tests.
//!
//! Each harness builds the full router over a fresh in-memory store, so tests
//! are isolated from one another and need no external services.

use std::sync::Arc;

use axum::Router;
use notes_core::kernel::{BaseNoteStore, InMemoryNoteStore, ServerDeps, TestDependencies};
use notes_core::server::build_app;

use super::ApiClient;

pub struct TestHarness {
    /// Backing store - use this to seed or inspect notes directly.
    pub store: Arc<InMemoryNoteStore>,
    app: Router,
}

impl TestHarness {
    pub fn new() -> Self {
        // Respect RUST_LOG when debugging: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let test_deps = TestDependencies::new();
        let app = build_app(test_deps.server_deps(), None);

        Self {
            store: test_deps.note_store,
            app,
        }
    }

    /// Harness over an arbitrary store (e.g. one that always fails)
    pub fn with_store(note_store: Arc<dyn BaseNoteStore>) -> Self {
        Self {
            store: Arc::new(InMemoryNoteStore::new()),
            app: build_app(ServerDeps::new(note_store), None),
        }
    }

    /// Harness with a CORS allow-list
    pub fn with_allowed_origins(origins: &[&str]) -> Self {
        let test_deps = TestDependencies::new();
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();

        Self {
            app: build_app(test_deps.server_deps(), Some(origins.as_slice())),
            store: test_deps.note_store,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.app.clone())
    }
}
