//! DynamoDB store tests against DynamoDB Local.
//!
//! Needs Docker. Run with: cargo test --test dynamodb_store_tests -- --ignored

use anyhow::{Context, Result};
use notes_core::domains::notes::{Note, NoteKey};
use notes_core::kernel::{BaseNoteStore, DynamoNoteStore};
use notes_core::Config;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::dynamodb_local::DynamoDb;

struct DynamoTestStore {
    store: DynamoNoteStore,
    // Keep the container alive for the duration of the test
    _container: ContainerAsync<DynamoDb>,
}

impl DynamoTestStore {
    async fn start(table_name: &str) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let container = DynamoDb::default()
            .start()
            .await
            .context("Failed to start DynamoDB Local container")?;
        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(8000).await?;
        let endpoint = format!("http://{}:{}", host, port);

        let config = Config::from_lookup(|key| match key {
            "NOTES_TABLE_NAME" => Some(table_name.to_string()),
            "AWS_REGION" => Some("us-west-2".to_string()),
            "AWS_ACCESS_KEY_ID" => Some("local".to_string()),
            "AWS_SECRET_ACCESS_KEY" => Some("local".to_string()),
            "DYNAMODB_ENDPOINT_URL" => Some(endpoint.clone()),
            _ => None,
        })?;

        let store = DynamoNoteStore::from_config(&config).await;
        store.ensure_table().await?;

        Ok(Self {
            store,
            _container: container,
        })
    }
}

fn note(user_id: &str, note_id: &str, content: &str) -> Note {
    Note::new(user_id.to_string(), Some(note_id.to_string()), content.to_string())
}

#[tokio::test]
#[ignore = "requires Docker for DynamoDB Local"]
async fn dynamodb_store_round_trips_notes() -> Result<()> {
    let ctx = DynamoTestStore::start("notes-it").await?;
    let store = &ctx.store;

    // ensure_table is idempotent
    store.ensure_table().await?;

    let first = note("u1", "b", "hello");
    store.put_note(&first).await?;
    store.put_note(&note("u1", "a", "first")).await?;
    store.put_note(&note("u2", "a", "other")).await?;

    assert_eq!(store.get_note("u1", "b").await?, Some(first.clone()));
    assert_eq!(store.get_note("u1", "missing").await?, None);

    let ids: Vec<_> = store
        .query_notes("u1")
        .await?
        .into_iter()
        .map(|n| n.note_id)
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(store.query_notes("nobody").await?.is_empty());
    assert_eq!(store.scan_notes().await?.len(), 3);

    let updated = store
        .update_note_content("u1", "b", "world", "2099-01-01T00:00:00.000000")
        .await?
        .context("existing note should update")?;
    assert_eq!(updated.content, "world");
    assert_eq!(updated.created_at, first.created_at);
    assert_eq!(updated.updated_at.as_deref(), Some("2099-01-01T00:00:00.000000"));

    let missing = store
        .update_note_content("u1", "ghost", "boo", "2099-01-01T00:00:00.000000")
        .await?;
    assert!(missing.is_none());
    assert_eq!(store.get_note("u1", "ghost").await?, None);

    store.delete_note("u1", "a").await?;
    store.delete_note("u1", "never-existed").await?;
    assert_eq!(store.get_note("u1", "a").await?, None);

    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker for DynamoDB Local"]
async fn dynamodb_batch_delete_spans_multiple_batches() -> Result<()> {
    let ctx = DynamoTestStore::start("notes-batch-it").await?;
    let store = &ctx.store;

    let mut keys = Vec::new();
    for i in 0..60 {
        let n = note("bulk", &format!("n{:03}", i), "x");
        keys.push(NoteKey::from(&n));
        store.put_note(&n).await?;
    }
    store.put_note(&note("keep", "a", "y")).await?;

    store.batch_delete_notes(&keys).await?;

    assert!(store.query_notes("bulk").await?.is_empty());
    assert_eq!(store.query_notes("keep").await?.len(), 1);

    Ok(())
}
