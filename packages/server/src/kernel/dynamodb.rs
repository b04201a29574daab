//! DynamoDB note store.
//!
//! Table schema:
//! - PK: `userId` (String)
//! - SK: `noteId` (String)
//! - attributes: `content`, `createdAt`, `updatedAt` (String)

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, DeleteRequest, KeySchemaElement, KeyType,
    ReturnValue, ScalarAttributeType, TableStatus, WriteRequest,
};
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, from_items, to_item};
use tracing::{debug, info};

use crate::config::Config;
use crate::domains::notes::models::note::{NOTE_ID_ATTR, USER_ID_ATTR};
use crate::domains::notes::models::{Note, NoteKey};
use crate::kernel::BaseNoteStore;

/// `BatchWriteItem` accepts at most 25 requests per call
const BATCH_WRITE_LIMIT: usize = 25;

const TABLE_ACTIVE_POLL_INTERVAL: Duration = Duration::from_millis(500);
const TABLE_ACTIVE_MAX_POLLS: u32 = 120;

/// Backoff applied when `BatchWriteItem` hands back unprocessed requests.
#[derive(Debug, Clone, Copy)]
struct BatchRetry {
    base_delay: Duration,
    max_delay: Duration,
    max_retries: u32,
}

impl Default for BatchRetry {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(2),
            max_retries: 8,
        }
    }
}

impl BatchRetry {
    /// Doubles per consecutive retry, capped at `max_delay`.
    fn delay(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
            .min(self.max_delay)
    }
}

/// Send `pending` in chunks of at most 25, requeueing whatever `send` reports
/// as unprocessed and sleeping between throttled rounds.
async fn write_in_batches<T, F, Fut>(
    mut pending: Vec<T>,
    retry: BatchRetry,
    mut send: F,
) -> Result<()>
where
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut retries = 0;

    while !pending.is_empty() {
        let this_batch: Vec<T> = pending
            .drain(..pending.len().min(BATCH_WRITE_LIMIT))
            .collect();

        let unprocessed = send(this_batch).await?;
        if unprocessed.is_empty() {
            retries = 0;
            continue;
        }

        if retries >= retry.max_retries {
            bail!(
                "{} batch writes still unprocessed after {} retries",
                unprocessed.len() + pending.len(),
                retries
            );
        }

        let delay = retry.delay(retries);
        retries += 1;
        debug!(
            count = unprocessed.len(),
            retry = retries,
            delay_ms = delay.as_millis() as u64,
            "Resubmitting unprocessed batch writes"
        );
        pending.extend(unprocessed);
        tokio::time::sleep(delay).await;
    }

    Ok(())
}

/// DynamoDB implementation of BaseNoteStore.
pub struct DynamoNoteStore {
    client: Client,
    table_name: String,
}

impl DynamoNoteStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from region, optional static credentials and optional endpoint override.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()));

        if let (Some(access_key), Some(secret_key)) =
            (&config.aws_access_key_id, &config.aws_secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "notes-config",
            ));
        }

        let sdk_config = loader.load().await;

        let client = if let Some(endpoint) = &config.dynamodb_endpoint_url {
            let dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config)
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamo_config)
        } else {
            Client::new(&sdk_config)
        };

        info!(table = %config.table_name, region = %config.aws_region, "Connected to DynamoDB for notes");

        Self::new(client, config.table_name.clone())
    }

    /// Create the notes table if it does not exist, then wait until it is active.
    pub async fn ensure_table(&self) -> Result<()> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(_) => {
                debug!(table = %self.table_name, "Notes table already exists");
                return Ok(());
            }
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(DescribeTableError::is_resource_not_found_exception) => {}
            Err(err) => {
                return Err(anyhow::Error::new(err).context("DescribeTable failed"));
            }
        }

        info!(table = %self.table_name, "Creating notes table");

        self.client
            .create_table()
            .table_name(&self.table_name)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(USER_ID_ATTR)
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(NOTE_ID_ATTR)
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(USER_ID_ATTR)
                    .key_type(KeyType::Hash)
                    .build()?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(NOTE_ID_ATTR)
                    .key_type(KeyType::Range)
                    .build()?,
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .context("CreateTable failed")?;

        for _ in 0..TABLE_ACTIVE_MAX_POLLS {
            let output = self
                .client
                .describe_table()
                .table_name(&self.table_name)
                .send()
                .await
                .context("DescribeTable failed")?;

            if output.table().and_then(|t| t.table_status()) == Some(&TableStatus::Active) {
                info!(table = %self.table_name, "Notes table is active");
                return Ok(());
            }

            tokio::time::sleep(TABLE_ACTIVE_POLL_INTERVAL).await;
        }

        Err(anyhow!(
            "Table {} did not become active in time",
            self.table_name
        ))
    }

    /// One `BatchWriteItem` call; returns the requests the service did not process.
    async fn send_batch_write(&self, requests: Vec<WriteRequest>) -> Result<Vec<WriteRequest>> {
        let output = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, requests)
            .send()
            .await
            .context("BatchWriteItem failed")?;

        Ok(output
            .unprocessed_items
            .and_then(|mut items| items.remove(&self.table_name))
            .unwrap_or_default())
    }

    fn key_attr(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }
}

#[async_trait]
impl BaseNoteStore for DynamoNoteStore {
    async fn put_note(&self, note: &Note) -> Result<()> {
        let item: HashMap<String, AttributeValue> =
            to_item(note).context("Failed to serialize note")?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .context("PutItem failed")?;

        Ok(())
    }

    async fn get_note(&self, user_id: &str, note_id: &str) -> Result<Option<Note>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(USER_ID_ATTR, Self::key_attr(user_id))
            .key(NOTE_ID_ATTR, Self::key_attr(note_id))
            .send()
            .await
            .context("GetItem failed")?;

        match output.item {
            Some(item) => {
                let note: Note = from_item(item).context("Failed to deserialize note")?;
                Ok(Some(note))
            }
            None => Ok(None),
        }
    }

    async fn scan_notes(&self) -> Result<Vec<Note>> {
        // Consume every page; the scan is deliberately unbounded.
        let items: Vec<HashMap<String, AttributeValue>> = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .context("Scan failed")?;

        let notes: Vec<Note> = from_items(items).context("Failed to deserialize notes")?;
        debug!(table = %self.table_name, count = notes.len(), "Scanned notes table");
        Ok(notes)
    }

    async fn query_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        let items: Vec<HashMap<String, AttributeValue>> = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#uid = :uid")
            .expression_attribute_names("#uid", USER_ID_ATTR)
            .expression_attribute_values(":uid", Self::key_attr(user_id))
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .context("Query failed")?;

        let notes: Vec<Note> = from_items(items).context("Failed to deserialize notes")?;
        Ok(notes)
    }

    async fn update_note_content(
        &self,
        user_id: &str,
        note_id: &str,
        content: &str,
        updated_at: &str,
    ) -> Result<Option<Note>> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(USER_ID_ATTR, Self::key_attr(user_id))
            .key(NOTE_ID_ATTR, Self::key_attr(note_id))
            .update_expression("SET #content = :content, #updatedAt = :updatedAt")
            .condition_expression("attribute_exists(#uid) AND attribute_exists(#nid)")
            .expression_attribute_names("#uid", USER_ID_ATTR)
            .expression_attribute_names("#nid", NOTE_ID_ATTR)
            .expression_attribute_names("#content", "content")
            .expression_attribute_names("#updatedAt", "updatedAt")
            .expression_attribute_values(":content", AttributeValue::S(content.to_string()))
            .expression_attribute_values(":updatedAt", AttributeValue::S(updated_at.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                let attributes = output
                    .attributes
                    .context("UpdateItem returned no attributes")?;
                let note: Note = from_item(attributes).context("Failed to deserialize note")?;
                Ok(Some(note))
            }
            // The condition failing means there was no item to update.
            Err(SdkError::ServiceError(ref inner))
                if matches!(
                    inner.err(),
                    UpdateItemError::ConditionalCheckFailedException(_)
                ) =>
            {
                debug!(user_id = %user_id, note_id = %note_id, "Update target does not exist");
                Ok(None)
            }
            Err(err) => Err(anyhow::Error::new(err).context("UpdateItem failed")),
        }
    }

    async fn delete_note(&self, user_id: &str, note_id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(USER_ID_ATTR, Self::key_attr(user_id))
            .key(NOTE_ID_ATTR, Self::key_attr(note_id))
            .send()
            .await
            .context("DeleteItem failed")?;

        Ok(())
    }

    async fn batch_delete_notes(&self, keys: &[NoteKey]) -> Result<()> {
        let write_reqs = keys
            .iter()
            .map(|key| {
                DeleteRequest::builder()
                    .key(USER_ID_ATTR, Self::key_attr(&key.user_id))
                    .key(NOTE_ID_ATTR, Self::key_attr(&key.note_id))
                    .build()
                    .map(|delete| WriteRequest::builder().delete_request(delete).build())
            })
            .collect::<Result<Vec<WriteRequest>, _>>()
            .context("Failed to build delete requests")?;

        // Each chunk is independent: a failure part-way leaves earlier chunks applied.
        write_in_batches(write_reqs, BatchRetry::default(), |this_batch| {
            self.send_batch_write(this_batch)
        })
        .await
    }
}
