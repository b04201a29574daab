use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Which note store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub table_name: String,
    pub aws_region: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub dynamodb_endpoint_url: Option<String>,
    /// `None` mirrors any request origin
    pub allowed_origins: Option<Vec<String>>,
    pub create_table_if_missing: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("NOTES_STORE").as_deref() {
            None | Some("dynamodb") => StoreBackend::DynamoDb,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("NOTES_STORE must be 'dynamodb' or 'memory', got '{}'", other),
        };

        let table_name = match store_backend {
            StoreBackend::DynamoDb => {
                lookup("NOTES_TABLE_NAME").context("NOTES_TABLE_NAME must be set")?
            }
            StoreBackend::Memory => {
                lookup("NOTES_TABLE_NAME").unwrap_or_else(|| "notes".to_string())
            }
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty());

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            store_backend,
            table_name,
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            aws_access_key_id: lookup("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: lookup("AWS_SECRET_ACCESS_KEY"),
            dynamodb_endpoint_url: lookup("DYNAMODB_ENDPOINT_URL"),
            allowed_origins,
            create_table_if_missing: lookup("CREATE_TABLE_IF_MISSING")
                .map(|value| parse_flag(&value))
                .transpose()
                .context("CREATE_TABLE_IF_MISSING must be a boolean")?
                .unwrap_or(false),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("invalid boolean '{}'", other),
    }
}
