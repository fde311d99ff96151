//! PostgrestRecordRepository - REST implementation of `RecordRepository`.
//!
//! Talks to the PostgREST endpoint that a Supabase project exposes under
//! `{url}/rest/v1/{table}`. Only the four calls the list needs are issued:
//!
//! | Operation | Request |
//! |---|---|
//! | list-all | `GET ?select=*` |
//! | insert-one | `POST` body `[{fullname, gender}]` |
//! | update-by-key | `PATCH ?id=eq.{id}` body `{fullname, gender}` |
//! | delete-by-key | `DELETE ?id=eq.{id}` |

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use userlist_core::config::BackendConfig;
use userlist_core::error::{Result, UserListError};
use userlist_core::record::{Record, RecordFields, RecordId, RecordRepository};

const MAX_ERROR_BODY_CHARS: usize = 500;
const PREFER_REPRESENTATION: &str = "return=representation";

/// Record repository backed by a PostgREST table.
#[derive(Clone)]
pub struct PostgrestRecordRepository {
    client: Client,
    endpoint: String,
    anon_key: String,
}

impl PostgrestRecordRepository {
    /// Creates a repository for the configured table.
    ///
    /// # Errors
    ///
    /// Returns `UserListError::Config` if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UserListError::config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "[PostgrestRepository] Initialized for table '{}' at {}",
            config.table,
            config.url
        );

        Ok(Self {
            client,
            endpoint: config.table_endpoint(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Adds the API key headers every call needs.
    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    fn list_request(&self) -> RequestBuilder {
        self.auth_request(self.client.get(&self.endpoint))
            .query(&[("select", "*")])
    }

    fn insert_request(&self, fields: &RecordFields) -> RequestBuilder {
        self.auth_request(self.client.post(&self.endpoint))
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&[fields])
    }

    fn update_request(&self, id: &RecordId, fields: &RecordFields) -> RequestBuilder {
        self.auth_request(self.client.patch(&self.endpoint))
            .query(&[("id", key_filter(id))])
            .header("Prefer", PREFER_REPRESENTATION)
            .json(fields)
    }

    fn delete_request(&self, id: &RecordId) -> RequestBuilder {
        self.auth_request(self.client.delete(&self.endpoint))
            .query(&[("id", key_filter(id))])
    }

    async fn send(&self, request: RequestBuilder, operation: &'static str) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| UserListError::remote(operation, describe_transport_error(&e)))?;
        read_body(response, operation).await
    }

    fn parse_rows(body: &str, operation: &'static str) -> Result<Vec<Record>> {
        // `return=minimal` deployments answer 2xx with an empty body
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(body).map_err(|e| {
            UserListError::remote(operation, format!("unexpected response format: {}", e))
        })
    }
}

#[async_trait]
impl RecordRepository for PostgrestRecordRepository {
    async fn list_all(&self) -> Result<Vec<Record>> {
        tracing::debug!("[PostgrestRepository] GET {}", self.endpoint);
        let body = self.send(self.list_request(), "list").await?;
        let rows = Self::parse_rows(&body, "list")?;
        tracing::debug!("[PostgrestRepository] Fetched {} rows", rows.len());
        Ok(rows)
    }

    async fn insert(&self, fields: &RecordFields) -> Result<Vec<Record>> {
        tracing::debug!("[PostgrestRepository] POST {}", self.endpoint);
        let body = self.send(self.insert_request(fields), "insert").await?;
        Self::parse_rows(&body, "insert")
    }

    async fn update(&self, id: &RecordId, fields: &RecordFields) -> Result<Vec<Record>> {
        tracing::debug!("[PostgrestRepository] PATCH {} id={}", self.endpoint, id);
        let body = self.send(self.update_request(id, fields), "update").await?;
        Self::parse_rows(&body, "update")
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        tracing::debug!("[PostgrestRepository] DELETE {} id={}", self.endpoint, id);
        self.send(self.delete_request(id), "delete").await?;
        Ok(())
    }
}

/// PostgREST equality filter value for a key, e.g. `eq.42`.
fn key_filter(id: &RecordId) -> String {
    format!("eq.{}", id)
}

/// Reads the body and turns non-2xx statuses into `RemoteRequest` errors.
async fn read_body(response: Response, operation: &'static str) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        UserListError::remote(operation, format!("failed to read response body: {}", e))
    })?;

    if !status.is_success() {
        return Err(UserListError::remote(
            operation,
            format!("HTTP {}: {}", status.as_u16(), truncate(&body)),
        ));
    }

    Ok(body)
}

fn truncate(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}... (truncated)", head)
    } else {
        body.to_string()
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timeout - request took too long: {}", e)
    } else if e.is_connect() {
        format!("connection error - check network connectivity: {}", e)
    } else if e.is_decode() {
        format!("decode error - unexpected response from server: {}", e)
    } else {
        e.to_string()
    }
}
