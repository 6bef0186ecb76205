//! Jira Cloud REST client
//!
//! Implements the collaborator traits over reqwest. Credentials and base URL
//! come from an injected [`JiraConfig`]; the client never reads the
//! environment itself.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::JiraErrorMapper;
use super::models::{BulkMovePayload, BulkTaskResponse, SearchIdsResponse, SubmittedTaskResponse};
use crate::config::{JiraConfig, Validate};
use crate::core::bulk::{BulkMoveRequest, BulkTask};
use crate::core::traits::{BulkBackend, RecordFetcher, SearchBackend};
use crate::core::types::{Record, RecordId, SearchPage, TaskId};
use crate::utils::error::{JiraError, Result};

const ISSUE_PATH: [&str; 4] = ["rest", "api", "3", "issue"];
const SEARCH_PATH: [&str; 5] = ["rest", "api", "3", "search", "jql"];
const BULK_MOVE_PATH: [&str; 6] = ["rest", "api", "3", "bulk", "issues", "move"];
const BULK_TASK_PATH: [&str; 5] = ["rest", "api", "3", "bulk", "tasks"];

/// Idle connections kept per host; sized for the default batch concurrency
const POOL_IDLE_PER_HOST: usize = 16;
const KEEPALIVE_SECS: u64 = 90;

#[derive(Debug, Clone)]
pub struct JiraClient {
    config: JiraConfig,
    base_url: Url,
    http: Client,
    error_mapper: JiraErrorMapper,
}

impl JiraClient {
    /// Validate `config` and build the underlying HTTP client
    pub fn new(config: JiraConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| JiraError::Config(format!("Invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(JiraError::Config(format!(
                "Base URL cannot carry paths: {}",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .pool_idle_timeout(Duration::from_secs(KEEPALIVE_SECS))
            .pool_max_idle_per_host(POOL_IDLE_PER_HOST)
            .default_headers(Self::default_headers(&config)?)
            .user_agent(concat!("jira-batch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JiraError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            http,
            error_mapper: JiraErrorMapper,
        })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    fn default_headers(config: &JiraConfig) -> Result<HeaderMap> {
        let credentials = STANDARD.encode(format!("{}:{}", config.email, config.api_token));
        let mut authorization = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| JiraError::Config(format!("Invalid credentials header: {}", e)))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Base URL joined with percent-encoded path segments
    fn endpoint(&self, path: &[&str], tail: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| JiraError::Config("Base URL cannot carry paths".to_string()))?;
            segments.pop_if_empty().extend(path);
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(self.error_mapper.map_http_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(JiraError::from)
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url = %url, "POST");
        self.send(self.http.post(url).json(body)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        debug!(url = %url, "GET");
        self.send(self.http.get(url).query(query)).await
    }

    /// `GET /rest/api/3/issue/{id}`
    pub async fn get_issue(&self, id: &RecordId) -> Result<Record> {
        if id.is_blank() {
            return Err(JiraError::InvalidArgument("issue id cannot be empty".to_string()));
        }
        let url = self.endpoint(&ISSUE_PATH, Some(id.as_str()))?;
        self.get_json(url, &[]).await
    }

    /// `GET /rest/api/3/search/jql`, returning identifiers only
    pub async fn search_ids(&self, jql: &str, max_results: usize, start_at: usize) -> Result<SearchPage> {
        let url = self.endpoint(&SEARCH_PATH, None)?;
        let query = [
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
            ("startAt", start_at.to_string()),
        ];
        let response: SearchIdsResponse = self.get_json(url, &query).await?;
        Ok(response.into())
    }

    /// `POST /rest/api/3/bulk/issues/move`
    pub async fn bulk_move(&self, request: &BulkMoveRequest) -> Result<TaskId> {
        let url = self.endpoint(&BULK_MOVE_PATH, None)?;
        let payload = BulkMovePayload::from(request);
        let response: SubmittedTaskResponse = self.post_json(url, &payload).await?;
        if response.task_id.is_blank() {
            return Err(JiraError::Serialization(
                "bulk move response carried an empty taskId".to_string(),
            ));
        }
        Ok(response.task_id)
    }

    /// `GET /rest/api/3/bulk/tasks/{taskId}`
    pub async fn bulk_task(&self, task_id: &TaskId) -> Result<BulkTask> {
        let url = self.endpoint(&BULK_TASK_PATH, Some(task_id.as_str()))?;
        let response: BulkTaskResponse = self.get_json(url, &[]).await?;
        BulkTask::try_from(response)
    }
}

#[async_trait]
impl RecordFetcher for JiraClient {
    async fn fetch_one(&self, id: &RecordId) -> Result<Record> {
        self.get_issue(id).await
    }
}

#[async_trait]
impl SearchBackend for JiraClient {
    async fn search(&self, query: &str, page_size: usize, offset: usize) -> Result<SearchPage> {
        self.search_ids(query, page_size, offset).await
    }
}

#[async_trait]
impl BulkBackend for JiraClient {
    async fn submit_bulk(&self, request: &BulkMoveRequest) -> Result<TaskId> {
        self.bulk_move(request).await
    }

    async fn poll_bulk(&self, task_id: &TaskId) -> Result<BulkTask> {
        self.bulk_task(task_id).await
    }
}
