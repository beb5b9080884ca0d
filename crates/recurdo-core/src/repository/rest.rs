//! Todoist REST v2 implementation of [`Repository`](super::Repository).
//!
//! Tasks reference labels by name in this API, so each [`Label`]'s key is its
//! name.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LabelRepository, TaskRepository};
use crate::error::CoreError;
use crate::models::{Label, NewTaskData, Task, TaskId};

pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

#[derive(Debug, Clone)]
pub struct RestConfig {
    pub api_key: String,
    /// Base URL without a trailing slash, e.g. [`DEFAULT_BASE_URL`].
    pub base_url: String,
}

impl RestConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Deserialize)]
struct RestLabel {
    name: String,
}

#[derive(Serialize)]
struct LabelUpdate<'a> {
    labels: &'a [String],
}

pub struct RestRepository {
    config: RestConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for RestRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestRepository")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl RestRepository {
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, CoreError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;
        Self::check(response).await
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, CoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(CoreError::Api {
            status: status.as_u16(),
            body: error_body(response.text().await),
        })
    }
}

/// Body text for a [`CoreError::Api`], or why it could not be read.
fn error_body(body: reqwest::Result<String>) -> String {
    match body {
        Ok(body) => body,
        Err(e) => format!("<unreadable response body: {e}>"),
    }
}

#[async_trait]
impl LabelRepository for RestRepository {
    async fn list_labels(&self) -> Result<Vec<Label>, CoreError> {
        let labels: Vec<RestLabel> = self.get("labels").await?;
        Ok(labels
            .into_iter()
            .map(|label| Label {
                key: label.name.clone(),
                name: label.name,
            })
            .collect())
    }
}

#[async_trait]
impl TaskRepository for RestRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError> {
        self.get("tasks").await
    }

    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        debug!(content = %data.content, parent_id = ?data.parent_id, due_date = ?data.due_date, "creating task");
        let task: Task = self.post("tasks", &data).await?.json().await?;
        debug!(task_id = %task.id, "created task");
        Ok(task)
    }

    async fn set_labels(&self, id: &TaskId, labels: Vec<String>) -> Result<(), CoreError> {
        debug!(task_id = %id, ?labels, "setting labels");
        self.post(&format!("tasks/{id}"), &LabelUpdate { labels: &labels })
            .await?;
        Ok(())
    }
}
