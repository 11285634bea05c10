//! LwfManager - HTTP client for the lwfm middleware
//!
//! The middleware holds job statuses, workflows and event handlers. Sites
//! report every status transition through [`LwfManager::emit_status`].

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::MiddlewareConfig;
use crate::error::{LwfmError, LwfmResult};
use crate::job::JobStatus;
use crate::workflow::Workflow;

/// Client for the lwfm middleware REST endpoint
#[derive(Debug, Clone)]
pub struct LwfManager {
    client: Client,
    base_url: String,
}

impl LwfManager {
    pub fn new(config: &MiddlewareConfig) -> LwfmResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("lwfm-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Whether the middleware answers on `/isRunning`
    pub async fn is_running(&self) -> bool {
        match self.client.get(self.url("/isRunning")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("lwfm middleware not reachable at {}: {}", self.base_url, e);
                false
            }
        }
    }

    /// Record a job status transition
    pub async fn emit_status(&self, status: &JobStatus) -> LwfmResult<()> {
        tracing::debug!(
            job_id = %status.job_id(),
            status = %status.status,
            "Emitting job status"
        );

        let response = self
            .client
            .post(self.url("/emitStatus"))
            .json(status)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }

    /// Latest known status for a job
    pub async fn get_status(&self, job_id: &str) -> LwfmResult<Option<JobStatus>> {
        let response = self
            .client
            .get(self.url(&format!("/status/{}", job_id)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        json_body(response).await.map(Some)
    }

    /// Persist a workflow record
    pub async fn put_workflow(&self, workflow: &Workflow) -> LwfmResult<()> {
        let response = self
            .client
            .post(self.url("/workflow"))
            .json(workflow)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }

    /// Fetch a persisted workflow record
    pub async fn get_workflow(&self, workflow_id: &str) -> LwfmResult<Option<Workflow>> {
        let response = self
            .client
            .get(self.url(&format!("/workflow/{}", workflow_id)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        json_body(response).await.map(Some)
    }
}

async fn check(response: Response) -> LwfmResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(LwfmError::Middleware { status, body })
}

async fn json_body<T: DeserializeOwned>(response: Response) -> LwfmResult<T> {
    let response = check(response).await?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
