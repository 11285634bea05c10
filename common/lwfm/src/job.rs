//! Job definitions, contexts and statuses

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Job Definition
// ============================================================================

/// What to run: an entry point command line plus its arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDefn {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "entryPoint")]
    pub entry_point: String,
    #[serde(rename = "jobArgs", default)]
    pub job_args: Vec<String>,
}

impl JobDefn {
    pub fn new(entry_point: impl Into<String>) -> Self {
        Self {
            name: None,
            entry_point: entry_point.into(),
            job_args: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the argument list (`None` means no arguments)
    pub fn set_job_args(&mut self, args: Option<Vec<String>>) {
        self.job_args = args.unwrap_or_default();
    }

    /// The full command line: entry point followed by the arguments
    pub fn command_line(&self) -> String {
        let mut line = self.entry_point.clone();
        for arg in &self.job_args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

// ============================================================================
// Job Context
// ============================================================================

/// Identity of a job run: which job, under which workflow, on which site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobContext {
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "parentJobId", default)]
    pub parent_job_id: Option<String>,
    #[serde(rename = "workflowId", default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "siteName")]
    pub site_name: String,
}

impl JobContext {
    /// A seminal context on `site_name` with a fresh job id
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            job_id: uuid::Uuid::new_v4().to_string(),
            parent_job_id: None,
            workflow_id: None,
            name: None,
            site_name: site_name.into(),
        }
    }

    pub fn with_workflow(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    /// A child context of this job, sharing its workflow
    pub fn child(&self, site_name: impl Into<String>) -> Self {
        Self {
            job_id: uuid::Uuid::new_v4().to_string(),
            parent_job_id: Some(self.job_id.clone()),
            workflow_id: self.workflow_id.clone(),
            name: None,
            site_name: site_name.into(),
        }
    }
}

// ============================================================================
// Job Status
// ============================================================================

/// Canonical lwfm job states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatusValue {
    Unknown,
    Ready,
    Pending,
    Running,
    Info,
    Finishing,
    Complete,
    Failed,
    Cancelled,
}

impl JobStatusValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Ready => "READY",
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Info => "INFO",
            Self::Finishing => "FINISHING",
            Self::Complete => "COMPLETE",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for JobStatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status report for one job, as emitted to and read from the middleware
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    #[serde(rename = "jobContext")]
    pub context: JobContext,
    pub status: JobStatusValue,
    /// The site's own name for the state, before mapping
    #[serde(rename = "nativeStatus")]
    pub native_status: String,
    #[serde(rename = "emitTime")]
    pub emit_time: DateTime<Utc>,
    #[serde(rename = "nativeInfo", default)]
    pub native_info: Option<String>,
}

impl JobStatus {
    pub fn new(context: JobContext, status: JobStatusValue) -> Self {
        Self {
            context,
            status,
            native_status: status.as_str().to_string(),
            emit_time: Utc::now(),
            native_info: None,
        }
    }

    pub fn with_native_info(mut self, info: impl Into<String>) -> Self {
        self.native_info = Some(info.into());
        self
    }

    /// The status label, e.g. `"RUNNING"`
    pub fn get_status(&self) -> &'static str {
        self.status.as_str()
    }

    pub fn job_id(&self) -> &str {
        &self.context.job_id
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
