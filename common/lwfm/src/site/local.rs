//! The Local site - runs entry points as child processes on this machine

use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::{oneshot, Mutex};

use super::{Site, SiteAuthDriver, SiteRunDriver, StatusEmitter};
use crate::config::LocalSiteConfig;
use crate::error::{LwfmError, LwfmResult};
use crate::job::{JobContext, JobDefn, JobStatus, JobStatusValue};

/// Registry name of the Local site
pub const LOCAL_SITE: &str = "local";

/// The Local site
pub struct LocalSite {
    auth: LocalAuthDriver,
    run: LocalRunDriver,
}

impl LocalSite {
    pub fn new(config: LocalSiteConfig, emitter: Arc<dyn StatusEmitter>) -> Self {
        Self {
            auth: LocalAuthDriver,
            run: LocalRunDriver::new(config, emitter),
        }
    }
}

impl Site for LocalSite {
    fn name(&self) -> &str {
        LOCAL_SITE
    }

    fn auth_driver(&self) -> &dyn SiteAuthDriver {
        &self.auth
    }

    fn run_driver(&self) -> &dyn SiteRunDriver {
        &self.run
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Local jobs run as the current user, so login always succeeds
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalAuthDriver;

#[async_trait]
impl SiteAuthDriver for LocalAuthDriver {
    async fn login(&self, _force: bool) -> LwfmResult<bool> {
        Ok(true)
    }

    fn is_auth_current(&self) -> bool {
        true
    }
}

// ============================================================================
// Run
// ============================================================================

#[derive(Default)]
struct JobTable {
    /// Latest status per job id
    statuses: HashMap<String, JobStatus>,
    /// Cancellation handles for jobs still running
    cancels: HashMap<String, oneshot::Sender<()>>,
}

/// Spawns each job through the configured shell and watches it to completion
pub struct LocalRunDriver {
    config: LocalSiteConfig,
    emitter: Arc<dyn StatusEmitter>,
    jobs: Arc<Mutex<JobTable>>,
}

impl LocalRunDriver {
    pub fn new(config: LocalSiteConfig, emitter: Arc<dyn StatusEmitter>) -> Self {
        Self {
            config,
            emitter,
            jobs: Arc::new(Mutex::new(JobTable::default())),
        }
    }

    /// Record a status locally, then report it
    async fn transition(&self, status: JobStatus) -> LwfmResult<JobStatus> {
        record(&self.jobs, &status).await;
        self.emitter.emit(&status).await?;
        Ok(status)
    }

    fn command(&self, job_defn: &JobDefn) -> Command {
        let mut cmd = Command::new(&self.config.shell);
        cmd.arg(self.config.command_flag())
            .arg(job_defn.command_line())
            .stdin(Stdio::null())
            // stdout belongs to whoever embeds us (the MCP transport), so job
            // output goes to stderr alongside our logs
            .stdout(Stdio::from(std::io::stderr()))
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

async fn record(jobs: &Mutex<JobTable>, status: &JobStatus) {
    jobs.lock()
        .await
        .statuses
        .insert(status.job_id().to_string(), status.clone());
}

#[async_trait]
impl SiteRunDriver for LocalRunDriver {
    async fn submit(
        &self,
        job_defn: &JobDefn,
        context: Option<JobContext>,
    ) -> LwfmResult<JobStatus> {
        if job_defn.entry_point.trim().is_empty() {
            return Err(LwfmError::InvalidJobDefn(
                "entry point must not be empty".to_string(),
            ));
        }

        let mut context = context.unwrap_or_else(|| JobContext::new(LOCAL_SITE));
        context.site_name = LOCAL_SITE.to_string();
        if context.name.is_none() {
            context.name = job_defn.name.clone();
        }

        tracing::info!(
            job_id = %context.job_id,
            command = %job_defn.command_line(),
            "Submitting local job"
        );

        self.transition(JobStatus::new(context.clone(), JobStatusValue::Ready))
            .await?;

        let mut child = match self.command(job_defn).spawn() {
            Ok(child) => child,
            Err(e) => {
                let failed = JobStatus::new(context, JobStatusValue::Failed)
                    .with_native_info(format!("spawn failed: {}", e));
                if let Err(emit_err) = self.transition(failed).await {
                    tracing::warn!("Failed to report spawn failure: {}", emit_err);
                }
                return Err(LwfmError::Io(e));
            }
        };

        let running = match self
            .transition(JobStatus::new(context.clone(), JobStatusValue::Running))
            .await
        {
            Ok(running) => running,
            Err(e) => {
                // Nobody will watch this child, so it must not outlive the submit
                if let Err(kill_err) = child.kill().await {
                    tracing::warn!("Failed to kill unreported job: {}", kill_err);
                }
                let failed = JobStatus::new(context, JobStatusValue::Failed)
                    .with_native_info(format!("status report failed: {}", e));
                record(&self.jobs, &failed).await;
                return Err(e);
            }
        };

        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.jobs
            .lock()
            .await
            .cancels
            .insert(context.job_id.clone(), cancel_tx);

        let jobs = Arc::clone(&self.jobs);
        let emitter = Arc::clone(&self.emitter);
        tokio::spawn(async move {
            let exit = tokio::select! {
                exit = child.wait() => Some(exit),
                _ = cancel_rx => None,
            };

            let terminal = match exit {
                Some(Ok(code)) if code.success() => {
                    JobStatus::new(context, JobStatusValue::Complete)
                }
                Some(Ok(code)) => JobStatus::new(context, JobStatusValue::Failed)
                    .with_native_info(format!("exit status {}", code)),
                Some(Err(e)) => JobStatus::new(context, JobStatusValue::Failed)
                    .with_native_info(format!("wait failed: {}", e)),
                None => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!("Failed to kill cancelled job: {}", e);
                    }
                    JobStatus::new(context, JobStatusValue::Cancelled)
                }
            };

            tracing::info!(
                job_id = %terminal.job_id(),
                status = %terminal.status,
                "Local job finished"
            );

            {
                let mut table = jobs.lock().await;
                table.cancels.remove(terminal.job_id());
                table
                    .statuses
                    .insert(terminal.job_id().to_string(), terminal.clone());
            }

            if let Err(e) = emitter.emit(&terminal).await {
                tracing::warn!(
                    job_id = %terminal.job_id(),
                    "Failed to emit terminal status: {}",
                    e
                );
            }
        });

        Ok(running)
    }

    async fn get_status(&self, job_id: &str) -> LwfmResult<JobStatus> {
        self.jobs
            .lock()
            .await
            .statuses
            .get(job_id)
            .cloned()
            .ok_or_else(|| LwfmError::JobNotFound(job_id.to_string()))
    }

    async fn cancel(&self, job_id: &str) -> LwfmResult<bool> {
        let mut table = self.jobs.lock().await;

        if let Some(cancel) = table.cancels.remove(job_id) {
            // The watcher may have finished between lookup and send
            return Ok(cancel.send(()).is_ok());
        }

        if table.statuses.contains_key(job_id) {
            Ok(false)
        } else {
            Err(LwfmError::JobNotFound(job_id.to_string()))
        }
    }
}
