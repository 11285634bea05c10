//! Sites - execution targets with authentication and run drivers
//!
//! A [`Site`] bundles the drivers lwfm uses to talk to one compute target.
//! Only the Local site ships here; remote sites plug in through the same
//! traits and are registered in a [`SiteRegistry`] by name.

mod local;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{LocalSiteConfig, MiddlewareConfig};
use crate::error::{LwfmError, LwfmResult};
use crate::job::{JobContext, JobDefn, JobStatus};
use crate::manager::LwfManager;

pub use local::{LocalAuthDriver, LocalRunDriver, LocalSite, LOCAL_SITE};

/// Authentication against a site
#[async_trait]
pub trait SiteAuthDriver: Send + Sync {
    /// Log in, re-authenticating when `force` is set
    async fn login(&self, force: bool) -> LwfmResult<bool>;

    /// Whether the current credentials are still valid
    fn is_auth_current(&self) -> bool;
}

/// Job execution on a site
#[async_trait]
pub trait SiteRunDriver: Send + Sync {
    /// Submit a job and return its initial (not necessarily terminal) status
    ///
    /// Without a context the job starts a new lineage on this site.
    async fn submit(&self, job_defn: &JobDefn, context: Option<JobContext>)
        -> LwfmResult<JobStatus>;

    /// Latest status the site knows for a job
    async fn get_status(&self, job_id: &str) -> LwfmResult<JobStatus>;

    /// Request cancellation; `false` if the job already finished
    async fn cancel(&self, job_id: &str) -> LwfmResult<bool>;
}

/// An execution target
pub trait Site: Send + Sync {
    fn name(&self) -> &str;

    fn auth_driver(&self) -> &dyn SiteAuthDriver;

    fn run_driver(&self) -> &dyn SiteRunDriver;
}

/// Destination for job status transitions
#[async_trait]
pub trait StatusEmitter: Send + Sync {
    async fn emit(&self, status: &JobStatus) -> LwfmResult<()>;
}

#[async_trait]
impl StatusEmitter for LwfManager {
    async fn emit(&self, status: &JobStatus) -> LwfmResult<()> {
        self.emit_status(status).await
    }
}

// ============================================================================
// Site Registry
// ============================================================================

/// Sites by name
#[derive(Clone, Default)]
pub struct SiteRegistry {
    sites: HashMap<String, Arc<dyn Site>>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self {
            sites: HashMap::new(),
        }
    }

    /// A registry holding the Local site, reporting to the configured middleware
    pub fn with_local(middleware: &MiddlewareConfig, local: LocalSiteConfig) -> LwfmResult<Self> {
        let manager = LwfManager::new(middleware)?;
        let mut registry = Self::new();
        registry.register(Arc::new(LocalSite::new(local, Arc::new(manager))));
        Ok(registry)
    }

    pub fn register(&mut self, site: Arc<dyn Site>) {
        self.sites.insert(site.name().to_string(), site);
    }

    /// Look up a site by name
    pub fn get_site(&self, name: &str) -> LwfmResult<Arc<dyn Site>> {
        self.sites
            .get(name)
            .cloned()
            .ok_or_else(|| LwfmError::SiteNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sites.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for SiteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteRegistry")
            .field("sites", &self.names())
            .finish()
    }
}
