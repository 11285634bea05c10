//! lwfm - workflow object model client
//!
//! Rust side of the lwfm ("local workflow manager") model:
//!
//! - [`Workflow`] - named, described unit of work with free-form properties
//! - [`JobDefn`] / [`JobContext`] / [`JobStatus`] - what to run, which run it is, where it stands
//! - [`Site`] - an execution target exposing [`SiteAuthDriver`] and [`SiteRunDriver`]
//! - [`LocalSite`] - runs jobs as child processes and reports transitions
//! - [`LwfManager`] - HTTP client for the lwfm middleware
//!
//! # Example
//!
//! ```rust,ignore
//! use lwfm::{JobDefn, LocalSiteConfig, MiddlewareConfig, SiteRegistry};
//!
//! let sites = SiteRegistry::with_local(&MiddlewareConfig::default(), LocalSiteConfig::default())?;
//! let site = sites.get_site("local")?;
//! site.auth_driver().login(false).await?;
//!
//! let mut defn = JobDefn::new("python");
//! defn.set_job_args(Some(vec!["circuit.py".into()]));
//! let status = site.run_driver().submit(&defn, None).await?;
//! println!("{}", status.get_status());
//! ```

pub mod config;
pub mod error;
pub mod job;
pub mod manager;
pub mod site;
pub mod workflow;

pub use config::{LocalSiteConfig, MiddlewareConfig};
pub use error::{LwfmError, LwfmResult};
pub use job::{JobContext, JobDefn, JobStatus, JobStatusValue};
pub use manager::LwfManager;
pub use site::{
    LocalAuthDriver, LocalRunDriver, LocalSite, Site, SiteAuthDriver, SiteRegistry,
    SiteRunDriver, StatusEmitter, LOCAL_SITE,
};
pub use workflow::Workflow;
