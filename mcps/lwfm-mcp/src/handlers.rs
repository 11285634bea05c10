//! Tool handlers
//!
//! Each handler forwards to the lwfm object model and hands back whatever
//! the library produced. Library errors are not caught here.

use lwfm::{JobDefn, JobStatus, LwfmError, LwfmResult, SiteRegistry, Workflow, LOCAL_SITE};
use mcp_common::{internal_error, invalid_params, McpError};

use crate::params::{InitiateWorkflowParams, RunWorkflowParams};

/// Convert a library error to an MCP error, keeping its message
pub fn lwfm_error_to_mcp(err: LwfmError) -> McpError {
    match &err {
        LwfmError::InvalidJobDefn(_) => invalid_params(err.to_string()),
        _ => internal_error(err.to_string()),
    }
}

/// Build a workflow from the tool parameters
pub fn initiate_workflow(params: InitiateWorkflowParams) -> Workflow {
    let mut workflow = Workflow::new(Some(params.name), params.description);
    workflow.set_props(params.metadata);

    tracing::info!(
        workflow_id = %workflow.workflow_id(),
        name = ?workflow.name(),
        props = workflow.props().len(),
        "Initiated workflow"
    );

    workflow
}

/// Log in to the Local site and submit the job, returning its initial status
pub async fn run_workflow(sites: &SiteRegistry, params: RunWorkflowParams) -> LwfmResult<JobStatus> {
    let site = sites.get_site(LOCAL_SITE)?;
    site.auth_driver().login(false).await?;

    let mut job_defn = JobDefn::new(params.entry_point);
    job_defn.set_job_args(params.job_args);

    let status = site.run_driver().submit(&job_defn, None).await?;

    tracing::info!(
        job_id = %status.job_id(),
        status = %status.status,
        "Submitted job to {}",
        site.name()
    );

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_initiate_sets_everything() {
        let mut metadata = HashMap::new();
        metadata.insert("project".to_string(), serde_json::json!("qc-42"));

        let workflow = initiate_workflow(InitiateWorkflowParams {
            name: "Q1".to_string(),
            description: Some("simulate a 2-qubit circuit".to_string()),
            metadata: Some(metadata.clone()),
        });

        assert!(!workflow.workflow_id().is_empty());
        assert_eq!(workflow.name(), Some("Q1"));
        assert_eq!(workflow.description(), Some("simulate a 2-qubit circuit"));
        assert_eq!(workflow.props(), &metadata);
    }

    #[test]
    fn test_error_mapping_keeps_message() {
        let err = lwfm_error_to_mcp(LwfmError::SiteNotFound("local".to_string()));
        assert_eq!(err.message, "Site not found: local");
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);

        let err = lwfm_error_to_mcp(LwfmError::InvalidJobDefn("empty".to_string()));
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_run_without_local_site() {
        let result = run_workflow(
            &SiteRegistry::new(),
            RunWorkflowParams {
                entry_point: "echo".to_string(),
                job_args: None,
            },
        )
        .await;

        assert!(matches!(result, Err(LwfmError::SiteNotFound(_))));
    }
}
