//! Parameter types for lwfm MCP tools and prompts

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InitiateWorkflowParams {
    #[schemars(description = "Name of the new workflow")]
    pub name: String,

    #[schemars(description = "Natural language description of what the workflow intends to do")]
    #[serde(default)]
    pub description: Option<String>,

    #[schemars(description = "Optional metadata stored as workflow properties (e.g. project id)")]
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunWorkflowParams {
    #[schemars(description = "Entry point: any command line to run on the Local site")]
    #[serde(rename = "entryPoint")]
    pub entry_point: String,

    #[schemars(description = "Arguments appended to the entry point")]
    #[serde(rename = "jobArgs", default)]
    pub job_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EndToEndWorkflowArgs {
    #[schemars(description = "Name for the workflow")]
    pub name: String,

    #[schemars(description = "What the workflow should do")]
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_params_use_wire_names() {
        let params: RunWorkflowParams = serde_json::from_value(serde_json::json!({
            "entryPoint": "python",
            "jobArgs": ["circuit.py"]
        }))
        .unwrap();

        assert_eq!(params.entry_point, "python");
        assert_eq!(params.job_args, Some(vec!["circuit.py".to_string()]));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let params: InitiateWorkflowParams =
            serde_json::from_value(serde_json::json!({ "name": "Q1" })).unwrap();

        assert!(params.description.is_none());
        assert!(params.metadata.is_none());

        let run: RunWorkflowParams =
            serde_json::from_value(serde_json::json!({ "entryPoint": "ls" })).unwrap();
        assert!(run.job_args.is_none());
    }

    #[test]
    fn test_name_is_required() {
        let result: Result<InitiateWorkflowParams, _> =
            serde_json::from_value(serde_json::json!({ "description": "x" }));
        assert!(result.is_err());
    }
}
