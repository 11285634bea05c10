//! Workflow - a named, described unit of work tracked by lwfm

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A workflow record
///
/// Jobs submitted under a workflow carry its id in their [`JobContext`](crate::JobContext),
/// which is how the middleware groups them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(rename = "workflowId")]
    workflow_id: String,
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    props: HashMap<String, Value>,
}

impl Workflow {
    /// Create a workflow with a freshly generated id
    pub fn new(name: Option<String>, description: Option<String>) -> Self {
        Self {
            workflow_id: uuid::Uuid::new_v4().to_string(),
            name,
            description,
            props: HashMap::new(),
        }
    }

    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Replace the workflow properties
    ///
    /// `None` clears them; `Some(map)` stores exactly `map`.
    pub fn set_props(&mut self, props: Option<HashMap<String, Value>>) {
        self.props = props.unwrap_or_default();
    }

    pub fn props(&self) -> &HashMap<String, Value> {
        &self.props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let a = Workflow::new(Some("a".to_string()), None);
        let b = Workflow::new(Some("a".to_string()), None);

        assert!(!a.workflow_id().is_empty());
        assert_ne!(a.workflow_id(), b.workflow_id());
    }

    #[test]
    fn test_set_props_reports_back_exactly() {
        let mut wf = Workflow::new(Some("Q1".to_string()), Some("bell state".to_string()));

        let mut props = HashMap::new();
        props.insert("project".to_string(), serde_json::json!("qc-42"));
        props.insert("shots".to_string(), serde_json::json!(1024));
        wf.set_props(Some(props.clone()));

        assert_eq!(wf.props(), &props);
        assert_eq!(wf.name(), Some("Q1"));
        assert_eq!(wf.description(), Some("bell state"));
    }

    #[test]
    fn test_set_props_none_clears() {
        let mut wf = Workflow::new(None, None);
        let mut props = HashMap::new();
        props.insert("k".to_string(), serde_json::json!("v"));
        wf.set_props(Some(props));

        wf.set_props(None);
        assert!(wf.props().is_empty());
    }

    #[test]
    fn test_serializes_with_wire_field_names() {
        let wf = Workflow::new(Some("wf".to_string()), None);
        let json = serde_json::to_value(&wf).unwrap();

        assert_eq!(json["workflowId"], wf.workflow_id());
        assert_eq!(json["name"], "wf");
    }
}
