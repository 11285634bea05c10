//! Linear chain execution
//!
//! Stages run strictly in declaration order; each receives the previous
//! stage's output and the chain's result is the last stage's output.

use std::collections::HashMap;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::agent::Agent;
use crate::error::ChainError;
use crate::registry::ChainSpec;

/// Agents by name, as owned by the application
pub type AgentMap = HashMap<String, Box<dyn Agent>>;

/// Result of executing a single stage
#[derive(Debug, Clone)]
pub struct StepResult {
    pub agent: String,
    pub output: String,
    pub duration_ms: u64,
}

/// Result of executing a complete chain
#[derive(Debug, Clone)]
pub struct ChainRun {
    /// Output of the last stage
    pub output: String,
    pub steps: Vec<StepResult>,
}

/// A validated chain of agent names
#[derive(Debug, Clone)]
pub struct Chain {
    spec: ChainSpec,
}

impl Chain {
    pub fn new(spec: ChainSpec) -> Self {
        Self { spec }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn sequence(&self) -> &[String] {
        &self.spec.sequence
    }

    /// Run the chain; the first failing stage aborts it
    pub async fn run(&self, agents: &mut AgentMap, input: &str) -> Result<ChainRun> {
        let mut steps: Vec<StepResult> = Vec::with_capacity(self.spec.sequence.len());
        let mut current = input.to_string();

        for (index, agent_name) in self.spec.sequence.iter().enumerate() {
            let agent = agents
                .get_mut(agent_name)
                .ok_or_else(|| ChainError::UnknownAgent {
                    chain: self.spec.name.clone(),
                    agent: agent_name.clone(),
                })?;

            tracing::info!(chain = %self.spec.name, step = index + 1, agent = %agent_name, "Running stage");
            let start = Instant::now();
            let output = agent.send(&current).await.with_context(|| {
                format!("Chain '{}' failed at stage '{}'", self.spec.name, agent_name)
            })?;
            let duration_ms = start.elapsed().as_millis() as u64;

            tracing::info!(
                chain = %self.spec.name,
                agent = %agent_name,
                duration_ms,
                output_len = output.len(),
                "Stage complete"
            );

            steps.push(StepResult {
                agent: agent_name.clone(),
                output: output.clone(),
                duration_ms,
            });
            current = output;
        }

        Ok(ChainRun {
            output: current,
            steps,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    /// Records every call into a shared log and replies with a tagged echo
    pub(crate) struct ScriptedAgent {
        pub name: String,
        pub log: Arc<Mutex<Vec<(String, String)>>>,
        pub fail: bool,
        pub cleared: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedAgent {
        pub fn boxed(
            name: &str,
            log: &Arc<Mutex<Vec<(String, String)>>>,
            cleared: &Arc<Mutex<Vec<String>>>,
        ) -> Box<dyn Agent> {
            Box::new(Self {
                name: name.to_string(),
                log: log.clone(),
                fail: false,
                cleared: cleared.clone(),
            })
        }
    }

    #[async_trait]
    impl Agent for ScriptedAgent {
        fn name(&self) -> &str {
            &self.name
        }

        async fn send(&mut self, message: &str) -> Result<String> {
            self.log
                .lock()
                .unwrap()
                .push((self.name.clone(), message.to_string()));
            if self.fail {
                anyhow::bail!("{} is unreachable", self.name);
            }
            Ok(format!("{}({})", self.name, message))
        }

        fn clear_history(&mut self) {
            self.cleared.lock().unwrap().push(self.name.clone());
        }
    }

    fn post_writer() -> Chain {
        Chain::new(ChainSpec::new(
            "post_writer",
            &["url_fetcher", "page_summary_executive"],
        ))
    }

    fn agents(log: &Arc<Mutex<Vec<(String, String)>>>) -> AgentMap {
        let cleared = Arc::new(Mutex::new(Vec::new()));
        ["url_fetcher", "page_summary_executive"]
            .into_iter()
            .map(|n| (n.to_string(), ScriptedAgent::boxed(n, log, &cleared)))
            .collect()
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut agents = agents(&log);

        let run = post_writer()
            .run(&mut agents, "https://example.com")
            .await
            .unwrap();

        let calls = log.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                ("url_fetcher".to_string(), "https://example.com".to_string()),
                (
                    "page_summary_executive".to_string(),
                    "url_fetcher(https://example.com)".to_string()
                ),
            ]
        );
        assert_eq!(
            run.output,
            "page_summary_executive(url_fetcher(https://example.com))"
        );
        assert_eq!(run.steps.len(), 2);
        assert_eq!(run.steps[0].agent, "url_fetcher");
        assert_eq!(run.steps[1].output, run.output);
    }

    #[tokio::test]
    async fn test_failing_stage_aborts_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut agents = agents(&log);
        agents.insert(
            "url_fetcher".to_string(),
            Box::new(ScriptedAgent {
                name: "url_fetcher".to_string(),
                log: log.clone(),
                fail: true,
                cleared: Arc::new(Mutex::new(Vec::new())),
            }),
        );

        let err = post_writer()
            .run(&mut agents, "https://example.com")
            .await
            .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("failed at stage 'url_fetcher'"));
        assert!(message.contains("url_fetcher is unreachable"));
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_agent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut agents = agents(&log);
        agents.remove("page_summary_executive");

        let err = post_writer().run(&mut agents, "x").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ChainError>(),
            Some(&ChainError::UnknownAgent {
                chain: "post_writer".to_string(),
                agent: "page_summary_executive".to_string(),
            })
        );
    }
}
