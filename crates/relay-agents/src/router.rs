//! Task classification.
//!
//! Routing is total: the primary path asks a pluggable [`Classifier`]
//! strategy, and any strategy failure (not configured, backend error,
//! unparseable output) degrades to a deterministic keyword fallback.
//! Classification never fails a job.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{AgentKind, RouteDecision};
use thiserror::Error;
use tracing::{debug, warn};

use crate::generate::{Generator, GeneratorError};

/// Task cues that route to the developer agent in the fallback path.
const DEVELOPER_CUES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "bash",
    "powershell",
    "dockerfile",
    "code",
    "script",
    "create a file",
    "write a file",
];

/// Errors from a classification strategy. Always recovered by the fallback.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("generation backend error: {0}")]
    Generation(#[from] GeneratorError),

    #[error("unparseable classifier output: {0}")]
    Unparseable(String),
}

/// A pluggable classification strategy.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, task: &str) -> Result<RouteDecision, ClassifyError>;
}

/// Classifier backed by the text-generation collaborator.
///
/// Prompts the backend for a JSON `{agent, reasoning}` object and parses it
/// strictly; anything else is an error for the router to recover from.
pub struct LlmClassifier {
    generator: Arc<dyn Generator>,
}

impl LlmClassifier {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    fn build_prompt(task: &str) -> String {
        format!(
            "You are a routing agent responsible for assigning user tasks to the \
             appropriate worker agent.\n\n\
             Available agents:\n\
             1. dev_agent: software development, coding, debugging, file manipulation, technical questions.\n\
             2. content_agent: research, general questions, creative writing, summarization, non-technical tasks.\n\n\
             Task: {task}\n\n\
             Respond with a single JSON object and nothing else:\n\
             {{\"agent\": \"dev_agent\" | \"content_agent\", \"reasoning\": \"<why>\"}}"
        )
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, task: &str) -> Result<RouteDecision, ClassifyError> {
        let response = self.generator.complete(&Self::build_prompt(task)).await?;
        let decision: RouteDecision = serde_json::from_str(extract_json(&response))
            .map_err(|_| ClassifyError::Unparseable(response.clone()))?;
        if decision.reasoning.trim().is_empty() {
            return Err(ClassifyError::Unparseable(response));
        }
        Ok(decision)
    }
}

/// Strip markdown code fences that chat backends like to wrap JSON in.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

/// Classifies an incoming task into exactly one agent variant.
pub struct Router {
    classifier: Option<Arc<dyn Classifier>>,
}

impl Router {
    /// Router with a primary classification strategy.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// Router with only the deterministic fallback.
    pub fn fallback_only() -> Self {
        Self { classifier: None }
    }

    /// Classify a task. Total: strategy failures degrade to the keyword
    /// fallback instead of erroring.
    pub async fn route(&self, task: &str) -> RouteDecision {
        if let Some(classifier) = &self.classifier {
            match classifier.classify(task).await {
                Ok(decision) => {
                    debug!(agent = %decision.agent, "classifier routed task");
                    return decision;
                }
                Err(err) => {
                    warn!(error = %err, "classifier failed, using keyword fallback");
                }
            }
        }
        fallback_route(task)
    }
}

/// Deterministic keyword fallback. Keyword match takes precedence; the
/// default is the content agent.
fn fallback_route(task: &str) -> RouteDecision {
    let lower = task.to_lowercase();
    if DEVELOPER_CUES.iter().any(|cue| lower.contains(cue)) {
        RouteDecision {
            agent: AgentKind::Developer,
            reasoning: "keyword match (fallback)".to_string(),
        }
    } else {
        RouteDecision {
            agent: AgentKind::Content,
            reasoning: "default (fallback)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingClassifier;

    #[async_trait]
    impl Classifier for FailingClassifier {
        async fn classify(&self, _task: &str) -> Result<RouteDecision, ClassifyError> {
            Err(ClassifyError::Unparseable("boom".to_string()))
        }
    }

    struct FixedClassifier(AgentKind);

    #[async_trait]
    impl Classifier for FixedClassifier {
        async fn classify(&self, _task: &str) -> Result<RouteDecision, ClassifyError> {
            Ok(RouteDecision {
                agent: self.0,
                reasoning: "model decision".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_fallback_routes_script_task_to_developer() {
        let router = Router::fallback_only();
        let decision = router.route("Write a python script").await;
        assert_eq!(decision.agent, AgentKind::Developer);
        assert!(!decision.reasoning.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_routes_question_to_content() {
        let router = Router::fallback_only();
        let decision = router.route("What is the capital of France?").await;
        assert_eq!(decision.agent, AgentKind::Content);
        assert!(!decision.reasoning.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_is_case_insensitive() {
        let router = Router::fallback_only();
        let decision = router.route("Write some JavaScript CODE").await;
        assert_eq!(decision.agent, AgentKind::Developer);
    }

    #[tokio::test]
    async fn test_classifier_error_degrades_to_fallback() {
        let router = Router::new(Arc::new(FailingClassifier));
        let decision = router.route("Write a python script").await;
        assert_eq!(decision.agent, AgentKind::Developer);
        assert_eq!(decision.reasoning, "keyword match (fallback)");
    }

    #[tokio::test]
    async fn test_classifier_decision_wins_over_keywords() {
        let router = Router::new(Arc::new(FixedClassifier(AgentKind::Content)));
        let decision = router.route("Write a python script").await;
        assert_eq!(decision.agent, AgentKind::Content);
        assert_eq!(decision.reasoning, "model decision");
    }

    #[test]
    fn test_extract_json_strips_fences() {
        let fenced = "```json\n{\"agent\": \"dev_agent\", \"reasoning\": \"code\"}\n```";
        let decision: RouteDecision = serde_json::from_str(extract_json(fenced)).unwrap();
        assert_eq!(decision.agent, AgentKind::Developer);
    }
}
