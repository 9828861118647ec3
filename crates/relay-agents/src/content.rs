//! Content agent: research and general questions, search-enriched.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{AgentKind, AgentResult};
use tracing::{debug, warn};

use crate::agent::{offline_result, Agent};
use crate::error::AgentError;
use crate::generate::Generator;
use crate::search::{SearchHit, SearchProvider};

const ROLE: &str = "content_agent";

/// Handles research, general questions, and writing tasks. Enriches its
/// answer with web-search snippets when a provider is configured, and
/// degrades to an unenriched answer when the lookup fails or comes back
/// empty. A search failure is never a job failure.
pub struct ContentAgent {
    generator: Option<Arc<dyn Generator>>,
    search: Option<Arc<dyn SearchProvider>>,
}

impl ContentAgent {
    pub fn new(
        generator: Option<Arc<dyn Generator>>,
        search: Option<Arc<dyn SearchProvider>>,
    ) -> Self {
        Self { generator, search }
    }

    async fn lookup(&self, task: &str) -> Vec<SearchHit> {
        let Some(search) = &self.search else {
            return Vec::new();
        };
        match search.search(task).await {
            Ok(hits) => {
                debug!(hits = hits.len(), "search lookup finished");
                hits
            }
            Err(err) => {
                warn!(error = %err, "search lookup failed, answering unenriched");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Agent for ContentAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Content
    }

    async fn execute(&self, task: &str) -> Result<AgentResult, AgentError> {
        let Some(generator) = &self.generator else {
            return Ok(offline_result(ROLE, task));
        };

        let hits = self.lookup(task).await;
        let text = if hits.is_empty() {
            generator.complete(task).await?
        } else {
            let snippets: Vec<String> = hits
                .iter()
                .map(|hit| {
                    if hit.title.is_empty() {
                        format!("- {}", hit.snippet)
                    } else {
                        format!("- {}: {}", hit.title, hit.snippet)
                    }
                })
                .collect();
            let prompt = format!(
                "You are a research assistant. Use ONLY the provided search snippets to \
                 answer concisely. Do not add a sources section or cite links.\n\n\
                 User asked: {task}\n\n\
                 Search results:\n{}\n\nAnswer:",
                snippets.join("\n")
            );
            generator.complete(&prompt).await?
        };

        Ok(AgentResult::text_only(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratorError;
    use crate::search::SearchError;

    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        async fn complete(&self, prompt: &str) -> Result<String, GeneratorError> {
            Ok(format!("answer to: {prompt}"))
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchProvider for FailingSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
            Err(SearchError::Status(503))
        }
    }

    struct EmptySearch;

    #[async_trait]
    impl SearchProvider for EmptySearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
            Ok(Vec::new())
        }
    }

    struct CannedSearch;

    #[async_trait]
    impl SearchProvider for CannedSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
            Ok(vec![SearchHit {
                title: "Paris".to_string(),
                snippet: "Paris is the capital of France.".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_plain_answer() {
        let agent = ContentAgent::new(Some(Arc::new(EchoGenerator)), Some(Arc::new(FailingSearch)));
        let result = agent.execute("What is the capital of France?").await.unwrap();
        assert_eq!(result.text, "answer to: What is the capital of France?");
    }

    #[tokio::test]
    async fn test_empty_hits_degrade_to_plain_answer() {
        let agent = ContentAgent::new(Some(Arc::new(EchoGenerator)), Some(Arc::new(EmptySearch)));
        let result = agent.execute("obscure question").await.unwrap();
        assert_eq!(result.text, "answer to: obscure question");
    }

    #[tokio::test]
    async fn test_hits_are_folded_into_prompt() {
        let agent = ContentAgent::new(Some(Arc::new(EchoGenerator)), Some(Arc::new(CannedSearch)));
        let result = agent.execute("What is the capital of France?").await.unwrap();
        assert!(result.text.contains("Paris is the capital of France."));
    }

    #[tokio::test]
    async fn test_offline_returns_placeholder() {
        let agent = ContentAgent::new(None, Some(Arc::new(CannedSearch)));
        let result = agent.execute("anything").await.unwrap();
        assert!(result.text.starts_with("[mock]"));
    }
}
