//! Web-search collaborator for the content agent.
//!
//! Search is strictly an enrichment: the content agent must produce an
//! answer whether or not the provider is configured, reachable, or useful.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";
const MAX_HITS: usize = 5;

/// Errors from the search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search backend returned {0}")]
    Status(u16),
}

/// One usable search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
}

/// An outbound web-search provider.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Look up the query and return usable hits, possibly none.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// DuckDuckGo instant-answer client.
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let answer: InstantAnswer = response.json().await?;
        Ok(hits_from_answer(answer))
    }
}

#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "Heading", default)]
    heading: String,

    #[serde(rename = "AbstractText", default)]
    abstract_text: String,

    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: String,

    #[serde(rename = "Topics", default)]
    topics: Vec<RelatedTopic>,
}

fn hits_from_answer(answer: InstantAnswer) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    if !answer.abstract_text.is_empty() {
        hits.push(SearchHit {
            title: answer.heading,
            snippet: answer.abstract_text,
        });
    }

    collect_topics(&answer.related_topics, &mut hits);
    hits.truncate(MAX_HITS);
    hits
}

fn collect_topics(topics: &[RelatedTopic], hits: &mut Vec<SearchHit>) {
    for topic in topics {
        if hits.len() >= MAX_HITS {
            return;
        }
        if !topic.text.is_empty() {
            hits.push(SearchHit {
                title: String::new(),
                snippet: topic.text.clone(),
            });
        }
        collect_topics(&topic.topics, hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_from_abstract_and_topics() {
        let raw = r#"{
            "Heading": "Paris",
            "AbstractText": "Paris is the capital of France.",
            "RelatedTopics": [
                {"Text": "Paris - city in France"},
                {"Topics": [{"Text": "Nested topic"}]}
            ]
        }"#;
        let answer: InstantAnswer = serde_json::from_str(raw).unwrap();
        let hits = hits_from_answer(answer);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "Paris");
        assert_eq!(hits[2].snippet, "Nested topic");
    }

    #[test]
    fn test_empty_answer_yields_no_hits() {
        let answer: InstantAnswer = serde_json::from_str("{}").unwrap();
        assert!(hits_from_answer(answer).is_empty());
    }
}
