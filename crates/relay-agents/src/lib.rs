//! Relay Agents
//!
//! The routing and execution layer of Relay: a [`Router`] that classifies a
//! task description into one [`AgentKind`](relay_core::AgentKind), and one
//! [`Agent`] implementation per kind. External collaborators (the
//! text-generation backend and the web-search provider) sit behind traits so
//! the agents can run, degraded, without either of them.

pub mod agent;
pub mod content;
pub mod developer;
pub mod error;
pub mod generate;
pub mod router;
pub mod search;

pub use agent::Agent;
pub use content::ContentAgent;
pub use developer::DeveloperAgent;
pub use error::AgentError;
pub use generate::{Generator, GeneratorError, OpenAiGenerator};
pub use router::{Classifier, ClassifyError, LlmClassifier, Router};
pub use search::{DuckDuckGoSearch, SearchError, SearchHit, SearchProvider};
