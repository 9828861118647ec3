//! Developer agent: code generation and artifact writing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{AgentKind, AgentResult};
use tracing::{debug, info};

use crate::agent::{offline_result, Agent};
use crate::error::AgentError;
use crate::generate::Generator;

const ROLE: &str = "dev_agent";
const STUB_CONTENT: &str = "# TODO: implement\n";

/// Language cues that imply the task wants a code artifact.
const LANGUAGE_CUES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "bash",
    "powershell",
    "dockerfile",
    "node",
    "shell",
];

/// Intent cues that imply the task wants a file written.
const INTENT_CUES: &[&str] = &["create a file", "write a file", "code", "script"];

/// Handles software development tasks. May write a generated code artifact
/// into the configured output directory.
pub struct DeveloperAgent {
    generator: Option<Arc<dyn Generator>>,
    output_dir: PathBuf,
}

impl DeveloperAgent {
    pub fn new(generator: Option<Arc<dyn Generator>>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            output_dir: output_dir.into(),
        }
    }

    /// Pick a filename for the task: language-cue extension, optionally a
    /// generator suggestion, and a slug of the task text as the fallback.
    async fn suggest_filename(&self, task: &str, ask_generator: bool) -> String {
        let lower = task.to_lowercase();

        if lower.contains("dockerfile") {
            return "Dockerfile".to_string();
        }
        let ext = extension_for(&lower);

        if ask_generator {
            if let Some(generator) = &self.generator {
                let prompt = format!(
                    "Suggest a concise filename (no directories) for this coding task. \
                     Use a relevant extension. Return only the filename.\nTask: {task}"
                );
                if let Ok(suggestion) = generator.complete(&prompt).await {
                    if let Some(name) = sanitize_filename(&suggestion) {
                        return name;
                    }
                }
            }
        }

        slug_filename(task, ext)
    }

    /// Write content under a sanitized, collision-free path in the output
    /// directory.
    async fn write_artifact(&self, filename: &str, content: &str) -> Result<AgentResult, AgentError> {
        let safe_name = sanitize_filename(filename).unwrap_or_else(|| "solution.txt".to_string());
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = unique_path(&self.output_dir, &safe_name);
        tokio::fs::write(&path, content).await?;
        info!(path = %path.display(), "wrote artifact");
        Ok(AgentResult {
            text: format!("Successfully wrote to {}", path.display()),
            artifact_path: Some(path.display().to_string()),
        })
    }
}

#[async_trait]
impl Agent for DeveloperAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Developer
    }

    async fn execute(&self, task: &str) -> Result<AgentResult, AgentError> {
        let lower = task.to_lowercase();
        let wants_file = LANGUAGE_CUES.iter().any(|cue| lower.contains(cue))
            || INTENT_CUES.iter().any(|cue| lower.contains(cue));

        let generator = match &self.generator {
            Some(generator) => generator,
            None => {
                // Degraded mode: still honor file intent with a stub artifact.
                if wants_file {
                    let filename = self.suggest_filename(task, false).await;
                    return self.write_artifact(&filename, STUB_CONTENT).await;
                }
                return Ok(offline_result(ROLE, task));
            }
        };

        // Explicit file requests: ask for FILENAME|CONTENT in one shot.
        if lower.contains("create a file") || lower.contains("write a file") {
            let prompt = format!(
                "Extract filename and content from this task: \"{task}\"\n\
                 Format output exactly as: FILENAME|CONTENT\n\
                 Example: test.py|print('hello')"
            );
            let response = generator.complete(&prompt).await?;
            if let Some((filename, content)) = response.split_once('|') {
                return self.write_artifact(filename.trim(), content.trim()).await;
            }
            debug!("extraction response had no separator, generating code instead");
        }

        if wants_file {
            let filename = self.suggest_filename(task, true).await;
            let prompt = format!(
                "Write the full code for this request. Return only executable code, no prose.\n\
                 Request: {task}"
            );
            let code = generator.complete(&prompt).await?;
            return self.write_artifact(&filename, &code).await;
        }

        let text = generator.complete(task).await?;
        Ok(AgentResult::text_only(text))
    }
}

fn extension_for(lower_task: &str) -> &'static str {
    if lower_task.contains("javascript") || lower_task.contains("node") {
        "js"
    } else if lower_task.contains("typescript") {
        "ts"
    } else if lower_task.contains("bash") || lower_task.contains("shell") {
        "sh"
    } else if lower_task.contains("powershell") {
        "ps1"
    } else {
        "py"
    }
}

/// Reject parent-directory traversal and leading separators, then reduce to
/// a bare file name. Returns `None` for anything unusable.
fn sanitize_filename(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() || name.contains("..") || name.starts_with('/') || name.starts_with('\\') {
        return None;
    }
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}

/// Slug of the first words of the task, e.g. `write-a-python-script.py`.
fn slug_filename(task: &str, ext: &str) -> String {
    let words: Vec<String> = task
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .take(5)
        .map(|w| w.to_lowercase())
        .collect();
    let slug = if words.is_empty() {
        "solution".to_string()
    } else {
        words.join("-")
    };
    format!("{slug}.{ext}")
}

/// Avoid collisions by suffixing an incrementing counter to the stem.
fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    if !path.exists() {
        return path;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "solution".to_string());
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
    let mut counter = 1;
    loop {
        let candidate_name = match &ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = dir.join(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
