//! Test harness: a scripted generation backend and a server built on it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;
use tempfile::TempDir;

use plan_mcp::config::Config;
use plan_mcp::generation::{BackendError, CompletionRequest, TextGenerator};
use plan_mcp::init::AppContext;
use plan_mcp::mcp::PlanServer;

/// One scripted backend reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
}

/// Backend stub that replays scripted replies in order, repeating the last
/// one once the script runs out, and records every request it receives.
pub struct ScriptedGenerator {
    replies: Vec<Reply>,
    calls: AtomicUsize,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self::new(vec![Reply::Text(text.into())])
    }

    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(|t| Reply::Text(t.into())).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        match self.replies.get(n).or_else(|| self.replies.last()) {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Fail(msg)) => Err(BackendError::Other(msg.clone())),
            None => Ok(String::new()),
        }
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

/// A server wired to a [`ScriptedGenerator`], plus a scratch directory.
pub struct TestHarness {
    pub generator: Arc<ScriptedGenerator>,
    pub ctx: AppContext,
    pub server: PlanServer,
    pub temp_dir: TempDir,
}

impl TestHarness {
    pub fn new(generator: ScriptedGenerator) -> Self {
        let generator = Arc::new(generator);
        let ctx = AppContext::with_client(generator.clone(), &Config::default())
            .expect("Failed to build app context");
        let server = PlanServer::from_context(&ctx);
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self {
            generator,
            ctx,
            server,
            temp_dir,
        }
    }

    pub fn temp_path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Dispatch a tool call with a JSON object literal as arguments.
    pub async fn call(&self, tool: &str, arguments: Value) -> CallToolResult {
        let arguments: Option<JsonObject> = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => panic!("arguments must be an object, got {}", other),
        };
        self.server.dispatch(tool, arguments).await
    }
}

/// Whether the envelope is flagged as a failure.
pub fn is_error(result: &CallToolResult) -> bool {
    serde_json::to_value(result).unwrap()["isError"] == Value::Bool(true)
}

/// The envelope's single text block, parsed as JSON.
pub fn body(result: &CallToolResult) -> Value {
    let json = serde_json::to_value(result).unwrap();
    let content = json["content"].as_array().expect("content array");
    assert_eq!(content.len(), 1, "envelope must hold exactly one block");
    let text = content[0]["text"].as_str().expect("text block");
    serde_json::from_str(text).expect("envelope text must be JSON")
}
