pub mod export;
pub mod history;
pub mod message;
pub mod settings;
pub mod share;
pub mod status;
pub mod summarize;

use anyhow::Result;
use serde::Serialize;

use crate::summarizer::config::{VidsumConfig, load_config};
use crate::summarizer::gemini::GeminiSummarizer;
use crate::summarizer::paths::{VidsumPaths, resolve_paths};
use crate::summarizer::store::JsonFileStore;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            body: None,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    pub fn body(&mut self, text: impl Into<String>) {
        self.body = Some(text.into());
    }
}

/// Everything a command needs to reach storage and the remote service.
pub struct AppContext {
    pub paths: VidsumPaths,
    pub config: VidsumConfig,
    pub store: JsonFileStore,
}

impl AppContext {
    pub fn open() -> Result<Self> {
        let paths = resolve_paths()?;
        let config = load_config(&paths)?;
        let store = JsonFileStore::new(&paths.settings_file, &paths.history_file);
        Ok(Self {
            paths,
            config,
            store,
        })
    }

    pub fn summarizer(&self) -> Result<GeminiSummarizer> {
        Ok(GeminiSummarizer::from_config(&self.config.gemini)?)
    }
}
