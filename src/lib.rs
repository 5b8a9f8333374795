//! FlowPilot Library
//!
//! This library turns free-form natural-language notes into structured tasks
//! (title, priority, category, optional due date and assignee) without relying
//! on a language model, and serves that capability over the Model Context
//! Protocol (MCP).
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `FlowPilotHandler` - Handles MCP protocol communication
//! - **Request Layer**: `validation`, `llm` - Input checks and the optional
//!   language-model first pass with deterministic fallback
//! - **Domain Layer**: `extract` module - The deterministic extraction pipeline
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use flowpilot::extract::extract;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 16)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let result = extract("Email boss tomorrow, gym 6pm", now);
//! assert_eq!(result.titles(), vec!["Email boss.", "Gym."]);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod formatting;
mod handlers;
pub mod llm;
pub mod validation;

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDateTime};
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::Arc;

// Re-export commonly used types
pub use config::Config;
pub use error::{InputRejected, LlmError};
pub use extract::{
    Category, Clarification, ExtractOptions, Extraction, Extractor, IdGenerator, Priority,
    SequentialIds, Task, UuidIds,
};
pub use llm::{LlmBridge, LlmClient, Resolution};

/// MCP Server handler for task extraction
///
/// Owns the configuration, the deterministic extractor and, when configured,
/// a language-model bridge that is tried first.
pub struct FlowPilotHandler {
    pub(crate) config: Config,
    pub(crate) extractor: Extractor,
    pub(crate) bridge: Option<LlmBridge>,
}

impl FlowPilotHandler {
    /// Create a new handler
    ///
    /// # Arguments
    /// * `config` - Loaded configuration
    ///
    /// # Returns
    /// Result containing the handler or an error
    ///
    /// # Example
    /// ```no_run
    /// # use flowpilot::{Config, FlowPilotHandler};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = FlowPilotHandler::new(Config::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        let extractor = Extractor::new(config.extract_options()?);
        let bridge = LlmBridge::from_config(&config.llm)?;
        Ok(Self {
            config,
            extractor,
            bridge,
        })
    }

    /// Replace the language-model client, e.g. with a local stub
    pub fn with_llm_client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.bridge = Some(LlmBridge::new(client, self.config.llm.timeout_secs));
        self
    }

    pub fn llm_configured(&self) -> bool {
        self.bridge.is_some()
    }

    pub(crate) async fn resolve<G: IdGenerator + Send>(
        &self,
        text: &str,
        now: NaiveDateTime,
        ids: &mut G,
    ) -> Resolution {
        llm::resolve(self.bridge.as_ref(), &self.extractor, text, now, ids).await
    }

    /// One-shot extraction for the command line
    ///
    /// # Arguments
    /// * `text` - Raw text to extract from
    /// * `now` - Optional reference timestamp, local clock otherwise
    /// * `summary` - Render a text summary instead of JSON
    /// * `sequential_ids` - Use `task-1`, `task-2`, ... instead of UUIDs
    pub async fn run_once(
        &self,
        text: &str,
        now: Option<&str>,
        summary: bool,
        sequential_ids: bool,
    ) -> Result<String> {
        validation::validate_input(text, &self.config.input)?;
        let now = match now {
            Some(value) => validation::parse_timestamp(value)
                .ok_or_else(|| anyhow!("Invalid timestamp '{}'", value))?,
            None => Local::now().naive_local(),
        };

        let resolution = if sequential_ids {
            self.resolve(text, now, &mut SequentialIds::new()).await
        } else {
            self.resolve(text, now, &mut UuidIds).await
        };

        if summary {
            Ok(formatting::format_summary(resolution.extraction()))
        } else {
            Ok(formatting::format_response(&resolution)?)
        }
    }
}

/// Task extraction server: turns free-form notes into structured tasks.
///
/// Splits text on punctuation and separator words (and, or, then, also, plus, &)
/// while keeping bracketed and quoted content together, then classifies each
/// fragment:
/// - **priority**: high, medium, low
/// - **category**: Meeting, Finance, Health, Personal, Work
/// - **due_date**: YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS from phrases like
///   "tomorrow", "next friday", "6pm"
/// - **assignee**: from "ask X", "tell X", "remind X", "assign to X", "@X"
///
/// Tasks without a due date are listed under `clarifications`.
#[mcp_server]
impl McpServer for FlowPilotHandler {
    /// **Extract tasks**: Turn free-form notes into a structured task list.
    /// **Input**: 3-10000 characters. Separate tasks with commas, periods, or "and"/"then".
    /// **Output**: JSON with tasks, clarifications for tasks lacking a due date, and a hint when nothing was found.
    #[tool]
    async fn extract_tasks(
        &self,
        /// Text: free-form notes (e.g., "Email boss tomorrow, gym 6pm, call Sarah about meeting")
        text: String,
        /// Now: reference time for relative dates, RFC 3339 or YYYY-MM-DDTHH:MM:SS (optional)
        now: Option<String>,
    ) -> McpResult<String> {
        self.handle_extract(text, now).await
    }

    /// **Health**: Report server status and whether a language model is configured.
    #[tool]
    async fn health(&self) -> McpResult<String> {
        self.handle_health().await
    }
}
