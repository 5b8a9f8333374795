//! Extract handler for the FlowPilot MCP server

use crate::FlowPilotHandler;
use crate::extract::UuidIds;
use crate::formatting;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl FlowPilotHandler {
    /// **Extract**: Turn free-form notes into structured tasks.
    /// **Input**: 3-10000 characters with at least one letter or digit; rejected otherwise.
    /// **Output**: JSON `{source, tasks, clarifications, hint?}`. Tasks without a
    /// resolvable due date get a clarification entry; `hint` is present when no tasks were found.
    pub async fn handle_extract(&self, text: String, now: Option<String>) -> McpResult<String> {
        if let Err(e) = validation::validate_input(&text, &self.config.input) {
            bail_public!(_, "Input rejected: {}", e);
        }

        let now = validation::parse_now(now.as_deref())?;
        let resolution = self.resolve(&text, now, &mut UuidIds).await;

        match formatting::format_response(&resolution) {
            Ok(body) => Ok(body),
            Err(e) => bail_public!(_, "Failed to format response: {}", e),
        }
    }
}
