//! Health handler for the FlowPilot MCP server

use crate::FlowPilotHandler;
use mcp_attr::Result as McpResult;
use serde_json::json;

impl FlowPilotHandler {
    /// Reports liveness and whether the language-model bridge is configured.
    pub async fn handle_health(&self) -> McpResult<String> {
        let body = json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "llm_configured": self.llm_configured(),
        });
        Ok(body.to_string())
    }
}
