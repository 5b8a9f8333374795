//! Formatting helper functions for the FlowPilot MCP server
//!
//! This module renders extraction results as the JSON tool response or as a
//! plain-text summary for the command line.

use crate::extract::{Clarification, Extraction, Task};
use crate::llm::Resolution;
use serde::Serialize;

/// Hint returned when no tasks were found
pub const NO_TASKS_HINT: &str = "No tasks found. Separate tasks with commas, periods or words like \"and\"/\"then\", and start each one with an action verb (e.g. \"Email boss tomorrow, call Sarah\").";

/// JSON body of the `extract_tasks` tool
#[derive(Debug, Serialize)]
pub struct ExtractionResponse<'a> {
    /// "local" or "llm"
    pub source: &'static str,
    pub tasks: &'a [Task],
    pub clarifications: &'a [Clarification],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl<'a> ExtractionResponse<'a> {
    pub fn new(resolution: &'a Resolution) -> Self {
        let extraction = resolution.extraction();
        Self {
            source: resolution.source(),
            tasks: &extraction.tasks,
            clarifications: &extraction.clarifications,
            hint: extraction.is_empty().then_some(NO_TASKS_HINT),
        }
    }
}

/// Render a resolution as pretty-printed JSON
pub fn format_response(resolution: &Resolution) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExtractionResponse::new(resolution))
}

/// Format an extraction into a display string
///
/// # Arguments
/// * `extraction` - Tasks and clarifications to format
///
/// # Returns
/// Formatted string representation of the tasks
pub fn format_summary(extraction: &Extraction) -> String {
    if extraction.is_empty() {
        return NO_TASKS_HINT.to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", extraction.tasks.len());
    for task in &extraction.tasks {
        result.push_str(&format!(
            "- [{}] {} (priority: {}, category: {})\n",
            task.id, task.title, task.priority, task.category
        ));
        if let Some(ref due) = task.due_date {
            result.push_str(&format!("  Due: {}\n", due));
        }
        if let Some(ref assignee) = task.assignee {
            result.push_str(&format!("  Assignee: {}\n", assignee));
        }
    }

    if !extraction.clarifications.is_empty() {
        result.push_str("\nNeeds clarification:\n");
        for c in &extraction.clarifications {
            result.push_str(&format!("- [{}] {}\n", c.task_id, c.question));
        }
    }

    result
}
