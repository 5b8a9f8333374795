use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a task title, terminal punctuation included
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum length of the verbatim fragment kept on a task
pub const MAX_ORIGINAL_TEXT_CHARS: usize = 500;

/// Task priority
///
/// Uses lowercase naming to match the serialized form.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent or deadline-driven work
    high,
    /// Default level
    medium,
    /// Whenever-there-is-time work
    low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::high),
            "medium" => Ok(Priority::medium),
            "low" => Ok(Priority::low),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: high, medium, low",
                s
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::high => "high",
            Priority::medium => "medium",
            Priority::low => "low",
        };
        f.write_str(name)
    }
}

/// Task category
///
/// `Finance` and `Health` are the extended categories and can be switched off
/// through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Meeting,
    Finance,
    Health,
    Personal,
    Work,
}

impl Category {
    /// Default tie-break order: earlier entries win equal scores
    pub const DEFAULT_ORDER: [Category; 5] = [
        Category::Meeting,
        Category::Finance,
        Category::Health,
        Category::Personal,
        Category::Work,
    ];

    pub fn is_extended(self) -> bool {
        matches!(self, Category::Finance | Category::Health)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "meeting" => Ok(Category::Meeting),
            "finance" => Ok(Category::Finance),
            "health" => Ok(Category::Health),
            "personal" => Ok(Category::Personal),
            "work" => Ok(Category::Work),
            _ => Err(format!(
                "Invalid category '{}'. Valid options are: Meeting, Finance, Health, Personal, Work",
                s
            )),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A task extracted from free-form text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier produced by an [`IdGenerator`](super::IdGenerator)
    pub id: String,
    /// Cleaned title, 1-100 characters, first letter uppercase
    pub title: String,
    pub priority: Priority,
    pub category: Category,
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
    pub due_date: Option<String>,
    pub assignee: Option<String>,
    /// Always false on emitted tasks; sarcastic fragments never become tasks
    pub is_sarcastic: bool,
    /// Verbatim source fragment, at most 500 characters
    pub original_text: String,
}

/// Prompt for a task whose due date could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clarification {
    pub task_id: String,
    pub task_title: String,
    pub question: String,
}

impl Clarification {
    pub fn for_task(task: &Task) -> Self {
        let bare = task.title.trim_end_matches(['.', '!', '?']);
        Self {
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            question: format!("When is \"{}\" due?", bare),
        }
    }
}

/// Result of one extraction call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub tasks: Vec<Task>,
    pub clarifications: Vec<Clarification>,
}

impl Extraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no task was found (a valid, non-error outcome)
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.title.as_str()).collect()
    }
}
