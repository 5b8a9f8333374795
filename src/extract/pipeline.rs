//! Extraction pipeline
//!
//! Drives fragments through filtering, cleaning and classification in a single
//! pass, de-duplicates titles case-insensitively (first occurrence wins) and
//! packages tasks together with their clarifications.

use super::classify;
use super::dates;
use super::model::{
    Category, Clarification, Extraction, MAX_ORIGINAL_TEXT_CHARS, Priority, Task,
};
use super::preprocess;
use super::splitter;
use super::title;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::{debug, info};

/// Source of task identifiers
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic identifiers: `task-1`, `task-2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counter: usize,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("task-{}", self.counter)
    }
}

/// Classification settings shared by every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Category tie-break order; earlier wins
    pub category_order: Vec<Category>,
    /// Whether Finance and Health may be chosen
    pub extended_categories: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            category_order: Category::DEFAULT_ORDER.to_vec(),
            extended_categories: true,
        }
    }
}

/// Fields of a task before it receives an id
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub priority: Priority,
    pub category: Category,
    pub due_date: Option<String>,
    pub assignee: Option<String>,
    pub original_text: String,
}

/// Collects drafts into an [`Extraction`]
///
/// Applies case-insensitive title de-duplication, assigns ids and records a
/// clarification for every task without a due date.
pub struct Assembler<'a, G: IdGenerator> {
    ids: &'a mut G,
    seen: HashSet<String>,
    output: Extraction,
}

impl<'a, G: IdGenerator> Assembler<'a, G> {
    pub fn new(ids: &'a mut G) -> Self {
        Self {
            ids,
            seen: HashSet::new(),
            output: Extraction::new(),
        }
    }

    /// Add a draft; returns false when its title was already seen
    pub fn push(&mut self, draft: TaskDraft) -> bool {
        if !self.seen.insert(draft.title.to_lowercase()) {
            debug!(title = %draft.title, "dropping duplicate title");
            return false;
        }

        let task = Task {
            id: self.ids.next_id(),
            title: draft.title,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            assignee: draft.assignee,
            is_sarcastic: false,
            original_text: draft.original_text.chars().take(MAX_ORIGINAL_TEXT_CHARS).collect(),
        };
        if task.due_date.is_none() {
            self.output.clarifications.push(Clarification::for_task(&task));
        }
        self.output.tasks.push(task);
        true
    }

    pub fn finish(self) -> Extraction {
        self.output
    }
}

/// Why a fragment produced no task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropReason {
    StopWord,
    Sarcastic,
    TimeOnly,
    EmptyTitle,
}

/// Deterministic text-to-task extractor
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Turn one fragment into a draft, or report why it was dropped
    fn draft(&self, fragment: &str, now: NaiveDateTime) -> Result<TaskDraft, DropReason> {
        if title::is_stop_word(fragment) {
            return Err(DropReason::StopWord);
        }
        if classify::is_sarcastic(fragment) {
            return Err(DropReason::Sarcastic);
        }
        if title::is_time_only(fragment) {
            return Err(DropReason::TimeOnly);
        }
        let title = title::clean(fragment).ok_or(DropReason::EmptyTitle)?;

        let due_date = dates::build_date(fragment, now);
        let priority =
            classify::escalate_for_time(classify::classify_priority(fragment), due_date.as_deref());
        let category = classify::classify_category(
            fragment,
            &self.options.category_order,
            self.options.extended_categories,
        );

        Ok(TaskDraft {
            title,
            priority,
            category,
            due_date,
            assignee: classify::extract_assignee(fragment),
            original_text: fragment.to_string(),
        })
    }

    /// Extract tasks, drawing ids from `ids`
    pub fn extract_with<G: IdGenerator>(
        &self,
        text: &str,
        now: NaiveDateTime,
        ids: &mut G,
    ) -> Extraction {
        let normalized = preprocess::normalize(text);
        let fragments = splitter::split(&normalized);
        let mut assembler = Assembler::new(ids);

        for fragment in &fragments {
            match self.draft(fragment, now) {
                Ok(draft) => {
                    assembler.push(draft);
                }
                Err(reason) => debug!(?reason, fragment = %fragment, "dropping fragment"),
            }
        }

        let extraction = assembler.finish();
        info!(
            fragments = fragments.len(),
            tasks = extraction.tasks.len(),
            clarifications = extraction.clarifications.len(),
            "extracted tasks"
        );
        extraction
    }

    /// Extract tasks with random UUID ids
    pub fn extract(&self, text: &str, now: NaiveDateTime) -> Extraction {
        self.extract_with(text, now, &mut UuidIds)
    }
}

/// Extract tasks from free-form text using default options
///
/// Total over any input: malformed or adversarial text yields a possibly
/// empty result, never an error.
pub fn extract(text: &str, now: NaiveDateTime) -> Extraction {
    Extractor::default().extract(text, now)
}
