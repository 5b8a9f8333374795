//! Deterministic task extraction
//!
//! Converts free-form text into structured tasks without a language model.
//! It is split into submodules, leaf-first:
//! - `preprocess`: whitespace, quote and dash normalization
//! - `splitter`: bracket/quote-aware fragment splitting
//! - `title`: title cleaning
//! - `classify`: priority, category, sarcasm and assignee classifiers
//! - `dates`: due date resolution
//! - `pipeline`: orchestration, de-duplication and clarifications
//!
//! The pipeline is pure: no I/O, no shared mutable state. Keyword tables are
//! immutable statics, so concurrent calls need no coordination.

pub mod classify;
pub mod dates;
mod model;
mod pipeline;
pub mod preprocess;
pub mod splitter;
pub mod title;

// Re-export all public types
pub use model::{
    Category, Clarification, Extraction, MAX_ORIGINAL_TEXT_CHARS, MAX_TITLE_CHARS, Priority, Task,
};
pub use pipeline::{
    Assembler, ExtractOptions, Extractor, IdGenerator, SequentialIds, TaskDraft, UuidIds, extract,
};
