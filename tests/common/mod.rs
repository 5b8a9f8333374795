//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use flowpilot::{Extraction, Extractor, SequentialIds};

/// Fixed reference time: Friday 2026-10-16 09:00
pub fn friday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Run the default extractor with deterministic ids
pub fn extract_seq(text: &str) -> Extraction {
    Extractor::default().extract_with(text, friday_morning(), &mut SequentialIds::new())
}

/// Join titles into a new input text, one sentence per title
pub fn join_titles(extraction: &Extraction) -> String {
    extraction
        .tasks
        .iter()
        .map(|t| t.title.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
