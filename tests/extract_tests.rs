//! End-to-end extraction behavior
mod common;

use flowpilot::extract::extract;
use flowpilot::{Category, ExtractOptions, Extractor, Priority, SequentialIds};

#[test]
fn test_end_to_end_scenario() {
    let result = common::extract_seq("Email boss tomorrow, gym 6pm, call Sarah about meeting");

    assert_eq!(
        result.titles(),
        vec!["Email boss.", "Gym.", "Call sarah about meeting."]
    );

    let email = &result.tasks[0];
    assert_eq!(email.id, "task-1");
    assert_eq!(email.due_date.as_deref(), Some("2026-10-17"));
    assert_eq!(email.category, Category::Work);
    assert_eq!(email.original_text, "Email boss tomorrow");

    let gym = &result.tasks[1];
    assert_eq!(gym.due_date.as_deref(), Some("2026-10-16T18:00:00"));
    assert_eq!(gym.priority, Priority::medium);

    let call = &result.tasks[2];
    assert_eq!(call.category, Category::Meeting);
    assert_eq!(call.due_date, None);

    assert_eq!(result.clarifications.len(), 1);
    assert_eq!(result.clarifications[0].task_id, call.id);
    assert_eq!(result.clarifications[0].task_title, "Call sarah about meeting.");
    assert!(result.tasks.iter().all(|t| !t.is_sarcastic));
}

#[test]
fn test_bracket_commas_do_not_split() {
    let result = common::extract_seq("Buy groceries (milk, eggs, bread) + finish report by Friday");
    assert_eq!(
        result.titles(),
        vec!["Buy groceries (milk, eggs, bread).", "Finish report."]
    );
    assert_eq!(result.tasks[1].due_date.as_deref(), Some("2026-10-23"));
}

#[test]
fn test_exact_duplicates_are_dropped() {
    let result = common::extract_seq("Email boss, email boss");
    assert_eq!(result.titles(), vec!["Email boss."]);
}

#[test]
fn test_near_duplicates_are_kept() {
    let result = common::extract_seq("Call John, call John again");
    assert_eq!(result.titles(), vec!["Call john.", "Call john again."]);
}

#[test]
fn test_time_boxed_low_priority_escalates() {
    let result = common::extract_seq("Gym at 6pm");
    assert_eq!(result.tasks.len(), 1);
    assert_eq!(result.tasks[0].priority, Priority::medium);

    let result = common::extract_seq("Gym on Saturday");
    assert_eq!(result.tasks[0].priority, Priority::low);
    assert_eq!(result.tasks[0].due_date.as_deref(), Some("2026-10-17"));
}

#[test]
fn test_sarcasm_is_suppressed() {
    let result = common::extract_seq("Sure, I'll totally gonna finish that today");
    assert!(result.is_empty());
    assert!(result.clarifications.is_empty());
}

#[test]
fn test_sarcastic_fragment_does_not_block_later_duplicate() {
    let result =
        common::extract_seq("Can't wait to clean the garage, clean the garage on Sunday");
    assert_eq!(result.titles(), vec!["Clean the garage."]);
    assert_eq!(result.tasks[0].due_date.as_deref(), Some("2026-10-18"));
}

#[test]
fn test_category_tie_break_is_stable() {
    for _ in 0..5 {
        let result = common::extract_seq("call mom");
        assert_eq!(result.tasks[0].category, Category::Meeting);
    }
}

#[test]
fn test_configured_category_order() {
    let extractor = Extractor::new(ExtractOptions {
        category_order: vec![Category::Personal, Category::Meeting, Category::Work],
        extended_categories: false,
    });
    let result = extractor.extract_with(
        "call mom, pay rent",
        common::friday_morning(),
        &mut SequentialIds::new(),
    );
    assert_eq!(result.tasks[0].category, Category::Personal);
    assert_eq!(result.tasks[1].category, Category::Work);
}

#[test]
fn test_titles_are_stable_when_refed() {
    let first = common::extract_seq(
        "I need to email boss tomorrow, and then buy groceries (milk, eggs) + call Sarah about meeting at 3pm",
    );
    let second = common::extract_seq(&common::join_titles(&first));
    assert_eq!(first.titles(), second.titles());
}

#[test]
fn test_truncated_titles_are_stable_when_refed() {
    let text = format!("write {}, call mom", "very long words ".repeat(60));
    let first = common::extract_seq(&text);
    assert!(first.tasks[0].title.ends_with("..."));
    let second = common::extract_seq(&common::join_titles(&first));
    assert_eq!(first.titles(), second.titles());
}

#[test]
fn test_possessive_does_not_swallow_later_tasks() {
    let result = common::extract_seq("Pick up the kids' toys, call mom, pay rent");
    assert_eq!(
        result.titles(),
        vec!["Pick up the kids' toys.", "Call mom.", "Pay rent."]
    );
}

#[test]
fn test_separator_words_and_newlines() {
    let result = common::extract_seq(
        "- pay electricity bill\n- book dentist appointment and ask Priya for the slides then water plants",
    );
    assert_eq!(
        result.titles(),
        vec![
            "Pay electricity bill.",
            "Book dentist appointment.",
            "Ask priya for the slides.",
            "Water plants."
        ]
    );
    assert_eq!(result.tasks[0].category, Category::Finance);
    assert_eq!(result.tasks[1].category, Category::Health);
    assert_eq!(result.tasks[2].assignee.as_deref(), Some("Priya"));
}

#[test]
fn test_priorities_from_keywords() {
    let result = common::extract_seq(
        "Fix prod outage asap. Update wiki (not urgent). Review PR soon. Learn guitar someday",
    );
    let priorities: Vec<Priority> = result.tasks.iter().map(|t| t.priority).collect();
    assert_eq!(
        priorities,
        vec![Priority::high, Priority::low, Priority::medium, Priority::low]
    );
}

#[test]
fn test_time_only_and_stop_word_fragments_are_dropped() {
    let result = common::extract_seq("ok. at 6pm. next week. thanks");
    assert!(result.is_empty());
}

#[test]
fn test_no_tasks_for_punctuation_noise() {
    assert!(common::extract_seq("... ;;; !!!").is_empty());
    assert!(common::extract_seq("").is_empty());
}

#[test]
fn test_long_fragment_limits() {
    let text = format!("write {}", "very long words ".repeat(60));
    let result = common::extract_seq(&text);
    let task = &result.tasks[0];
    assert_eq!(task.title.chars().count(), 100);
    assert!(task.title.ends_with("..."));
    assert_eq!(task.original_text.chars().count(), 500);
}

#[test]
fn test_default_extract_uses_unique_ids() {
    let result = extract("Email boss, call mom, pay rent", common::friday_morning());
    assert_eq!(result.tasks.len(), 3);
    let mut ids: Vec<&str> = result.tasks.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(result.tasks.iter().all(|t| t.id.len() == 36));
}
