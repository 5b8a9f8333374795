//! Title cleaning
//!
//! Turns a raw fragment into a task title: leading intent phrases and
//! connector words are stripped, embedded date/time phrases removed, and the
//! result is tidied, truncated, capitalized and terminated with a period.

use super::model::MAX_TITLE_CHARS;
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum length of a cleaned title body
pub const MIN_TITLE_CHARS: usize = 3;

const WEEKDAY: &str = "(?:mon|tues|wednes|thurs|fri|satur|sun)day";

const STOP_WORDS: &[&str] = &[
    "ok", "okay", "sure", "yes", "yeah", "yep", "no", "nope", "thanks", "thank you", "please",
    "hmm", "well", "alright", "cool", "great", "hi", "hello", "lol", "etc", "and", "or", "then",
    "also", "but", "so", "to", "plus", "the",
];

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]+|\d+[.)])\s*").expect("valid bullet regex"));

static INTENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:i\s+(?:want|need|have|plan|am\s+going)\s+to|i'm\s+going\s+to|i\s+(?:will|should|must)|i'm|i\s+am|i'll|we\s+(?:want|need|have)\s+to|let's|please|(?:remember|don't\s+forget)\s+to)\b\s*",
    )
    .expect("valid intent regex")
});

static CONNECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:and|or|then|also|but|so|to|plus)\b\s*").expect("valid connector regex")
});

static DATE_PHRASE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(
            r"(?i)\b(?:due\s+)?(?:by|before|until|till)\s+(?:eod|(?:the\s+)?end\s+of\s+(?:the\s+)?(?:day|week|month)|tonight|today|tomorrow|noon|lunch|midnight|(?:next\s+|this\s+)?{WEEKDAY})\b"
        ),
        r"(?i)\b(?:on\s+|by\s+)?(?:the\s+)?day\s+after\s+tomorrow\b".to_string(),
        format!(r"(?i)\b(?:on\s+)?(?:next|this)\s+(?:week|month|{WEEKDAY})\b"),
        format!(r"(?i)\b(?:on\s+)?{WEEKDAY}s?\b"),
        r"(?i)\b(?:tomorrow|today|tonight|eod)\b".to_string(),
        r"(?i)\bend\s+of\s+(?:the\s+)?day\b".to_string(),
        r"(?i)(?:\b(?:at|by|around|before)\s+)?\b\d{1,2}(?:[:.]\d{2})?\s*(?:am|pm)\b".to_string(),
        r"(?i)(?:\b(?:at|by|around|before)\s+)?\b(?:[01]?\d|2[0-3]):[0-5]\d\b".to_string(),
        r"(?i)\b(?:(?:in|during)\s+the\s+|this\s+|every\s+)?(?:morning|afternoon|evening)\b"
            .to_string(),
        r"(?i)\b(?:at|by|around|before|for)\s+(?:noon|lunch|midnight|night)\b".to_string(),
        r"(?i)\b(?:noon|midnight)\b".to_string(),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid date phrase regex"))
    .collect()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,;:])").expect("valid punctuation regex"));
static DANGLING_PREPOSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:at|on|by|before|until|till|due|around|for|in)$")
        .expect("valid preposition regex")
});
static LEADING_PREPOSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:at|on|by|around|before|until|till|in|due)\b")
        .expect("valid preposition regex")
});

/// Whether the fragment is nothing but a stop or connector word
pub fn is_stop_word(fragment: &str) -> bool {
    let bare = fragment
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    STOP_WORDS.contains(&bare.as_str())
}

/// Strip leading intent phrases and connector words until stable
fn strip_leading_phrases(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = INTENT_RE.replace(&current, "");
        let next = CONNECTOR_RE.replace(next.trim_start(), "");
        let next = next.trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn remove_date_phrases(text: &str) -> String {
    DATE_PHRASE_RES
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, " ").into_owned())
}

fn is_edge_punctuation(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '-')
}

/// Collapse whitespace and trim dangling punctuation and prepositions
fn tidy(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let mut current = SPACE_BEFORE_PUNCT_RE
        .replace_all(&collapsed, "$1")
        .trim_matches(|c: char| c.is_whitespace() || is_edge_punctuation(c))
        .to_string();
    loop {
        let next = DANGLING_PREPOSITION_RE.replace(&current, "");
        let next = next
            .trim_end_matches(|c: char| c.is_whitespace() || is_edge_punctuation(c))
            .to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn ends_with_terminal(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}

/// Upper-case the first character and lower-case the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Truncate so that the final title, terminal punctuation included,
/// fits in [`MAX_TITLE_CHARS`]
fn truncate(text: &str) -> String {
    let limit = if ends_with_terminal(text) {
        MAX_TITLE_CHARS
    } else {
        MAX_TITLE_CHARS - 1
    };
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(MAX_TITLE_CHARS - 3).collect();
    format!("{}...", kept.trim_end())
}

/// Whether the fragment only expresses a date or time ("at 6pm", "next week")
pub fn is_time_only(fragment: &str) -> bool {
    let rest = tidy(&remove_date_phrases(&strip_leading_phrases(fragment)));
    let rest = LEADING_PREPOSITION_RE.replace(&rest, "");
    !rest.chars().any(char::is_alphabetic)
}

/// Clean a fragment into a task title
///
/// Returns `None` when the fragment is a bare stop word or the cleaned title
/// is shorter than [`MIN_TITLE_CHARS`].
pub fn clean(fragment: &str) -> Option<String> {
    if is_stop_word(fragment) {
        return None;
    }

    let body = BULLET_RE.replace(fragment, "");
    let body = strip_leading_phrases(&body);
    let body = tidy(&remove_date_phrases(&body));
    let body = tidy(&strip_leading_phrases(&body));

    if body.chars().count() < MIN_TITLE_CHARS || is_stop_word(&body) {
        return None;
    }

    let mut title = capitalize(&truncate(&body));
    if !ends_with_terminal(&title) {
        title.push('.');
    }
    Some(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_titles() {
        assert_eq!(clean("Email boss tomorrow").as_deref(), Some("Email boss."));
        assert_eq!(clean("gym 6pm").as_deref(), Some("Gym."));
        assert_eq!(
            clean("call Sarah about meeting").as_deref(),
            Some("Call sarah about meeting.")
        );
    }

    #[test]
    fn test_strips_intent_and_connectors() {
        assert_eq!(clean("I need to buy milk").as_deref(), Some("Buy milk."));
        assert_eq!(clean("and then I have to call mom").as_deref(), Some("Call mom."));
        assert_eq!(clean("I'm going to paint the fence").as_deref(), Some("Paint the fence."));
        assert_eq!(clean("also don't forget to water plants").as_deref(), Some("Water plants."));
        assert_eq!(clean("to renew passport").as_deref(), Some("Renew passport."));
    }

    #[test]
    fn test_strips_bullets() {
        assert_eq!(clean("- pick up laundry").as_deref(), Some("Pick up laundry."));
        assert_eq!(clean("2) file taxes").as_deref(), Some("File taxes."));
    }

    #[test]
    fn test_removes_date_and_time_phrases() {
        assert_eq!(clean("finish report by Friday").as_deref(), Some("Finish report."));
        assert_eq!(clean("submit slides by end of day").as_deref(), Some("Submit slides."));
        assert_eq!(clean("dentist next Tuesday at 10:30am").as_deref(), Some("Dentist."));
        assert_eq!(clean("standup at 09:15 on Monday").as_deref(), Some("Standup."));
        assert_eq!(clean("run in the morning").as_deref(), Some("Run."));
        assert_eq!(clean("plan trip next month").as_deref(), Some("Plan trip."));
        assert_eq!(clean("call the bank at noon").as_deref(), Some("Call the bank."));
    }

    #[test]
    fn test_keeps_brackets_and_existing_punctuation() {
        assert_eq!(
            clean("Buy groceries (milk, eggs, bread)").as_deref(),
            Some("Buy groceries (milk, eggs, bread).")
        );
        assert_eq!(clean("Fix login bug!").as_deref(), Some("Fix login bug!"));
        assert_eq!(clean("Review budget:").as_deref(), Some("Review budget."));
    }

    #[test]
    fn test_rejects_stop_words_and_short_titles() {
        assert_eq!(clean("Sure"), None);
        assert_eq!(clean("and"), None);
        assert_eq!(clean("tomorrow at 6pm"), None);
        assert_eq!(clean("go tomorrow"), None);
    }

    #[test]
    fn test_truncates_long_titles() {
        let long = "write ".repeat(40);
        let title = clean(&long).unwrap();
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
        assert!(title.ends_with("..."));
        assert!(title.starts_with("Write write"));
    }

    #[test]
    fn test_exactly_ninety_nine_chars_gets_period() {
        let body = format!("a{}", "b".repeat(98));
        let title = clean(&body).unwrap();
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
        assert!(title.ends_with("b."));
    }

    #[test]
    fn test_cleaning_is_stable() {
        for fragment in [
            "Email boss tomorrow",
            "I need to buy groceries (milk, eggs) by Friday",
            "and call Sarah about meeting at 3pm",
        ] {
            let once = clean(fragment).unwrap();
            let twice = clean(once.trim_end_matches('.')).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_time_only_fragments() {
        assert!(is_time_only("at 6pm"));
        assert!(is_time_only("tomorrow at 5:30"));
        assert!(is_time_only("next week"));
        assert!(is_time_only("at 5"));
        assert!(!is_time_only("gym at 6pm"));
        assert!(!is_time_only("email boss"));
    }
}
