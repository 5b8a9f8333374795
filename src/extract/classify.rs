//! Keyword and pattern classifiers
//!
//! Each classifier is an independent scan over one fragment. Keyword tables are
//! compiled once into word-bounded regexes and shared read-only across calls.

use super::dates;
use super::model::{Category, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

const HIGH_PRIORITY: &[&str] = &[
    "urgent",
    "urgently",
    "asap",
    "immediately",
    "critical",
    "important",
    "emergency",
    "deadline",
    "high priority",
    "top priority",
    "right away",
    "right now",
    "as soon as possible",
    "crucial",
    "overdue",
    "must",
    "vital",
];

const MEDIUM_PRIORITY: &[&str] = &[
    "soon",
    "this week",
    "medium priority",
    "normal priority",
    "moderate",
    "should",
    "follow up",
    "follow-up",
    "when you can",
];

const LOW_PRIORITY: &[&str] = &[
    "low priority",
    "whenever",
    "someday",
    "some day",
    "eventually",
    "maybe",
    "if time",
    "if possible",
    "no rush",
    "not urgent",
    "when possible",
    "later",
    "gym",
    "workout",
    "hobby",
    "relax",
    "leisure",
    "netflix",
];

const MEETING_KEYWORDS: &[&str] = &[
    "meeting",
    "meetings",
    "meet",
    "call",
    "sync",
    "standup",
    "stand-up",
    "conference",
    "zoom",
    "interview",
    "huddle",
    "catch up",
    "catch-up",
    "discuss",
    "presentation",
    "demo",
    "webinar",
    "agenda",
];

const FINANCE_KEYWORDS: &[&str] = &[
    "pay", "payment", "bill", "bills", "bank", "budget", "invoice", "tax", "taxes", "rent",
    "salary", "expense", "expenses", "insurance", "loan", "mortgage", "savings", "transfer",
    "refund",
];

const HEALTH_KEYWORDS: &[&str] = &[
    "gym",
    "workout",
    "doctor",
    "dentist",
    "medicine",
    "meds",
    "pharmacy",
    "run",
    "running",
    "yoga",
    "exercise",
    "hospital",
    "therapy",
    "checkup",
    "check-up",
    "vitamins",
    "appointment",
];

const PERSONAL_KEYWORDS: &[&str] = &[
    "mom", "dad", "mum", "family", "friend", "friends", "birthday", "groceries", "grocery",
    "home", "house", "clean", "laundry", "cook", "dinner", "shopping", "buy", "pick up", "kids",
    "wife", "husband", "partner", "vacation", "movie", "party", "pet", "dog", "cat", "gift",
    "garden", "car",
];

const WORK_KEYWORDS: &[&str] = &[
    "work",
    "report",
    "reports",
    "email",
    "boss",
    "client",
    "clients",
    "project",
    "deadline",
    "office",
    "team",
    "code",
    "deploy",
    "proposal",
    "document",
    "docs",
    "spreadsheet",
    "slides",
    "manager",
    "colleague",
    "review",
    "ticket",
    "bug",
    "release",
    "contract",
    "draft",
    "submit",
];

const SARCASM_PATTERNS: &[&str] = &[
    r"\byeah,? right\b",
    r"\bcan'?t wait to\b",
    r"\bgood luck with that\b",
    r"\bas if\b",
    r"\boh,? (?:great|joy|sure)\b",
    r"\btotally gonna\b",
    r"\bi'll totally\b",
    r"\bwhat could (?:possibly )?go wrong\b",
    r"\bbecause that always works\b",
    r"\blike that'?s (?:ever )?going to happen\b",
    r"\bjust what i needed\b",
    r"\bmy favou?rite thing\b",
    r"\blove that for me\b",
];

/// Words that never name an assignee
const NON_NAMES: &[&str] = &[
    "me", "myself", "him", "her", "them", "us", "you", "it", "everyone", "everybody", "someone",
    "somebody", "anyone", "the", "a", "an", "about", "for", "to", "if", "whether", "my", "our",
    "your", "his", "their",
];

const NEGATIONS: &[&str] = &["not", "no", "never", "isn't", "aren't"];

fn keyword_regex(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("valid keyword regex")
}

static HIGH_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(HIGH_PRIORITY));
static MEDIUM_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(MEDIUM_PRIORITY));
static LOW_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(LOW_PRIORITY));

static CATEGORY_TABLES: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    vec![
        (Category::Meeting, keyword_regex(MEETING_KEYWORDS)),
        (Category::Finance, keyword_regex(FINANCE_KEYWORDS)),
        (Category::Health, keyword_regex(HEALTH_KEYWORDS)),
        (Category::Personal, keyword_regex(PERSONAL_KEYWORDS)),
        (Category::Work, keyword_regex(WORK_KEYWORDS)),
    ]
});

static SARCASM_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    SARCASM_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid sarcasm regex"))
        .collect()
});

static ASSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:assign(?:ed)?\s+to|tell|ask|remind)\s+([a-z][a-z'-]*)")
        .expect("valid assignee regex")
});
static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[\s(\[])@([A-Za-z][A-Za-z0-9_-]*)").expect("valid mention regex"));

fn is_negated(lower: &str, start: usize) -> bool {
    lower[..start]
        .split_whitespace()
        .last()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .is_some_and(|word| NEGATIONS.contains(&word))
}

/// Classify priority from keywords, checking high, then medium, then low
///
/// A high keyword directly preceded by a negation ("not urgent") is ignored.
/// Defaults to medium.
pub fn classify_priority(fragment: &str) -> Priority {
    let lower = fragment.to_lowercase();
    if HIGH_RE
        .find_iter(&lower)
        .any(|m| !is_negated(&lower, m.start()))
    {
        Priority::high
    } else if MEDIUM_RE.is_match(&lower) {
        Priority::medium
    } else if LOW_RE.is_match(&lower) {
        Priority::low
    } else {
        Priority::medium
    }
}

/// Time-boxed tasks are never low priority
pub fn escalate_for_time(priority: Priority, due_date: Option<&str>) -> Priority {
    match (priority, due_date) {
        (Priority::low, Some(due)) if dates::has_time(due) => Priority::medium,
        (p, _) => p,
    }
}

/// Keyword hit count for one category
pub fn category_score(fragment: &str, category: Category) -> usize {
    let lower = fragment.to_lowercase();
    CATEGORY_TABLES
        .iter()
        .find(|(c, _)| *c == category)
        .map_or(0, |(_, re)| re.find_iter(&lower).count())
}

/// Pick the category with the strictly highest score
///
/// `order` decides ties: the earlier category wins. Extended categories are
/// skipped unless `extended` is set. All-zero scores default to Work.
pub fn classify_category(fragment: &str, order: &[Category], extended: bool) -> Category {
    let mut best = Category::Work;
    let mut best_score = 0;
    for &category in order {
        if category.is_extended() && !extended {
            continue;
        }
        let score = category_score(fragment, category);
        if score > best_score {
            best = category;
            best_score = score;
        }
    }
    best
}

pub fn is_sarcastic(fragment: &str) -> bool {
    let lower = fragment.to_lowercase();
    SARCASM_RES.iter().any(|re| re.is_match(&lower))
}

fn title_case(word: &str) -> String {
    let word = word.trim_end_matches("'s").trim_end_matches(['\'', '-']);
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Find the person a fragment delegates to
///
/// Recognizes "assign(ed) to X", "tell X", "ask X", "remind X" and "@X";
/// the earliest usable mention wins. Pronouns are not names.
pub fn extract_assignee(fragment: &str) -> Option<String> {
    let verb_matches = ASSIGN_RE
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1));
    let mention_matches = MENTION_RE
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1));

    let mut candidates: Vec<_> = verb_matches.chain(mention_matches).collect();
    candidates.sort_by_key(|m| m.start());

    candidates
        .into_iter()
        .filter(|m| !NON_NAMES.contains(&m.as_str().to_lowercase().as_str()))
        .map(|m| title_case(m.as_str()))
        .find(|name| !name.is_empty())
}
