//! Input normalization ahead of fragment splitting

use once_cell::sync::Lazy;
use regex::Regex;

static MERIDIEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([ap])\.m\.").expect("valid meridiem regex"));
static LINE_BREAK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]*\n\s*").expect("valid line break regex"));
static SPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid whitespace regex"));

/// Normalize raw input text
///
/// Maps typographic quotes, dashes and ellipses to ASCII, rewrites `a.m.`/`p.m.`
/// to `am`/`pm`, collapses whitespace runs and trims both ends. A whitespace
/// run containing a line break collapses to a single `\n` so line-separated
/// lists keep their boundaries. Never fails.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => "'".to_string(),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => "\"".to_string(),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => "-".to_string(),
            '\u{2026}' => "...".to_string(),
            '\r' => "\n".to_string(),
            other => other.to_string(),
        })
        .collect();

    let mapped = MERIDIEM_RE.replace_all(&mapped, "${1}m");
    let collapsed = LINE_BREAK_RUN_RE.replace_all(&mapped, "\n");
    let collapsed = SPACE_RUN_RE.replace_all(&collapsed, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_spaces_and_trims() {
        assert_eq!(normalize("  email   boss \t today  "), "email boss today");
    }

    #[test]
    fn test_keeps_single_line_break() {
        assert_eq!(normalize("buy milk \r\n\n  call mom"), "buy milk\ncall mom");
    }

    #[test]
    fn test_maps_typographic_characters() {
        assert_eq!(
            normalize("\u{201C}Draft\u{201D} \u{2014} don\u{2019}t forget\u{2026}"),
            "\"Draft\" - don't forget..."
        );
    }

    #[test]
    fn test_rewrites_meridiem_abbreviations() {
        assert_eq!(normalize("call at 9 a.m. sharp"), "call at 9 am sharp");
        assert_eq!(normalize("gym 6 P.M."), "gym 6 Pm");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("   \n  "), "");
    }
}
