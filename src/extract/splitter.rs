//! Bracket- and quote-aware fragment splitter
//!
//! The scanner walks the text one character at a time, tracking bracket depth
//! and quotation state. Delimiters are honoured only at depth 0 outside quotes,
//! so parenthetical lists and quoted strings are never torn apart.

/// Minimum trimmed length of an emitted fragment
pub const MIN_FRAGMENT_CHARS: usize = 3;

/// Separator words, matched case-insensitively in this order.
/// Each entry includes its surrounding spaces.
const SEPARATOR_WORDS: [&str; 6] = [" and ", " or ", " then ", " also ", " plus ", " & "];

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
    quote: Option<char>,
    buffer: String,
    fragments: Vec<String>,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
            quote: None,
            buffer: String::new(),
            fragments: Vec::new(),
        }
    }

    fn prev(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    fn next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn between_digits(&self) -> bool {
        matches!((self.prev(), self.next()), (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit())
    }

    fn flush(&mut self) {
        let fragment = self.buffer.trim();
        if fragment.chars().count() >= MIN_FRAGMENT_CHARS {
            self.fragments.push(fragment.to_string());
        }
        self.buffer.clear();
    }

    /// Length in chars of a separator word starting at the cursor, if any
    fn separator_at(&self) -> Option<usize> {
        SEPARATOR_WORDS.iter().find_map(|word| {
            let len = word.chars().count();
            let end = self.pos + len;
            if end > self.chars.len() {
                return None;
            }
            let matches = self.chars[self.pos..end]
                .iter()
                .zip(word.chars())
                .all(|(c, w)| c.to_ascii_lowercase() == w);
            matches.then_some(len)
        })
    }

    fn is_standalone_plus(&self) -> bool {
        self.prev().is_none_or(char::is_whitespace) && self.next().is_none_or(char::is_whitespace)
    }

    /// Whether a quote character at the cursor opens or closes a quotation
    fn is_quote_toggle(&self, c: char) -> bool {
        if self.prev() == Some('\\') {
            return false;
        }
        if c == '\'' {
            let inside_word = matches!(
                (self.prev(), self.next()),
                (Some(a), Some(b)) if a.is_alphanumeric() && b.is_alphanumeric()
            );
            if inside_word {
                return false;
            }
            // A possessive ("kids'") never opens a quotation
            let opens_here = self
                .prev()
                .is_none_or(|p| p.is_whitespace() || matches!(p, '(' | '[' | '{'));
            if self.quote.is_none() && !opens_here {
                return false;
            }
        }
        match self.quote {
            Some(open) => open == c,
            None => true,
        }
    }

    fn run(mut self) -> Vec<String> {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];

            if (c == '"' || c == '\'') && self.is_quote_toggle(c) {
                self.quote = match self.quote {
                    Some(_) => None,
                    None => Some(c),
                };
                self.buffer.push(c);
                self.pos += 1;
                continue;
            }

            if self.quote.is_some() {
                self.buffer.push(c);
                self.pos += 1;
                continue;
            }

            match c {
                '(' | '[' | '{' => {
                    self.depth += 1;
                    self.buffer.push(c);
                    self.pos += 1;
                    continue;
                }
                ')' | ']' | '}' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.buffer.push(c);
                    self.pos += 1;
                    continue;
                }
                _ => {}
            }

            if self.depth > 0 {
                self.buffer.push(c);
                self.pos += 1;
                continue;
            }

            match c {
                '.' if self.between_digits() => {
                    self.buffer.push(c);
                    self.pos += 1;
                }
                // An ellipsis stays in the fragment and ends it
                '.' if self.next() == Some('.') => {
                    self.buffer.push(c);
                    self.pos += 1;
                }
                '.' if self.prev() == Some('.') => {
                    self.buffer.push(c);
                    self.flush();
                    self.pos += 1;
                }
                '.' | ';' | '!' | '?' | '\n' => {
                    self.flush();
                    self.pos += 1;
                }
                ',' if self.between_digits() => {
                    self.buffer.push(c);
                    self.pos += 1;
                }
                ',' => {
                    self.flush();
                    self.pos += 1;
                    while self.chars.get(self.pos).is_some_and(|c| *c == ' ') {
                        self.pos += 1;
                    }
                }
                '+' if self.is_standalone_plus() => {
                    self.flush();
                    self.pos += 1;
                }
                ' ' => match self.separator_at() {
                    Some(len) => {
                        self.flush();
                        self.pos += len;
                    }
                    None => {
                        self.buffer.push(c);
                        self.pos += 1;
                    }
                },
                _ => {
                    self.buffer.push(c);
                    self.pos += 1;
                }
            }
        }
        self.flush();
        self.fragments
    }
}

/// Split normalized text into ordered task fragments
///
/// Fragments are trimmed and at least [`MIN_FRAGMENT_CHARS`] long.
pub fn split(text: &str) -> Vec<String> {
    Scanner::new(text).run()
}
