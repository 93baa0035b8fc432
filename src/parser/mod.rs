//! Chapter content parsing.
//!
//! Verse boundaries arrive as inline markers, e.g.
//! `<span class="v">1</span>In the beginning<span class="v">2</span>...`.
//! [`VerseParser`] walks the token stream with a small state machine and
//! degrades in three steps: strict verse extraction, then the whole text as
//! verse 1, then the raw content as verse 1. The output is never empty.

pub mod token;

use std::mem;

use html_escape::decode_html_entities;

use crate::domain::ParsedVerseLine;
use token::{Token, Tokenizer};

/// Class that marks a verse-number element.
pub const VERSE_CLASS: &str = "v";

/// Number given to the single verse produced by the fallbacks.
pub const FALLBACK_VERSE_NUMBER: &str = "1";

/// Elements that separate words when stripped.
const BLOCK_TAGS: &[&str] = &["p", "br", "div", "li"];

#[derive(Clone)]
pub struct VerseParser;

impl Default for VerseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl VerseParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> Vec<ParsedVerseLine> {
        let verses = self.parse_strict(content);
        if !verses.is_empty() {
            return verses;
        }

        tracing::debug!("No verse markers in chapter content, using fallback");

        let text = collapse_whitespace(&decode_html_entities(&strip_tags_with(content, " ")));
        if !text.is_empty() {
            return vec![ParsedVerseLine::new(FALLBACK_VERSE_NUMBER, text)];
        }

        vec![ParsedVerseLine::new(FALLBACK_VERSE_NUMBER, content)]
    }

    /// Verses found between markers, without any fallback.
    pub fn parse_strict(&self, content: &str) -> Vec<ParsedVerseLine> {
        let mut scanner = VerseScanner::default();
        for token in Tokenizer::new(content) {
            scanner.feed(token);
        }
        scanner.finish()
    }
}

/// Remove all tags from `text`, keeping only the text runs.
pub fn strip_tags(text: &str) -> String {
    strip_tags_with(text, "")
}

fn strip_tags_with(text: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in Tokenizer::new(text) {
        match token {
            Token::Text(run) => out.push_str(run),
            _ => out.push_str(replacement),
        }
    }
    out
}

struct PendingVerse {
    number: String,
    text: String,
}

enum State {
    Outside,
    /// Inside a verse-number element. `resume` is the verse that was open
    /// when the marker started.
    InMarker {
        tag: String,
        depth: usize,
        number: String,
        resume: Option<PendingVerse>,
    },
    InVerse(PendingVerse),
}

struct VerseScanner {
    state: State,
    verses: Vec<ParsedVerseLine>,
}

impl Default for VerseScanner {
    fn default() -> Self {
        Self {
            state: State::Outside,
            verses: Vec::new(),
        }
    }
}

impl VerseScanner {
    fn feed(&mut self, token: Token<'_>) {
        let state = mem::replace(&mut self.state, State::Outside);

        self.state = match state {
            State::InMarker {
                tag,
                depth,
                number,
                resume,
            } => self.in_marker(tag, depth, number, resume, token),
            state => match token {
                Token::StartTag {
                    name,
                    class,
                    self_closing: false,
                } if is_verse_marker(class.as_deref()) => State::InMarker {
                    tag: name,
                    depth: 0,
                    number: String::new(),
                    resume: match state {
                        State::InVerse(pending) => Some(pending),
                        _ => None,
                    },
                },
                Token::Text(text) => match state {
                    State::InVerse(mut pending) => {
                        pending.text.push_str(text);
                        State::InVerse(pending)
                    }
                    other => other,
                },
                Token::StartTag { name, .. } | Token::EndTag { name } => match state {
                    State::InVerse(mut pending) if BLOCK_TAGS.contains(&name.as_str()) => {
                        pending.text.push(' ');
                        State::InVerse(pending)
                    }
                    other => other,
                },
                Token::Markup => state,
            },
        };
    }

    fn in_marker(
        &mut self,
        tag: String,
        depth: usize,
        mut number: String,
        resume: Option<PendingVerse>,
        token: Token<'_>,
    ) -> State {
        let depth = match token {
            Token::Text(text) => {
                number.push_str(text);
                depth
            }
            Token::StartTag {
                ref name,
                self_closing: false,
                ..
            } if *name == tag => depth + 1,
            Token::EndTag { ref name } if *name == tag => {
                if depth == 0 {
                    return self.close_marker(number, resume);
                }
                depth - 1
            }
            _ => depth,
        };

        State::InMarker {
            tag,
            depth,
            number,
            resume,
        }
    }

    fn close_marker(&mut self, marker_text: String, resume: Option<PendingVerse>) -> State {
        let number = marker_text.trim();
        if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(previous) = resume {
                self.complete(previous);
            }
            return State::InVerse(PendingVerse {
                number: number.to_string(),
                text: String::new(),
            });
        }

        // Not a verse number; its text stays with the open verse.
        match resume {
            Some(mut pending) => {
                pending.text.push_str(&marker_text);
                State::InVerse(pending)
            }
            None => State::Outside,
        }
    }

    fn complete(&mut self, pending: PendingVerse) {
        let text = clean_verse_text(&pending.text);
        if text.is_empty() {
            tracing::trace!("Dropping empty verse {}", pending.number);
            return;
        }
        self.verses.push(ParsedVerseLine::new(pending.number, text));
    }

    fn finish(mut self) -> Vec<ParsedVerseLine> {
        let state = match mem::replace(&mut self.state, State::Outside) {
            State::InMarker { number, resume, .. } => self.close_marker(number, resume),
            state => state,
        };
        if let State::InVerse(pending) = state {
            self.complete(pending);
        }
        self.verses
    }
}

fn is_verse_marker(class: Option<&str>) -> bool {
    class.is_some_and(|c| c.split_whitespace().any(|name| name == VERSE_CLASS))
}

fn clean_verse_text(text: &str) -> String {
    collapse_whitespace(&decode_html_entities(&strip_brackets(text)))
}

/// Drop `[...]` annotations. An unmatched `[` is kept.
fn strip_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
