use serde::{Deserialize, Serialize};

/// A verse as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub id: String,
    pub org_id: String,
    pub book_id: String,
    pub chapter_id: String,
    pub text: String,
    pub reference: String,
}

/// Search hits share the verse shape.
pub type VerseResult = Verse;

/// One verse extracted from chapter content, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerseLine {
    pub number: String,
    pub text: String,
}

impl ParsedVerseLine {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
        }
    }
}
