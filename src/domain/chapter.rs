use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::domain::Book;

/// A chapter reference. `content` stays `None` until the chapter is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub number: String,
    pub reference: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl Chapter {
    /// Client-side chapter with id `<bookId>.<number>`.
    pub fn synthetic(book: &Book, number: u32) -> Self {
        Self {
            id: synthetic_id(&book.id, number),
            number: number.to_string(),
            reference: format!("{} {}", book.name, number),
            content: None,
        }
    }
}

impl PartialEq for Chapter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Chapter {}

impl Hash for Chapter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub fn synthetic_id(book_id: &str, number: u32) -> String {
    format!("{}.{}", book_id, number)
}

/// Payload of a chapter fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterContent {
    pub id: String,
    pub number: String,
    pub reference: String,
    pub content: String,
    #[serde(default)]
    pub next: Option<ChapterLink>,
    #[serde(default)]
    pub previous: Option<ChapterLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterLink {
    pub id: String,
}
