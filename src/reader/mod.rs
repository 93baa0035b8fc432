//! Read and search paths as the app surfaces them.
//!
//! Unlike [`BibleApiClient`], these never fail: a chapter that cannot be
//! loaded becomes a single placeholder verse, and a failed search is
//! reported as no results.

pub mod messages;

use std::sync::Arc;

use crate::catalog::BibleCatalog;
use crate::client::BibleApiClient;
use crate::domain::{Book, Chapter, ChapterLink, ParsedVerseLine, VerseResult};
use crate::parser::{strip_tags, VerseParser, FALLBACK_VERSE_NUMBER};

/// A chapter ready for display.
#[derive(Debug, Clone)]
pub struct ChapterView {
    pub chapter_id: String,
    pub reference: Option<String>,
    pub verses: Vec<ParsedVerseLine>,
    pub next: Option<ChapterLink>,
    pub previous: Option<ChapterLink>,
    /// Set when `verses` is the error placeholder.
    pub failed: bool,
}

pub struct Reader {
    client: Arc<BibleApiClient>,
    catalog: BibleCatalog,
    parser: VerseParser,
}

impl Reader {
    pub fn new(client: Arc<BibleApiClient>, catalog: BibleCatalog) -> Self {
        Self {
            client,
            catalog,
            parser: VerseParser::new(),
        }
    }

    /// Chapters of `book`, built locally.
    pub fn chapters(&self, book: &Book) -> Vec<Chapter> {
        book.synthetic_chapters()
    }

    pub async fn read_chapter(&self, chapter_id: &str, language: &str) -> ChapterView {
        let bible_id = self.catalog.bible_id_for_language(language);

        match self.client.fetch_chapter(bible_id, chapter_id).await {
            Ok(chapter) => ChapterView {
                chapter_id: chapter.id,
                reference: Some(chapter.reference),
                verses: self.parser.parse(&chapter.content),
                next: chapter.next,
                previous: chapter.previous,
                failed: false,
            },
            Err(e) => {
                tracing::warn!("Failed to load chapter {}: {}", chapter_id, e);
                ChapterView {
                    chapter_id: chapter_id.to_string(),
                    reference: None,
                    verses: vec![ParsedVerseLine::new(
                        FALLBACK_VERSE_NUMBER,
                        messages::error_loading_chapter(language),
                    )],
                    next: None,
                    previous: None,
                    failed: true,
                }
            }
        }
    }

    /// Search the bible for `language`. Blank queries and failures give no
    /// results. Verse text comes back with markup removed.
    pub async fn search(&self, query: &str, language: &str) -> Vec<VerseResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let bible_id = self.catalog.bible_id_for_language(language);
        match self.client.search_verses(bible_id, query).await {
            Ok(verses) => verses
                .into_iter()
                .map(|mut verse| {
                    verse.text = strip_tags(&verse.text);
                    verse
                })
                .collect(),
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }
}
