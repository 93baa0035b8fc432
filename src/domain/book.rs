use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::domain::Chapter;

/// Chapters assumed for a book id missing from [`CHAPTER_COUNTS`].
pub const DEFAULT_CHAPTER_COUNT: u32 = 50;

/// Chapter counts for the 66 books, keyed by the API's USFM book ids.
#[rustfmt::skip]
const CHAPTER_COUNTS: &[(&str, u32)] = &[
    ("GEN", 50), ("EXO", 40), ("LEV", 27), ("NUM", 36), ("DEU", 34),
    ("JOS", 24), ("JDG", 21), ("RUT", 4), ("1SA", 31), ("2SA", 24),
    ("1KI", 22), ("2KI", 25), ("1CH", 29), ("2CH", 36), ("EZR", 10),
    ("NEH", 13), ("EST", 10), ("JOB", 42), ("PSA", 150), ("PRO", 31),
    ("ECC", 12), ("SNG", 8), ("ISA", 66), ("JER", 52), ("LAM", 5),
    ("EZK", 48), ("DAN", 12), ("HOS", 14), ("JOL", 3), ("AMO", 9),
    ("OBA", 1), ("JON", 4), ("MIC", 7), ("NAM", 3), ("HAB", 3),
    ("ZEP", 3), ("HAG", 2), ("ZEC", 14), ("MAL", 4),
    ("MAT", 28), ("MRK", 16), ("LUK", 24), ("JHN", 21), ("ACT", 28),
    ("ROM", 16), ("1CO", 16), ("2CO", 13), ("GAL", 6), ("EPH", 6),
    ("PHP", 4), ("COL", 4), ("1TH", 5), ("2TH", 3), ("1TI", 6),
    ("2TI", 4), ("TIT", 3), ("PHM", 1), ("HEB", 13), ("JAS", 5),
    ("1PE", 5), ("2PE", 3), ("1JN", 5), ("2JN", 1), ("3JN", 1),
    ("JUD", 1), ("REV", 22),
];

/// A book of a bible. Identity is the id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub name_long: String,
    pub abbreviation: String,
    #[serde(default)]
    pub chapters: Option<Vec<Chapter>>,
}

impl Book {
    /// Number of chapters in this book according to the static table.
    pub fn chapter_count(&self) -> u32 {
        chapter_count(&self.id)
    }

    /// Build the chapter list client-side, since the API does not enumerate
    /// chapters. Every chapter starts without content.
    pub fn synthetic_chapters(&self) -> Vec<Chapter> {
        (1..=self.chapter_count())
            .map(|number| Chapter::synthetic(self, number))
            .collect()
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub fn chapter_count(book_id: &str) -> u32 {
    CHAPTER_COUNTS
        .iter()
        .find(|(id, _)| *id == book_id)
        .map(|(_, count)| *count)
        .unwrap_or(DEFAULT_CHAPTER_COUNT)
}
