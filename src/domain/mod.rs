pub mod bible;
pub mod book;
pub mod chapter;
pub mod favorite;
pub mod verse;

pub use bible::{Bible, BibleLanguage};
pub use book::Book;
pub use chapter::{Chapter, ChapterContent, ChapterLink};
pub use favorite::FavoriteVerse;
pub use verse::{ParsedVerseLine, Verse, VerseResult};
