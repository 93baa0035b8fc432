//! Language to bible mapping and language-driven book loading.

pub mod binding;
pub mod language;

pub use binding::{BooksSnapshot, BooksState, LanguageBinding};
pub use language::LanguagePreference;

use crate::config::BiblesConfig;

/// Language code that selects the Spanish bible.
pub const SPANISH: &str = "es";

/// Binary choice between the Spanish bible and a default one.
#[derive(Debug, Clone)]
pub struct BibleCatalog {
    spanish_bible_id: String,
    default_bible_id: String,
}

impl Default for BibleCatalog {
    fn default() -> Self {
        Self::from_config(&BiblesConfig::default())
    }
}

impl BibleCatalog {
    pub fn new(spanish_bible_id: impl Into<String>, default_bible_id: impl Into<String>) -> Self {
        Self {
            spanish_bible_id: spanish_bible_id.into(),
            default_bible_id: default_bible_id.into(),
        }
    }

    pub fn from_config(config: &BiblesConfig) -> Self {
        Self::new(config.spanish.clone(), config.default.clone())
    }

    pub fn bible_id_for_language(&self, language: &str) -> &str {
        if language == SPANISH {
            &self.spanish_bible_id
        } else {
            &self.default_bible_id
        }
    }
}
