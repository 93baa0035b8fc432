pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// Key under which the favorites list is stored as JSON.
pub const FAVORITES_KEY: &str = "bible_favorites";

/// Key holding the UI language code.
pub const LANGUAGE_KEY: &str = "appLanguage";

/// String key-value persistence.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
