use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteVerse {
    pub id: String,
    pub reference: String,
    pub text: String,
    pub book_name: String,
    pub timestamp: DateTime<Utc>,
}

impl FavoriteVerse {
    pub fn new(id: &str, reference: &str, text: &str, book_name: &str) -> Self {
        Self {
            id: id.to_string(),
            reference: reference.to_string(),
            text: text.to_string(),
            book_name: book_name.to_string(),
            timestamp: Utc::now(),
        }
    }
}
