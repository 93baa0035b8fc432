use serde::{Deserialize, Serialize};

/// A translation/edition of scripture as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bible {
    pub id: String,
    pub name: String,
    pub name_local: String,
    pub abbreviation: String,
    pub abbreviation_local: String,
    #[serde(default)]
    pub description: Option<String>,
    pub language: BibleLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleLanguage {
    pub id: String,
    pub name: String,
}

impl Bible {
    pub fn display_name(&self) -> &str {
        if self.name_local.is_empty() {
            &self.name
        } else {
            &self.name_local
        }
    }
}
