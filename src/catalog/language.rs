use std::sync::{Arc, RwLock};

use crate::app::Result;
use crate::store::{Store, LANGUAGE_KEY};

/// Used when nothing is saved, configured or detectable.
pub const FALLBACK_LANGUAGE: &str = "es";

/// The persisted UI language code.
pub struct LanguagePreference {
    store: Arc<dyn Store + Send + Sync>,
    /// What `current` falls back to when nothing is saved.
    default: String,
    current: RwLock<String>,
}

impl LanguagePreference {
    /// Saved value, else `default`, else the process locale, else "es".
    pub fn load(store: Arc<dyn Store + Send + Sync>, default: Option<&str>) -> Self {
        let saved = store.get(LANGUAGE_KEY).unwrap_or_else(|e| {
            tracing::warn!("Failed to read language preference: {}", e);
            None
        });

        let default = default
            .map(String::from)
            .or_else(system_language)
            .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());
        let current = saved.unwrap_or_else(|| default.clone());

        Self {
            store,
            default,
            current: RwLock::new(current),
        }
    }

    pub fn current(&self) -> String {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, language: &str) -> Result<()> {
        self.store.set(LANGUAGE_KEY, language)?;
        let mut current = match self.current.write() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = language.to_string();
        tracing::info!("Language set to {}", language);
        Ok(())
    }

    /// Forget the saved language and return to the default.
    pub fn reset(&self) -> Result<String> {
        self.store.remove(LANGUAGE_KEY)?;
        let mut current = match self.current.write() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = self.default.clone();
        tracing::info!("Language reset to {}", self.default);
        Ok(self.default.clone())
    }
}

/// Two-letter code from `LC_ALL`/`LANG`, e.g. "en_US.UTF-8" → "en".
fn system_language() -> Option<String> {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| language_from_locale(&value))
}

fn language_from_locale(locale: &str) -> Option<String> {
    let code: String = locale
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();

    match code.as_str() {
        "" | "c" | "posix" => None,
        _ => Some(code),
    }
}
