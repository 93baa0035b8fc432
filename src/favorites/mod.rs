//! Persisted favorite verses.
//!
//! The list lives in a watch channel: readers take snapshots or subscribe,
//! and every mutation goes through the sender, which serializes writers.
//! Each mutation rewrites the whole list under [`FAVORITES_KEY`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::app::Result;
use crate::domain::FavoriteVerse;
use crate::store::{Store, FAVORITES_KEY};

pub struct FavoritesStore {
    store: Arc<dyn Store + Send + Sync>,
    tx: watch::Sender<Vec<FavoriteVerse>>,
}

impl FavoritesStore {
    /// Load favorites from `store`. Missing or unreadable data yields an
    /// empty list.
    pub fn load(store: Arc<dyn Store + Send + Sync>) -> Self {
        let favorites = read_favorites(store.as_ref());
        let (tx, _) = watch::channel(favorites);
        Self { store, tx }
    }

    /// Snapshot, most recent first.
    pub fn favorites(&self) -> Vec<FavoriteVerse> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<FavoriteVerse>> {
        self.tx.subscribe()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.tx.borrow().iter().any(|f| f.id == id)
    }

    /// Insert at the head unless `id` is already present.
    pub fn add(&self, id: &str, reference: &str, text: &str, book_name: &str) {
        self.tx.send_if_modified(|favorites| {
            if favorites.iter().any(|f| f.id == id) {
                return false;
            }
            favorites.insert(0, FavoriteVerse::new(id, reference, text, book_name));
            sort_by_recency(favorites);
            self.persist(favorites);
            true
        });
    }

    pub fn remove(&self, id: &str) {
        self.tx.send_modify(|favorites| {
            favorites.retain(|f| f.id != id);
            self.persist(favorites);
        });
    }

    /// Remove `id` if present, add it otherwise. Returns whether the verse
    /// is a favorite afterwards.
    pub fn toggle(&self, id: &str, reference: &str, text: &str, book_name: &str) -> bool {
        let mut now_favorite = false;
        self.tx.send_modify(|favorites| {
            let before = favorites.len();
            favorites.retain(|f| f.id != id);
            if favorites.len() == before {
                favorites.insert(0, FavoriteVerse::new(id, reference, text, book_name));
                sort_by_recency(favorites);
                now_favorite = true;
            }
            self.persist(favorites);
        });
        now_favorite
    }

    pub fn clear_all(&self) {
        self.tx.send_modify(|favorites| {
            favorites.clear();
            self.persist(favorites);
        });
    }

    fn persist(&self, favorites: &[FavoriteVerse]) {
        if let Err(e) = self.save(favorites) {
            tracing::warn!("Failed to save favorites: {}", e);
        }
    }

    fn save(&self, favorites: &[FavoriteVerse]) -> Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

fn read_favorites(store: &(dyn Store + Send + Sync)) -> Vec<FavoriteVerse> {
    let json = match store.get(FAVORITES_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read favorites, starting empty: {}", e);
            return Vec::new();
        }
    };

    match decode_favorites(&json) {
        Ok(favorites) => {
            tracing::debug!("Loaded {} favorites", favorites.len());
            favorites
        }
        Err(e) => {
            tracing::warn!("Stored favorites are corrupt, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Stored JSON to a list ordered newest first.
fn decode_favorites(json: &str) -> Result<Vec<FavoriteVerse>> {
    let mut favorites: Vec<FavoriteVerse> = serde_json::from_str(json)?;
    sort_by_recency(&mut favorites);
    Ok(favorites)
}

/// Stable, so an entry inserted at the head stays ahead of equal timestamps.
fn sort_by_recency(favorites: &mut [FavoriteVerse]) {
    favorites.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{BibliaError, Result};
    use crate::store::SqliteStore;
    use chrono::{Duration, Utc};

    fn store() -> Arc<SqliteStore> {
        Arc::new(SqliteStore::in_memory().unwrap())
    }

    fn assert_sorted(favorites: &[FavoriteVerse]) {
        assert!(favorites.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_starts_empty() {
        let favorites = FavoritesStore::load(store());
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_add_dedups_by_id() {
        let favorites = FavoritesStore::load(store());
        favorites.add("GEN.1.1", "Génesis 1:1", "En el principio", "Génesis");
        favorites.add("GEN.1.1", "Genesis 1:1", "In the beginning", "Genesis");

        let list = favorites.favorites();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "En el principio");
    }

    #[test]
    fn test_most_recent_first() {
        let favorites = FavoritesStore::load(store());
        favorites.add("GEN.1.1", "Genesis 1:1", "a", "Genesis");
        favorites.add("JHN.3.16", "John 3:16", "b", "John");
        favorites.add("PSA.23.1", "Psalm 23:1", "c", "Psalms");

        let list = favorites.favorites();
        assert_eq!(list[0].id, "PSA.23.1");
        assert_eq!(list[2].id, "GEN.1.1");
        assert_sorted(&list);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let favorites = FavoritesStore::load(store());

        assert!(favorites.toggle("GEN.1.1", "Genesis 1:1", "In the beginning", "Genesis"));
        assert!(favorites.is_favorite("GEN.1.1"));

        assert!(!favorites.toggle("GEN.1.1", "Genesis 1:1", "In the beginning", "Genesis"));
        assert!(!favorites.is_favorite("GEN.1.1"));
    }

    #[test]
    fn test_remove_and_clear() {
        let favorites = FavoritesStore::load(store());
        favorites.add("a", "A", "a", "Book");
        favorites.add("b", "B", "b", "Book");

        favorites.remove("a");
        assert!(!favorites.is_favorite("a"));
        assert_eq!(favorites.len(), 1);

        // Unknown id is a no-op
        favorites.remove("zzz");
        assert_eq!(favorites.len(), 1);

        favorites.clear_all();
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_mutations_persist() {
        let kv = store();
        let favorites = FavoritesStore::load(kv.clone());
        favorites.add("GEN.1.1", "Genesis 1:1", "In the beginning", "Genesis");
        favorites.add("JHN.3.16", "John 3:16", "For God so loved", "John");
        favorites.remove("GEN.1.1");

        let reloaded = FavoritesStore::load(kv.clone());
        let list = reloaded.favorites();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "JHN.3.16");
        assert_eq!(list[0].book_name, "John");

        reloaded.clear_all();
        assert_eq!(kv.get(FAVORITES_KEY).unwrap(), Some("[]".into()));
    }

    #[test]
    fn test_load_resorts_by_timestamp() {
        let kv = store();
        let now = Utc::now();
        let mut older = FavoriteVerse::new("old", "Old", "o", "Book");
        older.timestamp = now - Duration::hours(2);
        let mut newer = FavoriteVerse::new("new", "New", "n", "Book");
        newer.timestamp = now;
        let mut middle = FavoriteVerse::new("mid", "Mid", "m", "Book");
        middle.timestamp = now - Duration::hours(1);

        let json = serde_json::to_string(&vec![older, newer, middle]).unwrap();
        kv.set(FAVORITES_KEY, &json).unwrap();

        let list = FavoritesStore::load(kv).favorites();
        let ids: Vec<_> = list.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let kv = store();
        kv.set(FAVORITES_KEY, "{not json").unwrap();

        let favorites = FavoritesStore::load(kv.clone());
        assert!(favorites.is_empty());

        // Still usable, and overwrites the corrupt value
        favorites.add("a", "A", "a", "Book");
        assert_eq!(FavoritesStore::load(kv).len(), 1);
    }

    #[test]
    fn test_decode_reports_serialization_error() {
        let err = decode_favorites("{not json").unwrap_err();
        assert!(matches!(err, BibliaError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));

        assert!(decode_favorites("[]").unwrap().is_empty());
    }

    struct FailingStore;

    impl Store for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(BibliaError::Config("unavailable".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(BibliaError::Config("unavailable".into()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(BibliaError::Config("unavailable".into()))
        }
    }

    #[test]
    fn test_storage_failures_do_not_raise() {
        let favorites = FavoritesStore::load(Arc::new(FailingStore));
        assert!(favorites.is_empty());

        favorites.add("a", "A", "a", "Book");
        assert!(favorites.is_favorite("a"));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let favorites = FavoritesStore::load(store());
        let mut rx = favorites.subscribe();

        favorites.add("GEN.1.1", "Genesis 1:1", "In the beginning", "Genesis");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        // Duplicate add does not notify
        favorites.add("GEN.1.1", "Genesis 1:1", "In the beginning", "Genesis");
        assert!(!rx.has_changed().unwrap());
    }
}
