//! Book list bound to the UI language.
//!
//! Each language change takes a new generation before its request starts.
//! A response is published only if its generation is still the newest, so
//! a slow request for an earlier language can never overwrite a later one.
//! The generation lives in the published snapshot and only changes under
//! the channel lock, so a snapshot's language and books always agree.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::BibleCatalog;
use crate::client::BibleApiClient;
use crate::domain::Book;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooksState {
    Idle,
    Loading,
    Loaded(Vec<Book>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct BooksSnapshot {
    pub generation: u64,
    pub language: String,
    pub bible_id: String,
    pub state: BooksState,
}

pub struct LanguageBinding {
    client: Arc<BibleApiClient>,
    catalog: BibleCatalog,
    tx: watch::Sender<BooksSnapshot>,
}

impl LanguageBinding {
    pub fn new(client: Arc<BibleApiClient>, catalog: BibleCatalog) -> Self {
        let (tx, _) = watch::channel(BooksSnapshot {
            generation: 0,
            language: String::new(),
            bible_id: String::new(),
            state: BooksState::Idle,
        });

        Self {
            client,
            catalog,
            tx,
        }
    }

    pub fn catalog(&self) -> &BibleCatalog {
        &self.catalog
    }

    pub fn subscribe(&self) -> watch::Receiver<BooksSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> BooksSnapshot {
        self.tx.borrow().clone()
    }

    /// Start loading books for `language` in the background.
    ///
    /// The generation is taken before this returns, so calls order by
    /// invocation, not by task scheduling. The handle resolves to whether
    /// the result was published.
    pub fn change_language(self: &Arc<Self>, language: &str) -> JoinHandle<bool> {
        let generation = self.begin(language);
        let this = Arc::clone(self);
        let language = language.to_string();
        tokio::spawn(async move { this.complete(generation, &language).await })
    }

    /// Load books for `language` and wait for the outcome.
    pub async fn load_books(&self, language: &str) -> BooksSnapshot {
        let generation = self.begin(language);
        self.complete(generation, language).await;
        self.snapshot()
    }

    fn begin(&self, language: &str) -> u64 {
        let bible_id = self.catalog.bible_id_for_language(language).to_string();
        let mut generation = 0;

        self.tx.send_modify(|snapshot| {
            generation = snapshot.generation + 1;
            *snapshot = BooksSnapshot {
                generation,
                language: language.to_string(),
                bible_id,
                state: BooksState::Loading,
            };
        });

        tracing::debug!("Loading books for {}, generation {}", language, generation);
        generation
    }

    async fn complete(&self, generation: u64, language: &str) -> bool {
        let bible_id = self.catalog.bible_id_for_language(language);
        let state = match self.client.list_books(bible_id).await {
            Ok(books) => {
                tracing::info!("Loaded {} books for {}", books.len(), language);
                BooksState::Loaded(books)
            }
            Err(e) => {
                tracing::warn!("Failed to load books for {}: {}", language, e);
                BooksState::Failed(e.to_string())
            }
        };

        self.tx.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                tracing::debug!("Discarding stale books for {} (generation {})", language, generation);
                return false;
            }
            snapshot.state = state;
            true
        })
    }
}
