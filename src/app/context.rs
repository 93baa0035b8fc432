use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::app::error::{BibliaError, Result};
use crate::catalog::{BibleCatalog, LanguageBinding, LanguagePreference};
use crate::client::BibleApiClient;
use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::reader::Reader;
use crate::store::sqlite::SqliteStore;
use crate::store::Store;

/// Owns every service; there are no process-wide singletons.
pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub client: Arc<BibleApiClient>,
    pub catalog: BibleCatalog,
    pub favorites: FavoritesStore,
    pub language: LanguagePreference,
    pub books: Arc<LanguageBinding>,
    pub reader: Reader,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let db_path = match &config.storage.database {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(config.api.timeout())?);
        Self::with_parts(config, store, fetcher)
    }

    pub fn in_memory(config: &Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_parts(config, store, fetcher)
    }

    fn with_parts(
        config: &Config,
        store: Arc<SqliteStore>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
    ) -> Result<Self> {
        let client = Arc::new(BibleApiClient::new(
            fetcher,
            &config.api.base_url,
            config.api.api_key.clone(),
        )?);
        let catalog = BibleCatalog::from_config(&config.bibles);

        let kv: Arc<dyn Store + Send + Sync> = store.clone();
        let favorites = FavoritesStore::load(kv.clone());
        let language = LanguagePreference::load(kv, config.default_language.as_deref());
        let books = Arc::new(LanguageBinding::new(client.clone(), catalog.clone()));
        let reader = Reader::new(client.clone(), catalog.clone());

        Ok(Self {
            store,
            client,
            catalog,
            favorites,
            language,
            books,
            reader,
        })
    }

    /// Bible id for the current language.
    pub fn current_bible_id(&self) -> String {
        self.catalog
            .bible_id_for_language(&self.language.current())
            .to_string()
    }

    /// Save `language` and start loading its books. The handle resolves to
    /// whether that load was published.
    pub fn change_language(&self, language: &str) -> Result<JoinHandle<bool>> {
        self.language.set(language)?;
        Ok(self.books.change_language(language))
    }

    /// Forget the saved language and load books for the default one.
    pub fn reset_language(&self) -> Result<JoinHandle<bool>> {
        let language = self.language.reset()?;
        Ok(self.books.change_language(&language))
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| BibliaError::Config("Could not find data directory".into()))?;
        let biblia_dir = data_dir.join("biblia");
        std::fs::create_dir_all(&biblia_dir)?;
        Ok(biblia_dir.join("biblia.db"))
    }
}
