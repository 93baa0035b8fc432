//! # biblia
//!
//! Bible reading core backed by the [api.bible](https://scripture.api.bible)
//! REST service: list bibles and books, read chapters, search verses and
//! keep a persisted list of favorite verses.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → BibleApiClient → VerseParser → Reader
//!                 ↑
//!          LanguageBinding ← LanguagePreference ← Store → FavoritesStore
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Save an API key in ~/.config/biblia/config.toml, then:
//! biblia language es
//! biblia books
//! biblia read GEN.1
//! biblia search amor
//! biblia favorites toggle JHN.3.16 --reference "Juan 3:16"
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// client, favorites, language binding and reader.
pub mod app;

/// Language to bible mapping and language-driven book loading.
///
/// - [`BibleCatalog`](catalog::BibleCatalog): "es" → Spanish bible, else default
/// - [`LanguageBinding`](catalog::LanguageBinding): generation-tagged book loads
/// - [`LanguagePreference`](catalog::LanguagePreference): persisted UI language
pub mod catalog;

/// Command-line interface using clap.
pub mod cli;

/// api.bible client with status classification and envelope decoding.
pub mod client;

/// Configuration loaded from `~/.config/biblia/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Bible`](domain::Bible), [`Book`](domain::Book), [`Chapter`](domain::Chapter)
/// - [`Verse`](domain::Verse): search results
/// - [`ParsedVerseLine`](domain::ParsedVerseLine): verses extracted from chapter content
/// - [`FavoriteVerse`](domain::FavoriteVerse): persisted favorites
pub mod domain;

/// Persisted, deduplicated favorites ordered by recency.
pub mod favorites;

/// HTTP transport.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for authenticated GETs
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Chapter content to verse parsing.
pub mod parser;

/// Chapter reading and search with display-side fallbacks.
pub mod reader;

/// Key-value persistence.
///
/// - [`Store`](store::Store): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
