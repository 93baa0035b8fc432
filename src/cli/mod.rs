pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "biblia")]
#[command(about = "Read, search and bookmark the Bible from api.bible", long_about = None)]
pub struct Cli {
    /// api.bible key, overriding the config file
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// UI language for this run (e.g. "es", "en"), without saving it
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List bibles available in a language
    Bibles {
        /// ISO 639-3 language code
        #[arg(default_value = "spa")]
        code: String,
    },
    /// List the books of the current bible
    Books,
    /// List the chapters of a book
    Chapters {
        /// Book id, e.g. GEN
        book: String,
    },
    /// Read a chapter
    Read {
        /// Chapter id, e.g. GEN.1
        chapter: String,
    },
    /// Search verses
    Search {
        /// Words to look for
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Manage favorite verses
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// Show or change the UI language
    Language {
        /// New language code
        #[arg(conflicts_with = "reset")]
        code: Option<String>,
        /// Forget the saved language and use the default
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorites, most recent first
    List,
    /// Add a verse by id (e.g. GEN.1.1)
    Add(FavoriteArgs),
    /// Add a verse, or remove it if already saved
    Toggle(FavoriteArgs),
    /// Remove a verse by id
    Remove {
        id: String,
    },
    /// Remove every favorite
    Clear,
}

#[derive(clap::Args)]
pub struct FavoriteArgs {
    /// Verse id, e.g. GEN.1.1
    pub id: String,
    /// Display reference, e.g. "Genesis 1:1"
    #[arg(long, default_value = "")]
    pub reference: String,
    /// Verse text
    #[arg(long, default_value = "")]
    pub text: String,
    /// Book name
    #[arg(long, default_value = "")]
    pub book: String,
}
