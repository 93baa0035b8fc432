use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use biblia::app::AppContext;
use biblia::cli::{commands, Cli, Commands, FavoritesAction};
use biblia::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(api_key) = cli.api_key {
        config.api.api_key = api_key;
    }

    let ctx = AppContext::new(&config)?;
    let language = cli.language.unwrap_or_else(|| ctx.language.current());

    match cli.command {
        Commands::Bibles { code } => {
            commands::list_bibles(&ctx, &code).await?;
        }
        Commands::Books => {
            commands::list_books(&ctx, &language).await?;
        }
        Commands::Chapters { book } => {
            commands::list_chapters(&ctx, &language, &book).await?;
        }
        Commands::Read { chapter } => {
            commands::read_chapter(&ctx, &language, &chapter).await?;
        }
        Commands::Search { query } => {
            commands::search(&ctx, &language, &query.join(" ")).await?;
        }
        Commands::Favorites { action } => match action.unwrap_or(FavoritesAction::List) {
            FavoritesAction::List => commands::list_favorites(&ctx, &language)?,
            FavoritesAction::Add(args) => commands::add_favorite(&ctx, &args)?,
            FavoritesAction::Toggle(args) => commands::toggle_favorite(&ctx, &args)?,
            FavoritesAction::Remove { id } => commands::remove_favorite(&ctx, &id)?,
            FavoritesAction::Clear => commands::clear_favorites(&ctx)?,
        },
        Commands::Language { code, reset } => {
            commands::language(&ctx, code.as_deref(), reset).await?;
        }
    }

    Ok(())
}
