use crate::app::{AppContext, BibliaError, Result};
use crate::catalog::{BooksSnapshot, BooksState};
use crate::cli::FavoriteArgs;
use crate::domain::Book;
use crate::reader::messages;

pub async fn list_bibles(ctx: &AppContext, language: &str) -> Result<()> {
    let bibles = ctx.client.list_bibles(language).await?;

    if bibles.is_empty() {
        println!("No bibles for language {}", language);
        return Ok(());
    }

    for bible in bibles {
        println!("{}  {} ({})", bible.id, bible.display_name(), bible.abbreviation_local);
    }

    Ok(())
}

pub async fn list_books(ctx: &AppContext, language: &str) -> Result<()> {
    let snapshot = ctx.books.load_books(language).await;

    for book in loaded_books(snapshot)? {
        println!("{:<4} {} ({} chapters)", book.id, book.name, book.chapter_count());
    }

    Ok(())
}

fn loaded_books(snapshot: BooksSnapshot) -> Result<Vec<Book>> {
    match snapshot.state {
        BooksState::Loaded(books) => Ok(books),
        BooksState::Failed(message) => Err(BibliaError::BooksUnavailable(message)),
        BooksState::Idle | BooksState::Loading => Err(BibliaError::BooksUnavailable(format!(
            "no result for {}",
            snapshot.language
        ))),
    }
}

pub async fn list_chapters(ctx: &AppContext, language: &str, book_id: &str) -> Result<()> {
    let bible_id = ctx.catalog.bible_id_for_language(language);
    let books = ctx.client.list_books(bible_id).await?;
    let book = books
        .iter()
        .find(|b| b.id.eq_ignore_ascii_case(book_id))
        .ok_or(BibliaError::NotFound)?;

    for chapter in ctx.reader.chapters(book) {
        println!("{:<8} {}", chapter.id, chapter.reference);
    }

    Ok(())
}

pub async fn read_chapter(ctx: &AppContext, language: &str, chapter_id: &str) -> Result<()> {
    let view = ctx.reader.read_chapter(chapter_id, language).await;

    if let Some(reference) = &view.reference {
        println!("{}\n", reference);
    }
    for verse in &view.verses {
        let marker = if ctx.favorites.is_favorite(&verse_id(&view.chapter_id, &verse.number)) {
            "♥"
        } else {
            " "
        };
        println!("{}{:>3} {}", marker, verse.number, verse.text);
    }

    if !view.failed {
        let previous = view.previous.as_ref().map(|p| p.id.as_str()).unwrap_or("-");
        let next = view.next.as_ref().map(|n| n.id.as_str()).unwrap_or("-");
        println!("\n< {}   {} >", previous, next);
    }

    Ok(())
}

pub async fn search(ctx: &AppContext, language: &str, query: &str) -> Result<()> {
    let results = ctx.reader.search(query, language).await;

    if results.is_empty() {
        println!("{}", messages::no_results(language));
        return Ok(());
    }

    for verse in results {
        let marker = if ctx.favorites.is_favorite(&verse.id) { "♥" } else { " " };
        println!("{} {}\n    {}", marker, verse.reference, verse.text);
    }

    Ok(())
}

pub fn list_favorites(ctx: &AppContext, language: &str) -> Result<()> {
    let favorites = ctx.favorites.favorites();

    if favorites.is_empty() {
        println!("{}", messages::no_favorites(language));
        return Ok(());
    }

    for favorite in favorites {
        println!(
            "{} {} [{}]\n    {}",
            favorite.timestamp.format("%Y-%m-%d"),
            favorite.reference,
            favorite.id,
            favorite.text
        );
    }

    Ok(())
}

pub fn add_favorite(ctx: &AppContext, args: &FavoriteArgs) -> Result<()> {
    if ctx.favorites.is_favorite(&args.id) {
        println!("Already a favorite: {}", args.id);
        return Ok(());
    }
    ctx.favorites.add(&args.id, &args.reference, &args.text, &args.book);
    println!("Added favorite: {}", args.id);
    Ok(())
}

pub fn toggle_favorite(ctx: &AppContext, args: &FavoriteArgs) -> Result<()> {
    if ctx.favorites.toggle(&args.id, &args.reference, &args.text, &args.book) {
        println!("Added favorite: {}", args.id);
    } else {
        println!("Removed favorite: {}", args.id);
    }
    Ok(())
}

pub fn remove_favorite(ctx: &AppContext, id: &str) -> Result<()> {
    if !ctx.favorites.is_favorite(id) {
        println!("Not a favorite: {}", id);
        return Ok(());
    }
    ctx.favorites.remove(id);
    println!("Removed favorite: {}", id);
    Ok(())
}

pub fn clear_favorites(ctx: &AppContext) -> Result<()> {
    let count = ctx.favorites.len();
    ctx.favorites.clear_all();
    println!("Removed {} favorites", count);
    Ok(())
}

pub async fn language(ctx: &AppContext, code: Option<&str>, reset: bool) -> Result<()> {
    let handle = match (code, reset) {
        (_, true) => ctx.reset_language()?,
        (Some(code), false) => ctx.change_language(code)?,
        (None, false) => {
            println!(
                "Language: {} (bible {})",
                ctx.language.current(),
                ctx.current_bible_id()
            );
            return Ok(());
        }
    };

    if !handle.await? {
        tracing::debug!("Book load superseded by a later language change");
    }

    let snapshot = ctx.books.snapshot();
    println!("Language: {} (bible {})", snapshot.language, snapshot.bible_id);
    let books = loaded_books(snapshot)?;
    println!("{} books", books.len());
    Ok(())
}

/// Verse id within a chapter, e.g. `GEN.1` + `3` → `GEN.1.3`.
fn verse_id(chapter_id: &str, number: &str) -> String {
    format!("{}.{}", chapter_id, number)
}
