//! The few user-facing strings produced by the core.

use crate::catalog::SPANISH;

pub fn error_loading_chapter(language: &str) -> &'static str {
    if language == SPANISH {
        "Error al cargar el capítulo"
    } else {
        "Error loading chapter"
    }
}

pub fn no_results(language: &str) -> &'static str {
    if language == SPANISH {
        "No se encontraron resultados"
    } else {
        "No results found"
    }
}

pub fn no_favorites(language: &str) -> &'static str {
    if language == SPANISH {
        "Aún no tienes versículos favoritos"
    } else {
        "You have no favorite verses yet"
    }
}
