// src/data.rs

use crate::backend::BackendError;
use crate::config::PlayerConfig;
use crate::model::{Document, GameContent};
use crate::parser::lines::{clean_lines, is_option_line, legacy_header, numbered_header, starts_with_ignore_case};
use crate::parser::{parse_flashcards, parse_game_file, parse_game_file_grouped, parse_quiz_file};
use std::path::Path;

/// Escape room de ejemplo embebido en el binario.
pub fn read_sample_escape_room() -> Result<GameContent, BackendError> {
    let file_content = include_str!("data/sample_escape_room.yaml");
    match serde_yaml::from_str(file_content)? {
        Document::EscapeRoom(content) => Ok(content),
        _ => Err(BackendError::NotFound("sample_escape_room".to_string())),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    EscapeRoom,
    Quiz,
    Flashcards,
}

/// Adivina qué clase de actividad describe un texto:
/// - marcas de tarjeta (`CARD n`, `FRONT:`, `Q:`) → tarjetas
/// - checkpoints o letras → escape room
/// - preguntas u opciones → quiz
/// - lo demás se lee como tarjetas (`término - definición` o tabuladas)
pub fn detect_text_kind(text: &str) -> DocumentKind {
    let lines = clean_lines(text);
    let any = |f: &dyn Fn(&str) -> bool| lines.iter().any(|l| f(l));

    if any(&|l| {
        numbered_header(l, "CARD").is_some()
            || starts_with_ignore_case(l, "FRONT:")
            || starts_with_ignore_case(l, "Q:")
    }) {
        DocumentKind::Flashcards
    } else if any(&|l| {
        numbered_header(l, "CHECKPOINT").is_some()
            || legacy_header(l).is_some()
            || starts_with_ignore_case(l, "LETTER_")
    }) {
        DocumentKind::EscapeRoom
    } else if any(&|l| {
        numbered_header(l, "QUESTION").is_some()
            || starts_with_ignore_case(l, "QUESTION:")
            || is_option_line(l)
    }) {
        DocumentKind::Quiz
    } else {
        DocumentKind::Flashcards
    }
}

pub fn parse_document_text(text: &str, kind: DocumentKind) -> Document {
    match kind {
        DocumentKind::EscapeRoom => Document::EscapeRoom(parse_game_file(text)),
        DocumentKind::Quiz => Document::Quiz(parse_quiz_file(text)),
        DocumentKind::Flashcards => Document::Flashcards(parse_flashcards(text)),
    }
}

/// Importa texto con los ajustes del reproductor: agrupación de las preguntas
/// sin checkpoint y tema para los documentos que no dicen ninguno.
pub fn import_text(text: &str, config: &PlayerConfig) -> Document {
    let kind = detect_text_kind(text);
    log::debug!("texto leído como {kind:?}");
    let mut document = match kind {
        DocumentKind::EscapeRoom => {
            let per_checkpoint = u32::try_from(config.questions_per_checkpoint).unwrap_or(u32::MAX);
            Document::EscapeRoom(parse_game_file_grouped(text, per_checkpoint))
        }
        _ => parse_document_text(text, kind),
    };
    let theme = match &mut document {
        Document::EscapeRoom(content) => &mut content.theme,
        Document::Quiz(content) => &mut content.theme,
        Document::Flashcards(content) => &mut content.theme,
    };
    if theme.is_none() {
        *theme = Some(config.default_theme.clone());
    }
    document
}

/// Lee un documento según su extensión: `json`, `yaml`/`yml` o texto.
/// Un documento sin preguntas ni tarjetas es un error.
pub fn load_document_str(
    text: &str,
    extension: Option<&str>,
    config: &PlayerConfig,
) -> Result<Document, BackendError> {
    let extension = extension.map(str::to_ascii_lowercase);
    let document = match extension.as_deref() {
        Some("json") => serde_json::from_str(text)?,
        Some("yaml" | "yml") => serde_yaml::from_str(text)?,
        _ => import_text(text, config),
    };
    if document.item_count() == 0 {
        return Err(BackendError::Empty);
    }
    Ok(document)
}

pub fn load_document_file(path: &Path, config: &PlayerConfig) -> Result<Document, BackendError> {
    let text = std::fs::read_to_string(path)?;
    let extension = path.extension().and_then(|e| e.to_str());
    let document = load_document_str(&text, extension, config)?;
    log::info!(
        "{} cargado: {} elementos",
        path.display(),
        document.item_count()
    );
    Ok(document)
}
