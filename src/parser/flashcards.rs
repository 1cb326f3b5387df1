use super::lines::{get_line_value, get_optional_value, numbered_header, starts_with_ignore_case};
use crate::model::{Flashcard, FlashcardContent};

/// Dialecto del texto de tarjetas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashcardDialect {
    /// `CARD n` + `FRONT:` / `BACK:`
    Cards,
    /// Pares `Q:` / `A:`
    QuestionAnswer,
    /// `anverso<TAB>reverso`
    Tabbed,
    /// `término - definición`
    Dashed,
}

const DOCUMENT_PREFIXES: &[&str] = &["TITLE:", "DESCRIPTION:", "THEME:"];

fn is_document_line(line: &str) -> bool {
    DOCUMENT_PREFIXES
        .iter()
        .any(|p| starts_with_ignore_case(line, p))
}

pub fn detect_dialect(lines: &[&str]) -> FlashcardDialect {
    if lines
        .iter()
        .any(|l| numbered_header(l, "CARD").is_some() || starts_with_ignore_case(l, "FRONT:"))
    {
        FlashcardDialect::Cards
    } else if lines.iter().any(|l| starts_with_ignore_case(l, "Q:")) {
        FlashcardDialect::QuestionAnswer
    } else if lines.iter().any(|l| l.contains('\t')) {
        FlashcardDialect::Tabbed
    } else {
        FlashcardDialect::Dashed
    }
}

fn card_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let has_headers = lines.iter().any(|l| numbered_header(l, "CARD").is_some());
    let mut blocks: Vec<Vec<&'a str>> = Vec::new();
    for &line in lines {
        // Sin cabeceras `CARD n`, cada `FRONT:` abre una tarjeta nueva
        let starts_card = if has_headers {
            numbered_header(line, "CARD").is_some()
        } else {
            starts_with_ignore_case(line, "FRONT:")
        };
        if starts_card {
            blocks.push(vec![line]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks
}

fn value_after(line: &str) -> String {
    line.split_once(':')
        .map(|(_, v)| v.trim().to_string())
        .unwrap_or_default()
}

fn parse_pairs(lines: &[&str], dialect: FlashcardDialect) -> Vec<(String, String, Option<String>, Option<String>)> {
    match dialect {
        FlashcardDialect::Cards => card_blocks(lines)
            .iter()
            .map(|block| {
                (
                    get_line_value(block, "FRONT:"),
                    get_line_value(block, "BACK:"),
                    get_optional_value(block, "FRONT_IMAGE:"),
                    get_optional_value(block, "BACK_IMAGE:"),
                )
            })
            .collect(),
        FlashcardDialect::QuestionAnswer => {
            let mut pairs: Vec<(String, String, Option<String>, Option<String>)> = Vec::new();
            let mut waiting_back = false;
            for line in lines {
                if starts_with_ignore_case(line, "Q:") {
                    pairs.push((value_after(line), String::new(), None, None));
                    waiting_back = true;
                } else if starts_with_ignore_case(line, "A:") && waiting_back {
                    if let Some(pair) = pairs.last_mut() {
                        pair.1 = value_after(line);
                    }
                    waiting_back = false;
                }
            }
            pairs
        }
        FlashcardDialect::Tabbed => lines
            .iter()
            .filter_map(|l| l.split_once('\t'))
            .map(|(f, b)| (f.trim().to_string(), b.trim().to_string(), None, None))
            .collect(),
        FlashcardDialect::Dashed => lines
            .iter()
            .filter(|l| !is_document_line(l))
            .filter_map(|l| l.split_once(" - "))
            .map(|(f, b)| (f.trim().to_string(), b.trim().to_string(), None, None))
            .collect(),
    }
}

/// Importa un mazo de tarjetas desde cualquiera de los cuatro dialectos.
pub fn parse_flashcards(content: &str) -> FlashcardContent {
    // Aquí no se recorta antes de tiempo: el tabulador es significativo
    let lines: Vec<&str> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.trim_matches(|c: char| c == ' ' || c == '\r'))
        .collect();
    let dialect = detect_dialect(&lines);

    let cards = parse_pairs(&lines, dialect)
        .into_iter()
        .filter(|(front, back, _, _)| !front.is_empty() || !back.is_empty())
        .enumerate()
        .map(|(idx, (front, back, front_image_url, back_image_url))| Flashcard {
            id: idx as u32 + 1,
            front,
            back,
            front_image_url,
            back_image_url,
        })
        .collect::<Vec<_>>();

    log::debug!("tarjetas importadas: {} ({:?})", cards.len(), dialect);

    FlashcardContent {
        cards,
        title: get_optional_value(&lines, "TITLE:"),
        description: get_optional_value(&lines, "DESCRIPTION:"),
        theme: get_optional_value(&lines, "THEME:"),
    }
}
