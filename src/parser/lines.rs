//! Primitivas de extracción por líneas compartidas por todos los formatos de texto.

use crate::model::AnswerKey;

/// Etiquetas de campo conocidas. Una línea que empieza por cualquiera de ellas
/// no es texto libre.
const FIELD_PREFIXES: &[&str] = &[
    "TYPE:",
    "TITLE:",
    "QUESTION:",
    "IMAGE:",
    "LABELED_IMAGE:",
    "CORRECT:",
    "CORRECT_MESSAGE:",
    "INCORRECT_MESSAGE:",
    "SENTENCE:",
    "ANSWER:",
    "CORRECT_WORDS:",
    "DISTRACTOR_WORDS:",
    "THEME:",
    "WELCOME_MESSAGE:",
    "FINAL_WORD:",
    "FINAL_CLUE:",
    "WRONG_",
    "LETTER_",
];

/// Separa el texto en líneas recortadas, sin líneas vacías.
pub fn clean_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.is_char_boundary(prefix.len())
        && line[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Primera línea que empieza por `prefix` (sin distinguir mayúsculas);
/// devuelve lo que va detrás de los primeros dos puntos, recortado.
/// Cadena vacía si no existe.
pub fn get_line_value(lines: &[&str], prefix: &str) -> String {
    lines
        .iter()
        .find(|l| starts_with_ignore_case(l, prefix))
        .and_then(|l| l.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Como [`get_line_value`] pero `None` si el campo falta o está vacío.
pub fn get_optional_value(lines: &[&str], prefix: &str) -> Option<String> {
    let value = get_line_value(lines, prefix);
    if value.is_empty() { None } else { Some(value) }
}

/// Lista separada por comas, sin elementos vacíos.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Texto de una opción `A. texto`, `A: texto` o `A) texto` (letra sin distinguir
/// mayúsculas) y si está marcada con `*` al principio o al final.
pub fn answer_option(lines: &[&str], key: AnswerKey) -> Option<(String, bool)> {
    lines.iter().find_map(|line| {
        // WRONG_X_REFLECTION_A: no es una opción
        if is_field_line(line) {
            return None;
        }
        let (rest, leading_star) = match line.strip_prefix('*') {
            Some(rest) => (rest.trim_start(), true),
            None => (*line, false),
        };
        let text = option_body(rest, key)?;
        let mut starred = leading_star;
        let mut text = text.trim();
        if let Some(t) = text.strip_prefix('*') {
            starred = true;
            text = t.trim_start();
        }
        if let Some(t) = text.strip_suffix('*') {
            starred = true;
            text = t.trim_end();
        }
        Some((text.to_string(), starred))
    })
}

fn option_body(line: &str, key: AnswerKey) -> Option<&str> {
    let mut chars = line.char_indices();
    let (_, letter) = chars.next()?;
    if letter.to_ascii_uppercase() != key.as_char() {
        return None;
    }
    let (idx, delimiter) = chars.next()?;
    if !matches!(delimiter, '.' | ':' | ')') {
        return None;
    }
    Some(&line[idx + delimiter.len_utf8()..])
}

pub fn is_option_line(line: &str) -> bool {
    let line = line.strip_prefix('*').unwrap_or(line).trim_start();
    AnswerKey::ALL
        .iter()
        .any(|k| option_body(line, *k).is_some())
}

pub fn is_field_line(line: &str) -> bool {
    FIELD_PREFIXES
        .iter()
        .any(|p| starts_with_ignore_case(line, p))
}

/// Clave correcta: la primera opción marcada con `*`; si ninguna lo está, el
/// campo `CORRECT:`; y si tampoco, `A`.
pub fn resolve_correct(lines: &[&str], starred: &[(AnswerKey, bool)]) -> AnswerKey {
    starred
        .iter()
        .find(|(_, s)| *s)
        .map(|(k, _)| *k)
        .or_else(|| AnswerKey::parse(&get_line_value(lines, "CORRECT:")))
        .unwrap_or(AnswerKey::A)
}

/// `WORD <n>` al principio de la línea (p. ej. `CHECKPOINT 2`, `QUESTION 10:`).
/// Tras el número solo se admite puntuación.
pub fn numbered_header(line: &str, word: &str) -> Option<u32> {
    if !starts_with_ignore_case(line, word) {
        return None;
    }
    let rest = &line[word.len()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let number = rest[..digits_end].parse().ok()?;
    let tail = rest[digits_end..].trim();
    if tail.chars().all(|c| matches!(c, ':' | '.' | ')')) {
        Some(number)
    } else {
        None
    }
}

/// Cabecera antigua `CHECKPOINT n - DECISION m`.
pub fn legacy_header(line: &str) -> Option<(u32, u32)> {
    if !starts_with_ignore_case(line, "CHECKPOINT") {
        return None;
    }
    let (left, right) = line.split_once('-')?;
    let checkpoint = numbered_header(left.trim(), "CHECKPOINT")?;
    let decision = numbered_header(right.trim(), "DECISION")?;
    Some((checkpoint, decision))
}

pub fn is_header_line(line: &str) -> bool {
    legacy_header(line).is_some()
        || numbered_header(line, "CHECKPOINT").is_some()
        || numbered_header(line, "QUESTION").is_some()
}

/// Primera línea que no es cabecera, campo etiquetado ni opción: el enunciado
/// cuando no viene con `QUESTION:`.
pub fn first_untagged_line(lines: &[&str]) -> String {
    lines
        .iter()
        .find(|l| !is_header_line(l) && !is_field_line(l) && !is_option_line(l))
        .map(|l| l.to_string())
        .unwrap_or_default()
}
