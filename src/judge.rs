//! Corrección de respuestas para cada tipo de pregunta y de los candados finales.

use crate::model::{AnswerKey, HotspotRegion, Question, QuestionKind, RegionShape};

/// Marcador de hueco dentro de `sentence`.
pub const BLANK: &str = "[BLANK]";

/// Lo que muestra la pantalla de fallo de un quiz cuando la pregunta es de hotspot.
pub const HOTSPOT_ANSWER_DISPLAY: &str = "la zona marcada de la imagen";

/// Respuesta del alumno, según el tipo de pregunta.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Choice(AnswerKey),
    /// Clic en porcentaje (0-100) respecto a la imagen.
    Click { x: f64, y: f64 },
    /// Palabra colocada en cada hueco; `None` si el hueco sigue vacío.
    Words(Vec<Option<String>>),
    Text(String),
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl HotspotRegion {
    /// Prueba de acierto en coordenadas porcentuales.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        is_point_in_region(x, y, self)
    }
}

pub fn is_point_in_region(x: f64, y: f64, region: &HotspotRegion) -> bool {
    let coords = &region.coords;
    match region.shape {
        RegionShape::Rectangle => match coords.as_slice() {
            [rx, ry, rw, rh, ..] => x >= *rx && x <= rx + rw && y >= *ry && y <= ry + rh,
            _ => false,
        },
        RegionShape::Circle => match coords.as_slice() {
            [cx, cy, r, ..] => ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() <= *r,
            _ => false,
        },
        RegionShape::Polygon => {
            // Pares (x, y); una coordenada suelta al final se descarta
            let points: Vec<(f64, f64)> = coords.chunks_exact(2).map(|p| (p[0], p[1])).collect();
            if points.len() < 3 {
                return false;
            }
            let mut inside = false;
            let mut j = points.len() - 1;
            for i in 0..points.len() {
                let (xi, yi) = points[i];
                let (xj, yj) = points[j];
                if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                    inside = !inside;
                }
                j = i;
            }
            inside
        }
    }
}

pub fn count_blanks(sentence: &str) -> usize {
    sentence.matches(BLANK).count()
}

/// Hueco a hueco y en orden. Un hueco vacío nunca es correcto; las palabras
/// correctas que sobran no se piden.
pub fn check_drag_drop(placed: &[Option<String>], correct_words: &[String]) -> bool {
    placed.iter().enumerate().all(|(i, word)| {
        word.as_deref()
            .zip(correct_words.get(i))
            .is_some_and(|(w, expected)| same_text(w, expected))
    })
}

pub fn check_fill_blank(answer: &str, correct_answer: &str) -> bool {
    !answer.trim().is_empty() && same_text(answer, correct_answer)
}

pub fn check_final_word(guess: &str, final_word: &str) -> bool {
    !final_word.trim().is_empty() && same_text(guess, final_word)
}

/// Orden en que hay que pulsar las letras del candado alfabético.
pub fn sorted_lock_letters(letters: &[String]) -> Vec<String> {
    let mut sorted = letters.to_vec();
    sorted.sort();
    sorted
}

/// Corrige una respuesta. Un envío de otro tipo distinto al de la pregunta es incorrecto.
pub fn grade(question: &Question, submission: &Submission) -> bool {
    match (&question.kind, submission) {
        (QuestionKind::MultipleChoice { correct, .. }, Submission::Choice(key)) => key == correct,
        (QuestionKind::Hotspot { hotspot_region, .. }, Submission::Click { x, y }) => {
            hotspot_region.contains(*x, *y)
        }
        (QuestionKind::DragDrop { correct_words, .. }, Submission::Words(placed)) => {
            check_drag_drop(placed, correct_words)
        }
        (QuestionKind::FillBlank { correct_answer, .. }, Submission::Text(answer)) => {
            check_fill_blank(answer, correct_answer)
        }
        _ => false,
    }
}

/// Texto de la respuesta correcta para la pantalla de fallo del quiz.
pub fn correct_answer_display(question: &Question) -> String {
    match &question.kind {
        QuestionKind::MultipleChoice { answers, correct } => answers.get(*correct).text.clone(),
        QuestionKind::Hotspot { .. } => HOTSPOT_ANSWER_DISPLAY.to_string(),
        QuestionKind::DragDrop { correct_words, .. } => correct_words.join(", "),
        QuestionKind::FillBlank { correct_answer, .. } => correct_answer.clone(),
    }
}
