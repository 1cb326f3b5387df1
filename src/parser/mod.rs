//! Importadores del formato de texto de los profesores.
//!
//! Ningún parser falla: los campos que faltan quedan vacíos o con su valor por
//! defecto. Quien llama decide qué hacer si no sale ninguna pregunta o tarjeta.

pub mod flashcards;
pub mod game;
pub mod lines;
pub mod quiz;

pub use flashcards::parse_flashcards;
pub use game::{parse_game_file, parse_game_file_grouped};
pub use quiz::parse_quiz_file;

use crate::model::{Answer, AnswerKey, HotspotRegion, PerKey, Question, QuestionKind, QuestionType};
use lines::{
    answer_option, first_untagged_line, get_line_value, get_optional_value, resolve_correct,
    split_list,
};

/// Preguntas por checkpoint que se asumen cuando el texto no dice a qué
/// checkpoint pertenece una pregunta.
pub const DEFAULT_QUESTIONS_PER_CHECKPOINT: u32 = 4;

/// Convierte las líneas de un bloque en una pregunta, según su `TYPE:`.
pub(crate) fn parse_question_block(lines: &[&str], id: u32, checkpoint: u32) -> Question {
    let question_type = QuestionType::from_type_field(&get_line_value(lines, "TYPE:"));

    let mut prompt = get_line_value(lines, "QUESTION:");
    if prompt.is_empty() {
        prompt = first_untagged_line(lines);
    }

    let incorrect_message = get_line_value(lines, "INCORRECT_MESSAGE:");
    let kind = match question_type {
        QuestionType::MultipleChoice => {
            let (a, a_star) = parse_answer(lines, AnswerKey::A);
            let (b, b_star) = parse_answer(lines, AnswerKey::B);
            let (c, c_star) = parse_answer(lines, AnswerKey::C);
            let correct = resolve_correct(
                lines,
                &[(AnswerKey::A, a_star), (AnswerKey::B, b_star), (AnswerKey::C, c_star)],
            );
            QuestionKind::MultipleChoice {
                answers: PerKey::new(a, b, c),
                correct,
            }
        }
        // La región no se puede escribir en texto: se completa luego en el editor visual
        QuestionType::Hotspot => QuestionKind::Hotspot {
            hotspot_region: HotspotRegion::full_image(),
            incorrect_message,
            labeled_image_url: get_optional_value(lines, "LABELED_IMAGE:"),
        },
        QuestionType::DragDrop => QuestionKind::DragDrop {
            sentence: get_line_value(lines, "SENTENCE:"),
            correct_words: split_list(&get_line_value(lines, "CORRECT_WORDS:")),
            distractor_words: split_list(&get_line_value(lines, "DISTRACTOR_WORDS:")),
            incorrect_message,
        },
        QuestionType::FillBlank => QuestionKind::FillBlank {
            sentence: get_line_value(lines, "SENTENCE:"),
            correct_answer: get_line_value(lines, "ANSWER:"),
            incorrect_message,
        },
    };

    Question {
        id,
        checkpoint,
        title: get_line_value(lines, "TITLE:"),
        question: prompt,
        image_url: get_optional_value(lines, "IMAGE:"),
        correct_message: get_line_value(lines, "CORRECT_MESSAGE:"),
        kind,
    }
}

/// Opción `key` con su bucle de refuerzo. Devuelve también si venía marcada con `*`.
fn parse_answer(lines: &[&str], key: AnswerKey) -> (Answer, bool) {
    let field = |name: &str| get_line_value(lines, &format!("WRONG_{key}_{name}:"));
    let (text, starred) = answer_option(lines, key).unwrap_or_default();

    // El formato de texto solo tiene un mensaje de fallo: se repite en las tres claves
    let wrong_message = field("REFLECTION_WRONG_MSG");
    let answer = Answer {
        text,
        teaching: field("TEACHING"),
        reflection_question: field("REFLECTION_Q"),
        reflection_answers: PerKey::new(
            field("REFLECTION_A"),
            field("REFLECTION_B"),
            field("REFLECTION_C"),
        ),
        reflection_correct: AnswerKey::parse(&field("REFLECTION_CORRECT")).unwrap_or_default(),
        reflection_wrong_messages: Some(PerKey::repeat(wrong_message)),
        reflection_wrong_message: None,
    };
    (answer, starred)
}

/// Campos de nivel documento, válidos en cualquier parte del texto.
pub(crate) struct DocumentFields {
    pub theme: Option<String>,
    pub welcome_message: Option<String>,
}

pub(crate) fn document_fields(lines: &[&str]) -> DocumentFields {
    DocumentFields {
        theme: get_optional_value(lines, "THEME:"),
        welcome_message: get_optional_value(lines, "WELCOME_MESSAGE:"),
    }
}
