use super::lines::{clean_lines, get_line_value, numbered_header, first_untagged_line};
use super::{document_fields, parse_question_block};
use crate::model::QuizContent;

/// Bloques separados por líneas en blanco; último recurso cuando no hay `QUESTION n`.
fn blank_line_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn question_marker_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut blocks: Vec<Vec<&'a str>> = Vec::new();
    for &line in lines {
        if numbered_header(line, "QUESTION").is_some() {
            blocks.push(vec![line]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks
}

/// Un bloque sin enunciado (solo campos de documento, p. ej.) no es una pregunta.
fn has_prompt(block: &[&str]) -> bool {
    !get_line_value(block, "QUESTION:").is_empty() || !first_untagged_line(block).is_empty()
}

/// Importa un quiz desde texto. Los checkpoints no existen en un quiz.
pub fn parse_quiz_file(content: &str) -> QuizContent {
    let lines = clean_lines(content);
    let has_markers = lines.iter().any(|l| numbered_header(l, "QUESTION").is_some());

    let blocks = if has_markers {
        question_marker_blocks(&lines)
    } else {
        blank_line_blocks(content)
            .into_iter()
            .filter(|b| has_prompt(b))
            .collect()
    };

    let questions = blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| parse_question_block(block, idx as u32 + 1, 1))
        .collect::<Vec<_>>();

    log::debug!(
        "quiz importado: {} preguntas ({})",
        questions.len(),
        if has_markers { "QUESTION n" } else { "bloques" }
    );

    let fields = document_fields(&lines);
    QuizContent {
        questions,
        theme: fields.theme,
        welcome_message: fields.welcome_message,
        ..QuizContent::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerKey, QuestionKind};

    #[test]
    fn question_markers_split_the_quiz() {
        let text = "\
WELCOME_MESSAGE: Hola clase
QUESTION 1
QUESTION: ¿Capital de Francia?
A) Roma
B) París *
C) Lisboa

QUESTION 2
TYPE: fill
SENTENCE: Dos más dos son [BLANK].
ANSWER: cuatro
INCORRECT_MESSAGE: Casi";
        let quiz = parse_quiz_file(text);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.welcome_message.as_deref(), Some("Hola clase"));
        assert_eq!(quiz.questions[0].choices().map(|(_, c)| c), Some(AnswerKey::B));
        match &quiz.questions[1].kind {
            QuestionKind::FillBlank {
                correct_answer,
                incorrect_message,
                ..
            } => {
                assert_eq!(correct_answer, "cuatro");
                assert_eq!(incorrect_message, "Casi");
            }
            other => panic!("tipo inesperado: {other:?}"),
        }
        assert!(quiz.questions.iter().all(|q| q.checkpoint == 1));
    }

    #[test]
    fn blank_lines_are_the_last_resort() {
        let text = "\
THEME: space

¿Cuántas patas tiene una araña?
A. 6
B. 8
C. 10
CORRECT: B

¿Color del cielo?
A. verde
B. rojo
C. azul *
";
        let quiz = parse_quiz_file(text);
        assert_eq!(quiz.theme.as_deref(), Some("space"));
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].question, "¿Cuántas patas tiene una araña?");
        assert_eq!(quiz.questions[0].choices().map(|(_, c)| c), Some(AnswerKey::B));
        assert_eq!(quiz.questions[1].id, 2);
        assert_eq!(quiz.questions[1].choices().map(|(_, c)| c), Some(AnswerKey::C));
    }

    #[test]
    fn empty_text_has_no_questions() {
        assert!(parse_quiz_file("   \n\n").questions.is_empty());
    }
}
