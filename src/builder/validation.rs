//! Comprobaciones previas a guardar. Devuelven el primer problema encontrado,
//! con un mensaje listo para enseñar al profesor.

use super::{BuilderState, FlashcardBuilderState, QuestionBody, QuestionData, QuizBuilderState};
use crate::judge::{BLANK, count_blanks};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Comprueba una pregunta. `n` es su número visible y `with_teaching` pide la
/// explicación de cada opción equivocada (solo en escape rooms).
fn validate_question(question: &QuestionData, n: usize, with_teaching: bool) -> Result<(), String> {
    if blank(&question.question) {
        return Err(format!("Escribe el enunciado de la pregunta {n}"));
    }
    if blank(&question.correct_message) {
        return Err(format!("Escribe el mensaje de acierto de la pregunta {n}"));
    }

    match &question.body {
        QuestionBody::MultipleChoice { answers, correct } => {
            if let Some((key, _)) = answers.iter().find(|(_, a)| blank(&a.text)) {
                return Err(format!("Escribe la opción {key} de la pregunta {n}"));
            }
            if with_teaching {
                if let Some(key) = correct.others().find(|k| blank(&answers.get(*k).teaching)) {
                    return Err(format!(
                        "Escribe la explicación para la opción {key} de la pregunta {n}"
                    ));
                }
            }
        }
        QuestionBody::Hotspot { region, .. } => {
            if blank(&question.image_url) {
                return Err(format!("Añade una imagen a la pregunta {n}"));
            }
            if region.is_none() {
                return Err(format!("Marca la zona correcta de la imagen en la pregunta {n}"));
            }
        }
        QuestionBody::DragDrop {
            sentence,
            correct_words,
            ..
        } => {
            if blank(sentence) {
                return Err(format!("Escribe la frase de la pregunta {n}"));
            }
            let blanks = count_blanks(sentence);
            if blanks == 0 {
                return Err(format!("La frase de la pregunta {n} necesita al menos un {BLANK}"));
            }
            if blanks != correct_words.len() {
                return Err(format!(
                    "La pregunta {n} tiene {blanks} huecos y {} palabras correctas",
                    correct_words.len()
                ));
            }
        }
        QuestionBody::FillBlank {
            sentence,
            correct_answer,
            ..
        } => {
            if blank(sentence) {
                return Err(format!("Escribe la frase de la pregunta {n}"));
            }
            if count_blanks(sentence) == 0 {
                return Err(format!("La frase de la pregunta {n} necesita un {BLANK}"));
            }
            if blank(correct_answer) {
                return Err(format!("Escribe la respuesta de la pregunta {n}"));
            }
        }
    }
    Ok(())
}

pub fn validate_builder_state(state: &BuilderState) -> Result<(), String> {
    if blank(&state.title) {
        return Err("Escribe un título para el escape room".to_string());
    }
    for (idx, checkpoint) in state.checkpoints.iter().enumerate() {
        if blank(&checkpoint.letter) {
            return Err(format!("Escribe la letra del Checkpoint {}", idx + 1));
        }
    }

    let questions = state.checkpoints.iter().flat_map(|cp| &cp.questions);
    for (idx, question) in questions.enumerate() {
        validate_question(question, idx + 1, true)?;
    }
    Ok(())
}

pub fn validate_quiz_builder_state(state: &QuizBuilderState) -> Result<(), String> {
    if blank(&state.title) {
        return Err("Escribe un título para el quiz".to_string());
    }
    if state.questions.is_empty() {
        return Err("Añade al menos una pregunta".to_string());
    }
    for (idx, question) in state.questions.iter().enumerate() {
        validate_question(question, idx + 1, false)?;
    }
    Ok(())
}

pub fn validate_flashcard_builder_state(state: &FlashcardBuilderState) -> Result<(), String> {
    if blank(&state.title) {
        return Err("Escribe un título para las tarjetas".to_string());
    }
    let mut filled = state
        .cards
        .iter()
        .enumerate()
        .filter(|(_, card)| !card.is_blank())
        .peekable();
    if filled.peek().is_none() {
        return Err("Añade al menos una tarjeta".to_string());
    }
    for (idx, card) in filled {
        if blank(&card.front) || blank(&card.back) {
            return Err(format!("La tarjeta {} necesita anverso y reverso", idx + 1));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FlashcardData;
    use crate::model::{AnswerKey, HotspotRegion, QuestionType};

    fn complete_choice(question: &mut QuestionData) {
        question.question = "¿Cuál?".into();
        question.correct_message = "¡Sí!".into();
        if let QuestionBody::MultipleChoice { answers, .. } = &mut question.body {
            for key in AnswerKey::ALL {
                let answer = answers.get_mut(key);
                answer.text = format!("opción {key}");
                answer.teaching = "Piensa".into();
            }
        }
    }

    fn valid_escape_room() -> BuilderState {
        let mut state = BuilderState::empty(2, 1);
        state.title = "Misterio".into();
        for (idx, checkpoint) in state.checkpoints.iter_mut().enumerate() {
            checkpoint.letter = ["X", "Y"][idx].into();
            complete_choice(&mut checkpoint.questions[0]);
        }
        state
    }

    #[test]
    fn complete_escape_room_passes() {
        assert_eq!(validate_builder_state(&valid_escape_room()), Ok(()));
    }

    #[test]
    fn first_problem_is_reported() {
        let mut state = valid_escape_room();
        state.title = "  ".into();
        state.checkpoints[1].letter.clear();
        assert_eq!(
            validate_builder_state(&state),
            Err("Escribe un título para el escape room".to_string())
        );

        state.title = "Misterio".into();
        assert_eq!(
            validate_builder_state(&state),
            Err("Escribe la letra del Checkpoint 2".to_string())
        );
    }

    #[test]
    fn teaching_is_only_required_for_wrong_options() {
        let mut state = valid_escape_room();
        if let QuestionBody::MultipleChoice { answers, correct } = &mut state.checkpoints[1].questions[0].body {
            *correct = AnswerKey::B;
            answers.b.teaching.clear();
            assert_eq!(validate_builder_state(&state), Ok(()));
        }
        if let QuestionBody::MultipleChoice { answers, .. } = &mut state.checkpoints[1].questions[0].body {
            answers.c.teaching.clear();
        }
        assert_eq!(
            validate_builder_state(&state),
            Err("Escribe la explicación para la opción C de la pregunta 2".to_string())
        );
    }

    #[test]
    fn hotspot_needs_image_and_region() {
        let mut question = QuestionData::empty(QuestionType::Hotspot, "h");
        question.question = "Señala".into();
        question.correct_message = "Bien".into();
        assert!(validate_question(&question, 1, true).is_err_and(|e| e.contains("imagen")));

        question.image_url = "https://img/a.png".into();
        assert!(validate_question(&question, 1, true).is_err_and(|e| e.contains("zona")));

        if let QuestionBody::Hotspot { region, .. } = &mut question.body {
            *region = Some(HotspotRegion::full_image());
        }
        assert_eq!(validate_question(&question, 1, true), Ok(()));
    }

    #[test]
    fn drag_drop_blank_count_must_match() {
        let mut question = QuestionData::empty(QuestionType::DragDrop, "d");
        question.question = "Ordena".into();
        question.correct_message = "Bien".into();
        question.body = QuestionBody::DragDrop {
            sentence: "[BLANK] es [BLANK].".into(),
            correct_words: vec!["X".into()],
            distractor_words: Vec::new(),
            incorrect_message: String::new(),
        };
        assert_eq!(
            validate_question(&question, 3, false),
            Err("La pregunta 3 tiene 2 huecos y 1 palabras correctas".to_string())
        );
    }

    #[test]
    fn fill_blank_needs_marker_and_answer() {
        let mut state = QuizBuilderState::empty(1);
        state.title = "Quiz".into();
        let question = &mut state.questions[0];
        question.question = "Completa".into();
        question.correct_message = "Bien".into();
        question.body = QuestionBody::FillBlank {
            sentence: "El cielo es azul".into(),
            correct_answer: "azul".into(),
            incorrect_message: String::new(),
        };
        assert!(validate_quiz_builder_state(&state).is_err_and(|e| e.contains(BLANK)));

        if let QuestionBody::FillBlank { sentence, .. } = &mut state.questions[0].body {
            *sentence = "El cielo es [BLANK]".into();
        }
        assert_eq!(validate_quiz_builder_state(&state), Ok(()));
    }

    #[test]
    fn flashcards_need_both_sides() {
        let mut state = FlashcardBuilderState::empty(2);
        state.title = "Capitales".into();
        assert_eq!(
            validate_flashcard_builder_state(&state),
            Err("Añade al menos una tarjeta".to_string())
        );

        state.cards[1] = FlashcardData {
            front: "Francia".into(),
            ..FlashcardData::default()
        };
        assert_eq!(
            validate_flashcard_builder_state(&state),
            Err("La tarjeta 2 necesita anverso y reverso".to_string())
        );

        state.cards[1].back = "París".into();
        assert_eq!(validate_flashcard_builder_state(&state), Ok(()));
    }
}
