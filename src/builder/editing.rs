use super::{
    BuilderState, CheckpointData, FlashcardBuilderState, FlashcardData, QuestionBody, QuestionData,
    QuizBuilderState, question_title,
};
use crate::model::QuestionType;

/// Número con el que el editor enseña una pregunta. Supone que todos los
/// checkpoints tienen `questions_per_checkpoint` preguntas, así que tras añadir
/// o quitar preguntas puede no coincidir con el id que tendrá al guardar.
pub fn display_question_number(
    checkpoint_index: usize,
    offset: usize,
    questions_per_checkpoint: usize,
) -> usize {
    checkpoint_index * questions_per_checkpoint + offset + 1
}

impl QuestionData {
    /// Cambia el tipo de la pregunta. Solo sobreviven título, enunciado, imagen
    /// y mensaje de acierto; lo propio del tipo anterior se pierde.
    pub fn change_question_type(&mut self, question_type: QuestionType) {
        if self.question_type() == question_type {
            return;
        }
        self.body = QuestionBody::empty(question_type);
    }
}

impl BuilderState {
    pub fn add_checkpoint(&mut self, questions_per_checkpoint: usize) {
        let number = self.checkpoints.len() + 1;
        self.checkpoints
            .push(CheckpointData::empty(number, questions_per_checkpoint));
    }

    /// Nunca deja el escape room sin checkpoints.
    pub fn remove_checkpoint(&mut self, index: usize) -> bool {
        if self.checkpoints.len() <= 1 || index >= self.checkpoints.len() {
            return false;
        }
        self.checkpoints.remove(index);
        true
    }

    pub fn add_question(&mut self, checkpoint_index: usize) {
        let Some(checkpoint) = self.checkpoints.get_mut(checkpoint_index) else {
            return;
        };
        let title = question_title(checkpoint_index + 1, checkpoint.questions.len() + 1);
        checkpoint
            .questions
            .push(QuestionData::empty(QuestionType::MultipleChoice, title));
    }

    /// Cada checkpoint conserva al menos una pregunta.
    pub fn remove_question(&mut self, checkpoint_index: usize, question_index: usize) -> bool {
        let Some(checkpoint) = self.checkpoints.get_mut(checkpoint_index) else {
            return false;
        };
        if checkpoint.questions.len() <= 1 || question_index >= checkpoint.questions.len() {
            return false;
        }
        checkpoint.questions.remove(question_index);
        true
    }

    pub fn question_count(&self) -> usize {
        self.checkpoints.iter().map(|cp| cp.questions.len()).sum()
    }
}

impl QuizBuilderState {
    pub fn add_question(&mut self) {
        let title = format!("Pregunta {}", self.questions.len() + 1);
        self.questions
            .push(QuestionData::empty(QuestionType::MultipleChoice, title));
    }

    pub fn remove_question(&mut self, index: usize) -> bool {
        if self.questions.len() <= 1 || index >= self.questions.len() {
            return false;
        }
        self.questions.remove(index);
        true
    }
}

impl FlashcardBuilderState {
    pub fn add_card(&mut self) {
        self.cards.push(FlashcardData::default());
    }

    pub fn remove_card(&mut self, index: usize) -> bool {
        if self.cards.len() <= 1 || index >= self.cards.len() {
            return false;
        }
        self.cards.remove(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_numbers_assume_fixed_checkpoint_size() {
        assert_eq!(display_question_number(0, 0, 4), 1);
        assert_eq!(display_question_number(2, 1, 4), 10);
    }

    #[test]
    fn type_change_keeps_only_common_fields() {
        let mut question = QuestionData::empty(QuestionType::DragDrop, "Orden");
        question.question = "Ordena".into();
        question.image_url = "https://img/x.png".into();
        question.correct_message = "Bien".into();
        question.body = QuestionBody::DragDrop {
            sentence: "[BLANK]".into(),
            correct_words: vec!["a".into()],
            distractor_words: vec!["b".into()],
            incorrect_message: "No".into(),
        };

        question.change_question_type(QuestionType::FillBlank);
        assert_eq!(question.title, "Orden");
        assert_eq!(question.question, "Ordena");
        assert_eq!(question.image_url, "https://img/x.png");
        assert_eq!(question.correct_message, "Bien");
        assert_eq!(question.body, QuestionBody::empty(QuestionType::FillBlank));

        // Volver al tipo de antes no recupera nada
        question.change_question_type(QuestionType::DragDrop);
        assert_eq!(question.body, QuestionBody::empty(QuestionType::DragDrop));
    }

    #[test]
    fn same_type_is_a_no_op() {
        let mut question = QuestionData::empty(QuestionType::FillBlank, "f");
        question.body = QuestionBody::FillBlank {
            sentence: "[BLANK]".into(),
            correct_answer: "sí".into(),
            incorrect_message: String::new(),
        };
        let before = question.clone();
        question.change_question_type(QuestionType::FillBlank);
        assert_eq!(question, before);
    }

    #[test]
    fn checkpoints_and_questions_never_drop_to_zero() {
        let mut state = BuilderState::empty(1, 1);
        assert!(!state.remove_checkpoint(0));
        assert!(!state.remove_question(0, 0));

        state.add_checkpoint(2);
        assert_eq!(state.checkpoints.len(), 2);
        assert_eq!(state.checkpoints[1].questions[1].title, "Checkpoint 2 - Pregunta 2");
        state.add_question(1);
        assert_eq!(state.checkpoints[1].questions[2].title, "Checkpoint 2 - Pregunta 3");
        assert_eq!(state.question_count(), 4);

        assert!(state.remove_question(1, 0));
        assert!(state.remove_checkpoint(0));
        assert!(!state.remove_checkpoint(5));
        assert_eq!(state.checkpoints.len(), 1);
    }

    #[test]
    fn quiz_and_deck_editing() {
        let mut quiz = QuizBuilderState::empty(1);
        quiz.add_question();
        assert_eq!(quiz.questions[1].title, "Pregunta 2");
        assert!(quiz.remove_question(0));
        assert!(!quiz.remove_question(0));

        let mut deck = FlashcardBuilderState::empty(1);
        deck.add_card();
        assert!(deck.remove_card(1));
        assert!(!deck.remove_card(0));
    }
}
