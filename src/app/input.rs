use crate::judge::{BLANK, Submission, count_blanks};
use crate::model::{AnswerKey, Question, QuestionKind};
use rand::seq::SliceRandom;

/// Lo que el alumno va rellenando en la pregunta en pantalla. No se guarda:
/// al retomar una partida la pregunta se contesta desde cero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnswerInput {
    /// Pregunta a la que pertenece; si cambia se vacía todo.
    pub question_id: Option<u32>,
    pub text: String,
    pub slots: Vec<Option<String>>,
    /// Banco de palabras (correctas + distractoras) ya barajado.
    pub word_bank: Vec<String>,
    /// Mensaje de fallo para las preguntas sin bucle de refuerzo.
    pub feedback: Option<String>,
    pub reflection_choice: Option<AnswerKey>,
}

impl AnswerInput {
    /// Prepara la entrada para `question` si todavía no lo está.
    pub fn prepare(&mut self, question: &Question) {
        if self.question_id == Some(question.id) {
            return;
        }
        *self = Self {
            question_id: Some(question.id),
            ..Self::default()
        };
        if let QuestionKind::DragDrop {
            sentence,
            correct_words,
            distractor_words,
            ..
        } = &question.kind
        {
            self.slots = vec![None; count_blanks(sentence)];
            self.word_bank = correct_words
                .iter()
                .chain(distractor_words)
                .cloned()
                .collect();
            self.word_bank.shuffle(&mut rand::thread_rng());
        }
    }

    /// Olvida la pregunta para que la próxima vez se prepare de nuevo.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn words(&self) -> Submission {
        Submission::Words(self.slots.clone())
    }

    pub fn text(&self) -> Submission {
        Submission::Text(self.text.clone())
    }
}

/// Trozos de la frase entre huecos: `n` huecos dan `n + 1` trozos.
pub fn sentence_parts(sentence: &str) -> Vec<&str> {
    sentence.split(BLANK).collect()
}
