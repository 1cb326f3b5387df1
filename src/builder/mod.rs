//! Estado de edición de las actividades.
//!
//! Es una copia del documento pensada para formularios: ningún campo falta
//! (cadena vacía en lugar de ausente) y los mensajes de fallo de la reflexión
//! siempre van por opción. Nunca se guarda tal cual; se convierte a documento
//! con las funciones de [`mapping`].

pub mod editing;
pub mod mapping;
pub mod validation;

pub use editing::display_question_number;
pub use mapping::{
    builder_state_to_game_content, flashcard_builder_state_to_content,
    flashcard_content_to_builder_state, game_content_to_builder_state,
    quiz_builder_state_to_content, quiz_content_to_builder_state,
};
pub use validation::{validate_builder_state, validate_flashcard_builder_state, validate_quiz_builder_state};

use crate::model::{AnswerKey, CustomThemeBackgrounds, HotspotRegion, PerKey, QuestionType};

pub const DEFAULT_THEME: &str = "classic";
pub const DEFAULT_CHECKPOINTS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReflectionData {
    pub question: String,
    pub answers: PerKey<String>,
    pub correct: AnswerKey,
    pub wrong_messages: PerKey<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnswerData {
    pub text: String,
    pub teaching: String,
    pub reflection: ReflectionData,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuestionBody {
    MultipleChoice {
        answers: PerKey<AnswerData>,
        correct: AnswerKey,
    },
    Hotspot {
        /// `None` mientras no se haya dibujado.
        region: Option<HotspotRegion>,
        incorrect_message: String,
        labeled_image_url: String,
    },
    DragDrop {
        sentence: String,
        correct_words: Vec<String>,
        distractor_words: Vec<String>,
        incorrect_message: String,
    },
    FillBlank {
        sentence: String,
        correct_answer: String,
        incorrect_message: String,
    },
}

impl QuestionBody {
    pub fn empty(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::MultipleChoice => QuestionBody::MultipleChoice {
                answers: PerKey::default(),
                correct: AnswerKey::A,
            },
            QuestionType::Hotspot => QuestionBody::Hotspot {
                region: None,
                incorrect_message: String::new(),
                labeled_image_url: String::new(),
            },
            QuestionType::DragDrop => QuestionBody::DragDrop {
                sentence: String::new(),
                correct_words: Vec::new(),
                distractor_words: Vec::new(),
                incorrect_message: String::new(),
            },
            QuestionType::FillBlank => QuestionBody::FillBlank {
                sentence: String::new(),
                correct_answer: String::new(),
                incorrect_message: String::new(),
            },
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionBody::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionBody::Hotspot { .. } => QuestionType::Hotspot,
            QuestionBody::DragDrop { .. } => QuestionType::DragDrop,
            QuestionBody::FillBlank { .. } => QuestionType::FillBlank,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionData {
    pub title: String,
    pub question: String,
    pub image_url: String,
    pub correct_message: String,
    pub body: QuestionBody,
}

impl QuestionData {
    pub fn empty(question_type: QuestionType, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            question: String::new(),
            image_url: String::new(),
            correct_message: String::new(),
            body: QuestionBody::empty(question_type),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.body.question_type()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointData {
    pub letter: String,
    pub letter_message: String,
    pub questions: Vec<QuestionData>,
}

impl CheckpointData {
    pub fn empty(number: usize, questions_per_checkpoint: usize) -> Self {
        Self {
            letter: String::new(),
            letter_message: default_letter_message(number),
            questions: (1..=questions_per_checkpoint.max(1))
                .map(|q| QuestionData::empty(QuestionType::MultipleChoice, question_title(number, q)))
                .collect(),
        }
    }
}

pub fn question_title(checkpoint: usize, question: usize) -> String {
    format!("Checkpoint {checkpoint} - Pregunta {question}")
}

pub fn default_letter_message(checkpoint: usize) -> String {
    format!("¡Buen trabajo completando el Checkpoint {checkpoint}!")
}

/// Escape room en edición.
#[derive(Clone, Debug, PartialEq)]
pub struct BuilderState {
    pub title: String,
    pub theme: String,
    pub background_image: String,
    pub welcome_message: String,
    pub custom_theme_id: String,
    pub custom_theme_backgrounds: Option<CustomThemeBackgrounds>,
    pub final_word: String,
    pub final_clue: String,
    pub checkpoints: Vec<CheckpointData>,
}

impl BuilderState {
    pub fn empty(checkpoints: usize, questions_per_checkpoint: usize) -> Self {
        Self {
            title: String::new(),
            theme: DEFAULT_THEME.to_string(),
            background_image: String::new(),
            welcome_message: String::new(),
            custom_theme_id: String::new(),
            custom_theme_backgrounds: None,
            final_word: String::new(),
            final_clue: String::new(),
            checkpoints: (1..=checkpoints.max(1))
                .map(|n| CheckpointData::empty(n, questions_per_checkpoint))
                .collect(),
        }
    }
}

/// Quiz en edición: una lista plana de preguntas.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizBuilderState {
    pub title: String,
    pub theme: String,
    pub background_image: String,
    pub welcome_message: String,
    pub custom_theme_id: String,
    pub custom_theme_backgrounds: Option<CustomThemeBackgrounds>,
    pub questions: Vec<QuestionData>,
}

impl QuizBuilderState {
    pub fn empty(questions: usize) -> Self {
        Self {
            title: String::new(),
            theme: DEFAULT_THEME.to_string(),
            background_image: String::new(),
            welcome_message: String::new(),
            custom_theme_id: String::new(),
            custom_theme_backgrounds: None,
            questions: (1..=questions.max(1))
                .map(|n| QuestionData::empty(QuestionType::MultipleChoice, format!("Pregunta {n}")))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashcardData {
    pub front: String,
    pub back: String,
    pub front_image_url: String,
    pub back_image_url: String,
}

impl FlashcardData {
    pub fn is_blank(&self) -> bool {
        self.front.trim().is_empty() && self.back.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardBuilderState {
    pub title: String,
    pub description: String,
    pub theme: String,
    pub cards: Vec<FlashcardData>,
}

impl FlashcardBuilderState {
    pub fn empty(cards: usize) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            theme: DEFAULT_THEME.to_string(),
            cards: vec![FlashcardData::default(); cards.max(1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_escape_room_has_default_titles() {
        let state = BuilderState::empty(3, 4);
        assert_eq!(state.theme, DEFAULT_THEME);
        assert_eq!(state.checkpoints.len(), 3);
        assert_eq!(state.checkpoints[1].questions.len(), 4);
        assert_eq!(state.checkpoints[1].questions[2].title, "Checkpoint 2 - Pregunta 3");
        assert_eq!(
            state.checkpoints[2].letter_message,
            "¡Buen trabajo completando el Checkpoint 3!"
        );
    }

    #[test]
    fn new_hotspot_has_no_region() {
        let q = QuestionData::empty(QuestionType::Hotspot, "x");
        assert_eq!(q.question_type(), QuestionType::Hotspot);
        assert!(matches!(q.body, QuestionBody::Hotspot { region: None, .. }));
    }

    #[test]
    fn empty_states_never_have_zero_items() {
        assert_eq!(BuilderState::empty(0, 0).checkpoints[0].questions.len(), 1);
        assert_eq!(QuizBuilderState::empty(0).questions.len(), 1);
        assert_eq!(FlashcardBuilderState::empty(0).cards.len(), 1);
    }
}
