use super::{
    AnswerData, BuilderState, CheckpointData, DEFAULT_CHECKPOINTS, DEFAULT_THEME, FlashcardBuilderState,
    FlashcardData, QuestionBody, QuestionData, QuizBuilderState, ReflectionData,
};
use crate::model::{
    Answer, Flashcard, FlashcardContent, GameContent, CheckpointLetter, HotspotRegion, Question,
    QuestionKind, QuizContent,
};

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn theme_or_default(theme: &str) -> String {
    if theme.trim().is_empty() {
        DEFAULT_THEME.to_string()
    } else {
        theme.to_string()
    }
}

fn answer_to_data(answer: &Answer) -> AnswerData {
    AnswerData {
        text: answer.text.clone(),
        teaching: answer.teaching.clone(),
        reflection: ReflectionData {
            question: answer.reflection_question.clone(),
            answers: answer.reflection_answers.clone(),
            correct: answer.reflection_correct,
            // Un mensaje único antiguo pasa a las tres claves
            wrong_messages: answer.wrong_messages(),
        },
    }
}

fn data_to_answer(data: &AnswerData) -> Answer {
    Answer {
        text: data.text.clone(),
        teaching: data.teaching.clone(),
        reflection_question: data.reflection.question.clone(),
        reflection_answers: data.reflection.answers.clone(),
        reflection_correct: data.reflection.correct,
        reflection_wrong_messages: Some(data.reflection.wrong_messages.clone()),
        reflection_wrong_message: None,
    }
}

pub fn question_to_data(question: &Question) -> QuestionData {
    let body = match &question.kind {
        QuestionKind::MultipleChoice { answers, correct } => QuestionBody::MultipleChoice {
            answers: answers.clone().map(|a| answer_to_data(&a)),
            correct: *correct,
        },
        QuestionKind::Hotspot {
            hotspot_region,
            incorrect_message,
            labeled_image_url,
        } => QuestionBody::Hotspot {
            region: Some(hotspot_region.clone()),
            incorrect_message: incorrect_message.clone(),
            labeled_image_url: or_empty(labeled_image_url),
        },
        QuestionKind::DragDrop {
            sentence,
            correct_words,
            distractor_words,
            incorrect_message,
        } => QuestionBody::DragDrop {
            sentence: sentence.clone(),
            correct_words: correct_words.clone(),
            distractor_words: distractor_words.clone(),
            incorrect_message: incorrect_message.clone(),
        },
        QuestionKind::FillBlank {
            sentence,
            correct_answer,
            incorrect_message,
        } => QuestionBody::FillBlank {
            sentence: sentence.clone(),
            correct_answer: correct_answer.clone(),
            incorrect_message: incorrect_message.clone(),
        },
    };

    QuestionData {
        title: question.title.clone(),
        question: question.question.clone(),
        image_url: or_empty(&question.image_url),
        correct_message: question.correct_message.clone(),
        body,
    }
}

pub fn data_to_question(data: &QuestionData, id: u32, checkpoint: u32) -> Question {
    let kind = match &data.body {
        QuestionBody::MultipleChoice { answers, correct } => QuestionKind::MultipleChoice {
            answers: answers.clone().map(|a| data_to_answer(&a)),
            correct: *correct,
        },
        QuestionBody::Hotspot {
            region,
            incorrect_message,
            labeled_image_url,
        } => QuestionKind::Hotspot {
            // Sin dibujar se guarda la imagen entera; la validación ya lo habrá avisado
            hotspot_region: region.clone().unwrap_or_else(HotspotRegion::full_image),
            incorrect_message: incorrect_message.clone(),
            labeled_image_url: non_empty(labeled_image_url),
        },
        QuestionBody::DragDrop {
            sentence,
            correct_words,
            distractor_words,
            incorrect_message,
        } => QuestionKind::DragDrop {
            sentence: sentence.clone(),
            correct_words: correct_words.clone(),
            distractor_words: distractor_words.clone(),
            incorrect_message: incorrect_message.clone(),
        },
        QuestionBody::FillBlank {
            sentence,
            correct_answer,
            incorrect_message,
        } => QuestionKind::FillBlank {
            sentence: sentence.clone(),
            correct_answer: correct_answer.clone(),
            incorrect_message: incorrect_message.clone(),
        },
    };

    Question {
        id,
        checkpoint,
        title: data.title.clone(),
        question: data.question.clone(),
        image_url: non_empty(&data.image_url),
        correct_message: data.correct_message.clone(),
        kind,
    }
}

/// Abre un escape room en el editor con tantos checkpoints como
/// `GameContent::checkpoint_count`. Una pregunta con checkpoint 0 pasa al primero.
pub fn game_content_to_builder_state(content: &GameContent, title: &str) -> BuilderState {
    let mut count = content.checkpoint_count() as usize;
    if count == 0 {
        count = DEFAULT_CHECKPOINTS;
    }
    for q in content.questions.iter().filter(|q| q.checkpoint == 0) {
        log::warn!("la pregunta {} no tiene checkpoint; se coloca en el primero", q.id);
    }

    let checkpoints = (1..=count)
        .map(|number| {
            let letter = content
                .letters
                .get(number - 1)
                .cloned()
                .unwrap_or_default();
            CheckpointData {
                letter: letter.letter,
                letter_message: letter.message,
                questions: content
                    .questions
                    .iter()
                    .filter(|q| q.checkpoint.max(1) as usize == number)
                    .map(question_to_data)
                    .collect(),
            }
        })
        .collect();

    BuilderState {
        title: title.to_string(),
        theme: theme_or_default(content.theme.as_deref().unwrap_or_default()),
        background_image: or_empty(&content.background_image),
        welcome_message: or_empty(&content.welcome_message),
        custom_theme_id: or_empty(&content.custom_theme_id),
        custom_theme_backgrounds: content.custom_theme_backgrounds.clone(),
        final_word: or_empty(&content.final_word),
        final_clue: or_empty(&content.final_clue),
        checkpoints,
    }
}

/// Ids correlativos en orden de documento; el checkpoint es la posición.
pub fn builder_state_to_game_content(state: &BuilderState) -> GameContent {
    let mut questions = Vec::new();
    let mut next_id = 1;
    for (idx, checkpoint) in state.checkpoints.iter().enumerate() {
        for data in &checkpoint.questions {
            questions.push(data_to_question(data, next_id, idx as u32 + 1));
            next_id += 1;
        }
    }

    GameContent {
        questions,
        letters: state
            .checkpoints
            .iter()
            .map(|cp| CheckpointLetter {
                letter: cp.letter.clone(),
                message: cp.letter_message.clone(),
            })
            .collect(),
        theme: Some(theme_or_default(&state.theme)),
        background_image: non_empty(&state.background_image),
        welcome_message: non_empty(&state.welcome_message),
        custom_theme_id: non_empty(&state.custom_theme_id),
        custom_theme_backgrounds: state.custom_theme_backgrounds.clone(),
        final_word: non_empty(&state.final_word),
        final_clue: non_empty(&state.final_clue),
    }
}

pub fn quiz_content_to_builder_state(content: &QuizContent, title: &str) -> QuizBuilderState {
    QuizBuilderState {
        title: title.to_string(),
        theme: theme_or_default(content.theme.as_deref().unwrap_or_default()),
        background_image: or_empty(&content.background_image),
        welcome_message: or_empty(&content.welcome_message),
        custom_theme_id: or_empty(&content.custom_theme_id),
        custom_theme_backgrounds: content.custom_theme_backgrounds.clone(),
        questions: content.questions.iter().map(question_to_data).collect(),
    }
}

pub fn quiz_builder_state_to_content(state: &QuizBuilderState) -> QuizContent {
    QuizContent {
        questions: state
            .questions
            .iter()
            .enumerate()
            .map(|(idx, data)| data_to_question(data, idx as u32 + 1, 1))
            .collect(),
        theme: Some(theme_or_default(&state.theme)),
        background_image: non_empty(&state.background_image),
        welcome_message: non_empty(&state.welcome_message),
        custom_theme_id: non_empty(&state.custom_theme_id),
        custom_theme_backgrounds: state.custom_theme_backgrounds.clone(),
    }
}

pub fn flashcard_content_to_builder_state(
    content: &FlashcardContent,
    title: &str,
) -> FlashcardBuilderState {
    let title = content
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| title.to_string());
    FlashcardBuilderState {
        title,
        description: or_empty(&content.description),
        theme: theme_or_default(content.theme.as_deref().unwrap_or_default()),
        cards: content
            .cards
            .iter()
            .map(|card| FlashcardData {
                front: card.front.clone(),
                back: card.back.clone(),
                front_image_url: or_empty(&card.front_image_url),
                back_image_url: or_empty(&card.back_image_url),
            })
            .collect(),
    }
}

/// Las tarjetas con las dos caras vacías no se guardan.
pub fn flashcard_builder_state_to_content(state: &FlashcardBuilderState) -> FlashcardContent {
    FlashcardContent {
        cards: state
            .cards
            .iter()
            .filter(|card| !card.is_blank())
            .enumerate()
            .map(|(idx, card)| Flashcard {
                id: idx as u32 + 1,
                front: card.front.clone(),
                back: card.back.clone(),
                front_image_url: non_empty(&card.front_image_url),
                back_image_url: non_empty(&card.back_image_url),
            })
            .collect(),
        title: non_empty(&state.title),
        description: non_empty(&state.description),
        theme: Some(theme_or_default(&state.theme)),
    }
}
