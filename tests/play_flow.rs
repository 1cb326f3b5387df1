use escape_quiz::data::{DocumentKind, detect_text_kind, parse_document_text};
use escape_quiz::judge::{Submission, correct_answer_display, grade};
use escape_quiz::model::{AnswerKey, Document};
use escape_quiz::parser::{parse_flashcards, parse_game_file, parse_quiz_file};
use escape_quiz::session::{
    ESCAPE_STORAGE_KEY, EscapeAction, EscapeScreen, EscapeSession, FlashcardAction,
    FlashcardScreen, FlashcardSession, QuizAction, QuizScreen, QuizSession, SessionStore,
    quiz_storage_key,
};
use escape_quiz::storage::{KeyValueStore, MemoryStore};

const ESCAPE_ROOM: &str = "\
CHECKPOINT 1
QUESTION 1
TYPE: fill-blank
QUESTION: Completa la frase
SENTENCE: El cielo es [BLANK].
ANSWER: azul

QUESTION 2
QUESTION: ¿Cuánto es 2+2?
A. 3
B. 4 *
C. 5
WRONG_A_TEACHING: Cuenta con los dedos.
WRONG_A_REFLECTION_Q: ¿Cuánto es 2+1?
WRONG_A_REFLECTION_A: 2
WRONG_A_REFLECTION_B: 3
WRONG_A_REFLECTION_C: 4
WRONG_A_REFLECTION_CORRECT: B

CHECKPOINT 2
QUESTION 1
TYPE: drag-drop
SENTENCE: [BLANK] es [BLANK].
CORRECT_WORDS: X, Y
DISTRACTOR_WORDS: Z

LETTER_1: B
LETTER_2: A
";

fn answer_current(store: &mut SessionStore<EscapeSession, MemoryStore>, submission: Submission) -> bool {
    let correct = store
        .state()
        .current_question()
        .is_some_and(|q| grade(q, &submission));
    if correct {
        store.dispatch(EscapeAction::AnswerCorrect);
    }
    correct
}

#[test]
fn escape_room_from_text_to_escaped() {
    assert_eq!(detect_text_kind(ESCAPE_ROOM), DocumentKind::EscapeRoom);
    let game = parse_game_file(ESCAPE_ROOM);
    assert_eq!(game.questions.len(), 3);

    let mut store = SessionStore::<EscapeSession, _>::open(ESCAPE_STORAGE_KEY, MemoryStore::new());
    store.dispatch(EscapeAction::LoadGame(game));
    assert_eq!(store.state().current_screen, EscapeScreen::Hub);
    assert!(!store.state().is_checkpoint_unlocked(2));

    store.dispatch(EscapeAction::OpenCheckpoint(1));
    assert!(!answer_current(&mut store, Submission::Text("rojo".into())));
    assert!(answer_current(&mut store, Submission::Text(" Azul ".into())));
    assert_eq!(store.state().current_question_id, 2);

    // Fallo en opción múltiple: explicación, reflexión y vuelta a la pregunta
    store.dispatch(EscapeAction::AnswerWrong(AnswerKey::A));
    assert_eq!(store.state().current_screen, EscapeScreen::Teaching);
    assert_eq!(store.state().teaching(), Some("Cuenta con los dedos."));
    store.dispatch(EscapeAction::ContinueToReflection);
    store.dispatch(EscapeAction::ReflectionCorrect);
    assert_eq!(store.state().current_screen, EscapeScreen::Question);

    assert!(answer_current(&mut store, Submission::Choice(AnswerKey::B)));
    assert_eq!(store.state().current_screen, EscapeScreen::LetterReveal);
    assert!(store.state().is_checkpoint_unlocked(2));

    store.dispatch(EscapeAction::GoToHub);
    store.dispatch(EscapeAction::OpenCheckpoint(2));
    let swapped = Submission::Words(vec![Some("Y".into()), Some("X".into())]);
    assert!(!answer_current(&mut store, swapped));
    let ordered = Submission::Words(vec![Some("x".into()), Some("y".into())]);
    assert!(answer_current(&mut store, ordered));
    assert_eq!(store.state().lock_letters(), vec!["B", "A"]);

    store.dispatch(EscapeAction::GoToHub);
    store.dispatch(EscapeAction::GoToFinalLock);
    assert_eq!(store.state().current_screen, EscapeScreen::FinalLock);

    // Orden alfabético: primero la A (índice 1), luego la B
    store.dispatch(EscapeAction::LockClick(0));
    assert!(store.state().lock_error.is_some());
    store.dispatch(EscapeAction::LockClick(1));
    store.dispatch(EscapeAction::LockClick(0));
    assert!(store.state().lock_opened);
    store.dispatch(EscapeAction::Escape);
    assert_eq!(store.state().current_screen, EscapeScreen::Escaped);
}

#[test]
fn escape_room_progress_resumes_from_storage() {
    let game = parse_game_file(ESCAPE_ROOM);
    let mut store = SessionStore::<EscapeSession, _>::open(ESCAPE_STORAGE_KEY, MemoryStore::new());
    store.dispatch(EscapeAction::LoadGame(game.clone()));
    store.dispatch(EscapeAction::GoToQuestion(1));
    store.dispatch(EscapeAction::AnswerCorrect);

    let storage = store.into_storage();
    let resumed = SessionStore::<EscapeSession, _>::open(ESCAPE_STORAGE_KEY, storage);
    assert_eq!(resumed.state().completed_questions, vec![1]);
    assert_eq!(resumed.state().content(), Some(&game));

    let mut storage = resumed.into_storage();
    storage.set(ESCAPE_STORAGE_KEY, "{ roto".to_string());
    let fresh = SessionStore::<EscapeSession, _>::open(ESCAPE_STORAGE_KEY, storage);
    assert!(fresh.state().content().is_none());
    assert!(fresh.storage().get(ESCAPE_STORAGE_KEY).is_none());
}

#[test]
fn quiz_from_text_scores_answers() {
    let text = "\
QUESTION 1
QUESTION: ¿Color del cielo?
A. Azul *
B. Verde
C. Rojo

QUESTION 2
TYPE: fill-blank
SENTENCE: Dos y dos son [BLANK].
ANSWER: cuatro

QUESTION 3
QUESTION: ¿Cuántas patas tiene un gato?
A. 2
B. 3
C. 4 *
";
    let quiz = parse_quiz_file(text);
    assert_eq!(quiz.questions.len(), 3);

    let key = quiz_storage_key("repaso");
    let mut store = SessionStore::<QuizSession, _>::open(key.clone(), MemoryStore::new());
    store.dispatch(QuizAction::LoadQuiz(quiz));
    assert_eq!(store.state().current_screen, QuizScreen::Question);

    let submissions = [
        Submission::Choice(AnswerKey::A),
        Submission::Text("Cuatro".into()),
        Submission::Choice(AnswerKey::A),
    ];
    for submission in submissions {
        let Some(question) = store.state().current_question().cloned() else {
            panic!("falta la pregunta");
        };
        let action = if grade(&question, &submission) {
            QuizAction::AnswerCorrect(question.id)
        } else {
            QuizAction::AnswerIncorrect {
                question_id: question.id,
                correct_answer: correct_answer_display(&question),
            }
        };
        store.dispatch(action);
        store.dispatch(QuizAction::NextQuestion);
    }

    assert_eq!(store.state().current_screen, QuizScreen::Completed);
    let score = store.state().score();
    assert_eq!((score.correct, score.total, score.percentage), (2, 3, 67));
    assert_eq!(store.state().last_correct_answer.as_deref(), Some("4"));
    assert!(store.storage().get(&key).is_some());
}

#[test]
fn flashcards_from_text_are_studied_to_the_end() {
    let text = "Q: Hola\nA: Hello\n\nQ: Adiós\nA: Goodbye\n";
    assert_eq!(detect_text_kind(text), DocumentKind::Flashcards);
    let Document::Flashcards(deck) = parse_document_text(text, DocumentKind::Flashcards) else {
        panic!("se esperaba un mazo");
    };
    assert_eq!(deck, parse_flashcards(text));

    let mut session = FlashcardSession::default();
    session.dispatch(FlashcardAction::LoadFlashcards(deck));
    session.dispatch(FlashcardAction::StartStudying);
    session.dispatch(FlashcardAction::FlipCard);
    assert!(session.is_flipped);
    assert_eq!(session.current_card().map(|c| c.back.as_str()), Some("Hello"));

    session.dispatch(FlashcardAction::NextCard);
    assert_eq!(session.progress(), (2, 2));
    session.dispatch(FlashcardAction::NextCard);
    assert_eq!(session.current_screen, FlashcardScreen::Completed);
}
