//! Máquinas de estado de una partida: escape room, quiz y repaso de tarjetas.
//!
//! Cada máquina es un valor serializable con un `apply(acción)` síncrono. La
//! aleatoriedad entra siempre por parámetro para poder fijarla en los tests.

pub mod escape;
pub mod final_lock;
pub mod flashcards;
pub mod quiz;

pub use escape::{ESCAPE_STORAGE_KEY, EarnedLetter, EscapeAction, EscapeScreen, EscapeSession};
pub use final_lock::WordBox;
pub use flashcards::{FlashcardAction, FlashcardScreen, FlashcardSession};
pub use quiz::{QuizAction, QuizAnswer, QuizScreen, QuizSession, Score, quiz_storage_key};

use crate::storage::KeyValueStore;
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Estado de partida que se guarda para poder retomarlo.
pub trait Session: Default + Serialize + DeserializeOwned {
    type Action;

    fn apply<R: Rng + ?Sized>(&mut self, action: Self::Action, rng: &mut R);

    /// Acción que sustituye el estado entero por uno guardado.
    fn hydrate(saved: Self) -> Self::Action;

    /// Solo se guarda cuando hay una actividad cargada.
    fn is_loaded(&self) -> bool;
}

/// Une una máquina de estado con el almacén donde se guarda tras cada acción.
#[derive(Debug)]
pub struct SessionStore<S, K> {
    key: String,
    state: S,
    storage: K,
}

impl<S: Session, K: KeyValueStore> SessionStore<S, K> {
    /// Abre la sesión guardada bajo `key`. Un registro ilegible se descarta y se
    /// empieza de cero.
    pub fn open(key: impl Into<String>, storage: K) -> Self {
        let mut store = Self {
            key: key.into(),
            state: S::default(),
            storage,
        };

        if let Some(raw) = store.storage.get(&store.key) {
            match serde_json::from_str::<S>(&raw) {
                Ok(saved) => {
                    log::info!("partida retomada desde '{}'", store.key);
                    store.state.apply(S::hydrate(saved), &mut rand::thread_rng());
                }
                Err(err) => {
                    log::warn!("descartado el progreso guardado en '{}': {}", store.key, err);
                    store.storage.remove(&store.key);
                }
            }
        }

        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    pub fn into_storage(self) -> K {
        self.storage
    }

    pub fn dispatch(&mut self, action: S::Action) {
        self.dispatch_with(action, &mut rand::thread_rng());
    }

    pub fn dispatch_with<R: Rng + ?Sized>(&mut self, action: S::Action, rng: &mut R) {
        self.state.apply(action, rng);
        self.persist();
    }

    fn persist(&mut self) {
        if !self.state.is_loaded() {
            // Tras un reinicio no debe quedar nada que resucite la partida
            self.storage.remove(&self.key);
            return;
        }
        match serde_json::to_string(&self.state) {
            Ok(json) => self.storage.set(&self.key, json),
            Err(err) => log::warn!("no se pudo guardar la partida '{}': {}", self.key, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, AnswerKey, CheckpointLetter, GameContent, PerKey, Question, QuestionKind};
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn one_question_game() -> GameContent {
        GameContent {
            questions: vec![Question {
                id: 1,
                checkpoint: 1,
                title: "T".into(),
                question: "¿?".into(),
                image_url: None,
                correct_message: "Bien".into(),
                kind: QuestionKind::MultipleChoice {
                    answers: PerKey::repeat(Answer::default()),
                    correct: AnswerKey::A,
                },
            }],
            letters: vec![CheckpointLetter {
                letter: "K".into(),
                message: "¡Hecho!".into(),
            }],
            ..GameContent::default()
        }
    }

    #[test]
    fn every_action_is_saved_once_loaded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut store: SessionStore<EscapeSession, MemoryStore> =
            SessionStore::open(ESCAPE_STORAGE_KEY, MemoryStore::new());
        store.dispatch_with(EscapeAction::GoToHub, &mut rng);
        assert!(store.storage().get(ESCAPE_STORAGE_KEY).is_none());

        store.dispatch_with(EscapeAction::LoadGame(one_question_game()), &mut rng);
        store.dispatch_with(EscapeAction::GoToQuestion(1), &mut rng);
        let saved = store.storage().get(ESCAPE_STORAGE_KEY).expect("guardado");

        let reopened: SessionStore<EscapeSession, MemoryStore> =
            SessionStore::open(ESCAPE_STORAGE_KEY, store.into_storage());
        assert_eq!(reopened.state().current_screen, EscapeScreen::Question);
        assert_eq!(serde_json::to_string(reopened.state()).ok(), Some(saved));
    }

    #[test]
    fn corrupt_record_is_discarded() {
        let mut storage = MemoryStore::new();
        storage.set(ESCAPE_STORAGE_KEY, "{ no es json".into());
        let store: SessionStore<EscapeSession, MemoryStore> =
            SessionStore::open(ESCAPE_STORAGE_KEY, storage);
        assert_eq!(store.state(), &EscapeSession::default());
        assert!(store.storage().get(ESCAPE_STORAGE_KEY).is_none());
    }

    #[test]
    fn reset_clears_the_saved_entry() {
        let mut store: SessionStore<EscapeSession, MemoryStore> =
            SessionStore::open(ESCAPE_STORAGE_KEY, MemoryStore::new());
        store.dispatch(EscapeAction::LoadGame(one_question_game()));
        assert!(store.storage().get(ESCAPE_STORAGE_KEY).is_some());
        store.dispatch(EscapeAction::ResetGame);
        assert!(store.storage().get(ESCAPE_STORAGE_KEY).is_none());

        let reopened: SessionStore<EscapeSession, MemoryStore> =
            SessionStore::open(ESCAPE_STORAGE_KEY, store.into_storage());
        assert_eq!(reopened.state().current_screen, EscapeScreen::Start);
    }

    #[test]
    fn quizzes_are_saved_under_their_own_key() {
        let mut store: SessionStore<QuizSession, MemoryStore> =
            SessionStore::open(quiz_storage_key("abc"), MemoryStore::new());
        store.dispatch(QuizAction::LoadQuiz(crate::model::QuizContent {
            questions: one_question_game().questions,
            ..Default::default()
        }));
        assert_eq!(store.key(), "quiz-state-abc");
        assert!(store.storage().get("quiz-state-abc").is_some());
        assert!(store.storage().get(ESCAPE_STORAGE_KEY).is_none());
    }
}
