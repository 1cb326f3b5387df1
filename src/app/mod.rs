use crate::backend::{Backend, DirBackend};
use crate::config::PlayerConfig;
use crate::model::Document;
use crate::session::{
    ESCAPE_STORAGE_KEY, EscapeAction, EscapeSession, FlashcardAction, FlashcardSession, QuizAction,
    QuizSession, SessionStore, quiz_storage_key,
};
use crate::storage::MemoryStore;
use serde::{Deserialize, Serialize};

// Submódulos
pub mod actions;
pub mod completion;
pub mod input;

pub use input::AnswerInput;

/// Actividad abierta en el reproductor.
#[derive(Debug, Default)]
pub enum Activity {
    #[default]
    None,
    Escape(SessionStore<EscapeSession, MemoryStore>),
    Quiz(SessionStore<QuizSession, MemoryStore>),
    Flashcards(FlashcardSession),
}

/// Reproductor. Solo se persiste `saved`: el progreso de cada partida,
/// guardado con la misma clave que usaría el almacén del navegador.
#[derive(Serialize, Deserialize, Default)]
pub struct PlayerApp {
    pub saved: MemoryStore,
    #[serde(skip)]
    pub activity: Activity,
    #[serde(skip)]
    pub config: PlayerConfig,
    #[serde(skip)]
    pub backend: Option<DirBackend>,
    #[serde(skip)]
    pub document_id: String,
    #[serde(skip)]
    pub session_id: String,
    #[serde(skip)]
    pub message: String,
    #[serde(skip)]
    pub input: AnswerInput,
    /// Momento (segundos de egui) en que se abrió el candado.
    #[serde(skip)]
    pub lock_opened_at: Option<f64>,
    #[serde(skip)]
    pub completion_reported: bool,
    #[serde(skip)]
    pub confirm_reset: bool,
}

impl PlayerApp {
    pub fn new(saved: MemoryStore, config: PlayerConfig) -> Self {
        let backend = DirBackend::new(config.data_dir.clone(), config.user_id.clone());
        Self {
            saved,
            backend: Some(backend),
            config,
            ..Self::default()
        }
    }

    /// Abre una actividad. Si hay una partida guardada del mismo documento se
    /// retoma; si no, se empieza de cero.
    pub fn open_document(&mut self, document_id: &str, document: Document) {
        self.close_activity();
        self.document_id = document_id.to_string();
        self.session_id = format!("{document_id}-{:08x}", rand::random::<u32>());
        self.completion_reported = false;
        self.message.clear();

        let saved = std::mem::take(&mut self.saved);
        self.activity = match document {
            Document::EscapeRoom(content) => {
                let mut store = SessionStore::<EscapeSession, _>::open(ESCAPE_STORAGE_KEY, saved);
                if store.state().content() != Some(&content) {
                    store.dispatch(EscapeAction::LoadGame(content));
                }
                Activity::Escape(store)
            }
            Document::Quiz(content) => {
                let key = quiz_storage_key(document_id);
                let mut store = SessionStore::<QuizSession, _>::open(key, saved);
                if store.state().quiz_content.as_ref() != Some(&content) {
                    store.dispatch(QuizAction::LoadQuiz(content));
                }
                Activity::Quiz(store)
            }
            Document::Flashcards(content) => {
                self.saved = saved;
                let mut session = FlashcardSession::default();
                session.dispatch(FlashcardAction::LoadFlashcards(content));
                Activity::Flashcards(session)
            }
        };
        self.input = AnswerInput::default();
    }

    /// Carga un documento del backend por id o código para compartir.
    pub fn open_from_backend(&mut self, document_id: &str) -> bool {
        let loaded = match &self.backend {
            Some(backend) => backend.load_document(document_id),
            None => return false,
        };
        match loaded {
            Ok(document) => {
                self.open_document(document_id, document);
                true
            }
            Err(e) => {
                log::warn!("no se pudo abrir {document_id}: {e}");
                self.message = format!("No se pudo abrir la actividad: {e}");
                false
            }
        }
    }

    /// Devuelve el almacén a `saved` para que la próxima sesión lo reciba.
    pub fn close_activity(&mut self) {
        match std::mem::take(&mut self.activity) {
            Activity::Escape(store) => self.saved = store.into_storage(),
            Activity::Quiz(store) => self.saved = store.into_storage(),
            Activity::Flashcards(_) | Activity::None => {}
        }
        self.lock_opened_at = None;
    }

    /// Copia en `saved` lo que lleva guardado la sesión abierta.
    pub fn sync_saved(&mut self) {
        match &self.activity {
            Activity::Escape(store) => self.saved = store.storage().clone(),
            Activity::Quiz(store) => self.saved = store.storage().clone(),
            Activity::Flashcards(_) | Activity::None => {}
        }
    }

    pub fn escape(&self) -> Option<&EscapeSession> {
        match &self.activity {
            Activity::Escape(store) => Some(store.state()),
            _ => None,
        }
    }

    pub fn quiz(&self) -> Option<&QuizSession> {
        match &self.activity {
            Activity::Quiz(store) => Some(store.state()),
            _ => None,
        }
    }

    pub fn flashcards(&self) -> Option<&FlashcardSession> {
        match &self.activity {
            Activity::Flashcards(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_sample_escape_room;
    use crate::model::{Flashcard, FlashcardContent};
    use crate::session::EscapeScreen;
    use crate::storage::KeyValueStore;

    // El directorio se borra al soltar el `TempDir`: hay que mantenerlo vivo en el test
    fn app() -> (PlayerApp, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let app = PlayerApp::new(
            MemoryStore::new(),
            PlayerConfig {
                data_dir: dir.path().to_path_buf(),
                ..PlayerConfig::default()
            },
        );
        (app, dir)
    }

    #[test]
    fn escape_room_progress_survives_reopening() {
        let sample = read_sample_escape_room().unwrap();
        let (mut app, _dir) = app();
        app.open_document("muestra", Document::EscapeRoom(sample.clone()));
        app.escape_dispatch(EscapeAction::SetScreen(EscapeScreen::Hub));
        app.escape_dispatch(EscapeAction::GoToQuestion(1));
        app.escape_dispatch(EscapeAction::AnswerCorrect);
        app.close_activity();
        assert!(app.saved.get(ESCAPE_STORAGE_KEY).is_some());

        app.open_document("muestra", Document::EscapeRoom(sample));
        let session = app.escape().unwrap();
        assert_eq!(session.completed_questions, vec![1]);
        assert_eq!(session.current_question_id, 2);
    }

    #[test]
    fn another_escape_room_starts_fresh() {
        let sample = read_sample_escape_room().unwrap();
        let (mut app, _dir) = app();
        app.open_document("muestra", Document::EscapeRoom(sample.clone()));
        app.escape_dispatch(EscapeAction::GoToQuestion(1));
        app.escape_dispatch(EscapeAction::AnswerCorrect);

        let mut other = sample;
        other.questions.truncate(2);
        app.open_document("otra", Document::EscapeRoom(other));
        assert!(app.escape().unwrap().completed_questions.is_empty());
    }

    #[test]
    fn flashcards_leave_saved_progress_alone() {
        let (mut app, _dir) = app();
        app.saved.set("quiz-state-x", "{}".into());
        app.open_document(
            "mazo",
            Document::Flashcards(FlashcardContent {
                cards: vec![Flashcard {
                    id: 1,
                    front: "a".into(),
                    back: "b".into(),
                    ..Flashcard::default()
                }],
                ..FlashcardContent::default()
            }),
        );
        assert_eq!(app.saved.len(), 1);
        assert_eq!(app.flashcards().map(|s| s.card_count()), Some(1));
    }
}
