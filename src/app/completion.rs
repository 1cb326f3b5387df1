use super::*;
use crate::session::EscapeScreen;

impl PlayerApp {
    /// Avisa al backend una sola vez cuando la actividad termina.
    pub fn report_completion(&mut self) {
        if self.completion_reported || !self.is_finished() {
            return;
        }
        self.completion_reported = true;
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.mark_session_complete(&self.session_id) {
            log::warn!("no se pudo marcar la sesión {} como completada: {e}", self.session_id);
        }
    }

    /// Con el candado abierto se espera `escape_delay_ms` antes de escapar.
    /// Devuelve cuánto falta, para pedir un repintado.
    pub fn tick_escape(&mut self, now: f64) -> Option<f64> {
        let opened = self
            .escape()
            .is_some_and(|s| s.current_screen == EscapeScreen::FinalLock && s.lock_opened);
        if !opened {
            self.lock_opened_at = None;
            return None;
        }

        let started = *self.lock_opened_at.get_or_insert(now);
        let delay = self.config.escape_delay_ms as f64 / 1000.0;
        let remaining = started + delay - now;
        if remaining > 0.0 {
            return Some(remaining);
        }
        self.lock_opened_at = None;
        self.escape_dispatch(EscapeAction::Escape);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckpointLetter, GameContent, Question, QuestionKind};

    fn one_question_lock() -> Document {
        Document::EscapeRoom(GameContent {
            questions: vec![Question {
                id: 1,
                checkpoint: 1,
                title: String::new(),
                question: "Completa".into(),
                image_url: None,
                correct_message: String::new(),
                kind: QuestionKind::FillBlank {
                    sentence: "[BLANK]".into(),
                    correct_answer: "sí".into(),
                    incorrect_message: String::new(),
                },
            }],
            letters: vec![CheckpointLetter {
                letter: "K".into(),
                message: String::new(),
            }],
            ..GameContent::default()
        })
    }

    #[test]
    fn lock_waits_before_escaping_and_reports_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = PlayerApp::new(
            MemoryStore::new(),
            PlayerConfig {
                data_dir: dir.path().to_path_buf(),
                escape_delay_ms: 500,
                ..PlayerConfig::default()
            },
        );
        app.open_document("candado", one_question_lock());
        app.escape_dispatch(EscapeAction::GoToQuestion(1));
        app.escape_dispatch(EscapeAction::AnswerCorrect);
        app.escape_dispatch(EscapeAction::GoToFinalLock);
        app.escape_dispatch(EscapeAction::LockClick(0));
        assert!(app.escape().unwrap().lock_opened);

        assert_eq!(app.tick_escape(10.0), Some(0.5));
        assert!(app.tick_escape(10.2).is_some());
        assert_eq!(app.tick_escape(10.5), None);
        assert_eq!(app.escape().unwrap().current_screen, EscapeScreen::Escaped);

        app.report_completion();
        let backend = app.backend.as_ref().unwrap();
        assert!(backend.is_session_complete(&app.session_id).unwrap());
    }
}
