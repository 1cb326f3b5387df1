use super::*;
use crate::judge::{Submission, correct_answer_display, grade};
use crate::model::{AnswerKey, QuestionKind};
use crate::session::{EscapeScreen, QuizScreen};

impl PlayerApp {
    pub fn escape_dispatch(&mut self, action: EscapeAction) {
        if let Activity::Escape(store) = &mut self.activity {
            store.dispatch(action);
        }
    }

    pub fn quiz_dispatch(&mut self, action: QuizAction) {
        if let Activity::Quiz(store) = &mut self.activity {
            store.dispatch(action);
        }
    }

    pub fn flashcards_dispatch(&mut self, action: FlashcardAction) {
        if let Activity::Flashcards(session) = &mut self.activity {
            session.dispatch(action);
        }
    }

    /// Corrige la pregunta actual del escape room. Un fallo en opción múltiple
    /// abre el bucle de refuerzo; en los demás tipos se enseña el mensaje de
    /// fallo y se puede volver a intentar.
    pub fn submit_escape_answer(&mut self, submission: Submission) {
        let Some(question) = self.escape().and_then(|s| s.current_question()) else {
            return;
        };
        let correct = grade(question, &submission);
        let is_choice = matches!(question.kind, QuestionKind::MultipleChoice { .. });
        let message = incorrect_message(&question.kind);
        let correct_message = question.correct_message.clone();

        match submission {
            _ if correct => {
                self.input.clear();
                self.message = correct_message;
                self.escape_dispatch(EscapeAction::AnswerCorrect);
            }
            Submission::Choice(key) if is_choice => {
                self.input.clear();
                self.escape_dispatch(EscapeAction::AnswerWrong(key));
            }
            _ => self.input.feedback = Some(message),
        }
    }

    pub fn submit_reflection(&mut self, picked: AnswerKey) {
        let Some(session) = self.escape() else {
            return;
        };
        let correct = session
            .current_wrong_answer
            .zip(session.current_question().and_then(|q| q.choices()))
            .map(|(wrong, (answers, _))| answers.get(wrong).reflection_correct == picked);
        match correct {
            Some(true) => {
                self.input.clear();
                self.escape_dispatch(EscapeAction::ReflectionCorrect);
            }
            Some(false) => self.escape_dispatch(EscapeAction::ReflectionWrong(picked)),
            None => {}
        }
    }

    pub fn submit_quiz_answer(&mut self, submission: Submission) {
        let Some(question) = self.quiz().and_then(|s| s.current_question()) else {
            return;
        };
        let question_id = question.id;
        let action = if grade(question, &submission) {
            QuizAction::AnswerCorrect(question_id)
        } else {
            QuizAction::AnswerIncorrect {
                question_id,
                correct_answer: correct_answer_display(question),
            }
        };
        self.input.clear();
        self.quiz_dispatch(action);
    }

    /// Reinicia la actividad abierta y borra su progreso guardado.
    pub fn reset_activity(&mut self) {
        match &mut self.activity {
            Activity::Escape(store) => {
                let content = store.state().content().cloned();
                store.dispatch(EscapeAction::ResetGame);
                if let Some(content) = content {
                    store.dispatch(EscapeAction::LoadGame(content));
                }
            }
            Activity::Quiz(store) => store.dispatch(QuizAction::ResetQuiz),
            Activity::Flashcards(session) => session.dispatch(FlashcardAction::Reset),
            Activity::None => {}
        }
        self.input.clear();
        self.lock_opened_at = None;
        self.completion_reported = false;
        self.confirm_reset = false;
    }

    /// `true` cuando la actividad abierta ha llegado a su pantalla final.
    pub fn is_finished(&self) -> bool {
        match &self.activity {
            Activity::Escape(store) => store.state().current_screen == EscapeScreen::Escaped,
            Activity::Quiz(store) => store.state().current_screen == QuizScreen::Completed,
            Activity::Flashcards(session) => {
                session.current_screen == crate::session::FlashcardScreen::Completed
            }
            Activity::None => false,
        }
    }
}

fn incorrect_message(kind: &QuestionKind) -> String {
    let message = match kind {
        QuestionKind::Hotspot {
            incorrect_message, ..
        }
        | QuestionKind::DragDrop {
            incorrect_message, ..
        }
        | QuestionKind::FillBlank {
            incorrect_message, ..
        } => incorrect_message.trim(),
        QuestionKind::MultipleChoice { .. } => "",
    };
    if message.is_empty() {
        "Esa no es la respuesta. ¡Inténtalo otra vez!".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_sample_escape_room;

    fn playing() -> PlayerApp {
        let mut app = PlayerApp::new(MemoryStore::new(), PlayerConfig::default());
        app.open_document("muestra", Document::EscapeRoom(read_sample_escape_room().unwrap()));
        app.escape_dispatch(EscapeAction::GoToQuestion(1));
        app
    }

    fn screen(app: &PlayerApp) -> EscapeScreen {
        app.escape().unwrap().current_screen
    }

    #[test]
    fn wrong_choice_opens_the_reflection_loop() {
        let mut app = playing();
        app.submit_escape_answer(Submission::Choice(AnswerKey::A));
        assert_eq!(screen(&app), EscapeScreen::Teaching);
        app.escape_dispatch(EscapeAction::ContinueToReflection);

        app.submit_reflection(AnswerKey::A);
        assert_eq!(screen(&app), EscapeScreen::Reflection);
        assert_eq!(
            app.escape().unwrap().reflection_wrong_message().as_deref(),
            Some("Marte está más allá de la Tierra.")
        );

        app.submit_reflection(AnswerKey::B);
        assert_eq!(screen(&app), EscapeScreen::Question);
        assert_eq!(app.escape().unwrap().current_question_id, 1);
    }

    #[test]
    fn wrong_fill_blank_shows_its_message() {
        let mut app = playing();
        app.submit_escape_answer(Submission::Choice(AnswerKey::B));
        assert_eq!(app.escape().unwrap().current_question_id, 2);

        app.submit_escape_answer(Submission::Text("kelvin".into()));
        assert_eq!(screen(&app), EscapeScreen::Question);
        assert!(app.input.feedback.as_deref().is_some_and(|m| m.contains("termómetro")));

        app.submit_escape_answer(Submission::Text(" Centígrados ".into()));
        assert_eq!(screen(&app), EscapeScreen::LetterReveal);
    }

    #[test]
    fn reset_reloads_the_same_escape_room() {
        let mut app = playing();
        app.submit_escape_answer(Submission::Choice(AnswerKey::B));
        app.reset_activity();
        let session = app.escape().unwrap();
        assert!(session.completed_questions.is_empty());
        assert_eq!(session.current_screen, EscapeScreen::Welcome);
    }
}
