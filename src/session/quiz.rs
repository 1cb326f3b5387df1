use super::Session;
use crate::answer_order::{AnswerOrder, AnswerOrders, generate_answer_orders_with};
use crate::model::{AnswerKey, Question, QuizContent};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cada quiz se guarda bajo su propia clave.
pub fn quiz_storage_key(quiz_id: &str) -> String {
    format!("quiz-state-{quiz_id}")
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuizScreen {
    #[default]
    Start,
    Welcome,
    Question,
    Feedback,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: u32,
    pub correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub current_screen: QuizScreen,
    pub quiz_content: Option<QuizContent>,
    pub current_question_index: usize,
    pub answers: Vec<QuizAnswer>,
    pub last_answer_correct: Option<bool>,
    pub last_correct_answer: Option<String>,
    pub answer_order: AnswerOrders,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizAction {
    LoadQuiz(QuizContent),
    StartQuiz,
    AnswerCorrect(u32),
    AnswerIncorrect { question_id: u32, correct_answer: String },
    NextQuestion,
    ShowResults,
    ResetQuiz,
    SetScreen(QuizScreen),
    Hydrate(Box<QuizSession>),
}

impl QuizSession {
    pub fn question_count(&self) -> usize {
        self.quiz_content
            .as_ref()
            .map(|c| c.questions.len())
            .unwrap_or(0)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz_content
            .as_ref()?
            .questions
            .get(self.current_question_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_index + 1 >= self.question_count()
    }

    pub fn answer_order_for_current(&self) -> AnswerOrder {
        self.answer_order
            .get(&(self.current_question_index as u32 + 1))
            .copied()
            .unwrap_or(AnswerKey::ALL)
    }

    /// Aciertos sobre el total de preguntas, con el porcentaje redondeado.
    pub fn score(&self) -> Score {
        let correct = self.answers.iter().filter(|a| a.correct).count();
        let total = self.question_count();
        let percentage = if total > 0 {
            (correct as f64 * 100.0 / total as f64).round() as u32
        } else {
            0
        };
        Score {
            correct,
            total,
            percentage,
        }
    }

    fn opening_screen(content: &QuizContent) -> QuizScreen {
        let has_welcome = content
            .welcome_message
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty());
        if has_welcome {
            QuizScreen::Welcome
        } else {
            QuizScreen::Question
        }
    }

    fn restart(&mut self, content: QuizContent, rng: &mut (impl Rng + ?Sized)) {
        *self = Self {
            current_screen: Self::opening_screen(&content),
            answer_order: generate_answer_orders_with(content.questions.len(), rng),
            quiz_content: Some(content),
            ..Self::default()
        };
    }

    fn record(&mut self, question_id: u32, correct: bool, correct_answer: Option<String>) {
        if self.quiz_content.is_none() {
            return;
        }
        self.answers.push(QuizAnswer {
            question_id,
            correct,
        });
        self.last_answer_correct = Some(correct);
        self.last_correct_answer = correct_answer;
        self.current_screen = QuizScreen::Feedback;
    }
}

impl Session for QuizSession {
    type Action = QuizAction;

    fn apply<R: Rng + ?Sized>(&mut self, action: QuizAction, rng: &mut R) {
        match action {
            QuizAction::LoadQuiz(content) => {
                log::info!("quiz cargado: {} preguntas", content.questions.len());
                self.restart(content, rng);
            }
            QuizAction::StartQuiz => {
                if self.quiz_content.is_some() {
                    self.current_screen = QuizScreen::Question;
                }
            }
            QuizAction::AnswerCorrect(question_id) => self.record(question_id, true, None),
            QuizAction::AnswerIncorrect {
                question_id,
                correct_answer,
            } => self.record(question_id, false, Some(correct_answer)),
            QuizAction::NextQuestion => {
                let next = self.current_question_index + 1;
                if next >= self.question_count() {
                    let score = self.score();
                    log::info!("quiz terminado: {}/{}", score.correct, score.total);
                    self.current_screen = QuizScreen::Completed;
                } else {
                    self.current_question_index = next;
                    self.current_screen = QuizScreen::Question;
                    self.last_answer_correct = None;
                    self.last_correct_answer = None;
                }
            }
            QuizAction::ShowResults => self.current_screen = QuizScreen::Completed,
            QuizAction::ResetQuiz => match self.quiz_content.take() {
                Some(content) => self.restart(content, rng),
                None => *self = Self::default(),
            },
            QuizAction::SetScreen(screen) => self.current_screen = screen,
            QuizAction::Hydrate(saved) => *self = *saved,
        }
    }

    fn hydrate(saved: Self) -> QuizAction {
        QuizAction::Hydrate(Box::new(saved))
    }

    fn is_loaded(&self) -> bool {
        self.quiz_content.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quiz(count: u32) -> QuizContent {
        QuizContent {
            questions: (1..=count)
                .map(|id| Question {
                    id,
                    checkpoint: 1,
                    title: String::new(),
                    question: format!("P{id}"),
                    image_url: None,
                    correct_message: String::new(),
                    kind: QuestionKind::FillBlank {
                        sentence: "[BLANK]".into(),
                        correct_answer: "x".into(),
                        incorrect_message: String::new(),
                    },
                })
                .collect(),
            ..QuizContent::default()
        }
    }

    fn run(session: &mut QuizSession, actions: Vec<QuizAction>) {
        let mut rng = StdRng::seed_from_u64(5);
        for action in actions {
            session.apply(action, &mut rng);
        }
    }

    #[test]
    fn two_of_three_scores_sixty_seven() {
        let mut session = QuizSession::default();
        run(
            &mut session,
            vec![
                QuizAction::LoadQuiz(quiz(3)),
                QuizAction::AnswerCorrect(1),
                QuizAction::NextQuestion,
                QuizAction::AnswerIncorrect {
                    question_id: 2,
                    correct_answer: "x".into(),
                },
            ],
        );
        assert_eq!(session.current_screen, QuizScreen::Feedback);
        assert_eq!(session.last_answer_correct, Some(false));
        assert_eq!(session.last_correct_answer.as_deref(), Some("x"));

        run(
            &mut session,
            vec![
                QuizAction::NextQuestion,
                QuizAction::AnswerCorrect(3),
                QuizAction::NextQuestion,
            ],
        );
        assert_eq!(session.current_screen, QuizScreen::Completed);
        assert_eq!(
            session.score(),
            Score {
                correct: 2,
                total: 3,
                percentage: 67
            }
        );
    }

    #[test]
    fn next_question_clears_feedback() {
        let mut session = QuizSession::default();
        run(
            &mut session,
            vec![
                QuizAction::LoadQuiz(quiz(2)),
                QuizAction::AnswerIncorrect {
                    question_id: 1,
                    correct_answer: "x".into(),
                },
                QuizAction::NextQuestion,
            ],
        );
        assert_eq!(session.current_screen, QuizScreen::Question);
        assert_eq!(session.current_question().map(|q| q.id), Some(2));
        assert!(session.is_last_question());
        assert!(session.last_answer_correct.is_none());
        assert!(session.last_correct_answer.is_none());
    }

    #[test]
    fn welcome_message_opens_on_welcome() {
        let mut content = quiz(1);
        content.welcome_message = Some("¡Hola!".into());
        let mut session = QuizSession::default();
        run(&mut session, vec![QuizAction::LoadQuiz(content)]);
        assert_eq!(session.current_screen, QuizScreen::Welcome);
        run(&mut session, vec![QuizAction::StartQuiz]);
        assert_eq!(session.current_screen, QuizScreen::Question);
    }

    #[test]
    fn reset_keeps_content_and_restarts() {
        let mut session = QuizSession::default();
        run(
            &mut session,
            vec![
                QuizAction::LoadQuiz(quiz(2)),
                QuizAction::AnswerCorrect(1),
                QuizAction::NextQuestion,
                QuizAction::ResetQuiz,
            ],
        );
        assert_eq!(session.current_question_index, 0);
        assert!(session.answers.is_empty());
        assert_eq!(session.question_count(), 2);
        assert_eq!(session.answer_order.len(), 2);
        assert_eq!(session.current_screen, QuizScreen::Question);
    }

    #[test]
    fn empty_quiz_scores_zero() {
        assert_eq!(QuizSession::default().score().percentage, 0);
    }
}
