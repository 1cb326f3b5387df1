use super::Session;
use crate::answer_order::{AnswerOrder, AnswerOrders, generate_answer_orders_with};
use crate::model::{AnswerKey, CheckpointLetter, GameContent, Question};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Clave fija bajo la que se guarda la partida del escape room.
pub const ESCAPE_STORAGE_KEY: &str = "escape-room-state";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EscapeScreen {
    #[default]
    Start,
    Welcome,
    Hub,
    Question,
    Teaching,
    Reflection,
    LetterReveal,
    FinalLock,
    Escaped,
}

/// Letra ganada y el checkpoint que la otorgó.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EarnedLetter {
    pub checkpoint: u32,
    #[serde(flatten)]
    pub letter: CheckpointLetter,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EscapeSession {
    pub current_screen: EscapeScreen,
    pub game_content: Option<GameContent>,
    pub current_question_id: u32,
    pub completed_questions: Vec<u32>,
    pub unlocked_letters: Vec<EarnedLetter>,
    /// Opción equivocada que abrió el bucle de refuerzo.
    pub current_wrong_answer: Option<AnswerKey>,
    /// Último fallo dentro de la pregunta de reflexión.
    pub reflection_wrong_answer: Option<AnswerKey>,
    pub answer_order: AnswerOrders,
    /// Índices (en `unlocked_letters`) pulsados en el candado alfabético.
    pub lock_click_order: Vec<usize>,
    pub lock_opened: bool,
    pub lock_error: Option<String>,
    /// Lo que el alumno ha escrito en cada casilla de la palabra final.
    pub word_entries: Vec<Option<char>>,
}

impl Default for EscapeSession {
    fn default() -> Self {
        Self {
            current_screen: EscapeScreen::Start,
            game_content: None,
            current_question_id: 1,
            completed_questions: Vec::new(),
            unlocked_letters: Vec::new(),
            current_wrong_answer: None,
            reflection_wrong_answer: None,
            answer_order: AnswerOrders::new(),
            lock_click_order: Vec::new(),
            lock_opened: false,
            lock_error: None,
            word_entries: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EscapeAction {
    LoadGame(GameContent),
    GoToQuestion(u32),
    /// Entra en la primera pregunta pendiente de un checkpoint desbloqueado.
    OpenCheckpoint(u32),
    AnswerCorrect,
    AnswerWrong(AnswerKey),
    ContinueToReflection,
    ReflectionCorrect,
    ReflectionWrong(AnswerKey),
    GoToHub,
    ShowLetter,
    GoToFinalLock,
    LockClick(usize),
    LockReset,
    FillWordBox { index: usize, letter: Option<char> },
    SubmitFinalWord(String),
    Escape,
    ResetGame,
    SetScreen(EscapeScreen),
    Hydrate(Box<EscapeSession>),
}

impl EscapeSession {
    pub fn content(&self) -> Option<&GameContent> {
        self.game_content.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.content()?.question(self.current_question_id)
    }

    /// Checkpoint de la pregunta; el 1 si la pregunta no existe.
    fn checkpoint_of(&self, question_id: u32) -> u32 {
        self.content()
            .and_then(|c| c.question(question_id))
            .map(|q| q.checkpoint)
            .unwrap_or(1)
    }

    fn checkpoint_questions(&self, checkpoint: u32) -> Vec<u32> {
        self.content()
            .map(|c| c.question_ids_in_checkpoint(checkpoint))
            .unwrap_or_default()
    }

    fn is_completed(&self, question_id: u32) -> bool {
        self.completed_questions.contains(&question_id)
    }

    /// Un checkpoint sin preguntas nunca está completo.
    pub fn is_checkpoint_complete(&self, checkpoint: u32) -> bool {
        let questions = self.checkpoint_questions(checkpoint);
        !questions.is_empty() && questions.iter().all(|id| self.is_completed(*id))
    }

    pub fn is_checkpoint_unlocked(&self, checkpoint: u32) -> bool {
        checkpoint == 1 || self.is_checkpoint_complete(checkpoint.saturating_sub(1))
    }

    pub fn checkpoint_count(&self) -> u32 {
        self.content().map(GameContent::checkpoint_count).unwrap_or(0)
    }

    pub fn all_checkpoints_complete(&self) -> bool {
        let count = self.checkpoint_count();
        count > 0 && (1..=count).all(|cp| self.is_checkpoint_complete(cp))
    }

    /// Primera pregunta sin completar del checkpoint.
    pub fn next_in_checkpoint(&self, checkpoint: u32) -> Option<u32> {
        self.checkpoint_questions(checkpoint)
            .into_iter()
            .find(|id| !self.is_completed(*id))
    }

    /// Orden de las opciones de una pregunta. Se busca por su posición en el documento.
    pub fn answer_order_for(&self, question_id: u32) -> AnswerOrder {
        self.content()
            .and_then(|c| c.questions.iter().position(|q| q.id == question_id))
            .and_then(|idx| self.answer_order.get(&(idx as u32 + 1)))
            .copied()
            .unwrap_or(AnswerKey::ALL)
    }

    /// Explicación de la opción equivocada que se eligió.
    pub fn teaching(&self) -> Option<&str> {
        let wrong = self.current_wrong_answer?;
        let (answers, _) = self.current_question()?.choices()?;
        Some(answers.get(wrong).teaching.as_str())
    }

    /// Mensaje para el último fallo en la pregunta de reflexión.
    pub fn reflection_wrong_message(&self) -> Option<String> {
        let wrong = self.current_wrong_answer?;
        let picked = self.reflection_wrong_answer?;
        let (answers, _) = self.current_question()?.choices()?;
        Some(answers.get(wrong).wrong_message_for(picked))
    }

    /// Última letra ganada, la que enseña la pantalla de revelación.
    pub fn last_letter(&self) -> Option<&EarnedLetter> {
        self.unlocked_letters.last()
    }

    fn load(&mut self, content: GameContent, rng: &mut (impl Rng + ?Sized)) {
        let has_welcome = content
            .welcome_message
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty());
        *self = Self {
            current_screen: if has_welcome {
                EscapeScreen::Welcome
            } else {
                EscapeScreen::Hub
            },
            answer_order: generate_answer_orders_with(content.questions.len(), rng),
            game_content: Some(content),
            ..Self::default()
        };
        log::info!(
            "escape room cargado: {} preguntas, {} checkpoints",
            self.content().map(|c| c.questions.len()).unwrap_or(0),
            self.checkpoint_count()
        );
    }

    fn go_to_question(&mut self, question_id: u32) {
        if self.content().and_then(|c| c.question(question_id)).is_none() {
            return;
        }
        self.current_screen = EscapeScreen::Question;
        self.current_question_id = question_id;
        self.current_wrong_answer = None;
        self.reflection_wrong_answer = None;
    }

    fn answer_correct(&mut self) {
        if self.current_question().is_none() {
            return;
        }
        let id = self.current_question_id;
        if !self.is_completed(id) {
            self.completed_questions.push(id);
        }
        self.current_wrong_answer = None;
        self.reflection_wrong_answer = None;

        let checkpoint = self.checkpoint_of(id);
        if let Some(next) = self.next_in_checkpoint(checkpoint) {
            self.current_question_id = next;
            self.current_screen = EscapeScreen::Question;
            return;
        }

        let already_earned = self
            .unlocked_letters
            .iter()
            .any(|l| l.checkpoint == checkpoint);
        let letter = self
            .content()
            .and_then(|c| c.letter_for_checkpoint(checkpoint))
            .filter(|l| !l.letter.trim().is_empty())
            .cloned();

        match letter {
            Some(letter) if !already_earned => {
                log::debug!("checkpoint {checkpoint} completado: letra {}", letter.letter);
                self.unlocked_letters.push(EarnedLetter { checkpoint, letter });
                self.current_screen = EscapeScreen::LetterReveal;
            }
            _ => self.current_screen = EscapeScreen::Hub,
        }
    }
}

impl Session for EscapeSession {
    type Action = EscapeAction;

    fn apply<R: Rng + ?Sized>(&mut self, action: EscapeAction, rng: &mut R) {
        match action {
            EscapeAction::LoadGame(content) => self.load(content, rng),
            EscapeAction::GoToQuestion(id) => self.go_to_question(id),
            EscapeAction::OpenCheckpoint(checkpoint) => {
                if !self.is_checkpoint_unlocked(checkpoint) {
                    return;
                }
                if let Some(id) = self.next_in_checkpoint(checkpoint) {
                    self.go_to_question(id);
                }
            }
            EscapeAction::AnswerCorrect => self.answer_correct(),
            EscapeAction::AnswerWrong(key) => {
                self.current_wrong_answer = Some(key);
                self.reflection_wrong_answer = None;
                self.current_screen = EscapeScreen::Teaching;
            }
            EscapeAction::ContinueToReflection => {
                if self.current_wrong_answer.is_some() {
                    self.current_screen = EscapeScreen::Reflection;
                }
            }
            EscapeAction::ReflectionCorrect => {
                self.current_screen = EscapeScreen::Question;
                self.current_wrong_answer = None;
                self.reflection_wrong_answer = None;
            }
            EscapeAction::ReflectionWrong(key) => self.reflection_wrong_answer = Some(key),
            EscapeAction::GoToHub => {
                self.current_screen = EscapeScreen::Hub;
                self.current_wrong_answer = None;
                self.reflection_wrong_answer = None;
            }
            EscapeAction::ShowLetter => {
                if !self.unlocked_letters.is_empty() {
                    self.current_screen = EscapeScreen::LetterReveal;
                }
            }
            EscapeAction::GoToFinalLock => self.go_to_final_lock(),
            EscapeAction::LockClick(index) => self.lock_click(index),
            EscapeAction::LockReset => {
                self.lock_click_order.clear();
                self.lock_error = None;
            }
            EscapeAction::FillWordBox { index, letter } => self.fill_word_box(index, letter),
            EscapeAction::SubmitFinalWord(guess) => self.submit_final_word(&guess),
            EscapeAction::Escape => {
                if self.current_screen == EscapeScreen::FinalLock && self.lock_opened {
                    log::info!("escape room superado");
                    self.current_screen = EscapeScreen::Escaped;
                }
            }
            EscapeAction::ResetGame => {
                log::info!("partida reiniciada");
                *self = Self::default();
            }
            EscapeAction::SetScreen(screen) => self.current_screen = screen,
            EscapeAction::Hydrate(saved) => *self = *saved,
        }
    }

    fn hydrate(saved: Self) -> EscapeAction {
        EscapeAction::Hydrate(Box::new(saved))
    }

    fn is_loaded(&self) -> bool {
        self.game_content.is_some()
    }
}
