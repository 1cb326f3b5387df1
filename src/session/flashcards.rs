use crate::model::{Flashcard, FlashcardContent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FlashcardScreen {
    #[default]
    Start,
    Study,
    Completed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FlashcardAction {
    LoadFlashcards(FlashcardContent),
    NextCard,
    PrevCard,
    GoToCard(usize),
    FlipCard,
    StartStudying,
    Reset,
    SetScreen(FlashcardScreen),
}

/// Repaso de un mazo. No se guarda: empezar de nuevo no cuesta nada.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlashcardSession {
    pub current_screen: FlashcardScreen,
    pub flashcard_content: Option<FlashcardContent>,
    pub current_card_index: usize,
    pub is_flipped: bool,
    pub viewed_cards: BTreeSet<usize>,
}

impl FlashcardSession {
    pub fn card_count(&self) -> usize {
        self.flashcard_content
            .as_ref()
            .map(|c| c.cards.len())
            .unwrap_or(0)
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.flashcard_content
            .as_ref()?
            .cards
            .get(self.current_card_index)
    }

    /// (tarjeta actual empezando en 1, total)
    pub fn progress(&self) -> (usize, usize) {
        (self.current_card_index + 1, self.card_count())
    }

    fn show_card(&mut self, index: usize) {
        self.current_card_index = index;
        self.is_flipped = false;
    }

    pub fn dispatch(&mut self, action: FlashcardAction) {
        match action {
            FlashcardAction::LoadFlashcards(content) => {
                log::info!("mazo cargado: {} tarjetas", content.cards.len());
                *self = Self {
                    current_screen: FlashcardScreen::Study,
                    flashcard_content: Some(content),
                    ..Self::default()
                };
            }
            FlashcardAction::NextCard => {
                self.viewed_cards.insert(self.current_card_index);
                let next = self.current_card_index + 1;
                if next >= self.card_count() {
                    self.current_screen = FlashcardScreen::Completed;
                } else {
                    self.show_card(next);
                }
            }
            FlashcardAction::PrevCard => self.show_card(self.current_card_index.saturating_sub(1)),
            FlashcardAction::GoToCard(index) => {
                if index < self.card_count() {
                    self.show_card(index);
                    self.current_screen = FlashcardScreen::Study;
                }
            }
            FlashcardAction::FlipCard => self.is_flipped = !self.is_flipped,
            FlashcardAction::StartStudying => {
                self.show_card(0);
                self.viewed_cards.clear();
                self.current_screen = FlashcardScreen::Study;
            }
            FlashcardAction::Reset => {
                *self = Self {
                    current_screen: FlashcardScreen::Study,
                    flashcard_content: self.flashcard_content.take(),
                    ..Self::default()
                };
            }
            FlashcardAction::SetScreen(screen) => self.current_screen = screen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(count: u32) -> FlashcardContent {
        FlashcardContent {
            cards: (1..=count)
                .map(|id| Flashcard {
                    id,
                    front: format!("F{id}"),
                    back: format!("B{id}"),
                    ..Flashcard::default()
                })
                .collect(),
            ..FlashcardContent::default()
        }
    }

    #[test]
    fn studying_through_the_deck() {
        let mut session = FlashcardSession::default();
        session.dispatch(FlashcardAction::LoadFlashcards(deck(2)));
        assert_eq!(session.current_screen, FlashcardScreen::Study);
        assert_eq!(session.progress(), (1, 2));

        session.dispatch(FlashcardAction::FlipCard);
        assert!(session.is_flipped);
        session.dispatch(FlashcardAction::NextCard);
        assert!(!session.is_flipped);
        assert_eq!(session.current_card().map(|c| c.front.as_str()), Some("F2"));

        session.dispatch(FlashcardAction::NextCard);
        assert_eq!(session.current_screen, FlashcardScreen::Completed);
        assert_eq!(session.viewed_cards.len(), 2);
    }

    #[test]
    fn previous_is_clamped_and_go_to_checks_bounds() {
        let mut session = FlashcardSession::default();
        session.dispatch(FlashcardAction::LoadFlashcards(deck(3)));
        session.dispatch(FlashcardAction::PrevCard);
        assert_eq!(session.current_card_index, 0);
        session.dispatch(FlashcardAction::GoToCard(2));
        assert_eq!(session.progress(), (3, 3));
        session.dispatch(FlashcardAction::GoToCard(7));
        assert_eq!(session.current_card_index, 2);
    }

    #[test]
    fn reset_keeps_the_deck() {
        let mut session = FlashcardSession::default();
        session.dispatch(FlashcardAction::LoadFlashcards(deck(1)));
        session.dispatch(FlashcardAction::NextCard);
        session.dispatch(FlashcardAction::Reset);
        assert_eq!(session.current_screen, FlashcardScreen::Study);
        assert_eq!(session.card_count(), 1);
        assert!(session.viewed_cards.is_empty());
    }
}
