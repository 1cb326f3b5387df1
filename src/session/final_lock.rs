//! Reto final del escape room: candado alfabético o palabra final.

use super::escape::{EscapeScreen, EscapeSession};
use crate::judge::{check_final_word, sorted_lock_letters};

/// Casilla de la palabra final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordBox {
    pub value: Option<char>,
    /// Letra ganada o signo que no hay que adivinar.
    pub locked: bool,
}

const WRONG_ORDER: &str = "¡Orden incorrecto! Pulsa las letras en orden alfabético.";
const WRONG_WORD: &str = "Esa no es la palabra. ¡Inténtalo otra vez!";

impl EscapeSession {
    /// `true` si el reto final es adivinar la palabra.
    pub fn is_word_puzzle(&self) -> bool {
        self.content().and_then(|c| c.final_word()).is_some()
    }

    pub fn final_word(&self) -> Option<&str> {
        self.content().and_then(|c| c.final_word())
    }

    pub fn final_clue(&self) -> Option<&str> {
        self.content()
            .and_then(|c| c.final_clue.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    pub fn lock_letters(&self) -> Vec<String> {
        self.unlocked_letters
            .iter()
            .map(|l| l.letter.letter.clone())
            .collect()
    }

    /// Una casilla por carácter de la palabra final. Cada letra ganada ocupa,
    /// de izquierda a derecha, la primera posición libre donde coincide.
    pub fn final_word_boxes(&self) -> Vec<WordBox> {
        let Some(word) = self.final_word() else {
            return Vec::new();
        };
        let chars: Vec<char> = word.chars().collect();
        let mut boxes: Vec<WordBox> = chars
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if c.is_alphabetic() {
                    WordBox {
                        value: self.word_entries.get(i).copied().flatten(),
                        locked: false,
                    }
                } else {
                    WordBox {
                        value: Some(*c),
                        locked: true,
                    }
                }
            })
            .collect();

        for earned in &self.unlocked_letters {
            let Some(letter) = earned.letter.letter.trim().chars().next() else {
                continue;
            };
            let slot = chars.iter().enumerate().position(|(i, c)| {
                !boxes[i].locked && c.to_lowercase().eq(letter.to_lowercase())
            });
            if let Some(i) = slot {
                boxes[i] = WordBox {
                    value: Some(chars[i]),
                    locked: true,
                };
            }
        }
        boxes
    }

    /// La palabra que forman las casillas, o `None` si falta alguna.
    pub fn final_word_guess(&self) -> Option<String> {
        self.final_word_boxes().iter().map(|b| b.value).collect()
    }

    pub(super) fn go_to_final_lock(&mut self) {
        if !self.all_checkpoints_complete() {
            return;
        }
        self.current_screen = EscapeScreen::FinalLock;
        self.lock_click_order.clear();
        self.lock_error = None;
        // Sin letras no hay nada que ordenar
        self.lock_opened = !self.is_word_puzzle() && self.unlocked_letters.is_empty();
        let len = self.final_word().map(|w| w.chars().count()).unwrap_or(0);
        self.word_entries = vec![None; len];
    }

    pub(super) fn lock_click(&mut self, index: usize) {
        if self.current_screen != EscapeScreen::FinalLock || self.is_word_puzzle() || self.lock_opened
        {
            return;
        }
        let letters = self.lock_letters();
        let Some(letter) = letters.get(index) else {
            return;
        };
        if self.lock_click_order.contains(&index) {
            return;
        }

        let sorted = sorted_lock_letters(&letters);
        if sorted.get(self.lock_click_order.len()) == Some(letter) {
            self.lock_click_order.push(index);
            self.lock_error = None;
            if self.lock_click_order.len() == letters.len() {
                log::debug!("candado abierto");
                self.lock_opened = true;
            }
        } else {
            self.lock_click_order.clear();
            self.lock_error = Some(WRONG_ORDER.to_string());
        }
    }

    pub(super) fn fill_word_box(&mut self, index: usize, letter: Option<char>) {
        let editable = self
            .final_word_boxes()
            .get(index)
            .is_some_and(|b| !b.locked);
        if !editable {
            return;
        }
        if self.word_entries.len() <= index {
            self.word_entries.resize(index + 1, None);
        }
        self.word_entries[index] = letter.filter(|c| !c.is_whitespace());
        self.lock_error = None;
    }

    pub(super) fn submit_final_word(&mut self, guess: &str) {
        if self.current_screen != EscapeScreen::FinalLock {
            return;
        }
        let Some(word) = self.final_word() else {
            return;
        };
        if check_final_word(guess, word) {
            log::info!("palabra final acertada");
            self.current_screen = EscapeScreen::Escaped;
            self.lock_error = None;
            return;
        }
        // Las letras ganadas se quedan; solo se vacía lo que escribió el alumno
        let boxes = self.final_word_boxes();
        self.word_entries = boxes.iter().map(|_| None).collect();
        self.lock_error = Some(WRONG_WORD.to_string());
    }
}
