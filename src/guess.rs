//! Per-round guess tracking.
//!
//! # State Machine
//! `InProgress` → `Won` or `InProgress` → `Lost`. Both outcomes are terminal:
//! the only way out is to replace the whole [`GuessState`] with a new round.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterResult {
    Correct,
    Incorrect,
    /// Repeated letter, or the round was already over. Nothing changed.
    AlreadyGuessed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessResult {
    pub letter: LetterResult,
    pub status: RoundStatus,
}

/// Keyboard key state for a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterState {
    Unused,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessState {
    secret: String,
    guessed_correct: BTreeSet<char>,
    // Kept in guess order for display.
    guessed_wrong: Vec<char>,
    lives_remaining: u32,
    status: RoundStatus,
}

impl GuessState {
    /// A fresh round. `secret` is expected to be a validated lowercase word.
    pub(crate) fn new(secret: &str, lives: u32) -> Self {
        let mut state = Self {
            secret: secret.to_ascii_lowercase(),
            guessed_correct: BTreeSet::new(),
            guessed_wrong: Vec::new(),
            lives_remaining: lives,
            status: RoundStatus::InProgress,
        };
        state.status = state.compute_status();
        state
    }

    pub fn apply_guess(&mut self, letter: char) -> GuessResult {
        let letter = letter.to_ascii_lowercase();
        if self.is_terminal() || self.has_guessed(letter) {
            return GuessResult {
                letter: LetterResult::AlreadyGuessed,
                status: self.status,
            };
        }

        let result = if self.secret.contains(letter) {
            self.guessed_correct.insert(letter);
            LetterResult::Correct
        } else {
            self.guessed_wrong.push(letter);
            self.lives_remaining = self.lives_remaining.saturating_sub(1);
            LetterResult::Incorrect
        };

        self.status = self.compute_status();
        GuessResult {
            letter: result,
            status: self.status,
        }
    }

    // Win is checked first.
    fn compute_status(&self) -> RoundStatus {
        if self.secret.chars().all(|c| self.guessed_correct.contains(&c)) {
            RoundStatus::Won
        } else if self.lives_remaining == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    fn has_guessed(&self, letter: char) -> bool {
        self.guessed_correct.contains(&letter) || self.guessed_wrong.contains(&letter)
    }

    pub fn is_won(&self) -> bool {
        self.status == RoundStatus::Won
    }

    pub fn is_lost(&self) -> bool {
        self.status == RoundStatus::Lost
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn secret_word(&self) -> &str {
        &self.secret
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn guessed_correct(&self) -> &BTreeSet<char> {
        &self.guessed_correct
    }

    pub fn guessed_wrong(&self) -> &[char] {
        &self.guessed_wrong
    }

    pub fn letter_state(&self, letter: char) -> LetterState {
        let letter = letter.to_ascii_lowercase();
        if self.guessed_correct.contains(&letter) {
            LetterState::Correct
        } else if self.guessed_wrong.contains(&letter) {
            LetterState::Wrong
        } else {
            LetterState::Unused
        }
    }

    /// The secret word with unguessed letters shown as `_`.
    pub fn masked_word(&self) -> String {
        self.secret
            .chars()
            .map(|c| if self.guessed_correct.contains(&c) { c } else { '_' })
            .collect()
    }
}
