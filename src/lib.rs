// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod difficulty;
pub mod error;
pub mod game_state;
pub mod guess;
pub mod logging;
pub mod round;
pub mod score;
pub mod storage;
pub mod theme;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use difficulty::{Difficulty, lives_for};
pub use error::{EmptyPoolError, GameError, Result, ValidationError};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use guess::{GuessResult, GuessState, LetterResult, LetterState, RoundStatus};
pub use round::{GameView, GuessOutcome, RoundController, RoundOutcome};
pub use score::ScoreTracker;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::Theme;
pub use wordbank::{
    CategoryFilter, WordBank, WordEntry, load_wordbank_from_file, load_wordbank_from_str,
};
