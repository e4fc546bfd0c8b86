use thiserror::Error;

/// Why a submitted word was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("word must be at least {min} letters long (got {len})")]
    TooShort { len: usize, min: usize },
    #[error("word may only contain letters A-Z (found '{0}')")]
    NonAlphabetic(char),
}

/// The category filter matched no entries in the word bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no words available for category '{filter}'")]
pub struct EmptyPoolError {
    pub filter: String,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid word: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    EmptyPool(#[from] EmptyPoolError),
    #[error("no round in progress")]
    NoActiveRound,
    #[error("'{0}' is not a letter")]
    InvalidLetter(char),
}

pub type Result<T> = std::result::Result<T, GameError>;
