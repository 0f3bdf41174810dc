//! Errors produced by the engine.

use thiserror::Error;

/// The errors that `wordle_bot` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    /// Two words (or a word and a word set) that must share a length do not.
    #[error("expected a word of length {expected}, found length {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// The word is longer than a [`FeedbackPattern`](crate::FeedbackPattern) can encode.
    #[error("words of length {length} exceed the maximum of {max}", max = crate::MAX_WORD_LENGTH)]
    WordTooLong { length: usize },

    #[error("a word must contain at least one letter")]
    EmptyWord,

    #[error("the word \"{word}\" contains the non-letter {letter:?}")]
    InvalidLetter { word: String, letter: char },

    #[error("a feedback pattern must cover at least one position")]
    EmptyPattern,

    #[error("the dictionary contains no words")]
    EmptyDictionary,

    /// Every candidate has been eliminated, usually because the feedback
    /// supplied so far is contradictory.
    #[error("no candidate words remain")]
    EmptyPool,

    #[error("could not read dictionary")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = WordleError> = std::result::Result<T, E>;
