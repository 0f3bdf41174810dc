//! # Wordle Bot
//!
//! A multithreaded Wordle engine using entropy-based information theory.
//!
//! The engine scores guesses under the full duplicate-letter rules
//! ([`evaluate`]), accumulates the feedback of a game into a
//! [`ConstraintFilter`], groups the remaining words by the feedback a guess
//! would receive ([`buckets`]) and picks the guess whose split is most
//! informative ([`Strategy`]). [`WordleSolver`] ties these together into a
//! game.

pub mod bucket;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod solver;
pub mod strategy;
pub mod word;

pub use bucket::{bucket_sizes, buckets, BucketMap};
pub use error::{Result, WordleError};
pub use feedback::{evaluate, Feedback, FeedbackPattern, Response};
pub use filter::{ConstraintFilter, LetterSet};
pub use solver::WordleSolver;
pub use strategy::{GuessAnalysis, Strategy};
pub use word::{Word, WordSet};

/// Longest word a [`FeedbackPattern`] can encode (two bits per letter in a `u16`).
pub const MAX_WORD_LENGTH: usize = 8;

/// Letters `a` through `z`.
pub const ALPHABET_SIZE: usize = 26;

/// The word list compiled into the crate.
pub const DICTIONARY: &str = include_str!("../dictionary/dictionary.txt");

/// Load the dictionary from the embedded file
pub fn load_dictionary() -> Result<WordSet> {
    WordSet::parse(DICTIONARY)
}
