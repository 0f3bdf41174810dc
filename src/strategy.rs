//! Guess selection.
//!
//! Every candidate guess is scored by how it would split the remaining words
//! into buckets (see [`bucket_sizes`]). The strategies differ only in which
//! statistic of that split they rank by:
//!
//! * [`Strategy::MaxEntropy`] maximizes the Shannon entropy of the bucket
//!   distribution, i.e. the expected information gained from the feedback.
//! * [`Strategy::MinExpectedSize`] minimizes the expected number of words left
//!   after the feedback, `Σ size² / n`. This is the one-step Bellman optimal
//!   choice.
//!
//! Candidates are scored in parallel. Ties are broken first in favor of
//! candidates that could themselves be the answer, then by alphabetical
//! order, so the chosen guess never depends on thread scheduling.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::debug;
use rayon::prelude::*;

use crate::bucket::bucket_sizes;
use crate::error::{Result, WordleError};
use crate::word::{Word, WordSet};

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub word: Word,
    /// Shannon entropy of the bucket distribution, in bits.
    pub entropy: f64,
    /// Expected number of candidates left after this guess.
    pub expected_remaining: f64,
    pub is_possible_answer: bool,
}

impl GuessAnalysis {
    /// Scores `guess` against the remaining `words`, which must not be empty.
    pub fn new(guess: &Word, words: &WordSet) -> Result<Self> {
        if words.is_empty() {
            return Err(WordleError::EmptyPool);
        }
        let mut sizes = bucket_sizes(guess, words)?;
        // Summing in a canonical order makes equal distributions score equal.
        sizes.sort_unstable();
        let n = words.len() as f64;
        let entropy = sizes
            .iter()
            .map(|&s| {
                let s = s as f64;
                s / n * (n / s).log2()
            })
            .sum();
        let sum_squares: usize = sizes.iter().map(|&s| s * s).sum();

        Ok(Self {
            word: *guess,
            entropy,
            expected_remaining: sum_squares as f64 / n,
            is_possible_answer: words.contains(guess),
        })
    }

    fn only(word: Word) -> Self {
        Self {
            word,
            entropy: 0.0,
            expected_remaining: 1.0,
            is_possible_answer: true,
        }
    }
}

/// How the next guess is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    MaxEntropy,
    MinExpectedSize,
}

impl Strategy {
    /// Picks the best guess from `pool` for narrowing down `words`.
    ///
    /// `pool` may be wider than `words`, e.g. the whole dictionary while
    /// `words` holds only the answers still possible. With a single word left
    /// that word is returned immediately.
    pub fn select(self, words: &WordSet, pool: &[Word]) -> Result<GuessAnalysis> {
        self.select_excluding(words, pool, &HashSet::new())
    }

    /// Like [`select`](Strategy::select), but never returns a word in
    /// `guessed`.
    pub fn select_excluding(
        self,
        words: &WordSet,
        pool: &[Word],
        guessed: &HashSet<Word>,
    ) -> Result<GuessAnalysis> {
        self.rank_excluding(words, pool, guessed, 1)?
            .into_iter()
            .next()
            .ok_or(WordleError::EmptyPool)
    }

    /// The best `n` guesses, best first.
    pub fn rank(self, words: &WordSet, pool: &[Word], n: usize) -> Result<Vec<GuessAnalysis>> {
        self.rank_excluding(words, pool, &HashSet::new(), n)
    }

    pub fn rank_excluding(
        self,
        words: &WordSet,
        pool: &[Word],
        guessed: &HashSet<Word>,
        n: usize,
    ) -> Result<Vec<GuessAnalysis>> {
        if pool.is_empty() || words.is_empty() {
            return Err(WordleError::EmptyPool);
        }
        if let [only] = words.words() {
            return Ok(vec![GuessAnalysis::only(*only)]);
        }

        let mut analyses = pool
            .par_iter()
            .filter(|w| !guessed.contains(*w))
            .map(|w| GuessAnalysis::new(w, words))
            .collect::<Result<Vec<_>>>()?;
        if analyses.is_empty() {
            return Err(WordleError::EmptyPool);
        }

        analyses.par_sort_unstable_by(|a, b| self.ranking(a, b));
        analyses.truncate(n);
        if let Some(best) = analyses.first() {
            debug!(
                "{} picked {} from {} candidates against {} words (entropy {:.3}, expected {:.2})",
                self,
                best.word,
                pool.len(),
                words.len(),
                best.entropy,
                best.expected_remaining
            );
        }
        Ok(analyses)
    }

    /// Orders better guesses first.
    fn ranking(self, a: &GuessAnalysis, b: &GuessAnalysis) -> Ordering {
        let by_score = match self {
            Strategy::MaxEntropy => b.entropy.total_cmp(&a.entropy),
            Strategy::MinExpectedSize => a.expected_remaining.total_cmp(&b.expected_remaining),
        };
        by_score
            .then_with(|| b.is_possible_answer.cmp(&a.is_possible_answer))
            .then_with(|| a.word.cmp(&b.word))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::MaxEntropy => write!(f, "entropy"),
            Strategy::MinExpectedSize => write!(f, "expected"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entropy" | "max-entropy" => Ok(Strategy::MaxEntropy),
            "expected" | "min-expected" | "bellman" => Ok(Strategy::MinExpectedSize),
            other => Err(format!(
                "unknown strategy {other:?} (expected \"entropy\" or \"expected\")"
            )),
        }
    }
}
