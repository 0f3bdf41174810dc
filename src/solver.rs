//! Game orchestration.
//!
//! A [`WordleSolver`] owns everything one game needs: the dictionary, the
//! answers still possible, the [`ConstraintFilter`] accumulated from the
//! feedback so far, and the guesses already made. Running several games at
//! once means one solver per game; clones are cheap enough for that.

use std::collections::HashSet;

use log::{debug, info};
use rayon::prelude::*;

use crate::error::{Result, WordleError};
use crate::feedback::{FeedbackPattern, Response};
use crate::filter::ConstraintFilter;
use crate::strategy::{GuessAnalysis, Strategy};
use crate::word::{Word, WordSet};

/// Guesses allowed per game unless configured otherwise.
pub const DEFAULT_MAX_GUESSES: usize = 6;

/// The main Wordle solver
#[derive(Debug, Clone)]
pub struct WordleSolver {
    all_words: WordSet,
    possible_answers: WordSet,
    filter: ConstraintFilter,
    strategy: Strategy,
    hard_mode: bool,
    max_guesses: usize,
    history: Vec<Response>,
}

impl WordleSolver {
    pub fn new(words: WordSet) -> Result<Self> {
        Ok(Self {
            filter: ConstraintFilter::new(words.word_length())?,
            possible_answers: words.clone(),
            all_words: words,
            strategy: Strategy::default(),
            hard_mode: false,
            max_guesses: DEFAULT_MAX_GUESSES,
            history: Vec::new(),
        })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// In hard mode every suggestion is consistent with all feedback so far.
    pub fn set_hard_mode(&mut self, enabled: bool) {
        self.hard_mode = enabled;
    }

    pub fn is_hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn set_max_guesses(&mut self, max_guesses: usize) {
        self.max_guesses = max_guesses;
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    pub fn word_length(&self) -> usize {
        self.all_words.word_length()
    }

    pub fn remaining_count(&self) -> usize {
        self.possible_answers.len()
    }

    pub fn possible_answers(&self) -> &WordSet {
        &self.possible_answers
    }

    pub fn all_words(&self) -> &WordSet {
        &self.all_words
    }

    pub fn filter(&self) -> &ConstraintFilter {
        &self.filter
    }

    /// The responses applied so far, oldest first.
    pub fn history(&self) -> &[Response] {
        &self.history
    }

    /// Starts a new game over the same dictionary.
    pub fn reset(&mut self) {
        self.possible_answers = self.all_words.clone();
        self.filter.reset();
        self.history.clear();
    }

    /// Folds a scored guess into the game and prunes the possible answers.
    pub fn apply_response(&mut self, response: &Response) -> Result<()> {
        self.filter.update(response)?;
        let before = self.possible_answers.len();
        self.possible_answers = self.filter.apply(&self.possible_answers)?;
        self.history.push(*response);
        debug!(
            "{} left {} of {} possible answers",
            response,
            self.possible_answers.len(),
            before
        );
        Ok(())
    }

    /// Applies feedback obtained elsewhere, e.g. typed in by a player.
    pub fn apply_feedback(&mut self, guess: &Word, pattern: FeedbackPattern) -> Result<()> {
        self.apply_response(&Response::new(*guess, pattern)?)
    }

    fn candidate_pool(&self) -> Vec<Word> {
        if self.hard_mode {
            self.all_words
                .iter()
                .filter(|w| self.filter.matches(w))
                .copied()
                .collect()
        } else {
            self.all_words.words().to_vec()
        }
    }

    fn guessed(&self) -> HashSet<Word> {
        self.history.iter().map(|r| *r.guess()).collect()
    }

    pub fn find_best_guess(&self) -> Result<GuessAnalysis> {
        self.find_best_guesses(1)?
            .into_iter()
            .next()
            .ok_or(WordleError::EmptyPool)
    }

    /// The best `n` guesses under the current strategy, best first.
    pub fn find_best_guesses(&self, n: usize) -> Result<Vec<GuessAnalysis>> {
        self.strategy.rank_excluding(
            &self.possible_answers,
            &self.candidate_pool(),
            &self.guessed(),
            n,
        )
    }

    /// Plays until the feedback is a win or the guesses run out, returning
    /// every scored guess.
    ///
    /// If the feedback rules out every word, this fails with
    /// [`WordleError::EmptyPool`]; the guesses made up to then stay in
    /// [`history`](WordleSolver::history).
    pub fn solve_with_feedback<F>(&mut self, mut get_feedback: F) -> Result<Vec<Response>>
    where
        F: FnMut(&Word) -> FeedbackPattern,
    {
        let mut guesses: Vec<Response> = Vec::new();

        for _ in 0..self.max_guesses {
            let best = match self.find_best_guess() {
                Ok(best) => best,
                Err(e) => {
                    debug!(
                        "gave up after {} guesses: {}",
                        guesses.len(),
                        guesses
                            .iter()
                            .map(Response::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                    return Err(e);
                }
            };
            let response = Response::new(best.word, get_feedback(&best.word))?;
            guesses.push(response);

            if response.is_win() {
                info!("solved in {} guesses", guesses.len());
                break;
            }

            self.apply_response(&response)?;
        }

        Ok(guesses)
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(&mut self, target: &Word) -> Result<Vec<Response>> {
        if target.len() != self.word_length() {
            return Err(WordleError::LengthMismatch {
                expected: self.word_length(),
                found: target.len(),
            });
        }
        self.solve_with_feedback(|guess| FeedbackPattern::calculate(guess, target))
    }

    /// Guesses needed for every word of the dictionary, in dictionary order.
    /// A word not solved within the limit counts as `max_guesses + 1`.
    fn guess_counts(&self) -> Result<Vec<usize>> {
        self.all_words
            .words()
            .par_iter()
            .map(|target| {
                let mut solver = self.clone();
                solver.reset();
                let guesses = solver.solve_for_target(target)?;
                Ok(match guesses.last() {
                    Some(last) if last.is_win() => guesses.len(),
                    _ => self.max_guesses + 1,
                })
            })
            .collect()
    }

    /// Calculate the average number of guesses needed to solve all words
    pub fn benchmark_average_guesses(&self) -> Result<f64> {
        let counts = self.guess_counts()?;
        Ok(counts.iter().sum::<usize>() as f64 / counts.len() as f64)
    }

    /// Get distribution of guess counts across all words
    pub fn benchmark_guess_distribution(&self) -> Result<Vec<(usize, usize)>> {
        let guess_counts = self.guess_counts()?;
        let max_guesses = guess_counts.iter().copied().max().unwrap_or(0);
        let mut distribution = vec![0usize; max_guesses + 1];

        for count in guess_counts {
            distribution[count] += 1;
        }

        Ok(distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect())
    }
}
