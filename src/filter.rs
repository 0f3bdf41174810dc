//! Accumulated constraints from previous guesses.
//!
//! A [`ConstraintFilter`] belongs to exactly one game. Each scored guess is
//! folded into it with [`update`](ConstraintFilter::update), and
//! [`apply`](ConstraintFilter::apply) then prunes any word set down to the
//! words that are still consistent with everything seen so far.

use crate::error::{Result, WordleError};
use crate::feedback::{Feedback, Response};
use crate::word::{letter_index, Word, WordSet};
use crate::{ALPHABET_SIZE, MAX_WORD_LENGTH};

/// A set of letters `a..=z` stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const ALL: Self = Self((1 << ALPHABET_SIZE) - 1);

    /// The set holding just `letter`; empty if it is not in `a..=z`.
    pub fn only(letter: u8) -> Self {
        Self(Self::bit(letter))
    }

    pub fn contains(self, letter: u8) -> bool {
        self.0 & Self::bit(letter) != 0
    }

    pub fn remove(&mut self, letter: u8) {
        self.0 &= !Self::bit(letter);
    }

    fn bit(letter: u8) -> u32 {
        if letter.is_ascii_lowercase() {
            1 << letter_index(letter)
        } else {
            0
        }
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The letters in alphabetical order.
    pub fn letters(self) -> impl Iterator<Item = char> {
        (b'a'..=b'z')
            .filter(move |&b| self.contains(b))
            .map(char::from)
    }
}

/// Constraints accumulated over one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintFilter {
    allowed: Vec<LetterSet>,
    min_counts: [u8; ALPHABET_SIZE],
}

impl ConstraintFilter {
    /// An unconstrained filter for words of `word_length` letters.
    pub fn new(word_length: usize) -> Result<Self> {
        if word_length == 0 {
            return Err(WordleError::EmptyWord);
        }
        if word_length > MAX_WORD_LENGTH {
            return Err(WordleError::WordTooLong {
                length: word_length,
            });
        }
        Ok(Self {
            allowed: vec![LetterSet::ALL; word_length],
            min_counts: [0; ALPHABET_SIZE],
        })
    }

    pub fn word_length(&self) -> usize {
        self.allowed.len()
    }

    /// Letters still possible at `position`.
    pub fn allowed(&self, position: usize) -> Option<LetterSet> {
        self.allowed.get(position).copied()
    }

    /// The fewest occurrences of `letter` a word must contain.
    pub fn min_count(&self, letter: char) -> u8 {
        let letter = letter.to_ascii_lowercase();
        if letter.is_ascii_lowercase() {
            self.min_counts[letter_index(letter as u8)]
        } else {
            0
        }
    }

    /// Folds one scored guess into the constraints.
    pub fn update(&mut self, response: &Response) -> Result<()> {
        self.check_length(response.guess().len())?;
        let scored: Vec<(u8, Feedback)> = response.iter().collect();

        let mut confirmed = [0u8; ALPHABET_SIZE];
        for &(letter, fb) in &scored {
            if matches!(fb, Feedback::Correct | Feedback::Present) {
                confirmed[letter_index(letter)] += 1;
            }
        }
        for (min, &seen) in self.min_counts.iter_mut().zip(&confirmed) {
            *min = (*min).max(seen);
        }

        for (allowed, &(letter, fb)) in self.allowed.iter_mut().zip(&scored) {
            if fb == Feedback::Correct {
                *allowed = LetterSet::only(letter);
            }
        }

        for (position, &(letter, fb)) in scored.iter().enumerate() {
            match fb {
                Feedback::Correct => {}
                Feedback::Present | Feedback::Excess => self.allowed[position].remove(letter),
                Feedback::Absent if confirmed[letter_index(letter)] > 0 => {
                    // Typed-in feedback can grey a repeat of a letter that is
                    // confirmed elsewhere; only this position is ruled out.
                    self.allowed[position].remove(letter);
                }
                Feedback::Absent => {
                    for allowed in self.allowed.iter_mut().filter(|a| a.len() > 1) {
                        allowed.remove(letter);
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether `word` satisfies every constraint seen so far.
    pub fn matches(&self, word: &Word) -> bool {
        if word.len() != self.allowed.len() {
            return false;
        }
        let letters = word.as_bytes();
        if !letters
            .iter()
            .zip(&self.allowed)
            .all(|(&b, allowed)| allowed.contains(b))
        {
            return false;
        }
        let counts = word.letter_counts();
        counts
            .iter()
            .zip(&self.min_counts)
            .all(|(have, need)| have >= need)
    }

    /// The subset of `words` consistent with every constraint seen so far.
    pub fn apply(&self, words: &WordSet) -> Result<WordSet> {
        self.check_length(words.word_length())?;
        let kept = words.iter().filter(|w| self.matches(w)).copied().collect();
        Ok(WordSet::from_sorted(words.word_length(), kept))
    }

    /// Forgets every constraint.
    pub fn reset(&mut self) {
        self.allowed.fill(LetterSet::ALL);
        self.min_counts = [0; ALPHABET_SIZE];
    }

    fn check_length(&self, found: usize) -> Result<()> {
        if found != self.allowed.len() {
            return Err(WordleError::LengthMismatch {
                expected: self.allowed.len(),
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;
    use crate::feedback::FeedbackPattern;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn typed(guess: &str, pattern: &str) -> Response {
        Response::new(word(guess), FeedbackPattern::parse(pattern).unwrap()).unwrap()
    }

    #[test]
    fn letter_set_basics() {
        let mut set = LetterSet::ALL;
        assert_eq!(set.len(), 26);
        set.remove(b'q');
        assert!(!set.contains(b'q'));
        assert!(set.contains(b'a'));
        assert_eq!(set.len(), 25);
        let only = LetterSet::only(b'e');
        assert_eq!(only.letters().collect::<String>(), "e");
        assert!(!only.is_empty());
    }

    #[test]
    fn letter_set_ignores_non_letters() {
        let mut set = LetterSet::ALL;
        for b in [b'A', b'Z', b'0', b'{', b'`', 0xff] {
            assert!(!set.contains(b));
            set.remove(b);
            assert!(LetterSet::only(b).is_empty());
        }
        assert_eq!(set, LetterSet::ALL);
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(ConstraintFilter::new(0).is_err());
        assert!(ConstraintFilter::new(9).is_err());
        let mut filter = ConstraintFilter::new(5).unwrap();
        let response = evaluate(&word("abc"), &word("abc")).unwrap();
        assert!(matches!(
            filter.update(&response),
            Err(WordleError::LengthMismatch {
                expected: 5,
                found: 3
            })
        ));
    }

    #[test]
    fn correct_collapses_position() {
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter
            .update(&evaluate(&word("crate"), &word("crane")).unwrap())
            .unwrap();
        assert_eq!(filter.allowed(0), Some(LetterSet::only(b'c')));
        assert_eq!(filter.allowed(4), Some(LetterSet::only(b'e')));
        assert!(!filter.allowed(3).unwrap().contains(b'n'));
        assert!(!filter.allowed(1).unwrap().contains(b'n'));
        assert_eq!(filter.min_count('c'), 1);
        assert_eq!(filter.min_count('n'), 0);
    }

    #[test]
    fn present_excludes_only_its_position() {
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter
            .update(&evaluate(&word("arose"), &word("raise")).unwrap())
            .unwrap();
        let first = filter.allowed(0).unwrap();
        assert!(!first.contains(b'r'));
        assert!(first.contains(b'a'));
        assert!(filter.allowed(2).unwrap().contains(b'r'));
        assert_eq!(filter.min_count('r'), 1);
        assert_eq!(filter.min_count('a'), 1);
        assert!(filter.matches(&word("arose")));
    }

    #[test]
    fn excess_keeps_letter_elsewhere() {
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter
            .update(&evaluate(&word("beach"), &word("beech")).unwrap())
            .unwrap();
        assert!(!filter.allowed(2).unwrap().contains(b'e'));
        assert_eq!(filter.allowed(1), Some(LetterSet::only(b'e')));
        assert_eq!(filter.min_count('e'), 1);
        assert!(filter.matches(&word("beach")));
    }

    #[test]
    fn min_counts_only_grow() {
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter.update(&typed("geese", "bygbb")).unwrap();
        assert_eq!(filter.min_count('e'), 2);
        filter.update(&typed("thyme", "bbbbg")).unwrap();
        assert_eq!(filter.min_count('e'), 2);
    }

    #[test]
    fn typed_gray_beside_green_only_blocks_its_position() {
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter.update(&typed("speed", "bbgbb")).unwrap();
        assert_eq!(filter.allowed(2), Some(LetterSet::only(b'e')));
        assert!(!filter.allowed(3).unwrap().contains(b'e'));
        assert!(filter.allowed(0).unwrap().contains(b'e'));
        assert!(!filter.allowed(0).unwrap().contains(b's'));
    }

    #[test]
    fn locked_position_survives_global_removal() {
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter.update(&typed("crane", "gbbbb")).unwrap();
        assert_eq!(filter.allowed(0), Some(LetterSet::only(b'c')));
        // A contradictory later round greys `c` everywhere.
        filter.update(&typed("decoy", "bbbbb")).unwrap();
        assert_eq!(filter.allowed(0), Some(LetterSet::only(b'c')));
        assert!(!filter.allowed(2).unwrap().contains(b'c'));
    }

    #[test]
    fn reset_restores_everything() {
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter.update(&typed("crane", "gybeb")).unwrap();
        filter.reset();
        assert_eq!(filter, ConstraintFilter::new(5).unwrap());
    }

    #[test]
    fn apply_keeps_consistent_words() {
        let words =
            WordSet::new(["crane", "crate", "trace", "slate", "react"].map(word)).unwrap();
        let mut filter = ConstraintFilter::new(5).unwrap();
        filter
            .update(&evaluate(&word("crate"), &word("crane")).unwrap())
            .unwrap();
        let kept = filter.apply(&words).unwrap();
        let kept: Vec<_> = kept.iter().map(Word::as_str).collect();
        assert_eq!(kept, ["crate"]);
        assert_eq!(words.len(), 5);
    }

    #[test]
    fn apply_checks_length() {
        let filter = ConstraintFilter::new(4).unwrap();
        let words = WordSet::new([word("crane")]).unwrap();
        assert!(filter.apply(&words).is_err());
    }
}
