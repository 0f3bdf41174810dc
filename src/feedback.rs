//! Feedback calculation for guesses.
//!
//! This module scores a guess against a secret word, and packs the resulting
//! per-position statuses into a [`FeedbackPattern`] small enough to be used as
//! a bucket key.

use std::fmt;

use crate::error::{Result, WordleError};
use crate::word::{letter_index, Word};
use crate::{ALPHABET_SIZE, MAX_WORD_LENGTH};

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Letter in the word but in another position (yellow)
    Present,
    /// Letter does not occur in the word at all (gray)
    Absent,
    /// Letter occurs in the word, but every occurrence is already explained by
    /// another position of this guess (gray)
    Excess,
}

impl Feedback {
    const ALL: [Feedback; 4] = [
        Feedback::Correct,
        Feedback::Present,
        Feedback::Absent,
        Feedback::Excess,
    ];

    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
            Feedback::Excess => '⬜',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray, e=excess gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' => Some(Feedback::Absent),
            'e' | '3' => Some(Feedback::Excess),
            _ => None,
        }
    }

    fn bits(self) -> u16 {
        match self {
            Feedback::Correct => 0,
            Feedback::Present => 1,
            Feedback::Absent => 2,
            Feedback::Excess => 3,
        }
    }

    fn from_bits(bits: u16) -> Self {
        Self::ALL[(bits & 0b11) as usize]
    }
}

/// The statuses of a whole guess, two bits per position.
///
/// Position 0 occupies the least significant pair. [`Feedback::Correct`] is
/// encoded as `0b00`, so the all-correct pattern is always zero. The word
/// length is part of the value: equal bits of different lengths are different
/// patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedbackPattern {
    bits: u16,
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl FeedbackPattern {
    /// Encodes a status sequence of 1 to [`MAX_WORD_LENGTH`] positions.
    pub fn encode(feedbacks: &[Feedback]) -> Result<Self> {
        if feedbacks.is_empty() {
            return Err(WordleError::EmptyPattern);
        }
        if feedbacks.len() > MAX_WORD_LENGTH {
            return Err(WordleError::WordTooLong {
                length: feedbacks.len(),
            });
        }
        Ok(Self::pack(feedbacks))
    }

    fn pack(feedbacks: &[Feedback]) -> Self {
        let bits = feedbacks
            .iter()
            .enumerate()
            .fold(0u16, |acc, (i, fb)| acc | fb.bits() << (2 * i));
        Self {
            bits,
            len: feedbacks.len() as u8,
        }
    }

    /// The all-correct pattern for words of `len` letters.
    pub fn win(len: usize) -> Self {
        Self {
            bits: 0,
            len: len as u8,
        }
    }

    /// Calculate the feedback pattern for a guess against a secret word.
    ///
    /// Both words must have the same length; [`evaluate`] checks this, this
    /// function only asserts it in debug builds.
    pub fn calculate(guess: &Word, secret: &Word) -> Self {
        let (feedbacks, len) = score(guess, secret);
        Self::pack(&feedbacks[..len])
    }

    /// Convert pattern to the per-position statuses.
    pub fn decode(self) -> Vec<Feedback> {
        (0..self.len())
            .map(|i| Feedback::from_bits(self.bits >> (2 * i)))
            .collect()
    }

    /// Number of positions covered.
    pub fn len(self) -> usize {
        self.len as usize
    }

    /// The raw encoded value, below `4^len`.
    pub fn bits(self) -> u16 {
        self.bits
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self) -> bool {
        self.bits == 0
    }

    /// Number of distinct patterns for words of `len` letters.
    pub fn space(len: usize) -> usize {
        1 << (2 * len)
    }

    /// Parse a pattern from a string like "gybbb" or "21000".
    pub fn parse(s: &str) -> Option<Self> {
        let feedbacks: Option<Vec<_>> = s.chars().map(Feedback::from_char).collect();
        Self::encode(&feedbacks?).ok()
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.decode().into_iter().map(Feedback::to_char).collect()
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

/// One scored guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Response {
    guess: Word,
    pattern: FeedbackPattern,
}

impl Response {
    /// Pairs a guess with feedback obtained elsewhere, e.g. typed in by a
    /// player.
    pub fn new(guess: Word, pattern: FeedbackPattern) -> Result<Self> {
        if guess.len() != pattern.len() {
            return Err(WordleError::LengthMismatch {
                expected: guess.len(),
                found: pattern.len(),
            });
        }
        Ok(Self { guess, pattern })
    }

    pub fn guess(&self) -> &Word {
        &self.guess
    }

    pub fn pattern(&self) -> FeedbackPattern {
        self.pattern
    }

    pub fn feedbacks(&self) -> Vec<Feedback> {
        self.pattern.decode()
    }

    /// Each guessed letter with its status, in position order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Feedback)> + '_ {
        self.guess
            .as_bytes()
            .iter()
            .copied()
            .zip(self.pattern.decode())
    }

    pub fn is_win(&self) -> bool {
        self.pattern.is_win()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.guess.as_str().to_uppercase(), self.pattern)
    }
}

/// Scores `guess` against `secret`.
///
/// Letters in the right place are [`Correct`](Feedback::Correct). The
/// remaining positions are scanned left to right, each claiming one unmatched
/// occurrence of its letter in the secret if one is left
/// ([`Present`](Feedback::Present)). A position that finds none is
/// [`Excess`](Feedback::Excess) if the letter occurs in the secret at all,
/// and [`Absent`](Feedback::Absent) otherwise.
///
/// ```rust
/// # use wordle_bot::{evaluate, Feedback::*, Word};
/// let response = evaluate(&Word::new("beach")?, &Word::new("beech")?)?;
/// assert_eq!(response.feedbacks(), [Correct, Correct, Excess, Correct, Correct]);
/// # Ok::<_, wordle_bot::WordleError>(())
/// ```
pub fn evaluate(secret: &Word, guess: &Word) -> Result<Response> {
    if secret.len() != guess.len() {
        return Err(WordleError::LengthMismatch {
            expected: secret.len(),
            found: guess.len(),
        });
    }
    Ok(Response {
        guess: *guess,
        pattern: FeedbackPattern::calculate(guess, secret),
    })
}

fn score(guess: &Word, secret: &Word) -> ([Feedback; MAX_WORD_LENGTH], usize) {
    let guess = guess.as_bytes();
    let secret = secret.as_bytes();
    debug_assert_eq!(guess.len(), secret.len());

    let mut feedback = [Feedback::Absent; MAX_WORD_LENGTH];
    let original = {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &b in secret {
            counts[letter_index(b)] += 1;
        }
        counts
    };
    let mut available = original;

    for (i, (&g, &s)) in guess.iter().zip(secret).enumerate() {
        if g == s {
            feedback[i] = Feedback::Correct;
            available[letter_index(g)] -= 1;
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if feedback[i] == Feedback::Correct {
            continue;
        }
        let idx = letter_index(g);
        feedback[i] = if available[idx] > 0 {
            available[idx] -= 1;
            Feedback::Present
        } else if original[idx] > 0 {
            Feedback::Excess
        } else {
            Feedback::Absent
        };
    }

    (feedback, guess.len())
}
