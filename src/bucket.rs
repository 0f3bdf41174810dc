//! Partitioning a word set by the feedback a guess would receive.

use std::collections::HashMap;

use crate::error::{Result, WordleError};
use crate::feedback::FeedbackPattern;
use crate::word::{Word, WordSet};

/// Words grouped by the pattern they would produce as the secret.
pub type BucketMap = HashMap<FeedbackPattern, Vec<Word>>;

/// Groups every word of `words` by the feedback `guess` would receive if that
/// word were the secret.
///
/// Every word lands in exactly one bucket, and the winning bucket can only
/// hold `guess` itself.
pub fn buckets(guess: &Word, words: &WordSet) -> Result<BucketMap> {
    check_length(guess, words)?;
    let mut map = BucketMap::new();
    for secret in words {
        map.entry(FeedbackPattern::calculate(guess, secret))
            .or_default()
            .push(*secret);
    }
    Ok(map)
}

/// Longest word length counted into a dense `4^len` array.
const DENSE_COUNT_MAX_LENGTH: usize = 6;

/// The sizes of the non-empty buckets of [`buckets`], in pattern order.
///
/// This is what the strategies score; no words are copied.
pub fn bucket_sizes(guess: &Word, words: &WordSet) -> Result<Vec<usize>> {
    check_length(guess, words)?;
    if words.word_length() <= DENSE_COUNT_MAX_LENGTH {
        let mut counts = vec![0usize; FeedbackPattern::space(words.word_length())];
        for secret in words {
            counts[FeedbackPattern::calculate(guess, secret).bits() as usize] += 1;
        }
        counts.retain(|&c| c > 0);
        return Ok(counts);
    }

    // The pattern space outgrows the word set; count runs of sorted patterns.
    let mut patterns: Vec<u16> = words
        .iter()
        .map(|secret| FeedbackPattern::calculate(guess, secret).bits())
        .collect();
    patterns.sort_unstable();
    Ok(patterns
        .chunk_by(|a, b| a == b)
        .map(<[u16]>::len)
        .collect())
}

fn check_length(guess: &Word, words: &WordSet) -> Result<()> {
    if guess.len() != words.word_length() {
        return Err(WordleError::LengthMismatch {
            expected: words.word_length(),
            found: guess.len(),
        });
    }
    Ok(())
}
