//! Words and dictionaries.
//!
//! A [`Word`] is a short, case-normalized run of ASCII letters stored inline so
//! it can be copied freely through the search loops. A [`WordSet`] is the
//! dictionary the engine works over: sorted, de-duplicated and uniform in
//! length.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, WordleError};
use crate::{ALPHABET_SIZE, MAX_WORD_LENGTH};

/// Index of a lower-case ASCII letter in `0..26`.
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

/// An immutable word of 1 to [`MAX_WORD_LENGTH`] lower-case ASCII letters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word {
    letters: [u8; MAX_WORD_LENGTH],
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl Word {
    /// Creates a word, lower-casing it.
    ///
    /// Fails if the input is empty, contains anything other than ASCII
    /// letters, or is longer than [`MAX_WORD_LENGTH`].
    ///
    /// ```rust
    /// # use wordle_bot::Word;
    /// let word = Word::new("Crane")?;
    /// assert_eq!(word.as_str(), "crane");
    /// assert!(Word::new("abcdefghi").is_err());
    /// # Ok::<_, wordle_bot::WordleError>(())
    /// ```
    pub fn new(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(WordleError::EmptyWord);
        }
        if let Some(letter) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(WordleError::InvalidLetter {
                word: text.to_string(),
                letter,
            });
        }
        if text.len() > MAX_WORD_LENGTH {
            return Err(WordleError::WordTooLong { length: text.len() });
        }

        let mut letters = [0u8; MAX_WORD_LENGTH];
        for (slot, byte) in letters.iter_mut().zip(text.bytes()) {
            *slot = byte.to_ascii_lowercase();
        }
        Ok(Self {
            letters,
            len: text.len() as u8,
        })
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.letters[..self.len()]
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// The letter at `position`, if the word is long enough.
    pub fn letter(&self, position: usize) -> Option<char> {
        self.as_bytes().get(position).map(|&b| b as char)
    }

    /// Occurrences of each letter, indexed `a = 0` through `z = 25`.
    pub fn letter_counts(&self) -> [u8; ALPHABET_SIZE] {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &b in self.as_bytes() {
            counts[letter_index(b)] += 1;
        }
        counts
    }
}

impl FromStr for Word {
    type Err = WordleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Word {
    type Error = WordleError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.as_str())
    }
}

/// Positions of words by `(position, letter)`.
type PositionIndex = Vec<[Vec<u32>; ALPHABET_SIZE]>;

/// A dictionary of distinct words that all share one length.
///
/// Filtering never mutates a set; it produces a new one. A set produced by
/// filtering may be empty but still knows its word length.
#[derive(Clone)]
pub struct WordSet {
    word_length: usize,
    words: Vec<Word>,
    index: OnceLock<PositionIndex>,
}

impl WordSet {
    /// Builds a dictionary from `words`, sorting and removing duplicates.
    ///
    /// Fails if no words are given or if their lengths differ.
    pub fn new(words: impl IntoIterator<Item = Word>) -> Result<Self> {
        let mut words: Vec<Word> = words.into_iter().collect();
        let word_length = words.first().ok_or(WordleError::EmptyDictionary)?.len();
        if let Some(odd) = words.iter().find(|w| w.len() != word_length) {
            return Err(WordleError::LengthMismatch {
                expected: word_length,
                found: odd.len(),
            });
        }
        words.sort_unstable();
        words.dedup();
        Ok(Self::from_sorted(word_length, words))
    }

    /// Parses a newline-separated word list. Blank lines and lines starting
    /// with `#` are skipped.
    pub fn parse(data: &str) -> Result<Self> {
        let words = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Word::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(words)
    }

    /// Reads a word list from a file, see [`WordSet::parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    /// `words` must already be sorted, unique and `word_length` long.
    pub(crate) fn from_sorted(word_length: usize, words: Vec<Word>) -> Self {
        debug_assert!(words.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(words.iter().all(|w| w.len() == word_length));
        Self {
            word_length,
            words,
            index: OnceLock::new(),
        }
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words in lexicographic order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.binary_search(word).is_ok()
    }

    /// A uniformly random member, or `None` if the set is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Word> {
        self.words.choose(rng)
    }

    /// The words with `letter` at `position`, in lexicographic order.
    ///
    /// The lookup table is built on first use.
    pub fn with_letter_at(&self, position: usize, letter: char) -> impl Iterator<Item = &Word> {
        let letter = letter.to_ascii_lowercase();
        let hits: &[u32] = if position < self.word_length && letter.is_ascii_lowercase() {
            &self.index()[position][letter_index(letter as u8)]
        } else {
            &[]
        };
        hits.iter().map(move |&i| &self.words[i as usize])
    }

    fn index(&self) -> &PositionIndex {
        self.index.get_or_init(|| {
            let mut index: PositionIndex = (0..self.word_length)
                .map(|_| std::array::from_fn(|_| Vec::new()))
                .collect();
            for (i, word) in self.words.iter().enumerate() {
                for (position, &b) in word.as_bytes().iter().enumerate() {
                    index[position][letter_index(b)].push(i as u32);
                }
            }
            index
        })
    }
}

impl PartialEq for WordSet {
    fn eq(&self, other: &Self) -> bool {
        self.word_length == other.word_length && self.words == other.words
    }
}

impl Eq for WordSet {}

impl fmt::Debug for WordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordSet")
            .field("word_length", &self.word_length)
            .field("len", &self.words.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a WordSet {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
