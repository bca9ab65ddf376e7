use crate::data::{count_letters, is_puzzle_word, letter_index};
use crate::{ALPHABET_LEN, WORD_LEN};
use std::fmt;
use std::num::ParseFloatError;
use std::ops::Index;
use std::sync::Arc;
use thiserror::Error;

/// Indicates that something went wrong while loading data or generating a
/// puzzle.
#[derive(Error, Debug)]
pub enum PuzzleError {
    /// An underlying reader failed while loading the dictionary or the
    /// frequency table.
    #[error("failed to read input data")]
    Io(#[from] std::io::Error),
    /// A frequency file entry had a value that was not a non-negative number.
    #[error("malformed frequency value '{0}'")]
    BadFrequency(String, #[source] Option<ParseFloatError>),
    /// The dictionary contained no usable words.
    #[error("dictionary contains no valid words")]
    EmptyDictionary,
    /// A caller-supplied word was not five lowercase ASCII letters.
    #[error("'{0}' is not a five-letter lowercase word")]
    MalformedWord(String),
    /// A caller-supplied answer was not in the dictionary.
    #[error("'{0}' is not in the dictionary")]
    UnknownWord(String),
    /// The answer dropped out of its own candidate set, which means feedback
    /// and filtering disagree somewhere.
    #[error("answer dropped out of its own candidate set")]
    Inconsistent,
}

/// The color assigned to a single guess letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Color {
    /// The letter is in the answer at exactly this position.
    Green,
    /// The letter is in the answer, but at a different position. When a
    /// letter repeats in the guess, at most as many copies are colored
    /// green-or-yellow as the answer contains.
    Yellow,
    /// The letter is not in the answer, or every copy of it in the answer is
    /// already accounted for by a green or yellow.
    Gray,
}

impl Color {
    fn ordinal(self) -> u8 {
        match self {
            Color::Green => 0,
            Color::Yellow => 1,
            Color::Gray => 2,
        }
    }

    fn from_ordinal(ordinal: u8) -> Option<Color> {
        match ordinal {
            0 => Some(Color::Green),
            1 => Some(Color::Yellow),
            2 => Some(Color::Gray),
            _ => None,
        }
    }

    /// Single-letter form used in textual output: `G`, `Y`, or `X`.
    pub fn letter(self) -> char {
        match self {
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Gray => 'X',
        }
    }
}

/// The per-position colors produced by scoring one guess against one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorPattern(pub [Color; WORD_LEN]);

/// Number of distinct color patterns (3^5).
pub const NUM_PATTERNS: usize = 243;

impl ColorPattern {
    /// Counts the green positions.
    pub fn green_count(&self) -> usize {
        self.0.iter().filter(|c| **c == Color::Green).count()
    }

    /// Counts the yellow positions.
    pub fn yellow_count(&self) -> usize {
        self.0.iter().filter(|c| **c == Color::Yellow).count()
    }

    /// Whether every position is green, i.e. the guess was the answer.
    pub fn is_all_green(&self) -> bool {
        self.0.iter().all(|c| *c == Color::Green)
    }

    /// Packs the pattern into a base-3 code in `0..NUM_PATTERNS`, usable as a
    /// compact cache key.
    pub fn to_code(&self) -> u8 {
        let mut code = 0u8;
        for i in (0..WORD_LEN).rev() {
            code = code * 3 + self.0[i].ordinal();
        }
        code
    }

    /// Reverses [`ColorPattern::to_code`].
    pub fn from_code(mut code: u8) -> Option<ColorPattern> {
        let mut colors = [Color::Gray; WORD_LEN];
        for slot in colors.iter_mut() {
            *slot = Color::from_ordinal(code % 3)?;
            code /= 3;
        }
        if code == 0 {
            Some(ColorPattern(colors))
        } else {
            None
        }
    }
}

impl Index<usize> for ColorPattern {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.0[index]
    }
}

impl fmt::Display for ColorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{}", color.letter())?;
        }
        Ok(())
    }
}

/// A guess word together with the pattern it produced against the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessRecord {
    pub word: Arc<str>,
    pub pattern: ColorPattern,
}

impl GuessRecord {
    pub fn new(word: impl Into<Arc<str>>, pattern: ColorPattern) -> GuessRecord {
        GuessRecord {
            word: word.into(),
            pattern,
        }
    }
}

/// Determines the color pattern for `guess` scored against `answer`.
///
/// The two-pass rule handles repeated letters: greens are claimed first and
/// deplete the answer's letter tally, then remaining guess letters turn
/// yellow while the tally lasts and gray afterwards. If the answer contains a
/// letter k times, exactly k copies of it across the guess are colored
/// green-or-yellow.
pub fn feedback(guess: &str, answer: &str) -> Result<ColorPattern, PuzzleError> {
    if !is_puzzle_word(guess) {
        return Err(PuzzleError::MalformedWord(guess.to_string()));
    }
    if !is_puzzle_word(answer) {
        return Err(PuzzleError::MalformedWord(answer.to_string()));
    }
    let mut guess_bytes = [0u8; WORD_LEN];
    guess_bytes.copy_from_slice(guess.as_bytes());
    let mut answer_bytes = [0u8; WORD_LEN];
    answer_bytes.copy_from_slice(answer.as_bytes());
    Ok(feedback_bytes(
        &guess_bytes,
        &answer_bytes,
        count_letters(&answer_bytes),
    ))
}

/// Byte-level feedback used on the hot path; `tally` must be the letter
/// counts of `answer`.
pub(crate) fn feedback_bytes(
    guess: &[u8; WORD_LEN],
    answer: &[u8; WORD_LEN],
    mut tally: [u8; ALPHABET_LEN],
) -> ColorPattern {
    let mut colors = [Color::Gray; WORD_LEN];

    for i in 0..WORD_LEN {
        if guess[i] == answer[i] {
            colors[i] = Color::Green;
            tally[letter_index(guess[i])] -= 1;
        }
    }

    for i in 0..WORD_LEN {
        if colors[i] != Color::Green {
            let remaining = &mut tally[letter_index(guess[i])];
            if *remaining > 0 {
                *remaining -= 1;
                colors[i] = Color::Yellow;
            }
        }
    }

    ColorPattern(colors)
}
