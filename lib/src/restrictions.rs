use crate::data::{count_letters, is_puzzle_word, letter_index, WordBank};
use crate::results::{Color, ColorPattern, GuessRecord, PuzzleError};
use crate::{ALPHABET_LEN, WORD_LEN};

/// Count constraint for one letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LetterRule {
    letter: u8,
    /// Combined green and yellow occurrences of the letter in the guess: the
    /// word must contain at least this many copies.
    required: u8,
    /// A gray occurrence of the letter caps the word at exactly `required`
    /// copies (possibly zero).
    exact: bool,
}

/// The letter restrictions decomposed from one `(guess, pattern)` pair.
///
/// A word satisfies the set iff scoring the guess against that word would
/// reproduce the pattern exactly; [`satisfies`] and the feedback oracle are
/// two definitions of the same predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    /// Required letter at each green position.
    greens: [Option<u8>; WORD_LEN],
    /// Positions the given letter must *not* occupy (every yellow and gray
    /// position of the guess).
    excluded_here: Vec<(u8, u8)>,
    rules: Vec<LetterRule>,
}

impl ConstraintSet {
    /// Decomposes a guess record into positional and count constraints.
    pub fn from_record(record: &GuessRecord) -> Result<ConstraintSet, PuzzleError> {
        if !is_puzzle_word(&record.word) {
            return Err(PuzzleError::MalformedWord(record.word.to_string()));
        }
        let mut bytes = [0u8; WORD_LEN];
        bytes.copy_from_slice(record.word.as_bytes());
        Ok(ConstraintSet::from_parts(&bytes, &record.pattern))
    }

    pub(crate) fn from_parts(guess: &[u8; WORD_LEN], pattern: &ColorPattern) -> ConstraintSet {
        let mut greens = [None; WORD_LEN];
        let mut excluded_here = Vec::new();
        let mut required = [0u8; ALPHABET_LEN];
        let mut capped = [false; ALPHABET_LEN];

        for i in 0..WORD_LEN {
            let byte = guess[i];
            match pattern[i] {
                Color::Green => {
                    greens[i] = Some(byte);
                    required[letter_index(byte)] += 1;
                }
                Color::Yellow => {
                    excluded_here.push((i as u8, byte));
                    required[letter_index(byte)] += 1;
                }
                Color::Gray => {
                    excluded_here.push((i as u8, byte));
                    capped[letter_index(byte)] = true;
                }
            }
        }

        let mut rules = Vec::new();
        let mut seen = [false; ALPHABET_LEN];
        for &byte in guess {
            let letter = letter_index(byte);
            if seen[letter] {
                continue;
            }
            seen[letter] = true;
            if required[letter] > 0 || capped[letter] {
                rules.push(LetterRule {
                    letter: byte,
                    required: required[letter],
                    exact: capped[letter],
                });
            }
        }

        ConstraintSet {
            greens,
            excluded_here,
            rules,
        }
    }

    /// Whether the word with the given bytes and letter counts satisfies
    /// every constraint. Green position checks run first since they are the
    /// cheapest and prune the most.
    pub(crate) fn matches(&self, bytes: &[u8; WORD_LEN], counts: &[u8; ALPHABET_LEN]) -> bool {
        for (i, green) in self.greens.iter().enumerate() {
            if let Some(byte) = green {
                if bytes[i] != *byte {
                    return false;
                }
            }
        }
        for &(position, byte) in &self.excluded_here {
            if bytes[position as usize] == byte {
                return false;
            }
        }
        for rule in &self.rules {
            let have = counts[letter_index(rule.letter)];
            if rule.exact {
                if have != rule.required {
                    return false;
                }
            } else if have < rule.required {
                return false;
            }
        }
        true
    }
}

/// Whether `word` is consistent with the given guess record.
///
/// Equivalent to `feedback(record.word, word) == record.pattern`; malformed
/// input satisfies nothing.
pub fn satisfies(word: &str, record: &GuessRecord) -> bool {
    if !is_puzzle_word(word) {
        return false;
    }
    let constraints = match ConstraintSet::from_record(record) {
        Ok(constraints) => constraints,
        Err(_) => return false,
    };
    let mut bytes = [0u8; WORD_LEN];
    bytes.copy_from_slice(word.as_bytes());
    constraints.matches(&bytes, &count_letters(&bytes))
}

/// Narrows `candidates` to the ids consistent with the constraint set.
pub fn filter_candidates(bank: &WordBank, candidates: &[u32], constraints: &ConstraintSet) -> Vec<u32> {
    candidates
        .iter()
        .copied()
        .filter(|&id| constraints.matches(bank.bytes(id), bank.counts(id)))
        .collect()
}

/// Survivors of the whole record list, starting from the full dictionary.
///
/// Records are applied in order and filtering stops as soon as the candidate
/// set is empty.
pub fn filter_all(bank: &WordBank, records: &[GuessRecord]) -> Result<Vec<u32>, PuzzleError> {
    let mut current = bank.all_ids();
    for record in records {
        if current.is_empty() {
            break;
        }
        let constraints = ConstraintSet::from_record(record)?;
        current = filter_candidates(bank, &current, &constraints);
    }
    Ok(current)
}
