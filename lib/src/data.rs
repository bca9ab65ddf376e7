use crate::results::PuzzleError;
use crate::{ALPHABET_LEN, WORD_LEN};
use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;

/// Returns `true` iff `word` is exactly five lowercase ASCII letters.
pub fn is_puzzle_word(word: &str) -> bool {
    word.len() == WORD_LEN && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// Index of a lowercase ASCII letter within the alphabet (`a` = 0).
pub(crate) fn letter_index(byte: u8) -> usize {
    (byte - b'a') as usize
}

/// Number of times each letter occurs in the word.
pub(crate) fn count_letters(bytes: &[u8; WORD_LEN]) -> [u8; ALPHABET_LEN] {
    let mut counts = [0u8; ALPHABET_LEN];
    for &b in bytes {
        counts[letter_index(b)] += 1;
    }
    counts
}

/// Bitmask over the alphabet of the letters occurring in the word.
pub(crate) fn letter_mask(bytes: &[u8; WORD_LEN]) -> u32 {
    let mut mask = 0u32;
    for &b in bytes {
        mask |= 1 << letter_index(b);
    }
    mask
}

/// The dictionary: every word a puzzle may use, in load order.
///
/// Words are stored once as shared strings, and each word's bytes, per-letter
/// counts, and letter bitmask are precomputed so the filter can run multiset
/// checks without touching the string data. Load order is preserved and words
/// are addressed by dense `u32` ids.
pub struct WordBank {
    words: Vec<Arc<str>>,
    bytes: Vec<[u8; WORD_LEN]>,
    counts: Vec<[u8; ALPHABET_LEN]>,
    masks: Vec<u32>,
    ids: HashMap<Arc<str>, u32>,
}

impl WordBank {
    /// Reads one word per line, lower-casing each line and silently skipping
    /// any line that is not exactly five ASCII letters.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Result<WordBank, PuzzleError> {
        let words = reader
            .lines()
            .collect::<Result<Vec<String>, _>>()?
            .into_iter()
            .map(|line| line.trim().to_lowercase());
        Ok(WordBank::from_iterator(words))
    }

    /// Builds a bank from the given words, skipping malformed entries and
    /// duplicates while preserving first-occurrence order.
    pub fn from_iterator<S, I>(words: I) -> WordBank
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut bank = WordBank {
            words: Vec::new(),
            bytes: Vec::new(),
            counts: Vec::new(),
            masks: Vec::new(),
            ids: HashMap::new(),
        };
        for word in words {
            let word = word.as_ref();
            if !is_puzzle_word(word) || bank.ids.contains_key(word) {
                continue;
            }
            let shared: Arc<str> = Arc::from(word);
            let mut bytes = [0u8; WORD_LEN];
            bytes.copy_from_slice(word.as_bytes());
            bank.ids.insert(Arc::clone(&shared), bank.words.len() as u32);
            bank.words.push(shared);
            bank.counts.push(count_letters(&bytes));
            bank.masks.push(letter_mask(&bytes));
            bank.bytes.push(bytes);
        }
        bank
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word with the given id.
    pub fn word(&self, id: u32) -> &Arc<str> {
        &self.words[id as usize]
    }

    /// The id of the given word, if it is in the bank.
    pub fn id_of(&self, word: &str) -> Option<u32> {
        self.ids.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.ids.contains_key(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
        self.words.iter()
    }

    /// Every id, in load order.
    pub fn all_ids(&self) -> Vec<u32> {
        (0..self.words.len() as u32).collect()
    }

    pub(crate) fn bytes(&self, id: u32) -> &[u8; WORD_LEN] {
        &self.bytes[id as usize]
    }

    pub(crate) fn counts(&self, id: u32) -> &[u8; ALPHABET_LEN] {
        &self.counts[id as usize]
    }

    pub(crate) fn mask(&self, id: u32) -> u32 {
        self.masks[id as usize]
    }
}

/// External word-frequency data: how common each word is in running text.
///
/// Words that never appear map to 0. An empty table is valid and turns every
/// frequency-derived weight into its neutral value.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    by_word: HashMap<Arc<str>, f64>,
}

impl FrequencyTable {
    /// Reads whitespace-separated `word frequency` pairs, one per line.
    ///
    /// Entries whose word is not a five-letter lowercase word are ignored; a
    /// malformed or negative frequency is an error.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Result<FrequencyTable, PuzzleError> {
        let mut by_word = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let (word, value) = match (parts.next(), parts.next()) {
                (Some(word), Some(value)) => (word, value),
                _ => continue,
            };
            if !is_puzzle_word(word) {
                continue;
            }
            let frequency = value
                .parse::<f64>()
                .map_err(|err| PuzzleError::BadFrequency(value.to_string(), Some(err)))?;
            if !frequency.is_finite() || frequency < 0.0 {
                return Err(PuzzleError::BadFrequency(value.to_string(), None));
            }
            by_word.insert(Arc::from(word), frequency);
        }
        Ok(FrequencyTable { by_word })
    }

    /// Builds a table directly from `(word, frequency)` pairs, skipping
    /// malformed words.
    pub fn from_pairs<S, I>(pairs: I) -> FrequencyTable
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, f64)>,
    {
        FrequencyTable {
            by_word: pairs
                .into_iter()
                .filter(|(word, _)| is_puzzle_word(word.as_ref()))
                .map(|(word, frequency)| (Arc::from(word.as_ref()), frequency.max(0.0)))
                .collect(),
        }
    }

    /// The frequency of the given word, or 0 if the word is unknown.
    pub fn get(&self, word: &str) -> f64 {
        self.by_word.get(word).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.by_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_word.is_empty()
    }
}
