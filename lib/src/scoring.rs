use crate::data::{letter_index, FrequencyTable, WordBank};
use crate::results::ColorPattern;
use crate::{ALPHABET_LEN, WORD_LEN};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Letter frequencies derived from the dictionary once at startup.
#[derive(Debug, Clone)]
pub struct LetterStats {
    /// Fraction of words containing each letter at least once.
    letter_freq: [f64; ALPHABET_LEN],
    /// Fraction of words with each letter at each position.
    position_freq: [[f64; ALPHABET_LEN]; WORD_LEN],
}

impl LetterStats {
    pub fn from_bank(bank: &WordBank) -> LetterStats {
        let mut letter_counts = [0u32; ALPHABET_LEN];
        let mut position_counts = [[0u32; ALPHABET_LEN]; WORD_LEN];
        for id in 0..bank.len() as u32 {
            let bytes = bank.bytes(id);
            let mut seen = [false; ALPHABET_LEN];
            for (position, &byte) in bytes.iter().enumerate() {
                let letter = letter_index(byte);
                position_counts[position][letter] += 1;
                if !seen[letter] {
                    seen[letter] = true;
                    letter_counts[letter] += 1;
                }
            }
        }
        let total = bank.len().max(1) as f64;
        let mut letter_freq = [0.0; ALPHABET_LEN];
        let mut position_freq = [[0.0; ALPHABET_LEN]; WORD_LEN];
        for letter in 0..ALPHABET_LEN {
            letter_freq[letter] = letter_counts[letter] as f64 / total;
            for position in 0..WORD_LEN {
                position_freq[position][letter] =
                    position_counts[position][letter] as f64 / total;
            }
        }
        LetterStats {
            letter_freq,
            position_freq,
        }
    }

    /// Fraction of words containing the letter.
    pub fn letter(&self, byte: u8) -> f64 {
        self.letter_freq[letter_index(byte)]
    }

    /// Fraction of words with the letter at the given position.
    pub fn at(&self, byte: u8, position: usize) -> f64 {
        self.position_freq[position][letter_index(byte)]
    }

    /// Frequency-based score of a word before any word-frequency boost.
    ///
    /// Position matches are weighted double, and each distinct letter
    /// contributes its overall frequency once, so repeated letters are not
    /// double-credited.
    pub fn base_score(&self, bytes: &[u8; WORD_LEN]) -> f64 {
        let mut score = 0.0;
        let mut seen = 0u32;
        for (position, &byte) in bytes.iter().enumerate() {
            let letter = letter_index(byte);
            score += 2.0 * self.position_freq[position][letter];
            let bit = 1u32 << letter;
            if seen & bit == 0 {
                seen |= bit;
                score += self.letter_freq[letter];
            }
        }
        score
    }
}

/// How external word-frequency data amplifies a word's base score.
///
/// The boost factor is `1 + beta * min(frequency / divisor, cap)`, so a word
/// absent from the table keeps its base score and extremely common words
/// cannot dominate the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyBoost {
    pub beta: f64,
    pub divisor: f64,
    pub cap: f64,
}

impl Default for FrequencyBoost {
    fn default() -> FrequencyBoost {
        FrequencyBoost {
            beta: 0.5,
            divisor: 100.0,
            cap: 10.0,
        }
    }
}

impl FrequencyBoost {
    pub fn apply(&self, base: f64, frequency: f64) -> f64 {
        base * (1.0 + self.beta * (frequency / self.divisor).min(self.cap))
    }
}

/// Precomputed per-word scores over the whole dictionary.
#[derive(Debug, Clone)]
pub struct WordScores {
    scores: Vec<f64>,
}

impl WordScores {
    pub fn compute(
        bank: &WordBank,
        stats: &LetterStats,
        frequencies: &FrequencyTable,
        boost: &FrequencyBoost,
    ) -> WordScores {
        let scores = (0..bank.len() as u32)
            .into_par_iter()
            .map(|id| boost.apply(stats.base_score(bank.bytes(id)), frequencies.get(bank.word(id))))
            .collect();
        WordScores { scores }
    }

    pub fn get(&self, id: u32) -> f64 {
        self.scores[id as usize]
    }

    /// Every id ordered by descending score; ties break towards the earlier
    /// dictionary word so the ranking is deterministic.
    pub fn ranked_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = (0..self.scores.len() as u32).collect();
        ids.sort_by(|a, b| {
            self.scores[*b as usize]
                .partial_cmp(&self.scores[*a as usize])
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(b))
        });
        ids
    }
}

/// Weights of the terms in the per-guess composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Per eliminated candidate.
    pub info_gain: f64,
    /// Per green position in the guess's pattern.
    pub green: f64,
    /// Per yellow position in the guess's pattern.
    pub yellow: f64,
    /// Multiplier on the word's precomputed score.
    pub frequency: f64,
    /// Per letter shared with previously chosen guesses.
    pub diversity: f64,
}

impl Default for ScoreWeights {
    fn default() -> ScoreWeights {
        ScoreWeights {
            info_gain: 20.0,
            green: 5.0,
            yellow: 2.0,
            frequency: 100.0,
            diversity: 20.0,
        }
    }
}

/// Scores one candidate guess given how it would narrow the candidate set.
///
/// Rewards eliminating candidates and producing informative (green and
/// yellow) constraints, boosts commonly scoring words, and penalizes letter
/// overlap with guesses already chosen this attempt.
pub fn composite_score(
    weights: &ScoreWeights,
    info_gain: usize,
    pattern: &ColorPattern,
    word_score: f64,
    overlap: u32,
) -> f64 {
    weights.info_gain * info_gain as f64
        + weights.green * pattern.green_count() as f64
        + weights.yellow * pattern.yellow_count() as f64
        + weights.frequency * word_score
        - weights.diversity * overlap as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boost_caps_extreme_frequencies() {
        let boost = FrequencyBoost::default();
        assert_eq!(boost.apply(1.0, 0.0), 1.0);
        assert!(boost.apply(1.0, 50.0) < boost.apply(1.0, 100.0));
        // Beyond the cap the factor stops growing.
        assert_eq!(boost.apply(1.0, 1_000.0), boost.apply(1.0, 1_000_000.0));
    }

    #[test]
    fn repeated_letters_credit_overall_frequency_once() {
        let bank = WordBank::from_iterator(vec!["llama"]);
        let stats = LetterStats::from_bank(&bank);
        // Position sum: every position matches itself, so 2.0 each; unique
        // letters l, a, m contribute 1.0 each.
        let score = stats.base_score(&[b'l', b'l', b'a', b'm', b'a']);
        assert!((score - 13.0).abs() < 1e-9);
    }
}
