use crate::curator::curate;
use crate::data::{is_puzzle_word, FrequencyTable, WordBank};
use crate::restrictions::{filter_candidates, ConstraintSet};
use crate::results::{feedback_bytes, ColorPattern, GuessRecord, PuzzleError};
use crate::scoring::{composite_score, FrequencyBoost, LetterStats, ScoreWeights, WordScores};
use crate::PUZZLE_GUESSES;
use log::{debug, trace};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;

/// Tunable knobs of the generator. The defaults mirror the values the search
/// was tuned with; every threshold that shapes the search is exposed here
/// rather than hard-coded.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Size of the curated working pool.
    pub pool_size: usize,
    /// Share of the pool taken from the top of the score ranking; the rest
    /// is sampled from the remaining dictionary.
    pub top_fraction: f64,
    /// Upper bound on search attempts per generated puzzle.
    pub max_attempts: usize,
    /// Pool prefix used during the first, deterministic half of the attempts.
    pub early_pool: usize,
    /// Size of the fresh random pool sampled for each later attempt.
    pub late_pool: usize,
    /// Candidate-set size below which the pool is narrowed to survivors.
    pub narrow_below: usize,
    /// High-score words appended to a narrowed pool.
    pub narrow_fillers: usize,
    /// Minimum fractional candidate reduction a non-opening guess must
    /// achieve to stay eligible.
    pub min_info_gain: f64,
    /// Maximum letters an early guess may share with the letters already
    /// played.
    pub max_overlap: u32,
    /// Quantile of positive word frequencies that bounds the answer pool.
    pub answer_percentile: f64,
    /// Frequency threshold used when no word has positive frequency.
    pub answer_floor: f64,
    pub weights: ScoreWeights,
    pub boost: FrequencyBoost,
}

impl Default for GeneratorConfig {
    fn default() -> GeneratorConfig {
        GeneratorConfig {
            pool_size: 2000,
            top_fraction: 0.7,
            max_attempts: 500,
            early_pool: 300,
            late_pool: 400,
            narrow_below: 10,
            narrow_fillers: 50,
            min_info_gain: 0.1,
            max_overlap: 3,
            answer_percentile: 0.2,
            answer_floor: 0.1,
            weights: ScoreWeights::default(),
            boost: FrequencyBoost::default(),
        }
    }
}

/// Whether the guesses pin the answer down uniquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PuzzleStatus {
    /// Exactly one dictionary word (the answer) survives all four guesses.
    Optimal,
    /// More than one word survives; the puzzle is playable but ambiguous.
    Ambiguous,
}

/// A generated puzzle: the secret answer and the guesses shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    pub answer: Arc<str>,
    /// Guesses in selection order, normally [`PUZZLE_GUESSES`] of them.
    pub guesses: Vec<GuessRecord>,
    /// Dictionary words consistent with every guess; 1 means optimal.
    pub remaining_candidates: usize,
    pub status: PuzzleStatus,
}

/// One completed or abandoned search attempt.
struct Attempt {
    records: Vec<(u32, ColorPattern)>,
    remaining: usize,
}

/// Generates puzzles from a dictionary and a word-frequency table.
///
/// The dictionary, letter statistics, scores, and curated pool are fixed at
/// construction; each [`Generator::generate`] call only mutates the owned RNG
/// and its per-call search state, so independent generators can run on
/// separate threads while sharing nothing.
pub struct Generator {
    bank: WordBank,
    stats: LetterStats,
    scores: WordScores,
    curated: Vec<u32>,
    answer_pool: Vec<u32>,
    answer_sampler: Option<WeightedIndex<f64>>,
    config: GeneratorConfig,
    rng: StdRng,
}

impl Generator {
    /// Creates a generator with an unpredictable RNG seed.
    pub fn new(
        bank: WordBank,
        frequencies: FrequencyTable,
        config: GeneratorConfig,
    ) -> Result<Generator, PuzzleError> {
        Generator::from_rng(bank, frequencies, config, StdRng::from_entropy())
    }

    /// Creates a generator whose curation, answer choice, and search are
    /// fully reproducible from the seed.
    pub fn with_seed(
        bank: WordBank,
        frequencies: FrequencyTable,
        config: GeneratorConfig,
        seed: u64,
    ) -> Result<Generator, PuzzleError> {
        Generator::from_rng(bank, frequencies, config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(
        bank: WordBank,
        frequencies: FrequencyTable,
        config: GeneratorConfig,
        mut rng: StdRng,
    ) -> Result<Generator, PuzzleError> {
        if bank.is_empty() {
            return Err(PuzzleError::EmptyDictionary);
        }
        let stats = LetterStats::from_bank(&bank);
        let scores = WordScores::compute(&bank, &stats, &frequencies, &config.boost);
        let curated = curate(&bank, &scores, config.pool_size, config.top_fraction, &mut rng);
        let (answer_pool, answer_weights) = build_answer_pool(&bank, &frequencies, &config);
        let answer_sampler = WeightedIndex::new(&answer_weights).ok();
        debug!(
            "generator ready: {} words, {} in answer pool, frequency data for {}",
            bank.len(),
            answer_pool.len(),
            frequencies.len()
        );
        Ok(Generator {
            bank,
            stats,
            scores,
            curated,
            answer_pool,
            answer_sampler,
            config,
            rng,
        })
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    /// Letter statistics derived from the dictionary at construction.
    pub fn letter_stats(&self) -> &LetterStats {
        &self.stats
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Whether the word may be guessed, i.e. is in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.bank.contains(word)
    }

    /// Colors `guess` against `answer`; both must be well-formed words.
    pub fn feedback(&self, guess: &str, answer: &str) -> Result<ColorPattern, PuzzleError> {
        crate::results::feedback(guess, answer)
    }

    /// The dictionary words consistent with every record, in lexicographic
    /// order for stable display.
    pub fn filter_dictionary(&self, records: &[GuessRecord]) -> Result<Vec<Arc<str>>, PuzzleError> {
        let ids = crate::restrictions::filter_all(&self.bank, records)?;
        let mut words: Vec<Arc<str>> = ids.iter().map(|&id| Arc::clone(self.bank.word(id))).collect();
        words.sort();
        Ok(words)
    }

    /// Generates a puzzle for the given answer, or for a frequency-weighted
    /// random answer when none is supplied.
    ///
    /// Runs up to `max_attempts` randomized greedy attempts and returns the
    /// first one whose guesses leave a single candidate. If none does, the
    /// best attempt seen is returned with `status` set to
    /// [`PuzzleStatus::Ambiguous`]; the search itself never fails once the
    /// inputs validate.
    pub fn generate(&mut self, answer: Option<&str>) -> Result<Puzzle, PuzzleError> {
        let answer_id = match answer {
            Some(word) => {
                if !is_puzzle_word(word) {
                    return Err(PuzzleError::MalformedWord(word.to_string()));
                }
                self.bank
                    .id_of(word)
                    .ok_or_else(|| PuzzleError::UnknownWord(word.to_string()))?
            }
            None => self.sample_answer(),
        };

        let max_attempts = self.config.max_attempts.max(1);
        let all_ids = self.bank.all_ids();
        let mut memo: HashMap<[u32; PUZZLE_GUESSES], usize> = HashMap::new();
        let mut best: Option<Attempt> = None;
        let mut last_partial: Option<Attempt> = None;

        for attempt in 0..max_attempts {
            let pool: Vec<u32> = if attempt < max_attempts / 2 {
                let take = self.config.early_pool.min(self.curated.len());
                self.curated[..take].to_vec()
            } else {
                let take = self.config.late_pool.min(all_ids.len());
                all_ids
                    .choose_multiple(&mut self.rng, take)
                    .copied()
                    .collect()
            };

            let outcome = self.run_attempt(answer_id, &pool, &all_ids, &mut memo)?;
            if outcome.records.len() == PUZZLE_GUESSES {
                if outcome.remaining == 1 {
                    debug!(
                        "attempt {} solved '{}' uniquely",
                        attempt + 1,
                        self.bank.word(answer_id)
                    );
                    return Ok(self.finish(answer_id, outcome));
                }
                if best
                    .as_ref()
                    .map_or(true, |current| outcome.remaining < current.remaining)
                {
                    trace!(
                        "attempt {} leaves {} candidates, new best",
                        attempt + 1,
                        outcome.remaining
                    );
                    best = Some(outcome);
                }
            } else {
                last_partial = Some(outcome);
            }
        }

        let fallback = best
            .or(last_partial)
            .ok_or(PuzzleError::Inconsistent)?;
        debug!(
            "no unique puzzle for '{}' after {} attempts; best leaves {} candidates",
            self.bank.word(answer_id),
            max_attempts,
            fallback.remaining
        );
        Ok(self.finish(answer_id, fallback))
    }

    /// Runs one greedy attempt: pick up to four guesses from the pool, each
    /// maximizing the composite score against the current candidate set.
    fn run_attempt(
        &self,
        answer_id: u32,
        pool: &[u32],
        all_ids: &[u32],
        memo: &mut HashMap<[u32; PUZZLE_GUESSES], usize>,
    ) -> Result<Attempt, PuzzleError> {
        let answer_bytes = *self.bank.bytes(answer_id);
        let answer_counts = *self.bank.counts(answer_id);

        let mut records: Vec<(u32, ColorPattern)> = Vec::with_capacity(PUZZLE_GUESSES);
        let mut chosen: Vec<u32> = Vec::with_capacity(PUZZLE_GUESSES);
        let mut used_letters = 0u32;
        let mut current: Vec<u32> = all_ids.to_vec();

        for guess_num in 0..PUZZLE_GUESSES {
            let narrowed;
            let round_pool: &[u32] = if current.len() < self.config.narrow_below {
                narrowed = self.narrow_pool(pool, &current, answer_id, &chosen);
                &narrowed
            } else {
                pool
            };

            let mut best_pick: Option<(u32, ColorPattern, ConstraintSet, usize, f64)> = None;
            for &candidate in round_pool {
                if candidate == answer_id || chosen.contains(&candidate) {
                    continue;
                }
                let overlap = (self.bank.mask(candidate) & used_letters).count_ones();
                // Early guesses should explore the alphabet; inert on the
                // opening guess since no letters have been played yet.
                if guess_num < 2 && overlap > self.config.max_overlap {
                    continue;
                }

                let pattern = feedback_bytes(self.bank.bytes(candidate), &answer_bytes, answer_counts);
                let constraints = ConstraintSet::from_parts(self.bank.bytes(candidate), &pattern);
                let key = memo_key(&chosen, candidate);
                let remaining = *memo
                    .entry(key)
                    .or_insert_with(|| filter_candidates(&self.bank, &current, &constraints).len());
                if remaining == 0 {
                    // The answer survives its own feedback, so this cannot
                    // happen; skip rather than trust a broken count.
                    continue;
                }
                // Later guesses must keep narrowing the field, unless it is
                // already down to the answer and the remaining slots just
                // need filling.
                if guess_num > 0 && current.len() > 1 {
                    let gain = (current.len() - remaining) as f64 / current.len() as f64;
                    if gain < self.config.min_info_gain {
                        continue;
                    }
                }

                let info_gain = current.len() - remaining;
                let score = composite_score(
                    &self.config.weights,
                    info_gain,
                    &pattern,
                    self.scores.get(candidate),
                    overlap,
                );
                let replace = match &best_pick {
                    None => true,
                    Some((_, _, _, best_remaining, best_score)) => {
                        score > *best_score
                            || (score == *best_score && remaining < *best_remaining)
                    }
                };
                if replace {
                    best_pick = Some((candidate, pattern, constraints, remaining, score));
                }
            }

            let Some((guess, pattern, constraints, _, _)) = best_pick else {
                // Nothing eligible; give up on this attempt.
                break;
            };
            chosen.push(guess);
            used_letters |= self.bank.mask(guess);
            current = filter_candidates(&self.bank, &current, &constraints);
            if !current.contains(&answer_id) {
                return Err(PuzzleError::Inconsistent);
            }
            records.push((guess, pattern));
        }

        Ok(Attempt {
            records,
            remaining: current.len(),
        })
    }

    /// Shrinks the pool once few candidates remain: surviving pool words
    /// first, then high-score fillers, never the answer itself.
    fn narrow_pool(
        &self,
        pool: &[u32],
        current: &[u32],
        answer_id: u32,
        chosen: &[u32],
    ) -> Vec<u32> {
        let mut narrowed: Vec<u32> = pool
            .iter()
            .copied()
            .filter(|id| *id != answer_id && current.contains(id))
            .collect();
        for &id in &self.curated {
            if narrowed.len() >= self.config.narrow_fillers {
                break;
            }
            if id == answer_id || chosen.contains(&id) || narrowed.contains(&id) {
                continue;
            }
            narrowed.push(id);
        }
        narrowed
    }

    /// Picks an answer weighted towards common words.
    fn sample_answer(&mut self) -> u32 {
        let index = match &self.answer_sampler {
            Some(sampler) => sampler.sample(&mut self.rng),
            None => self.rng.gen_range(0..self.answer_pool.len()),
        };
        self.answer_pool[index]
    }

    fn finish(&self, answer_id: u32, attempt: Attempt) -> Puzzle {
        let status = if attempt.remaining == 1 {
            PuzzleStatus::Optimal
        } else {
            PuzzleStatus::Ambiguous
        };
        Puzzle {
            answer: Arc::clone(self.bank.word(answer_id)),
            guesses: attempt
                .records
                .into_iter()
                .map(|(id, pattern)| GuessRecord {
                    word: Arc::clone(self.bank.word(id)),
                    pattern,
                })
                .collect(),
            remaining_candidates: attempt.remaining,
            status,
        }
    }
}

/// The pool answers are drawn from, with per-word weights.
///
/// Words at or above the frequency threshold qualify; the threshold is the
/// configured quantile of the positive frequencies, so rare words are kept
/// out of the answer slot whenever the frequency data can tell them apart.
/// With no usable data the whole dictionary qualifies.
fn build_answer_pool(
    bank: &WordBank,
    frequencies: &FrequencyTable,
    config: &GeneratorConfig,
) -> (Vec<u32>, Vec<f64>) {
    let mut positive: Vec<f64> = bank
        .iter()
        .map(|word| frequencies.get(word))
        .filter(|frequency| *frequency > 0.0)
        .collect();
    let threshold = if positive.is_empty() {
        config.answer_floor
    } else {
        positive.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let index = ((positive.len() as f64 * config.answer_percentile) as usize)
            .min(positive.len() - 1);
        positive[index]
    };

    let mut pool: Vec<u32> = (0..bank.len() as u32)
        .filter(|&id| frequencies.get(bank.word(id)) >= threshold)
        .collect();
    if pool.is_empty() {
        pool = bank.all_ids();
    }
    let weights: Vec<f64> = pool
        .iter()
        .map(|&id| frequencies.get(bank.word(id)) + 1.0)
        .collect();
    (pool, weights)
}

fn memo_key(chosen: &[u32], candidate: u32) -> [u32; PUZZLE_GUESSES] {
    let mut key = [u32::MAX; PUZZLE_GUESSES];
    key[..chosen.len()].copy_from_slice(chosen);
    key[chosen.len()] = candidate;
    key.sort_unstable();
    key
}
