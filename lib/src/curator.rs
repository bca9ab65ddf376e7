use crate::data::WordBank;
use crate::scoring::WordScores;
use rand::seq::SliceRandom;
use rand::Rng;

/// Selects the working pool the search draws its guesses from.
///
/// The bulk of the pool is the top of the score ranking, kept in rank order
/// so a deterministic prefix of it is itself a "best words" pool. The rest is
/// sampled uniformly without replacement from the remaining dictionary to
/// keep some variety beyond the highest scorers. The full dictionary is still
/// used for candidate filtering; this pool only bounds which words are tried
/// as guesses.
pub fn curate<R: Rng>(
    bank: &WordBank,
    scores: &WordScores,
    pool_size: usize,
    top_fraction: f64,
    rng: &mut R,
) -> Vec<u32> {
    let ranked = scores.ranked_ids();
    if ranked.len() <= pool_size {
        return ranked;
    }
    let top_count = (pool_size as f64 * top_fraction) as usize;
    let top_count = top_count.min(pool_size);
    let mut pool: Vec<u32> = ranked[..top_count].to_vec();
    let tail: Vec<u32> = ranked[top_count..]
        .choose_multiple(rng, pool_size - top_count)
        .copied()
        .collect();
    pool.extend(tail);
    log::debug!(
        "curated pool of {} words ({} by score, {} sampled) from {} total",
        pool.len(),
        top_count,
        pool.len() - top_count,
        bank.len()
    );
    pool
}
