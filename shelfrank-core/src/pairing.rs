/// Pair construction: calibration queues and freeform draws.
///
/// Public functions accept item slices / `PairPools` and return `Pair`
/// (i64, i64). Randomized functions take `&mut impl Rng` so callers can
/// seed them; the engine's public entry points supply a thread RNG.
use rand::Rng;

use crate::pools::PairPools;
use crate::types::{Pair, RankedItem};

/// Which pool a freeform draw came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    Similar,
    AllPairs,
}

/// Build the calibration queue for an item newly promoted into the
/// ranked set.
///
/// The queue brackets the new item against existing items at the median
/// and the 25th/75th percentiles of the rating order, giving broad
/// coverage of the spectrum in at most three comparisons. The "other
/// items" list is sorted by rating ascending here rather than trusting
/// the caller's ordering — percentile sampling is meaningless otherwise.
///
/// Returns an empty queue (no-op) when the new item is absent from the
/// list or carries no rating — the caller typically has not refreshed
/// its list yet after an insert — or when no other rated items exist.
pub fn build_calibration_queue(new_item_id: i64, items: &[RankedItem]) -> Vec<Pair> {
    let new_item_present = items
        .iter()
        .any(|i| i.id == new_item_id && i.rating.is_some());
    if !new_item_present {
        return Vec::new();
    }

    let mut others: Vec<&RankedItem> = items
        .iter()
        .filter(|i| i.id != new_item_id && i.rating.is_some())
        .collect();
    if others.is_empty() {
        return Vec::new();
    }
    others.sort_by_key(|i| i.rating);

    let len = others.len();
    let candidates = [len / 2, len / 4, (len * 3) / 4];

    // Short lists collapse several percentiles onto the same index;
    // keep first-seen order when deduplicating.
    let mut queue = Vec::with_capacity(candidates.len());
    let mut used = Vec::with_capacity(candidates.len());
    for idx in candidates {
        if idx >= len || used.contains(&idx) {
            continue;
        }
        used.push(idx);
        queue.push((new_item_id, others[idx].id));
    }

    queue
}

/// Draw one freeform pair from the candidate pools.
///
/// Exactly one pool draw happens per call: with probability
/// `similar_bias` the similar-rating pool is sampled uniformly (when
/// non-empty), otherwise the all-pairs pool. The chosen pair's left/right
/// presentation order is then randomized 50/50. Returns `None` only when
/// both pools are empty.
pub fn draw_freeform(
    pools: &PairPools,
    similar_bias: f64,
    rng: &mut impl Rng,
) -> Option<(Pair, DrawSource)> {
    let (pool, source) = if !pools.similar.is_empty() && rng.random::<f64>() < similar_bias {
        (&pools.similar, DrawSource::Similar)
    } else if !pools.all.is_empty() {
        (&pools.all, DrawSource::AllPairs)
    } else {
        return None;
    };

    let (a, b) = pool[rng.random_range(0..pool.len())];
    let pair = if rng.random::<f64>() < 0.5 { (a, b) } else { (b, a) };
    Some((pair, source))
}
