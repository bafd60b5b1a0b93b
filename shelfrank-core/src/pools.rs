/// Candidate pair pools for freeform selection.
///
/// Both pools are pure functions of the input list: no side effects, no
/// mutation of the input. The engine memoizes the result keyed by the
/// caller's list version token, so the O(n^2) generation only runs when
/// the working set actually changes.
use crate::types::{Pair, RankedItem};

/// The two candidate pools a freeform draw chooses between.
///
/// `similar` holds every unordered pair whose rating gap is within the
/// configured window; `all` holds every unordered pair regardless of gap.
/// `similar` is always a subset of `all`.
#[derive(Debug, Clone, Default)]
pub struct PairPools {
    pub similar: Vec<Pair>,
    pub all: Vec<Pair>,
}

impl PairPools {
    /// Generate both pools from the eligible working set.
    ///
    /// Pairs are emitted with the earlier list element first (i < j), one
    /// entry per unordered pair. Items without a rating are skipped —
    /// callers normally pre-filter, but a stray backlog item must never
    /// produce a pair. Fewer than two rated items yields empty pools.
    pub fn build(items: &[RankedItem], similar_window: i64) -> Self {
        let mut similar = Vec::new();
        let mut all = Vec::new();

        for i in 0..items.len() {
            let Some(rating_a) = items[i].rating else { continue };
            for item_b in &items[i + 1..] {
                let Some(rating_b) = item_b.rating else { continue };

                let pair = (items[i].id, item_b.id);
                all.push(pair);
                if (rating_a - rating_b).abs() <= similar_window {
                    similar.push(pair);
                }
            }
        }

        PairPools { similar, all }
    }

    /// True when no pair can be drawn at all.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn item(id: i64, rating: Option<i64>) -> RankedItem {
        RankedItem {
            id,
            name: format!("item-{id}"),
            rating,
            status: Status::Ranked,
        }
    }

    fn rating_of(items: &[RankedItem], id: i64) -> i64 {
        items.iter().find(|i| i.id == id).unwrap().rating.unwrap()
    }

    #[test]
    fn test_no_self_pairing() {
        let items: Vec<RankedItem> = (1..=6).map(|id| item(id, Some(1000 + id * 90))).collect();
        let pools = PairPools::build(&items, 200);

        for (a, b) in pools.all.iter().chain(pools.similar.iter()) {
            assert_ne!(a, b, "self-pair ({a}, {b}) generated");
        }
    }

    #[test]
    fn test_all_pairs_count() {
        let items: Vec<RankedItem> = (1..=5).map(|id| item(id, Some(1000))).collect();
        let pools = PairPools::build(&items, 200);

        // C(5, 2) unordered pairs, no repeats
        assert_eq!(pools.all.len(), 10);
        let mut seen = std::collections::HashSet::new();
        for &(a, b) in &pools.all {
            let key = if a < b { (a, b) } else { (b, a) };
            assert!(seen.insert(key), "duplicate pair ({a}, {b})");
        }
    }

    #[test]
    fn test_similar_pool_contained_in_all_pairs_and_within_window() {
        let items = vec![
            item(1, Some(1000)),
            item(2, Some(1150)),
            item(3, Some(1400)),
            item(4, Some(1420)),
        ];
        let pools = PairPools::build(&items, 200);

        for pair in &pools.similar {
            assert!(pools.all.contains(pair), "{pair:?} missing from all-pairs pool");
            let gap = (rating_of(&items, pair.0) - rating_of(&items, pair.1)).abs();
            assert!(gap <= 200, "{pair:?} has gap {gap}");
        }

        // (1,3), (1,4) and (2,3), (2,4) exceed the window
        assert_eq!(pools.all.len(), 6);
        assert_eq!(pools.similar.len(), 2); // (1,2) and (3,4)
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let items = vec![item(1, Some(1000)), item(2, Some(1200))];
        let pools = PairPools::build(&items, 200);
        assert_eq!(pools.similar, vec![(1, 2)]);
    }

    #[test]
    fn test_fewer_than_two_items_yields_empty_pools() {
        assert!(PairPools::build(&[], 200).is_empty());
        assert!(PairPools::build(&[item(1, Some(1000))], 200).is_empty());
    }

    #[test]
    fn test_unrated_items_never_paired() {
        let items = vec![item(1, Some(1000)), item(2, None), item(3, Some(1050))];
        let pools = PairPools::build(&items, 200);
        assert_eq!(pools.all, vec![(1, 3)]);
    }
}
