/// Selection engine orchestrator.
///
/// Owns the calibration queue and the memoized candidate pools, and
/// tracks the single source of truth for "what pair is shown now" as one
/// explicit mode value with explicit transitions. The queue is fully
/// owned by the engine instance — no external aliasing.
use std::collections::VecDeque;

use rand::Rng;

use crate::constants::{DEFAULT_SIMILAR_BIAS, DEFAULT_SIMILAR_WINDOW};
use crate::pairing::{build_calibration_queue, draw_freeform};
use crate::pools::PairPools;
use crate::types::{Pair, RankedItem};

/// Tunable selection parameters.
///
/// The similarity window and pool bias have no derived "correct" values;
/// they are tuning choices, so they live here rather than as literals.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionConfig {
    /// Max rating gap for the similar-rating pool.
    pub similar_window: i64,
    /// Probability a freeform draw uses the similar pool.
    pub similar_bias: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            similar_window: DEFAULT_SIMILAR_WINDOW,
            similar_bias: DEFAULT_SIMILAR_BIAS,
        }
    }
}

/// Where the next pair comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// A calibration queue is being consumed.
    Calibrating,
    /// Pairs are drawn from the weighted pools.
    Freeform,
    /// Fewer than two eligible items — no pair obtainable.
    Exhausted,
}

/// The pair-selection state machine.
///
/// The hosting view feeds it the current item list (with a version token
/// so pools are only rebuilt on change), seeds a calibration queue when
/// an item newly enters the ranked set, and asks for the next pair after
/// every decision.
pub struct ComparisonEngine {
    /// Eligible working set: ranked status, non-null rating.
    items: Vec<RankedItem>,
    items_version: Option<u64>,
    pools: PairPools,

    /// Remaining calibration pairs; the front entry is the one currently
    /// shown. Non-empty iff `mode == Calibrating`.
    queue: VecDeque<Pair>,
    current: Option<Pair>,
    mode: Mode,

    config: SelectionConfig,
}

impl ComparisonEngine {
    pub fn new(config: SelectionConfig) -> Self {
        ComparisonEngine {
            items: Vec::new(),
            items_version: None,
            pools: PairPools::default(),
            queue: VecDeque::new(),
            current: None,
            mode: Mode::Exhausted,
            config,
        }
    }

    /// Replace the working set with the hosting view's latest item list.
    ///
    /// `version` is the caller's identity token for the list; passing an
    /// unchanged token skips the O(n^2) pool rebuild. Non-eligible items
    /// (backlog, null rating) are filtered out here, so every later
    /// selection operates on rated items only.
    pub fn set_items(&mut self, items: &[RankedItem], version: u64) {
        if self.items_version == Some(version) {
            return;
        }

        self.items = items.iter().filter(|i| i.is_eligible()).cloned().collect();
        self.pools = PairPools::build(&self.items, self.config.similar_window);
        self.items_version = Some(version);
    }

    /// The pair currently shown, if any.
    pub fn current_pair(&self) -> Option<Pair> {
        self.current
    }

    /// True while a calibration queue is being consumed.
    pub fn is_calibrating(&self) -> bool {
        self.mode == Mode::Calibrating
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Remaining calibration entries, the shown one included.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of items in the eligible working set.
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Seed a calibration queue for an item newly promoted into the
    /// ranked set, replacing any prior queue. The first queue entry
    /// becomes the current pair.
    ///
    /// Silently degrades when the item is absent from the working set
    /// (the caller has not refreshed its list yet) or no other items
    /// exist: the queue stays empty, the current pair is cleared, and the
    /// mode falls back to freeform or exhausted depending on the pools.
    pub fn start_calibration(&mut self, new_item_id: i64) {
        self.queue = build_calibration_queue(new_item_id, &self.items).into();

        match self.queue.front() {
            Some(&head) => {
                self.current = Some(head);
                self.mode = Mode::Calibrating;
            }
            None => {
                self.current = None;
                self.mode = if self.pools.is_empty() {
                    Mode::Exhausted
                } else {
                    Mode::Freeform
                };
            }
        }
    }

    /// Advance to the next pair using a thread-local RNG.
    pub fn next_pair(&mut self) -> Option<Pair> {
        self.next_pair_with(&mut rand::rng())
    }

    /// Advance to the next pair: drop the just-shown calibration head and
    /// expose the new head, or — once the queue is exhausted — make
    /// exactly one weighted draw from the pools. Returns the new current
    /// pair; `None` (and `Exhausted` mode) when no pair is obtainable.
    ///
    /// Never panics: with fewer than two eligible items this simply
    /// yields `None`.
    pub fn next_pair_with(&mut self, rng: &mut impl Rng) -> Option<Pair> {
        if self.mode == Mode::Calibrating {
            self.queue.pop_front();
            if let Some(&head) = self.queue.front() {
                self.current = Some(head);
                return self.current;
            }
            // Queue exhausted: fall through to a freeform draw.
        }

        match draw_freeform(&self.pools, self.config.similar_bias, rng) {
            Some((pair, _)) => {
                self.queue.clear();
                self.mode = Mode::Freeform;
                self.current = Some(pair);
            }
            None => {
                self.queue.clear();
                self.mode = Mode::Exhausted;
                self.current = None;
            }
        }
        self.current
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        ComparisonEngine::new(SelectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: i64, rating: Option<i64>) -> RankedItem {
        RankedItem {
            id,
            name: format!("item-{id}"),
            rating,
            status: Status::Ranked,
        }
    }

    fn engine_with(items: &[RankedItem]) -> ComparisonEngine {
        let mut engine = ComparisonEngine::default();
        engine.set_items(items, 0);
        engine
    }

    #[test]
    fn test_exhausted_with_no_items() {
        let mut engine = engine_with(&[]);
        assert_eq!(engine.next_pair_with(&mut StdRng::seed_from_u64(0)), None);
        assert_eq!(engine.mode(), Mode::Exhausted);
    }

    #[test]
    fn test_exhausted_with_single_item_for_both_entry_points() {
        let items = vec![item(1, Some(1000))];
        let mut engine = engine_with(&items);

        engine.start_calibration(1);
        assert_eq!(engine.current_pair(), None);
        assert_eq!(engine.mode(), Mode::Exhausted);

        assert_eq!(engine.next_pair_with(&mut StdRng::seed_from_u64(0)), None);
        assert_eq!(engine.current_pair(), None);
    }

    #[test]
    fn test_null_rating_items_do_not_count_as_eligible() {
        let items = vec![item(1, Some(1000)), item(2, None)];
        let mut engine = engine_with(&items);
        assert_eq!(engine.num_items(), 1);
        assert_eq!(engine.next_pair_with(&mut StdRng::seed_from_u64(0)), None);
        assert_eq!(engine.mode(), Mode::Exhausted);
    }

    #[test]
    fn test_calibration_exposes_first_pair_immediately() {
        let items = vec![
            item(1, Some(1000)),
            item(2, Some(1050)),
            item(3, Some(1400)),
            item(4, Some(1060)),
        ];
        let mut engine = engine_with(&items);
        engine.start_calibration(4);

        assert!(engine.is_calibrating());
        assert_eq!(engine.mode(), Mode::Calibrating);
        let current = engine.current_pair().unwrap();
        assert_eq!(current.0, 4);
        assert_eq!(engine.queue_len(), 3);
    }

    #[test]
    fn test_calibration_exhaustion_falls_back_to_freeform() {
        let items = vec![
            item(1, Some(1000)),
            item(2, Some(1050)),
            item(3, Some(1400)),
            item(4, Some(1060)),
        ];
        let mut engine = engine_with(&items);
        engine.start_calibration(4);

        let mut rng = StdRng::seed_from_u64(3);
        let queued = engine.queue_len();
        for _ in 1..queued {
            assert!(engine.is_calibrating());
            assert!(engine.next_pair_with(&mut rng).is_some());
        }

        // Dropping the last queue entry must not yield a silent "no pair":
        // with >= 2 eligible items the engine switches to freeform.
        let pair = engine.next_pair_with(&mut rng);
        assert!(pair.is_some());
        assert!(!engine.is_calibrating());
        assert_eq!(engine.mode(), Mode::Freeform);
    }

    #[test]
    fn test_calibration_for_absent_item_is_ignored() {
        let items = vec![
            item(1, Some(1000)),
            item(2, Some(1050)),
            item(3, Some(1400)),
        ];
        let mut engine = engine_with(&items);

        // Item 4 not yet in the supplied list: defensive no-op.
        engine.start_calibration(4);
        assert_eq!(engine.queue_len(), 0);
        assert!(!engine.is_calibrating());
        assert_eq!(engine.current_pair(), None);

        // After the list refresh the same call builds the full queue:
        // percentile indices of rating-sorted [1, 2, 3] are mid=1,
        // 25th=0, 75th=2.
        let mut refreshed = items.clone();
        refreshed.push(item(4, Some(1000)));
        engine.set_items(&refreshed, 1);
        engine.start_calibration(4);

        assert_eq!(engine.queue_len(), 3);
        assert_eq!(engine.current_pair(), Some((4, 2)));

        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(engine.next_pair_with(&mut rng), Some((4, 1)));
        assert_eq!(engine.next_pair_with(&mut rng), Some((4, 3)));
    }

    #[test]
    fn test_start_calibration_replaces_prior_queue() {
        let items = vec![
            item(1, Some(1000)),
            item(2, Some(1050)),
            item(3, Some(1400)),
            item(4, Some(1060)),
        ];
        let mut engine = engine_with(&items);

        engine.start_calibration(4);
        let first_queue = engine.queue_len();
        assert!(first_queue > 0);

        engine.start_calibration(3);
        assert!(engine.is_calibrating());
        assert_eq!(engine.current_pair().unwrap().0, 3);
    }

    #[test]
    fn test_freeform_pairs_are_distinct_and_rated() {
        let items: Vec<RankedItem> = (1..=8).map(|id| item(id, Some(950 + id * 40))).collect();
        let mut engine = engine_with(&items);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let (a, b) = engine.next_pair_with(&mut rng).unwrap();
            assert_ne!(a, b);
            assert!(items.iter().any(|i| i.id == a));
            assert!(items.iter().any(|i| i.id == b));
        }
    }

    #[test]
    fn test_set_items_with_same_version_skips_rebuild() {
        let items = vec![item(1, Some(1000)), item(2, Some(1050))];
        let mut engine = engine_with(&items);

        // Same token with a different list: memoized pools stay.
        engine.set_items(&[], 0);
        assert_eq!(engine.num_items(), 2);

        // New token picks up the change.
        engine.set_items(&[], 1);
        assert_eq!(engine.num_items(), 0);
    }

    #[test]
    fn test_recovers_from_exhausted_after_items_arrive() {
        let mut engine = engine_with(&[item(1, Some(1000))]);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(engine.next_pair_with(&mut rng), None);
        assert_eq!(engine.mode(), Mode::Exhausted);

        let items = vec![item(1, Some(1000)), item(2, Some(1050))];
        engine.set_items(&items, 1);
        assert!(engine.next_pair_with(&mut rng).is_some());
        assert_eq!(engine.mode(), Mode::Freeform);
    }
}
