/// shelfrank-core: Pair-selection engine for personal ranking lists.
///
/// Decides which two items to present next during pairwise comparison:
/// a short deterministic calibration queue when an item newly enters the
/// ranked set, then weighted-random freeform draws for ongoing
/// refinement. Rating math, persistence and auth live in an external
/// backend reached through the `RatingBackend` trait — this crate owns
/// selection and reconciliation only.
///
/// # Quick start
///
/// ```rust
/// use shelfrank_core::{ComparisonEngine, RankedItem, SelectionConfig, Status};
///
/// let items = vec![
///     RankedItem { id: 1, name: "Heat".into(), rating: Some(1000), status: Status::Ranked },
///     RankedItem { id: 2, name: "Ronin".into(), rating: Some(1050), status: Status::Ranked },
///     RankedItem { id: 3, name: "Thief".into(), rating: Some(1040), status: Status::Ranked },
/// ];
///
/// let mut engine = ComparisonEngine::new(SelectionConfig::default());
/// engine.set_items(&items, 0);
///
/// // Item 3 just entered the ranked set: bracket it first.
/// engine.start_calibration(3);
/// assert!(engine.is_calibrating());
///
/// if let Some((left, right)) = engine.current_pair() {
///     println!("compare {left} vs {right}");
/// }
///
/// // After the user picks a winner, advance. Once the queue drains,
/// // draws come from the weighted pools.
/// engine.next_pair();
/// ```

pub mod constants;
pub mod engine;
pub mod outcome;
pub mod pairing;
pub mod pools;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::{ComparisonEngine, Mode, SelectionConfig};
pub use outcome::{resolve_comparison, BackendError, RatingBackend};
pub use pairing::{build_calibration_queue, draw_freeform, DrawSource};
pub use pools::PairPools;
pub use types::{ComparisonResult, ItemRating, Pair, RankedItem, Status};
