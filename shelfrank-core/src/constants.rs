/// Default rating-point gap under which two items count as "similarly
/// rated". Comparisons between closely rated items are the most
/// informative for refining relative order, so freeform selection prefers
/// the similar pool most of the time.
///
/// The value is a tuning choice, not a structural requirement — it is the
/// default for `SelectionConfig::similar_window`, not a hard-coded limit.
pub const DEFAULT_SIMILAR_WINDOW: i64 = 200;

/// Default probability that a freeform draw comes from the similar-rating
/// pool rather than the all-pairs pool. The all-pairs fallback keeps
/// coverage of distant matchups and guarantees a draw whenever the
/// similar pool is empty.
///
/// Like the window, this is a tunable default (`SelectionConfig::similar_bias`).
pub const DEFAULT_SIMILAR_BIAS: f64 = 0.85;

/// Maximum length of a calibration queue: one matchup per sampled
/// percentile (25th, 50th, 75th), before index deduplication.
pub const CALIBRATION_QUEUE_MAX: usize = 3;
