/// Shared types for the comparison selection engine.
///
/// Items are identified by backend-provided `i64` IDs. Ratings are
/// nullable integers: only items in ranked status with a non-null rating
/// are eligible for comparison.

/// Lifecycle status of a catalogued item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    /// In the ranked working set, carries a rating.
    Ranked,
    /// Catalogued but not yet rated.
    Backlog,
}

/// An item as supplied by the hosting view.
///
/// `rating` is `None` only for backlog items; within the ranked working
/// set it is always present. The engine silently skips anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedItem {
    pub id: i64,
    pub name: String,
    pub rating: Option<i64>,
    pub status: Status,
}

impl RankedItem {
    /// True when the item is eligible for pair selection.
    pub fn is_eligible(&self) -> bool {
        self.status == Status::Ranked && self.rating.is_some()
    }
}

/// A matchup: two item IDs to present side by side.
///
/// Order is display-only (left vs right card) and carries no semantic
/// weight.
pub type Pair = (i64, i64);

/// One row of the post-update rating read-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRating {
    pub id: i64,
    pub rating: Option<i64>,
}

/// Reconciled outcome of one comparison, for display.
///
/// Ephemeral: exists only until the next pair is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    pub winner_id: i64,
    pub loser_id: i64,
    pub winner_name: String,
    pub loser_name: String,
    /// Signed rating change for the winner (`new - old`).
    pub winner_delta: i64,
    /// Signed rating change for the loser (`new - old`).
    pub loser_delta: i64,
}
