/// Comparison result submission and reconciliation.
///
/// The external backend is authoritative for rating math: this module
/// only submits the user's pick and reconciles the before/after ratings
/// for display. No local rating cache is kept — the hosting view
/// refreshes its own item list after a successful comparison.
use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ComparisonResult, ItemRating, RankedItem};

/// Errors from the external rating capability.
///
/// There are no fatal conditions in this core: a `Submit` error leaves
/// the current pair displayed so the user can retry, and read-back
/// problems degrade to "no result shown".
#[derive(Debug, Error)]
pub enum BackendError {
    /// The rating-update procedure failed; nothing was recorded locally.
    #[error("comparison submission failed: {0}")]
    Submit(String),
    /// The post-update rating read-back failed.
    #[error("rating read-back failed: {0}")]
    Fetch(String),
}

/// The one external capability boundary of the core.
///
/// `submit_comparison` performs the authoritative Elo-style update;
/// idempotency and persistence are the remote side's responsibility.
/// `fetch_ratings` reads back the two submitted items afterwards.
#[async_trait]
pub trait RatingBackend: Send + Sync {
    async fn submit_comparison(&self, winner_id: i64, loser_id: i64) -> Result<(), BackendError>;

    async fn fetch_ratings(&self, ids: [i64; 2]) -> Result<Vec<ItemRating>, BackendError>;
}

/// Submit a winner/loser pick and reconcile the rating deltas.
///
/// The two awaits are strictly sequential: the read-back depends on the
/// remote procedure having committed the new ratings. Returns:
/// - `Err` when submission fails — no state was touched, retry is a
///   fresh user action;
/// - `Ok(None)` when either input rating was missing or the read-back
///   did not return both items (soft failure, no partial result);
/// - `Ok(Some(result))` with `delta = new - old` per side otherwise.
pub async fn resolve_comparison<B: RatingBackend + ?Sized>(
    backend: &B,
    winner: &RankedItem,
    loser: &RankedItem,
) -> Result<Option<ComparisonResult>, BackendError> {
    // Ratings as captured before submission; a missing one indicates the
    // caller handed over a non-ranked item, treated as input inconsistency.
    let (Some(winner_before), Some(loser_before)) = (winner.rating, loser.rating) else {
        return Ok(None);
    };

    backend.submit_comparison(winner.id, loser.id).await?;

    let rows = backend.fetch_ratings([winner.id, loser.id]).await?;
    let rating_after = |id: i64| rows.iter().find(|r| r.id == id).and_then(|r| r.rating);

    let (Some(winner_after), Some(loser_after)) = (rating_after(winner.id), rating_after(loser.id))
    else {
        return Ok(None);
    };

    Ok(Some(ComparisonResult {
        winner_id: winner.id,
        loser_id: loser.id,
        winner_name: winner.name.clone(),
        loser_name: loser.name.clone(),
        winner_delta: winner_after - winner_before,
        loser_delta: loser_after - loser_before,
    }))
}
