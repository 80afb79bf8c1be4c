//! Cancellable delayed advance to the next puzzle.
//!
//! The original pacing between puzzles (the interstitial countdown) is
//! modeled as an explicit delayed task bound to the session lifetime: at most
//! one is pending, a newer schedule replaces it, and teardown or an explicit
//! start cancels it so a timer can never fire against a torn-down session.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::services::game_service;
use crate::state::SharedState;

/// Handle to a scheduled advance. Held in the application state's pending
/// slot; cancelling aborts the underlying timer task.
pub struct PendingAdvance {
    handle: JoinHandle<()>,
}

impl PendingAdvance {
    /// Abort the timer task. The advance will not run.
    fn cancel(self) {
        self.handle.abort();
    }
}

/// Schedule an advance after `delay`, replacing (and cancelling) any
/// previously pending one.
pub async fn schedule(state: &SharedState, delay: Duration) {
    let mut slot = state.pending_advance().lock().await;
    if let Some(previous) = slot.take() {
        previous.cancel();
    }

    let task_state = Arc::clone(state);
    let handle = tokio::spawn(fire_after(task_state, delay));
    *slot = Some(PendingAdvance { handle });
    info!(delay_ms = delay.as_millis() as u64, "scheduled next-puzzle advance");
}

/// Cancel the pending advance, if any.
pub async fn cancel(state: &SharedState) {
    let mut slot = state.pending_advance().lock().await;
    if let Some(pending) = slot.take() {
        pending.cancel();
        info!("cancelled pending next-puzzle advance");
    }
}

async fn fire_after(state: SharedState, delay: Duration) {
    tokio::time::sleep(delay).await;

    // Vacate the slot first; dropping the handle does not abort the task,
    // and the slot must not point at a timer that already fired.
    {
        let mut slot = state.pending_advance().lock().await;
        slot.take();
    }

    match game_service::advance(&state).await {
        Ok(view) => info!(puzzle = %view.puzzle_id, "delayed advance completed"),
        Err(err) => warn!(error = %err, "delayed advance failed"),
    }
}
