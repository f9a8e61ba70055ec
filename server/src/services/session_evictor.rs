use std::time::Duration;

use tracing::info;

use crate::config::SESSION_SWEEP_INTERVAL_SECS;
use crate::state::AppState;

/// Periodically drops sessions left over from previous days. Their
/// targets are stale by definition, since the daily selector re-derives the
/// target from the date, so players start fresh after midnight.
pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_INTERVAL_SECS));

    loop {
        interval.tick().await;

        let today = state.today();
        let evicted = state.evict_stale(today);
        if evicted > 0 {
            info!(
                "evicted {evicted} sessions from previous days ({} remaining)",
                state.sessions.len()
            );
        }
    }
}
