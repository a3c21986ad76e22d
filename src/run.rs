//! One full check pass over the tracked identifiers.
//!
//! Sequential by design: identifiers are checked one at a time, and no error
//! short of the missing-config precondition stops the pass. Every failure is
//! terminal for its identifier only.

use crate::config::WatchConfig;
use crate::error::WatchError;
use crate::notify::{TelegramNotifier, format_invalid_id_message, format_status_message};
use crate::state::PercentStore;
use crate::status::StatusClient;

/// Outcome counters for one check pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Identifiers processed.
    pub checked: usize,
    /// Identifiers whose percent changed (notification sent, state updated).
    pub notified: usize,
    /// Identifiers whose percent matched the persisted value.
    pub unchanged: usize,
    /// Identifiers skipped due to a fetch or service error.
    pub failed: usize,
}

/// Check every configured identifier once.
///
/// Change detection: a notification is sent iff the current percent differs
/// from the persisted one (or no valid persisted value exists). The new
/// percent is persisted after the notification attempt regardless of
/// delivery outcome — delivery is best-effort.
pub async fn run_checks(
    config: &WatchConfig,
    client: &StatusClient,
    store: &PercentStore,
    notifier: &TelegramNotifier,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for request_id in &config.request_ids {
        summary.checked += 1;

        let snapshot = match client.fetch(request_id).await {
            Ok(snapshot) => snapshot,
            Err(WatchError::InvalidRequestId(id)) => {
                tracing::error!(request_id = %id, "service rejected the application id");
                notifier.notify(&format_invalid_id_message(&id)).await;
                summary.failed += 1;
                continue;
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "status check failed");
                summary.failed += 1;
                continue;
            }
        };

        let last = store.last_percent(request_id);
        if snapshot.percent == last {
            tracing::info!(request_id = %request_id, percent = snapshot.percent, "completion percent unchanged");
            summary.unchanged += 1;
            continue;
        }

        tracing::warn!(
            request_id = %request_id,
            percent = snapshot.percent,
            last,
            "completion percent changed"
        );
        notifier.notify(&format_status_message(&snapshot)).await;
        if let Err(e) = store.record(request_id, snapshot.percent) {
            tracing::error!(request_id = %request_id, error = %e, "failed to persist percent");
        }
        summary.notified += 1;
    }

    summary
}
