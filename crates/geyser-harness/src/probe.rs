//! Timed execution of a single unary call.

use std::future::Future;

use tokio::time::Instant;
use tonic::Status;

use crate::outcome::{Outcome, ProbeKind, ProbePayload};

/// Await `call`, timing it from immediately before the first poll to the
/// moment it resolves.
///
/// Elapsed time is recorded on the error path too; a slow failure is as
/// interesting as a slow success. Never returns an error itself: the RPC
/// layer's error is captured as the outcome's message.
pub async fn run_unary<F>(name: &'static str, call: F) -> Outcome
where
    F: Future<Output = Result<ProbePayload, Status>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed();

    match result {
        Ok(payload) => {
            tracing::debug!(probe = name, elapsed_ms = elapsed.as_millis() as u64, "probe ok");
            Outcome::success(name, ProbeKind::Unary, elapsed, payload)
        }
        Err(status) => {
            tracing::warn!(probe = name, error = %status, "probe failed");
            Outcome::failure(name, ProbeKind::Unary, Some(elapsed), status.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn success_records_latency_and_payload() {
        let outcome = run_unary("GetSlot", async {
            tokio::time::sleep(Duration::from_millis(42)).await;
            Ok(ProbePayload::Slot(100))
        })
        .await;

        assert_eq!(outcome.name(), "GetSlot");
        assert!(outcome.succeeded());
        assert_eq!(outcome.elapsed_ms(), Some(42.0));
        assert_eq!(outcome.payload(), Some(&ProbePayload::Slot(100)));
        assert_eq!(outcome.error_message(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn error_still_records_latency() {
        let outcome = run_unary("GetBlockHeight", async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Err(Status::unavailable("unavailable"))
        })
        .await;

        assert!(!outcome.succeeded());
        assert_eq!(outcome.elapsed_ms(), Some(5.0));
        assert_eq!(outcome.error_message(), Some("unavailable"));
        assert_eq!(outcome.payload(), None);
    }
}
