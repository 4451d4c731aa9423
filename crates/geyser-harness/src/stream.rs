//! First-update latency probe over the subscription channel.
//!
//! One run walks the channel through open → first event → close. Three
//! event sources race against the open channel: the first update, a channel
//! error, and the deadline. The race has a single resolution point (one
//! `timeout_at` await), so a late-firing deadline can never overwrite an
//! outcome that data or an error already resolved.

use tokio::time::{timeout_at, Duration, Instant};

use crate::outcome::{Outcome, ProbeKind};
use crate::target::{AccountFilter, ProbeSubscription, ProbeTarget};

/// Error message recorded when the deadline elapses with no event.
pub const TIMEOUT_ERROR: &str = "Timeout";

/// Error message recorded when the server ends the stream before the first
/// update.
pub const STREAM_CLOSED_ERROR: &str = "stream closed before first update";

/// Run one subscription probe: open the channel, wait for the first event,
/// close.
///
/// The deadline runs from open and covers the subscribe handshake as well
/// as the wait for the first event. The probe measures first-update latency
/// only; the channel is closed as soon as any event resolves the race, and
/// later updates are never observed.
pub async fn run_streaming<T: ProbeTarget>(
    name: &'static str,
    target: &mut T,
    filter: &AccountFilter,
    timeout: Duration,
) -> Outcome {
    let start = Instant::now();
    let deadline = start + timeout;

    let mut subscription = match timeout_at(deadline, target.subscribe(filter)).await {
        Ok(Ok(subscription)) => subscription,
        Ok(Err(status)) => {
            tracing::warn!(probe = name, error = %status, "subscribe failed");
            return Outcome::failure(
                name,
                ProbeKind::Streaming,
                Some(start.elapsed()),
                status.message(),
            );
        }
        Err(_) => {
            tracing::warn!(probe = name, "no response within deadline");
            return Outcome::timeout(name, ProbeKind::Streaming);
        }
    };

    let outcome = match timeout_at(deadline, subscription.message()).await {
        Ok(Ok(Some(update))) => {
            let elapsed = start.elapsed();
            tracing::debug!(probe = name, elapsed_ms = elapsed.as_millis() as u64, "first update");
            Outcome::success(name, ProbeKind::Streaming, elapsed, update)
        }
        Ok(Ok(None)) => Outcome::failure(
            name,
            ProbeKind::Streaming,
            Some(start.elapsed()),
            STREAM_CLOSED_ERROR,
        ),
        Ok(Err(status)) => {
            tracing::warn!(probe = name, error = %status, "stream error before first update");
            Outcome::failure(
                name,
                ProbeKind::Streaming,
                Some(start.elapsed()),
                status.message(),
            )
        }
        Err(_) => {
            tracing::warn!(probe = name, "no update within deadline");
            Outcome::timeout(name, ProbeKind::Streaming)
        }
    };

    // Requested exactly once per opened channel, whichever trigger fired.
    subscription.close();
    outcome
}
