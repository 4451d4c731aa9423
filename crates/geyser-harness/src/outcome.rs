//! Normalized probe results and the consolidated report.

use std::fmt;
use std::time::Duration;

/// Probe shape: single-shot request/response or server-push subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Single request, single response.
    Unary,
    /// One initiation message, updates pushed until closed.
    Streaming,
}

/// Static identity of a probe in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeDescriptor {
    /// RPC method name the probe is bound to.
    pub name: &'static str,
    /// Probe shape.
    pub kind: ProbeKind,
}

/// Domain rendering of a Geyser response.
///
/// Opaque to the probing logic; carried through the outcome and displayed
/// by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbePayload {
    /// `GetLatestBlockhash` response.
    LatestBlockhash {
        /// Slot the blockhash was produced in.
        slot: u64,
        /// The blockhash itself, base58.
        blockhash: String,
        /// Last block height at which the blockhash is valid.
        last_valid_block_height: u64,
    },
    /// `GetBlockHeight` response.
    BlockHeight(u64),
    /// `GetSlot` response.
    Slot(u64),
    /// First update received on a subscription channel.
    Update {
        /// Which oneof variant the update carried (account, slot, ping, ...).
        kind: String,
        /// Slot the update refers to, when the variant carries one.
        slot: Option<u64>,
    },
}

impl fmt::Display for ProbePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatestBlockhash {
                slot,
                blockhash,
                last_valid_block_height,
            } => write!(
                f,
                "blockhash {blockhash} (slot {slot}, valid until height {last_valid_block_height})"
            ),
            Self::BlockHeight(height) => write!(f, "block height {height}"),
            Self::Slot(slot) => write!(f, "slot {slot}"),
            Self::Update { kind, slot: Some(slot) } => write!(f, "{kind} update (slot {slot})"),
            Self::Update { kind, slot: None } => write!(f, "{kind} update"),
        }
    }
}

/// Result of one probe execution.
///
/// Exactly one of payload and error message is present, enforced by the
/// inner `Result`. Elapsed time is recorded on both the success and the
/// error path; it is `None` only when no meaningful duration exists
/// (a timeout).
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    name: String,
    kind: ProbeKind,
    elapsed_ms: Option<f64>,
    result: Result<ProbePayload, String>,
}

impl Outcome {
    /// Successful probe with its latency and response.
    pub fn success(
        name: impl Into<String>,
        kind: ProbeKind,
        elapsed: Duration,
        payload: ProbePayload,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            elapsed_ms: Some(elapsed.as_secs_f64() * 1_000.0),
            result: Ok(payload),
        }
    }

    /// Failed probe. Latency is still recorded when one was measured.
    pub fn failure(
        name: impl Into<String>,
        kind: ProbeKind,
        elapsed: Option<Duration>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            elapsed_ms: elapsed.map(|e| e.as_secs_f64() * 1_000.0),
            result: Err(message.into()),
        }
    }

    /// Probe that hit its deadline with no event: a failure with the
    /// synthetic message and no latency.
    pub fn timeout(name: impl Into<String>, kind: ProbeKind) -> Self {
        Self::failure(name, kind, None, crate::stream::TIMEOUT_ERROR)
    }

    /// Probe name (the RPC method it was bound to).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probe shape.
    pub fn kind(&self) -> ProbeKind {
        self.kind
    }

    /// Elapsed milliseconds, `None` for timeouts.
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed_ms
    }

    /// Whether the probe succeeded.
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Response value, present iff the probe succeeded.
    pub fn payload(&self) -> Option<&ProbePayload> {
        self.result.as_ref().ok()
    }

    /// Error message, present iff the probe failed.
    pub fn error_message(&self) -> Option<&str> {
        self.result.as_ref().err().map(String::as_str)
    }
}

/// Ordered collection of outcomes for one harness run.
///
/// Insertion order equals execution order. Built once by the run
/// coordinator; read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    pub(crate) fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes in execution order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of probe executions covered.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of failed probes.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }

    /// Iterate over outcomes in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

impl IntoIterator for Report {
    type Item = Outcome;
    type IntoIter = std::vec::IntoIter<Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_payload_and_no_error() {
        let outcome = Outcome::success(
            "GetSlot",
            ProbeKind::Unary,
            Duration::from_millis(42),
            ProbePayload::Slot(100),
        );
        assert!(outcome.succeeded());
        assert_eq!(outcome.payload(), Some(&ProbePayload::Slot(100)));
        assert_eq!(outcome.error_message(), None);
        assert_eq!(outcome.elapsed_ms(), Some(42.0));
    }

    #[test]
    fn failure_has_error_and_no_payload() {
        let outcome = Outcome::failure(
            "GetSlot",
            ProbeKind::Unary,
            Some(Duration::from_millis(5)),
            "unavailable",
        );
        assert!(!outcome.succeeded());
        assert_eq!(outcome.payload(), None);
        assert_eq!(outcome.error_message(), Some("unavailable"));
        assert_eq!(outcome.elapsed_ms(), Some(5.0));
    }

    #[test]
    fn timeout_has_no_elapsed_time() {
        let outcome = Outcome::timeout("Subscribe", ProbeKind::Streaming);
        assert!(!outcome.succeeded());
        assert_eq!(outcome.error_message(), Some("Timeout"));
        assert_eq!(outcome.elapsed_ms(), None);
    }

    #[test]
    fn report_preserves_insertion_order() {
        let mut report = Report::default();
        report.push(Outcome::success(
            "GetSlot",
            ProbeKind::Unary,
            Duration::from_millis(1),
            ProbePayload::Slot(1),
        ));
        report.push(Outcome::timeout("Subscribe", ProbeKind::Streaming));

        let names: Vec<&str> = report.iter().map(Outcome::name).collect();
        assert_eq!(names, ["GetSlot", "Subscribe"]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn payload_display() {
        assert_eq!(ProbePayload::Slot(123).to_string(), "slot 123");
        assert_eq!(
            ProbePayload::BlockHeight(9).to_string(),
            "block height 9"
        );
        assert_eq!(
            ProbePayload::Update {
                kind: "account".to_string(),
                slot: Some(7),
            }
            .to_string(),
            "account update (slot 7)"
        );
        assert_eq!(
            ProbePayload::Update {
                kind: "ping".to_string(),
                slot: None,
            }
            .to_string(),
            "ping update"
        );
    }
}
