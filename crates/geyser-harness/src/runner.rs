//! Probe sequencing and report assembly.

use tokio::time::Duration;

use crate::outcome::{ProbeDescriptor, ProbeKind, Report};
use crate::probe::run_unary;
use crate::stream::run_streaming;
use crate::target::{AccountFilter, ProbeTarget};

/// Default first-update deadline for the subscription probe.
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Default number of subscription probe runs per battery.
pub const DEFAULT_STREAM_RUNS: usize = 1;

const LATEST_BLOCKHASH: &str = "GetLatestBlockhash";
const BLOCK_HEIGHT: &str = "GetBlockHeight";
const SLOT: &str = "GetSlot";
const SUBSCRIBE: &str = "Subscribe";

/// One probe battery: which probes run, in what order, with what limits.
///
/// The three unary probes are fixed; the subscription probe's deadline and
/// run count are configuration (the source material disagreed on both, so
/// neither is hardcoded).
#[derive(Debug, Clone)]
pub struct ProbePlan {
    /// First-update deadline for each subscription run.
    pub stream_timeout: Duration,
    /// Number of sequential subscription runs.
    pub stream_runs: usize,
    /// Accounts watched by the subscription probe.
    pub filter: AccountFilter,
}

impl Default for ProbePlan {
    fn default() -> Self {
        Self {
            stream_timeout: DEFAULT_STREAM_TIMEOUT,
            stream_runs: DEFAULT_STREAM_RUNS,
            filter: AccountFilter::default(),
        }
    }
}

impl ProbePlan {
    /// The configured battery, in execution order.
    pub fn descriptors(&self) -> Vec<ProbeDescriptor> {
        let mut probes = vec![
            ProbeDescriptor {
                name: LATEST_BLOCKHASH,
                kind: ProbeKind::Unary,
            },
            ProbeDescriptor {
                name: BLOCK_HEIGHT,
                kind: ProbeKind::Unary,
            },
            ProbeDescriptor {
                name: SLOT,
                kind: ProbeKind::Unary,
            },
        ];
        probes.extend((0..self.stream_runs).map(|_| ProbeDescriptor {
            name: SUBSCRIBE,
            kind: ProbeKind::Streaming,
        }));
        probes
    }

    /// Run the battery against `target` and assemble the report.
    ///
    /// Probes run strictly sequentially: each resolves to an outcome before
    /// the next starts, and each subscription run fully closes its channel
    /// before the next opens. A failed probe never aborts the run; the
    /// report always has one entry per configured probe, in execution
    /// order.
    pub async fn run<T: ProbeTarget>(&self, target: &mut T) -> Report {
        let mut report = Report::default();

        report.push(run_unary(LATEST_BLOCKHASH, target.latest_blockhash()).await);
        report.push(run_unary(BLOCK_HEIGHT, target.block_height()).await);
        report.push(run_unary(SLOT, target.slot()).await);

        for _ in 0..self.stream_runs {
            report.push(run_streaming(SUBSCRIBE, target, &self.filter, self.stream_timeout).await);
        }

        report
    }
}
