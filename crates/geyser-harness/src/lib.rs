//! Probe orchestration and timing engine for geyser-probe.
//!
//! This crate is transport-agnostic: it drives the four Geyser operations
//! through the [`ProbeTarget`] trait seam, times each interaction, and
//! merges heterogeneous results (success, error, timeout) into one
//! normalized [`Report`]. Connecting to a real endpoint lives in
//! `geyser-client`; rendering the report lives in the binary.

pub mod outcome;
pub mod probe;
pub mod runner;
pub mod stream;
pub mod target;

pub use outcome::{Outcome, ProbeDescriptor, ProbeKind, ProbePayload, Report};
pub use runner::{ProbePlan, DEFAULT_STREAM_RUNS, DEFAULT_STREAM_TIMEOUT};
pub use stream::TIMEOUT_ERROR;
pub use target::{AccountFilter, ProbeSubscription, ProbeTarget, USDC_MINT};
