//! Trait seam between the probe harness and the gRPC transport.
//!
//! The harness never constructs or tears down the client handle; it only
//! invokes the four Geyser operations through [`ProbeTarget`] and converts
//! their results into outcomes. Keeping the seam here lets the whole
//! orchestration layer run against a mock target in tests.

use async_trait::async_trait;
use tonic::Status;

use crate::outcome::ProbePayload;

/// USDC mint address, the default watched account.
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Accounts watched by the subscription probe.
///
/// The transport layer converts this into the wire
/// `{ accounts: { <name>: { account: [...] } } }` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFilter {
    /// Label under which the accounts are registered with the server.
    pub name: String,
    /// Base58 account addresses to watch.
    pub accounts: Vec<String>,
}

impl Default for AccountFilter {
    fn default() -> Self {
        Self {
            name: "usdc".to_string(),
            accounts: vec![USDC_MINT.to_string()],
        }
    }
}

/// One open subscription channel.
#[async_trait]
pub trait ProbeSubscription: Send {
    /// Next event on the channel.
    ///
    /// `Ok(Some(_))` is an update, `Ok(None)` means the server closed the
    /// stream, `Err` is a transport or application error.
    async fn message(&mut self) -> Result<Option<ProbePayload>, Status>;

    /// Request client-side termination.
    ///
    /// Closing an already-closed channel must be a no-op.
    fn close(&mut self);
}

/// The four Geyser operations the harness drives.
#[async_trait]
pub trait ProbeTarget: Send {
    /// Subscription handle returned by [`subscribe`](Self::subscribe).
    type Subscription: ProbeSubscription;

    /// `GetLatestBlockhash` point query.
    async fn latest_blockhash(&mut self) -> Result<ProbePayload, Status>;

    /// `GetBlockHeight` point query.
    async fn block_height(&mut self) -> Result<ProbePayload, Status>;

    /// `GetSlot` point query.
    async fn slot(&mut self) -> Result<ProbePayload, Status>;

    /// Open the subscription channel and send the initiation message.
    async fn subscribe(&mut self, filter: &AccountFilter) -> Result<Self::Subscription, Status>;
}
