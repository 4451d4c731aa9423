//! gRPC client wrapper implementing the probe harness's target seam.

use std::time::Duration;

use async_trait::async_trait;
use geyser_harness::{AccountFilter, ProbePayload, ProbeSubscription, ProbeTarget};
use geyser_proto::geyser::geyser_client::GeyserClient;
use geyser_proto::geyser::{
    GetBlockHeightRequest, GetLatestBlockhashRequest, GetSlotRequest, SubscribeRequest,
    SubscribeUpdate,
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::Channel;
use tonic::{Request, Status, Streaming};

use crate::connection::EndpointAddress;
use crate::error::Result;

/// gRPC channel configuration for connection reliability.
///
/// Tuned for a short-lived probe run against a local or networked
/// endpoint, with emphasis on fast failure detection.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Connection timeout (how long to wait for the initial connection)
    pub connect_timeout: Duration,
    /// Request timeout (default timeout for individual unary calls)
    pub request_timeout: Duration,
    /// HTTP/2 keepalive interval (how often to send keepalive pings)
    pub keepalive_interval: Duration,
    /// Keepalive timeout (how long to wait for a keepalive response)
    pub keepalive_timeout: Duration,
    /// Whether to send keepalive pings even when idle
    pub keepalive_while_idle: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            keepalive_interval: Duration::from_secs(10),
            keepalive_timeout: Duration::from_secs(60),
            keepalive_while_idle: true,
        }
    }
}

impl ChannelConfig {
    /// Fast configuration for local endpoints with quicker failure
    /// detection.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            keepalive_interval: Duration::from_secs(15),
            keepalive_timeout: Duration::from_secs(5),
            keepalive_while_idle: true,
        }
    }
}

/// gRPC client handle for one Geyser endpoint.
///
/// Holds two channels: one with a request timeout for the point queries,
/// and a dedicated streaming channel without one, so the subscription
/// probe's own deadline is the only bound on the wait for the first
/// update.
#[derive(Debug, Clone)]
pub struct GeyserProbeClient {
    geyser: GeyserClient<Channel>,
    /// Dedicated client for the streaming RPC (no request timeout)
    streaming: GeyserClient<Channel>,
}

impl GeyserProbeClient {
    /// Connect to the Geyser endpoint with default configuration.
    pub async fn connect(address: &EndpointAddress) -> Result<Self> {
        Self::connect_with_config(address, ChannelConfig::default()).await
    }

    /// Connect with custom channel configuration.
    ///
    /// Use [`ChannelConfig::fast`] for local endpoints, or customize the
    /// timeouts for high-latency networks.
    pub async fn connect_with_config(
        address: &EndpointAddress,
        config: ChannelConfig,
    ) -> Result<Self> {
        // Channel with request timeout for the unary probes
        let endpoint = Channel::from_shared(address.as_str().to_string())?
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .http2_keep_alive_interval(config.keepalive_interval)
            .keep_alive_timeout(config.keepalive_timeout)
            .keep_alive_while_idle(config.keepalive_while_idle);

        // Streaming channel WITHOUT a request timeout: the subscription
        // probe enforces its own first-update deadline, and a 30-second
        // request timeout would cancel the call underneath it.
        // tcp_nodelay matters here: this channel measures latency.
        let streaming_endpoint = Channel::from_shared(address.as_str().to_string())?
            .connect_timeout(config.connect_timeout)
            .http2_keep_alive_interval(config.keepalive_interval)
            .keep_alive_timeout(config.keepalive_timeout)
            .keep_alive_while_idle(config.keepalive_while_idle)
            .tcp_nodelay(true);

        tracing::debug!(endpoint = %address, "connecting");
        let channel = endpoint.connect().await?;
        let streaming_channel = streaming_endpoint.connect().await?;

        Ok(Self {
            geyser: GeyserClient::new(channel),
            streaming: GeyserClient::new(streaming_channel),
        })
    }
}

#[async_trait]
impl ProbeTarget for GeyserProbeClient {
    type Subscription = GrpcSubscription;

    async fn latest_blockhash(&mut self) -> std::result::Result<ProbePayload, Status> {
        let response = self
            .geyser
            .get_latest_blockhash(GetLatestBlockhashRequest { commitment: None })
            .await?;
        Ok(response.into_inner().into())
    }

    async fn block_height(&mut self) -> std::result::Result<ProbePayload, Status> {
        let response = self
            .geyser
            .get_block_height(GetBlockHeightRequest { commitment: None })
            .await?;
        Ok(response.into_inner().into())
    }

    async fn slot(&mut self) -> std::result::Result<ProbePayload, Status> {
        let response = self.geyser.get_slot(GetSlotRequest { commitment: None }).await?;
        Ok(response.into_inner().into())
    }

    async fn subscribe(
        &mut self,
        filter: &AccountFilter,
    ) -> std::result::Result<GrpcSubscription, Status> {
        let (control, requests) = mpsc::channel::<SubscribeRequest>(4);
        control
            .send(SubscribeRequest::from(filter))
            .await
            .map_err(|_| Status::internal("subscription request channel closed"))?;

        let response = self
            .streaming
            .subscribe(Request::new(ReceiverStream::new(requests)))
            .await?;

        Ok(GrpcSubscription {
            updates: response.into_inner(),
            control: Some(control),
        })
    }
}

/// One live subscription channel against a Geyser endpoint.
pub struct GrpcSubscription {
    updates: Streaming<SubscribeUpdate>,
    /// Outbound half of the request stream; dropped on close.
    control: Option<mpsc::Sender<SubscribeRequest>>,
}

#[async_trait]
impl ProbeSubscription for GrpcSubscription {
    async fn message(&mut self) -> std::result::Result<Option<ProbePayload>, Status> {
        let update = self.updates.message().await?;
        Ok(update.map(ProbePayload::from))
    }

    fn close(&mut self) {
        // Dropping the sender half-closes the call from the client side;
        // Option::take makes a second close a no-op.
        if self.control.take().is_some() {
            tracing::debug!("subscription closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_request_timeout() {
        let config = ChannelConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.keepalive_while_idle);
    }

    #[test]
    fn fast_config_fails_faster() {
        let config = ChannelConfig::fast();
        assert!(config.connect_timeout < ChannelConfig::default().connect_timeout);
        assert!(config.request_timeout < ChannelConfig::default().request_timeout);
    }
}
