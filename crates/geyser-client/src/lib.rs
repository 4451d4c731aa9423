//! gRPC client library for probing Yellowstone Geyser endpoints.
//!
//! This crate owns everything between the probe harness and the wire:
//! endpoint address normalization, channel configuration, and the
//! [`GeyserProbeClient`] that implements the harness's `ProbeTarget` seam.

pub mod client;
pub mod connection;
pub mod error;

pub use client::{ChannelConfig, GeyserProbeClient, GrpcSubscription};
pub use connection::{resolve_address, AddressSource, EndpointAddress};
pub use error::{ClientError, Result};
