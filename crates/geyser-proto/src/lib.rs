//! Protocol buffer definitions and conversions for geyser-probe.
//!
//! This crate contains:
//! - Generated protobuf types from `proto/geyser.proto`
//! - Conversions between wire types and `geyser-harness` domain types
//!
//! The proto types are kept separate from domain types so the probe
//! harness never touches generated code and stays testable with a mock
//! target.

#![allow(missing_docs)] // Generated code doesn't have docs

pub mod convert;

/// Generated Geyser protocol buffer types.
pub mod geyser {
    tonic::include_proto!("geyser");
}

// Re-export commonly used types at crate root
pub use geyser::*;
