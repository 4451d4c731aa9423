//! Client error types.

use thiserror::Error;

use crate::connection::AddressError;

/// Result type alias using ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when setting up or using the probe client.
///
/// Probe-level failures (a call that errors, a subscription that times out)
/// are not represented here; those are absorbed into the harness's
/// `Outcome`. This enum covers setup conditions the caller must handle.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Endpoint address was rejected during normalization.
    #[error("Invalid endpoint: {0}")]
    Address(#[from] AddressError),

    /// gRPC transport error (connection failed, TLS error, etc.).
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// gRPC status error (server returned an error).
    #[error("gRPC status error: {0}")]
    RpcStatus(#[from] tonic::Status),
}

impl From<tonic::codegen::http::uri::InvalidUri> for ClientError {
    fn from(err: tonic::codegen::http::uri::InvalidUri) -> Self {
        ClientError::Address(AddressError::InvalidUrl(err.to_string()))
    }
}
