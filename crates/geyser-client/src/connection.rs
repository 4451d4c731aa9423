//! Endpoint address configuration and URL normalization.
//!
//! Addresses are resolved in this order (highest priority first):
//! 1. `--endpoint` CLI flag
//! 2. `GEYSER_ENDPOINT` environment variable
//! 3. Default: `http://127.0.0.1:10000`
//!
//! The [`normalize_url`] function handles common input formats:
//! - Bare host:port (e.g., `203.0.113.7:10000` → `http://203.0.113.7:10000`)
//! - Missing port (e.g., `http://localhost` → `http://localhost:10000`)
//! - IPv6 addresses (e.g., `[::1]:10000` → `http://[::1]:10000`)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Default gRPC port for a Geyser endpoint.
pub const DEFAULT_GRPC_PORT: u16 = 10000;

/// Default endpoint when no configuration is provided.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:10000";

/// Environment variable consulted when no flag is given.
pub const ENDPOINT_ENV_VAR: &str = "GEYSER_ENDPOINT";

/// Source of the endpoint address configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSource {
    /// Hardcoded default (`http://127.0.0.1:10000`)
    Default,
    /// Loaded from the `GEYSER_ENDPOINT` environment variable
    Environment,
    /// Passed on the command line
    Flag,
}

impl AddressSource {
    /// Returns a short label for the connection log line.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Environment => "env",
            Self::Flag => "flag",
        }
    }
}

impl fmt::Display for AddressSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "Default"),
            Self::Environment => write!(f, "Environment (GEYSER_ENDPOINT)"),
            Self::Flag => write!(f, "Command line"),
        }
    }
}

/// URL validation error with user-friendly messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Input was empty or whitespace-only.
    #[error("Address cannot be empty")]
    EmptyInput,
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// No host was found in the URL.
    #[error("URL must include a host")]
    MissingHost,
    /// Port could not be set (should not happen with valid hosts).
    #[error("Invalid port: {0}")]
    InvalidPort(String),
    /// Unsupported URL scheme (only http/https allowed).
    #[error("Unsupported scheme '{0}' (use http or https)")]
    UnsupportedScheme(String),
}

/// Validated endpoint address with metadata.
///
/// Holds a normalized URL that is valid for the gRPC client, plus the
/// source of the address for the connection log line.
#[derive(Debug, Clone)]
pub struct EndpointAddress {
    /// The normalized URL (always has scheme and port)
    url: String,
    /// Where this address came from
    source: AddressSource,
    /// Original input string (for display/debugging)
    original: String,
}

impl EndpointAddress {
    /// Parse and normalize an endpoint URL.
    pub fn parse(input: &str, source: AddressSource) -> Result<Self, AddressError> {
        let normalized = normalize_url(input)?;
        Ok(Self {
            url: normalized.to_string(),
            source,
            original: input.to_string(),
        })
    }

    /// Returns the normalized URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Returns where this address came from.
    #[must_use]
    pub fn source(&self) -> AddressSource {
        self.source
    }

    /// Returns the original input string before normalization.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns `true` if this address uses TLS (https scheme).
    #[must_use]
    pub fn is_tls(&self) -> bool {
        self.url.starts_with("https://")
    }
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl FromStr for EndpointAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, AddressSource::Flag)
    }
}

impl Default for EndpointAddress {
    fn default() -> Self {
        Self {
            url: format!("{DEFAULT_ENDPOINT_URL}/"),
            source: AddressSource::Default,
            original: DEFAULT_ENDPOINT_URL.to_string(),
        }
    }
}

/// Normalize an endpoint URL string.
///
/// - Adds `http://` scheme if missing
/// - Adds the default port (10000) if missing
/// - Trims whitespace
pub fn normalize_url(input: &str) -> Result<Url, AddressError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(AddressError::EmptyInput);
    }

    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("http://{input}")
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| AddressError::InvalidUrl(e.to_string()))?;

    let scheme = url.scheme().to_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(AddressError::UnsupportedScheme(scheme));
    }

    if url.host().is_none() {
        return Err(AddressError::MissingHost);
    }

    if url.port().is_none() {
        url.set_port(Some(DEFAULT_GRPC_PORT))
            .map_err(|()| AddressError::InvalidPort("Cannot set port on this URL".to_string()))?;
    }

    Ok(url)
}

/// Resolve the endpoint address from flag, environment, or default.
///
/// An invalid flag or environment value is a setup error and is reported
/// rather than silently skipped.
pub fn resolve_address(flag: Option<&str>) -> Result<EndpointAddress, AddressError> {
    if let Some(input) = flag {
        return EndpointAddress::parse(input, AddressSource::Flag);
    }

    if let Ok(env_url) = std::env::var(ENDPOINT_ENV_VAR) {
        return EndpointAddress::parse(&env_url, AddressSource::Environment);
    }

    Ok(EndpointAddress::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bare_host_port() {
        let url = normalize_url("127.0.0.1:10000").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:10000/");
    }

    #[test]
    fn normalize_with_http_scheme() {
        let url = normalize_url("http://localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn normalize_with_https_scheme() {
        // With explicit non-default port
        let url = normalize_url("https://grpc.example.com:443").unwrap();
        assert_eq!(url.as_str(), "https://grpc.example.com:443/");

        // Without port - defaults to 10000 (Geyser default, not HTTPS default)
        let url = normalize_url("https://grpc.example.com").unwrap();
        assert_eq!(url.as_str(), "https://grpc.example.com:10000/");
    }

    #[test]
    fn normalize_adds_default_port() {
        let url = normalize_url("http://localhost").unwrap();
        assert_eq!(url.as_str(), "http://localhost:10000/");
    }

    #[test]
    fn normalize_ipv6() {
        let url = normalize_url("[::1]:8080").unwrap();
        assert_eq!(url.as_str(), "http://[::1]:8080/");
    }

    #[test]
    fn normalize_trims_whitespace() {
        let url = normalize_url("  localhost:9000  ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/");
    }

    #[test]
    fn normalize_empty_input() {
        assert_eq!(normalize_url("").unwrap_err(), AddressError::EmptyInput);
        assert_eq!(normalize_url("   ").unwrap_err(), AddressError::EmptyInput);
    }

    #[test]
    fn normalize_unsupported_scheme() {
        let err = normalize_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, AddressError::UnsupportedScheme(_)));
    }

    #[test]
    fn endpoint_address_parse() {
        let addr = EndpointAddress::parse("203.0.113.7:10000", AddressSource::Flag).unwrap();
        assert_eq!(addr.as_str(), "http://203.0.113.7:10000/");
        assert_eq!(addr.source(), AddressSource::Flag);
        assert_eq!(addr.original(), "203.0.113.7:10000");
        assert!(!addr.is_tls());
    }

    #[test]
    fn endpoint_address_tls() {
        let addr =
            EndpointAddress::parse("https://grpc.example.com", AddressSource::Environment).unwrap();
        assert!(addr.is_tls());
    }

    #[test]
    fn endpoint_address_default() {
        let addr = EndpointAddress::default();
        assert_eq!(addr.as_str(), "http://127.0.0.1:10000/");
        assert_eq!(addr.source(), AddressSource::Default);
    }

    #[test]
    fn address_source_labels() {
        assert_eq!(AddressSource::Default.label(), "default");
        assert_eq!(AddressSource::Environment.label(), "env");
        assert_eq!(AddressSource::Flag.label(), "flag");
    }

    #[test]
    fn resolve_address_precedence() {
        // Single test so the env var mutation cannot race a parallel test.
        std::env::remove_var(ENDPOINT_ENV_VAR);
        let addr = resolve_address(None).unwrap();
        assert_eq!(addr.source(), AddressSource::Default);

        std::env::set_var(ENDPOINT_ENV_VAR, "http://env.local:8888");
        let addr = resolve_address(None).unwrap();
        assert_eq!(addr.as_str(), "http://env.local:8888/");
        assert_eq!(addr.source(), AddressSource::Environment);

        let addr = resolve_address(Some("flag.local:7777")).unwrap();
        assert_eq!(addr.as_str(), "http://flag.local:7777/");
        assert_eq!(addr.source(), AddressSource::Flag);
        std::env::remove_var(ENDPOINT_ENV_VAR);
    }

    #[test]
    fn resolve_address_invalid_flag_is_an_error() {
        assert!(resolve_address(Some("ftp://bad")).is_err());
    }

    #[test]
    fn address_error_display() {
        assert_eq!(
            AddressError::EmptyInput.to_string(),
            "Address cannot be empty"
        );
        assert!(AddressError::UnsupportedScheme("ftp".to_string())
            .to_string()
            .contains("ftp"));
    }
}
