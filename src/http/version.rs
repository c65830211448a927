//! Protocol version detection.
//!
//! # Design Decisions
//! - A response without an explicit version asks its detector lazily
//! - The default detector follows the CGI `SERVER_PROTOCOL` variable
//! - Only "1.0" and "1.1" are produced; anything unknown falls back to "1.0"

use axum::http::Version;

pub const VERSION_10: &str = "1.0";
pub const VERSION_11: &str = "1.1";

/// Environment variable consulted by [`EnvVersionDetector`].
pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";

/// Source of the protocol version used when none was set explicitly.
pub trait VersionDetector: Send + Sync + std::fmt::Debug {
    fn detect(&self) -> String;
}

/// Reads `SERVER_PROTOCOL`; "HTTP/1.1" yields "1.1", everything else "1.0".
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvVersionDetector;

impl VersionDetector for EnvVersionDetector {
    fn detect(&self) -> String {
        match std::env::var(SERVER_PROTOCOL) {
            Ok(protocol) if protocol == "HTTP/1.1" => VERSION_11.to_string(),
            _ => VERSION_10.to_string(),
        }
    }
}

/// Always yields the configured version.
#[derive(Debug, Clone)]
pub struct FixedVersion(String);

impl FixedVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl VersionDetector for FixedVersion {
    fn detect(&self) -> String {
        self.0.clone()
    }
}

/// Mirrors the version of the request being answered.
#[derive(Debug, Clone, Copy)]
pub struct RequestVersion(pub Version);

impl VersionDetector for RequestVersion {
    fn detect(&self) -> String {
        if self.0 == Version::HTTP_10 {
            VERSION_10.to_string()
        } else {
            VERSION_11.to_string()
        }
    }
}

/// Returns true for versions the response can render.
pub fn is_supported(version: &str) -> bool {
    matches!(version, VERSION_10 | VERSION_11)
}
