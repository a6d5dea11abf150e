//! Error types for the Lantern browser core.

use std::io;

/// Errors produced by the Lantern pipeline.
///
/// Only network and protocol faults are representable here: URL parsing,
/// HTML parsing, and rendering all degrade to best-effort results instead
/// of failing. An HTTP status >= 400 is not an error either -- the response
/// is still delivered to the caller.
#[derive(Debug, thiserror::Error)]
pub enum LanternError {
    #[error("DNS failure: {0}")]
    Dns(String),

    #[error("connect failure: {0}")]
    Connect(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LanternError>;
