//! error handling module
//! This module defines the library error type.

// thiserror
use thiserror::Error;

// std
use std::io;

/// Result type alias for arpsnoop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Library Error Type
///
/// Every variant is fatal at initialization time. Receive failures in the
/// capture loop are plain `io::Error`s and never escalate to this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Raw socket creation failed (usually missing CAP_NET_RAW)
    #[error("cannot open raw socket: {0}")]
    Socket(#[source] io::Error),

    /// Interface name does not resolve to a live interface
    #[error("cannot resolve interface '{name}': {source}")]
    Interface { name: String, source: io::Error },

    /// bind(2) on the interface index was rejected
    #[error("cannot bind raw socket to interface '{name}' (ifindex {ifindex}): {source}")]
    Bind {
        name: String,
        ifindex: i32,
        source: io::Error,
    },

    /// setsockopt(2) failed
    #[error("cannot set socket option {option}: {source}")]
    SockOpt {
        option: &'static str,
        source: io::Error,
    },

    /// Configuration file cannot be read
    #[error("cannot read configuration file '{path}': {source}")]
    ConfigRead { path: String, source: io::Error },

    /// Configuration file cannot be parsed
    #[error("cannot parse configuration file '{path}': {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
}
