//! configuration file handling module
//! This module provides structure and methods related to configuration file handling.
use crate::constants::*;
use crate::error::{Error, Result};

// serde
use serde_derive::Deserialize;

/// Main Configuration Structure
///
/// Every key is optional, command-line options take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CConfig {
    pub interface: Option<String>,
    pub promiscuous: Option<bool>,
    pub debug: Option<u8>,
    pub time_zone: Option<String>,
    pub time_format: Option<String>,
}

impl CConfig {
    // interface() getter
    pub fn interface(&self) -> String {
        match &self.interface {
            Some(s) => s.clone(),
            None => ARPSNOOP_DFLT_IFACE.to_string(),
        }
    }
    // promiscuous() getter
    pub fn promiscuous(&self) -> bool {
        self.promiscuous.unwrap_or(false)
    }
    // debug() getter
    pub fn debug(&self) -> u8 {
        match self.debug {
            Some(v) => v,
            None => DEBUG_LEVEL_INFO,
        }
    }
    // time_zone() getter
    pub fn time_zone(&self) -> Result<u8> {
        match self.time_zone.as_deref() {
            None | Some("local") => Ok(0),
            Some("utc") => Ok(1),
            Some(s) => Err(Error::Config(format!(
                "time_zone must be 'local' or 'utc', got '{}'",
                s
            ))),
        }
    }
    // time_format() getter
    pub fn time_format(&self) -> Result<u8> {
        match self.time_format.as_deref() {
            None | Some("short") => Ok(0),
            Some("rfc2822") => Ok(1),
            Some(s) => Err(Error::Config(format!(
                "time_format must be 'short' or 'rfc2822', got '{}'",
                s
            ))),
        }
    }
}

// parse_config() function
/// decode configuration from a TOML string
pub fn parse_config(path: &str, content: &str) -> Result<CConfig> {
    toml::from_str(content).map_err(|source| Error::ConfigParse {
        path: path.to_string(),
        source,
    })
}

// decode_config() function
/// read and decode configuration file
pub fn decode_config(path: &str) -> Result<CConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_string(),
        source,
    })?;
    parse_config(path, &content)
}
