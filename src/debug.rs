//! debugging module
//! This module provides the diagnostic output functions.
//! Diagnostics are written to the standard error stream, standard output
//! only carries the ARP lines.
use crate::constants::*;

// chrono
use chrono::{DateTime, Local, Utc};

// Verbose Structure
#[derive(Debug, Clone, Copy)]
pub struct Verbose {
    level: u8,
    time_zone: u8,
    time_format: u8,
}

// Debug type implementation
impl Verbose {
    // new() method
    pub fn new(level: u8, time_zone: u8, time_format: u8) -> Verbose {
        Verbose {
            level,
            time_zone,
            time_format,
        }
    }
    // level() getter
    pub fn level(&self) -> u8 {
        self.level
    }
    // time_zone() getter
    pub fn time_zone(&self) -> u8 {
        self.time_zone
    }
    // enabled() method
    pub fn enabled(&self, msg_level: u8) -> bool {
        self.level >= msg_level
    }
}

// format_debug() function
fn format_debug(debug: &Verbose, src: &str, msg: &str) -> String {
    let date = match debug.time_zone {
        // UTC
        1 => {
            let now: DateTime<Utc> = Utc::now();
            match debug.time_format {
                1 => now.to_rfc2822(),
                _ => now.format(ARPSNOOP_DFLT_DATE_FORMAT).to_string(),
            }
        }
        // local
        _ => {
            let now: DateTime<Local> = Local::now();
            match debug.time_format {
                1 => now.to_rfc2822(),
                _ => now.format(ARPSNOOP_DFLT_DATE_FORMAT).to_string(),
            }
        }
    };
    format!("[{}] {}: {}", date, src, msg)
}

// print_debug() function
/// This function simply print debugging information according to the specified level
pub fn print_debug(debug: &Verbose, msg_level: u8, src: &str, msg: String) {
    if debug.enabled(msg_level) {
        eprintln!("{}", format_debug(debug, src, &msg));
    }
}
