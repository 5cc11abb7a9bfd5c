//! # arpsnoop library
//!
//! Passive ARP monitor: captures every frame on one interface through an
//! AF_PACKET socket, keeps the ARP ones and prints one line per packet.

// generic constants
pub mod constants;
use constants::*;

// error type
pub mod error;
pub use error::{Error, Result};

// ARP and ethernet data structures
pub mod packets;
use packets::{filter_arp_frame, ARPpkt};

// output lines
pub mod report;
use report::report_arp_pkt;

// config
pub mod config;
use config::{decode_config, CConfig};

// debug
pub mod debug;
use debug::{print_debug, Verbose};

// operating systems support
mod os;
pub use os::linux::socket::RawSocket;

// chrono
use chrono::{Local, Utc};

// std
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Library Config Structure
///
/// Includes the command-line parameters, which take precedence over the
/// configuration file.
#[derive(Debug, Default)]
pub struct Config {
    iface: Option<String>,
    conf: Option<String>,
    debug: Option<u8>,
    promisc: bool,
}

// Config Implementation
impl Config {
    // new() method
    pub fn new(
        iface: Option<String>,
        conf: Option<String>,
        debug: Option<u8>,
        promisc: bool,
    ) -> Config {
        Config {
            iface,
            conf,
            debug,
            promisc,
        }
    }
    // iface() getter
    pub fn iface(&self) -> Option<&str> {
        self.iface.as_deref()
    }
    // conf() getter
    pub fn conf(&self) -> Option<&str> {
        self.conf.as_deref()
    }
    // debug() getter
    pub fn debug(&self) -> Option<u8> {
        self.debug
    }
    // promisc() getter
    pub fn promisc(&self) -> bool {
        self.promisc
    }
}

/// Frame Source Trait
///
/// Anything able to hand out raw link-layer frames, one per call.
pub trait FrameSource {
    /// Block until a frame is received and copy it into `buf`
    ///
    /// Frames longer than `buf` are truncated. `WouldBlock` and `TimedOut`
    /// errors mean no frame arrived in time.
    fn recv_frame(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Capture Statistics Structure
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CaptureStats {
    pub received: u64,
    pub reported: u64,
    pub dropped: u64,
    pub errors: u64,
}

impl fmt::Display for CaptureStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} packets received, {} ARP packets captured, {} packets dropped, {} receive errors",
            self.received, self.reported, self.dropped, self.errors
        )
    }
}

// is_recv_timeout() function
fn is_recv_timeout(e: &io::Error) -> bool {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => true,
        _ => false,
    }
}

// interrupt_debug_level() function
// EINTR from the shutdown handler is expected, any other one is shown
fn interrupt_debug_level(shutting_down: bool) -> u8 {
    if shutting_down {
        DEBUG_LEVEL_LOW
    } else {
        DEBUG_LEVEL_INFO
    }
}

// report_now() function
// stamp the line with the configured time zone
fn report_now<W: Write>(
    out: &mut W,
    debug: &Verbose,
    arp_pkt: &ARPpkt,
    length: usize,
) -> io::Result<()> {
    match debug.time_zone() {
        1 => report_arp_pkt(out, &Utc::now(), arp_pkt, length),
        _ => report_arp_pkt(out, &Local::now(), arp_pkt, length),
    }
}

// handle_frame() function
/// Demultiplex, decode and report a single received frame
fn handle_frame<W: Write>(out: &mut W, frame: &[u8], debug: &Verbose, stats: &mut CaptureStats) {
    let payload = match filter_arp_frame(frame) {
        Some(p) => p,
        None => {
            stats.dropped += 1;
            print_debug(
                debug,
                DEBUG_LEVEL_EXTENSIVE,
                DEBUG_SRC_PACKET,
                format!("dropping non-ARP frame of {} bytes", frame.len()),
            );
            return;
        }
    };

    // the length was checked by filter_arp_frame()
    let arp_pkt = match ARPpkt::decode(payload) {
        Some(p) => p,
        None => {
            stats.dropped += 1;
            return;
        }
    };

    print_debug(
        debug,
        DEBUG_LEVEL_EXTENSIVE,
        DEBUG_SRC_ARP,
        format!("decoded {}", arp_pkt),
    );
    if !arp_pkt.is_ipv4_over_ether() {
        print_debug(
            debug,
            DEBUG_LEVEL_HIGH,
            DEBUG_SRC_ARP,
            format!(
                "htype {:#06x} ptype {:#06x} hlen {} plen {} decoded as IPv4/Ethernet",
                arp_pkt.hardware_type(),
                arp_pkt.protocol_type(),
                arp_pkt.hw_addr_len(),
                arp_pkt.proto_addr_len()
            ),
        );
    }

    // reported length excludes the ethernet header
    if let Err(e) = report_now(out, debug, &arp_pkt, frame.len() - ETHER_FRAME_SIZE) {
        print_debug(
            debug,
            DEBUG_LEVEL_INFO,
            DEBUG_SRC_REPORT,
            format!("cannot write ARP packet: {}", e),
        );
        return;
    }
    stats.reported += 1;
}

// capture_loop() function
/// Receive, filter, decode and report frames until `shutdown` is set
///
/// Receive errors are logged and the loop carries on.
pub fn capture_loop<S, W>(
    source: &mut S,
    out: &mut W,
    debug: &Verbose,
    shutdown: &AtomicBool,
) -> CaptureStats
where
    S: FrameSource,
    W: Write,
{
    let mut stats = CaptureStats::default();
    let mut pkt_buf = [0u8; ETHER_MAX_FRAME_SIZE];

    loop {
        // check if global shutdown variable is set
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        // Block on receiving frames
        let len = match source.recv_frame(&mut pkt_buf) {
            Ok(len) => len,
            Err(ref e) if is_recv_timeout(e) => continue,
            // a signal landed during recv(2), the shutdown flag decides
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {
                print_debug(
                    debug,
                    interrupt_debug_level(shutdown.load(Ordering::Relaxed)),
                    DEBUG_SRC_SOCKET,
                    "recv interrupted by signal".to_string(),
                );
                continue;
            }
            Err(e) => {
                stats.errors += 1;
                print_debug(
                    debug,
                    DEBUG_LEVEL_INFO,
                    DEBUG_SRC_SOCKET,
                    format!("recv error: {}", e),
                );
                continue;
            }
        };

        stats.received += 1;
        handle_frame(out, &pkt_buf[..len], debug, &mut stats);
    }

    stats
}

// sniff_arp_pkts() function
/// Listen for ARP packets
///
/// Library entry point. Returns once `shutdown` is set, fails only during
/// initialization.
pub fn sniff_arp_pkts(cfg: &Config, shutdown: Arc<AtomicBool>) -> Result<CaptureStats> {
    // read configuration file (if any)
    let config = match cfg.conf() {
        Some(path) => decode_config(path)?,
        None => CConfig::default(),
    };

    // command-line parameters first, then configuration file
    let iface = match cfg.iface() {
        Some(i) => i.to_string(),
        None => config.interface(),
    };
    let debug_level = match cfg.debug() {
        Some(v) => v,
        None => config.debug(),
    };
    let promisc = cfg.promisc() || config.promiscuous();
    let debug = Verbose::new(debug_level, config.time_zone()?, config.time_format()?);

    print_debug(
        &debug,
        DEBUG_LEVEL_MEDIUM,
        DEBUG_SRC_CONFIG,
        format!(
            "interface {}, promiscuous {}, debug level {}",
            iface,
            promisc,
            debug.level()
        ),
    );

    // open raw socket
    let mut sock = RawSocket::open(&iface)?;
    print_debug(
        &debug,
        DEBUG_LEVEL_LOW,
        DEBUG_SRC_SOCKET,
        format!(
            "raw socket bound to {} (ifindex {})",
            sock.ifname(),
            sock.ifindex()
        ),
    );
    if promisc {
        sock.set_promiscuous()?;
        print_debug(
            &debug,
            DEBUG_LEVEL_LOW,
            DEBUG_SRC_SOCKET,
            format!("promiscuous reception enabled on {}", sock.ifname()),
        );
    }

    print_debug(
        &debug,
        DEBUG_LEVEL_INFO,
        DEBUG_SRC_MAIN,
        format!("listening for ARP packets on {}", iface),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = capture_loop(&mut sock, &mut out, &debug, &shutdown);

    Ok(stats)
}
