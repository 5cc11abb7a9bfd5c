//! reporting module
//! This module renders decoded ARP packets as tcpdump-like text lines.
use crate::constants::*;
use crate::packets::ARPpkt;

// chrono
use chrono::{DateTime, TimeZone};

// std
use std::borrow::Cow;
use std::fmt::Display;
use std::io::{self, Write};

// arp_op_text() function
/// Textual ARP operation
pub fn arp_op_text(opcode: u16) -> Cow<'static, str> {
    match opcode {
        ARP_OP_REQUEST => Cow::Borrowed("Request who-has"),
        ARP_OP_REPLY => Cow::Borrowed("Reply"),
        op => Cow::Owned(format!("Unknown operation ({})", op)),
    }
}

// format_arp_pkt() function
/// Format an ARP packet, without the timestamp prefix
///
/// `length` is the received frame length minus the Ethernet header.
pub fn format_arp_pkt(arp_pkt: &ARPpkt, length: usize) -> String {
    format!(
        "ARP, {} {} tell {}, length {}",
        arp_op_text(arp_pkt.opcode()),
        arp_pkt.target_proto_addr(),
        arp_pkt.sender_proto_addr(),
        length
    )
}

// format_timestamp() function
/// HH:MM:SS.ssssss
pub fn format_timestamp<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.format(ARPSNOOP_PKT_TIME_FORMAT).to_string()
}

// report_arp_pkt() function
/// Write one ARP line to the given output
pub fn report_arp_pkt<W, Tz>(
    out: &mut W,
    ts: &DateTime<Tz>,
    arp_pkt: &ARPpkt,
    length: usize,
) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(
        out,
        "{} {}",
        format_timestamp(ts),
        format_arp_pkt(arp_pkt, length)
    )
}
