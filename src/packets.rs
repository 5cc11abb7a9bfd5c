//! packets handling module
//! This module includes the Ethernet demultiplexing and the ARP packet format.

// constants
use crate::constants::*;

// byteorder
use byteorder::{ByteOrder, NetworkEndian};

// itertools
use itertools::Itertools;

// std
use std::fmt;
use std::net::Ipv4Addr;

// hardware and protocol address offsets within the ARP payload
const ARP_SHA_POS: usize = 8;
const ARP_SPA_POS: usize = ARP_SHA_POS + ARP_HW_ADDR_LEN;
const ARP_THA_POS: usize = ARP_SPA_POS + ARP_PROTO_ADDR_LEN;
const ARP_TPA_POS: usize = ARP_THA_POS + ARP_HW_ADDR_LEN;

/// ARP Packet Structure
///
/// Decoded IPv4-over-Ethernet ARP message. The address widths are fixed
/// to `ARP_HW_ADDR_LEN` and `ARP_PROTO_ADDR_LEN`, the `hw_addr_len` and
/// `proto_addr_len` fields are only carried, never used to size the reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ARPpkt {
    hardware_type: u16,                            // network link type (0x1=ethernet)
    protocol_type: u16,                            // upper-layer protocol for resolution
    hw_addr_len: u8,                               // length of hardware address (bytes)
    proto_addr_len: u8,                            // upper-layer protocol address length
    opcode: u16,                                   // operation (0x1=request, 0x2=reply)
    sender_hw_addr: [u8; ARP_HW_ADDR_LEN],         // sender hardware address
    sender_proto_addr: [u8; ARP_PROTO_ADDR_LEN],   // internetwork address of sender
    target_hw_addr: [u8; ARP_HW_ADDR_LEN],         // hardware address of target
    target_proto_addr: [u8; ARP_PROTO_ADDR_LEN],   // internetwork address of target
}

// ARPpkt methods
impl ARPpkt {
    // decode() method
    /// Decode an ARP payload (Ethernet header already stripped)
    ///
    /// Returns `None` if the payload is shorter than `ARP_PKT_SIZE`.
    pub fn decode(payload: &[u8]) -> Option<ARPpkt> {
        if payload.len() < ARP_PKT_SIZE {
            return None;
        }

        let mut sender_hw_addr = [0u8; ARP_HW_ADDR_LEN];
        let mut sender_proto_addr = [0u8; ARP_PROTO_ADDR_LEN];
        let mut target_hw_addr = [0u8; ARP_HW_ADDR_LEN];
        let mut target_proto_addr = [0u8; ARP_PROTO_ADDR_LEN];
        sender_hw_addr.copy_from_slice(&payload[ARP_SHA_POS..ARP_SPA_POS]);
        sender_proto_addr.copy_from_slice(&payload[ARP_SPA_POS..ARP_THA_POS]);
        target_hw_addr.copy_from_slice(&payload[ARP_THA_POS..ARP_TPA_POS]);
        target_proto_addr.copy_from_slice(&payload[ARP_TPA_POS..ARP_PKT_SIZE]);

        Some(ARPpkt {
            hardware_type: NetworkEndian::read_u16(&payload[0..2]),
            protocol_type: NetworkEndian::read_u16(&payload[2..4]),
            hw_addr_len: payload[4],
            proto_addr_len: payload[5],
            opcode: NetworkEndian::read_u16(&payload[6..8]),
            sender_hw_addr,
            sender_proto_addr,
            target_hw_addr,
            target_proto_addr,
        })
    }

    // getters
    pub fn hardware_type(&self) -> u16 {
        self.hardware_type
    }
    pub fn protocol_type(&self) -> u16 {
        self.protocol_type
    }
    pub fn hw_addr_len(&self) -> u8 {
        self.hw_addr_len
    }
    pub fn proto_addr_len(&self) -> u8 {
        self.proto_addr_len
    }
    pub fn opcode(&self) -> u16 {
        self.opcode
    }
    pub fn sender_hw_addr(&self) -> &[u8; ARP_HW_ADDR_LEN] {
        &self.sender_hw_addr
    }
    pub fn sender_proto_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.sender_proto_addr)
    }
    pub fn target_hw_addr(&self) -> &[u8; ARP_HW_ADDR_LEN] {
        &self.target_hw_addr
    }
    pub fn target_proto_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.target_proto_addr)
    }
    // is_ipv4_over_ether() method
    // true if the declared sizes match the fixed-width decoding
    pub fn is_ipv4_over_ether(&self) -> bool {
        self.hardware_type == ARP_HW_TYPE
            && self.protocol_type == ETHER_P_IP
            && self.hw_addr_len as usize == ARP_HW_ADDR_LEN
            && self.proto_addr_len as usize == ARP_PROTO_ADDR_LEN
    }
}

// format_mac() function
/// format a hardware address as colon-separated hex
pub fn format_mac(mac: &[u8]) -> String {
    mac.iter().map(|b| format!("{:02x}", b)).join(":")
}

impl fmt::Display for ARPpkt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "htype {:#06x} ptype {:#06x} hlen {} plen {} op {} sha {} spa {} tha {} tpa {}",
            self.hardware_type,
            self.protocol_type,
            self.hw_addr_len,
            self.proto_addr_len,
            self.opcode,
            format_mac(&self.sender_hw_addr),
            self.sender_proto_addr(),
            format_mac(&self.target_hw_addr),
            self.target_proto_addr(),
        )
    }
}

// filter_arp_frame() function
/// Filter ARP frames out of received Ethernet frames
///
/// Returns the ARP payload (Ethernet header stripped) if the frame is long
/// enough to carry an IPv4-over-Ethernet ARP message and its EtherType is ARP.
pub fn filter_arp_frame(frame: &[u8]) -> Option<&[u8]> {
    // ignore frames too short to hold the ethernet header and an ARP payload
    if frame.len() < ETHER_ARP_MIN_FRAME_SIZE {
        return None;
    }

    let ethertype = NetworkEndian::read_u16(&frame[ETHER_TYPE_POS..ETHER_TYPE_POS + 2]);
    if ethertype != ETHER_P_ARP {
        return None;
    }

    Some(&frame[ETHER_FRAME_SIZE..])
}

// Tests
#[cfg(test)]
pub(crate) mod test {
    use super::*;

    // build a 28 bytes ARP payload out of a decoded packet
    pub fn encode_arp(pkt: &ARPpkt) -> [u8; ARP_PKT_SIZE] {
        let mut buf = [0u8; ARP_PKT_SIZE];
        NetworkEndian::write_u16(&mut buf[0..2], pkt.hardware_type);
        NetworkEndian::write_u16(&mut buf[2..4], pkt.protocol_type);
        buf[4] = pkt.hw_addr_len;
        buf[5] = pkt.proto_addr_len;
        NetworkEndian::write_u16(&mut buf[6..8], pkt.opcode);
        buf[ARP_SHA_POS..ARP_SPA_POS].copy_from_slice(&pkt.sender_hw_addr);
        buf[ARP_SPA_POS..ARP_THA_POS].copy_from_slice(&pkt.sender_proto_addr);
        buf[ARP_THA_POS..ARP_TPA_POS].copy_from_slice(&pkt.target_hw_addr);
        buf[ARP_TPA_POS..ARP_PKT_SIZE].copy_from_slice(&pkt.target_proto_addr);
        buf
    }

    // new_arp() helper
    pub fn new_arp(opcode: u16, spa: [u8; 4], tpa: [u8; 4]) -> ARPpkt {
        ARPpkt {
            hardware_type: ARP_HW_TYPE,
            protocol_type: ETHER_P_IP,
            hw_addr_len: ARP_HW_ADDR_LEN as u8,
            proto_addr_len: ARP_PROTO_ADDR_LEN as u8,
            opcode,
            sender_hw_addr: [0x52, 0x54, 0x00, 0x12, 0x34, 0x56],
            sender_proto_addr: spa,
            target_hw_addr: [0; 6],
            target_proto_addr: tpa,
        }
    }

    // build a full ethernet frame, padded to `len` bytes
    pub fn ether_frame(ethertype: u16, payload: &[u8], len: usize) -> Vec<u8> {
        let mut frame = vec![0xffu8; 6];
        frame.extend_from_slice(&[0x52, 0x54, 0x00, 0x12, 0x34, 0x56]);
        frame.extend_from_slice(&ethertype.to_be_bytes());
        frame.extend_from_slice(payload);
        frame.resize(len, 0);
        frame
    }

    #[test]
    fn decode_request_fields() {
        let payload = [
            0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01, // htype, ptype, hlen, plen, op
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, 192, 168, 1, 10, // sha, spa
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 192, 168, 1, 1, // tha, tpa
        ];
        let pkt = ARPpkt::decode(&payload).unwrap();
        assert_eq!(pkt.hardware_type(), 1);
        assert_eq!(pkt.protocol_type(), 0x0800);
        assert_eq!(pkt.hw_addr_len(), 6);
        assert_eq!(pkt.proto_addr_len(), 4);
        assert_eq!(pkt.opcode(), ARP_OP_REQUEST);
        assert_eq!(pkt.sender_hw_addr(), &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(pkt.sender_proto_addr(), Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(pkt.target_hw_addr(), &[0u8; 6]);
        assert_eq!(pkt.target_proto_addr(), Ipv4Addr::new(192, 168, 1, 1));
        assert!(pkt.is_ipv4_over_ether());
    }

    #[test]
    fn decode_big_endian_opcode() {
        let mut payload = encode_arp(&new_arp(0, [10, 0, 0, 1], [10, 0, 0, 2]));
        payload[6] = 0x03;
        payload[7] = 0xe7;
        assert_eq!(ARPpkt::decode(&payload).unwrap().opcode(), 999);
    }

    #[test]
    fn decode_is_idempotent() {
        let payload = encode_arp(&new_arp(ARP_OP_REPLY, [10, 1, 2, 3], [10, 3, 2, 1]));
        assert_eq!(ARPpkt::decode(&payload), ARPpkt::decode(&payload));
    }

    #[test]
    fn encode_then_decode_reproduces_packet() {
        let pkt = new_arp(ARP_OP_REQUEST, [172, 16, 0, 254], [172, 16, 0, 1]);
        assert_eq!(ARPpkt::decode(&encode_arp(&pkt)), Some(pkt));
    }

    #[test]
    fn decode_ignores_declared_sizes() {
        let mut pkt = new_arp(ARP_OP_REQUEST, [1, 2, 3, 4], [5, 6, 7, 8]);
        pkt.hw_addr_len = 8;
        pkt.proto_addr_len = 16;
        let decoded = ARPpkt::decode(&encode_arp(&pkt)).unwrap();
        assert_eq!(decoded.sender_proto_addr(), Ipv4Addr::new(1, 2, 3, 4));
        assert_eq!(decoded.target_proto_addr(), Ipv4Addr::new(5, 6, 7, 8));
        assert!(!decoded.is_ipv4_over_ether());
    }

    #[test]
    fn decode_rejects_short_payload() {
        assert_eq!(ARPpkt::decode(&[0u8; ARP_PKT_SIZE - 1]), None);
    }

    #[test]
    fn filter_drops_short_frames() {
        let payload = encode_arp(&new_arp(ARP_OP_REQUEST, [1, 1, 1, 1], [2, 2, 2, 2]));
        for len in 0..ETHER_ARP_MIN_FRAME_SIZE {
            let frame = ether_frame(ETHER_P_ARP, &payload, len);
            assert_eq!(filter_arp_frame(&frame), None, "length {}", len);
        }
    }

    #[test]
    fn filter_drops_other_ethertypes() {
        let payload = encode_arp(&new_arp(ARP_OP_REQUEST, [1, 1, 1, 1], [2, 2, 2, 2]));
        for ethertype in &[ETHER_P_IP, 0x86dd, 0x8100, 0x0000, 0x0608] {
            let frame = ether_frame(*ethertype, &payload, 60);
            assert_eq!(filter_arp_frame(&frame), None);
        }
    }

    #[test]
    fn filter_strips_ethernet_header() {
        let payload = encode_arp(&new_arp(ARP_OP_REPLY, [1, 1, 1, 1], [2, 2, 2, 2]));
        let frame = ether_frame(ETHER_P_ARP, &payload, 60);
        let arp = filter_arp_frame(&frame).unwrap();
        assert_eq!(arp.len(), 60 - ETHER_FRAME_SIZE);
        assert_eq!(&arp[..ARP_PKT_SIZE], &payload[..]);
    }

    #[test]
    fn mac_formatting() {
        assert_eq!(
            format_mac(&[0x00, 0x1b, 0x21, 0xaa, 0x0f, 0xff]),
            "00:1b:21:aa:0f:ff"
        );
    }
}
