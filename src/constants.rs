//! Constants module
//! This module regroups all the program's and protocols constants.

// Program Constants
pub const ARPSNOOP_NAME: &str = env!("CARGO_PKG_NAME");
pub const ARPSNOOP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ARPSNOOP_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const ARPSNOOP_COPYRIGHT_BLOCK: &str = r"
License GPLv3+: GNU GPL Version 3 or any later version <https://www.gnu.org/licenses/gpl-3.0.txt>.
This program comes with ABSOLUTELY NO WARRANTY. This is free software,
and you are welcome to redistribute it under certain conditions.";
pub const ARPSNOOP_DFLT_IFACE: &str = "eth0";
pub const ARPSNOOP_DFLT_DATE_FORMAT: &str = "%b %e %Y %T";
pub const ARPSNOOP_PKT_TIME_FORMAT: &str = "%H:%M:%S%.6f";

// Debug Constants
pub const DEBUG_LEVEL_INFO: u8 = 0;
pub const DEBUG_LEVEL_LOW: u8 = 1;
pub const DEBUG_LEVEL_MEDIUM: u8 = 2;
pub const DEBUG_LEVEL_HIGH: u8 = 3;
pub const DEBUG_LEVEL_EXTENSIVE: u8 = 5;
pub const DEBUG_SRC_MAIN: &str = "main";
pub const DEBUG_SRC_CONFIG: &str = "config";
pub const DEBUG_SRC_SOCKET: &str = "socket";
pub const DEBUG_SRC_PACKET: &str = "packet";
pub const DEBUG_SRC_ARP: &str = "arp";
pub const DEBUG_SRC_REPORT: &str = "report";

// Socket Constants
pub const SOCKET_RECV_TIMEOUT_SECS: i64 = 1; // wakes the capture loop to poll the shutdown flag

// Ethernet Constants
pub const ETHER_P_ALL: u16 = 0x0003; // every protocol (/usr/include/linux/if_ether.h)
pub const ETHER_P_IP: u16 = 0x0800;
pub const ETHER_P_ARP: u16 = 0x0806;
pub const ETHER_FRAME_SIZE: usize = 14;
pub const ETHER_TYPE_POS: usize = 12;
pub const ETHER_MAX_FRAME_SIZE: usize = 1500;

// ARP Constants (IPv4 over Ethernet only)
pub const ARP_HW_TYPE: u16 = 1; // ethernet
pub const ARP_HW_ADDR_LEN: usize = 6;
pub const ARP_PROTO_ADDR_LEN: usize = 4;
pub const ARP_PKT_SIZE: usize = 8 + 2 * ARP_HW_ADDR_LEN + 2 * ARP_PROTO_ADDR_LEN;
pub const ARP_OP_REQUEST: u16 = 1;
pub const ARP_OP_REPLY: u16 = 2;
pub const ETHER_ARP_MIN_FRAME_SIZE: usize = ETHER_FRAME_SIZE + ARP_PKT_SIZE;
