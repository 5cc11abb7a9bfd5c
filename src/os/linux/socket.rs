//! Linux packet socket module
//! This module wraps the AF_PACKET raw socket used to capture frames.
use crate::constants::*;
use crate::error::{Error, Result};
use crate::os::linux::libc::c_ifnametoindex;
use crate::FrameSource;

// libc
use libc::{
    bind, c_int, c_void, close, recv, setsockopt, sockaddr, sockaddr_ll, socket, socklen_t,
    timeval, AF_PACKET, PACKET_ADD_MEMBERSHIP, PACKET_MR_PROMISC, SOCK_RAW, SOL_PACKET,
    SOL_SOCKET, SO_RCVTIMEO,
};

// std
use std::io;
use std::mem;

/// packet_mreq Structure (man 7 packet)
#[allow(non_camel_case_types)]
#[repr(C)]
struct packet_mreq {
    mr_ifindex: c_int,
    mr_type: u16,
    mr_alen: u16,
    mr_address: [u8; 8],
}

/// Raw Socket Structure
///
/// AF_PACKET socket receiving every protocol on a single interface.
/// The file descriptor is closed on drop.
#[derive(Debug)]
pub struct RawSocket {
    fd: c_int,
    ifname: String,
    ifindex: i32,
}

impl RawSocket {
    // open() method
    /// Open a raw socket and bind it to the interface index of `ifname`
    pub fn open(ifname: &str) -> Result<RawSocket> {
        // resolve the interface first, bind(2) only takes an index
        let ifindex = c_ifnametoindex(ifname).map_err(|source| Error::Interface {
            name: ifname.to_string(),
            source,
        })? as i32;

        // man 2 socket
        // returns a file descriptor or -1 if error.
        let fd = match unsafe { socket(AF_PACKET, SOCK_RAW, ETHER_P_ALL.to_be() as c_int) } {
            -1 => return Err(Error::Socket(io::Error::last_os_error())),
            fd => fd,
        };

        // from now on the descriptor is released by Drop, even on error
        let sock = RawSocket {
            fd,
            ifname: ifname.to_string(),
            ifindex,
        };
        sock.bind()?;
        sock.set_recv_timeout(SOCKET_RECV_TIMEOUT_SECS)?;

        Ok(sock)
    }

    // bind() method
    fn bind(&self) -> Result<()> {
        // sockaddr_ll (man 7 packet)
        let mut sa: sockaddr_ll = unsafe { mem::zeroed() };
        sa.sll_family = AF_PACKET as u16;
        sa.sll_protocol = ETHER_P_ALL.to_be();
        sa.sll_ifindex = self.ifindex;

        let res = unsafe {
            bind(
                self.fd,
                &sa as *const sockaddr_ll as *const sockaddr,
                mem::size_of::<sockaddr_ll>() as socklen_t,
            )
        };
        if res == -1 {
            return Err(Error::Bind {
                name: self.ifname.clone(),
                ifindex: self.ifindex,
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }

    // set_recv_timeout() method
    // recv(2) returns EAGAIN once the timeout expires
    fn set_recv_timeout(&self, secs: i64) -> Result<()> {
        let tv = timeval {
            tv_sec: secs as libc::time_t,
            tv_usec: 0,
        };
        self.setsockopt(SOL_SOCKET, SO_RCVTIMEO, "SO_RCVTIMEO", &tv)
    }

    // set_promiscuous() method
    /// Request promiscuous reception on the bound interface
    ///
    /// The membership belongs to the socket, the kernel drops it when the
    /// socket is closed. Interface flags are left untouched.
    pub fn set_promiscuous(&self) -> Result<()> {
        let mreq = packet_mreq {
            mr_ifindex: self.ifindex,
            mr_type: PACKET_MR_PROMISC as u16,
            mr_alen: 0,
            mr_address: [0; 8],
        };
        self.setsockopt(
            SOL_PACKET,
            PACKET_ADD_MEMBERSHIP,
            "PACKET_ADD_MEMBERSHIP",
            &mreq,
        )
    }

    // setsockopt() method
    fn setsockopt<T>(
        &self,
        level: c_int,
        name: c_int,
        option: &'static str,
        value: &T,
    ) -> Result<()> {
        let res = unsafe {
            setsockopt(
                self.fd,
                level,
                name,
                value as *const T as *const c_void,
                mem::size_of::<T>() as socklen_t,
            )
        };
        if res == -1 {
            return Err(Error::SockOpt {
                option,
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }

    // getters
    pub fn ifname(&self) -> &str {
        &self.ifname
    }
    pub fn ifindex(&self) -> i32 {
        self.ifindex
    }
}

impl FrameSource for RawSocket {
    // recv_frame() method
    /// Receive one frame, truncated to the buffer length
    fn recv_frame(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // man 2 recv
        // returns length of message, -1 if error
        match unsafe { recv(self.fd, buf.as_mut_ptr() as *mut c_void, buf.len(), 0) } {
            -1 => Err(io::Error::last_os_error()),
            len => Ok(len as usize),
        }
    }
}

impl Drop for RawSocket {
    fn drop(&mut self) {
        unsafe {
            close(self.fd);
        }
    }
}
