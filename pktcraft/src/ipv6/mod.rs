//! IPv6 protocol surface consumed by the transport codecs: addresses and
//! the pseudo header used for transport checksums.

pub use std::net::Ipv6Addr;

use byteorder::{ByteOrder, NetworkEndian};

use crate::checksum_utils;
use crate::ipv4::IpProtocol;

/// The IPv6 pseudo header covering a transport segment (RFC 8200 8.1).
#[derive(Debug, Clone, Copy)]
pub struct Ipv6PseudoHeader {
    src_ip: Ipv6Addr,
    dst_ip: Ipv6Addr,
    // 32-bit upper-layer length, three zero bytes, next-header number.
    len_next: [u8; 8],
}

impl Ipv6PseudoHeader {
    /// Build the pseudo header for `len` transport bytes of `protocol`
    /// carried from `src_ip` to `dst_ip`.
    pub fn new(src_ip: Ipv6Addr, dst_ip: Ipv6Addr, protocol: IpProtocol, len: u32) -> Self {
        let mut len_next = [0u8; 8];
        NetworkEndian::write_u32(&mut len_next[0..4], len);
        len_next[7] = protocol.into();

        Self {
            src_ip,
            dst_ip,
            len_next,
        }
    }

    /// The partial checksum contributed by this pseudo header.
    pub fn calc_checksum(&self) -> u16 {
        checksum_utils::combine(&[
            checksum_utils::from_slice(&self.src_ip.octets()),
            checksum_utils::from_slice(&self.dst_ip.octets()),
            checksum_utils::from_slice(&self.len_next[..]),
        ])
    }
}
