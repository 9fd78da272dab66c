//! IPv4 protocol surface consumed by the transport codecs: addresses,
//! protocol numbers and the pseudo header used for transport checksums.

pub use std::net::Ipv4Addr;

use byteorder::{ByteOrder, NetworkEndian};

use crate::checksum_utils;

enum_sim! {
    /// An enum-like type for representing different protocols in IPv4/v6.
    ///
    /// See <https://www.iana.org/assignments/protocol-numbers/protocol-numbers.xhtml>
    pub struct IpProtocol (u8) {
        /// IP packet payload is ICMP protocol.
        ICMP = 1,

        /// IP packet payload is TCP protocol.
        TCP = 6,

        /// IP packet payload is UDP protocol.
        UDP = 17,
    }
}

/// The IPv4 pseudo header covering a transport segment.
#[derive(Debug, Clone, Copy)]
pub struct Ipv4PseudoHeader {
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    proto_len: [u8; 4],
}

impl Ipv4PseudoHeader {
    /// Build the pseudo header for `len` transport bytes of `protocol`
    /// carried from `src_ip` to `dst_ip`.
    pub fn new(src_ip: Ipv4Addr, dst_ip: Ipv4Addr, protocol: IpProtocol, len: u16) -> Self {
        let mut proto_len = [0u8; 4];
        proto_len[1] = protocol.into();
        NetworkEndian::write_u16(&mut proto_len[2..4], len);

        Self {
            src_ip,
            dst_ip,
            proto_len,
        }
    }

    /// The partial checksum contributed by this pseudo header.
    pub fn calc_checksum(&self) -> u16 {
        checksum_utils::combine(&[
            checksum_utils::from_slice(&self.src_ip.octets()),
            checksum_utils::from_slice(&self.dst_ip.octets()),
            checksum_utils::from_slice(&self.proto_len[..]),
        ])
    }
}
