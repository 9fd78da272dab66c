use std::fmt::Debug;

pub use bytes::Buf;

use crate::ipv4::{IpProtocol, Ipv4Addr, Ipv4PseudoHeader};
use crate::ipv6::{Ipv6Addr, Ipv6PseudoHeader};

/// One protocol unit in a chain of encapsulated layers.
pub trait Layer: Debug {
    /// Byte length of this layer's own header, including any variable
    /// header region.
    fn header_size(&self) -> usize;

    /// Byte length of this layer plus everything it encapsulates.
    fn total_size(&self) -> usize {
        self.header_size()
    }

    /// Write this layer and everything it encapsulates into `buf`.
    ///
    /// `buf` must hold at least [`total_size`](Layer::total_size) bytes.
    /// `parent` carries the enclosing network layer when one is known;
    /// layers that checksum over a pseudo header need it and leave their
    /// checksum field cleared without it.
    fn serialize(&mut self, buf: &mut [u8], parent: Option<&NetworkContext>);

    /// Whether `inbound` looks like a reply to this layer on the same
    /// flow.
    fn matches_response(&self, inbound: &[u8]) -> bool;
}

/// The network layer enclosing a transport segment, reduced to what the
/// transport checksums need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkContext {
    /// An IPv4 parent.
    Ipv4 {
        /// Source address.
        src: Ipv4Addr,
        /// Destination address.
        dst: Ipv4Addr,
    },
    /// An IPv6 parent.
    Ipv6 {
        /// Source address.
        src: Ipv6Addr,
        /// Destination address.
        dst: Ipv6Addr,
    },
}

impl NetworkContext {
    /// The pseudo-header partial checksum for `len` transport bytes of
    /// `protocol` carried by this network layer.
    pub fn partial_checksum(&self, protocol: IpProtocol, len: u16) -> u16 {
        match *self {
            NetworkContext::Ipv4 { src, dst } => {
                Ipv4PseudoHeader::new(src, dst, protocol, len).calc_checksum()
            }
            NetworkContext::Ipv6 { src, dst } => {
                Ipv6PseudoHeader::new(src, dst, protocol, u32::from(len)).calc_checksum()
            }
        }
    }
}
