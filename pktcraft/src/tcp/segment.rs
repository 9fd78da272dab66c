use byteorder::{ByteOrder, NetworkEndian};
use bytes::Buf;

use crate::checksum_utils;
use crate::cursors::Cursor;
use crate::error::{Error, Result};
use crate::ipv4::IpProtocol;
use crate::raw::RawPayload;
use crate::traits::{Layer, NetworkContext};

use super::header::{TcpHeader, TCP_HEADER_LEN, TCP_HEADER_TEMPLATE};
use super::option::{AltChecksum, TcpOption, TcpOptionKind};

/// Window size advertised by segments built from scratch.
pub const DEFAULT_WINDOW: u16 = 32678;

/// A mutable Tcp segment: the fixed header, an ordered option list and an
/// optional encapsulated trailing payload.
///
/// A segment is built either from scratch with [`new`](TcpSegment::new) or
/// by decoding wire bytes with [`parse`](TcpSegment::parse), mutated
/// through its accessors and option operations, and written back out with
/// [`serialize`](Layer::serialize).
#[derive(Debug)]
pub struct TcpSegment {
    header: TcpHeader<[u8; TCP_HEADER_LEN]>,
    options: Vec<TcpOption>,
    options_size: u16,
    total_options_size: u16,
    inner: Option<Box<dyn Layer>>,
}

impl TcpSegment {
    /// A fresh segment with the given ports, a five-word data offset and
    /// the default window.
    pub fn new(src_port: u16, dst_port: u16) -> Self {
        let mut segment = TcpSegment {
            header: TCP_HEADER_TEMPLATE,
            options: Vec::new(),
            options_size: 0,
            total_options_size: 0,
            inner: None,
        };
        segment.header.set_src_port(src_port);
        segment.header.set_dst_port(dst_port);
        segment.header.set_window_size(DEFAULT_WINDOW);
        segment
    }

    /// Decode a segment from `buf`.
    ///
    /// The declared data offset is the single bounds gate: it must span at
    /// least the fixed header and lie within `buf`. Options are decoded
    /// eagerly; bytes between the declared header end and the end of
    /// `buf` are attached as a raw trailing payload.
    pub fn parse(buf: &[u8]) -> Result<TcpSegment> {
        let mut cursor = Cursor::new(buf);
        if cursor.remaining() < TCP_HEADER_LEN {
            return Err(Error::Malformed);
        }
        let header = TcpHeader::new_unchecked(&buf[..TCP_HEADER_LEN]).to_owned();
        cursor.advance(TCP_HEADER_LEN);

        let header_end = usize::from(header.header_len());
        if header_end < TCP_HEADER_LEN || header_end > buf.len() {
            return Err(Error::Malformed);
        }

        let mut segment = TcpSegment {
            header,
            options: Vec::new(),
            options_size: 0,
            total_options_size: 0,
            inner: None,
        };

        while cursor.cursor() < header_end {
            let kind = TcpOptionKind::from(cursor.get_u8());
            if kind == TcpOptionKind::EOL || kind == TcpOptionKind::NOP {
                // These two tags carry neither a length byte nor a payload.
                segment.add_option(TcpOption::new(kind, &[]));
                continue;
            }
            if cursor.remaining() == 0 {
                return Err(Error::Malformed);
            }
            let len = usize::from(cursor.get_u8());
            // The length field counts itself and the tag byte.
            if len < 2 {
                return Err(Error::Malformed);
            }
            let payload_len = len - 2;
            if cursor.cursor() + payload_len > header_end {
                return Err(Error::Malformed);
            }
            let payload = &cursor.chunk_shared_lifetime()[..payload_len];
            segment.add_option(TcpOption::new(kind, payload));
            cursor.advance(payload_len);
        }

        if cursor.remaining() > 0 {
            segment.inner = Some(Box::new(RawPayload::new(cursor.chunk())));
        }
        Ok(segment)
    }

    /// Source port.
    #[inline]
    pub fn src_port(&self) -> u16 {
        self.header.src_port()
    }

    /// Set the source port.
    #[inline]
    pub fn set_src_port(&mut self, value: u16) {
        self.header.set_src_port(value)
    }

    /// Destination port.
    #[inline]
    pub fn dst_port(&self) -> u16 {
        self.header.dst_port()
    }

    /// Set the destination port.
    #[inline]
    pub fn set_dst_port(&mut self, value: u16) {
        self.header.set_dst_port(value)
    }

    /// Sequence number.
    #[inline]
    pub fn seq_number(&self) -> u32 {
        self.header.seq_number()
    }

    /// Set the sequence number.
    #[inline]
    pub fn set_seq_number(&mut self, value: u32) {
        self.header.set_seq_number(value)
    }

    /// Acknowledgment number.
    #[inline]
    pub fn ack_number(&self) -> u32 {
        self.header.ack_number()
    }

    /// Set the acknowledgment number.
    #[inline]
    pub fn set_ack_number(&mut self, value: u32) {
        self.header.set_ack_number(value)
    }

    /// Window size.
    #[inline]
    pub fn window_size(&self) -> u16 {
        self.header.window_size()
    }

    /// Set the window size.
    #[inline]
    pub fn set_window_size(&mut self, value: u16) {
        self.header.set_window_size(value)
    }

    /// Checksum as last parsed or serialized.
    #[inline]
    pub fn checksum(&self) -> u16 {
        self.header.checksum()
    }

    /// Urgent pointer.
    #[inline]
    pub fn urgent_ptr(&self) -> u16 {
        self.header.urgent_ptr()
    }

    /// Set the urgent pointer.
    #[inline]
    pub fn set_urgent_ptr(&mut self, value: u16) {
        self.header.set_urgent_ptr(value)
    }

    /// Header length field in 32-bit words.
    #[inline]
    pub fn data_offset(&self) -> u8 {
        self.header.header_len() / 4
    }

    /// The 12-bit combined flag value: reserved field high, named flags
    /// low.
    #[inline]
    pub fn flags(&self) -> u16 {
        self.header.flags()
    }

    /// Set the 12-bit combined flag value.
    #[inline]
    pub fn set_flags(&mut self, value: u16) {
        self.header.set_flags(value)
    }

    /// FIN flag.
    #[inline]
    pub fn fin(&self) -> bool {
        self.header.fin()
    }

    /// Set the FIN flag.
    #[inline]
    pub fn set_fin(&mut self, value: bool) {
        self.header.set_fin(value)
    }

    /// SYN flag.
    #[inline]
    pub fn syn(&self) -> bool {
        self.header.syn()
    }

    /// Set the SYN flag.
    #[inline]
    pub fn set_syn(&mut self, value: bool) {
        self.header.set_syn(value)
    }

    /// RST flag.
    #[inline]
    pub fn rst(&self) -> bool {
        self.header.rst()
    }

    /// Set the RST flag.
    #[inline]
    pub fn set_rst(&mut self, value: bool) {
        self.header.set_rst(value)
    }

    /// PSH flag.
    #[inline]
    pub fn psh(&self) -> bool {
        self.header.psh()
    }

    /// Set the PSH flag.
    #[inline]
    pub fn set_psh(&mut self, value: bool) {
        self.header.set_psh(value)
    }

    /// ACK flag.
    #[inline]
    pub fn ack(&self) -> bool {
        self.header.ack()
    }

    /// Set the ACK flag.
    #[inline]
    pub fn set_ack(&mut self, value: bool) {
        self.header.set_ack(value)
    }

    /// URG flag.
    #[inline]
    pub fn urg(&self) -> bool {
        self.header.urg()
    }

    /// Set the URG flag.
    #[inline]
    pub fn set_urg(&mut self, value: bool) {
        self.header.set_urg(value)
    }

    /// ECE flag.
    #[inline]
    pub fn ece(&self) -> bool {
        self.header.ece()
    }

    /// Set the ECE flag.
    #[inline]
    pub fn set_ece(&mut self, value: bool) {
        self.header.set_ece(value)
    }

    /// CWR flag.
    #[inline]
    pub fn cwr(&self) -> bool {
        self.header.cwr()
    }

    /// Set the CWR flag.
    #[inline]
    pub fn set_cwr(&mut self, value: bool) {
        self.header.set_cwr(value)
    }

    /// Append `option` to the option list, keeping the size counters
    /// current.
    pub fn add_option(&mut self, option: TcpOption) {
        self.options_size += option.encoded_size();
        self.options.push(option);
        self.update_options_size();
    }

    /// Remove the first option of `kind` and decrement the size counters;
    /// false when no such option exists.
    pub fn remove_option(&mut self, kind: TcpOptionKind) -> bool {
        let pos = match self.options.iter().position(|opt| opt.kind() == kind) {
            Some(pos) => pos,
            None => return false,
        };
        let removed = self.options.remove(pos);
        self.options_size -= removed.encoded_size();
        self.update_options_size();
        true
    }

    /// The first option of `kind`, when present.
    pub fn search_option(&self, kind: TcpOptionKind) -> Option<&TcpOption> {
        self.options.iter().find(|opt| opt.kind() == kind)
    }

    /// All options in insertion order.
    #[inline]
    pub fn options(&self) -> &[TcpOption] {
        &self.options
    }

    /// Raw encoded size of the option list, before padding.
    #[inline]
    pub fn options_size(&self) -> u16 {
        self.options_size
    }

    /// Option bytes rounded up to the next 32-bit boundary; the
    /// difference is filled with no-op padding at serialization.
    #[inline]
    pub fn total_options_size(&self) -> u16 {
        self.total_options_size
    }

    fn update_options_size(&mut self) {
        let padding = self.options_size & 3;
        self.total_options_size = if padding != 0 {
            self.options_size - padding + 4
        } else {
            self.options_size
        };
    }

    /// Add a maximum segment size option.
    pub fn set_mss(&mut self, value: u16) {
        self.add_option(TcpOption::mss(value));
    }

    /// The advertised maximum segment size, or 0 when absent.
    pub fn mss(&self) -> u16 {
        match self.search_option(TcpOptionKind::MSS) {
            Some(opt) if opt.payload().len() == 2 => NetworkEndian::read_u16(opt.payload()),
            _ => 0,
        }
    }

    /// Add a window scale option.
    pub fn set_window_scale(&mut self, shift: u8) {
        self.add_option(TcpOption::window_scale(shift));
    }

    /// The window scale shift count, or 0 when absent.
    pub fn window_scale(&self) -> u8 {
        match self.search_option(TcpOptionKind::WSCALE) {
            Some(opt) if opt.payload().len() == 1 => opt.payload()[0],
            _ => 0,
        }
    }

    /// Add a sack-permitted marker.
    pub fn set_sack_permitted(&mut self) {
        self.add_option(TcpOption::sack_permitted());
    }

    /// Whether a sack-permitted marker is present.
    pub fn has_sack_permitted(&self) -> bool {
        self.search_option(TcpOptionKind::SACK_PERMITTED).is_some()
    }

    /// Add a selective acknowledgment option from a flat list of block
    /// edges.
    pub fn set_sack(&mut self, edges: &[u32]) {
        self.add_option(TcpOption::sack(edges));
    }

    /// The selective acknowledgment block edges.
    pub fn sack(&self) -> Result<Vec<u32>> {
        let opt = self
            .search_option(TcpOptionKind::SACK)
            .ok_or(Error::OptionNotFound)?;
        Ok(opt
            .payload()
            .chunks_exact(4)
            .map(NetworkEndian::read_u32)
            .collect())
    }

    /// Add a timestamp option.
    pub fn set_timestamp(&mut self, value: u32, reply: u32) {
        self.add_option(TcpOption::timestamp(value, reply));
    }

    /// The timestamp value and its echo reply.
    pub fn timestamp(&self) -> Result<(u32, u32)> {
        let opt = self
            .search_option(TcpOptionKind::TIMESTAMP)
            .ok_or(Error::OptionNotFound)?;
        if opt.payload().len() != 8 {
            return Err(Error::Malformed);
        }
        let raw = NetworkEndian::read_u64(opt.payload());
        Ok(((raw >> 32) as u32, raw as u32))
    }

    /// Add an alternate checksum request.
    pub fn set_alt_checksum(&mut self, value: AltChecksum) {
        self.add_option(TcpOption::alt_checksum(value));
    }

    /// The requested alternate checksum algorithm, or the standard one
    /// when absent.
    pub fn alt_checksum(&self) -> AltChecksum {
        match self.search_option(TcpOptionKind::ALT_CHECKSUM) {
            Some(opt) if opt.payload().len() == 1 => AltChecksum::from(opt.payload()[0]),
            _ => AltChecksum::STANDARD,
        }
    }

    /// The encapsulated next layer, when any.
    pub fn inner(&self) -> Option<&dyn Layer> {
        self.inner.as_deref()
    }

    /// Attach `layer` as the encapsulated next layer, replacing any
    /// previous one.
    pub fn set_inner(&mut self, layer: Box<dyn Layer>) {
        self.inner = Some(layer);
    }

    /// Detach and return the encapsulated next layer.
    pub fn take_inner(&mut self) -> Option<Box<dyn Layer>> {
        self.inner.take()
    }
}

// Encode one option. EOL and NOP are bare tags; everything else is tag,
// length byte and payload, where a spoofed length field goes out verbatim
// and an honest one gets the tag and length bytes counted in.
fn write_option(option: &TcpOption, buf: &mut [u8]) -> usize {
    let kind = u8::from(option.kind());
    if option.kind() == TcpOptionKind::EOL || option.kind() == TcpOptionKind::NOP {
        buf[0] = kind;
        return 1;
    }
    buf[0] = kind;
    let mut length = option.length_field();
    if !option.is_length_spoofed() {
        length = length.wrapping_add(2);
    }
    buf[1] = length;
    buf[2..2 + option.payload().len()].copy_from_slice(option.payload());
    2 + option.payload().len()
}

impl Layer for TcpSegment {
    fn header_size(&self) -> usize {
        TCP_HEADER_LEN + usize::from(self.total_options_size)
    }

    fn total_size(&self) -> usize {
        self.header_size() + self.inner.as_ref().map_or(0, |inner| inner.total_size())
    }

    fn serialize(&mut self, buf: &mut [u8], parent: Option<&NetworkContext>) {
        let total_size = self.total_size();
        assert!(buf.len() >= total_size);

        self.header.set_checksum(0);
        self.header.set_header_len(self.header_size() as u8);

        let mut cursor = TCP_HEADER_LEN;
        for option in &self.options {
            cursor += write_option(option, &mut buf[cursor..]);
        }
        while cursor < self.header_size() {
            buf[cursor] = u8::from(TcpOptionKind::NOP);
            cursor += 1;
        }

        buf[..TCP_HEADER_LEN].copy_from_slice(self.header.as_bytes());

        if let Some(inner) = self.inner.as_mut() {
            inner.serialize(&mut buf[cursor..total_size], parent);
        }

        // Without a recognized parent there is no pseudo header, and the
        // checksum stays cleared.
        if let Some(context) = parent {
            let len = u16::try_from(total_size).unwrap();
            let cksum = !checksum_utils::combine(&[
                context.partial_checksum(IpProtocol::TCP, len),
                checksum_utils::from_slice(&buf[..total_size]),
            ]);
            self.header.set_checksum(cksum);
            NetworkEndian::write_u16(&mut buf[16..18], cksum);
        }
    }

    fn matches_response(&self, inbound: &[u8]) -> bool {
        if inbound.len() < TCP_HEADER_LEN {
            return false;
        }
        let header = TcpHeader::new_unchecked(inbound);
        if header.src_port() != self.dst_port() || header.dst_port() != self.src_port() {
            return false;
        }
        match self.inner.as_ref() {
            Some(inner) => {
                // Trust the inbound buffer's own data offset, clamped to
                // what is actually available.
                let boundary = usize::from(header.header_len()).min(inbound.len());
                inner.matches_response(&inbound[boundary..])
            }
            None => true,
        }
    }
}
