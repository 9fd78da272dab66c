use byteorder::{ByteOrder, NetworkEndian};

enum_sim! {
    /// Tcp option kind tags.
    pub struct TcpOptionKind (u8) {
        /// End of option list.
        EOL = 0,

        /// No-operation, also used as inter-option padding.
        NOP = 1,

        /// Maximum segment size.
        MSS = 2,

        /// Window scale shift count.
        WSCALE = 3,

        /// Selective acknowledgment permitted.
        SACK_PERMITTED = 4,

        /// Selective acknowledgment block edges.
        SACK = 5,

        /// Timestamp and echo reply.
        TIMESTAMP = 8,

        /// Alternate checksum request (RFC 1146).
        ALT_CHECKSUM = 14,
    }
}

enum_sim! {
    /// Alternate checksum algorithm selectors (RFC 1146).
    pub struct AltChecksum (u8) {
        /// Standard ones-complement checksum.
        STANDARD = 0,

        /// 8-bit Fletcher algorithm.
        FLETCHER_8 = 1,

        /// 16-bit Fletcher algorithm.
        FLETCHER_16 = 2,
    }
}

/// A single option record: a kind tag, an owned payload, and the length
/// value that ends up on the wire.
///
/// The length field normally tracks the true payload size and is encoded
/// with the tag and length bytes counted in. Overriding it with
/// [`set_length_field`](TcpOption::set_length_field) spoofs the encoded
/// value, which is how deliberately malformed segments are crafted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpOption {
    kind: TcpOptionKind,
    payload: Vec<u8>,
    length_field: u8,
}

impl TcpOption {
    /// Build an option from a kind tag and a copy of `payload`.
    pub fn new(kind: TcpOptionKind, payload: &[u8]) -> Self {
        TcpOption {
            kind,
            payload: payload.to_vec(),
            length_field: payload.len() as u8,
        }
    }

    /// The kind tag.
    #[inline]
    pub fn kind(&self) -> TcpOptionKind {
        self.kind
    }

    /// The raw payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The length value used when encoding this option.
    #[inline]
    pub fn length_field(&self) -> u8 {
        self.length_field
    }

    /// Override the encoded length value without touching the payload.
    ///
    /// A spoofed length is written verbatim at serialization time.
    #[inline]
    pub fn set_length_field(&mut self, value: u8) {
        self.length_field = value;
    }

    /// Whether the length field no longer matches the true payload size.
    #[inline]
    pub fn is_length_spoofed(&self) -> bool {
        usize::from(self.length_field) != self.payload.len()
    }

    /// Encoded size in the option region: one byte for the tag, plus a
    /// length byte and the payload when the option carries data.
    /// SACK_PERMITTED carries a length byte but no payload bytes.
    pub fn encoded_size(&self) -> u16 {
        let mut size = 1;
        if !self.payload.is_empty() || self.kind == TcpOptionKind::SACK_PERMITTED {
            size += 1 + self.payload.len() as u16;
        }
        size
    }

    /// A maximum segment size option.
    pub fn mss(value: u16) -> Self {
        let mut payload = [0u8; 2];
        NetworkEndian::write_u16(&mut payload, value);
        TcpOption::new(TcpOptionKind::MSS, &payload)
    }

    /// A window scale option.
    pub fn window_scale(shift: u8) -> Self {
        TcpOption::new(TcpOptionKind::WSCALE, &[shift])
    }

    /// A sack-permitted marker.
    pub fn sack_permitted() -> Self {
        TcpOption::new(TcpOptionKind::SACK_PERMITTED, &[])
    }

    /// A selective acknowledgment option over a flat list of block edges.
    pub fn sack(edges: &[u32]) -> Self {
        let mut payload = vec![0u8; 4 * edges.len()];
        for (chunk, edge) in payload.chunks_exact_mut(4).zip(edges) {
            NetworkEndian::write_u32(chunk, *edge);
        }
        TcpOption::new(TcpOptionKind::SACK, &payload)
    }

    /// A timestamp option carrying a value and its echo reply.
    pub fn timestamp(value: u32, reply: u32) -> Self {
        let mut payload = [0u8; 8];
        NetworkEndian::write_u64(&mut payload, (u64::from(value) << 32) | u64::from(reply));
        TcpOption::new(TcpOptionKind::TIMESTAMP, &payload)
    }

    /// An alternate checksum request.
    pub fn alt_checksum(value: AltChecksum) -> Self {
        TcpOption::new(TcpOptionKind::ALT_CHECKSUM, &[u8::from(value)])
    }
}
