use byteorder::{ByteOrder, NetworkEndian};

header_field_range_accessors! {
    (src_port, src_port_mut, 0..2),
    (dst_port, dst_port_mut, 2..4),
    (seq_num, seq_num_mut, 4..8),
    (ack_num, ack_num_mut, 8..12),
    (flag_bits, flag_bits_mut, 12..14),
    (win_size, win_size_mut, 14..16),
    (checksum, checksum_mut, 16..18),
    (urgent, urgent_mut, 18..20),
}

/// FIN flag mask within the 12-bit combined flag value.
pub const FLG_FIN: u16 = 0x001;
/// SYN flag mask within the 12-bit combined flag value.
pub const FLG_SYN: u16 = 0x001 << 1;
/// RST flag mask within the 12-bit combined flag value.
pub const FLG_RST: u16 = 0x001 << 2;
/// PSH flag mask within the 12-bit combined flag value.
pub const FLG_PSH: u16 = 0x001 << 3;
/// ACK flag mask within the 12-bit combined flag value.
pub const FLG_ACK: u16 = 0x001 << 4;
/// URG flag mask within the 12-bit combined flag value.
pub const FLG_URG: u16 = 0x001 << 5;
/// ECE flag mask within the 12-bit combined flag value.
pub const FLG_ECE: u16 = 0x001 << 6;
/// CWR flag mask within the 12-bit combined flag value.
pub const FLG_CWR: u16 = 0x001 << 7;

/// Byte length of the fixed Tcp header.
pub const TCP_HEADER_LEN: usize = 20;

/// Largest header length the 4-bit data offset can declare.
pub const TCP_HEADER_LEN_MAX: usize = 60;

/// A fixed Tcp header with a five-word data offset and everything else
/// zeroed.
pub const TCP_HEADER_TEMPLATE: TcpHeader<[u8; TCP_HEADER_LEN]> = TcpHeader {
    buf: [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x50, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00,
    ],
};

/// The fixed 20-byte Tcp header over a byte container.
///
/// Fields are kept in wire (big-endian) byte order; every accessor
/// converts to and from host order.
#[derive(Clone, Copy, Debug)]
pub struct TcpHeader<T> {
    buf: T,
}

impl<T: AsRef<[u8]>> TcpHeader<T> {
    /// Wrap `buf`, requiring at least the fixed header length.
    #[inline]
    pub fn new(buf: T) -> Result<Self, T> {
        if buf.as_ref().len() >= TCP_HEADER_LEN {
            Ok(Self { buf })
        } else {
            Err(buf)
        }
    }

    /// Wrap `buf` without checking its length.
    #[inline]
    pub fn new_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// The fixed header bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf.as_ref()[0..TCP_HEADER_LEN]
    }

    /// Copy the fixed header into an owned array.
    #[inline]
    pub fn to_owned(&self) -> TcpHeader<[u8; TCP_HEADER_LEN]> {
        let mut buf = [0; TCP_HEADER_LEN];
        buf.copy_from_slice(self.as_bytes());
        TcpHeader { buf }
    }

    /// Declared header length in bytes (the data offset scaled to bytes).
    #[inline]
    pub fn header_len(&self) -> u8 {
        let raw = NetworkEndian::read_u16(flag_bits(self.buf.as_ref()));
        ((raw & 0xf000) >> 10) as u8
    }

    /// Source port.
    #[inline]
    pub fn src_port(&self) -> u16 {
        NetworkEndian::read_u16(src_port(self.buf.as_ref()))
    }

    /// Destination port.
    #[inline]
    pub fn dst_port(&self) -> u16 {
        NetworkEndian::read_u16(dst_port(self.buf.as_ref()))
    }

    /// Sequence number.
    #[inline]
    pub fn seq_number(&self) -> u32 {
        NetworkEndian::read_u32(seq_num(self.buf.as_ref()))
    }

    /// Acknowledgment number.
    #[inline]
    pub fn ack_number(&self) -> u32 {
        NetworkEndian::read_u32(ack_num(self.buf.as_ref()))
    }

    /// The 12-bit combined flag value: the 4-bit reserved field in the
    /// high four bits, the eight named flags in the low eight.
    #[inline]
    pub fn flags(&self) -> u16 {
        NetworkEndian::read_u16(flag_bits(self.buf.as_ref())) & 0x0fff
    }

    /// FIN flag.
    #[inline]
    pub fn fin(&self) -> bool {
        self.flags() & FLG_FIN != 0
    }

    /// SYN flag.
    #[inline]
    pub fn syn(&self) -> bool {
        self.flags() & FLG_SYN != 0
    }

    /// RST flag.
    #[inline]
    pub fn rst(&self) -> bool {
        self.flags() & FLG_RST != 0
    }

    /// PSH flag.
    #[inline]
    pub fn psh(&self) -> bool {
        self.flags() & FLG_PSH != 0
    }

    /// ACK flag.
    #[inline]
    pub fn ack(&self) -> bool {
        self.flags() & FLG_ACK != 0
    }

    /// URG flag.
    #[inline]
    pub fn urg(&self) -> bool {
        self.flags() & FLG_URG != 0
    }

    /// ECE flag.
    #[inline]
    pub fn ece(&self) -> bool {
        self.flags() & FLG_ECE != 0
    }

    /// CWR flag.
    #[inline]
    pub fn cwr(&self) -> bool {
        self.flags() & FLG_CWR != 0
    }

    /// Window size.
    #[inline]
    pub fn window_size(&self) -> u16 {
        NetworkEndian::read_u16(win_size(self.buf.as_ref()))
    }

    /// Checksum.
    #[inline]
    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(checksum(self.buf.as_ref()))
    }

    /// Urgent pointer.
    #[inline]
    pub fn urgent_ptr(&self) -> u16 {
        NetworkEndian::read_u16(urgent(self.buf.as_ref()))
    }
}

impl<T: AsMut<[u8]> + AsRef<[u8]>> TcpHeader<T> {
    /// Set the header length in bytes; must be 4-aligned and within the
    /// range the 4-bit data offset can express.
    #[inline]
    pub fn set_header_len(&mut self, value: u8) {
        assert!(
            usize::from(value) >= TCP_HEADER_LEN
                && usize::from(value) <= TCP_HEADER_LEN_MAX
                && value & 0x03 == 0
        );
        let data = flag_bits_mut(self.buf.as_mut());
        let raw = (NetworkEndian::read_u16(data) & !0xf000) | ((value as u16) << 10);
        NetworkEndian::write_u16(data, raw)
    }

    /// Set the source port.
    #[inline]
    pub fn set_src_port(&mut self, value: u16) {
        NetworkEndian::write_u16(src_port_mut(self.buf.as_mut()), value)
    }

    /// Set the destination port.
    #[inline]
    pub fn set_dst_port(&mut self, value: u16) {
        NetworkEndian::write_u16(dst_port_mut(self.buf.as_mut()), value)
    }

    /// Set the sequence number.
    #[inline]
    pub fn set_seq_number(&mut self, value: u32) {
        NetworkEndian::write_u32(seq_num_mut(self.buf.as_mut()), value)
    }

    /// Set the acknowledgment number.
    #[inline]
    pub fn set_ack_number(&mut self, value: u32) {
        NetworkEndian::write_u32(ack_num_mut(self.buf.as_mut()), value)
    }

    /// Set the 12-bit combined flag value, writing both the reserved
    /// field and the eight named flags.
    #[inline]
    pub fn set_flags(&mut self, value: u16) {
        assert!(value <= 0x0fff);
        let data = flag_bits_mut(self.buf.as_mut());
        let raw = (NetworkEndian::read_u16(data) & 0xf000) | value;
        NetworkEndian::write_u16(data, raw)
    }

    #[inline]
    fn set_flag_bit(&mut self, mask: u16, value: bool) {
        let data = flag_bits_mut(self.buf.as_mut());
        let raw = if value {
            NetworkEndian::read_u16(data) | mask
        } else {
            NetworkEndian::read_u16(data) & !mask
        };
        NetworkEndian::write_u16(data, raw)
    }

    /// Set the FIN flag.
    #[inline]
    pub fn set_fin(&mut self, value: bool) {
        self.set_flag_bit(FLG_FIN, value)
    }

    /// Set the SYN flag.
    #[inline]
    pub fn set_syn(&mut self, value: bool) {
        self.set_flag_bit(FLG_SYN, value)
    }

    /// Set the RST flag.
    #[inline]
    pub fn set_rst(&mut self, value: bool) {
        self.set_flag_bit(FLG_RST, value)
    }

    /// Set the PSH flag.
    #[inline]
    pub fn set_psh(&mut self, value: bool) {
        self.set_flag_bit(FLG_PSH, value)
    }

    /// Set the ACK flag.
    #[inline]
    pub fn set_ack(&mut self, value: bool) {
        self.set_flag_bit(FLG_ACK, value)
    }

    /// Set the URG flag.
    #[inline]
    pub fn set_urg(&mut self, value: bool) {
        self.set_flag_bit(FLG_URG, value)
    }

    /// Set the ECE flag.
    #[inline]
    pub fn set_ece(&mut self, value: bool) {
        self.set_flag_bit(FLG_ECE, value)
    }

    /// Set the CWR flag.
    #[inline]
    pub fn set_cwr(&mut self, value: bool) {
        self.set_flag_bit(FLG_CWR, value)
    }

    /// Set the window size.
    #[inline]
    pub fn set_window_size(&mut self, value: u16) {
        NetworkEndian::write_u16(win_size_mut(self.buf.as_mut()), value)
    }

    /// Set the checksum.
    #[inline]
    pub fn set_checksum(&mut self, value: u16) {
        NetworkEndian::write_u16(checksum_mut(self.buf.as_mut()), value)
    }

    /// Set the urgent pointer.
    #[inline]
    pub fn set_urgent_ptr(&mut self, value: u16) {
        NetworkEndian::write_u16(urgent_mut(self.buf.as_mut()), value)
    }
}
