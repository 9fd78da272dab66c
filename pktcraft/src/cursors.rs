use bytes::Buf;

/// A bounds-checked sequential reader over a contiguous byte slice.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Wrap `buf`, with the read position at its first byte.
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// The whole underlying slice, independent of the read position.
    #[inline]
    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// The current read position.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// The unread bytes, borrowed for the underlying slice's lifetime.
    #[inline]
    pub fn chunk_shared_lifetime(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

impl<'a> Buf for Cursor<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.pos += cnt;
    }
}
