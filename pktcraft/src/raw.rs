//! Opaque trailing payload, used as the next layer when no higher-level
//! decoder exists for the bytes following a header.

use crate::traits::{Layer, NetworkContext};

/// Raw bytes with no further structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    data: Vec<u8>,
}

impl RawPayload {
    /// Wrap a copy of `data` as an opaque payload unit.
    pub fn new(data: &[u8]) -> Self {
        RawPayload {
            data: data.to_vec(),
        }
    }

    /// The wrapped bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Layer for RawPayload {
    fn header_size(&self) -> usize {
        self.data.len()
    }

    fn serialize(&mut self, buf: &mut [u8], _parent: Option<&NetworkContext>) {
        assert!(buf.len() >= self.data.len());
        buf[..self.data.len()].copy_from_slice(&self.data);
    }

    // An opaque blob carries no flow identity to compare against.
    fn matches_response(&self, _inbound: &[u8]) -> bool {
        true
    }
}
