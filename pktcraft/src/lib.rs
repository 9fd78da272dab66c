#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

//! Provide utilities for crafting and inspecting network packets.
//!
//! A decoded protocol unit is an owned, mutable value: fixed header fields
//! are stored in wire byte order and exposed through host-order accessors,
//! variable-length regions are decoded into option records, and any bytes
//! past a unit's own header are attached as the next encapsulated layer.
//! Serializing a unit writes it back out, recomputing length fields and
//! checksums from the enclosing network-layer context.

#[macro_use]
mod macros;

mod error;
pub use error::{Error, Result};

mod traits;
pub use traits::{Buf, Layer, NetworkContext};

mod cursors;
pub use cursors::Cursor;

pub mod checksum_utils;

pub mod ipv4;
pub mod ipv6;

mod raw;
pub use raw::RawPayload;

pub mod tcp;
