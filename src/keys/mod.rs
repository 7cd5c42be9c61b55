//! Binary index key construction.
//!
//! Two formats share one contract: byte-wise (memcmp) order of finished
//! keys matches the logical order of the appended values.
//!
//! - Fixed format: a 4-byte little-endian length header, then one block per
//!   column of a marker byte and an 8-byte order-preserving payload
//!   (strings and binaries carry a length-prefixed payload instead).
//! - Packed format: self-delimiting marker bytes with escaped variable
//!   length payloads, zero-padded to an 8-byte boundary at finish.

pub mod codec;
pub mod errors;
pub mod fixed;
pub mod packed;

pub use codec::{DefaultCodec, OrderedCodec};
pub use errors::KeyError;
pub use fixed::KeyBuilder;
pub use packed::PackedKeyBuilder;

/// Default capacity ceiling for a single key.
pub const MAX_KEY_BYTES: usize = 4096;

/// Fixed-format marker: column value is NULL.
pub const UNDEFINED: u8 = 0;
/// Fixed-format marker: column value present.
pub const DEFINED: u8 = 1;

/// Packed-format marker: column value is NULL.
pub const PACKED_UNDEFINED: u8 = 0x40;
/// Packed-format marker: column value present, codec payload follows.
pub const PACKED_DEFINED: u8 = 0x60;
/// Packed-format column separator.
pub const PACKED_SEPARATOR: u8 = 0x80;
/// Packed-format end-of-key marker.
pub const PACKED_END_OF_KEY: u8 = 0xC0;
