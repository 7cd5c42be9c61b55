//! Fixed-format key builder.
//!
//! Layout: a 4-byte little-endian body-length header (stamped at finish),
//! then one block per appended column. A NULL column is a single
//! `UNDEFINED` marker byte; a present column is a `DEFINED` marker (or a
//! caller-chosen tag) followed by an 8-byte order-preserving payload.
//! Strings and binaries carry a 4-byte little-endian length prefix and the
//! raw payload instead of a fixed block.

use chrono::{DateTime, Utc};

use crate::core::{ObjectRef, X6Decimal};

use super::codec::{ordered_f64, ordered_i64, ordered_u64};
use super::errors::KeyError;
use super::{DEFINED, MAX_KEY_BYTES, UNDEFINED};

/// Grow-free key buffer with explicit capacity and append position.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    buf: Vec<u8>,
    position: usize,
}

const HEADER_BYTES: usize = 4;

impl KeyBuilder {
    /// Builder with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_KEY_BYTES)
    }

    /// Builder with an explicit capacity ceiling.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(HEADER_BYTES);
        KeyBuilder {
            buf: vec![0u8; capacity],
            position: HEADER_BYTES,
        }
    }

    /// Rewinds to an empty key, keeping the allocation.
    pub fn reset(&mut self) {
        self.position = HEADER_BYTES;
    }

    /// Current append position (includes the header region).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total buffer capacity.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn ensure(&self, needed: usize) -> Result<(), KeyError> {
        let remaining = self.buf.len() - self.position;
        if needed > remaining {
            return Err(KeyError::BufferOverflow { needed, remaining });
        }
        Ok(())
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.position] = byte;
        self.position += 1;
    }

    fn push_slice(&mut self, bytes: &[u8]) {
        self.buf[self.position..self.position + bytes.len()].copy_from_slice(bytes);
        self.position += bytes.len();
    }

    fn append_block(&mut self, marker: u8, payload: Option<[u8; 8]>) -> Result<(), KeyError> {
        match payload {
            Some(bytes) => {
                self.ensure(1 + bytes.len())?;
                self.push(marker);
                self.push_slice(&bytes);
            }
            None => {
                self.ensure(1)?;
                self.push(UNDEFINED);
            }
        }
        Ok(())
    }

    /// Appends a signed integer column.
    pub fn append_int(&mut self, value: Option<i64>) -> Result<(), KeyError> {
        self.append_block(DEFINED, value.map(ordered_i64))
    }

    /// Appends a signed integer with a caller-chosen marker tag, for keys
    /// that embed a type discriminant in the marker byte.
    pub fn append_int_tagged(&mut self, tag: u8, value: i64) -> Result<(), KeyError> {
        self.append_block(tag, Some(ordered_i64(value)))
    }

    /// Appends an unsigned integer column.
    pub fn append_uint(&mut self, value: Option<u64>) -> Result<(), KeyError> {
        self.append_block(DEFINED, value.map(ordered_u64))
    }

    /// Appends a fixed-point decimal column.
    pub fn append_decimal(&mut self, value: Option<X6Decimal>) -> Result<(), KeyError> {
        self.append_block(DEFINED, value.map(|d| ordered_i64(d.raw())))
    }

    /// Appends a float column.
    pub fn append_float(&mut self, value: Option<f64>) -> Result<(), KeyError> {
        self.append_block(DEFINED, value.map(ordered_f64))
    }

    /// Appends a boolean column. The payload stores the flag in its first
    /// byte with zero fill, which sorts false before true.
    pub fn append_bool(&mut self, value: Option<bool>) -> Result<(), KeyError> {
        self.append_block(
            DEFINED,
            value.map(|b| [u8::from(b), 0, 0, 0, 0, 0, 0, 0]),
        )
    }

    /// Appends a timestamp column as microseconds since the epoch.
    pub fn append_datetime(&mut self, value: Option<DateTime<Utc>>) -> Result<(), KeyError> {
        self.append_block(
            DEFINED,
            value.map(|t| ordered_i64(t.timestamp_micros())),
        )
    }

    /// Appends an object reference column.
    pub fn append_ref(&mut self, value: Option<ObjectRef>) -> Result<(), KeyError> {
        self.append_block(DEFINED, value.map(|r| ordered_u64(r.identity_bits())))
    }

    /// Appends a string column: marker, 4-byte little-endian byte length,
    /// payload. Under `append_max` a trailing 0xFF sorts the key after
    /// every extension of the value; the length prefix covers the tail so
    /// the block stays self-describing.
    pub fn append_str(&mut self, value: Option<&str>, append_max: bool) -> Result<(), KeyError> {
        self.append_var(value.map(str::as_bytes), append_max)
    }

    /// Appends a binary column with the same layout as strings.
    pub fn append_bytes(&mut self, value: Option<&[u8]>, append_max: bool) -> Result<(), KeyError> {
        self.append_var(value, append_max)
    }

    fn append_var(&mut self, payload: Option<&[u8]>, append_max: bool) -> Result<(), KeyError> {
        let payload = match payload {
            Some(bytes) => bytes,
            None => return self.append_block(DEFINED, None),
        };
        let tail = usize::from(append_max);
        self.ensure(1 + 4 + payload.len() + tail)?;
        self.push(DEFINED);
        let len = (payload.len() + tail) as u32;
        self.push_slice(&len.to_le_bytes());
        self.push_slice(payload);
        if append_max {
            self.push(0xFF);
        }
        Ok(())
    }

    /// Copies this builder's appended content into another builder.
    ///
    /// A no-op when both builders sit at the same position with identical
    /// content regions, which is the common shared-prefix case.
    pub fn copy_to(&self, other: &mut KeyBuilder) -> Result<(), KeyError> {
        if self.position == other.position
            && self.buf[..self.position] == other.buf[..other.position]
        {
            return Ok(());
        }
        if self.position > other.buf.len() {
            return Err(KeyError::PrefixTooLarge {
                needed: self.position,
                capacity: other.buf.len(),
            });
        }
        other.buf[..self.position].copy_from_slice(&self.buf[..self.position]);
        other.position = self.position;
        Ok(())
    }

    /// Appends the body of an already finished key, skipping its header.
    pub fn append_precomputed(&mut self, finished: &[u8]) -> Result<(), KeyError> {
        let body = finished.get(HEADER_BYTES..).unwrap_or(&[]);
        self.ensure(body.len())?;
        self.push_slice(body);
        Ok(())
    }

    /// Stamps the body length into the header and returns the finished
    /// key. Idempotent: calling again without intervening appends returns
    /// the same bytes.
    pub fn finish(&mut self) -> &[u8] {
        let body_len = (self.position - HEADER_BYTES) as u32;
        self.buf[..HEADER_BYTES].copy_from_slice(&body_len.to_le_bytes());
        &self.buf[..self.position]
    }
}

impl Default for KeyBuilder {
    fn default() -> Self {
        KeyBuilder::new()
    }
}
