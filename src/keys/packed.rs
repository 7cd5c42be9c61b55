//! Packed-format key builder.
//!
//! Columns are self-delimiting: a NULL column is the `PACKED_UNDEFINED`
//! marker, a present column is `PACKED_DEFINED` followed by a codec
//! payload, and every column ends with `PACKED_SEPARATOR`. Finishing
//! writes `PACKED_END_OF_KEY` and zero-pads to an 8-byte boundary. The
//! marker values are spaced so NULL < value < separator < end-of-key under
//! byte comparison; a finished key therefore sorts after every key that
//! extends it with more columns, which lets a short key close a prefix
//! range from above.

use chrono::{DateTime, Utc};

use crate::core::{ObjectRef, X6Decimal};

use super::codec::{DefaultCodec, OrderedCodec};
use super::errors::KeyError;
use super::{
    MAX_KEY_BYTES, PACKED_DEFINED, PACKED_END_OF_KEY, PACKED_SEPARATOR, PACKED_UNDEFINED,
};

/// Packed key builder over a pluggable payload codec.
#[derive(Debug, Clone)]
pub struct PackedKeyBuilder<C: OrderedCodec = DefaultCodec> {
    buf: Vec<u8>,
    position: usize,
    sealed: Option<usize>,
    codec: C,
}

impl PackedKeyBuilder<DefaultCodec> {
    /// Builder with the default codec and capacity.
    pub fn new() -> Self {
        Self::with_codec(DefaultCodec)
    }
}

impl Default for PackedKeyBuilder<DefaultCodec> {
    fn default() -> Self {
        PackedKeyBuilder::new()
    }
}

impl<C: OrderedCodec> PackedKeyBuilder<C> {
    /// Builder over a specific codec.
    pub fn with_codec(codec: C) -> Self {
        PackedKeyBuilder {
            buf: vec![0u8; MAX_KEY_BYTES],
            position: 0,
            sealed: None,
            codec,
        }
    }

    /// Rewinds to an empty, unsealed key.
    pub fn reset(&mut self) {
        self.position = 0;
        self.sealed = None;
    }

    /// Current append position.
    pub fn position(&self) -> usize {
        self.position
    }

    fn check_unsealed(&self) -> Result<(), KeyError> {
        if self.sealed.is_some() {
            return Err(KeyError::SealedBuffer);
        }
        Ok(())
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

    fn append_null(&mut self) -> Result<(), KeyError> {
        self.check_unsealed()?;
        self.ensure(2)?;
        self.push(PACKED_UNDEFINED);
        self.push(PACKED_SEPARATOR);
        Ok(())
    }

    fn append_with<F>(&mut self, encode: F) -> Result<(), KeyError>
    where
        F: FnOnce(&C, &mut [u8]) -> Result<usize, KeyError>,
    {
        self.check_unsealed()?;
        self.ensure(2)?;
        // Marker first, then the codec payload into the remaining space,
        // then the separator. Position only advances on success.
        let written = encode(&self.codec, &mut self.buf[self.position + 1..])?;
        if written + 2 > self.buf.len() - self.position {
            return Err(KeyError::BufferOverflow {
                needed: written + 2,
                remaining: self.buf.len() - self.position,
            });
        }
        self.buf[self.position] = PACKED_DEFINED;
        self.position += 1 + written;
        self.push(PACKED_SEPARATOR);
        Ok(())
    }

    /// Appends a signed integer column.
    pub fn append_int(&mut self, value: Option<i64>) -> Result<(), KeyError> {
        match value {
            Some(v) => self.append_with(|codec, out| codec.encode_i64(v, out)),
            None => self.append_null(),
        }
    }

    /// Appends an unsigned integer column.
    pub fn append_uint(&mut self, value: Option<u64>) -> Result<(), KeyError> {
        match value {
            Some(v) => self.append_with(|codec, out| codec.encode_u64(v, out)),
            None => self.append_null(),
        }
    }

    /// Appends a fixed-point decimal column.
    pub fn append_decimal(&mut self, value: Option<X6Decimal>) -> Result<(), KeyError> {
        self.append_int(value.map(|d| d.raw()))
    }

    /// Appends a float column.
    pub fn append_float(&mut self, value: Option<f64>) -> Result<(), KeyError> {
        match value {
            Some(v) => self.append_with(|codec, out| codec.encode_f64(v, out)),
            None => self.append_null(),
        }
    }

    /// Appends a boolean column.
    pub fn append_bool(&mut self, value: Option<bool>) -> Result<(), KeyError> {
        self.append_uint(value.map(u64::from))
    }

    /// Appends a timestamp column as microseconds since the epoch.
    pub fn append_datetime(&mut self, value: Option<DateTime<Utc>>) -> Result<(), KeyError> {
        self.append_int(value.map(|t| t.timestamp_micros()))
    }

    /// Appends an object reference column.
    pub fn append_ref(&mut self, value: Option<ObjectRef>) -> Result<(), KeyError> {
        self.append_uint(value.map(|r| r.identity_bits()))
    }

    /// Appends a string column.
    pub fn append_str(&mut self, value: Option<&str>, append_max: bool) -> Result<(), KeyError> {
        match value {
            Some(v) => self.append_with(|codec, out| codec.encode_str(v, append_max, out)),
            None => self.append_null(),
        }
    }

    /// Appends a binary column.
    pub fn append_bytes(&mut self, value: Option<&[u8]>, append_max: bool) -> Result<(), KeyError> {
        match value {
            Some(v) => self.append_with(|codec, out| codec.encode_bytes(v, append_max, out)),
            None => self.append_null(),
        }
    }

    /// Seals the key: end-of-key marker, zero padding to an 8-byte
    /// boundary, and returns the finished bytes. Idempotent; appending
    /// after finish fails until reset.
    pub fn finish(&mut self) -> Result<&[u8], KeyError> {
        if let Some(len) = self.sealed {
            return Ok(&self.buf[..len]);
        }
        let padded = (self.position + 1).div_ceil(8) * 8;
        self.ensure(padded - self.position)?;
        self.push(PACKED_END_OF_KEY);
        while self.position < padded {
            self.push(0);
        }
        self.sealed = Some(self.position);
        Ok(&self.buf[..self.position])
    }
}
