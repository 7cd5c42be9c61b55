//! Order-preserving payload encodings.
//!
//! Every encoding here guarantees that byte-wise comparison of the encoded
//! form matches the logical order of the source values.

use super::errors::KeyError;

/// Sign-biased big-endian encoding of a signed integer.
///
/// Flipping the sign bit maps `i64::MIN..=i64::MAX` onto `0..=u64::MAX`,
/// after which big-endian bytes compare like the integers.
pub fn ordered_i64(value: i64) -> [u8; 8] {
    ((value as u64) ^ (1u64 << 63)).to_be_bytes()
}

/// Big-endian encoding of an unsigned integer.
pub fn ordered_u64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Total-order encoding of a float.
///
/// Positive floats get the sign bit set; negative floats are bit-inverted.
/// This sorts negatives before positives, orders magnitudes correctly on
/// both sides of zero, and places NaN above every finite value.
pub fn ordered_f64(value: f64) -> [u8; 8] {
    let bits = value.to_bits();
    let ordered = if value.is_nan() {
        u64::MAX
    } else if bits & (1u64 << 63) == 0 {
        bits ^ (1u64 << 63)
    } else {
        !bits
    };
    ordered.to_be_bytes()
}

/// Variable-length payload codec for the packed key format.
///
/// Implementations write into the caller's buffer and return the number of
/// bytes written, failing with [`KeyError::BufferOverflow`] when the
/// remaining space is insufficient.
pub trait OrderedCodec {
    fn encode_i64(&self, value: i64, out: &mut [u8]) -> Result<usize, KeyError>;
    fn encode_u64(&self, value: u64, out: &mut [u8]) -> Result<usize, KeyError>;
    fn encode_f64(&self, value: f64, out: &mut [u8]) -> Result<usize, KeyError>;
    /// Encodes a string payload. Under `append_max` the terminator is 0xFF
    /// instead of 0x00, making the encoded form sort after every extension
    /// of the same string.
    fn encode_str(&self, value: &str, append_max: bool, out: &mut [u8])
        -> Result<usize, KeyError>;
    fn encode_bytes(
        &self,
        value: &[u8],
        append_max: bool,
        out: &mut [u8],
    ) -> Result<usize, KeyError>;
}

/// The built-in codec: fixed 8-byte numerics, escaped variable-length
/// strings and binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCodec;

fn write_fixed(bytes: &[u8; 8], out: &mut [u8]) -> Result<usize, KeyError> {
    if out.len() < 8 {
        return Err(KeyError::BufferOverflow {
            needed: 8,
            remaining: out.len(),
        });
    }
    out[..8].copy_from_slice(bytes);
    Ok(8)
}

/// Escapes the boundary bytes and terminates.
///
/// Both terminator values must stay unambiguous against payload bytes: a
/// payload 0x00 becomes `0x00 0xFF` so it sorts above the 0x00 terminator,
/// and a payload 0xFF becomes `0xFF 0x00` so the 0xFF append-max
/// terminator sorts above it (the marker byte following every payload in
/// a packed key is at least 0x80, which decides the tie against the
/// escape's low second byte).
fn write_escaped(payload: &[u8], append_max: bool, out: &mut [u8]) -> Result<usize, KeyError> {
    let escaped = payload.iter().filter(|b| **b == 0x00 || **b == 0xFF).count();
    let needed = payload.len() + escaped + 1;
    if out.len() < needed {
        return Err(KeyError::BufferOverflow {
            needed,
            remaining: out.len(),
        });
    }
    let mut pos = 0;
    for &b in payload {
        out[pos] = b;
        pos += 1;
        match b {
            0x00 => {
                out[pos] = 0xFF;
                pos += 1;
            }
            0xFF => {
                out[pos] = 0x00;
                pos += 1;
            }
            _ => {}
        }
    }
    out[pos] = if append_max { 0xFF } else { 0x00 };
    pos += 1;
    Ok(pos)
}

impl OrderedCodec for DefaultCodec {
    fn encode_i64(&self, value: i64, out: &mut [u8]) -> Result<usize, KeyError> {
        write_fixed(&ordered_i64(value), out)
    }

    fn encode_u64(&self, value: u64, out: &mut [u8]) -> Result<usize, KeyError> {
        write_fixed(&ordered_u64(value), out)
    }

    fn encode_f64(&self, value: f64, out: &mut [u8]) -> Result<usize, KeyError> {
        write_fixed(&ordered_f64(value), out)
    }

    fn encode_str(
        &self,
        value: &str,
        append_max: bool,
        out: &mut [u8],
    ) -> Result<usize, KeyError> {
        write_escaped(value.as_bytes(), append_max, out)
    }

    fn encode_bytes(
        &self,
        value: &[u8],
        append_max: bool,
        out: &mut [u8],
    ) -> Result<usize, KeyError> {
        write_escaped(value, append_max, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sign-biased integers compare byte-wise like the integers.
    #[test]
    fn test_i64_order() {
        let values = [i64::MIN, -5, -1, 0, 1, 42, i64::MAX];
        for pair in values.windows(2) {
            assert!(ordered_i64(pair[0]) < ordered_i64(pair[1]));
        }
    }

    /// Float encoding is a total order with NaN last.
    #[test]
    fn test_f64_order() {
        let values = [
            f64::NEG_INFINITY,
            -1.0e10,
            -1.0,
            -f64::MIN_POSITIVE,
            0.0,
            f64::MIN_POSITIVE,
            1.0,
            1.0e10,
            f64::INFINITY,
        ];
        for pair in values.windows(2) {
            assert!(ordered_f64(pair[0]) < ordered_f64(pair[1]));
        }
        assert!(ordered_f64(f64::NAN) > ordered_f64(f64::INFINITY));
    }

    /// Boundary bytes are escaped; terminators keep prefix order.
    #[test]
    fn test_escape_and_terminate() {
        let codec = DefaultCodec;
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        let na = codec.encode_bytes(&[1, 0, 2], false, &mut a).unwrap();
        assert_eq!(&a[..na], &[1, 0, 0xFF, 2, 0]);
        let na = codec.encode_bytes(&[1, 0xFF, 2], false, &mut a).unwrap();
        assert_eq!(&a[..na], &[1, 0xFF, 0x00, 2, 0]);

        // "ab" sorts before "abc"; with append_max it sorts after.
        let na = codec.encode_str("ab", false, &mut a).unwrap();
        let nb = codec.encode_str("abc", false, &mut b).unwrap();
        assert!(a[..na] < b[..nb]);
        let na = codec.encode_str("ab", true, &mut a).unwrap();
        assert!(a[..na] > b[..nb]);
    }

    /// Undersized buffers fail instead of truncating.
    #[test]
    fn test_overflow() {
        let codec = DefaultCodec;
        let mut tiny = [0u8; 4];
        assert!(matches!(
            codec.encode_i64(1, &mut tiny),
            Err(KeyError::BufferOverflow { .. })
        ));
        assert!(matches!(
            codec.encode_str("hello", false, &mut tiny),
            Err(KeyError::BufferOverflow { .. })
        ));
    }
}
