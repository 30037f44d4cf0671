//! Endian-neutral, IEEE-754-aware packing of fixed-width scalars.
//!
//! Every function here is total and pure: inputs and outputs are fixed-size
//! arrays, and there is no failure mode to report. Byte order is always big
//! endian, chosen independent of the host's native representation.

use byteorder::{BigEndian, ByteOrder};

/// Packs a `u16` as 2 big-endian bytes.
pub fn pack_u16(v: u16) -> [u8; 2] {
    let mut buf = [0u8; 2];
    BigEndian::write_u16(&mut buf, v);
    buf
}

/// Packs an `i16` as 2 big-endian bytes, using its two's-complement bit pattern.
pub fn pack_i16(v: i16) -> [u8; 2] {
    pack_u16(v as u16)
}

/// Unpacks 2 big-endian bytes as a `u16`.
pub fn unpack_u16(buf: &[u8]) -> u16 {
    BigEndian::read_u16(buf)
}

/// Unpacks 2 big-endian bytes as an `i16`, sign-extending the two's-complement bit pattern.
pub fn unpack_i16(buf: &[u8]) -> i16 {
    unpack_u16(buf) as i16
}

/// Packs a `u32` as 4 big-endian bytes.
pub fn pack_u32(v: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, v);
    buf
}

/// Packs an `i32` as 4 big-endian bytes, using its two's-complement bit pattern.
pub fn pack_i32(v: i32) -> [u8; 4] {
    pack_u32(v as u32)
}

/// Unpacks 4 big-endian bytes as a `u32`.
pub fn unpack_u32(buf: &[u8]) -> u32 {
    BigEndian::read_u32(buf)
}

/// Unpacks 4 big-endian bytes as an `i32`, sign-extending the two's-complement bit pattern.
pub fn unpack_i32(buf: &[u8]) -> i32 {
    unpack_u32(buf) as i32
}

/// Packs a `u64` as 8 big-endian bytes.
pub fn pack_u64(v: u64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, v);
    buf
}

/// Packs an `i64` as 8 big-endian bytes, using its two's-complement bit pattern.
pub fn pack_i64(v: i64) -> [u8; 8] {
    pack_u64(v as u64)
}

/// Unpacks 8 big-endian bytes as a `u64`.
pub fn unpack_u64(buf: &[u8]) -> u64 {
    BigEndian::read_u64(buf)
}

/// Unpacks 8 big-endian bytes as an `i64`, sign-extending the two's-complement bit pattern.
pub fn unpack_i64(buf: &[u8]) -> i64 {
    unpack_u64(buf) as i64
}

/// Packs an `f32` as its IEEE-754 binary32 bit pattern, big-endian.
///
/// Uses [`f32::to_bits`], so every finite value, subnormal, infinity, and NaN
/// (payload and sign included) round-trips bit-for-bit through [`unpack_f32`].
pub fn pack_f32(v: f32) -> [u8; 4] {
    pack_u32(v.to_bits())
}

/// Unpacks 4 big-endian bytes as an `f32` via [`f32::from_bits`].
pub fn unpack_f32(buf: &[u8]) -> f32 {
    f32::from_bits(unpack_u32(buf))
}

/// Packs an `f64` as its IEEE-754 binary64 bit pattern, big-endian.
///
/// Uses [`f64::to_bits`], so every finite value, subnormal, infinity, and NaN
/// (payload and sign included) round-trips bit-for-bit through [`unpack_f64`].
pub fn pack_f64(v: f64) -> [u8; 8] {
    pack_u64(v.to_bits())
}

/// Unpacks 8 big-endian bytes as an `f64` via [`f64::from_bits`].
pub fn unpack_f64(buf: &[u8]) -> f64 {
    f64::from_bits(unpack_u64(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_roundtrip() {
        for v in [0i16, 1, -1, i16::MIN, i16::MAX] {
            assert_eq!(unpack_i16(&pack_i16(v)), v);
        }
        for v in [0u16, 1, u16::MAX] {
            assert_eq!(unpack_u16(&pack_u16(v)), v);
        }
        for v in [0i32, 1, -1, i32::MIN, i32::MAX] {
            assert_eq!(unpack_i32(&pack_i32(v)), v);
        }
        for v in [0u32, 1, u32::MAX] {
            assert_eq!(unpack_u32(&pack_u32(v)), v);
        }
        for v in [0i64, 1, -1, i64::MIN, i64::MAX] {
            assert_eq!(unpack_i64(&pack_i64(v)), v);
        }
        for v in [0u64, 1, u64::MAX] {
            assert_eq!(unpack_u64(&pack_u64(v)), v);
        }
    }

    #[test]
    fn big_endian_byte_order() {
        assert_eq!(pack_u16(0x0102), [0x01, 0x02]);
        assert_eq!(pack_u32(0x0102_0304), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(
            pack_u64(0x0102_0304_0506_0708),
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn negative_ints_are_twos_complement_on_wire() {
        assert_eq!(pack_i32(-1), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(unpack_i32(&[0xFF, 0xFF, 0xFF, 0xFF]), -1);
    }

    #[test]
    fn float_roundtrip_exact_including_specials() {
        let cases = [
            0.0f32,
            -0.0,
            1.25,
            -2.375,
            f32::MIN,
            f32::MAX,
            f32::MIN_POSITIVE,
            f32::MIN_POSITIVE / 2.0, // subnormal
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ];
        for v in cases {
            let back = unpack_f32(&pack_f32(v));
            assert_eq!(back.to_bits(), v.to_bits(), "mismatch for {}", v);
        }

        let cases64 = [
            0.0f64,
            -0.0,
            2.375,
            f64::MIN,
            f64::MAX,
            f64::MIN_POSITIVE,
            f64::MIN_POSITIVE / 2.0,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
        ];
        for v in cases64 {
            let back = unpack_f64(&pack_f64(v));
            assert_eq!(back.to_bits(), v.to_bits(), "mismatch for {}", v);
        }
    }
}
