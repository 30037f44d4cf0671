//! The field type tag and the tagged-union field value.

/// The closed set of value kinds a [`crate::field::Field`] can carry, plus the
/// `NoType` sentinel used when a field is absent or its wire ordinal is
/// unrecognized.
///
/// Ordinals are pinned to the wire contract (see the crate's binary frame
/// layout) and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum FieldType {
    /// Unsigned 32-bit enumerator value.
    Enum = 0,
    /// Signed 8-bit integer. In-memory only; see [`WireSize::NonSerializable`].
    I8 = 1,
    /// Unsigned 8-bit integer. In-memory only; see [`WireSize::NonSerializable`].
    U8 = 2,
    /// Signed 16-bit integer.
    I16 = 3,
    /// Unsigned 16-bit integer.
    U16 = 4,
    /// Signed 32-bit integer.
    I32 = 5,
    /// Unsigned 32-bit integer.
    U32 = 6,
    /// Signed 64-bit integer.
    I64 = 7,
    /// Unsigned 64-bit integer.
    U64 = 8,
    /// IEEE-754 binary32 float.
    F32 = 9,
    /// IEEE-754 binary64 float.
    F64 = 10,
    /// Raw byte string, length carried externally.
    String = 11,
    /// Sentinel: "no type". Never appears in a serialized frame.
    NoType = 12,
}

/// How a [`FieldType`] is represented on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireSize {
    /// A fixed number of bytes, the same for every value of the type.
    Fixed(usize),
    /// A variable number of bytes, carried by an external length prefix.
    Variable,
    /// The type has no wire representation at all; attempting to serialize
    /// it is an error.
    NonSerializable,
}

impl FieldType {
    /// Recovers a `FieldType` from its wire ordinal. Returns `None` for any
    /// ordinal outside `0..=12`; callers of the framed codec treat that as
    /// [`FieldType::NoType`] rather than propagating the `None`.
    pub fn from_ordinal(ordinal: i32) -> Option<FieldType> {
        Some(match ordinal {
            0 => FieldType::Enum,
            1 => FieldType::I8,
            2 => FieldType::U8,
            3 => FieldType::I16,
            4 => FieldType::U16,
            5 => FieldType::I32,
            6 => FieldType::U32,
            7 => FieldType::I64,
            8 => FieldType::U64,
            9 => FieldType::F32,
            10 => FieldType::F64,
            11 => FieldType::String,
            12 => FieldType::NoType,
            _ => return None,
        })
    }

    /// The wire ordinal for this type, per the binary frame layout.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// How this type is represented on the wire.
    pub fn wire_size(self) -> WireSize {
        match self {
            FieldType::Enum => WireSize::Fixed(4),
            FieldType::I8 | FieldType::U8 => WireSize::NonSerializable,
            FieldType::I16 | FieldType::U16 => WireSize::Fixed(2),
            FieldType::I32 | FieldType::U32 => WireSize::Fixed(4),
            FieldType::I64 | FieldType::U64 => WireSize::Fixed(8),
            FieldType::F32 => WireSize::Fixed(4),
            FieldType::F64 => WireSize::Fixed(8),
            FieldType::String => WireSize::Variable,
            FieldType::NoType => WireSize::Fixed(0),
        }
    }
}

impl From<FieldType> for i32 {
    fn from(ty: FieldType) -> i32 {
        ty.ordinal()
    }
}

/// A field's value: a tagged union with exactly one variant inhabited. The
/// inhabited variant *is* the field's type — there is no separate type tag
/// that could disagree with it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// See [`FieldType::Enum`].
    Enum(u32),
    /// See [`FieldType::I8`].
    I8(i8),
    /// See [`FieldType::U8`].
    U8(u8),
    /// See [`FieldType::I16`].
    I16(i16),
    /// See [`FieldType::U16`].
    U16(u16),
    /// See [`FieldType::I32`].
    I32(i32),
    /// See [`FieldType::U32`].
    U32(u32),
    /// See [`FieldType::I64`].
    I64(i64),
    /// See [`FieldType::U64`].
    U64(u64),
    /// See [`FieldType::F32`].
    F32(f32),
    /// See [`FieldType::F64`].
    F64(f64),
    /// See [`FieldType::String`]. Raw bytes; no UTF-8 requirement.
    String(Vec<u8>),
}

impl FieldValue {
    /// The type tag implied by this value's variant.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Enum(_) => FieldType::Enum,
            FieldValue::I8(_) => FieldType::I8,
            FieldValue::U8(_) => FieldType::U8,
            FieldValue::I16(_) => FieldType::I16,
            FieldValue::U16(_) => FieldType::U16,
            FieldValue::I32(_) => FieldType::I32,
            FieldValue::U32(_) => FieldType::U32,
            FieldValue::I64(_) => FieldType::I64,
            FieldValue::U64(_) => FieldType::U64,
            FieldValue::F32(_) => FieldType::F32,
            FieldValue::F64(_) => FieldType::F64,
            FieldValue::String(_) => FieldType::String,
        }
    }

    /// Returns the value as a string slice, if it is a `String` variant
    /// whose bytes happen to be valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// Returns the raw bytes of a `String` variant.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::String(bytes) => Some(bytes),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_roundtrip() {
        for ord in 0..=12 {
            let ty = FieldType::from_ordinal(ord).unwrap();
            assert_eq!(ty.ordinal(), ord);
        }
        assert_eq!(FieldType::from_ordinal(13), None);
        assert_eq!(FieldType::from_ordinal(-1), None);
        assert_eq!(FieldType::from_ordinal(99), None);
    }

    #[test]
    fn wire_size_matches_spec() {
        assert_eq!(FieldType::Enum.wire_size(), WireSize::Fixed(4));
        assert_eq!(FieldType::I16.wire_size(), WireSize::Fixed(2));
        assert_eq!(FieldType::U16.wire_size(), WireSize::Fixed(2));
        assert_eq!(FieldType::I32.wire_size(), WireSize::Fixed(4));
        assert_eq!(FieldType::U32.wire_size(), WireSize::Fixed(4));
        assert_eq!(FieldType::I64.wire_size(), WireSize::Fixed(8));
        assert_eq!(FieldType::U64.wire_size(), WireSize::Fixed(8));
        assert_eq!(FieldType::F32.wire_size(), WireSize::Fixed(4));
        assert_eq!(FieldType::F64.wire_size(), WireSize::Fixed(8));
        assert_eq!(FieldType::String.wire_size(), WireSize::Variable);
        assert_eq!(FieldType::NoType.wire_size(), WireSize::Fixed(0));
        assert_eq!(FieldType::I8.wire_size(), WireSize::NonSerializable);
        assert_eq!(FieldType::U8.wire_size(), WireSize::NonSerializable);
    }

    #[test]
    fn value_field_type_matches_variant() {
        assert_eq!(FieldValue::I32(5).field_type(), FieldType::I32);
        assert_eq!(
            FieldValue::String(b"abc".to_vec()).field_type(),
            FieldType::String
        );
    }

    #[test]
    fn string_bytes_are_raw() {
        let v = FieldValue::String(b"abc".to_vec());
        assert_eq!(v.as_bytes(), Some(&b"abc"[..]));
        assert_eq!(v.as_str(), Some("abc"));
    }
}
