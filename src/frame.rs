//! The self-describing binary frame format: magic header, total length,
//! message name, field count, then per-field sub-frames.
//!
//! See the crate documentation for the bit-exact layout.

use crate::error::{Error, Result};
use crate::field::Field;
use crate::message::Message;
use crate::primitive::{pack_i32, unpack_i32};
use crate::value::{FieldType, FieldValue, WireSize};

/// The 4-byte magic constant that marks the start of a frame: `0x3E3E3E3D`.
pub const MAGIC: i32 = 0x3E3E_3E3D;

/// A message whose computed frame length is at or below this many bytes is
/// treated as "nothing to emit" by [`serialize`]. It is only ever reached by
/// a message with an empty (or very short) name and no fields, or a single
/// field whose name and value are both empty.
const EMPTY_THRESHOLD: usize = 32;

/// An owned, serialized frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerializedData {
    bytes: Vec<u8>,
}

impl SerializedData {
    /// Borrows the serialized bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// The number of serialized bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether there are no serialized bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes `self`, returning the owned byte buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Releases the byte buffer, leaving `self` empty with no residual
    /// allocated capacity.
    pub fn clear(&mut self) {
        self.bytes = Vec::new();
    }
}

impl From<SerializedData> for Vec<u8> {
    fn from(data: SerializedData) -> Vec<u8> {
        data.into_vec()
    }
}

fn field_value_len(field: &Field) -> Result<usize> {
    match field.value() {
        None => Ok(0),
        Some(value) => match value.field_type().wire_size() {
            WireSize::Fixed(n) => Ok(n),
            WireSize::Variable => Ok(value.as_bytes().map(<[u8]>::len).unwrap_or(0)),
            WireSize::NonSerializable => Err(Error::NonSerializableType {
                field: field.name().to_string(),
                ty: field.field_type(),
            }),
        },
    }
}

/// Computes the exact number of bytes [`serialize`] would produce for `msg`,
/// without allocating the frame itself.
///
/// Fails with [`Error::NonSerializableType`] if `msg` contains a field whose
/// type has no wire representation (`I8`/`U8`).
pub fn calc_serialized_len(msg: &Message) -> Result<usize> {
    let mut len = 16 + msg.name().len();
    for field in msg.iter() {
        len += 16 + field.name().len() + field_value_len(field)?;
    }
    Ok(len)
}

fn encode_value(value: &FieldValue) -> Vec<u8> {
    use crate::primitive::{pack_f32, pack_f64, pack_i16, pack_i64, pack_u16, pack_u32, pack_u64};
    match value {
        FieldValue::Enum(v) => pack_u32(*v).to_vec(),
        FieldValue::I8(_) | FieldValue::U8(_) => unreachable!(
            "non-serializable types are rejected by calc_serialized_len before this point"
        ),
        FieldValue::I16(v) => pack_i16(*v).to_vec(),
        FieldValue::U16(v) => pack_u16(*v).to_vec(),
        FieldValue::I32(v) => pack_i32(*v).to_vec(),
        FieldValue::U32(v) => pack_u32(*v).to_vec(),
        FieldValue::I64(v) => pack_i64(*v).to_vec(),
        FieldValue::U64(v) => pack_u64(*v).to_vec(),
        FieldValue::F32(v) => pack_f32(*v).to_vec(),
        FieldValue::F64(v) => pack_f64(*v).to_vec(),
        FieldValue::String(bytes) => bytes.clone(),
    }
}

fn write_field(buf: &mut Vec<u8>, field: &Field) {
    let value_bytes = field.value().map(encode_value).unwrap_or_default();
    let sub_len = 16 + field.name().len() + value_bytes.len();
    buf.extend_from_slice(&pack_i32(sub_len as i32));
    buf.extend_from_slice(&pack_i32(field.name().len() as i32));
    buf.extend_from_slice(field.name().as_bytes());
    buf.extend_from_slice(&pack_i32(field.field_type().ordinal()));
    buf.extend_from_slice(&pack_i32(value_bytes.len() as i32));
    buf.extend_from_slice(&value_bytes);
}

/// Serializes `msg` into its framed wire form.
///
/// Returns `Ok(None)` if `msg`'s computed length is at or below
/// [`EMPTY_THRESHOLD`] (the degenerate "nothing to emit" case — see the
/// crate documentation). Fails with [`Error::NonSerializableType`] if `msg`
/// contains an `I8` or `U8` field.
pub fn serialize(msg: &Message) -> Result<Option<SerializedData>> {
    let total_len = calc_serialized_len(msg)?;
    if total_len <= EMPTY_THRESHOLD {
        return Ok(None);
    }

    let mut buf = Vec::with_capacity(total_len);
    buf.extend_from_slice(&pack_i32(MAGIC));
    buf.extend_from_slice(&pack_i32(total_len as i32));
    buf.extend_from_slice(&pack_i32(msg.name().len() as i32));
    buf.extend_from_slice(msg.name().as_bytes());
    buf.extend_from_slice(&pack_i32(msg.field_count() as i32));
    for field in msg.iter() {
        write_field(&mut buf, field);
    }

    debug_assert_eq!(buf.len(), total_len);
    Ok(Some(SerializedData { bytes: buf }))
}

fn check_bounds(data: &[u8], at: usize, len: usize, step: &'static str) -> Result<()> {
    if at.checked_add(len).map_or(true, |end| end > data.len()) {
        return Err(Error::Truncated {
            step,
            actual: data.len().saturating_sub(at),
            expected: len,
        });
    }
    Ok(())
}

fn read_i32(data: &[u8], at: usize, step: &'static str) -> Result<i32> {
    check_bounds(data, at, 4, step)?;
    Ok(unpack_i32(&data[at..at + 4]))
}

/// Reads a signed length prefix and validates it is non-negative and that
/// the buffer has at least that many bytes remaining from `at`.
fn read_len(data: &[u8], at: usize, step: &'static str) -> Result<usize> {
    let raw = read_i32(data, at, step)?;
    if raw < 0 {
        return Err(Error::Truncated {
            step,
            actual: data.len().saturating_sub(at),
            expected: 0,
        });
    }
    let len = raw as usize;
    check_bounds(data, at + 4, len, step)?;
    Ok(len)
}

fn read_str(data: &[u8], at: usize, len: usize, step: &'static str) -> Result<String> {
    String::from_utf8(data[at..at + len].to_vec()).map_err(|_| Error::InvalidUtf8 { step })
}

fn decode_value(ty: FieldType, bytes: &[u8], step: &'static str) -> Result<FieldValue> {
    let expect = |n: usize| -> Result<()> {
        if bytes.len() != n {
            Err(Error::Truncated {
                step,
                actual: bytes.len(),
                expected: n,
            })
        } else {
            Ok(())
        }
    };
    use crate::primitive::{unpack_f32, unpack_f64, unpack_i16, unpack_i64, unpack_u16, unpack_u32, unpack_u64};
    Ok(match ty {
        FieldType::Enum => {
            expect(4)?;
            FieldValue::Enum(unpack_u32(bytes))
        }
        FieldType::I16 => {
            expect(2)?;
            FieldValue::I16(unpack_i16(bytes))
        }
        FieldType::U16 => {
            expect(2)?;
            FieldValue::U16(unpack_u16(bytes))
        }
        FieldType::I32 => {
            expect(4)?;
            FieldValue::I32(unpack_i32(bytes))
        }
        FieldType::U32 => {
            expect(4)?;
            FieldValue::U32(unpack_u32(bytes))
        }
        FieldType::I64 => {
            expect(8)?;
            FieldValue::I64(unpack_i64(bytes))
        }
        FieldType::U64 => {
            expect(8)?;
            FieldValue::U64(unpack_u64(bytes))
        }
        FieldType::F32 => {
            expect(4)?;
            FieldValue::F32(unpack_f32(bytes))
        }
        FieldType::F64 => {
            expect(8)?;
            FieldValue::F64(unpack_f64(bytes))
        }
        FieldType::String => FieldValue::String(bytes.to_vec()),
        FieldType::I8 | FieldType::U8 | FieldType::NoType => {
            unreachable!("caller filters these out before calling decode_value")
        }
    })
}

/// Decodes one field sub-frame starting at `cursor`, inserts the decoded
/// field into `msg`, and returns the cursor advanced past the sub-frame.
fn decode_field(frame: &[u8], cursor: usize, msg: &mut Message) -> Result<usize> {
    let mut cursor = cursor;
    let _sub_len = read_len(frame, cursor, "field sub-frame length")?;
    cursor += 4;
    let name_len = read_len(frame, cursor, "field name length")?;
    cursor += 4;
    let name = read_str(frame, cursor, name_len, "field name")?;
    cursor += name_len;
    let type_ordinal = read_i32(frame, cursor, "field type")?;
    cursor += 4;
    let value_len = read_len(frame, cursor, "field value length")?;
    cursor += 4;
    let value_bytes = &frame[cursor..cursor + value_len];
    cursor += value_len;

    let ty = FieldType::from_ordinal(type_ordinal);
    let value = match ty {
        Some(t) if t.wire_size() != WireSize::NonSerializable && t != FieldType::NoType => {
            Some(decode_value(t, value_bytes, "field value")?)
        }
        _ => None,
    };
    msg.insert_decoded(name, value);
    Ok(cursor)
}

/// Parses a framed message out of `data`.
///
/// Fails with [`Error::BadMagic`] if the first four bytes are not the magic
/// constant, and with [`Error::Truncated`] if the declared total length
/// exceeds `data.len()` or any sub-frame runs past the end of the buffer.
/// A frame that parses successfully but declares zero fields is not an
/// error: it is logged and returned as a message with `field_count() == 0`.
pub fn deserialize(data: &[u8]) -> Result<Message> {
    if data.len() < 4 {
        return Err(Error::BadMagic {
            expected: MAGIC,
            actual: 0,
        });
    }
    let magic = unpack_i32(&data[0..4]);
    if magic != MAGIC {
        return Err(Error::BadMagic {
            expected: MAGIC,
            actual: magic,
        });
    }

    let total_len = read_i32(data, 4, "total length")?;
    if total_len < 0 || (total_len as usize) > data.len() {
        return Err(Error::Truncated {
            step: "total length",
            actual: data.len(),
            expected: total_len.max(0) as usize,
        });
    }
    let frame = &data[..total_len as usize];

    let mut cursor = 8usize;
    let name_len = read_len(frame, cursor, "message name length")?;
    cursor += 4;
    let name = read_str(frame, cursor, name_len, "message name")?;
    cursor += name_len;

    let field_count = read_len(frame, cursor, "field count")?;
    cursor += 4;

    let mut msg = Message::new(name);
    if field_count == 0 {
        log::warn!(
            "deserialized message '{}' declares zero fields",
            msg.name()
        );
    }
    for _ in 0..field_count {
        cursor = decode_field(frame, cursor, &mut msg)?;
    }

    Ok(msg)
}
