//! Portable, endian-neutral binary serialization for schema-on-the-wire
//! dynamic messages.
//!
//! A [`Message`] is a named, ordered set of [`Field`]s whose types are
//! discovered at decode time rather than fixed by a compile-time schema.
//! [`frame::serialize`] and [`frame::deserialize`] convert between a
//! `Message` and its self-describing binary frame: a magic number, a total
//! length, the message name, a field count, and one sub-frame per field
//! (sub-frame length, name, type ordinal, value length, value bytes).
//! Every multi-byte scalar on the wire is big-endian; see [`primitive`] for
//! the packing functions and [`value::FieldType`] for the wire layout of
//! each type.

pub mod error;
pub mod field;
pub mod frame;
pub mod message;
pub mod primitive;
pub mod value;

pub use error::{Error, Result};
pub use field::Field;
pub use frame::{calc_serialized_len, deserialize, serialize, SerializedData, MAGIC};
pub use message::Message;
pub use value::{FieldType, FieldValue, WireSize};
