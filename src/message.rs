//! The dynamic message container.

use indexmap::IndexMap;

use crate::field::Field;
use crate::value::{FieldType, FieldValue};

/// A named, ordered, heterogeneous record whose schema is carried with the
/// data rather than fixed at compile time.
///
/// Fields are addressable by name in expected O(1) time and are always
/// iterated in `seq` order (the order they were first added). Re-`put`ting
/// an existing name replaces its value and type in place without disturbing
/// its `seq` or its position in that iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    name: String,
    fields: IndexMap<String, Field>,
}

impl Message {
    /// Creates a new, empty message with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Message {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// The message's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of fields currently in the message.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Inserts a new field or replaces an existing one.
    ///
    /// If `name` is not already present, a new field is appended with the
    /// next `seq`. If it is present, the value (and therefore the type) is
    /// replaced in place; `seq` is preserved.
    pub fn put(&mut self, name: impl Into<String>, value: FieldValue) -> &Field {
        let name = name.into();
        if self.fields.contains_key(&name) {
            let field = self.fields.get_mut(&name).unwrap();
            field.set_value(value);
        } else {
            let seq = self.fields.len() as u32 + 1;
            let field = Field::new(name.clone(), Some(value), seq);
            self.fields.insert(name.clone(), field);
        }
        self.fields.get(&name).unwrap()
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns a fully-owned snapshot of the message's fields, in `seq`
    /// order: entry `i` is the field whose `seq() == i + 1`.
    pub fn fields(&self) -> Vec<Field> {
        self.fields.values().cloned().collect()
    }

    /// Iterates over the message's fields in `seq` order, without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Inserts a field decoded directly off the wire, preserving whatever
    /// `seq` its position in the frame implies. Used only by
    /// [`crate::frame::deserialize`]: unlike [`Message::put`], it allows a
    /// field to have no value at all (an unrecognized wire ordinal decodes
    /// to [`FieldType::NoType`] with no value).
    pub(crate) fn insert_decoded(&mut self, name: String, value: Option<FieldValue>) {
        let seq = self.fields.len() as u32 + 1;
        let field = Field::new(name.clone(), value, seq);
        self.fields.insert(name, field);
    }

    /// The type of a named field, or [`FieldType::NoType`] if absent. A
    /// Rust-idiomatic stand-in for the C original's sentinel return.
    pub fn field_type(&self, name: &str) -> FieldType {
        self.get(name)
            .map(Field::field_type)
            .unwrap_or(FieldType::NoType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_appends_in_order() {
        let mut msg = Message::new("m");
        msg.put("a", FieldValue::I32(1));
        msg.put("b", FieldValue::I32(2));
        msg.put("c", FieldValue::I32(3));
        let names: Vec<_> = msg.iter().map(Field::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        for (i, f) in msg.fields().iter().enumerate() {
            assert_eq!(f.seq(), (i + 1) as u32);
        }
    }

    #[test]
    fn replace_preserves_seq_and_count() {
        let mut msg = Message::new("m");
        msg.put("f", FieldValue::I32(7));
        msg.put("f", FieldValue::I32(9));
        assert_eq!(msg.field_count(), 1);
        let f = msg.get("f").unwrap();
        assert_eq!(f.seq(), 1);
        assert_eq!(f.value(), Some(&FieldValue::I32(9)));
    }

    #[test]
    fn replace_with_different_type_updates_type() {
        let mut msg = Message::new("m");
        msg.put("f", FieldValue::I32(7));
        msg.put("f", FieldValue::String(b"hi".to_vec()));
        assert_eq!(msg.field_count(), 1);
        let f = msg.get("f").unwrap();
        assert_eq!(f.seq(), 1);
        assert_eq!(f.field_type(), FieldType::String);
    }

    #[test]
    fn get_missing_is_none() {
        let msg = Message::new("m");
        assert!(msg.get("nope").is_none());
        assert_eq!(msg.field_type("nope"), FieldType::NoType);
    }

    #[test]
    fn empty_message_has_empty_snapshot() {
        let msg = Message::new("empty");
        assert_eq!(msg.field_count(), 0);
        assert!(msg.fields().is_empty());
    }

    #[test]
    fn snapshot_does_not_alias_message() {
        let mut msg = Message::new("m");
        msg.put("f", FieldValue::I32(1));
        let snap = msg.fields();
        msg.put("f", FieldValue::I32(2));
        assert_eq!(snap[0].value(), Some(&FieldValue::I32(1)));
        assert_eq!(msg.get("f").unwrap().value(), Some(&FieldValue::I32(2)));
    }
}
