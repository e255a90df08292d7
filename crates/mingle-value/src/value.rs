//! The tagged value model.
//!
//! [`Value`] is a closed union of every value the interchange layer can
//! carry: scalars, byte buffers, timestamps, enums, lists, symbol maps
//! and typed structures. Composite values own their children; a value
//! built through the cast engine or the reactor builder never aliases
//! caller storage that a later coercion could rewrite.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use indexmap::IndexMap;

use crate::identifier::{Identifier, QualifiedTypeName};
use crate::kind::ValueKind;

/// An immutable byte buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buffer(Bytes);

impl Buffer {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    /// Decodes a standard-alphabet base64 string.
    pub fn from_base64(s: &str) -> Result<Self, base64::DecodeError> {
        use base64::Engine;
        let data = base64::engine::general_purpose::STANDARD.decode(s)?;
        Ok(Self(Bytes::from(data)))
    }

    /// Standard-alphabet base64 rendering.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.0)
    }

    /// Lowercase hex rendering, used by `inspect`.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A point in time with RFC3339 external form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// Parses an RFC3339 timestamp string.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(Self)
    }

    /// Canonical RFC3339 rendering with nanosecond precision.
    pub fn rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rfc3339())
    }
}

/// A member of a named enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MingleEnum {
    enum_type: QualifiedTypeName,
    value: Identifier,
}

impl MingleEnum {
    pub fn new(enum_type: QualifiedTypeName, value: Identifier) -> Self {
        Self { enum_type, value }
    }

    pub fn enum_type(&self) -> &QualifiedTypeName {
        &self.enum_type
    }

    pub fn value(&self) -> &Identifier {
        &self.value
    }
}

/// A mapping from identifiers to values.
///
/// Keys are unique; iteration preserves insertion order, which makes
/// `inspect` output and event streams deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolMap {
    fields: IndexMap<Identifier, Value>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, returning the previous value for the key if
    /// one was present.
    pub fn insert(&mut self, field: Identifier, value: Value) -> Option<Value> {
        self.fields.insert(field, value)
    }

    pub fn get(&self, field: &Identifier) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains_field(&self, field: &Identifier) -> bool {
        self.fields.contains_key(field)
    }

    /// Field/value pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&Identifier, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(Identifier, Value)> for SymbolMap {
    fn from_iter<I: IntoIterator<Item = (Identifier, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A typed structure: a qualified type name plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MingleStruct {
    struct_type: QualifiedTypeName,
    fields: SymbolMap,
}

impl MingleStruct {
    pub fn new(struct_type: QualifiedTypeName, fields: SymbolMap) -> Self {
        Self {
            struct_type,
            fields,
        }
    }

    pub fn struct_type(&self) -> &QualifiedTypeName {
        &self.struct_type
    }

    pub fn fields(&self) -> &SymbolMap {
        &self.fields
    }
}

/// Any value the interchange layer can carry.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Buffer(Buffer),
    Timestamp(Timestamp),
    Enum(MingleEnum),
    List(Vec<Value>),
    SymbolMap(SymbolMap),
    Struct(MingleStruct),
}

impl Value {
    /// The kind discriminant for this value.
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_value(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for the six numeric variants.
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn buffer(data: impl Into<Bytes>) -> Self {
        Self::Buffer(Buffer::new(data))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_symbol_map_preserves_insertion_order() {
        let mut m = SymbolMap::new();
        m.insert(Identifier::new("z"), Value::from(1i32));
        m.insert(Identifier::new("a"), Value::from(2i32));
        m.insert(Identifier::new("m"), Value::from(3i32));
        let keys: Vec<_> = m.fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_symbol_map_insert_returns_previous() {
        let mut m = SymbolMap::new();
        assert!(m.insert(Identifier::new("f"), Value::from(1i32)).is_none());
        let prev = m.insert(Identifier::new("f"), Value::from(2i32));
        assert_eq!(prev, Some(Value::Int32(1)));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_buffer_base64_round_trip() {
        let buf = Buffer::new(vec![1u8, 2, 3]);
        assert_eq!(buf.to_base64(), "AQID");
        assert_eq!(Buffer::from_base64("AQID").unwrap(), buf);
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let ts = Timestamp::parse("2013-10-19T02:47:00-08:00").unwrap();
        assert_eq!(ts.rfc3339(), "2013-10-19T02:47:00.000000000-08:00");
    }

    #[test]
    fn test_value_default_is_null() {
        assert_eq!(Value::default(), Value::Null);
    }
}
