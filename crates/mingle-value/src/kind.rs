//! Value kinds.
//!
//! [`ValueKind`] is the lightweight discriminant for [`Value`], used by
//! the core type registry to decide identity passthrough during casts
//! and by error messages to name a value's shape.

use std::fmt;

use crate::value::Value;

/// The kind/shape of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Buffer,
    Timestamp,
    Enum,
    List,
    SymbolMap,
    Struct,
}

impl ValueKind {
    /// The kind of a value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Boolean(_) => Self::Boolean,
            Value::Int32(_) => Self::Int32,
            Value::Int64(_) => Self::Int64,
            Value::Uint32(_) => Self::Uint32,
            Value::Uint64(_) => Self::Uint64,
            Value::Float32(_) => Self::Float32,
            Value::Float64(_) => Self::Float64,
            Value::String(_) => Self::String,
            Value::Buffer(_) => Self::Buffer,
            Value::Timestamp(_) => Self::Timestamp,
            Value::Enum(_) => Self::Enum,
            Value::List(_) => Self::List,
            Value::SymbolMap(_) => Self::SymbolMap,
            Value::Struct(_) => Self::Struct,
        }
    }

    /// True for the integral kinds.
    pub const fn is_integral(&self) -> bool {
        matches!(self, Self::Int32 | Self::Int64 | Self::Uint32 | Self::Uint64)
    }

    /// True for the floating-point kinds.
    pub const fn is_decimal(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// True for any numeric kind.
    pub const fn is_numeric(&self) -> bool {
        self.is_integral() || self.is_decimal()
    }

    /// A descriptive name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Buffer => "buffer",
            Self::Timestamp => "timestamp",
            Self::Enum => "enum",
            Self::List => "list",
            Self::SymbolMap => "symbol map",
            Self::Struct => "struct",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
