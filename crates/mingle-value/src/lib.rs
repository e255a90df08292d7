//! Mingle value model, type reference algebra and cast engine.
//!
//! The pieces, leaves first: identifier/namespace/type-name tokens, the
//! tagged [`Value`] union, the [`TypeReference`] algebra with value
//! restrictions, the read-only core type registry, the [`cast_value`]
//! coercion engine with located errors, and the [`inspect`] debug
//! rendering.

#![warn(clippy::all)]

pub mod cast;
pub mod error;
pub mod identifier;
pub mod inspect;
pub mod kind;
pub mod registry;
pub mod typeref;
pub mod value;

// Re-export the working set
pub use cast::{cast_value, check_fields};
pub use error::{CastError, CastResult};
pub use identifier::{DeclaredTypeName, Identifier, Namespace, QualifiedTypeName};
pub use inspect::inspect;
pub use kind::ValueKind;
pub use registry::{core_types, CoreTypes};
pub use typeref::{
    AtomicTypeReference, ListTypeReference, NullableTypeReference, PatternRestriction,
    RangeRestriction, TypeName, TypeReference, ValueRestriction,
};
pub use value::{Buffer, MingleEnum, MingleStruct, SymbolMap, Timestamp, Value};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        cast_value, core_types, inspect, CastError, CastResult, Identifier, QualifiedTypeName,
        SymbolMap, TypeReference, Value, ValueKind,
    };
}
