//! The core type registry.
//!
//! A process-wide, explicit table of the well-known core types: their
//! qualified names in `mingle:core@v1`, their unrestricted atomic
//! references, declared-name resolution, and the value variant each
//! atomic type governs. Built once behind [`core_types`], read-only
//! afterward.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::identifier::{DeclaredTypeName, Identifier, Namespace, QualifiedTypeName};
use crate::kind::ValueKind;
use crate::typeref::TypeReference;
use crate::value::Value;

/// The core namespace and its well-known types.
pub struct CoreTypes {
    pub ns_core: Namespace,

    pub qname_boolean: QualifiedTypeName,
    pub qname_int32: QualifiedTypeName,
    pub qname_int64: QualifiedTypeName,
    pub qname_uint32: QualifiedTypeName,
    pub qname_uint64: QualifiedTypeName,
    pub qname_float32: QualifiedTypeName,
    pub qname_float64: QualifiedTypeName,
    pub qname_string: QualifiedTypeName,
    pub qname_buffer: QualifiedTypeName,
    pub qname_timestamp: QualifiedTypeName,
    pub qname_symbol_map: QualifiedTypeName,
    pub qname_null: QualifiedTypeName,
    pub qname_value: QualifiedTypeName,

    pub type_boolean: TypeReference,
    pub type_int32: TypeReference,
    pub type_int64: TypeReference,
    pub type_uint32: TypeReference,
    pub type_uint64: TypeReference,
    pub type_float32: TypeReference,
    pub type_float64: TypeReference,
    pub type_string: TypeReference,
    pub type_buffer: TypeReference,
    pub type_timestamp: TypeReference,
    pub type_symbol_map: TypeReference,
    pub type_null: TypeReference,
    pub type_value: TypeReference,

    /// `mingle:core@v1/Value*` — the type inferred for any list value.
    pub type_opaque_list: TypeReference,

    decl_names: HashMap<DeclaredTypeName, QualifiedTypeName>,
    value_kinds: HashMap<QualifiedTypeName, ValueKind>,
}

impl CoreTypes {
    fn build() -> Self {
        let ns_core = Namespace::new(
            vec![Identifier::new("mingle"), Identifier::new("core")],
            Identifier::new("v1"),
        );

        let qname = |nm: &str| {
            QualifiedTypeName::new(ns_core.clone(), DeclaredTypeName::new(nm))
        };

        let qname_boolean = qname("Boolean");
        let qname_int32 = qname("Int32");
        let qname_int64 = qname("Int64");
        let qname_uint32 = qname("Uint32");
        let qname_uint64 = qname("Uint64");
        let qname_float32 = qname("Float32");
        let qname_float64 = qname("Float64");
        let qname_string = qname("String");
        let qname_buffer = qname("Buffer");
        let qname_timestamp = qname("Timestamp");
        let qname_symbol_map = qname("SymbolMap");
        let qname_null = qname("Null");
        let qname_value = qname("Value");

        let all = [
            &qname_boolean,
            &qname_int32,
            &qname_int64,
            &qname_uint32,
            &qname_uint64,
            &qname_float32,
            &qname_float64,
            &qname_string,
            &qname_buffer,
            &qname_timestamp,
            &qname_symbol_map,
            &qname_null,
            &qname_value,
        ];

        let mut decl_names = HashMap::new();
        for qn in all {
            decl_names.insert(qn.name().clone(), qn.clone());
        }

        // The explicit qname -> variant table. `Value` is deliberately
        // absent: it governs every variant and the cast engine
        // special-cases it.
        let mut value_kinds = HashMap::new();
        value_kinds.insert(qname_boolean.clone(), ValueKind::Boolean);
        value_kinds.insert(qname_int32.clone(), ValueKind::Int32);
        value_kinds.insert(qname_int64.clone(), ValueKind::Int64);
        value_kinds.insert(qname_uint32.clone(), ValueKind::Uint32);
        value_kinds.insert(qname_uint64.clone(), ValueKind::Uint64);
        value_kinds.insert(qname_float32.clone(), ValueKind::Float32);
        value_kinds.insert(qname_float64.clone(), ValueKind::Float64);
        value_kinds.insert(qname_string.clone(), ValueKind::String);
        value_kinds.insert(qname_buffer.clone(), ValueKind::Buffer);
        value_kinds.insert(qname_timestamp.clone(), ValueKind::Timestamp);
        value_kinds.insert(qname_symbol_map.clone(), ValueKind::SymbolMap);
        value_kinds.insert(qname_null.clone(), ValueKind::Null);

        let type_value = TypeReference::atomic(qname_value.clone());

        tracing::trace!(
            namespace = %ns_core,
            types = decl_names.len(),
            "initialized core type registry"
        );

        Self {
            type_boolean: TypeReference::atomic(qname_boolean.clone()),
            type_int32: TypeReference::atomic(qname_int32.clone()),
            type_int64: TypeReference::atomic(qname_int64.clone()),
            type_uint32: TypeReference::atomic(qname_uint32.clone()),
            type_uint64: TypeReference::atomic(qname_uint64.clone()),
            type_float32: TypeReference::atomic(qname_float32.clone()),
            type_float64: TypeReference::atomic(qname_float64.clone()),
            type_string: TypeReference::atomic(qname_string.clone()),
            type_buffer: TypeReference::atomic(qname_buffer.clone()),
            type_timestamp: TypeReference::atomic(qname_timestamp.clone()),
            type_symbol_map: TypeReference::atomic(qname_symbol_map.clone()),
            type_null: TypeReference::atomic(qname_null.clone()),
            type_opaque_list: TypeReference::list_of(type_value.clone(), true),
            type_value,
            ns_core,
            qname_boolean,
            qname_int32,
            qname_int64,
            qname_uint32,
            qname_uint64,
            qname_float32,
            qname_float64,
            qname_string,
            qname_buffer,
            qname_timestamp,
            qname_symbol_map,
            qname_null,
            qname_value,
            decl_names,
            value_kinds,
        }
    }

    /// Resolves a well-known declared name to its core qualified name.
    pub fn resolve(&self, name: &DeclaredTypeName) -> Option<&QualifiedTypeName> {
        self.decl_names.get(name)
    }

    /// The value variant governed by a core qualified name, if any.
    /// `Value` itself has no single variant and returns `None`.
    pub fn value_kind_for(&self, qname: &QualifiedTypeName) -> Option<ValueKind> {
        self.value_kinds.get(qname).copied()
    }

    /// True if the qualified name is one of the integral core types.
    pub fn is_integral(&self, qname: &QualifiedTypeName) -> bool {
        self.value_kind_for(qname).is_some_and(|k| k.is_integral())
    }

    /// True if the qualified name is one of the floating-point core
    /// types.
    pub fn is_decimal(&self, qname: &QualifiedTypeName) -> bool {
        self.value_kind_for(qname).is_some_and(|k| k.is_decimal())
    }
}

static CORE_TYPES: Lazy<CoreTypes> = Lazy::new(CoreTypes::build);

/// The process-wide core type registry.
pub fn core_types() -> &'static CoreTypes {
    &CORE_TYPES
}

impl Value {
    /// The type inferred from this value alone.
    ///
    /// Typed values report their own declared type; lists report the
    /// opaque `Value*` list type; every other variant reports its core
    /// atomic type.
    pub fn inferred_type(&self) -> TypeReference {
        let core = core_types();
        match self {
            Self::Null => core.type_null.clone(),
            Self::Boolean(_) => core.type_boolean.clone(),
            Self::Int32(_) => core.type_int32.clone(),
            Self::Int64(_) => core.type_int64.clone(),
            Self::Uint32(_) => core.type_uint32.clone(),
            Self::Uint64(_) => core.type_uint64.clone(),
            Self::Float32(_) => core.type_float32.clone(),
            Self::Float64(_) => core.type_float64.clone(),
            Self::String(_) => core.type_string.clone(),
            Self::Buffer(_) => core.type_buffer.clone(),
            Self::Timestamp(_) => core.type_timestamp.clone(),
            Self::Enum(en) => TypeReference::atomic(en.enum_type().clone()),
            Self::List(_) => core.type_opaque_list.clone(),
            Self::SymbolMap(_) => core.type_symbol_map.clone(),
            Self::Struct(st) => TypeReference::atomic(st.struct_type().clone()),
        }
    }
}
