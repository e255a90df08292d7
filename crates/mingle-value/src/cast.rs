//! The cast engine.
//!
//! [`cast_value`] coerces a value into conformance with a target type
//! reference, or fails with a located [`CastError`]. Dispatch is
//! structurally recursive on the target: atomic targets go through
//! identity passthrough, then per-type coercion, then restriction
//! checking; list targets rebuild a fresh list element by element;
//! nullable targets pass `Null` through and otherwise recurse while
//! keeping the nullable type for error reporting.
//!
//! There is no best-effort fallback: every value-variant/target pair
//! not handled below is a deliberate type-cast failure.

use mingle_path::{ListPath, ObjectPath};

use crate::error::{CastError, CastResult};
use crate::identifier::{Identifier, QualifiedTypeName};
use crate::inspect::inspect;
use crate::kind::ValueKind;
use crate::registry::core_types;
use crate::typeref::{AtomicTypeReference, ListTypeReference, TypeReference};
use crate::value::{Buffer, SymbolMap, Timestamp, Value};

/// Coerces `value` to `target`, reporting failures at `path`.
pub fn cast_value(
    value: &Value,
    target: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    impl_cast(value, target, target, path)
}

/// `call_type` is the type reported in mismatch errors; it differs from
/// `target` only after unwrapping a nullable.
fn impl_cast(
    value: &Value,
    target: &TypeReference,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    match target {
        TypeReference::Atomic(at) => cast_atomic(value, at, call_type, path),
        TypeReference::List(lt) => cast_list(value, lt, call_type, path),
        TypeReference::Nullable(nt) => {
            if value.is_null() {
                return Ok(Value::Null);
            }
            impl_cast(value, nt.inner(), call_type, path)
        }
    }
}

fn type_error(
    call_type: &TypeReference,
    actual: &Value,
    path: &ObjectPath<Identifier>,
) -> CastError {
    CastError::type_cast(call_type.clone(), actual.inferred_type(), path)
}

fn cast_atomic(
    value: &Value,
    at: &AtomicTypeReference,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    let cast = cast_atomic_unrestricted(value, at, call_type, path)?;
    if let Some(restriction) = at.restriction() {
        if !restriction.accepts(&cast) {
            return Err(CastError::value_cast(
                format!(
                    "value {} does not satisfy restriction {}",
                    inspect(&cast),
                    restriction.external_form()
                ),
                path,
            ));
        }
    }
    Ok(cast)
}

fn cast_atomic_unrestricted(
    value: &Value,
    at: &AtomicTypeReference,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    let core = core_types();

    if value.is_null() {
        if at.is_unrestricted(&core.qname_null) {
            return Ok(Value::Null);
        }
        return Err(CastError::value_cast("value is null", path));
    }

    let Some(qn) = at.name().as_qualified() else {
        // Unresolved declared names never govern a value variant.
        return Err(type_error(call_type, value, path));
    };

    // Identity passthrough: the target governs exactly this variant.
    if core.value_kind_for(qn) == Some(value.kind()) {
        return Ok(value.clone());
    }

    // The Value type accepts anything.
    if qn == &core.qname_value {
        return Ok(value.clone());
    }

    if qn == &core.qname_boolean {
        return cast_as_boolean(value, call_type, path);
    }
    if qn == &core.qname_string {
        return cast_as_string(value, call_type, path);
    }
    if qn == &core.qname_buffer {
        return cast_as_buffer(value, call_type, path);
    }
    if qn == &core.qname_timestamp {
        return cast_as_timestamp(value, call_type, path);
    }
    if core.value_kind_for(qn).is_some_and(|k| k.is_numeric()) {
        return cast_as_number(value, qn, call_type, path);
    }

    // Non-core target: typed values match on exact type identity, with
    // no structural subtyping.
    match value {
        Value::Enum(en) if en.enum_type() == qn => Ok(value.clone()),
        Value::Struct(st) if st.struct_type() == qn => Ok(value.clone()),
        _ => Err(type_error(call_type, value, path)),
    }
}

fn cast_as_boolean(
    value: &Value,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    match value {
        Value::String(s) => {
            if s.eq_ignore_ascii_case("true") {
                Ok(Value::Boolean(true))
            } else if s.eq_ignore_ascii_case("false") {
                Ok(Value::Boolean(false))
            } else {
                Err(CastError::value_cast(
                    format!("invalid boolean value: \"{s}\""),
                    path,
                ))
            }
        }
        _ => Err(type_error(call_type, value, path)),
    }
}

fn cast_as_string(
    value: &Value,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    let s = match value {
        Value::Boolean(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Uint64(v) => v.to_string(),
        Value::Float32(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Buffer(buf) => buf.to_base64(),
        Value::Timestamp(ts) => ts.rfc3339(),
        Value::Enum(en) => en.value().external_form().to_owned(),
        _ => return Err(type_error(call_type, value, path)),
    };
    Ok(Value::String(s))
}

fn cast_as_buffer(
    value: &Value,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    match value {
        Value::String(s) => Buffer::from_base64(s).map(Value::Buffer).map_err(|err| {
            CastError::value_cast_with_source(err.to_string(), path, err)
        }),
        _ => Err(type_error(call_type, value, path)),
    }
}

fn cast_as_timestamp(
    value: &Value,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    match value {
        Value::String(s) => Timestamp::parse(s).map(Value::Timestamp).map_err(|err| {
            CastError::value_cast_with_source(
                format!("invalid timestamp: \"{s}\""),
                path,
                err,
            )
        }),
        _ => Err(type_error(call_type, value, path)),
    }
}

fn cast_as_number(
    value: &Value,
    qn: &QualifiedTypeName,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    match value {
        Value::String(s) => parse_number(s, qn, path),
        v if v.is_numeric() => {
            convert_number(v, qn).ok_or_else(|| type_error(call_type, value, path))
        }
        _ => Err(type_error(call_type, value, path)),
    }
}

/// True for strings that must parse as floating point regardless of the
/// numeric target.
fn is_decimal_string(s: &str) -> bool {
    s.contains(['.', 'e', 'E'])
}

fn parse_number(
    s: &str,
    qn: &QualifiedTypeName,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    let core = core_types();
    if qn == &core.qname_float32 {
        return s
            .parse::<f32>()
            .map(Value::Float32)
            .map_err(|err| float_parse_error(s, path, err));
    }
    if qn == &core.qname_float64 {
        return s
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|err| float_parse_error(s, path, err));
    }
    if is_decimal_string(s) {
        let f = s
            .parse::<f64>()
            .map_err(|err| float_parse_error(s, path, err))?;
        // Conversion to an integral target cannot fail from Float64.
        return convert_number(&Value::Float64(f), qn)
            .ok_or_else(|| CastError::value_cast(format!("invalid syntax: {s}"), path));
    }
    let parsed = match core.value_kind_for(qn) {
        Some(ValueKind::Int32) => s.parse::<i32>().map(Value::Int32),
        Some(ValueKind::Int64) => s.parse::<i64>().map(Value::Int64),
        Some(ValueKind::Uint32) => s.parse::<u32>().map(Value::Uint32),
        Some(ValueKind::Uint64) => s.parse::<u64>().map(Value::Uint64),
        _ => return Err(CastError::value_cast(format!("invalid syntax: {s}"), path)),
    };
    parsed.map_err(|err| int_parse_error(s, path, err))
}

fn int_parse_error(
    s: &str,
    path: &ObjectPath<Identifier>,
    err: std::num::ParseIntError,
) -> CastError {
    use std::num::IntErrorKind;
    let message = match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            format!("value out of range: {s}")
        }
        _ => format!("invalid syntax: {s}"),
    };
    CastError::value_cast_with_source(message, path, err)
}

fn float_parse_error(
    s: &str,
    path: &ObjectPath<Identifier>,
    err: std::num::ParseFloatError,
) -> CastError {
    CastError::value_cast_with_source(format!("invalid syntax: {s}"), path, err)
}

/// Converts between numeric variants with the target's width and
/// signedness. Returns `None` when either side is not numeric.
fn convert_number(value: &Value, qn: &QualifiedTypeName) -> Option<Value> {
    use Value::{Float32, Float64, Int32, Int64, Uint32, Uint64};

    let core = core_types();
    let converted = match core.value_kind_for(qn)? {
        ValueKind::Int32 => Int32(match value {
            Int32(v) => *v,
            Int64(v) => *v as i32,
            Uint32(v) => *v as i32,
            Uint64(v) => *v as i32,
            Float32(v) => *v as i32,
            Float64(v) => *v as i32,
            _ => return None,
        }),
        ValueKind::Int64 => Int64(match value {
            Int32(v) => i64::from(*v),
            Int64(v) => *v,
            Uint32(v) => i64::from(*v),
            Uint64(v) => *v as i64,
            Float32(v) => *v as i64,
            Float64(v) => *v as i64,
            _ => return None,
        }),
        ValueKind::Uint32 => Uint32(match value {
            Int32(v) => *v as u32,
            Int64(v) => *v as u32,
            Uint32(v) => *v,
            Uint64(v) => *v as u32,
            Float32(v) => *v as u32,
            Float64(v) => *v as u32,
            _ => return None,
        }),
        ValueKind::Uint64 => Uint64(match value {
            Int32(v) => *v as u64,
            Int64(v) => *v as u64,
            Uint32(v) => u64::from(*v),
            Uint64(v) => *v,
            Float32(v) => *v as u64,
            Float64(v) => *v as u64,
            _ => return None,
        }),
        ValueKind::Float32 => Float32(match value {
            Int32(v) => *v as f32,
            Int64(v) => *v as f32,
            Uint32(v) => *v as f32,
            Uint64(v) => *v as f32,
            Float32(v) => *v,
            Float64(v) => *v as f32,
            _ => return None,
        }),
        ValueKind::Float64 => Float64(match value {
            Int32(v) => f64::from(*v),
            Int64(v) => *v as f64,
            Uint32(v) => f64::from(*v),
            Uint64(v) => *v as f64,
            Float32(v) => f64::from(*v),
            Float64(v) => *v,
            _ => return None,
        }),
        _ => return None,
    };
    Some(converted)
}

fn cast_list(
    value: &Value,
    lt: &ListTypeReference,
    call_type: &TypeReference,
    path: &ObjectPath<Identifier>,
) -> CastResult<Value> {
    let Value::List(elements) = value else {
        return Err(type_error(call_type, value, path));
    };
    if elements.is_empty() {
        if lt.allows_empty() {
            return Ok(Value::List(Vec::new()));
        }
        return Err(CastError::value_cast("list is empty", path));
    }
    // Always a fresh backing sequence, even when no element needs
    // coercion.
    let mut out = Vec::with_capacity(elements.len());
    let mut cursor = path.start_list();
    for element in elements {
        out.push(impl_cast(
            element,
            lt.element(),
            lt.element(),
            &cursor.to_path(),
        )?);
        cursor = cursor.next();
    }
    Ok(Value::List(out))
}

/// Validates a map's field set against a structure's declared fields:
/// every key must be declared, and every required field must be
/// present.
pub fn check_fields(
    map: &SymbolMap,
    required: &[Identifier],
    optional: &[Identifier],
    path: &ObjectPath<Identifier>,
) -> CastResult<()> {
    for (field, _) in map.fields() {
        if !required.contains(field) && !optional.contains(field) {
            return Err(CastError::unrecognized_field(field.clone(), path));
        }
    }
    let missing: Vec<Identifier> = required
        .iter()
        .filter(|f| !map.contains_field(f))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CastError::missing_fields(missing, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{DeclaredTypeName, Namespace};
    use crate::typeref::{RangeRestriction, ValueRestriction};
    use crate::value::{MingleEnum, MingleStruct};
    use pretty_assertions::assert_eq;

    fn root() -> ObjectPath<Identifier> {
        ObjectPath::root()
    }

    fn cast_ok(value: Value, target: &TypeReference) -> Value {
        cast_value(&value, target, &root()).unwrap()
    }

    fn cast_err(value: Value, target: &TypeReference) -> CastError {
        cast_value(&value, target, &root()).unwrap_err()
    }

    fn user_qname(name: &str) -> QualifiedTypeName {
        let ns = Namespace::new(
            vec![Identifier::new("ns1")],
            Identifier::new("v1"),
        );
        QualifiedTypeName::new(ns, DeclaredTypeName::new(name))
    }

    #[test]
    fn test_identity_passthrough() {
        let core = core_types();
        assert_eq!(cast_ok(Value::from(7i32), &core.type_int32), Value::Int32(7));
        assert_eq!(
            cast_ok(Value::from("hi"), &core.type_string),
            Value::from("hi")
        );
        assert_eq!(cast_ok(Value::Null, &core.type_null), Value::Null);
    }

    #[test]
    fn test_value_target_accepts_anything() {
        let core = core_types();
        assert_eq!(cast_ok(Value::from(true), &core.type_value), Value::Boolean(true));
        let list = Value::List(vec![Value::from(1i32)]);
        assert_eq!(cast_ok(list.clone(), &core.type_value), list);
    }

    #[test]
    fn test_null_rejected_by_non_null_target() {
        let core = core_types();
        let err = cast_err(Value::Null, &core.type_int32);
        assert_eq!(err.to_string(), "value is null");
    }

    #[test]
    fn test_string_from_scalars() {
        let core = core_types();
        assert_eq!(cast_ok(Value::from(true), &core.type_string), Value::from("true"));
        assert_eq!(cast_ok(Value::from(42i64), &core.type_string), Value::from("42"));
        assert_eq!(
            cast_ok(Value::buffer(vec![1u8, 2, 3]), &core.type_string),
            Value::from("AQID")
        );
        let ts = Timestamp::parse("2013-10-19T02:47:00-08:00").unwrap();
        assert_eq!(
            cast_ok(Value::Timestamp(ts), &core.type_string),
            Value::from("2013-10-19T02:47:00.000000000-08:00")
        );
        let en = MingleEnum::new(user_qname("Color"), Identifier::new("red"));
        assert_eq!(cast_ok(Value::Enum(en), &core.type_string), Value::from("red"));
    }

    #[test]
    fn test_numeric_from_string() {
        let core = core_types();
        assert_eq!(cast_ok(Value::from("17"), &core.type_int32), Value::Int32(17));
        assert_eq!(
            cast_ok(Value::from("-42"), &core.type_int64),
            Value::Int64(-42)
        );
        assert_eq!(
            cast_ok(Value::from("3.25"), &core.type_float64),
            Value::Float64(3.25)
        );
    }

    #[test]
    fn test_decimal_string_to_integral_truncates() {
        let core = core_types();
        assert_eq!(cast_ok(Value::from("1.5"), &core.type_int32), Value::Int32(1));
        assert_eq!(
            cast_ok(Value::from("1e2"), &core.type_uint64),
            Value::Uint64(100)
        );
    }

    #[test]
    fn test_invalid_numeric_syntax_normalized() {
        let core = core_types();
        let err = cast_err(Value::from("abc"), &core.type_int32);
        assert_eq!(err.to_string(), "invalid syntax: abc");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_numeric_out_of_range() {
        let core = core_types();
        let err = cast_err(Value::from("99999999999999999999"), &core.type_int64);
        assert_eq!(err.to_string(), "value out of range: 99999999999999999999");
    }

    #[test]
    fn test_numeric_conversions() {
        let core = core_types();
        assert_eq!(
            cast_ok(Value::from(1.9f64), &core.type_int32),
            Value::Int32(1)
        );
        assert_eq!(
            cast_ok(Value::from(7i32), &core.type_float64),
            Value::Float64(7.0)
        );
        assert_eq!(
            cast_ok(Value::from(7u32), &core.type_uint64),
            Value::Uint64(7)
        );
    }

    #[test]
    fn test_boolean_from_string() {
        let core = core_types();
        assert_eq!(cast_ok(Value::from("TRUE"), &core.type_boolean), Value::Boolean(true));
        assert_eq!(
            cast_ok(Value::from("false"), &core.type_boolean),
            Value::Boolean(false)
        );
        let err = cast_err(Value::from("yes"), &core.type_boolean);
        assert_eq!(err.to_string(), "invalid boolean value: \"yes\"");
    }

    #[test]
    fn test_buffer_from_base64_string() {
        let core = core_types();
        assert_eq!(
            cast_ok(Value::from("AQID"), &core.type_buffer),
            Value::buffer(vec![1u8, 2, 3])
        );
        let err = cast_err(Value::from("not base64!!"), &core.type_buffer);
        assert!(matches!(err, CastError::ValueCast { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_timestamp_from_string() {
        let core = core_types();
        let cast = cast_ok(
            Value::from("2013-10-19T02:47:00-08:00"),
            &core.type_timestamp,
        );
        assert!(matches!(cast, Value::Timestamp(_)));
        let err = cast_err(Value::from("not a time"), &core.type_timestamp);
        assert_eq!(err.to_string(), "invalid timestamp: \"not a time\"");
    }

    #[test]
    fn test_type_mismatch_message() {
        let core = core_types();
        let err = cast_err(Value::from(true), &core.type_buffer);
        assert_eq!(
            err.to_string(),
            "expected mingle:core@v1/Buffer but got mingle:core@v1/Boolean"
        );
    }

    #[test]
    fn test_typed_values_need_exact_type() {
        let t1 = TypeReference::atomic(user_qname("T1"));
        let t2 = TypeReference::atomic(user_qname("T2"));
        let st = Value::Struct(MingleStruct::new(user_qname("T1"), SymbolMap::new()));
        assert_eq!(cast_ok(st.clone(), &t1), st);
        let err = cast_err(st, &t2);
        assert_eq!(err.to_string(), "expected ns1@v1/T2 but got ns1@v1/T1");
    }

    #[test]
    fn test_restriction_applied_after_cast() {
        let core = core_types();
        let t = TypeReference::restricted(
            core.qname_int32.clone(),
            ValueRestriction::Range(RangeRestriction::closed(0.0, 10.0)),
        );
        assert_eq!(cast_ok(Value::from("7"), &t), Value::Int32(7));
        let err = cast_err(Value::from("12"), &t);
        assert_eq!(
            err.to_string(),
            "value 12 does not satisfy restriction [0,10]"
        );
    }

    #[test]
    fn test_nullable_passthrough_and_error_type() {
        let core = core_types();
        let t = TypeReference::nullable_of(core.type_int32.clone());
        assert_eq!(cast_ok(Value::Null, &t), Value::Null);
        assert_eq!(cast_ok(Value::from("5"), &t), Value::Int32(5));
        let err = cast_err(Value::buffer(vec![1u8]), &t);
        assert_eq!(
            err.to_string(),
            "expected mingle:core@v1/Int32? but got mingle:core@v1/Buffer"
        );
    }

    #[test]
    fn test_empty_list_policy() {
        let core = core_types();
        let allows = TypeReference::list_of(core.type_int32.clone(), true);
        let rejects = TypeReference::list_of(core.type_int32.clone(), false);
        assert_eq!(cast_ok(Value::List(vec![]), &allows), Value::List(vec![]));
        let err = cast_err(Value::List(vec![]), &rejects);
        assert_eq!(err.to_string(), "list is empty");
    }

    #[test]
    fn test_list_cast_coerces_elements_in_order() {
        let core = core_types();
        let t = TypeReference::list_of(core.type_int32.clone(), false);
        let input = Value::List(vec![
            Value::from(1i32),
            Value::from("2"),
            Value::from(3.0f64),
        ]);
        assert_eq!(
            cast_ok(input, &t),
            Value::List(vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)])
        );
    }

    #[test]
    fn test_list_target_rejects_non_list() {
        let core = core_types();
        let t = TypeReference::list_of(core.type_int32.clone(), true);
        let err = cast_err(Value::from(1i32), &t);
        assert_eq!(
            err.to_string(),
            "expected mingle:core@v1/Int32* but got mingle:core@v1/Int32"
        );
    }

    #[test]
    fn test_error_path_points_at_failing_element() {
        let core = core_types();
        let t = TypeReference::list_of(core.type_int32.clone(), false);
        let input = Value::List(vec![
            Value::from(1i32),
            Value::from(2i32),
            Value::from("bad"),
        ]);
        // A caller casting the value at {"a": {"b": [...]}} threads the
        // location of the list into the cast.
        let location = root()
            .descend(Identifier::new("a"))
            .descend(Identifier::new("b"));
        let err = cast_value(&input, &t, &location).unwrap_err();
        assert_eq!(err.to_string(), "a.b[ 2 ]: invalid syntax: bad");
    }

    #[test]
    fn test_nested_list_cast() {
        let core = core_types();
        let inner = TypeReference::list_of(core.type_int32.clone(), true);
        let t = TypeReference::list_of(inner, true);
        let input = Value::List(vec![Value::List(vec![Value::from("4")])]);
        assert_eq!(
            cast_ok(input, &t),
            Value::List(vec![Value::List(vec![Value::Int32(4)])])
        );
    }

    #[test]
    fn test_check_fields() {
        let req = [Identifier::new("f1"), Identifier::new("f2")];
        let opt = [Identifier::new("f3")];

        let mut ok = SymbolMap::new();
        ok.insert(Identifier::new("f1"), Value::from(1i32));
        ok.insert(Identifier::new("f2"), Value::from(2i32));
        assert!(check_fields(&ok, &req, &opt, &root()).is_ok());

        let mut unknown = ok.clone();
        unknown.insert(Identifier::new("f9"), Value::Null);
        let err = check_fields(&unknown, &req, &opt, &root()).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized field: f9");

        let mut missing = SymbolMap::new();
        missing.insert(Identifier::new("f3"), Value::Null);
        let err = check_fields(&missing, &req, &opt, &root()).unwrap_err();
        assert_eq!(err.to_string(), "missing field(s): f1, f2");
    }
}
