//! Property tests for the cast engine.

use mingle_path::ObjectPath;
use mingle_value::{cast_value, core_types, Identifier, TypeReference, Value};
use proptest::prelude::*;

fn root() -> ObjectPath<Identifier> {
    ObjectPath::root()
}

fn cast(value: &Value, target: &TypeReference) -> Value {
    cast_value(value, target, &root()).unwrap()
}

proptest! {
    // cast(string_of(cast(v, T)), T) == cast(v, T) for every numeric T.

    #[test]
    fn prop_int32_string_round_trip(v in any::<i32>()) {
        let core = core_types();
        let n = cast(&Value::from(v), &core.type_int32);
        let s = cast(&n, &core.type_string);
        prop_assert_eq!(cast(&s, &core.type_int32), n);
    }

    #[test]
    fn prop_int64_string_round_trip(v in any::<i64>()) {
        let core = core_types();
        let n = cast(&Value::from(v), &core.type_int64);
        let s = cast(&n, &core.type_string);
        prop_assert_eq!(cast(&s, &core.type_int64), n);
    }

    #[test]
    fn prop_uint32_string_round_trip(v in any::<u32>()) {
        let core = core_types();
        let n = cast(&Value::from(v), &core.type_uint32);
        let s = cast(&n, &core.type_string);
        prop_assert_eq!(cast(&s, &core.type_uint32), n);
    }

    #[test]
    fn prop_uint64_string_round_trip(v in any::<u64>()) {
        let core = core_types();
        let n = cast(&Value::from(v), &core.type_uint64);
        let s = cast(&n, &core.type_string);
        prop_assert_eq!(cast(&s, &core.type_uint64), n);
    }

    #[test]
    fn prop_float64_string_round_trip(v in -1.0e15f64..1.0e15) {
        let core = core_types();
        let n = cast(&Value::from(v), &core.type_float64);
        let s = cast(&n, &core.type_string);
        prop_assert_eq!(cast(&s, &core.type_float64), n);
    }

    #[test]
    fn prop_list_cast_preserves_order_and_count(elements in proptest::collection::vec(any::<i32>(), 0..32)) {
        let core = core_types();
        let target = TypeReference::list_of(core.type_int32.clone(), true);
        let input = Value::List(elements.iter().copied().map(Value::from).collect());
        let cast = cast_value(&input, &target, &root()).unwrap();
        let Value::List(out) = cast else { panic!("list target produced a non-list") };
        prop_assert_eq!(out.len(), elements.len());
        for (got, want) in out.iter().zip(&elements) {
            prop_assert_eq!(got, &Value::Int32(*want));
        }
    }

    #[test]
    fn prop_nullable_null_passthrough(depth in 0usize..4) {
        let core = core_types();
        // Null passes any nullable target, however deeply structured
        // the inner type is.
        let mut inner = core.type_string.clone();
        for _ in 0..depth {
            inner = TypeReference::list_of(inner, false);
        }
        let target = TypeReference::nullable_of(inner);
        prop_assert_eq!(cast_value(&Value::Null, &target, &root()).unwrap(), Value::Null);
    }

    #[test]
    fn prop_identity_cast_is_idempotent(v in any::<i64>()) {
        let core = core_types();
        let once = cast(&Value::from(v), &core.type_int64);
        let twice = cast(&once, &core.type_int64);
        prop_assert_eq!(once, twice);
    }
}
