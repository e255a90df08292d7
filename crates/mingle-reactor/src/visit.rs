//! Driving reactors from existing values.
//!
//! [`visit_value`] emits the canonical depth-first event sequence for a
//! value: lists open with `StartList` and close with `End` around their
//! elements in order; maps and structs open with `StartMap`/
//! `StartStruct` and emit a `StartField` before each field's value in
//! iteration order; everything else is a single `Value` event. One
//! event record is reused for the entire traversal.

use mingle_value::{core_types, SymbolMap, Value};

use crate::builder::ValueBuilder;
use crate::error::{ReactorError, ReactorResult};
use crate::event::{MingleReactor, ReactorEvent};
use crate::pipeline::create_value_builder_pipeline;

/// Drives the canonical event sequence for `value` into `reactor`.
pub fn visit_value(value: &Value, reactor: &mut dyn MingleReactor) -> ReactorResult<()> {
    let mut event = ReactorEvent::new();
    visit(value, reactor, &mut event)
}

fn visit(
    value: &Value,
    reactor: &mut dyn MingleReactor,
    event: &mut ReactorEvent,
) -> ReactorResult<()> {
    match value {
        Value::List(elements) => {
            event.set_start_list(core_types().type_opaque_list.clone());
            reactor.process_event(event)?;
            for element in elements {
                visit(element, reactor, event)?;
            }
            event.set_end();
            reactor.process_event(event)
        }
        Value::SymbolMap(map) => {
            event.set_start_map();
            reactor.process_event(event)?;
            visit_fields(map, reactor, event)
        }
        Value::Struct(st) => {
            event.set_start_struct(st.struct_type().clone());
            reactor.process_event(event)?;
            visit_fields(st.fields(), reactor, event)
        }
        scalar => {
            event.set_value(scalar.clone());
            reactor.process_event(event)
        }
    }
}

fn visit_fields(
    map: &SymbolMap,
    reactor: &mut dyn MingleReactor,
    event: &mut ReactorEvent,
) -> ReactorResult<()> {
    for (field, value) in map.fields() {
        event.set_start_field(field.clone());
        reactor.process_event(event)?;
        visit(value, reactor, event)?;
    }
    event.set_end();
    reactor.process_event(event)
}

/// Rebuilds a value by visiting it through a checked builder pipeline.
pub fn build_value(value: &Value) -> ReactorResult<Value> {
    let mut pipeline = create_value_builder_pipeline();
    visit_value(value, &mut pipeline)?;
    pipeline
        .reactor_mut::<ValueBuilder>()
        .and_then(ValueBuilder::take_value)
        .ok_or_else(|| ReactorError::new("no value was built"))
}
