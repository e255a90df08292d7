//! Value reconstruction from event streams.
//!
//! [`ValueBuilder`] is a terminal processor that accumulates a value
//! tree mirroring the event stream. It does not re-validate grammar:
//! fed a stream a [`StructuralCheck`](crate::StructuralCheck) would
//! reject, it fails with a generic error; for any well-formed stream
//! it is total.

use mingle_value::{Identifier, MingleStruct, QualifiedTypeName, SymbolMap, Value};

use crate::error::{ReactorError, ReactorResult};
use crate::event::{EventKind, MingleReactor, ReactorEvent};

enum Acc {
    List(Vec<Value>),
    Map {
        fields: SymbolMap,
        pending: Option<Identifier>,
    },
    Struct {
        struct_type: QualifiedTypeName,
        fields: SymbolMap,
        pending: Option<Identifier>,
    },
}

/// Accumulates a [`Value`] from a well-formed event stream.
#[derive(Default)]
pub struct ValueBuilder {
    stack: Vec<Acc>,
    value: Option<Value>,
}

impl ValueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the built value, if the stream completed.
    pub fn take_value(&mut self) -> Option<Value> {
        self.value.take()
    }

    fn push_value(&mut self, value: Value) -> ReactorResult<()> {
        match self.stack.last_mut() {
            None => {
                self.value = Some(value);
                Ok(())
            }
            Some(Acc::List(elements)) => {
                elements.push(value);
                Ok(())
            }
            Some(Acc::Map { fields, pending } | Acc::Struct { fields, pending, .. }) => {
                let field = pending
                    .take()
                    .ok_or_else(|| ReactorError::new("value arrived with no pending field"))?;
                fields.insert(field, value);
                Ok(())
            }
        }
    }
}

impl MingleReactor for ValueBuilder {
    fn process_event(&mut self, event: &mut ReactorEvent) -> ReactorResult<()> {
        match event.kind() {
            EventKind::StartList(_) => {
                self.stack.push(Acc::List(Vec::new()));
                Ok(())
            }
            EventKind::StartMap => {
                self.stack.push(Acc::Map {
                    fields: SymbolMap::new(),
                    pending: None,
                });
                Ok(())
            }
            EventKind::StartStruct(struct_type) => {
                self.stack.push(Acc::Struct {
                    struct_type: struct_type.clone(),
                    fields: SymbolMap::new(),
                    pending: None,
                });
                Ok(())
            }
            EventKind::StartField(field) => match self.stack.last_mut() {
                Some(Acc::Map { pending, .. } | Acc::Struct { pending, .. }) => {
                    *pending = Some(field.clone());
                    Ok(())
                }
                _ => Err(ReactorError::new(format!(
                    "unexpected start of field '{field}'"
                ))),
            },
            EventKind::Value(value) => {
                let value = value.clone();
                self.push_value(value)
            }
            EventKind::End => {
                let built = match self.stack.pop() {
                    Some(Acc::List(elements)) => Value::List(elements),
                    Some(Acc::Map { fields, .. }) => Value::SymbolMap(fields),
                    Some(Acc::Struct {
                        struct_type,
                        fields,
                        ..
                    }) => Value::Struct(MingleStruct::new(struct_type, fields)),
                    None => return Err(ReactorError::new("unexpected end")),
                };
                self.push_value(built)
            }
        }
    }
}
