//! Event-stream grammar enforcement.
//!
//! [`StructuralCheck`] validates the traversal grammar independent of
//! value typing: starts and ends must match, fields only occur inside
//! an open map or struct that is awaiting a field, a struct/map value
//! needs an intervening field event, and nothing may follow the
//! outermost `End`. Downstream processors (notably the value builder)
//! are entitled to assume streams this check has passed.

use std::collections::HashSet;
use std::fmt;

use mingle_value::Identifier;

use crate::error::{ReactorError, ReactorResult};
use crate::event::{EventKind, MingleReactor, ReactorEvent};

/// The kind of value expected at the top of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactorTopType {
    #[default]
    Value,
    List,
    Map,
    Struct,
}

impl ReactorTopType {
    fn admits(self, kind: &EventKind) -> bool {
        match self {
            Self::Value => true,
            Self::List => matches!(kind, EventKind::StartList(_)),
            Self::Map => matches!(kind, EventKind::StartMap),
            Self::Struct => matches!(kind, EventKind::StartStruct(_)),
        }
    }
}

impl fmt::Display for ReactorTopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Value => "value",
            Self::List => "list",
            Self::Map => "map",
            Self::Struct => "struct",
        })
    }
}

enum Frame {
    List,
    // Maps and structs share the field grammar.
    Fields {
        pending: Option<Identifier>,
        seen: HashSet<Identifier>,
    },
}

impl Frame {
    fn fields() -> Self {
        Self::Fields {
            pending: None,
            seen: HashSet::new(),
        }
    }
}

/// Grammar-checking processor. Forwardless: it only validates.
pub struct StructuralCheck {
    top_type: ReactorTopType,
    stack: Vec<Frame>,
    done: bool,
}

impl Default for StructuralCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// What an event describes, for error messages.
fn describe(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::StartStruct(_) => "start of struct",
        EventKind::StartList(_) => "start of list",
        EventKind::StartMap => "start of map",
        EventKind::StartField(_) => "start of field",
        EventKind::Value(_) => "value",
        EventKind::End => "end",
    }
}

impl StructuralCheck {
    /// A check expecting any top-level value.
    pub fn new() -> Self {
        Self::with_top_type(ReactorTopType::Value)
    }

    /// A check requiring the stream's top value to be of the given
    /// kind.
    pub fn with_top_type(top_type: ReactorTopType) -> Self {
        Self {
            top_type,
            stack: Vec::new(),
            done: false,
        }
    }

    /// True once the outermost value has been fully seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Checks that a value (scalar or composite start) may occur here.
    fn check_value_ok(&self, kind: &EventKind) -> ReactorResult<()> {
        match self.stack.last() {
            None => {
                if self.top_type.admits(kind) {
                    Ok(())
                } else {
                    Err(ReactorError::new(format!(
                        "expected {} but got {}",
                        self.top_type,
                        describe(kind)
                    )))
                }
            }
            Some(Frame::List) => Ok(()),
            Some(Frame::Fields { pending: Some(_), .. }) => Ok(()),
            Some(Frame::Fields { pending: None, .. }) => Err(ReactorError::new(format!(
                "expected field name or end of fields but got {}",
                describe(kind)
            ))),
        }
    }

    /// Marks one value as complete in the enclosing frame.
    fn value_completed(&mut self) {
        match self.stack.last_mut() {
            None => self.done = true,
            Some(Frame::Fields { pending, .. }) => *pending = None,
            Some(Frame::List) => {}
        }
    }

    fn start_field(&mut self, field: &Identifier) -> ReactorResult<()> {
        match self.stack.last_mut() {
            Some(Frame::Fields { pending, seen }) => match pending {
                None => {
                    if !seen.insert(field.clone()) {
                        return Err(ReactorError::new(format!(
                            "multiple entries for field: {field}"
                        )));
                    }
                    *pending = Some(field.clone());
                    Ok(())
                }
                Some(awaiting) => Err(ReactorError::new(format!(
                    "saw start of field '{field}' while expecting a value for field '{awaiting}'"
                ))),
            },
            Some(Frame::List) => Err(ReactorError::new(format!(
                "saw start of field '{field}' while expecting a list value"
            ))),
            None => Err(ReactorError::new(format!(
                "expected {} but got start of field '{field}'",
                self.top_type
            ))),
        }
    }

    fn end(&mut self) -> ReactorResult<()> {
        match self.stack.pop() {
            Some(Frame::Fields {
                pending: Some(awaiting),
                ..
            }) => Err(ReactorError::new(format!(
                "saw end while expecting a value for field '{awaiting}'"
            ))),
            Some(_) => {
                self.value_completed();
                Ok(())
            }
            None => Err(ReactorError::new(format!(
                "expected {} but got end",
                self.top_type
            ))),
        }
    }
}

impl MingleReactor for StructuralCheck {
    fn process_event(&mut self, event: &mut ReactorEvent) -> ReactorResult<()> {
        if self.done {
            return Err(ReactorError::new(format!(
                "{}() called, but value is already built",
                event.kind().name()
            )));
        }
        match event.kind() {
            kind @ (EventKind::StartStruct(_) | EventKind::StartMap) => {
                self.check_value_ok(kind)?;
                self.stack.push(Frame::fields());
                Ok(())
            }
            kind @ EventKind::StartList(_) => {
                self.check_value_ok(kind)?;
                self.stack.push(Frame::List);
                Ok(())
            }
            kind @ EventKind::Value(_) => {
                self.check_value_ok(kind)?;
                self.value_completed();
                Ok(())
            }
            EventKind::StartField(field) => {
                let field = field.clone();
                self.start_field(&field)
            }
            EventKind::End => self.end(),
        }
    }
}
