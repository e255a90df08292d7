//! The reactor event record and processor interface.
//!
//! A [`ReactorEvent`] is a single mutable record reused across the
//! whole traversal of one value: the producer overwrites it in place
//! via the `set_*` methods before driving it through the pipeline
//! again. Processors must never retain a reference to the event past
//! their own call; anything needed later has to be copied out.

use std::any::Any;

use mingle_path::{format_path, DotFormatter, ObjectPath};
use mingle_value::{inspect, Identifier, QualifiedTypeName, TypeReference, Value};

use crate::error::ReactorResult;

/// The discriminated payload of a reactor event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    StartStruct(QualifiedTypeName),
    StartList(TypeReference),
    StartMap,
    StartField(Identifier),
    Value(Value),
    End,
}

impl EventKind {
    /// The event's name, used in grammar error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartStruct(_) => "StartStruct",
            Self::StartList(_) => "StartList",
            Self::StartMap => "StartMap",
            Self::StartField(_) => "StartField",
            Self::Value(_) => "Value",
            Self::End => "End",
        }
    }
}

/// The mutable, reused event record.
#[derive(Debug, Clone)]
pub struct ReactorEvent {
    kind: EventKind,
    path: Option<ObjectPath<Identifier>>,
}

impl Default for ReactorEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactorEvent {
    pub fn new() -> Self {
        Self {
            kind: EventKind::End,
            path: None,
        }
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// The path attached by a path-setting processor, if any.
    pub fn path(&self) -> Option<&ObjectPath<Identifier>> {
        self.path.as_ref()
    }

    pub fn set_path(&mut self, path: ObjectPath<Identifier>) {
        self.path = Some(path);
    }

    // Each set_* overwrites the record for the next dispatch; any path
    // from the previous event is cleared.

    pub fn set_start_struct(&mut self, struct_type: QualifiedTypeName) {
        self.kind = EventKind::StartStruct(struct_type);
        self.path = None;
    }

    pub fn set_start_list(&mut self, list_type: TypeReference) {
        self.kind = EventKind::StartList(list_type);
        self.path = None;
    }

    pub fn set_start_map(&mut self) {
        self.kind = EventKind::StartMap;
        self.path = None;
    }

    pub fn set_start_field(&mut self, field: Identifier) {
        self.kind = EventKind::StartField(field);
        self.path = None;
    }

    pub fn set_value(&mut self, value: Value) {
        self.kind = EventKind::Value(value);
        self.path = None;
    }

    pub fn set_end(&mut self) {
        self.kind = EventKind::End;
        self.path = None;
    }

    /// Deterministic rendering for debug logging.
    pub fn inspect(&self) -> String {
        let kind = match &self.kind {
            EventKind::StartStruct(qn) => format!("StartStruct( {} )", qn.external_form()),
            EventKind::StartList(t) => format!("StartList( {} )", t.external_form()),
            EventKind::StartMap => "StartMap".to_owned(),
            EventKind::StartField(f) => format!("StartField( {f} )"),
            EventKind::Value(v) => format!("Value( {} )", inspect(v)),
            EventKind::End => "End".to_owned(),
        };
        match &self.path {
            None => format!("[ {kind} ]"),
            Some(p) => format!("[ {kind}, path: {} ]", format_path(p, &DotFormatter)),
        }
    }
}

/// Downcast support for pipeline processors.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A processor of reactor events.
///
/// Implementors observe or mutate the shared event and may fail, which
/// aborts the traversal. The `AsAny` supertrait lets a pipeline be
/// queried for a processor by concrete type after construction.
pub trait MingleReactor: AsAny {
    fn process_event(&mut self, event: &mut ReactorEvent) -> ReactorResult<()>;
}
