//! Path tracking for event streams.
//!
//! [`PathSetter`] mirrors the structural check's frame stack and
//! attaches the current logical path to every event it sees. List
//! frames hold an in-place [`MutableListPath`] cursor that advances
//! after each completed element; paths handed to events are
//! materialized snapshots, so they stay valid after the cursor moves
//! on.
//!
//! The setter assumes a grammatically valid stream; install it behind
//! a [`StructuralCheck`](crate::StructuralCheck).

use mingle_path::{ListPath, MutableListPath, ObjectPath};
use mingle_value::Identifier;

use crate::error::ReactorResult;
use crate::event::{EventKind, MingleReactor, ReactorEvent};

enum Frame {
    Fields {
        base: ObjectPath<Identifier>,
        pending: Option<ObjectPath<Identifier>>,
    },
    List {
        base: ObjectPath<Identifier>,
        cursor: MutableListPath<Identifier>,
    },
}

/// Attaches the running path to each forwarded event.
pub struct PathSetter {
    start: ObjectPath<Identifier>,
    frames: Vec<Frame>,
}

impl Default for PathSetter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSetter {
    /// A setter rooting paths at the empty path.
    pub fn new() -> Self {
        Self::with_start(ObjectPath::root())
    }

    /// A setter rooting paths at an arbitrary location, for traversals
    /// that are themselves nested inside a larger value.
    pub fn with_start(start: ObjectPath<Identifier>) -> Self {
        Self {
            start,
            frames: Vec::new(),
        }
    }

    /// The position the next value event will be attributed to.
    fn value_position(&self) -> ObjectPath<Identifier> {
        match self.frames.last() {
            None => self.start.clone(),
            Some(Frame::List { cursor, .. }) => cursor.to_path(),
            Some(Frame::Fields { base, pending }) => {
                pending.clone().unwrap_or_else(|| base.clone())
            }
        }
    }

    /// Advances the enclosing frame past one completed value.
    fn value_completed(&mut self) {
        match self.frames.last_mut() {
            Some(Frame::List { cursor, .. }) => {
                cursor.next();
            }
            Some(Frame::Fields { pending, .. }) => *pending = None,
            None => {}
        }
    }
}

impl MingleReactor for PathSetter {
    fn process_event(&mut self, event: &mut ReactorEvent) -> ReactorResult<()> {
        match event.kind() {
            EventKind::StartStruct(_) | EventKind::StartMap => {
                let base = self.value_position();
                event.set_path(base.clone());
                self.frames.push(Frame::Fields {
                    base,
                    pending: None,
                });
            }
            EventKind::StartList(_) => {
                let base = self.value_position();
                event.set_path(base.clone());
                let cursor = base.start_mutable_list(0);
                self.frames.push(Frame::List { base, cursor });
            }
            EventKind::StartField(field) => {
                let field = field.clone();
                if let Some(Frame::Fields { base, pending }) = self.frames.last_mut() {
                    let at_field = base.descend(field);
                    event.set_path(at_field.clone());
                    *pending = Some(at_field);
                }
            }
            EventKind::Value(_) => {
                event.set_path(self.value_position());
                self.value_completed();
            }
            EventKind::End => {
                if let Some(frame) = self.frames.pop() {
                    let base = match frame {
                        Frame::Fields { base, .. } | Frame::List { base, .. } => base,
                    };
                    event.set_path(base);
                    self.value_completed();
                } else {
                    event.set_path(self.start.clone());
                }
            }
        }
        Ok(())
    }
}
