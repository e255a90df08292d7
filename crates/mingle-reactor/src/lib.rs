//! Mingle reactor event pipeline.
//!
//! A push-based streaming model: producers emit structural events
//! (start-struct, start-list, start-map, start-field, value, end)
//! through an ordered chain of processors that validate grammar
//! ([`StructuralCheck`]), track the logical path of every event
//! ([`PathSetter`]), and materialize a value tree ([`ValueBuilder`]).
//! [`visit_value`] drives the canonical event sequence for an existing
//! value into any reactor.
//!
//! Everything here is single-threaded and synchronous: one event at a
//! time flows through the chain, and the shared event record must not
//! be reused across threads. Independent traversals need independent
//! pipelines.

#![warn(clippy::all)]

pub mod builder;
pub mod error;
pub mod event;
pub mod path_setter;
pub mod pipeline;
pub mod reactors;
pub mod structural;
pub mod visit;

pub use builder::ValueBuilder;
pub use error::{ReactorError, ReactorResult};
pub use event::{AsAny, EventKind, MingleReactor, ReactorEvent};
pub use path_setter::PathSetter;
pub use pipeline::{create_value_builder_pipeline, ReactorPipeline, ReactorPipelineBuilder};
pub use reactors::{discard_reactor, DebugReactor, DiscardReactor};
pub use structural::{ReactorTopType, StructuralCheck};
pub use visit::{build_value, visit_value};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        build_value, create_value_builder_pipeline, visit_value, EventKind, MingleReactor,
        ReactorError, ReactorEvent, ReactorPipeline, ReactorResult, StructuralCheck, ValueBuilder,
    };
}
