//! Processor pipelines.
//!
//! A [`ReactorPipeline`] is an ordered chain of processors fixed at
//! construction. Each event is driven through the whole chain before
//! the producer emits the next one; the first failure aborts the
//! traversal. The builder's `ensure_*` helpers add the standard
//! structural-check and path-setting processors exactly once.

use crate::builder::ValueBuilder;
use crate::error::ReactorResult;
use crate::event::{MingleReactor, ReactorEvent};
use crate::path_setter::PathSetter;
use crate::structural::StructuralCheck;

/// An ordered chain of reactors, itself usable as a reactor.
pub struct ReactorPipeline {
    reactors: Vec<Box<dyn MingleReactor>>,
}

impl ReactorPipeline {
    pub fn builder() -> ReactorPipelineBuilder {
        ReactorPipelineBuilder {
            reactors: Vec::new(),
        }
    }

    /// Mutable access to the first processor of the given concrete
    /// type, typically to extract results after a traversal.
    pub fn reactor_mut<T: MingleReactor + 'static>(&mut self) -> Option<&mut T> {
        // Deref the box first: calling as_any_mut on the Box itself
        // would downcast against the Box type, never the reactor.
        self.reactors
            .iter_mut()
            .find_map(|r| (**r).as_any_mut().downcast_mut::<T>())
    }

    pub fn reactor<T: MingleReactor + 'static>(&self) -> Option<&T> {
        self.reactors
            .iter()
            .find_map(|r| (**r).as_any().downcast_ref::<T>())
    }
}

impl MingleReactor for ReactorPipeline {
    fn process_event(&mut self, event: &mut ReactorEvent) -> ReactorResult<()> {
        for reactor in &mut self.reactors {
            reactor.process_event(event)?;
        }
        Ok(())
    }
}

pub struct ReactorPipelineBuilder {
    reactors: Vec<Box<dyn MingleReactor>>,
}

impl ReactorPipelineBuilder {
    pub fn add(mut self, reactor: impl MingleReactor + 'static) -> Self {
        self.reactors.push(Box::new(reactor));
        self
    }

    /// Appends a [`StructuralCheck`] unless one is already present.
    pub fn ensure_structural_check(self) -> Self {
        if self.contains::<StructuralCheck>() {
            self
        } else {
            self.add(StructuralCheck::new())
        }
    }

    /// Appends a [`PathSetter`] unless one is already present.
    pub fn ensure_path_setter(self) -> Self {
        if self.contains::<PathSetter>() {
            self
        } else {
            self.add(PathSetter::new())
        }
    }

    fn contains<T: MingleReactor + 'static>(&self) -> bool {
        self.reactors.iter().any(|r| (**r).as_any().is::<T>())
    }

    pub fn build(self) -> ReactorPipeline {
        ReactorPipeline {
            reactors: self.reactors,
        }
    }
}

/// A pipeline that validates a stream and rebuilds its value: query it
/// for the [`ValueBuilder`] afterward.
pub fn create_value_builder_pipeline() -> ReactorPipeline {
    ReactorPipeline::builder()
        .ensure_structural_check()
        .add(ValueBuilder::new())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mingle_value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ensure_helpers_are_idempotent() {
        let pipeline = ReactorPipeline::builder()
            .ensure_structural_check()
            .ensure_structural_check()
            .ensure_path_setter()
            .ensure_path_setter()
            .build();
        assert_eq!(pipeline.reactors.len(), 2);
    }

    #[test]
    fn test_first_failure_aborts_chain() {
        let mut pipeline = ReactorPipeline::builder()
            .ensure_structural_check()
            .add(ValueBuilder::new())
            .build();
        let mut ev = ReactorEvent::new();
        ev.set_start_map();
        pipeline.process_event(&mut ev).unwrap();
        // Grammar violation: value without a field. The check fails
        // and the builder never sees the event.
        ev.set_value(Value::from(1i32));
        assert!(pipeline.process_event(&mut ev).is_err());
        let builder = pipeline.reactor_mut::<ValueBuilder>().unwrap();
        assert_eq!(builder.take_value(), None);
    }

    #[test]
    fn test_reactor_lookup_by_type() {
        let mut pipeline = create_value_builder_pipeline();
        assert!(pipeline.reactor::<StructuralCheck>().is_some());
        assert!(pipeline.reactor_mut::<ValueBuilder>().is_some());
        assert!(pipeline.reactor::<PathSetter>().is_none());
    }
}
