//! Utility reactors.

use crate::error::ReactorResult;
use crate::event::{MingleReactor, ReactorEvent};

/// Accepts and drops every event.
pub struct DiscardReactor;

impl MingleReactor for DiscardReactor {
    fn process_event(&mut self, _event: &mut ReactorEvent) -> ReactorResult<()> {
        Ok(())
    }
}

/// A reactor that accepts and drops every event, for pipelines that
/// only care about side effects of upstream processors.
pub fn discard_reactor() -> DiscardReactor {
    DiscardReactor
}

/// Logs each event at debug level, with an optional identifying
/// prefix when several pipelines log at once.
#[derive(Default)]
pub struct DebugReactor {
    prefix: Option<String>,
}

impl DebugReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl MingleReactor for DebugReactor {
    fn process_event(&mut self, event: &mut ReactorEvent) -> ReactorResult<()> {
        match &self.prefix {
            Some(prefix) => tracing::debug!("{prefix}: {}", event.inspect()),
            None => tracing::debug!("{}", event.inspect()),
        }
        Ok(())
    }
}
