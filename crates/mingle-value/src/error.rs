//! Located cast errors.
//!
//! Every error carries the [`ObjectPath`] at which the failing value
//! occurred and renders as `<dot-path>: <message>` (the path prefix is
//! omitted at the root). Collaborator parse failures are preserved as
//! the error source rather than discarded.

use std::error::Error as StdError;

use mingle_path::{format_path, DotFormatter, ObjectPath};
use thiserror::Error;

use crate::identifier::Identifier;
use crate::typeref::TypeReference;

pub type CastResult<T> = Result<T, CastError>;

type Source = Box<dyn StdError + Send + Sync + 'static>;

/// Prefixes a message with its location, unless the location is the
/// root.
fn located(path: &ObjectPath<Identifier>, msg: &str) -> String {
    if path.is_root() {
        msg.to_owned()
    } else {
        format!("{}: {}", format_path(path, &DotFormatter), msg)
    }
}

fn join_fields(fields: &[Identifier]) -> String {
    let names: Vec<&str> = fields.iter().map(Identifier::as_str).collect();
    names.join(", ")
}

/// A failure to coerce a value to a target type.
#[derive(Debug, Error)]
pub enum CastError {
    /// The value's inferred type cannot legally coerce to the target.
    #[error("{}", located(.path, &format!("expected {expected} but got {actual}")))]
    TypeCast {
        expected: TypeReference,
        actual: TypeReference,
        path: ObjectPath<Identifier>,
    },

    /// The value's type is coercible but the concrete value is not.
    #[error("{}", located(.path, .message))]
    ValueCast {
        message: String,
        path: ObjectPath<Identifier>,
        #[source]
        source: Option<Source>,
    },

    /// A map field with no counterpart in the target structure.
    #[error("{}", located(.path, &format!("unrecognized field: {field}")))]
    UnrecognizedField {
        field: Identifier,
        path: ObjectPath<Identifier>,
    },

    /// Required structure fields absent from the input map.
    #[error("{}", located(.path, &format!("missing field(s): {}", join_fields(.fields))))]
    MissingFields {
        fields: Vec<Identifier>,
        path: ObjectPath<Identifier>,
    },
}

impl CastError {
    pub fn type_cast(
        expected: TypeReference,
        actual: TypeReference,
        path: &ObjectPath<Identifier>,
    ) -> Self {
        Self::TypeCast {
            expected,
            actual,
            path: path.clone(),
        }
    }

    pub fn value_cast(message: impl Into<String>, path: &ObjectPath<Identifier>) -> Self {
        Self::ValueCast {
            message: message.into(),
            path: path.clone(),
            source: None,
        }
    }

    /// A value-cast error wrapping the collaborator failure that
    /// caused it.
    pub fn value_cast_with_source(
        message: impl Into<String>,
        path: &ObjectPath<Identifier>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::ValueCast {
            message: message.into(),
            path: path.clone(),
            source: Some(Box::new(source)),
        }
    }

    pub fn unrecognized_field(field: Identifier, path: &ObjectPath<Identifier>) -> Self {
        Self::UnrecognizedField {
            field,
            path: path.clone(),
        }
    }

    /// Reports absent required fields, sorted for deterministic
    /// rendering.
    pub fn missing_fields(
        mut fields: Vec<Identifier>,
        path: &ObjectPath<Identifier>,
    ) -> Self {
        fields.sort();
        Self::MissingFields {
            fields,
            path: path.clone(),
        }
    }

    /// The location at which the error occurred.
    pub fn path(&self) -> &ObjectPath<Identifier> {
        match self {
            Self::TypeCast { path, .. }
            | Self::ValueCast { path, .. }
            | Self::UnrecognizedField { path, .. }
            | Self::MissingFields { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::core_types;
    use mingle_path::ListPath;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_cast_message_at_root() {
        let core = core_types();
        let err = CastError::type_cast(
            core.type_int32.clone(),
            core.type_string.clone(),
            &ObjectPath::root(),
        );
        assert_eq!(
            err.to_string(),
            "expected mingle:core@v1/Int32 but got mingle:core@v1/String"
        );
    }

    #[test]
    fn test_value_cast_message_with_path() {
        let path = ObjectPath::root()
            .descend(Identifier::new("a"))
            .start_list_at(2)
            .to_path();
        let err = CastError::value_cast("list is empty", &path);
        assert_eq!(err.to_string(), "a[ 2 ]: list is empty");
    }

    #[test]
    fn test_missing_fields_sorted() {
        let err = CastError::missing_fields(
            vec![Identifier::new("z"), Identifier::new("a")],
            &ObjectPath::root(),
        );
        assert_eq!(err.to_string(), "missing field(s): a, z");
    }

    #[test]
    fn test_source_preserved() {
        let cause = "xyz".parse::<i32>().unwrap_err();
        let path = ObjectPath::root();
        let err = CastError::value_cast_with_source("invalid syntax: xyz", &path, cause);
        assert!(std::error::Error::source(&err).is_some());
    }
}
