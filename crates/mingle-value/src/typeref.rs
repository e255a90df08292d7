//! Type references and value restrictions.
//!
//! A [`TypeReference`] is a closed, recursive descriptor: an atomic
//! named type (optionally restricted), a list of some element type, or
//! a nullable wrapper. `Nullable` never wraps another `Nullable`; the
//! constructor flattens. Restrictions attach to atomic references only.

use std::fmt;

use regex::Regex;

use crate::identifier::{DeclaredTypeName, QualifiedTypeName};
use crate::value::Value;

/// A type name, either unresolved or resolved to a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Declared(DeclaredTypeName),
    Qualified(QualifiedTypeName),
}

impl TypeName {
    pub fn external_form(&self) -> String {
        match self {
            Self::Declared(nm) => nm.external_form().to_owned(),
            Self::Qualified(qn) => qn.external_form(),
        }
    }

    /// The qualified name, if this name is resolved.
    pub fn as_qualified(&self) -> Option<&QualifiedTypeName> {
        match self {
            Self::Qualified(qn) => Some(qn),
            Self::Declared(_) => None,
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.external_form())
    }
}

impl From<QualifiedTypeName> for TypeName {
    fn from(qn: QualifiedTypeName) -> Self {
        Self::Qualified(qn)
    }
}

impl From<DeclaredTypeName> for TypeName {
    fn from(nm: DeclaredTypeName) -> Self {
        Self::Declared(nm)
    }
}

/// A numeric range restriction with open or closed bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRestriction {
    min: Option<f64>,
    max: Option<f64>,
    min_closed: bool,
    max_closed: bool,
}

impl RangeRestriction {
    pub fn new(min: Option<f64>, max: Option<f64>, min_closed: bool, max_closed: bool) -> Self {
        Self {
            min,
            max,
            min_closed,
            max_closed,
        }
    }

    /// A fully closed range `[min, max]`.
    pub fn closed(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max), true, true)
    }

    fn accepts_num(&self, n: f64) -> bool {
        if let Some(min) = self.min {
            let ok = if self.min_closed { n >= min } else { n > min };
            if !ok {
                return false;
            }
        }
        if let Some(max) = self.max {
            let ok = if self.max_closed { n <= max } else { n < max };
            if !ok {
                return false;
            }
        }
        true
    }

    fn external_form(&self) -> String {
        let mut out = String::new();
        out.push(if self.min_closed { '[' } else { '(' });
        if let Some(min) = self.min {
            out.push_str(&min.to_string());
        }
        out.push(',');
        if let Some(max) = self.max {
            out.push_str(&max.to_string());
        }
        out.push(if self.max_closed { ']' } else { ')' });
        out
    }
}

/// A regular-expression restriction on string values.
#[derive(Debug, Clone)]
pub struct PatternRestriction {
    regex: Regex,
}

impl PatternRestriction {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for PatternRestriction {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str()
    }
}

/// A predicate attached to an atomic type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueRestriction {
    Range(RangeRestriction),
    Pattern(PatternRestriction),
}

impl ValueRestriction {
    /// Whether the (already cast) value satisfies this restriction.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Range(r) => match value {
                Value::Int32(v) => r.accepts_num(f64::from(*v)),
                Value::Int64(v) => r.accepts_num(*v as f64),
                Value::Uint32(v) => r.accepts_num(f64::from(*v)),
                Value::Uint64(v) => r.accepts_num(*v as f64),
                Value::Float32(v) => r.accepts_num(f64::from(*v)),
                Value::Float64(v) => r.accepts_num(*v),
                _ => false,
            },
            Self::Pattern(p) => match value {
                Value::String(s) => p.regex.is_match(s),
                _ => false,
            },
        }
    }

    pub fn external_form(&self) -> String {
        match self {
            Self::Range(r) => r.external_form(),
            Self::Pattern(p) => format!("\"{}\"", p.pattern()),
        }
    }
}

/// A named atomic type, optionally restricted.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicTypeReference {
    name: TypeName,
    restriction: Option<ValueRestriction>,
}

impl AtomicTypeReference {
    pub fn new(name: impl Into<TypeName>, restriction: Option<ValueRestriction>) -> Self {
        Self {
            name: name.into(),
            restriction,
        }
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn restriction(&self) -> Option<&ValueRestriction> {
        self.restriction.as_ref()
    }

    /// True if this reference is the given qualified name with no
    /// restriction attached.
    pub fn is_unrestricted(&self, qn: &QualifiedTypeName) -> bool {
        self.restriction.is_none() && self.name.as_qualified() == Some(qn)
    }

    pub fn external_form(&self) -> String {
        match &self.restriction {
            None => self.name.external_form(),
            Some(r) => format!("{}~{}", self.name.external_form(), r.external_form()),
        }
    }
}

/// A homogeneous list type.
#[derive(Debug, Clone, PartialEq)]
pub struct ListTypeReference {
    element: Box<TypeReference>,
    allows_empty: bool,
}

impl ListTypeReference {
    pub fn new(element: TypeReference, allows_empty: bool) -> Self {
        Self {
            element: Box::new(element),
            allows_empty,
        }
    }

    pub fn element(&self) -> &TypeReference {
        &self.element
    }

    pub fn allows_empty(&self) -> bool {
        self.allows_empty
    }
}

/// A nullable wrapper around another type.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableTypeReference {
    inner: Box<TypeReference>,
}

impl NullableTypeReference {
    pub fn inner(&self) -> &TypeReference {
        &self.inner
    }
}

/// A recursive type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeReference {
    Atomic(AtomicTypeReference),
    List(ListTypeReference),
    Nullable(NullableTypeReference),
}

impl TypeReference {
    /// An unrestricted atomic reference.
    pub fn atomic(name: impl Into<TypeName>) -> Self {
        Self::Atomic(AtomicTypeReference::new(name, None))
    }

    /// A restricted atomic reference.
    pub fn restricted(name: impl Into<TypeName>, restriction: ValueRestriction) -> Self {
        Self::Atomic(AtomicTypeReference::new(name, Some(restriction)))
    }

    /// A list of the given element type.
    pub fn list_of(element: TypeReference, allows_empty: bool) -> Self {
        Self::List(ListTypeReference::new(element, allows_empty))
    }

    /// A nullable wrapper; wrapping an already-nullable type returns it
    /// unchanged rather than nesting.
    pub fn nullable_of(inner: TypeReference) -> Self {
        match inner {
            nullable @ Self::Nullable(_) => nullable,
            other => Self::Nullable(NullableTypeReference {
                inner: Box::new(other),
            }),
        }
    }

    /// External rendering: `Name`, `Name~<restriction>`, `Elt*`/`Elt+`
    /// for lists, `T?` for nullable.
    pub fn external_form(&self) -> String {
        match self {
            Self::Atomic(at) => at.external_form(),
            Self::List(lt) => {
                let quant = if lt.allows_empty { '*' } else { '+' };
                format!("{}{}", lt.element.external_form(), quant)
            }
            Self::Nullable(nt) => format!("{}?", nt.inner.external_form()),
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.external_form())
    }
}
