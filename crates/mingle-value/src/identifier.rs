//! Identifier and type-name tokens.
//!
//! These are opaque, comparable, hashable tokens with a canonical
//! external string form. Parsing external forms (identifier casing
//! rules, namespace syntax) belongs to the syntax layer and is out of
//! scope here; construction is programmatic.

use std::fmt;

/// A field/member identifier.
///
/// Ordered and hashable so symbol maps iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Canonical external rendering of this identifier.
    pub fn external_form(&self) -> &str {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A versioned namespace, e.g. `mingle:core@v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    parts: Vec<Identifier>,
    version: Identifier,
}

impl Namespace {
    pub fn new(parts: Vec<Identifier>, version: Identifier) -> Self {
        Self { parts, version }
    }

    pub fn parts(&self) -> &[Identifier] {
        &self.parts
    }

    pub fn version(&self) -> &Identifier {
        &self.version
    }

    /// `part1:part2@version`
    pub fn external_form(&self) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push(':');
            }
            out.push_str(part.as_str());
        }
        out.push('@');
        out.push_str(self.version.as_str());
        out
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.external_form())
    }
}

/// A bare type name not yet resolved to a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclaredTypeName(String);

impl DeclaredTypeName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn external_form(&self) -> &str {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclaredTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeclaredTypeName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A type name resolved to a namespace, e.g. `mingle:core@v1/Int32`.
///
/// Only qualified names participate in core-type identity and
/// value-variant lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedTypeName {
    namespace: Namespace,
    name: DeclaredTypeName,
}

impl QualifiedTypeName {
    pub fn new(namespace: Namespace, name: DeclaredTypeName) -> Self {
        Self { namespace, name }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &DeclaredTypeName {
        &self.name
    }

    /// `namespace/Name`
    pub fn external_form(&self) -> String {
        format!("{}/{}", self.namespace.external_form(), self.name)
    }
}

impl fmt::Display for QualifiedTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.external_form())
    }
}
