//! Persistent object paths.
//!
//! An [`ObjectPath`] identifies a position inside a nested structure as
//! an ordered sequence of steps from a root: named descents into
//! dictionary keys and numeric list indices. Paths are persistent and
//! structurally shared — `descend` and the immutable list cursor return
//! new path values without touching the original, so a path captured at
//! one point of a traversal (say, inside an error) stays valid while
//! the traversal moves on.
//!
//! List positions come in two cursor flavors behind the same
//! [`ListPath`] interface:
//!
//! - [`ImmutableListPath`] — `next()`/`set_index()` return a new
//!   sibling path; use when paths are handed out and retained.
//! - [`MutableListPath`] — `next()`/`set_index()` advance in place;
//!   use in tight traversal loops where the cursor is reused and only
//!   materialized on demand via [`ListPath::to_path`].
//!
//! Equality is structural over the step sequence; a mutable and an
//! immutable cursor resolving to the same position compare equal.

use std::fmt;
use std::sync::Arc;

mod format;

pub use format::{DotFormatter, PathFormatter, format_path};

#[derive(Debug)]
enum Step<K> {
    Key { parent: Link<K>, key: K },
    Index { parent: Link<K>, index: usize },
}

type Link<K> = Option<Arc<Step<K>>>;

impl<K> Step<K> {
    fn parent(&self) -> &Link<K> {
        match self {
            Step::Key { parent, .. } | Step::Index { parent, .. } => parent,
        }
    }
}

/// A persistent path from a root into a nested structure.
pub struct ObjectPath<K> {
    last: Link<K>,
}

impl<K> Clone for ObjectPath<K> {
    fn clone(&self) -> Self {
        Self {
            last: self.last.clone(),
        }
    }
}

impl<K> Default for ObjectPath<K> {
    fn default() -> Self {
        Self::root()
    }
}

impl<K> ObjectPath<K> {
    /// The empty path.
    pub fn root() -> Self {
        Self { last: None }
    }

    /// True if this path has no steps.
    pub fn is_root(&self) -> bool {
        self.last.is_none()
    }

    /// Returns a new path extending this one by a dictionary key.
    pub fn descend(&self, key: K) -> Self {
        Self {
            last: Some(Arc::new(Step::Key {
                parent: self.last.clone(),
                key,
            })),
        }
    }

    /// Starts an immutable list cursor at index 0.
    pub fn start_list(&self) -> ImmutableListPath<K> {
        self.start_list_at(0)
    }

    /// Starts an immutable list cursor at the given index.
    pub fn start_list_at(&self, index: usize) -> ImmutableListPath<K> {
        ImmutableListPath {
            parent: self.clone(),
            index,
        }
    }

    /// Starts an in-place list cursor at the given index.
    pub fn start_mutable_list(&self, index: usize) -> MutableListPath<K> {
        MutableListPath {
            parent: self.clone(),
            index,
        }
    }

    /// The path one step above this one, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.last.as_ref().map(|step| Self {
            last: step.parent().clone(),
        })
    }

    fn index(&self, index: usize) -> Self {
        Self {
            last: Some(Arc::new(Step::Index {
                parent: self.last.clone(),
                index,
            })),
        }
    }

    /// Steps from the root to this position, in root-first order.
    fn steps(&self) -> Vec<&Step<K>> {
        let mut out = Vec::new();
        let mut cur = &self.last;
        while let Some(step) = cur {
            out.push(step.as_ref());
            cur = step.parent();
        }
        out.reverse();
        out
    }

    pub(crate) fn visit_steps(&self, mut f: impl FnMut(PathStep<'_, K>)) {
        for step in self.steps() {
            match step {
                Step::Key { key, .. } => f(PathStep::Key(key)),
                Step::Index { index, .. } => f(PathStep::Index(*index)),
            }
        }
    }
}

/// A borrowed view of one path step, root-first, as seen by formatters.
pub(crate) enum PathStep<'a, K> {
    Key(&'a K),
    Index(usize),
}

impl<K: PartialEq> PartialEq for ObjectPath<K> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.steps(), other.steps());
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b.iter()).all(|(x, y)| match (x, y) {
            (Step::Key { key: k1, .. }, Step::Key { key: k2, .. }) => k1 == k2,
            (Step::Index { index: i1, .. }, Step::Index { index: i2, .. }) => i1 == i2,
            _ => false,
        })
    }
}

impl<K: Eq> Eq for ObjectPath<K> {}

impl<K: fmt::Debug> fmt::Debug for ObjectPath<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for step in self.steps() {
            match step {
                Step::Key { key, .. } => {
                    list.entry(key);
                }
                Step::Index { index, .. } => {
                    list.entry(index);
                }
            }
        }
        list.finish()
    }
}

/// Common interface over the two list-cursor variants.
pub trait ListPath<K> {
    /// The cursor's current index.
    fn index(&self) -> usize;

    /// Materializes the cursor as a full path ending in its index step.
    fn to_path(&self) -> ObjectPath<K>;
}

/// List cursor whose advances produce new path values.
pub struct ImmutableListPath<K> {
    parent: ObjectPath<K>,
    index: usize,
}

impl<K> Clone for ImmutableListPath<K> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            index: self.index,
        }
    }
}

impl<K> ImmutableListPath<K> {
    /// A new cursor pointing at the next index.
    pub fn next(&self) -> Self {
        self.set_index(self.index + 1)
    }

    /// A new cursor pointing at the given index.
    pub fn set_index(&self, index: usize) -> Self {
        Self {
            parent: self.parent.clone(),
            index,
        }
    }

    /// Descends by a dictionary key from the cursor's position.
    pub fn descend(&self, key: K) -> ObjectPath<K> {
        self.to_path().descend(key)
    }
}

impl<K> ListPath<K> for ImmutableListPath<K> {
    fn index(&self) -> usize {
        self.index
    }

    fn to_path(&self) -> ObjectPath<K> {
        self.parent.index(self.index)
    }
}

/// List cursor that advances in place and keeps its identity.
pub struct MutableListPath<K> {
    parent: ObjectPath<K>,
    index: usize,
}

impl<K> MutableListPath<K> {
    /// Advances to the next index, in place.
    pub fn next(&mut self) -> &mut Self {
        self.index += 1;
        self
    }

    /// Moves the cursor to the given index, in place.
    pub fn set_index(&mut self, index: usize) -> &mut Self {
        self.index = index;
        self
    }

    /// Descends by a dictionary key from the cursor's current position.
    pub fn descend(&self, key: K) -> ObjectPath<K> {
        self.to_path().descend(key)
    }
}

impl<K> ListPath<K> for MutableListPath<K> {
    fn index(&self) -> usize {
        self.index
    }

    fn to_path(&self) -> ObjectPath<K> {
        self.parent.index(self.index)
    }
}

impl<K: fmt::Debug> fmt::Debug for ImmutableListPath<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_path().fmt(f)
    }
}

impl<K: fmt::Debug> fmt::Debug for MutableListPath<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_path().fmt(f)
    }
}

impl<K: PartialEq> PartialEq for MutableListPath<K> {
    fn eq(&self, other: &Self) -> bool {
        self.to_path() == other.to_path()
    }
}

impl<K: PartialEq> PartialEq for ImmutableListPath<K> {
    fn eq(&self, other: &Self) -> bool {
        self.to_path() == other.to_path()
    }
}

impl<K: PartialEq> PartialEq<MutableListPath<K>> for ImmutableListPath<K> {
    fn eq(&self, other: &MutableListPath<K>) -> bool {
        self.to_path() == other.to_path()
    }
}

impl<K: PartialEq> PartialEq<ImmutableListPath<K>> for MutableListPath<K> {
    fn eq(&self, other: &ImmutableListPath<K>) -> bool {
        self.to_path() == other.to_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt(p: &ObjectPath<&str>) -> String {
        format_path(p, &DotFormatter)
    }

    #[test]
    fn test_root_is_empty() {
        let p: ObjectPath<&str> = ObjectPath::root();
        assert!(p.is_root());
        assert!(p.parent().is_none());
        assert_eq!(fmt(&p), "");
    }

    #[test]
    fn test_descend_and_list_format() {
        let p = ObjectPath::root()
            .descend("node1")
            .descend("node2")
            .start_list()
            .next()
            .next()
            .descend("node3");
        assert_eq!(fmt(&p), "node1.node2[ 2 ].node3");
    }

    #[test]
    fn test_nested_list_cursors() {
        let p = ObjectPath::root()
            .descend("node1")
            .start_list()
            .next()
            .to_path()
            .start_list()
            .next()
            .next()
            .descend("node2")
            .descend("node3");
        assert_eq!(fmt(&p), "node1[ 1 ][ 2 ].node2.node3");
    }

    #[test]
    fn test_start_list_with_index() {
        let p = ObjectPath::root()
            .descend("a")
            .descend("b")
            .start_list_at(5);
        assert_eq!(fmt(&p.to_path()), "a.b[ 5 ]");
        assert_eq!(fmt(&p.next().to_path()), "a.b[ 6 ]");
    }

    #[test]
    fn test_mutable_list_path() {
        let mut lp = ObjectPath::root().descend("n1").start_mutable_list(4);
        assert_eq!(fmt(&lp.descend("n2")), "n1[ 4 ].n2");
        lp.set_index(7);
        assert_eq!(fmt(&lp.to_path()), "n1[ 7 ]");
        lp.next();
        assert_eq!(fmt(&lp.to_path()), "n1[ 8 ]");
    }

    #[test]
    fn test_structural_equality() {
        let p1: ObjectPath<&str> = ObjectPath::root();
        let p2: ObjectPath<&str> = ObjectPath::root();
        assert_eq!(p1, p2);

        let p1 = p1.descend("n1");
        assert_ne!(p1, p2);
        let p2 = p2.descend("n1");
        assert_eq!(p1, p2);

        let p1 = p1.descend("n2").start_list().next().next().to_path();
        let p2 = p2.descend("n2").start_list().next().to_path();
        assert_ne!(p1, p2);
    }

    #[test]
    fn test_cursor_variants_compare_equal() {
        let base: ObjectPath<&str> = ObjectPath::root().descend("k");
        let imm = base.start_list().next();
        let mut mutc = base.start_mutable_list(0);
        mutc.next();
        assert_eq!(imm, mutc);
        assert_eq!(imm.to_path(), mutc.to_path());
    }

    #[test]
    fn test_parent_walks_back_up() {
        let p = ObjectPath::root().descend("a").start_list_at(3).to_path();
        let up = p.parent().unwrap();
        assert_eq!(fmt(&up), "a");
        assert_eq!(up.parent().unwrap(), ObjectPath::root());
    }

    #[test]
    fn test_persistence_under_descend() {
        let base: ObjectPath<&str> = ObjectPath::root().descend("a");
        let left = base.descend("l");
        let right = base.descend("r");
        assert_eq!(fmt(&base), "a");
        assert_eq!(fmt(&left), "a.l");
        assert_eq!(fmt(&right), "a.r");
    }
}
