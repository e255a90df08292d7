//! Rendering hooks for paths.
//!
//! A [`PathFormatter`] supplies the four rendering callbacks (path
//! start, separator, dictionary key, list index); [`format_path`]
//! drives them over a path's steps. [`DotFormatter`] is the standard
//! rendering used in error messages: `a.b[ 2 ].c`.

use std::fmt::Write;

use crate::{ObjectPath, PathStep};

/// Rendering callbacks for one path style.
pub trait PathFormatter<K> {
    /// Called once before the first step.
    fn format_path_start(&self, out: &mut String);

    /// Called between a step and a following dictionary key.
    fn format_separator(&self, out: &mut String);

    /// Renders a dictionary key.
    fn format_dictionary_key(&self, out: &mut String, key: &K);

    /// Renders a list index.
    fn format_list_index(&self, out: &mut String, index: usize);
}

/// Renders a path using the given formatter.
///
/// List indices attach directly to the preceding step; dictionary keys
/// after the first step are preceded by the separator.
pub fn format_path<K>(path: &ObjectPath<K>, fmt: &dyn PathFormatter<K>) -> String {
    let mut out = String::new();
    fmt.format_path_start(&mut out);
    let mut first = true;
    path.visit_steps(|step| match step {
        PathStep::Key(key) => {
            if !first {
                fmt.format_separator(&mut out);
            }
            first = false;
            fmt.format_dictionary_key(&mut out, key);
        }
        PathStep::Index(index) => {
            first = false;
            fmt.format_list_index(&mut out, index);
        }
    });
    out
}

/// Dot-separated rendering: empty start, `.` separator, `[ i ]`
/// indices, keys via their `Display` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotFormatter;

impl<K: std::fmt::Display> PathFormatter<K> for DotFormatter {
    fn format_path_start(&self, _out: &mut String) {}

    fn format_separator(&self, out: &mut String) {
        out.push('.');
    }

    fn format_dictionary_key(&self, out: &mut String, key: &K) {
        let _ = write!(out, "{key}");
    }

    fn format_list_index(&self, out: &mut String, index: usize) {
        let _ = write!(out, "[ {index} ]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListPath;
    use pretty_assertions::assert_eq;

    struct SlashFormatter;

    impl PathFormatter<&'static str> for SlashFormatter {
        fn format_path_start(&self, out: &mut String) {
            out.push('/');
        }

        fn format_separator(&self, out: &mut String) {
            out.push('/');
        }

        fn format_dictionary_key(&self, out: &mut String, key: &&'static str) {
            out.push_str(key);
        }

        fn format_list_index(&self, out: &mut String, index: usize) {
            let _ = write!(out, "[ {index} ]");
        }
    }

    #[test]
    fn test_custom_start_and_separator() {
        let p = ObjectPath::root()
            .descend("node1")
            .descend("node2")
            .start_list()
            .next()
            .next()
            .descend("node3");
        assert_eq!(format_path(&p, &SlashFormatter), "/node1/node2[ 2 ]/node3");
    }

    #[test]
    fn test_dot_formatter_index_attaches_without_separator() {
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
        assert_eq!(
            format_path(&p, &DotFormatter),
            "node1[ 1 ][ 2 ].node2.node3"
        );
    }

    #[test]
    fn test_root_renders_start_only() {
        let p: ObjectPath<&str> = ObjectPath::root();
        assert_eq!(format_path(&p, &SlashFormatter), "/");
        assert_eq!(format_path(&p, &DotFormatter), "");
    }
}
