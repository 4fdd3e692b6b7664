//! Indented text rendering of a merge tree.
//!
//! ```text
//! -
//!   c
//!   -
//!     a
//!     b
//! ```
//!
//! Internal nodes print as `-`, leaves as their label (or row index).

use super::bicluster::Bicluster;
use core::fmt;

/// Displays a [`Bicluster`] tree, one node per line.
#[derive(Debug, Clone, Copy)]
pub struct TreeDisplay<'a, S = String> {
    root: &'a Bicluster,
    labels: Option<&'a [S]>,
    indent: &'a str,
}

impl Bicluster {
    /// Render leaves by row index.
    pub fn display(&self) -> TreeDisplay<'_> {
        TreeDisplay {
            root: self,
            labels: None,
            indent: "  ",
        }
    }

    /// Render leaves by `labels[id]`, falling back to the id when out of range.
    pub fn display_with<'a, S: AsRef<str>>(&'a self, labels: &'a [S]) -> TreeDisplay<'a, S> {
        TreeDisplay {
            root: self,
            labels: Some(labels),
            indent: "  ",
        }
    }
}

impl<'a, S> TreeDisplay<'a, S> {
    /// Set the per-level indent (two spaces by default).
    pub fn with_indent(mut self, indent: &'a str) -> Self {
        self.indent = indent;
        self
    }
}

impl<S: AsRef<str>> fmt::Display for TreeDisplay<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            for _ in 0..depth {
                f.write_str(self.indent)?;
            }

            if !node.is_leaf() {
                writeln!(f, "-")?;
            } else {
                let label = self
                    .labels
                    .and_then(|labels| labels.get(node.id() as usize));
                match label {
                    Some(label) => writeln!(f, "{}", label.as_ref())?,
                    None => writeln!(f, "{}", node.id())?,
                }
            }

            if let Some((l, r)) = node.children() {
                stack.push((r, depth + 1));
                stack.push((l, depth + 1));
            }
        }
        Ok(())
    }
}
