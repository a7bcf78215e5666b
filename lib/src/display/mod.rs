use std::fmt;

use super::save_file::parser::SectionRef;

const INDENT: &str = "  ";

/// How unnamed sections are listed.
const UNNAMED: &str = "*";

/// A browsable listing of a part of the [RawTree](crate::save_file::parser::RawTree).
///
/// Every section is listed on its own line, followed by its child sections
/// and then its attributes, one level of indentation deeper. Sections below
/// the depth limit are folded into a trailing `...`.
///
/// ## Example
///
/// ```rust
/// use stellaris_galaxy_extractor_lib::{display::TreeView, save_file::parser::RawTree};
///
/// let tree = RawTree::parse(["country={", "0={", "name=\"Earth\"", "}", "}"]).unwrap();
/// let view = TreeView::new(tree.root().child("country").unwrap()).with_depth(1);
/// assert_eq!(view.to_string(), "country\n  0 ...\n");
/// ```
#[derive(Clone, Copy)]
pub struct TreeView<'tree> {
    root: SectionRef<'tree>,
    depth: usize,
}

impl<'tree> TreeView<'tree> {
    /// Creates a view of the entire subtree under `root`.
    pub fn new(root: SectionRef<'tree>) -> Self {
        TreeView {
            root,
            depth: usize::MAX,
        }
    }

    /// Limits how many levels below the root are listed.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    fn write_section(
        f: &mut fmt::Formatter<'_>,
        section: SectionRef<'_>,
        level: usize,
        depth: usize,
    ) -> fmt::Result {
        write!(
            f,
            "{}{}",
            INDENT.repeat(level),
            section.name().unwrap_or(UNNAMED)
        )?;
        if section.is_synthetic() {
            write!(f, " (grouped)")?;
        }
        if depth == 0 {
            if section.sections().next().is_some() || !section.attributes().is_empty() {
                write!(f, " ...")?;
            }
            return writeln!(f);
        }
        writeln!(f)?;
        for child in section.sections() {
            Self::write_section(f, child, level + 1, depth - 1)?;
        }
        let indent = INDENT.repeat(level + 1);
        for attribute in section.attributes() {
            match attribute.name() {
                Some(name) => writeln!(f, "{}{}: {}", indent, name, attribute.value())?,
                None => writeln!(f, "{}{}", indent, attribute.value())?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, self.root, 0, self.depth)
    }
}
