use tracing::debug;

use super::{
    error::ParsingError,
    raw_tree::{RawTree, SectionId},
    types::{unquote, GameString},
};

const OPEN: char = '{';
const CLOSE: char = '}';
const EQUALS: char = '=';

/// The shape of a single trimmed, non blank line.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    /// `name={`, or `name={ body }` when the section opens and closes on the
    /// same line.
    Named { name: &'a str, body: Option<&'a str> },
    /// `{`, or `{ body }`.
    Anonymous { body: Option<&'a str> },
    /// One or more `}`.
    Close(usize),
    /// `name=value`
    Attribute { name: &'a str, value: &'a str },
    /// A bare value, usually a list item.
    Bare(&'a str),
}

/// Finds the opening brace of a named section, that is the first `=` that is
/// followed by a `{`, with optional whitespace in between.
/// Returns the index of the `=` and the index of the `{`.
fn find_named_opener(line: &str) -> Option<(usize, usize)> {
    for (eq, _) in line.match_indices(EQUALS) {
        let rest = &line[eq + 1..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with(OPEN) {
            return Some((eq, eq + 1 + rest.len() - trimmed.len()));
        }
    }
    None
}

/// Delimits the body of a section that opens at `open` and closes on the same
/// line. The body ends at the brace that brings the nesting back to zero.
fn single_line_body(line: &str, open: usize, number: usize) -> Result<&str, ParsingError> {
    let start = open + OPEN.len_utf8();
    let mut depth = 1usize;
    for (index, c) in line[start..].char_indices() {
        match c {
            OPEN => depth += 1,
            CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Ok(line[start..start + index].trim());
                }
            }
            _ => {}
        }
    }
    Err(ParsingError::InvalidSpan { line: number })
}

/// Classifies a trimmed, non blank line. Openers are checked before the
/// generic attribute case, since they contain an `=` too.
fn classify(line: &str, number: usize) -> Result<Line<'_>, ParsingError> {
    if let Some((eq, open)) = find_named_opener(line) {
        let name = line[..eq].trim();
        let body = if line.contains(CLOSE) {
            Some(single_line_body(line, open, number)?)
        } else {
            None
        };
        Ok(Line::Named { name, body })
    } else if let Some(open) = line.find(OPEN) {
        let body = if line.contains(CLOSE) {
            Some(single_line_body(line, open, number)?)
        } else {
            None
        };
        Ok(Line::Anonymous { body })
    } else if line.contains(CLOSE) {
        Ok(Line::Close(line.matches(CLOSE).count()))
    } else if let Some((name, value)) = line.split_once(EQUALS) {
        Ok(Line::Attribute {
            name: name.trim(),
            value: unquote(value.trim()),
        })
    } else {
        Ok(Line::Bare(line))
    }
}

/// A line by line builder of a [RawTree].
///
/// The builder keeps a stack of the currently open sections, the top of which
/// is the cursor new content is appended to. This way input of any nesting
/// depth can be processed without recursion, and the lines can come from any
/// source, one at a time.
///
/// A section may also be opened over two lines, as `name=` followed by a
/// line holding just `{`. A `name=` line followed by anything else is an
/// attribute with an empty value.
///
/// ## Example
///
/// ```rust
/// use stellaris_galaxy_extractor_lib::save_file::parser::TreeBuilder;
///
/// let mut builder = TreeBuilder::new();
/// for line in ["player={", "{", "name=\"unknown\"", "}", "}"] {
///     builder.feed(line).unwrap();
/// }
/// let tree = builder.finish().unwrap();
/// assert!(tree.root().child("player").is_some());
/// ```
pub struct TreeBuilder {
    tree: RawTree,
    stack: Vec<SectionId>,
    /// The number of the line that closed the root scope, if any did.
    root_closed: Option<usize>,
    /// The number of lines fed so far
    line: usize,
    /// The name of a `name=` line, which opens a section if the next line is
    /// a bare `{`.
    pending: Option<GameString>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            tree: RawTree::new(),
            stack: vec![SectionId::ROOT],
            root_closed: None,
            line: 0,
            pending: None,
        }
    }

    /// The section new content is currently appended to.
    fn cursor(&self) -> SectionId {
        // the root is never popped
        *self.stack.last().unwrap_or(&SectionId::ROOT)
    }

    /// Processes the next line of input.
    pub fn feed(&mut self, line: &str) -> Result<(), ParsingError> {
        self.line += 1;
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        // closing the root is only allowed on the very last line
        if let Some(closed) = self.root_closed {
            return Err(ParsingError::UnexpectedClose { line: closed });
        }
        let cursor = self.cursor();
        let class = classify(line, self.line)?;
        if let Some(name) = self.pending.take() {
            if let Line::Anonymous { body } = class {
                let section = self.tree.add_section(cursor, Some(name));
                self.open(section, body);
                return Ok(());
            }
            self.tree.add_attribute(cursor, Some(name), GameString::from(""));
        }
        match class {
            Line::Named { name, body } => {
                let section = self.tree.add_section(cursor, Some(GameString::from(name)));
                self.open(section, body);
            }
            Line::Anonymous { body } => {
                let section = self.tree.add_section(cursor, None);
                self.open(section, body);
            }
            Line::Close(count) => {
                for _ in 0..count {
                    if self.stack.len() > 1 {
                        self.stack.pop();
                    } else if self.root_closed.is_none() {
                        self.root_closed = Some(self.line);
                    } else {
                        return Err(ParsingError::UnexpectedClose { line: self.line });
                    }
                }
            }
            Line::Attribute { name, value } if value.is_empty() && line.ends_with(EQUALS) => {
                self.pending = Some(GameString::from(name));
            }
            Line::Attribute { name, value } => {
                self.tree.add_attribute(
                    cursor,
                    Some(GameString::from(name)),
                    GameString::from(value),
                );
            }
            Line::Bare(value) => {
                self.tree
                    .add_attribute(cursor, None, GameString::from(value));
            }
        }
        Ok(())
    }

    /// Either stores the single line body of a freshly created section, or
    /// makes the section the new cursor.
    fn open(&mut self, section: SectionId, body: Option<&str>) {
        match body {
            Some(body) => self
                .tree
                .add_attribute(section, None, GameString::from(body)),
            None => self.stack.push(section),
        }
    }

    /// Checks that every scope has been closed, and groups repeated top level
    /// sections.
    pub fn finish(mut self) -> Result<RawTree, ParsingError> {
        let depth = self.stack.len() - 1;
        if depth != 0 {
            return Err(ParsingError::UnterminatedScope { depth });
        }
        if let Some(name) = self.pending.take() {
            self.tree
                .add_attribute(SectionId::ROOT, Some(name), GameString::from(""));
        }
        self.tree.coalesce_root_duplicates();
        debug!(
            "built raw tree with {} sections from {} lines",
            self.tree.len(),
            self.line
        );
        Ok(self.tree)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RawTree {
    /// Builds the tree from the lines of a save file, in a single pass.
    pub fn parse<I, S>(lines: I) -> Result<RawTree, ParsingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = TreeBuilder::new();
        for line in lines {
            builder.feed(line.as_ref())?;
        }
        builder.finish()
    }
}
