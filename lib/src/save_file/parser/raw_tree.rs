use std::{collections::HashMap, error, ops::Index};

use derive_more::Display;

use super::types::GameString;

/// The name given to the section holding all top level content.
pub const ROOT_NAME: &str = "Root";

/// The separator used by [SectionRef::path].
const PATH_SEPARATOR: &str = "/";

/// A lookup into the raw tree failed.
#[derive(Debug, Display)]
pub enum KeyError {
    /// A child section is missing.
    #[display("section {} missing from {}", _0, _1)]
    MissingSection(String, String),
    /// An attribute is missing.
    #[display("attribute {} missing from {}", _0, _1)]
    MissingAttribute(String, String),
}

impl error::Error for KeyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// An index of a [RawSection] in a [RawTree].
/// Sections never move, so an id remains valid as long as the tree does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(usize);

impl SectionId {
    /// The id of the root section.
    pub const ROOT: SectionId = SectionId(0);
}

/// A `name=value` pair or a bare value inside a section.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute {
    name: Option<GameString>,
    value: GameString,
    parent: SectionId,
}

impl RawAttribute {
    /// The attribute name, absent for list items and single line section
    /// bodies.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The attribute value. May be empty.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The section this attribute belongs to.
    pub fn parent(&self) -> SectionId {
        self.parent
    }
}

/// A brace delimited scope of the save file, or a synthetic grouping of
/// repeated top level scopes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    name: Option<GameString>,
    parent: Option<SectionId>,
    attributes: Vec<RawAttribute>,
    sections: Vec<SectionId>,
    synthetic: bool,
}

impl RawSection {
    fn new(name: Option<GameString>, parent: Option<SectionId>, synthetic: bool) -> Self {
        RawSection {
            name,
            parent,
            attributes: Vec::new(),
            sections: Vec::new(),
            synthetic,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    /// Attributes in file order.
    pub fn attributes(&self) -> &[RawAttribute] {
        &self.attributes
    }

    /// Child sections in file order.
    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    /// Whether this section was created to group repeated top level sections,
    /// rather than being present in the file.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

/// The generic, order preserving tree of a save file.
/// Sections are stored in an arena, parents own their children through
/// [SectionId]s and children point back at their parent the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTree {
    sections: Vec<RawSection>,
}

impl RawTree {
    /// Creates a tree holding only the root section.
    pub(super) fn new() -> Self {
        RawTree {
            sections: vec![RawSection::new(Some(GameString::from(ROOT_NAME)), None, false)],
        }
    }

    /// The root section.
    pub fn root(&self) -> SectionRef<'_> {
        SectionRef {
            tree: self,
            id: SectionId::ROOT,
        }
    }

    /// Get a navigable reference to a section, if the id belongs to this tree.
    pub fn section(&self, id: SectionId) -> Option<SectionRef<'_>> {
        if id.0 < self.sections.len() {
            Some(SectionRef { tree: self, id })
        } else {
            None
        }
    }

    /// The number of sections in the tree, the root included.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Appends a new child section to `parent`.
    pub(super) fn add_section(&mut self, parent: SectionId, name: Option<GameString>) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(RawSection::new(name, Some(parent), false));
        self.sections[parent.0].sections.push(id);
        id
    }

    /// Appends a new attribute to `parent`.
    pub(super) fn add_attribute(
        &mut self,
        parent: SectionId,
        name: Option<GameString>,
        value: GameString,
    ) {
        self.sections[parent.0].attributes.push(RawAttribute {
            name,
            value,
            parent,
        });
    }

    /// Some top level sections are written as the same block repeated, rather
    /// than a single block holding a list. Every top level name that occurs
    /// more than once gets a synthetic section of the same name, which then
    /// holds all of the repeated blocks in their original order. The synthetic
    /// sections are appended after the remaining root children.
    ///
    /// Unnamed top level sections are never grouped, however many there are.
    /// They stay in place among the remaining root children.
    pub(super) fn coalesce_root_duplicates(&mut self) {
        let children = std::mem::take(&mut self.sections[SectionId::ROOT.0].sections);
        let mut counts: HashMap<GameString, usize> = HashMap::new();
        for id in children.iter() {
            if let Some(name) = &self.sections[id.0].name {
                *counts.entry(name.clone()).or_default() += 1;
            }
        }
        let mut kept = Vec::with_capacity(children.len());
        let mut holders: HashMap<GameString, SectionId> = HashMap::new();
        let mut synthetic = Vec::new();
        for id in children {
            let name = match &self.sections[id.0].name {
                Some(name) if counts[name] > 1 => name.clone(),
                _ => {
                    kept.push(id);
                    continue;
                }
            };
            let holder = match holders.get(&name) {
                Some(holder) => *holder,
                None => {
                    let holder = SectionId(self.sections.len());
                    self.sections.push(RawSection::new(
                        Some(name.clone()),
                        Some(SectionId::ROOT),
                        true,
                    ));
                    holders.insert(name, holder);
                    synthetic.push(holder);
                    holder
                }
            };
            self.sections[id.0].parent = Some(holder);
            self.sections[holder.0].sections.push(id);
        }
        kept.extend(synthetic);
        self.sections[SectionId::ROOT.0].sections = kept;
    }
}

impl Index<SectionId> for RawTree {
    type Output = RawSection;

    fn index(&self, index: SectionId) -> &Self::Output {
        &self.sections[index.0]
    }
}

/// A navigable, read only view of a section within its [RawTree].
#[derive(Debug, Clone, Copy)]
pub struct SectionRef<'tree> {
    tree: &'tree RawTree,
    id: SectionId,
}

impl<'tree> SectionRef<'tree> {
    fn raw(&self) -> &'tree RawSection {
        &self.tree.sections[self.id.0]
    }

    fn wrap(&self, id: SectionId) -> SectionRef<'tree> {
        SectionRef {
            tree: self.tree,
            id,
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn name(&self) -> Option<&'tree str> {
        self.raw().name()
    }

    pub fn is_root(&self) -> bool {
        self.id == SectionId::ROOT
    }

    pub fn is_synthetic(&self) -> bool {
        self.raw().is_synthetic()
    }

    pub fn parent(&self) -> Option<SectionRef<'tree>> {
        self.raw().parent().map(|id| self.wrap(id))
    }

    /// Child sections, in file order.
    pub fn sections(&self) -> impl Iterator<Item = SectionRef<'tree>> + 'tree {
        let tree = self.tree;
        self.raw()
            .sections()
            .iter()
            .map(move |id| SectionRef { tree, id: *id })
    }

    /// Attributes, in file order.
    pub fn attributes(&self) -> &'tree [RawAttribute] {
        self.raw().attributes()
    }

    /// The first child section, regardless of its name.
    pub fn first_section(&self) -> Option<SectionRef<'tree>> {
        self.raw().sections().first().map(|id| self.wrap(*id))
    }

    /// The first child section with the given name.
    pub fn child(&self, name: &str) -> Option<SectionRef<'tree>> {
        self.sections().find(|s| s.name() == Some(name))
    }

    /// Like [SectionRef::child], but a missing section is an error.
    pub fn child_err(&self, name: &str) -> Result<SectionRef<'tree>, KeyError> {
        self.child(name)
            .ok_or_else(|| KeyError::MissingSection(name.to_owned(), self.path()))
    }

    /// The first attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&'tree RawAttribute> {
        self.attributes().iter().find(|a| a.name() == Some(name))
    }

    /// The value of the first attribute with the given name.
    pub fn attribute_value(&self, name: &str) -> Option<&'tree str> {
        self.attribute(name).map(|a| a.value())
    }

    /// Like [SectionRef::attribute_value], but a missing attribute is an error.
    pub fn attribute_value_err(&self, name: &str) -> Result<&'tree str, KeyError> {
        self.attribute_value(name)
            .ok_or_else(|| KeyError::MissingAttribute(name.to_owned(), self.path()))
    }

    /// The values of all attributes with the given name, in file order.
    pub fn attribute_values<'a>(&self, name: &'a str) -> impl Iterator<Item = &'tree str> + 'a
    where
        'tree: 'a,
    {
        self.attributes()
            .iter()
            .filter(move |a| a.name() == Some(name))
            .map(|a| a.value())
    }

    /// The values of all nameless attributes, in file order.
    pub fn values(&self) -> impl Iterator<Item = &'tree str> + 'tree {
        self.attributes()
            .iter()
            .filter(|a| a.name().is_none())
            .map(|a| a.value())
    }

    /// A human readable location of the section, like `Root/galactic_object/12`.
    /// Unnamed sections are shown as `*`.
    pub fn path(&self) -> String {
        let mut names = Vec::new();
        let mut current = Some(*self);
        while let Some(section) = current {
            names.push(section.name().unwrap_or("*"));
            current = section.parent();
        }
        names.reverse();
        names.join(PATH_SEPARATOR)
    }
}
