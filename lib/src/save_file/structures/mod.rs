use std::error;

use derive_more::Display;
use tracing::warn;

use super::parser::{
    types::{
        parse_id_list, parse_opt_or_default, parse_or_default, parse_yes, unquote, GameId,
        GameString,
    },
    KeyError, SectionRef,
};

/// A submodule that provides the open vocabularies, like star classes.
mod vocabulary;
pub use vocabulary::{
    BypassKind, ObjectKind, Recognized, StarCategory, SystemFlag, Vocabulary,
};

/// A submodule that provides the [GalacticObject] object.
mod galactic_object;
pub use galactic_object::{GalacticObject, Hyperlane};

/// A submodule that provides the [Country] object.
mod country;
pub use country::Country;

/// A submodule that provides the [Bypass] object.
mod bypass;
pub use bypass::{Bypass, Owner};

/// A submodule that provides the [Wormhole] object.
mod wormhole;
pub use wormhole::Wormhole;

/// A submodule that provides the [Player] object.
mod player;
pub use player::Player;

/// A submodule that provides the [Nebula] object.
mod nebula;
pub use nebula::Nebula;

/// An error that occurred while mapping the raw tree into structures.
#[derive(Debug, Display)]
pub enum MappingError {
    /// A top level section the galaxy can't be built without is missing.
    #[display("required section {} is missing", _0)]
    MissingSection(&'static str),
    /// A required part of an entity is missing.
    KeyError(KeyError),
}

impl From<KeyError> for MappingError {
    fn from(value: KeyError) -> Self {
        MappingError::KeyError(value)
    }
}

impl error::Error for MappingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::KeyError(err) => Some(err),
            _ => None,
        }
    }
}

/// For structures that are derived from a single section of the raw tree.
pub trait FromRawSection: Sized {
    /// Creates a new instance of the struct from the provided section.
    fn from_raw_section(section: SectionRef<'_>) -> Result<Self, MappingError>;
}

/// The id of an entity, which is the name of its section.
fn section_id(section: SectionRef<'_>) -> GameId {
    parse_opt_or_default(section.name())
}

/// Reads a child section the entity can't do without. With the `permissive`
/// feature, a missing section is read as the default value instead.
fn required_child<T: Default>(
    section: SectionRef<'_>,
    name: &str,
    read: impl FnOnce(SectionRef<'_>) -> T,
) -> Result<T, MappingError> {
    match section.child(name) {
        Some(child) => Ok(read(child)),
        None if cfg!(feature = "permissive") => {
            warn!("section {} missing from {}, using defaults", name, section.path());
            Ok(T::default())
        }
        None => Err(KeyError::MissingSection(name.to_owned(), section.path()).into()),
    }
}

/// Collects a list of ids that may be written either as repeated attributes
/// (`planet=3`), or as sections holding whitespace separated values
/// (`bypasses={ 12 13 }`), or both.
fn id_list(section: SectionRef<'_>, name: &str) -> Vec<GameId> {
    let mut ids: Vec<GameId> = section
        .attribute_values(name)
        .map(parse_or_default)
        .collect();
    for child in section.sections().filter(|s| s.name() == Some(name)) {
        for value in child.values() {
            ids.extend(parse_id_list(value));
        }
    }
    ids
}

/// The entries of a list like top level section. If the section is synthetic,
/// the entries of every grouped block are returned.
pub(super) fn entries<'tree>(section: SectionRef<'tree>) -> Vec<SectionRef<'tree>> {
    if section.is_synthetic() {
        section.sections().flat_map(|block| block.sections()).collect()
    } else {
        section.sections().collect()
    }
}

/// Splits a one line body, like `to=7 length=3.2`, into its whitespace
/// separated tokens. Whitespace between quotes doesn't split.
fn inline_tokens(body: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut quoted = false;
    for (index, c) in body.char_indices() {
        if c == '"' {
            quoted = !quoted;
        }
        if c.is_whitespace() && !quoted {
            if let Some(start) = start.take() {
                tokens.push(&body[start..index]);
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(start) = start {
        tokens.push(&body[start..]);
    }
    tokens
}

/// The `name=value` pairs of a section that was written on one line, like
/// `{ to=7 length=3.2 }`. Such a section holds its body as a nameless value.
/// Values are unquoted.
fn inline_attributes<'tree>(section: SectionRef<'tree>) -> Vec<(&'tree str, &'tree str)> {
    let mut pairs = Vec::new();
    for value in section.values() {
        for token in inline_tokens(value) {
            if let Some((name, value)) = token.split_once('=') {
                pairs.push((name, unquote(value)));
            }
        }
    }
    pairs
}

/// The value of an attribute, whether the section was written over several
/// lines or on one.
fn field<'tree>(section: SectionRef<'tree>, name: &str) -> Option<&'tree str> {
    section.attribute_value(name).or_else(|| {
        inline_attributes(section)
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    })
}

/// A position in the galaxy.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Coordinate {
    x: f64,
    y: f64,
    /// The galactic object the position is relative to
    origin: GameId,
    randomized: bool,
}

impl Coordinate {
    fn from_section(section: SectionRef<'_>) -> Self {
        Coordinate {
            x: parse_opt_or_default(field(section, "x")),
            y: parse_opt_or_default(field(section, "y")),
            origin: parse_opt_or_default(field(section, "origin")),
            randomized: parse_yes(field(section, "randomized")),
        }
    }

    /// Reads the `coordinate` section of an entity.
    fn of(section: SectionRef<'_>) -> Result<Self, MappingError> {
        required_child(section, "coordinate", Coordinate::from_section)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn origin(&self) -> GameId {
        self.origin
    }

    pub fn is_randomized(&self) -> bool {
        self.randomized
    }
}

/// A name that is either written out, or is a key to be localized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LocalizableString {
    /// `name="Sol"`
    Literal(GameString),
    /// `name={ key="NAME_Sol" }`
    Key(GameString),
}

impl Default for LocalizableString {
    fn default() -> Self {
        LocalizableString::Literal(GameString::from(""))
    }
}

impl LocalizableString {
    /// Reads the attribute or section called `name`.
    fn of(section: SectionRef<'_>, name: &str) -> Self {
        if let Some(child) = section.child(name) {
            LocalizableString::Key(GameString::from(field(child, "key").unwrap_or_default()))
        } else {
            LocalizableString::Literal(GameString::from(
                section.attribute_value(name).unwrap_or_default(),
            ))
        }
    }

    /// The literal name, or the localization key.
    pub fn as_str(&self) -> &str {
        match self {
            LocalizableString::Literal(s) | LocalizableString::Key(s) => s,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, LocalizableString::Key(_))
    }
}
