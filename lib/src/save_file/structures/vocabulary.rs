use std::fmt;

use tracing::info;

use super::super::parser::types::GameString;

/// The broad kind of a star class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StarCategory {
    Main,
    Giant,
    Binary,
    Trinary,
    BlackHole,
    NeutronStar,
    Pulsar,
}

/// The kind of a galactic object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ObjectKind {
    Star,
}

/// The meaning of a galactic object flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SystemFlag {
    Home,
    Hostile,
    Event,
    Precursor,
    FallenEmpire,
}

/// The kind of a bypass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BypassKind {
    Wormhole,
    Gateway,
    LGate,
    Relay,
    ShroudTunnel,
}

// generated by the build script from the files in data/
include!(concat!(env!("OUT_DIR"), "/star_classes.rs"));
include!(concat!(env!("OUT_DIR"), "/object_types.rs"));
include!(concat!(env!("OUT_DIR"), "/system_flags.rs"));
include!(concat!(env!("OUT_DIR"), "/bypass_types.rs"));

/// An open vocabulary of values. The save format keeps gaining new values, so
/// the known ones are only ever a best effort categorization.
pub trait Vocabulary: Sized + Copy {
    /// What the values are, used in diagnostics.
    const WHAT: &'static str;

    /// Looks up the category of a raw value.
    fn lookup(raw: &str) -> Option<Self>;
}

impl Vocabulary for StarCategory {
    const WHAT: &'static str = "star class";

    fn lookup(raw: &str) -> Option<Self> {
        STAR_CLASSES.get(raw).copied()
    }
}

impl Vocabulary for ObjectKind {
    const WHAT: &'static str = "galactic object type";

    fn lookup(raw: &str) -> Option<Self> {
        OBJECT_TYPES.get(raw).copied()
    }
}

impl Vocabulary for SystemFlag {
    const WHAT: &'static str = "galactic object flag";

    fn lookup(raw: &str) -> Option<Self> {
        SYSTEM_FLAGS.get(raw).copied()
    }
}

impl Vocabulary for BypassKind {
    const WHAT: &'static str = "bypass type";

    fn lookup(raw: &str) -> Option<Self> {
        BYPASS_TYPES.get(raw).copied()
    }
}

/// A value from an open vocabulary. The raw value is always retained, and the
/// category is present only if the value is a known one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recognized<C> {
    raw: GameString,
    category: Option<C>,
}

impl<C: Vocabulary> Recognized<C> {
    /// Categorizes the raw value. Unknown values are kept as they are, and a
    /// diagnostic is emitted.
    pub fn new(raw: &str) -> Self {
        let category = C::lookup(raw);
        if category.is_none() {
            info!("unknown {}: {}", C::WHAT, raw);
        }
        Recognized {
            raw: GameString::from(raw),
            category,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn category(&self) -> Option<C> {
        self.category
    }

    pub fn is_recognized(&self) -> bool {
        self.category.is_some()
    }
}

impl<C> fmt::Display for Recognized<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
