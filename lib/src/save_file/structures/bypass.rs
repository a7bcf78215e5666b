use super::{
    super::parser::{
        types::{parse_opt_or_default, parse_or_default, parse_yes, GameId},
        SectionRef,
    },
    field, id_list, required_child, section_id, BypassKind, FromRawSection, MappingError, Recognized,
};

/// The owner of a bypass, a pair of an owner kind and an id of an entity of
/// that kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Owner {
    kind: i32,
    id: GameId,
}

impl Owner {
    fn from_section(section: SectionRef<'_>) -> Self {
        Owner {
            kind: parse_opt_or_default(field(section, "type")),
            id: parse_opt_or_default(field(section, "id")),
        }
    }

    pub fn kind(&self) -> i32 {
        self.kind
    }

    pub fn id(&self) -> GameId {
        self.id
    }
}

/// A travel shortcut between galactic objects, like a wormhole or a gateway.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bypass {
    id: GameId,
    kind: Recognized<BypassKind>,
    active: bool,
    linked_to: Option<GameId>,
    connections: Vec<GameId>,
    owner: Owner,
}

impl FromRawSection for Bypass {
    fn from_raw_section(section: SectionRef<'_>) -> Result<Self, MappingError> {
        Ok(Bypass {
            id: section_id(section),
            kind: Recognized::new(section.attribute_value("type").unwrap_or_default()),
            active: parse_yes(section.attribute_value("active")),
            linked_to: section
                .attribute_value("linked_to")
                .filter(|v| !v.is_empty())
                .map(parse_or_default),
            connections: id_list(section, "connections"),
            owner: required_child(section, "owner", Owner::from_section)?,
        })
    }
}

impl Bypass {
    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn kind(&self) -> &Recognized<BypassKind> {
        &self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The bypass this one leads to, for point to point bypasses.
    pub fn linked_to(&self) -> Option<GameId> {
        self.linked_to
    }

    /// The bypasses this one is connected to, for networked bypasses.
    pub fn connections(&self) -> &[GameId] {
        &self.connections
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }
}
