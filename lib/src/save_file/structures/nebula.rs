use super::{
    super::parser::{
        types::{parse_opt_or_default, GameId, GameString},
        SectionRef,
    },
    id_list, Coordinate, FromRawSection, MappingError,
};

/// A nebula, spanning a number of galactic objects.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Nebula {
    name: GameString,
    coordinate: Coordinate,
    radius: f64,
    galactic_objects: Vec<GameId>,
}

impl FromRawSection for Nebula {
    fn from_raw_section(section: SectionRef<'_>) -> Result<Self, MappingError> {
        Ok(Nebula {
            name: GameString::from(section.attribute_value("name").unwrap_or_default()),
            coordinate: Coordinate::of(section)?,
            radius: parse_opt_or_default(section.attribute_value("radius")),
            galactic_objects: id_list(section, "galactic_object"),
        })
    }
}

impl Nebula {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The galactic objects within the nebula.
    pub fn galactic_objects(&self) -> &[GameId] {
        &self.galactic_objects
    }
}
