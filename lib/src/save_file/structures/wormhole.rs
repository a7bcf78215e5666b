use super::{
    super::parser::{
        types::{parse_opt_or_default, GameId},
        SectionRef,
    },
    section_id, Coordinate, FromRawSection, MappingError,
};

/// A natural wormhole, the physical end of a wormhole [Bypass](super::Bypass).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Wormhole {
    id: GameId,
    coordinate: Coordinate,
    bypass: GameId,
}

impl FromRawSection for Wormhole {
    fn from_raw_section(section: SectionRef<'_>) -> Result<Self, MappingError> {
        Ok(Wormhole {
            id: section_id(section),
            coordinate: Coordinate::of(section)?,
            bypass: parse_opt_or_default(section.attribute_value("bypass")),
        })
    }
}

impl Wormhole {
    pub fn id(&self) -> GameId {
        self.id
    }

    /// The position of the wormhole. The origin of the coordinate is the
    /// galactic object the wormhole is in.
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn bypass(&self) -> GameId {
        self.bypass
    }
}

#[cfg(test)]
mod tests {
    use std::error;

    use super::{super::super::parser::RawTree, *};

    #[test]
    fn test_wormhole() -> Result<(), Box<dyn error::Error>> {
        let tree = RawTree::parse(
            "
            2={
                coordinate={
                    x=10.5
                    y=-3
                    origin=17
                    randomized=no
                }
                bypass=4
            }
            "
            .lines(),
        )?;
        let wormhole = Wormhole::from_raw_section(tree.root().child_err("2")?)?;
        assert_eq!(wormhole.id(), 2);
        assert_eq!(wormhole.coordinate().origin(), 17);
        assert_eq!(wormhole.coordinate().x(), 10.5);
        assert_eq!(wormhole.bypass(), 4);
        Ok(())
    }
}
