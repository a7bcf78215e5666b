use super::{
    super::parser::{
        types::{parse_or_default, GameId},
        SectionRef,
    },
    section_id, FromRawSection, LocalizableString, MappingError,
};

/// A struct representing a country in the game
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Country {
    id: GameId,
    name: LocalizableString,
    starting_system: Option<GameId>,
}

impl FromRawSection for Country {
    fn from_raw_section(section: SectionRef<'_>) -> Result<Self, MappingError> {
        Ok(Country {
            id: section_id(section),
            name: LocalizableString::of(section, "name"),
            starting_system: section
                .attribute_value("starting_system")
                .map(parse_or_default),
        })
    }
}

impl Country {
    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn name(&self) -> &LocalizableString {
        &self.name
    }

    /// The home system of the country, if it has one.
    pub fn starting_system(&self) -> Option<GameId> {
        self.starting_system
    }
}

#[cfg(test)]
mod tests {
    use std::error;

    use super::{super::super::parser::RawTree, *};

    #[test]
    fn test_country() -> Result<(), Box<dyn error::Error>> {
        let tree = RawTree::parse(
            "
            country={
                0={
                    name=\"United Nations of Earth\"
                    starting_system=12
                }
                1={
                    name={
                        key=\"EMPIRE_DESIGN_humans2\"
                    }
                }
                2={
                    name=\"Broken\"
                    starting_system=none
                }
            }
            "
            .lines(),
        )?;
        let countries = tree
            .root()
            .child_err("country")?
            .sections()
            .map(Country::from_raw_section)
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(countries[0].id(), 0);
        assert_eq!(countries[0].name().as_str(), "United Nations of Earth");
        assert_eq!(countries[0].starting_system(), Some(12));
        assert_eq!(countries[1].starting_system(), None);
        assert!(countries[1].name().is_key());
        // present but malformed falls back to the default id
        assert_eq!(countries[2].starting_system(), Some(0));
        Ok(())
    }
}
