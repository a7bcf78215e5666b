use super::{
    super::parser::{
        types::{parse_opt_or_default, GameId, GameString},
        KeyError, SectionRef,
    },
    field, FromRawSection, MappingError,
};

/// A struct representing the player of the save
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Player {
    name: GameString,
    country: GameId,
}

impl FromRawSection for Player {
    /// Reads the player from the `player` section, which holds an unnamed
    /// entry per player. Only the first one is of interest.
    fn from_raw_section(section: SectionRef<'_>) -> Result<Self, MappingError> {
        let entry = match section.first_section() {
            Some(entry) => entry,
            None if cfg!(feature = "permissive") => {
                return Ok(Player {
                    name: GameString::from(""),
                    country: 0,
                })
            }
            None => {
                return Err(
                    KeyError::MissingSection("player entry".to_owned(), section.path()).into(),
                )
            }
        };
        Ok(Player {
            name: GameString::from(field(entry, "name").unwrap_or_default()),
            country: parse_opt_or_default(field(entry, "country")),
        })
    }
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The id of the country the player plays as.
    pub fn country(&self) -> GameId {
        self.country
    }
}
