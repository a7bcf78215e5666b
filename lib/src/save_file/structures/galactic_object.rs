use super::{
    super::parser::{
        types::{parse_opt_or_default, GameId},
        SectionRef,
    },
    field, id_list, inline_attributes, section_id, Coordinate, FromRawSection, LocalizableString, MappingError,
    ObjectKind, Recognized, StarCategory, SystemFlag,
};

/// An edge between two galactic objects. Every hyperlane is stored on both of
/// its ends.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Hyperlane {
    to: GameId,
    length: f64,
}

impl Hyperlane {
    /// The galactic object at the other end. Not guaranteed to exist.
    pub fn to(&self) -> GameId {
        self.to
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

/// A star system, a node of the galaxy graph.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GalacticObject {
    id: GameId,
    coordinate: Coordinate,
    kind: Recognized<ObjectKind>,
    name: LocalizableString,
    planets: Vec<GameId>,
    star_class: Recognized<StarCategory>,
    hyperlanes: Vec<Hyperlane>,
    bypasses: Vec<GameId>,
    flags: Vec<Recognized<SystemFlag>>,
}

impl FromRawSection for GalacticObject {
    fn from_raw_section(section: SectionRef<'_>) -> Result<Self, MappingError> {
        let mut hyperlanes = Vec::new();
        if let Some(lanes) = section.child("hyperlane") {
            for lane in lanes.sections() {
                hyperlanes.push(Hyperlane {
                    to: parse_opt_or_default(field(lane, "to")),
                    length: parse_opt_or_default(field(lane, "length")),
                });
            }
        }
        let mut flags = Vec::new();
        if let Some(flag_section) = section.child("flags") {
            // the flag names are what matters, the values are just dates
            for attribute in flag_section.attributes() {
                if let Some(name) = attribute.name() {
                    flags.push(Recognized::new(name));
                }
            }
            for (name, _) in inline_attributes(flag_section) {
                flags.push(Recognized::new(name));
            }
        }
        Ok(GalacticObject {
            id: section_id(section),
            coordinate: Coordinate::of(section)?,
            kind: Recognized::new(section.attribute_value("type").unwrap_or_default()),
            name: LocalizableString::of(section, "name"),
            planets: id_list(section, "planet"),
            star_class: Recognized::new(section.attribute_value("star_class").unwrap_or_default()),
            hyperlanes,
            bypasses: id_list(section, "bypasses"),
            flags,
        })
    }
}

impl GalacticObject {
    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn kind(&self) -> &Recognized<ObjectKind> {
        &self.kind
    }

    pub fn name(&self) -> &LocalizableString {
        &self.name
    }

    /// The planets in the system.
    pub fn planets(&self) -> &[GameId] {
        &self.planets
    }

    pub fn star_class(&self) -> &Recognized<StarCategory> {
        &self.star_class
    }

    pub fn hyperlanes(&self) -> &[Hyperlane] {
        &self.hyperlanes
    }

    /// The ids of the bypasses located in the system.
    pub fn bypasses(&self) -> &[GameId] {
        &self.bypasses
    }

    pub fn flags(&self) -> &[Recognized<SystemFlag>] {
        &self.flags
    }

    /// Checks whether the system has the given flag, known or not.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f.raw() == flag)
    }
}

#[cfg(test)]
mod tests {
    use std::error;

    use super::{super::super::parser::RawTree, *};

    fn get_test_obj(contents: &str) -> Result<GalacticObject, Box<dyn error::Error>> {
        let tree = RawTree::parse(contents.lines())?;
        let section = tree.root().first_section().unwrap();
        Ok(GalacticObject::from_raw_section(section)?)
    }

    #[test]
    fn test_minimal() -> Result<(), Box<dyn error::Error>> {
        let object = get_test_obj(
            "
        0={
            coordinate={
                x=1.0
                y=2.0
                origin=0
                randomized=no
            }
            type=\"star\"
            name=\"Sol\"
            star_class=\"sc_g\"
        }
        ",
        )?;
        assert_eq!(object.id(), 0);
        assert_eq!(object.coordinate().x(), 1.0);
        assert_eq!(object.coordinate().y(), 2.0);
        assert!(!object.coordinate().is_randomized());
        assert_eq!(object.kind().category(), Some(ObjectKind::Star));
        assert_eq!(object.name().as_str(), "Sol");
        assert_eq!(object.star_class().raw(), "sc_g");
        assert_eq!(object.star_class().category(), Some(StarCategory::Main));
        assert!(object.hyperlanes().is_empty());
        assert!(object.bypasses().is_empty());
        assert!(object.flags().is_empty());
        assert!(object.planets().is_empty());
        Ok(())
    }

    #[test]
    fn test_full() -> Result<(), Box<dyn error::Error>> {
        let object = get_test_obj(
            "
        3={
            coordinate={
                x=-120.5
                y=88
                origin=4294967295
                randomized=yes
            }
            type=star
            name={
                key=\"NAME_Deneb\"
            }
            planet=14
            planet=15
            star_class=\"sc_quasar\"
            hyperlane={
                {
                    to=7
                    length=3.2
                }
                {
                    to=9
                    length=oops
                }
            }
            bypasses={ 21 22 }
            flags={
                hostile_system=52080
                my_mod_flag=1
            }
        }
        ",
        )?;
        assert_eq!(object.id(), 3);
        assert_eq!(object.coordinate().origin(), 4294967295);
        assert!(object.name().is_key());
        assert_eq!(object.name().as_str(), "NAME_Deneb");
        assert_eq!(object.planets(), &[14, 15]);
        assert!(!object.star_class().is_recognized());
        assert_eq!(object.star_class().raw(), "sc_quasar");
        assert_eq!(object.hyperlanes().len(), 2);
        assert_eq!(object.hyperlanes()[0].to(), 7);
        assert_eq!(object.hyperlanes()[0].length(), 3.2);
        assert_eq!(object.hyperlanes()[1].to(), 9);
        assert_eq!(object.hyperlanes()[1].length(), 0.0);
        assert_eq!(object.bypasses(), &[21, 22]);
        assert_eq!(object.flags().len(), 2);
        assert_eq!(object.flags()[0].category(), Some(SystemFlag::Hostile));
        assert_eq!(object.flags()[1].category(), None);
        assert!(object.has_flag("my_mod_flag"));
        Ok(())
    }

    #[test]
    fn test_empty_lists() -> Result<(), Box<dyn error::Error>> {
        let object = get_test_obj(
            "
        5={
            coordinate={
                x=0
                y=0
            }
            hyperlane={}
            bypasses={}
            flags={}
        }
        ",
        )?;
        assert!(object.hyperlanes().is_empty());
        assert!(object.bypasses().is_empty());
        assert!(object.flags().is_empty());
        assert_eq!(object.star_class().raw(), "");
        Ok(())
    }

    #[test]
    fn test_one_line_hyperlane() -> Result<(), Box<dyn error::Error>> {
        let object = get_test_obj(
            "
        3={
            coordinate={ x=1.0 y=2.0 origin=0 randomized=no }
            hyperlane={
                { to=7 length=3.2 }
                { to=12 length=40 }
            }
        }
        ",
        )?;
        assert_eq!(object.coordinate().x(), 1.0);
        assert_eq!(object.coordinate().y(), 2.0);
        assert!(!object.coordinate().is_randomized());
        assert_eq!(object.hyperlanes().len(), 2);
        assert_eq!(object.hyperlanes()[0].to(), 7);
        assert_eq!(object.hyperlanes()[0].length(), 3.2);
        assert_eq!(object.hyperlanes()[1].to(), 12);
        assert_eq!(object.hyperlanes()[1].length(), 40.0);
        Ok(())
    }

    #[test]
    fn test_one_line_flags() -> Result<(), Box<dyn error::Error>> {
        let object = get_test_obj(
            "
        8={
            coordinate={
                x=0
                y=0
            }
            flags={ hostile_system=52080 }
        }
        ",
        )?;
        assert_eq!(object.flags().len(), 1);
        assert_eq!(object.flags()[0].raw(), "hostile_system");
        assert!(object.has_flag("hostile_system"));
        Ok(())
    }

    #[test]
    fn test_malformed_id() -> Result<(), Box<dyn error::Error>> {
        let object = get_test_obj(
            "
        abc={
            coordinate={
                x=1
                y=1
            }
        }
        ",
        )?;
        assert_eq!(object.id(), 0);
        Ok(())
    }
}
