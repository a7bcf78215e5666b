use std::collections::{hash_map, HashMap};

use jomini::common::Date;
use tracing::debug;

use super::{
    parser::{
        types::{parse_date, unquote, GameId, GameString},
        RawTree, SectionRef,
    },
    process_section::process_section,
    structures::{
        Bypass, Country, FromRawSection, GalacticObject, Hyperlane, MappingError, Nebula, Player,
        Wormhole,
    },
};

/// The top level sections a galaxy can't be built without.
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "player",
    "galactic_object",
    "country",
    "bypasses",
    "natural_wormholes",
];

#[cfg(feature = "serde")]
fn serialize_date<S: serde::Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
    use jomini::common::PdsDate;
    match date {
        Some(date) => serializer.serialize_some(&date.iso_8601().to_string()),
        None => serializer.serialize_none(),
    }
}

/// The typed state of a galaxy, mapped from a [RawTree].
///
/// The state is read only once it's built. References between entities are
/// kept as ids, and are not validated, so every lookup may come up empty.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GalaxyState {
    version: GameString,
    version_control_revision: GameString,
    name: GameString,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_date"))]
    date: Option<Date>,
    required_dlcs: Vec<GameString>,
    player: Player,
    galactic_objects: HashMap<GameId, GalacticObject>,
    countries: HashMap<GameId, Country>,
    bypasses: HashMap<GameId, Bypass>,
    natural_wormholes: HashMap<GameId, Wormhole>,
    nebulae: Vec<Nebula>,
    /// Which galactic object each bypass is located in
    galactic_object_by_bypass_id: HashMap<GameId, GameId>,
}

impl GalaxyState {
    /// Maps the raw tree into the typed state. The tree is not modified.
    ///
    /// ## Errors
    ///
    /// Fails if one of the [REQUIRED_SECTIONS] is missing from the root, or if
    /// an entity lacks a part it can't do without.
    pub fn from_raw(tree: &RawTree) -> Result<GalaxyState, MappingError> {
        let root = tree.root();
        for name in REQUIRED_SECTIONS {
            if root.child(name).is_none() {
                return Err(MappingError::MissingSection(name));
            }
        }
        let mut player_section = root
            .child("player")
            .ok_or(MappingError::MissingSection("player"))?;
        if player_section.is_synthetic() {
            if let Some(block) = player_section.first_section() {
                player_section = block;
            }
        }
        let mut galaxy = GalaxyState::new(root, Player::from_raw_section(player_section)?);
        for section in root.sections() {
            process_section(section, &mut galaxy)?;
        }
        debug!(
            "mapped {} galactic objects, {} countries, {} bypasses, {} natural wormholes",
            galaxy.galactic_objects.len(),
            galaxy.countries.len(),
            galaxy.bypasses.len(),
            galaxy.natural_wormholes.len()
        );
        Ok(galaxy)
    }

    /// Creates an empty state, with the header read off the root.
    fn new(root: SectionRef<'_>, player: Player) -> Self {
        let header = |name: &str| GameString::from(root.attribute_value(name).unwrap_or_default());
        GalaxyState {
            version: header("version"),
            version_control_revision: header("version_control_revision"),
            name: header("name"),
            date: root.attribute_value("date").and_then(parse_date),
            required_dlcs: Vec::new(),
            player,
            galactic_objects: HashMap::default(),
            countries: HashMap::default(),
            bypasses: HashMap::default(),
            natural_wormholes: HashMap::default(),
            nebulae: Vec::new(),
            galactic_object_by_bypass_id: HashMap::default(),
        }
    }

    /// Adds a galactic object, and indexes the bypasses located in it.
    pub(super) fn add_galactic_object(&mut self, object: GalacticObject) {
        for bypass in object.bypasses() {
            self.galactic_object_by_bypass_id.insert(*bypass, object.id());
        }
        self.galactic_objects.insert(object.id(), object);
    }

    pub(super) fn add_country(&mut self, country: Country) {
        self.countries.insert(country.id(), country);
    }

    pub(super) fn add_bypass(&mut self, bypass: Bypass) {
        self.bypasses.insert(bypass.id(), bypass);
    }

    pub(super) fn add_wormhole(&mut self, wormhole: Wormhole) {
        self.natural_wormholes.insert(wormhole.id(), wormhole);
    }

    pub(super) fn add_nebula(&mut self, nebula: Nebula) {
        self.nebulae.push(nebula);
    }

    /// Adds the dlcs listed in a single value. The value is either one quoted
    /// name, or several of them when the list was written on one line.
    pub(super) fn add_required_dlcs(&mut self, value: &str) {
        if value.contains('"') {
            // every other piece is between quotes
            for name in value.split('"').skip(1).step_by(2) {
                self.required_dlcs.push(GameString::from(name));
            }
        } else if !value.trim().is_empty() {
            self.required_dlcs
                .push(GameString::from(unquote(value.trim())));
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn version_control_revision(&self) -> &str {
        &self.version_control_revision
    }

    /// The name of the save.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The in game date of the save, if it was present and valid.
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn required_dlcs(&self) -> &[GameString] {
        &self.required_dlcs
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn galactic_object(&self, id: GameId) -> Option<&GalacticObject> {
        self.galactic_objects.get(&id)
    }

    pub fn galactic_objects(&self) -> hash_map::Values<'_, GameId, GalacticObject> {
        self.galactic_objects.values()
    }

    pub fn country(&self, id: GameId) -> Option<&Country> {
        self.countries.get(&id)
    }

    pub fn countries(&self) -> hash_map::Values<'_, GameId, Country> {
        self.countries.values()
    }

    pub fn bypass(&self, id: GameId) -> Option<&Bypass> {
        self.bypasses.get(&id)
    }

    pub fn bypasses(&self) -> hash_map::Values<'_, GameId, Bypass> {
        self.bypasses.values()
    }

    pub fn wormhole(&self, id: GameId) -> Option<&Wormhole> {
        self.natural_wormholes.get(&id)
    }

    pub fn natural_wormholes(&self) -> hash_map::Values<'_, GameId, Wormhole> {
        self.natural_wormholes.values()
    }

    pub fn nebulae(&self) -> &[Nebula] {
        &self.nebulae
    }

    /// The id of the galactic object the bypass is located in.
    pub fn galactic_object_by_bypass_id(&self, bypass_id: GameId) -> Option<GameId> {
        self.galactic_object_by_bypass_id.get(&bypass_id).copied()
    }

    /// The galactic object the bypass is located in.
    pub fn system_of_bypass(&self, bypass_id: GameId) -> Option<&GalacticObject> {
        self.galactic_object_by_bypass_id(bypass_id)
            .and_then(|id| self.galactic_object(id))
    }

    /// The galactic object at the other end of the hyperlane. [None] means the
    /// hyperlane is dangling.
    pub fn hyperlane_target(&self, hyperlane: &Hyperlane) -> Option<&GalacticObject> {
        self.galactic_object(hyperlane.to())
    }

    /// Every hyperlane once, as `(from, hyperlane)` pairs. Hyperlanes are
    /// stored on both ends, so only the copy on the end with the lower id is
    /// returned, unless the other end is missing.
    pub fn hyperlane_edges(&self) -> impl Iterator<Item = (GameId, &Hyperlane)> {
        self.galactic_objects.values().flat_map(move |object| {
            object
                .hyperlanes()
                .iter()
                .filter(move |lane| {
                    object.id() < lane.to() || !self.galactic_objects.contains_key(&lane.to())
                })
                .map(move |lane| (object.id(), lane))
        })
    }

    /// The other end of a linked bypass, like a wormhole pair.
    pub fn linked_bypass(&self, bypass: &Bypass) -> Option<&Bypass> {
        bypass.linked_to().and_then(|id| self.bypass(id))
    }

    pub fn player_country(&self) -> Option<&Country> {
        self.country(self.player.country())
    }

    /// The starting system of the player's country.
    pub fn player_home_system(&self) -> Option<&GalacticObject> {
        self.player_country()
            .and_then(|country| country.starting_system())
            .and_then(|id| self.galactic_object(id))
    }

    /// The galactic object the wormhole physically sits in.
    pub fn wormhole_system(&self, wormhole: &Wormhole) -> Option<&GalacticObject> {
        self.galactic_object(wormhole.coordinate().origin())
    }
}
