use tracing::debug;

use super::{
    galaxy_state::GalaxyState,
    parser::SectionRef,
    structures::{
        entries, Bypass, Country, FromRawSection, GalacticObject, MappingError, Nebula, Wormhole,
    },
};

/// Conditionally maps a top level section based on its name, and uses the
/// contained data to populate the [GalaxyState].
/// Sections the galaxy has no use for are skipped, and so is `player`, which
/// is read before anything else.
pub(super) fn process_section(
    section: SectionRef<'_>,
    galaxy: &mut GalaxyState,
) -> Result<(), MappingError> {
    match section.name() {
        Some("galactic_object") => {
            for entry in entries(section) {
                galaxy.add_galactic_object(GalacticObject::from_raw_section(entry)?);
            }
        }
        Some("country") => {
            for entry in entries(section) {
                galaxy.add_country(Country::from_raw_section(entry)?);
            }
        }
        Some("bypasses") => {
            for entry in entries(section) {
                galaxy.add_bypass(Bypass::from_raw_section(entry)?);
            }
        }
        Some("natural_wormholes") => {
            for entry in entries(section) {
                galaxy.add_wormhole(Wormhole::from_raw_section(entry)?);
            }
        }
        // unlike the lists above, each nebula is a top level section of its own
        Some("nebula") => {
            if section.is_synthetic() {
                for block in section.sections() {
                    galaxy.add_nebula(Nebula::from_raw_section(block)?);
                }
            } else {
                galaxy.add_nebula(Nebula::from_raw_section(section)?);
            }
        }
        Some("required_dlcs") => {
            for value in section.values() {
                galaxy.add_required_dlcs(value);
            }
        }
        _ => {
            debug!("skipping section {}", section.path());
        }
    }
    Ok(())
}
