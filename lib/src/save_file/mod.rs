/// Lower level save parsing functionality.
/// Meant to be output structure agnostic, and focused on parsing into the
/// [intermediate representation](parser::RawTree).
pub mod parser;

/// Output structures, like [structures::GalacticObject] and [structures::Bypass]
pub mod structures;

/// Module providing the mapped galaxy
mod galaxy_state;
pub use galaxy_state::{GalaxyState, REQUIRED_SECTIONS};

/// Lower level abstractions, [GalaxyState] population
mod process_section;

/// Parser I/O and facade
mod save_file;
pub use save_file::{SaveFile, SaveFileError};
