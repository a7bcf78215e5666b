/// Core save file parser. Wrapper over the lower level [save_file::parser]
/// module and [save_file::structures].
///
/// ## Getting Started
///
/// The facade for the entire module is the [save_file::SaveFile] struct, which
/// hands out the lines of the galaxy. Parsing happens in two stages: first the
/// lines are built into a [save_file::parser::RawTree], a generic tree of
/// sections and attributes, and then the tree is mapped into a typed
/// [save_file::GalaxyState].
///
/// ## Browsing the raw tree
///
/// The raw tree keeps everything in the save, including the sections the
/// galaxy has no use for. It stays usable even if the mapping fails, so it
/// can be browsed with [display::TreeView] to find out what went wrong.
///
/// ## Example
///
/// ```rust
/// use stellaris_galaxy_extractor_lib::save_file::{GalaxyState, SaveFile};
///
/// if let Ok(save_file) = SaveFile::open("/path/to/file/") {
///     let tree = save_file.parse_raw().unwrap();
///     let galaxy = GalaxyState::from_raw(&tree).unwrap();
///     for object in galaxy.galactic_objects() {
///         // Render the system here
///     }
/// }
/// ```
pub mod save_file;

/// A module for displaying the raw tree.
#[cfg(feature = "display")]
pub mod display;
