use clap::Parser;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    env, error, fs,
    io::{stdin, stdout, IsTerminal},
    time::Duration,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

use stellaris_galaxy_extractor_lib::{
    display::TreeView,
    save_file::{GalaxyState, SaveFile},
};

/// A submodule that handles the command line arguments and the interactive
/// prompt.
mod args;
use args::Args;

/// Sets up logging. `RUST_LOG` takes precedence, unless verbose output was
/// requested.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints an overview of the galaxy.
fn print_summary(galaxy: &GalaxyState) {
    print!("{} ({})", galaxy.name(), galaxy.version());
    if let Some(date) = galaxy.date() {
        use jomini::common::PdsDate;
        print!(", {}", date.iso_8601());
    }
    println!();
    let player = galaxy.player();
    match galaxy.player_country() {
        Some(country) => println!(
            "Player {} plays as {}",
            player.name(),
            country.name().as_str()
        ),
        None => println!("Player {} plays as unknown country {}", player.name(), player.country()),
    }
    if let Some(home) = galaxy.player_home_system() {
        println!("Home system: {}", home.name().as_str());
    }
    let unknown_classes = galaxy
        .galactic_objects()
        .filter(|o| !o.star_class().is_recognized())
        .count();
    println!(
        "{} galactic objects ({} with unknown star classes), {} hyperlanes",
        galaxy.galactic_objects().count(),
        unknown_classes,
        galaxy.hyperlane_edges().count()
    );
    println!(
        "{} countries, {} bypasses, {} natural wormholes, {} nebulae",
        galaxy.countries().count(),
        galaxy.bypasses().count(),
        galaxy.natural_wormholes().count(),
        galaxy.nebulae().len()
    );
    if !galaxy.required_dlcs().is_empty() {
        println!("Required DLCs: {}", galaxy.required_dlcs().join(", "));
    }
}

/// Main function. This is the entry point of the program.
///
/// # Process
///
/// 1. Reads the arguments, or prompts the user for them
/// 2. Opens the [SaveFile], decompressing it if needed
/// 3. Builds the raw tree, and lists it if requested
/// 4. Maps the tree into a [GalaxyState] and prints an overview
/// 5. Dumps the galaxy to json if requested
fn main() -> Result<(), Box<dyn error::Error>> {
    if cfg!(debug_assertions) {
        env::set_var("RUST_BACKTRACE", "1");
    }
    let args = if env::args().len() < 2 && stdin().is_terminal() {
        Args::get_from_user()?
    } else {
        Args::parse()
    };
    init_logging(args.verbose);
    let spinner_style =
        ProgressStyle::default_spinner().template("[{elapsed_precise}] {spinner} {msg}")?;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style.clone());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Reading the save file");
    let save = SaveFile::open(&args.filename)?;
    spinner.set_message("Building the raw tree");
    let tree = save.parse_raw()?;
    spinner.finish_with_message(format!("Raw tree built, {} sections", tree.len()));
    if args.raw || args.section.is_some() {
        let root = match &args.section {
            Some(name) => tree
                .root()
                .child(name)
                .ok_or_else(|| format!("no top level section named {}", name))?,
            None => tree.root(),
        };
        print!("{}", TreeView::new(root).with_depth(args.depth));
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Mapping the galaxy");
    let galaxy = match GalaxyState::from_raw(&tree) {
        Ok(galaxy) => galaxy,
        Err(err) => {
            spinner.abandon_with_message("Mapping failed");
            error!("the galaxy could not be read, inspect the save with --raw");
            return Err(err.into());
        }
    };
    spinner.finish_with_message("Galaxy mapped");
    print_summary(&galaxy);
    if let Some(dump) = &args.dump {
        let json = serde_json::to_string_pretty(&galaxy)?;
        fs::write(dump, json)?;
    }
    if stdin().is_terminal() && stdout().is_terminal() && !args.no_interaction {
        Input::<String>::new()
            .with_prompt("Press enter to exit")
            .allow_empty(true)
            .interact()?;
    }
    Ok(())
}
