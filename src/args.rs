use clap_derive::Parser;
use derive_more::Display;
use dialoguer::{Completion, Confirm, Input};

use std::{
    error, fs,
    path::{Path, PathBuf},
};

/// The extensions of Stellaris save files, compressed and not.
const SAVE_EXTENSIONS: [&str; 2] = ["sav", "gamestate"];

/// A [Completion] struct for save file names, that also acts as a list of save files in the current directory.
struct SaveFileNameCompletion {
    save_files: Vec<String>,
}

impl Default for SaveFileNameCompletion {
    fn default() -> Self {
        let mut res = Vec::new();
        if let Ok(entries) = fs::read_dir(".") {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if let Some(ext) = path.extension() {
                    if SAVE_EXTENSIONS.iter().any(|e| ext == *e) {
                        res.push(path.to_string_lossy().into_owned());
                    }
                }
            }
        }
        SaveFileNameCompletion { save_files: res }
    }
}

impl Completion for SaveFileNameCompletion {
    fn get(&self, input: &str) -> Option<String> {
        self.save_files.iter().find(|x| x.contains(input)).cloned()
    }
}

#[derive(Debug, Display)]
enum InvalidPath {
    #[display("invalid path (does not exist)")]
    InvalidPath,
    #[display("not a file")]
    NotAFile,
}

impl error::Error for InvalidPath {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// A function to validate the file path input.
fn validate_file_path(input: &String) -> Result<(), InvalidPath> {
    let p = Path::new(input);
    if !p.exists() {
        Err(InvalidPath::InvalidPath)
    } else if !p.is_file() {
        Err(InvalidPath::NotAFile)
    } else {
        Ok(())
    }
}

/// A function to parse the path argument.
fn parse_path_arg(input: &str) -> Result<PathBuf, &'static str> {
    let p = PathBuf::from(input);
    if p.exists() {
        Ok(p)
    } else {
        Err("Invalid path")
    }
}

/// The arguments to the program.
#[derive(Parser)]
pub struct Args {
    #[arg(value_parser = parse_path_arg)]
    /// The path to the save file, either a `.sav` archive or an extracted gamestate.
    pub filename: PathBuf,
    #[arg(long, default_value = None)]
    /// A path to a file to dump the galaxy to, as json.
    pub dump: Option<PathBuf>,
    #[arg(short, long, default_value_t = false)]
    /// A flag that tells the program to list the raw tree of the save.
    pub raw: bool,
    #[arg(short, long, default_value = None)]
    /// The top level section to list, instead of the whole raw tree.
    pub section: Option<String>,
    #[arg(short, long, default_value_t = 2)]
    /// How many levels of the raw tree to list.
    pub depth: usize,
    #[arg(short, long, default_value_t = false)]
    /// A flag that enables informational logging, like unknown star classes.
    pub verbose: bool,
    #[arg(short, long, default_value_t = false)]
    /// A flag that tells the program not to interact with the user.
    pub no_interaction: bool,
}

impl Args {
    /// Create the object based on user input.
    pub fn get_from_user() -> Result<Self, dialoguer::Error> {
        println!("Welcome to the Stellaris galaxy extractor!\nTab autocompletes the query and enter confirms the selection.");
        let completion = SaveFileNameCompletion::default();
        let filename = PathBuf::from(
            Input::<String>::new()
                .with_prompt("Enter the save file path")
                .validate_with(validate_file_path)
                .with_initial_text(completion.save_files.first().cloned().unwrap_or_default())
                .completion_with(&completion)
                .interact_text()?,
        );
        let raw = Confirm::new()
            .with_prompt("List the raw tree of the save?")
            .default(false)
            .interact()?;
        let depth = if raw {
            Input::<usize>::new()
                .with_prompt("Enter the listing depth")
                .default(2)
                .interact()?
        } else {
            2
        };
        Ok(Args {
            filename,
            dump: None,
            raw,
            section: None,
            depth,
            verbose: false,
            no_interaction: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::error;

    use tempfile::{tempdir, NamedTempFile};

    use super::*;

    #[test]
    fn test_validate_file_path() -> Result<(), Box<dyn error::Error>> {
        let file = NamedTempFile::with_suffix(".sav")?;
        let path = file.path().to_string_lossy().into_owned();
        assert!(validate_file_path(&path).is_ok());
        let dir = tempdir()?;
        let dir_path = dir.path().to_string_lossy().into_owned();
        assert!(matches!(
            validate_file_path(&dir_path),
            Err(InvalidPath::NotAFile)
        ));
        let missing = dir.path().join("missing.sav").to_string_lossy().into_owned();
        assert!(matches!(
            validate_file_path(&missing),
            Err(InvalidPath::InvalidPath)
        ));
        Ok(())
    }

    #[test]
    fn test_parse_path_arg() -> Result<(), Box<dyn error::Error>> {
        let file = NamedTempFile::new()?;
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(parse_path_arg(&path)?, file.path());
        let dir = tempdir()?;
        let missing = dir.path().join("gamestate");
        assert_eq!(
            parse_path_arg(&missing.to_string_lossy()),
            Err("Invalid path")
        );
        Ok(())
    }
}
