use derive_more::{Display, From};
use std::{
    error,
    fs::File,
    io::{self, Cursor, Read},
    path::Path,
    str::Lines,
    string::FromUtf8Error,
};
use zip::{read::ZipArchive, result::ZipError};

use super::parser::{ParsingError, RawTree};

/// The header of an archive within a save file.
const ARCHIVE_HEADER: &[u8; 4] = b"PK\x03\x04";

/// The archive member holding the galaxy.
const GAMESTATE: &str = "gamestate";

/// An error that can occur when opening a save file.
/// Generally things that are the fault of the user, however unintentional those may be
#[derive(Debug, From, Display)]
pub enum SaveFileError {
    /// Something went wrong with stdlib IO.
    IoError(io::Error),
    /// We found a problem
    #[display("{}", _0)]
    ParseError(&'static str),
    /// Something went wrong with decompressing the save file.
    DecompressionError(ZipError),
    /// Decoding bytes failed
    DecodingError(FromUtf8Error),
}

impl error::Error for SaveFileError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::DecompressionError(err) => Some(err),
            Self::DecodingError(err) => Some(err),
            Self::ParseError(_) => None,
        }
    }
}

/// A struct that represents a Stellaris save file.
/// It is just a wrapper around the text of the galaxy.
/// This is so that we can abstract away the compression and encoding, and
/// just hand out lines to the [parser](super::parser).
pub struct SaveFile {
    contents: String,
}

impl SaveFile {
    /// Open a save file.
    /// Internally uses [File::open] to open the file and then [SaveFile::read] to read the contents.
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<SaveFile, SaveFileError> {
        let mut file = File::open(filename)?;
        let metadata = file.metadata()?;
        SaveFile::read(&mut file, Some(metadata.len() as usize))
    }

    /// Create a new SaveFile instance.
    ///
    /// # Compression
    ///
    /// A `.sav` file is a zip archive, with the galaxy in the `gamestate`
    /// member. The function detects whether the contents are compressed, so a
    /// bare `gamestate` file can be read too.
    pub fn read<F: Read>(
        file: &mut F,
        contents_size: Option<usize>,
    ) -> Result<SaveFile, SaveFileError> {
        let mut contents = if let Some(size) = contents_size {
            Vec::with_capacity(size)
        } else {
            Vec::new()
        };
        let read_size = file.read_to_end(&mut contents)?;
        if read_size < ARCHIVE_HEADER.len() {
            return Err(SaveFileError::ParseError("Save file is too small"));
        }
        if contents.starts_with(ARCHIVE_HEADER) {
            let mut archive = ZipArchive::new(Cursor::new(contents))?;
            let mut gamestate = match archive.by_name(GAMESTATE) {
                Ok(gamestate) => gamestate,
                Err(ZipError::FileNotFound) => {
                    return Err(SaveFileError::ParseError("Save file has no gamestate"))
                }
                Err(err) => return Err(err.into()),
            };
            if gamestate.is_dir() {
                return Err(SaveFileError::ParseError("Save file is a directory"));
            }
            let gamestate_size = gamestate.size() as usize;
            let mut contents = Vec::with_capacity(gamestate_size);
            if gamestate.read_to_end(&mut contents)? != gamestate_size {
                return Err(SaveFileError::ParseError("Failed to read the entire file"));
            }
            Ok(SaveFile {
                contents: String::from_utf8(contents)?,
            })
        } else {
            Ok(SaveFile {
                contents: String::from_utf8(contents)?,
            })
        }
    }

    /// The lines of the galaxy, in file order.
    pub fn lines(&self) -> Lines<'_> {
        self.contents.lines()
    }

    /// Builds the [RawTree] of the galaxy.
    pub fn parse_raw(&self) -> Result<RawTree, ParsingError> {
        RawTree::parse(self.lines())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Seek, SeekFrom, Write};

    use zip::write::{SimpleFileOptions, ZipWriter};

    use super::*;

    fn create_zipped_test_file(name: &str, contents: &'static str) -> Cursor<Vec<u8>> {
        let file = Vec::new();
        let cur = Cursor::new(file);
        let mut zip = ZipWriter::new(cur);
        let options = SimpleFileOptions::default();
        zip.start_file("meta", options).unwrap();
        zip.write_all(b"version=\"Circinus v3.4.5\"").unwrap();
        zip.start_file(name, options).unwrap();
        if zip.write(contents.as_bytes()).unwrap() != contents.len() {
            panic!("Failed to write the entire file");
        }
        let mut cur = zip.finish().unwrap();
        cur.seek(SeekFrom::Start(0)).unwrap();
        cur
    }

    #[test]
    fn test_open() {
        let mut file = Cursor::new(b"test=a");
        let save = SaveFile::read(&mut file, None).unwrap();
        assert_eq!(save.lines().collect::<Vec<_>>(), vec!["test=a"]);
    }

    #[test]
    fn test_compressed_open() {
        let mut file = create_zipped_test_file("gamestate", "a=1\nb={\nc=2\n}");
        let save = SaveFile::read(&mut file, None).unwrap();
        assert_eq!(save.lines().count(), 4);
        let tree = save.parse_raw().unwrap();
        assert_eq!(
            tree.root().child("b").unwrap().attribute_value("c"),
            Some("2")
        );
    }

    #[test]
    fn test_missing_gamestate() {
        let mut file = create_zipped_test_file("other", "a=1");
        assert!(matches!(
            SaveFile::read(&mut file, None),
            Err(SaveFileError::ParseError(_))
        ));
    }

    #[test]
    fn test_too_small() {
        let mut file = Cursor::new(b"a=");
        assert!(matches!(
            SaveFile::read(&mut file, None),
            Err(SaveFileError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = Cursor::new(b"name=\xff\xfe\xfd");
        assert!(matches!(
            SaveFile::read(&mut file, None),
            Err(SaveFileError::DecodingError(_))
        ));
    }

    #[test]
    fn test_open_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"player={\n{\ncountry=0\n}\n}\n").unwrap();
        let save = SaveFile::open(file.path()).unwrap();
        let tree = save.parse_raw().unwrap();
        assert!(tree.root().child("player").is_some());
    }
}
