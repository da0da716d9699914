//! Input sources the parsers read from.
//!
//! Only files are supported today; the trait keeps the collection code independent
//! of where a stream comes from.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Something that can be identified and opened for reading.
pub trait InputSource {
    /// Identifier of the source (e.g. the file path).
    fn source(&self) -> String;

    /// Open a fresh buffered stream over the source.
    fn open(&self) -> Result<Box<dyn BufRead>>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl InputSource for InputFile {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}
