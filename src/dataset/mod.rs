use std::{
    fmt::Display,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use zip::{ZipArchive, read::ZipFile};

mod config;
mod month;
pub mod records;
pub use config::*;
pub use month::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Couldn't open {0}")]
    SourceNotFound(String),
    #[error("Malformed {dataset} record on line {line}: {reason}")]
    MalformedRecord {
        dataset: Dataset,
        line: u64,
        reason: String,
    },
    #[error("Unknown month name {month:?} on line {line}")]
    UnresolvedMonth { line: u64, month: String },
    #[error("Invalid date {year}-{month:02}-{day:02} on line {line}")]
    InvalidDate {
        line: u64,
        year: i32,
        month: u32,
        day: u32,
    },
}

/// The three text datasets the tracker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Routes,
    Shapes,
    Disruptions,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Routes, Dataset::Shapes, Dataset::Disruptions];
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::Routes => "route",
            Dataset::Shapes => "shape",
            Dataset::Disruptions => "disruption",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub enum StorageType {
    Directory,
    Zip(PathBuf),
}

/// Locates and reads the raw dataset text, either from loose files in a
/// directory or from entries of a zip bundle.
#[derive(Debug, Clone)]
pub struct DatasetReader {
    config: Config,
    storage: StorageType,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DatasetReader {
    pub fn new(config: self::Config) -> Self {
        let storage = StorageType::Directory;
        Self { config, storage }
    }

    pub fn from_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.data_dir = path.as_ref().to_path_buf();
        self.storage = StorageType::Directory;
        self
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.as_ref().to_path_buf());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Human readable location of a dataset, for log and menu messages.
    pub fn describe(&self, dataset: Dataset) -> String {
        match &self.storage {
            StorageType::Directory => self.config.default_path(dataset).display().to_string(),
            StorageType::Zip(path) => {
                format!("{}:{}", path.display(), self.config.file_name(dataset))
            }
        }
    }

    pub fn read(&self, dataset: Dataset) -> Result<String, self::Error> {
        match &self.storage {
            StorageType::Directory => read_file(self.config.default_path(dataset)),
            StorageType::Zip(path) => read_from_zip(path, self.config.file_name(dataset)),
        }
    }

    pub fn read_routes(&self) -> Result<String, self::Error> {
        self.read(Dataset::Routes)
    }

    pub fn read_shapes(&self) -> Result<String, self::Error> {
        self.read(Dataset::Shapes)
    }

    pub fn read_disruptions(&self) -> Result<String, self::Error> {
        self.read(Dataset::Disruptions)
    }
}

/// Reads a whole dataset file. A file that cannot be opened is reported as
/// [`Error::SourceNotFound`]; failures after opening surface as IO errors.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String, self::Error> {
    let path = path.as_ref();
    let mut file =
        File::open(path).map_err(|_| self::Error::SourceNotFound(path.display().to_string()))?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

fn read_from_zip(zip_path: &Path, file_name: &str) -> Result<String, self::Error> {
    let zip_file = File::open(zip_path)
        .map_err(|_| self::Error::SourceNotFound(zip_path.display().to_string()))?;
    let mut archive = ZipArchive::new(zip_file)?;
    let mut file = get_file(&mut archive, zip_path, file_name)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    zip_path: &Path,
    name: &str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive.index_for_name(name).ok_or_else(|| {
        self::Error::SourceNotFound(format!("{}:{name}", zip_path.display()))
    })?;
    let file = archive.by_index(index)?;
    Ok(file)
}
