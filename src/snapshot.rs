//! Saves and restores the three indices as a single unit.
//!
//! A snapshot is one JSON document:
//!
//! ```text
//! { "format": "ets-tracker-snapshot", "version": 1,
//!   "sections": [ {"kind": "routes", ...}, {"kind": "shapes", ...}, {"kind": "disruptions", ...} ] }
//! ```
//!
//! Sections must appear in exactly that order. A restore that cannot decode
//! all three fails as a whole and returns no index.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::Path,
    time::Instant,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::repository::{DisruptionIndex, RouteIndex, ShapeIndex};

pub const FORMAT: &str = "ets-tracker-snapshot";
pub const VERSION: u32 = 1;

const SECTION_KINDS: [&str; 3] = ["routes", "shapes", "disruptions"];

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Couldn't open {0}")]
    SourceNotFound(String),
    #[error("Not an ets-tracker snapshot (format {0:?})")]
    UnknownFormat(String),
    #[error("Snapshot version {0} is not supported (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("Snapshot is incomplete: expected {expected} section at position {position}, found {found}")]
    Incomplete {
        position: usize,
        expected: &'static str,
        found: String,
    },
}

/// The three indices restored together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub routes: RouteIndex,
    pub shapes: ShapeIndex,
    pub disruptions: DisruptionIndex,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    format: &'a str,
    version: u32,
    sections: [SectionRef<'a>; 3],
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SectionRef<'a> {
    Routes { routes: &'a RouteIndex },
    Shapes { shapes: &'a ShapeIndex },
    Disruptions { disruptions: &'a DisruptionIndex },
}

#[derive(Deserialize)]
struct RawDocument {
    format: String,
    version: u32,
    sections: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Section {
    Routes { routes: RouteIndex },
    Shapes { shapes: ShapeIndex },
    Disruptions { disruptions: DisruptionIndex },
}

impl Snapshot {
    pub fn new(routes: RouteIndex, shapes: ShapeIndex, disruptions: DisruptionIndex) -> Self {
        Self {
            routes,
            shapes,
            disruptions,
        }
    }

    pub fn encode(
        routes: &RouteIndex,
        shapes: &ShapeIndex,
        disruptions: &DisruptionIndex,
    ) -> Result<Vec<u8>, self::Error> {
        let document = DocumentRef {
            format: FORMAT,
            version: VERSION,
            sections: [
                SectionRef::Routes { routes },
                SectionRef::Shapes { shapes },
                SectionRef::Disruptions { disruptions },
            ],
        };
        Ok(serde_json::to_vec(&document)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, self::Error> {
        let document: RawDocument = serde_json::from_slice(bytes)?;
        if document.format != FORMAT {
            return Err(self::Error::UnknownFormat(document.format));
        }
        if document.version != VERSION {
            return Err(self::Error::UnsupportedVersion(document.version));
        }

        let mut routes = None;
        let mut shapes = None;
        let mut disruptions = None;
        let mut sections = document.sections.into_iter();
        for (position, expected) in SECTION_KINDS.into_iter().enumerate() {
            let value = sections.next().ok_or(self::Error::Incomplete {
                position,
                expected,
                found: "end of snapshot".into(),
            })?;
            let kind = value.get("kind").and_then(|kind| kind.as_str());
            if kind != Some(expected) {
                return Err(self::Error::Incomplete {
                    position,
                    expected,
                    found: kind.unwrap_or("untagged section").into(),
                });
            }
            match serde_json::from_value::<Section>(value)? {
                Section::Routes { routes: value } => routes = Some(value),
                Section::Shapes { shapes: value } => shapes = Some(value),
                Section::Disruptions { disruptions: value } => disruptions = Some(value),
            }
        }
        if let Some(extra) = sections.next() {
            let found = extra
                .get("kind")
                .and_then(|kind| kind.as_str())
                .unwrap_or("untagged section")
                .to_string();
            return Err(self::Error::Incomplete {
                position: SECTION_KINDS.len(),
                expected: "end of snapshot",
                found,
            });
        }

        match (routes, shapes, disruptions) {
            (Some(routes), Some(shapes), Some(disruptions)) => {
                Ok(Self::new(routes, shapes, disruptions))
            }
            _ => Err(self::Error::Incomplete {
                position: 0,
                expected: "routes",
                found: "a partial snapshot".into(),
            }),
        }
    }
}

/// Writes all three indices to `path`. The previous file at `path` stays
/// intact until the new snapshot is fully on disk.
pub fn save<P: AsRef<Path>>(
    path: P,
    routes: &RouteIndex,
    shapes: &ShapeIndex,
    disruptions: &DisruptionIndex,
) -> Result<(), self::Error> {
    let now = Instant::now();
    let bytes = Snapshot::encode(routes, shapes, disruptions)?;
    atomic_write(path.as_ref(), &bytes)?;
    debug!(
        "Saving snapshot to {} ({} bytes) took {:?}",
        path.as_ref().display(),
        bytes.len(),
        now.elapsed()
    );
    Ok(())
}

pub fn restore<P: AsRef<Path>>(path: P) -> Result<Snapshot, self::Error> {
    let path = path.as_ref();
    let now = Instant::now();
    let bytes =
        fs::read(path).map_err(|_| self::Error::SourceNotFound(path.display().to_string()))?;
    let snapshot = Snapshot::decode(&bytes)?;
    debug!(
        "Restoring snapshot from {} took {:?}",
        path.display(),
        now.elapsed()
    );
    Ok(snapshot)
}

/// Write to `{path}.tmp`, sync, then rename over `path`.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let written = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    });
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

#[test]
fn decode_rejects_foreign_format() {
    let bytes = br#"{"format":"other","version":1,"sections":[]}"#;
    assert!(matches!(
        Snapshot::decode(bytes),
        Err(Error::UnknownFormat(format)) if format == "other"
    ));
}

#[test]
fn decode_rejects_future_version() {
    let bytes = br#"{"format":"ets-tracker-snapshot","version":2,"sections":[]}"#;
    assert!(matches!(
        Snapshot::decode(bytes),
        Err(Error::UnsupportedVersion(2))
    ));
}

#[test]
fn decode_rejects_missing_sections() {
    let bytes = br#"{"format":"ets-tracker-snapshot","version":1,"sections":[{"kind":"routes","routes":[]}]}"#;
    assert!(matches!(
        Snapshot::decode(bytes),
        Err(Error::Incomplete {
            position: 1,
            expected: "shapes",
            ..
        })
    ));
}

#[test]
fn decode_rejects_swapped_sections() {
    let bytes = br#"{"format":"ets-tracker-snapshot","version":1,"sections":[
        {"kind":"shapes","shapes":[]},
        {"kind":"routes","routes":[]},
        {"kind":"disruptions","disruptions":[]}]}"#;
    assert!(matches!(
        Snapshot::decode(bytes),
        Err(Error::Incomplete { position: 0, expected: "routes", found }) if found == "shapes"
    ));
}

#[test]
fn decode_rejects_extra_section() {
    let bytes = br#"{"format":"ets-tracker-snapshot","version":1,"sections":[
        {"kind":"routes","routes":[]},
        {"kind":"shapes","shapes":[]},
        {"kind":"disruptions","disruptions":[]},
        {"kind":"routes","routes":[]}]}"#;
    assert!(matches!(
        Snapshot::decode(bytes),
        Err(Error::Incomplete {
            position: 3,
            expected: "end of snapshot",
            found,
        }) if found == "routes"
    ));
}

#[test]
fn failed_save_leaves_no_temp_file() {
    let dir = std::env::temp_dir().join("ets_tracker_failed_save");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("taken")).unwrap();
    // renaming a file over a directory fails
    assert!(atomic_write(&dir.join("taken"), b"{}").is_err());
    assert!(!dir.join("taken.tmp").exists());
    assert!(dir.join("taken").is_dir());
}

#[test]
fn empty_indices_round_trip() {
    let bytes = Snapshot::encode(
        &RouteIndex::new(),
        &ShapeIndex::new(),
        &DisruptionIndex::new(),
    )
    .unwrap();
    assert_eq!(Snapshot::decode(&bytes).unwrap(), Snapshot::default());
}
