use std::path::{Path, PathBuf};

use super::Dataset;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub routes_file_name: String,
    pub shapes_file_name: String,
    pub disruptions_file_name: String,
    pub snapshot_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            routes_file_name: "trips.txt".into(),
            shapes_file_name: "shapes.txt".into(),
            disruptions_file_name: "traffic_disruptions.txt".into(),
            snapshot_file_name: "etsdata.json".into(),
        }
    }
}

impl Config {
    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn file_name(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Routes => &self.routes_file_name,
            Dataset::Shapes => &self.shapes_file_name,
            Dataset::Disruptions => &self.disruptions_file_name,
        }
    }

    /// Path a dataset is loaded from when the caller gives no filename.
    pub fn default_path(&self, dataset: Dataset) -> PathBuf {
        self.data_dir.join(self.file_name(dataset))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file_name)
    }

    /// Picks the explicit path when one was given and is not blank,
    /// otherwise falls back to `fallback`.
    pub fn resolve(explicit: Option<&Path>, fallback: PathBuf) -> PathBuf {
        match explicit {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => fallback,
        }
    }
}

#[test]
fn default_paths_live_in_data_dir() {
    let config = Config::default();
    assert_eq!(
        config.default_path(Dataset::Routes),
        Path::new("data").join("trips.txt")
    );
    assert_eq!(
        config.default_path(Dataset::Disruptions),
        Path::new("data").join("traffic_disruptions.txt")
    );
}

#[test]
fn blank_explicit_path_falls_back() {
    let fallback = PathBuf::from("data/shapes.txt");
    assert_eq!(
        Config::resolve(Some(Path::new("")), fallback.clone()),
        fallback
    );
    assert_eq!(
        Config::resolve(Some(Path::new("mine.txt")), fallback),
        PathBuf::from("mine.txt")
    );
}
