use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::{
    dataset::{self, Config, Dataset, DatasetReader, MonthTable},
    query::{self, LongestShape},
    repository::{DisruptionIndex, RouteIndex, ShapeIndex},
    shared::{Coordinate, Distance},
    snapshot,
    view::MapView,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] dataset::Error),
    #[error(transparent)]
    Snapshot(#[from] snapshot::Error),
    #[error("{0} data hasn't been loaded yet")]
    NotLoaded(Dataset),
}

/// Everything a front end can ask of a session. `None` paths fall back to
/// the configured default locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadRoutes(Option<PathBuf>),
    LoadShapes(Option<PathBuf>),
    LoadDisruptions(Option<PathBuf>),
    ListShapesForRoute(String),
    ListCoordinatesForShape(String),
    LongestShapeForRoute(String),
    SaveSnapshot(Option<PathBuf>),
    RestoreSnapshot(Option<PathBuf>),
    InteractiveView,
    Quit,
}

impl Command {
    /// Question the text menu asks before building the command for `key`,
    /// if that command takes an argument.
    pub fn prompt(key: &str) -> Option<&'static str> {
        match key {
            "1" | "2" | "3" | "7" | "8" => Some("Enter a filename: "),
            "4" | "6" => Some("Enter route ID: "),
            "5" => Some("Enter shape ID: "),
            _ => None,
        }
    }

    /// Datasets the command behind `key` needs before it can run, so a front
    /// end can refuse it without asking for an argument first.
    pub fn requirements(key: &str) -> &'static [Dataset] {
        match key.trim() {
            "4" => &[Dataset::Routes],
            "5" => &[Dataset::Shapes],
            "6" => &[Dataset::Routes, Dataset::Shapes],
            "7" | "9" => &Dataset::ALL,
            _ => &[],
        }
    }

    /// Builds the command for a menu key. Unknown keys yield `None`.
    pub fn from_menu(key: &str, argument: &str) -> Option<Self> {
        let argument = argument.trim();
        let path = || (!argument.is_empty()).then(|| PathBuf::from(argument));
        let command = match key.trim() {
            "1" => Command::LoadRoutes(path()),
            "2" => Command::LoadShapes(path()),
            "3" => Command::LoadDisruptions(path()),
            "4" => Command::ListShapesForRoute(argument.to_string()),
            "5" => Command::ListCoordinatesForShape(argument.to_string()),
            "6" => Command::LongestShapeForRoute(argument.to_string()),
            "7" => Command::SaveSnapshot(path()),
            "8" => Command::RestoreSnapshot(path()),
            "9" => Command::InteractiveView,
            "0" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Loaded {
        dataset: Dataset,
        source: String,
        records: usize,
    },
    ShapeIds {
        route_id: String,
        stop_names: Vec<Arc<str>>,
        shape_ids: Vec<Arc<str>>,
    },
    Coordinates {
        shape_id: String,
        coordinates: Vec<Coordinate>,
        length: Distance,
    },
    LongestShape {
        route_id: String,
        shape: LongestShape,
    },
    Saved(PathBuf),
    Restored(PathBuf),
    /// All data needed by the map view is present; see [`Session::map_view`].
    ViewReady,
    /// The queried id does not exist in a loaded index.
    NotFound,
    Quit,
}

/// Loaded indices for one user session. Each index is either absent or fully
/// built; a failed load never replaces what was there before.
#[derive(Debug, Default)]
pub struct Session {
    reader: DatasetReader,
    months: MonthTable,
    routes: Option<RouteIndex>,
    shapes: Option<ShapeIndex>,
    disruptions: Option<DisruptionIndex>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            reader: DatasetReader::new(config),
            ..Default::default()
        }
    }

    pub fn with_reader(mut self, reader: DatasetReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_months(mut self, months: MonthTable) -> Self {
        self.months = months;
        self
    }

    pub fn config(&self) -> &Config {
        self.reader.config()
    }

    pub fn routes(&self) -> Result<&RouteIndex, Error> {
        self.routes.as_ref().ok_or(Error::NotLoaded(Dataset::Routes))
    }

    pub fn shapes(&self) -> Result<&ShapeIndex, Error> {
        self.shapes.as_ref().ok_or(Error::NotLoaded(Dataset::Shapes))
    }

    pub fn disruptions(&self) -> Result<&DisruptionIndex, Error> {
        self.disruptions
            .as_ref()
            .ok_or(Error::NotLoaded(Dataset::Disruptions))
    }

    /// Fails with the first of `datasets` that isn't loaded.
    pub fn require(&self, datasets: &[Dataset]) -> Result<(), Error> {
        match datasets.iter().find(|dataset| !self.is_loaded(**dataset)) {
            Some(dataset) => Err(Error::NotLoaded(*dataset)),
            None => Ok(()),
        }
    }

    pub fn is_loaded(&self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Routes => self.routes.is_some(),
            Dataset::Shapes => self.shapes.is_some(),
            Dataset::Disruptions => self.disruptions.is_some(),
        }
    }

    /// Map view over the loaded data, showing disruptions active on `today`.
    pub fn map_view(&self, today: NaiveDate) -> Result<MapView<'_>, Error> {
        Ok(MapView::new(
            self.routes()?,
            self.shapes()?,
            self.disruptions()?,
            today,
        ))
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, Error> {
        match command {
            Command::LoadRoutes(path) => {
                let (source, text) = self.read(Dataset::Routes, path.as_deref())?;
                let index = RouteIndex::parse(&text)?;
                let records = index.len();
                self.routes = Some(index);
                Ok(loaded(Dataset::Routes, source, records))
            }
            Command::LoadShapes(path) => {
                let (source, text) = self.read(Dataset::Shapes, path.as_deref())?;
                let index = ShapeIndex::parse(&text)?;
                let records = index.len();
                self.shapes = Some(index);
                Ok(loaded(Dataset::Shapes, source, records))
            }
            Command::LoadDisruptions(path) => {
                let (source, text) = self.read(Dataset::Disruptions, path.as_deref())?;
                let index = DisruptionIndex::parse(&text, &self.months)?;
                let records = index.len();
                self.disruptions = Some(index);
                Ok(loaded(Dataset::Disruptions, source, records))
            }
            Command::ListShapesForRoute(route_id) => {
                let routes = self.routes()?;
                let route_id = route_id.trim();
                let Some(route) = routes.route_by_id(route_id) else {
                    return Ok(Reply::NotFound);
                };
                Ok(Reply::ShapeIds {
                    route_id: route_id.to_string(),
                    stop_names: route.stop_names.to_vec(),
                    shape_ids: route.shape_ids.to_vec(),
                })
            }
            Command::ListCoordinatesForShape(shape_id) => {
                let shapes = self.shapes()?;
                let shape_id = shape_id.trim();
                let Some(shape) = shapes.shape_by_id(shape_id) else {
                    return Ok(Reply::NotFound);
                };
                Ok(Reply::Coordinates {
                    shape_id: shape_id.to_string(),
                    coordinates: shape.coordinates.to_vec(),
                    length: shape.length(),
                })
            }
            Command::LongestShapeForRoute(route_id) => {
                let routes = self.routes()?;
                let shapes = self.shapes()?;
                let route_id = route_id.trim();
                match query::longest_shape(route_id, routes, shapes) {
                    Some(shape) => Ok(Reply::LongestShape {
                        route_id: route_id.to_string(),
                        shape,
                    }),
                    None => Ok(Reply::NotFound),
                }
            }
            Command::SaveSnapshot(path) => {
                let path = Config::resolve(path.as_deref(), self.config().snapshot_path());
                snapshot::save(&path, self.routes()?, self.shapes()?, self.disruptions()?)?;
                info!("Data structures successfully written to {}", path.display());
                Ok(Reply::Saved(path))
            }
            Command::RestoreSnapshot(path) => {
                let path = Config::resolve(path.as_deref(), self.config().snapshot_path());
                let restored = snapshot::restore(&path)?;
                self.routes = Some(restored.routes);
                self.shapes = Some(restored.shapes);
                self.disruptions = Some(restored.disruptions);
                info!("Data structures successfully loaded from {}", path.display());
                Ok(Reply::Restored(path))
            }
            Command::InteractiveView => {
                self.require(&Dataset::ALL)?;
                Ok(Reply::ViewReady)
            }
            Command::Quit => Ok(Reply::Quit),
        }
    }

    fn read(&self, dataset: Dataset, path: Option<&Path>) -> Result<(String, String), Error> {
        let read = match path {
            Some(path) if !path.as_os_str().is_empty() => {
                dataset::read_file(path).map(|text| (path.display().to_string(), text))
            }
            _ => self
                .reader
                .read(dataset)
                .map(|text| (self.reader.describe(dataset), text)),
        };
        Ok(read?)
    }
}

fn loaded(dataset: Dataset, source: String, records: usize) -> Reply {
    info!("Data from {source} loaded ({records} {dataset} entries)");
    Reply::Loaded {
        dataset,
        source,
        records,
    }
}

#[test]
fn menu_keys_map_to_commands() {
    assert_eq!(
        Command::from_menu("1", ""),
        Some(Command::LoadRoutes(None))
    );
    assert_eq!(
        Command::from_menu("2", " shapes.txt "),
        Some(Command::LoadShapes(Some(PathBuf::from("shapes.txt"))))
    );
    assert_eq!(
        Command::from_menu("4", " 8 "),
        Some(Command::ListShapesForRoute("8".into()))
    );
    assert_eq!(Command::from_menu("9", ""), Some(Command::InteractiveView));
    assert_eq!(Command::from_menu("0", ""), Some(Command::Quit));
    assert_eq!(Command::from_menu("42", ""), None);
}

#[test]
fn requirements_follow_menu_keys() {
    assert!(Command::requirements("1").is_empty());
    assert_eq!(Command::requirements(" 6 "), &[Dataset::Routes, Dataset::Shapes]);
    assert_eq!(Command::requirements("9").len(), 3);
    let session = Session::default();
    assert!(matches!(
        session.require(Command::requirements("5")),
        Err(Error::NotLoaded(Dataset::Shapes))
    ));
    assert!(session.require(Command::requirements("0")).is_ok());
}

#[test]
fn queries_require_loaded_data() {
    let mut session = Session::default();
    assert!(matches!(
        session.execute(Command::ListShapesForRoute("8".into())),
        Err(Error::NotLoaded(Dataset::Routes))
    ));
    assert!(matches!(
        session.execute(Command::ListCoordinatesForShape("8-1".into())),
        Err(Error::NotLoaded(Dataset::Shapes))
    ));
    assert!(matches!(
        session.execute(Command::InteractiveView),
        Err(Error::NotLoaded(Dataset::Routes))
    ));
    assert_eq!(session.execute(Command::Quit).unwrap(), Reply::Quit);
}
