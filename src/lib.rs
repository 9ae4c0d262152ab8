//! Route, shape and disruption lookups over Edmonton Transit style datasets.
//!
//! Load the three text datasets into indices with [`repository`], query them
//! with [`query`], and keep them for a session (or persist them as one
//! [`snapshot`]) with [`session`].

pub mod dataset;
pub mod query;
pub mod repository;
pub mod session;
pub mod shared;
pub mod snapshot;
pub mod view;

pub mod prelude {
    pub use crate::dataset::{Config, Dataset, DatasetReader, MonthTable};
    pub use crate::query::{
        LongestShape, RouteMatch, Segment, active_disruptions, coordinates_for_shape,
        find_matching_routes, longest_shape, sample_polyline, search_route, shapes_for_route,
        shortest_among_matches,
    };
    pub use crate::repository::{
        Disruption, DisruptionIndex, Route, RouteIndex, Shape, ShapeIndex,
    };
    pub use crate::session::{Command, Reply, Session};
    pub use crate::shared::{Coordinate, Distance};
    pub use crate::snapshot::Snapshot;
    pub use crate::view::{Button, MapView, ViewAction, ViewEvent};
}
