//! Read-only queries over loaded indices. Nothing here touches the file
//! system; a `None` result means the id is unknown, which callers should
//! keep apart from "dataset not loaded".

use std::sync::Arc;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

mod sampling;
mod search;
pub use sampling::*;
pub use search::*;

use crate::{
    repository::{DisruptionIndex, RouteIndex, ShapeIndex},
    shared::Coordinate,
};

/// The shape of a route with the most points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestShape {
    pub shape_id: Arc<str>,
    pub coordinate_count: usize,
}

pub fn shapes_for_route<'a>(route_id: &str, routes: &'a RouteIndex) -> Option<&'a [Arc<str>]> {
    routes
        .route_by_id(route_id)
        .map(|route| route.shape_ids.as_ref())
}

/// Returns the full, unsampled point sequence of a shape. A shape that
/// exists with no points yields `Some(&[])`.
pub fn coordinates_for_shape<'a>(
    shape_id: &str,
    shapes: &'a ShapeIndex,
) -> Option<&'a [Coordinate]> {
    shapes
        .shape_by_id(shape_id)
        .map(|shape| shape.coordinates.as_ref())
}

/// Picks the route's shape with the most coordinates. On a tie the shape
/// listed first for the route wins. Shape ids that are not in `shapes`, and
/// shapes without points, are skipped; if nothing is left the result is `None`.
pub fn longest_shape(
    route_id: &str,
    routes: &RouteIndex,
    shapes: &ShapeIndex,
) -> Option<LongestShape> {
    let route = routes.route_by_id(route_id)?;
    let mut longest: Option<LongestShape> = None;
    let mut most_points = 0;
    for shape in route
        .shape_ids
        .iter()
        .filter_map(|shape_id| shapes.shape_by_id(shape_id))
    {
        if shape.len() > most_points {
            most_points = shape.len();
            longest = Some(LongestShape {
                shape_id: shape.id.clone(),
                coordinate_count: most_points,
            });
        }
    }
    longest
}

/// Locations of every disruption still in effect on `today`, in the order
/// the dataset listed them.
pub fn active_disruptions(disruptions: &DisruptionIndex, today: NaiveDate) -> Vec<Coordinate> {
    disruptions
        .disruptions()
        .par_iter()
        .filter(|disruption| disruption.is_active(today))
        .map(|disruption| disruption.coordinate)
        .collect()
}
