use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    query::{LongestShape, longest_shape},
    repository::{RouteIndex, ShapeIndex},
};

/// Route picked by a stop-name search, together with the shape it is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    pub route_id: Arc<str>,
    pub shape: LongestShape,
}

/// Routes that serve both places: some stop name contains `origin` and
/// some, possibly different, stop name contains `destination`.
///
/// Matching is case-insensitive substring containment, so an empty string
/// matches every stop. Results keep the index's first-seen route order.
pub fn find_matching_routes(origin: &str, destination: &str, routes: &RouteIndex) -> Vec<Arc<str>> {
    let origin = origin.trim().to_lowercase();
    let destination = destination.trim().to_lowercase();
    routes
        .routes()
        .par_iter()
        .filter(|route| route.has_stop_containing(&origin) && route.has_stop_containing(&destination))
        .map(|route| route.id.clone())
        .collect()
}

/// Among `matching`, the route whose longest shape has the fewest points.
///
/// Point count stands in for trip length here. It is not a geographic
/// distance: a densely sampled short route can lose to a sparse long one.
/// Ties keep the route listed first; routes without a resolvable shape are
/// skipped.
pub fn shortest_among_matches(
    matching: &[Arc<str>],
    routes: &RouteIndex,
    shapes: &ShapeIndex,
) -> Option<Arc<str>> {
    shortest_match(matching, routes, shapes).map(|found| found.route_id)
}

/// Full stop-name search as the map front end runs it. Two blank inputs are
/// answered with `None` straight away instead of matching every route; a
/// single blank input still acts as a wildcard.
pub fn search_route(
    origin: &str,
    destination: &str,
    routes: &RouteIndex,
    shapes: &ShapeIndex,
) -> Option<RouteMatch> {
    if origin.trim().is_empty() && destination.trim().is_empty() {
        return None;
    }
    let matching = find_matching_routes(origin, destination, routes);
    debug!(
        "{} routes serve {origin:?} and {destination:?}",
        matching.len()
    );
    shortest_match(&matching, routes, shapes)
}

fn shortest_match(
    matching: &[Arc<str>],
    routes: &RouteIndex,
    shapes: &ShapeIndex,
) -> Option<RouteMatch> {
    let mut shortest: Option<RouteMatch> = None;
    for route_id in matching {
        let Some(shape) = longest_shape(route_id, routes, shapes) else {
            continue;
        };
        let is_shorter = match &shortest {
            Some(current) => shape.coordinate_count < current.shape.coordinate_count,
            None => true,
        };
        if is_shorter {
            shortest = Some(RouteMatch {
                route_id: route_id.clone(),
                shape,
            });
        }
    }
    shortest
}
