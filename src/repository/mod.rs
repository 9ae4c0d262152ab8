use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod models;
pub mod source;
pub use models::*;

use crate::shared::geo::{Coordinate, PointKey};

type IdToIndex = HashMap<Arc<str>, u32>;

/// Routes keyed by route id, iterated in the order they first appeared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Route>", into = "Vec<Route>")]
pub struct RouteIndex {
    routes: Box<[Route]>,
    route_lookup: IdToIndex,
}

impl From<Vec<Route>> for RouteIndex {
    fn from(routes: Vec<Route>) -> Self {
        let route_lookup = routes
            .iter()
            .enumerate()
            .map(|(i, route)| (route.id.clone(), i as u32))
            .collect();
        Self {
            routes: routes.into(),
            route_lookup,
        }
    }
}

impl From<RouteIndex> for Vec<Route> {
    fn from(value: RouteIndex) -> Self {
        value.routes.into_vec()
    }
}

impl RouteIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Get a route with the given id.
    /// If no route is found with the given id None is returned.
    pub fn route_by_id(&self, id: &str) -> Option<&Route> {
        let index = self.route_lookup.get(id)?;
        Some(&self.routes[*index as usize])
    }
}

/// Shape polylines keyed by shape id, iterated in the order they first appeared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Shape>", into = "Vec<Shape>")]
pub struct ShapeIndex {
    shapes: Box<[Shape]>,
    shape_lookup: IdToIndex,
}

impl From<Vec<Shape>> for ShapeIndex {
    fn from(shapes: Vec<Shape>) -> Self {
        let shape_lookup = shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (shape.id.clone(), i as u32))
            .collect();
        Self {
            shapes: shapes.into(),
            shape_lookup,
        }
    }
}

impl From<ShapeIndex> for Vec<Shape> {
    fn from(value: ShapeIndex) -> Self {
        value.shapes.into_vec()
    }
}

impl ShapeIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    /// Get a shape with the given id.
    /// If no shape is found with the given id None is returned.
    pub fn shape_by_id(&self, id: &str) -> Option<&Shape> {
        let index = self.shape_lookup.get(id)?;
        Some(&self.shapes[*index as usize])
    }
}

/// Disruption end dates keyed by location. Each location holds one date,
/// the first one the dataset listed for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Disruption>", into = "Vec<Disruption>")]
pub struct DisruptionIndex {
    disruptions: Box<[Disruption]>,
    point_lookup: HashMap<PointKey, u32>,
}

impl From<Vec<Disruption>> for DisruptionIndex {
    /// Later entries for an already seen location are dropped.
    fn from(disruptions: Vec<Disruption>) -> Self {
        let mut point_lookup: HashMap<PointKey, u32> = HashMap::new();
        let mut kept: Vec<Disruption> = Vec::with_capacity(disruptions.len());
        disruptions.into_iter().for_each(|disruption| {
            point_lookup
                .entry(disruption.coordinate.key())
                .or_insert_with(|| {
                    kept.push(disruption);
                    kept.len() as u32 - 1
                });
        });
        Self {
            disruptions: kept.into(),
            point_lookup,
        }
    }
}

impl From<DisruptionIndex> for Vec<Disruption> {
    fn from(value: DisruptionIndex) -> Self {
        value.disruptions.into_vec()
    }
}

impl DisruptionIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.disruptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disruptions.is_empty()
    }

    pub fn disruptions(&self) -> &[Disruption] {
        &self.disruptions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Disruption> {
        self.disruptions.iter()
    }

    pub fn date_at(&self, coordinate: &Coordinate) -> Option<NaiveDate> {
        let index = self.point_lookup.get(&coordinate.key())?;
        Some(self.disruptions[*index as usize].date)
    }
}

#[test]
fn disruption_index_keeps_first_date() {
    let point = Coordinate::from((-113.5, 53.5));
    let first = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let second = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let index = DisruptionIndex::from(vec![
        Disruption {
            coordinate: point,
            date: first,
        },
        Disruption {
            coordinate: point,
            date: second,
        },
    ]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.date_at(&point), Some(first));
}

#[test]
fn route_index_looks_up_by_id() {
    let index = RouteIndex::from(vec![
        Route {
            id: "8".into(),
            ..Default::default()
        },
        Route {
            id: "9".into(),
            ..Default::default()
        },
    ]);
    assert_eq!(index.route_by_id("9").map(|route| &*route.id), Some("9"));
    assert!(index.route_by_id("10").is_none());
}
