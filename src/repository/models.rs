use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::geo::{Coordinate, Distance};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Arc<str>,
    /// Unique, in the order they first appear in the dataset.
    pub shape_ids: Box<[Arc<str>]>,
    /// Lower-cased, unique, in the order they first appear in the dataset.
    pub stop_names: Box<[Arc<str>]>,
}

impl Route {
    pub fn has_stop_containing(&self, needle: &str) -> bool {
        self.stop_names.iter().any(|stop| stop.contains(needle))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: Arc<str>,
    pub coordinates: Box<[Coordinate]>,
}

impl Shape {
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Length of the polyline over the ground. Informational only, route
    /// comparisons rank shapes by point count.
    pub fn length(&self) -> Distance {
        self.coordinates
            .windows(2)
            .map(|pair| pair[0].haversine_distance(&pair[1]))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disruption {
    pub coordinate: Coordinate,
    /// Last day the disruption is in effect.
    pub date: NaiveDate,
}

impl Disruption {
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

#[test]
fn shape_length_sums_segments() {
    let shape = Shape {
        id: "s1".into(),
        coordinates: vec![
            Coordinate::from((-113.5, 53.5)),
            Coordinate::from((-113.5, 53.51)),
            Coordinate::from((-113.5, 53.52)),
        ]
        .into(),
    };
    // 0.02 degrees of latitude is roughly 2.2 km
    assert!((shape.length().as_kilometers() - 2.22).abs() < 0.05);
}

#[test]
fn single_point_shape_has_no_length() {
    let shape = Shape {
        id: "s1".into(),
        coordinates: vec![Coordinate::from((-113.5, 53.5))].into(),
    };
    assert_eq!(shape.length().as_meters(), 0.0);
}

#[test]
fn disruption_active_through_its_date() {
    let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    let disruption = Disruption {
        coordinate: Coordinate::from((-113.5, 53.5)),
        date,
    };
    assert!(disruption.is_active(date));
    assert!(disruption.is_active(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()));
    assert!(!disruption.is_active(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()));
}
