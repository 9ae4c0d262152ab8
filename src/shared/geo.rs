use std::{
    cmp,
    fmt::Display,
    iter::Sum,
    ops::Add,
};

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Distance::default(), |acc, distance| acc + distance)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 >= 1000.0 {
            write!(f, "{:.2} km", self.as_kilometers())
        } else {
            write!(f, "{:.0} m", self.0)
        }
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// A point on the map. Datasets and the map window both address points as
/// `(longitude, latitude)`, which is the tuple order used by the conversions
/// below.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {})", self.longitude, self.latitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Builds a coordinate from a `(longitude, latitude)` pair.
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        value.lon_lat()
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub const fn lon_lat(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    pub fn key(&self) -> PointKey {
        PointKey::from(*self)
    }

    pub fn haversine_distance(&self, coord: &Self) -> Distance {
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_kilometers(EARTH_RADIUS_KM * c)
    }
}

/// Hashable identity of a coordinate. Two points share a key when their
/// parsed values are equal, no matter how the source text spelled them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey(u64, u64);

impl From<Coordinate> for PointKey {
    fn from(value: Coordinate) -> Self {
        // -0.0 and 0.0 compare equal but have different bits
        let normalize = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        Self(normalize(value.longitude), normalize(value.latitude))
    }
}

#[test]
fn distance_test() {
    let coord_a = Coordinate::new(53.5461, -113.4938);
    let coord_b = Coordinate::new(53.5232, -113.5263);
    let d = coord_a.haversine_distance(&coord_b);
    assert!((d.as_kilometers() - 3.32).abs() < 0.1);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b)
}

#[test]
fn lon_lat_order_test() {
    let coord = Coordinate::from((-113.5, 53.5));
    assert_eq!(coord.longitude, -113.5);
    assert_eq!(coord.latitude, 53.5);
    assert_eq!(<(f64, f64)>::from(coord), (-113.5, 53.5));
}

#[test]
fn point_key_folds_negative_zero() {
    let a = Coordinate::from((0.0, 53.5));
    let b = Coordinate::from((-0.0, 53.5));
    assert_eq!(a.key(), b.key());
    assert_ne!(a.key(), Coordinate::from((53.5, 0.0)).key());
}
