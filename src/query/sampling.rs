use serde::{Deserialize, Serialize};

use crate::shared::Coordinate;

/// Stride the map view draws polylines with.
pub const DEFAULT_STRIDE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Coordinate,
    pub to: Coordinate,
}

/// Thins a path for display by joining the points at `0, stride, 2*stride, ...`.
///
/// A segment starts at `i` only while `i + stride` is still a point, so a
/// trailing remainder shorter than `stride` is not drawn. A stride of zero is
/// treated as one.
pub fn sample_polyline(coordinates: &[Coordinate], stride: usize) -> Vec<Segment> {
    let stride = stride.max(1);
    if coordinates.len() < 2 {
        return Vec::new();
    }
    (0..coordinates.len() - stride.min(coordinates.len()))
        .step_by(stride)
        .map(|i| Segment {
            from: coordinates[i],
            to: coordinates[i + stride],
        })
        .collect()
}

#[cfg(test)]
fn line(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| Coordinate::from((-113.5 + i as f64 * 0.001, 53.5)))
        .collect()
}

#[test]
fn sample_every_tenth_point() {
    let points = line(21);
    let segments = sample_polyline(&points, DEFAULT_STRIDE);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].from, points[0]);
    assert_eq!(segments[0].to, points[10]);
    assert_eq!(segments[1].from, points[10]);
    assert_eq!(segments[1].to, points[20]);
}

#[test]
fn sample_drops_short_tail() {
    let points = line(25);
    let segments = sample_polyline(&points, DEFAULT_STRIDE);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].to, points[20]);
}

#[test]
fn sample_shorter_than_stride_is_empty() {
    assert!(sample_polyline(&line(10), DEFAULT_STRIDE).is_empty());
    assert!(sample_polyline(&line(1), 1).is_empty());
    assert!(sample_polyline(&[], 3).is_empty());
}

#[test]
fn sample_stride_one_joins_all_points() {
    let points = line(4);
    assert_eq!(sample_polyline(&points, 1).len(), 3);
    assert_eq!(sample_polyline(&points, 0).len(), 3);
}
