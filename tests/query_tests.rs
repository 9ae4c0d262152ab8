mod common;

use std::sync::Arc;

use common::*;
use ets_tracker::prelude::*;

#[test]
fn shapes_for_known_and_unknown_route() {
    let (routes, _, _) = indices();
    assert_eq!(ids(shapes_for_route("7", &routes).unwrap()), vec!["s1", "s2"]);
    assert!(shapes_for_route("700", &routes).is_none());
}

#[test]
fn unknown_shape_is_not_an_empty_shape() {
    let (_, shapes, _) = indices();
    assert!(coordinates_for_shape("nope", &shapes).is_none());

    let empty = ShapeIndex::from(vec![Shape {
        id: "blank".into(),
        coordinates: Box::new([]),
    }]);
    assert_eq!(coordinates_for_shape("blank", &empty), Some(&[][..]));
}

#[test]
fn longest_shape_picks_most_points() {
    let (routes, shapes, _) = indices();
    let longest = longest_shape("7", &routes, &shapes).unwrap();
    assert_eq!(&*longest.shape_id, "s2");
    assert_eq!(longest.coordinate_count, 12);
}

#[test]
fn longest_shape_is_deterministic() {
    let (routes, shapes, _) = indices();
    let first = longest_shape("7", &routes, &shapes);
    for _ in 0..10 {
        assert_eq!(longest_shape("7", &routes, &shapes), first);
    }
}

#[test]
fn longest_shape_tie_keeps_first_listed() {
    let routes = RouteIndex::from(vec![Route {
        id: "1".into(),
        shape_ids: vec![Arc::from("b"), Arc::from("a")].into(),
        stop_names: vec![Arc::from("x")].into(),
    }]);
    let point = Coordinate::from((-113.5, 53.5));
    let shapes = ShapeIndex::from(vec![
        Shape {
            id: "a".into(),
            coordinates: vec![point; 4].into(),
        },
        Shape {
            id: "b".into(),
            coordinates: vec![point; 4].into(),
        },
    ]);
    assert_eq!(&*longest_shape("1", &routes, &shapes).unwrap().shape_id, "b");
}

#[test]
fn longest_shape_without_resolvable_shapes_is_none() {
    let (routes, _, _) = indices();
    assert!(longest_shape("7", &routes, &ShapeIndex::new()).is_none());
    assert!(longest_shape("missing", &routes, &ShapeIndex::new()).is_none());
}

#[test]
fn matching_is_case_insensitive_substring() {
    let (routes, _, _) = indices();
    let matching = find_matching_routes("DOWNtown", "univ", &routes);
    assert_eq!(ids(&matching), vec!["7", "9"]);
    assert!(find_matching_routes("downtown", "capilano", &routes).is_empty());
}

#[test]
fn origin_and_destination_may_be_the_same_stop() {
    let (routes, _, _) = indices();
    assert_eq!(ids(&find_matching_routes("capi", "lano", &routes)), vec!["4"]);
}

#[test]
fn blank_inputs_match_everything_but_search_short_circuits() {
    let (routes, shapes, _) = indices();
    assert_eq!(ids(&find_matching_routes("", "", &routes)), vec!["7", "9", "4"]);
    assert!(search_route("", "  ", &routes, &shapes).is_none());
}

#[test]
fn single_blank_input_is_a_wildcard() {
    let (routes, shapes, _) = indices();
    let found = search_route("capilano", "", &routes, &shapes).unwrap();
    assert_eq!(&*found.route_id, "4");
}

#[test]
fn shortest_among_matches_prefers_fewer_points() {
    let (routes, shapes, _) = indices();
    let matching = find_matching_routes("downtown", "university", &routes);
    assert_eq!(
        shortest_among_matches(&matching, &routes, &shapes).as_deref(),
        Some("9")
    );

    let found = search_route("downtown", "university", &routes, &shapes).unwrap();
    assert_eq!(&*found.route_id, "9");
    assert_eq!(&*found.shape.shape_id, "s3");
    assert_eq!(found.shape.coordinate_count, 8);
}

#[test]
fn shortest_among_matches_tie_keeps_first_route() {
    let (routes, shapes, _) = indices();
    let matching: Vec<Arc<str>> = vec!["9".into(), "7".into(), "9".into()];
    assert_eq!(
        shortest_among_matches(&matching, &routes, &shapes).as_deref(),
        Some("9")
    );
    let only_unresolved: Vec<Arc<str>> = vec!["missing".into()];
    assert!(shortest_among_matches(&only_unresolved, &routes, &shapes).is_none());
}

#[test]
fn active_disruptions_include_today_and_later() {
    let disruptions = DisruptionIndex::from(vec![Disruption {
        coordinate: Coordinate::from((-113.5, 53.5)),
        date: date(2025, 12, 1),
    }]);
    assert_eq!(
        active_disruptions(&disruptions, date(2025, 11, 20)),
        vec![Coordinate::from((-113.5, 53.5))]
    );
    assert_eq!(active_disruptions(&disruptions, date(2025, 12, 1)).len(), 1);
    assert!(active_disruptions(&disruptions, date(2025, 12, 15)).is_empty());
}

#[test]
fn active_disruptions_keep_dataset_order() {
    let (_, _, disruptions) = indices();
    assert_eq!(
        active_disruptions(&disruptions, date(2025, 1, 1)),
        vec![
            Coordinate::from((-113.5, 53.5)),
            Coordinate::from((-113.49, 53.51))
        ]
    );
    assert_eq!(active_disruptions(&disruptions, date(2025, 6, 1)).len(), 1);
}

#[test]
fn sampled_route_uses_full_coordinates() {
    let (_, shapes, _) = indices();
    let points = coordinates_for_shape("s2", &shapes).unwrap();
    assert_eq!(points.len(), 12);
    let segments = sample_polyline(points, 5);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].to, points[10]);
}
