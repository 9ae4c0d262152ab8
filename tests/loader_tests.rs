mod common;

use common::*;
use ets_tracker::{dataset::Error, prelude::*};

#[test]
fn routes_keep_first_seen_order_without_duplicates() {
    let routes = RouteIndex::parse(TRIPS).unwrap();
    assert_eq!(routes.len(), 3);
    let order: Vec<&str> = routes.iter().map(|route| &*route.id).collect();
    assert_eq!(order, vec!["7", "9", "4"]);

    let seven = routes.route_by_id("7").unwrap();
    assert_eq!(ids(&seven.shape_ids), vec!["s1", "s2"]);
    assert_eq!(ids(&seven.stop_names), vec!["downtown", "university"]);

    let nine = routes.route_by_id("9").unwrap();
    assert_eq!(ids(&nine.shape_ids), vec!["s3"]);
    assert_eq!(
        ids(&nine.stop_names),
        vec!["downtown", "university transit centre"]
    );
}

#[test]
fn every_route_id_in_the_data_is_indexed() {
    let routes = RouteIndex::parse(TRIPS).unwrap();
    for line in TRIPS.lines().skip(1) {
        let route_id = line.split(',').next().unwrap();
        assert!(routes.route_by_id(route_id).is_some(), "missing {route_id}");
    }
}

#[test]
fn short_route_row_fails_the_load() {
    let text = "route_id,service_id,trip_id,trip_headsign,direction_id,block_id,shape_id\n\
                7,wkd,7-1,\"Downtown\",0,b1,s1\n\
                8,wkd,8-1\n";
    let error = RouteIndex::parse(text).unwrap_err();
    assert!(matches!(
        error,
        Error::MalformedRecord {
            dataset: Dataset::Routes,
            line: 3,
            ..
        }
    ));
}

#[test]
fn header_only_file_gives_empty_index() {
    let routes = RouteIndex::parse("route_id,service_id,trip_id\n").unwrap();
    assert!(routes.is_empty());
}

#[test]
fn shapes_store_longitude_then_latitude() {
    let shapes = ShapeIndex::parse("shape_id,lat,lon\ns1,53.5,-113.4\ns1,53.6,-113.3\n").unwrap();
    let points = coordinates_for_shape("s1", &shapes).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].lon_lat(), (-113.4, 53.5));
    assert_eq!(points[1].lon_lat(), (-113.3, 53.6));
}

#[test]
fn shapes_keep_file_order() {
    let shapes = ShapeIndex::parse(&shapes_text()).unwrap();
    let counts: Vec<(&str, usize)> = shapes
        .iter()
        .map(|shape| (&*shape.id, shape.len()))
        .collect();
    assert_eq!(counts, vec![("s1", 5), ("s2", 12), ("s3", 8), ("s4", 3)]);
    let s2 = shapes.shape_by_id("s2").unwrap();
    assert!(s2.coordinates[0].latitude < s2.coordinates[11].latitude);
}

#[test]
fn bad_latitude_is_malformed() {
    let error = ShapeIndex::parse("shape_id,lat,lon\ns1,north,-113.4\n").unwrap_err();
    assert!(matches!(
        error,
        Error::MalformedRecord {
            dataset: Dataset::Shapes,
            line: 2,
            ..
        }
    ));
}

#[test]
fn disruption_dates_resolve_and_first_location_wins() {
    let disruptions =
        DisruptionIndex::parse(TRAFFIC_DISRUPTIONS, &MonthTable::default()).unwrap();
    assert_eq!(disruptions.len(), 2);
    let jasper = Coordinate::from((-113.5, 53.5));
    assert_eq!(disruptions.date_at(&jasper), Some(date(2025, 12, 1)));
    let whyte = Coordinate::from((-113.49, 53.51));
    assert_eq!(
        disruptions.date_at(&whyte).map(|date| date.to_string()),
        Some("2025-02-03".to_string())
    );
}

#[test]
fn unknown_month_fails_instead_of_reusing_the_last_one() {
    let text = "id,a,b,c,d,end_date,end_year,details,point\n\
                1,a,b,c,d,\"Feb 3, 2025\",x,POINT (-113.5 53.5)\n\
                2,a,b,c,d,\"Sept 4, 2025\",x,POINT (-113.4 53.4)\n";
    let error = DisruptionIndex::parse(text, &MonthTable::default()).unwrap_err();
    match error {
        Error::UnresolvedMonth { line, month } => {
            assert_eq!(line, 3);
            assert_eq!(month, "Sept");
        }
        other => panic!("unexpected error {other}"),
    }

    let months = MonthTable::default().with("Sept", 9);
    let disruptions = DisruptionIndex::parse(text, &months).unwrap();
    assert_eq!(
        disruptions.date_at(&Coordinate::from((-113.4, 53.4))),
        Some(date(2025, 9, 4))
    );
}

#[test]
fn impossible_date_is_reported() {
    let text = "id,a,b,c,d,end_date,end_year,details,point\n\
                1,a,b,c,d,\"Feb 30, 2025\",x,POINT (-113.5 53.5)\n";
    assert!(matches!(
        DisruptionIndex::parse(text, &MonthTable::default()),
        Err(Error::InvalidDate {
            year: 2025,
            month: 2,
            day: 30,
            ..
        })
    ));
}

#[test]
fn missing_file_is_source_not_found() {
    let dir = scratch_dir("loader_missing");
    let reader = DatasetReader::default().from_dir(&dir);
    assert!(matches!(reader.read_routes(), Err(Error::SourceNotFound(_))));
}

#[test]
fn reads_datasets_from_a_directory() {
    let dir = scratch_dir("loader_dir");
    write_datasets(&dir);
    let reader = DatasetReader::default().from_dir(&dir);
    let routes = RouteIndex::parse(&reader.read_routes().unwrap()).unwrap();
    let shapes = ShapeIndex::parse(&reader.read_shapes().unwrap()).unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(shapes.len(), 4);
}

#[test]
fn reads_datasets_from_a_zip_bundle() {
    let dir = scratch_dir("loader_zip");
    let zip_path = dir.join("ets.zip");
    write_zip(&zip_path);
    let reader = DatasetReader::default().from_zip(&zip_path);
    let disruptions =
        DisruptionIndex::parse(&reader.read_disruptions().unwrap(), &MonthTable::default())
            .unwrap();
    assert_eq!(disruptions.len(), 2);
    assert!(reader.describe(Dataset::Shapes).ends_with("ets.zip:shapes.txt"));
}

#[test]
fn missing_zip_entry_is_source_not_found() {
    let dir = scratch_dir("loader_zip_entry");
    let zip_path = dir.join("ets.zip");
    write_zip(&zip_path);
    let mut config = Config::default();
    config.shapes_file_name = "missing.txt".into();
    let reader = DatasetReader::new(config).from_zip(&zip_path);
    assert!(matches!(reader.read_shapes(), Err(Error::SourceNotFound(_))));
}
