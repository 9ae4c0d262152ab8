use criterion::{Criterion, criterion_group, criterion_main};
use ets_tracker::prelude::*;
use std::{env, hint::black_box, time::Duration};

const STOPS: [&str; 6] = [
    "Downtown",
    "University",
    "Capilano",
    "Clareview",
    "West Edmonton Mall",
    "Mill Woods",
];

/// Trips and shapes for `route_count` routes with two shapes each, used when
/// no real dataset is available.
fn synthetic_datasets(route_count: usize) -> (String, String) {
    let mut trips = String::from("route_id,service_id,trip_id,trip_headsign,direction_id,block_id,shape_id\n");
    let mut shapes = String::from("shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\n");
    for route in 0..route_count {
        for direction in 0..2 {
            let stop = STOPS[(route + direction * 3) % STOPS.len()];
            let shape_id = format!("{route}-{direction}");
            trips.push_str(&format!(
                "{route},wkd,{route}-{direction},\"{stop}\",{direction},b{route},{shape_id}\n"
            ));
            for point in 0..(50 + route % 200) {
                shapes.push_str(&format!(
                    "{shape_id},{},{},{}\n",
                    53.4 + point as f64 * 0.0005,
                    -113.6 + route as f64 * 0.0001,
                    point + 1
                ));
            }
        }
    }
    (trips, shapes)
}

fn load(c: &mut Criterion) -> (RouteIndex, ShapeIndex) {
    let reader = match env::var("ETS_DATA_PATH") {
        Ok(path) => Some(DatasetReader::default().from_dir(path)),
        Err(err) => {
            println!("Missing ETS_DATA_PATH environment variable ({err}), using synthetic data");
            None
        }
    };
    let (trips, shapes) = match reader {
        Some(reader) => (
            reader.read_routes().expect("Failed to read routes"),
            reader.read_shapes().expect("Failed to read shapes"),
        ),
        None => synthetic_datasets(400),
    };

    let mut group = c.benchmark_group("Loading");
    group.bench_function("Parse routes", |b| {
        b.iter(|| RouteIndex::parse(black_box(&trips)))
    });
    group.bench_function("Parse shapes", |b| {
        b.iter(|| ShapeIndex::parse(black_box(&shapes)))
    });
    group.finish();

    (
        RouteIndex::parse(&trips).expect("Failed to build route index"),
        ShapeIndex::parse(&shapes).expect("Failed to build shape index"),
    )
}

fn criterion_benchmark(c: &mut Criterion) {
    let (routes, shapes) = load(c);

    let mut group = c.benchmark_group("Queries");
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(15));

    group.bench_function("Longest shape", |b| {
        b.iter(|| longest_shape(black_box("7"), &routes, &shapes))
    });

    group.bench_function("Stop search", |b| {
        b.iter(|| search_route(black_box("downtown"), black_box("university"), &routes, &shapes))
    });

    group.bench_function("Wildcard search", |b| {
        b.iter(|| search_route(black_box("mill"), black_box(""), &routes, &shapes))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
