#![allow(dead_code)]

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use ets_tracker::prelude::*;

pub const TRIPS: &str = "\
route_id,service_id,trip_id,trip_headsign,direction_id,block_id,shape_id
7,wkd,7-1,\"Downtown\",0,b1,s1
7,wkd,7-2,\"University\",1,b1,s2
7,wkd,7-3,\"Downtown\",0,b2,s1
9,wkd,9-1,\"DOWNTOWN\",0,b3,s3
9,wkd,9-2,\"University Transit Centre\",1,b3,s3
4,sat,4-1,\"Capilano\",0,b4,s4
";

/// Rows 1 and 3 name the same location spelled differently.
pub const TRAFFIC_DISRUPTIONS: &str = "\
id,title,street,direction,impact,end_date,end_year,details,geometry_point
1,Closure,Jasper Ave,EB,Lane,\"Dec 1, 2025\",none,POINT (-113.5 53.5)
2,Closure,Whyte Ave,WB,Full,\"Feb 3, 2025\",none,POINT (-113.49 53.51)
3,Closure,Jasper Ave,EB,Lane,\"Mar 9, 2026\",none,POINT (-113.50 53.500)
";

/// Shape dataset with `s1` = 5 points, `s2` = 12, `s3` = 8 and `s4` = 3.
pub fn shapes_text() -> String {
    let mut text = String::from("shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence\n");
    for (shape_id, count) in [("s1", 5), ("s2", 12), ("s3", 8), ("s4", 3)] {
        for i in 0..count {
            text.push_str(&format!(
                "{shape_id},{},{},{}\n",
                53.5 + i as f64 * 0.001,
                -113.5 - i as f64 * 0.001,
                i + 1
            ));
        }
    }
    text
}

/// Fresh, empty scratch directory for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ets_tracker_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes the three fixture datasets under their default names in `dir`.
pub fn write_datasets(dir: &Path) {
    let config = Config::default();
    fs::write(dir.join(&config.routes_file_name), TRIPS).unwrap();
    fs::write(dir.join(&config.shapes_file_name), shapes_text()).unwrap();
    fs::write(dir.join(&config.disruptions_file_name), TRAFFIC_DISRUPTIONS).unwrap();
}

pub fn write_zip(path: &Path) {
    let config = Config::default();
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, body) in [
        (config.routes_file_name.clone(), TRIPS.to_string()),
        (config.shapes_file_name.clone(), shapes_text()),
        (
            config.disruptions_file_name.clone(),
            TRAFFIC_DISRUPTIONS.to_string(),
        ),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

pub fn indices() -> (RouteIndex, ShapeIndex, DisruptionIndex) {
    (
        RouteIndex::parse(TRIPS).unwrap(),
        ShapeIndex::parse(&shapes_text()).unwrap(),
        DisruptionIndex::parse(TRAFFIC_DISRUPTIONS, &MonthTable::default()).unwrap(),
    )
}

pub fn ids(values: &[Arc<str>]) -> Vec<&str> {
    values.iter().map(|value| &**value).collect()
}

pub fn date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
