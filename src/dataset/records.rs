//! Positional record layouts of the three datasets.
//!
//! Every line is split on each comma with quoting disabled, so a quoted
//! `"Feb 3, 2025"` lands in two fields. The column positions below rely on
//! that split.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::{
    dataset::{Dataset, Error, MonthTable},
    shared::{Coordinate, normalize_name},
};

const TRIP_ROUTE_ID: usize = 0;
const TRIP_STOP_NAME: usize = 3;
const TRIP_SHAPE_ID: usize = 6;

const SHAPE_ID: usize = 0;
const SHAPE_LATITUDE: usize = 1;
const SHAPE_LONGITUDE: usize = 2;

const DISRUPTION_MONTH_DAY: usize = 5;
const DISRUPTION_YEAR: usize = 6;

/// One data line of a dataset, header already skipped.
#[derive(Debug, Clone)]
pub struct Row {
    pub line: u64,
    pub record: StringRecord,
}

/// Iterates the data rows of `text`. The first line is always treated as
/// the header.
pub fn rows(text: &str) -> impl Iterator<Item = Result<Row, Error>> + '_ {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes())
        .into_records()
        .map(|result| {
            let record = result?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            Ok(Row { line, record })
        })
}

impl Row {
    fn malformed<S: Into<String>>(&self, dataset: Dataset, reason: S) -> Error {
        Error::MalformedRecord {
            dataset,
            line: self.line,
            reason: reason.into(),
        }
    }

    fn require(&self, dataset: Dataset, count: usize) -> Result<(), Error> {
        if self.record.len() < count {
            return Err(self.malformed(
                dataset,
                format!(
                    "expected at least {count} fields, found {}",
                    self.record.len()
                ),
            ));
        }
        Ok(())
    }

    fn field(&self, dataset: Dataset, index: usize) -> Result<&str, Error> {
        self.record
            .get(index)
            .ok_or_else(|| self.malformed(dataset, format!("missing field {index}")))
    }

    fn float(&self, dataset: Dataset, index: usize, what: &str) -> Result<f64, Error> {
        let raw = self.field(dataset, index)?;
        raw.trim()
            .parse()
            .map_err(|_| self.malformed(dataset, format!("invalid {what} {raw:?}")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub route_id: String,
    pub stop_name: String,
    pub shape_id: String,
}

impl TryFrom<&Row> for TripRecord {
    type Error = Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        row.require(Dataset::Routes, TRIP_SHAPE_ID + 1)?;
        Ok(Self {
            route_id: row.field(Dataset::Routes, TRIP_ROUTE_ID)?.trim().to_string(),
            stop_name: normalize_name(row.field(Dataset::Routes, TRIP_STOP_NAME)?),
            shape_id: row.field(Dataset::Routes, TRIP_SHAPE_ID)?.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapePointRecord {
    pub shape_id: String,
    pub coordinate: Coordinate,
}

impl TryFrom<&Row> for ShapePointRecord {
    type Error = Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        row.require(Dataset::Shapes, SHAPE_LONGITUDE + 1)?;
        let latitude = row.float(Dataset::Shapes, SHAPE_LATITUDE, "latitude")?;
        let longitude = row.float(Dataset::Shapes, SHAPE_LONGITUDE, "longitude")?;
        Ok(Self {
            shape_id: row.field(Dataset::Shapes, SHAPE_ID)?.trim().to_string(),
            coordinate: Coordinate::new(latitude, longitude),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisruptionRecord {
    pub coordinate: Coordinate,
    pub date: NaiveDate,
}

impl DisruptionRecord {
    pub fn parse(row: &Row, months: &MonthTable) -> Result<Self, Error> {
        // the point has to come after the year column
        row.require(Dataset::Disruptions, DISRUPTION_YEAR + 2)?;
        let date = parse_date(row, months)?;

        let raw_point = row
            .record
            .iter()
            .last()
            .ok_or_else(|| row.malformed(Dataset::Disruptions, "missing point"))?;
        let coordinate = parse_wkt_point(raw_point).ok_or_else(|| {
            row.malformed(Dataset::Disruptions, format!("invalid point {raw_point:?}"))
        })?;

        Ok(Self { coordinate, date })
    }
}

fn parse_date(row: &Row, months: &MonthTable) -> Result<NaiveDate, Error> {
    let token = row.field(Dataset::Disruptions, DISRUPTION_MONTH_DAY)?;
    let mut parts = token
        .split_whitespace()
        .map(|part| part.trim_matches(|c: char| c == '"' || c == ','))
        .filter(|part| !part.is_empty());

    let month_name = parts
        .next()
        .ok_or_else(|| row.malformed(Dataset::Disruptions, format!("missing month in {token:?}")))?;
    let day: u32 = parts
        .next()
        .and_then(|day| day.parse().ok())
        .ok_or_else(|| row.malformed(Dataset::Disruptions, format!("invalid day in {token:?}")))?;
    let month = months
        .resolve(month_name)
        .ok_or_else(|| Error::UnresolvedMonth {
            line: row.line,
            month: month_name.to_string(),
        })?;

    let raw_year = row.field(Dataset::Disruptions, DISRUPTION_YEAR)?;
    let year: i32 = raw_year
        .trim_matches(|c: char| c == '"' || c.is_whitespace())
        .parse()
        .map_err(|_| row.malformed(Dataset::Disruptions, format!("invalid year {raw_year:?}")))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidDate {
        line: row.line,
        year,
        month,
        day,
    })
}

/// Parses a WKT `POINT (x y)` literal, tolerating surrounding quotes and
/// whitespace. `x` is the longitude and `y` the latitude.
pub fn parse_wkt_point(text: &str) -> Option<Coordinate> {
    let body = text.trim().trim_matches('"').trim();
    let body = match body.get(..5) {
        Some(tag) if tag.eq_ignore_ascii_case("POINT") => &body[5..],
        _ => body,
    };
    let body = body.trim().strip_prefix('(')?.strip_suffix(')')?;

    let mut parts = body.split_whitespace();
    let x: f64 = parts.next()?.parse().ok()?;
    let y: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinate::from((x, y)))
}

#[test]
fn wkt_point_parses_lon_lat() {
    let coordinate = parse_wkt_point("\"POINT (-113.5 53.5)\"").unwrap();
    assert_eq!(coordinate.lon_lat(), (-113.5, 53.5));
}

#[test]
fn wkt_point_tolerates_spacing() {
    let coordinate = parse_wkt_point("  point(-113.25   53.75) ").unwrap();
    assert_eq!(coordinate.lon_lat(), (-113.25, 53.75));
}

#[test]
fn wkt_point_rejects_garbage() {
    assert!(parse_wkt_point("POINT (-113.5)").is_none());
    assert!(parse_wkt_point("POINT (a b)").is_none());
    assert!(parse_wkt_point("POINT (1 2 3)").is_none());
    assert!(parse_wkt_point("LINESTRING (1 2, 3 4)").is_none());
}

#[test]
fn rows_skip_header_and_keep_quotes() {
    let text = "route_id,name\n8,\"Abbottsfield, East\"\n";
    let rows: Vec<_> = rows(text).collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line, 2);
    assert_eq!(rows[0].record.len(), 3);
    assert_eq!(&rows[0].record[1], "\"Abbottsfield");
}

#[test]
fn disruption_date_is_zero_padded() {
    let text = "h\n1,a,b,c,d,\"Feb 3, 2025\",x,POINT (-113.5 53.5)\n";
    let row = rows(text).next().unwrap().unwrap();
    let record = DisruptionRecord::parse(&row, &MonthTable::default()).unwrap();
    assert_eq!(record.date.to_string(), "2025-02-03");
    assert_eq!(record.coordinate.lon_lat(), (-113.5, 53.5));
}
