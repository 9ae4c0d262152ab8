//! Event dispatch for the interactive map. Drawing is left to the front end;
//! this module decides what a click or key press means and runs the
//! matching query.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    query::{self, DEFAULT_STRIDE, Segment},
    repository::{DisruptionIndex, RouteIndex, ShapeIndex},
    shared::Coordinate,
};

/// South-west corner of the map window.
pub const MAP_SOUTH_WEST: Coordinate = Coordinate::new(53.393703, -113.720049);
/// North-east corner of the map window.
pub const MAP_NORTH_EAST: Coordinate = Coordinate::new(53.657116, -113.320418);

/// Axis aligned rectangle in map coordinates, edges included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Region {
    /// The whole map window.
    pub const MAP: Region = Region {
        min_x: MAP_SOUTH_WEST.longitude,
        min_y: MAP_SOUTH_WEST.latitude,
        max_x: MAP_NORTH_EAST.longitude,
        max_y: MAP_NORTH_EAST.latitude,
    };

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Search,
    ClearText,
    ClearRoutes,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Search, Button::ClearText, Button::ClearRoutes];

    pub fn region(&self) -> Region {
        let (min_y, max_y) = match self {
            Button::Search => (53.617, 53.623),
            Button::ClearText => (53.608, 53.614),
            Button::ClearRoutes => (53.599, 53.605),
        };
        Region {
            min_x: -113.694,
            min_y,
            max_x: -113.626,
            max_y,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Button::Search => "Search",
            Button::ClearText => "Clear Text",
            Button::ClearRoutes => "Clear Routes",
        }
    }

    pub fn at(x: f64, y: f64) -> Option<Button> {
        Button::ALL
            .into_iter()
            .find(|button| button.region().contains(x, y))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Click { x: f64, y: f64 },
    Key(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    DrawRoute {
        route_id: Arc<str>,
        shape_id: Arc<str>,
        segments: Vec<Segment>,
    },
    NotFound,
    ClearText,
    ClearRoutes,
    Ignored,
}

/// State of one open map window: the two search boxes and the data the
/// searches run against.
#[derive(Debug, Clone)]
pub struct MapView<'a> {
    routes: &'a RouteIndex,
    shapes: &'a ShapeIndex,
    disruptions: &'a DisruptionIndex,
    today: NaiveDate,
    stride: usize,
    origin: String,
    destination: String,
}

impl<'a> MapView<'a> {
    pub fn new(
        routes: &'a RouteIndex,
        shapes: &'a ShapeIndex,
        disruptions: &'a DisruptionIndex,
        today: NaiveDate,
    ) -> Self {
        Self {
            routes,
            shapes,
            disruptions,
            today,
            stride: DEFAULT_STRIDE,
            origin: String::new(),
            destination: String::new(),
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn set_origin<S: Into<String>>(&mut self, text: S) {
        self.origin = text.into();
    }

    pub fn set_destination<S: Into<String>>(&mut self, text: S) {
        self.destination = text.into();
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Locations to mark as disrupted when the map opens.
    pub fn disruption_markers(&self) -> Vec<Coordinate> {
        query::active_disruptions(self.disruptions, self.today)
    }

    pub fn handle(&mut self, event: ViewEvent) -> ViewAction {
        match event {
            ViewEvent::Key(key) if key == "Return" => self.search(),
            ViewEvent::Key(_) => ViewAction::Ignored,
            ViewEvent::Click { x, y } if !Region::MAP.contains(x, y) => ViewAction::Ignored,
            ViewEvent::Click { x, y } => match Button::at(x, y) {
                Some(Button::Search) => self.search(),
                Some(Button::ClearText) => {
                    self.origin.clear();
                    self.destination.clear();
                    ViewAction::ClearText
                }
                Some(Button::ClearRoutes) => ViewAction::ClearRoutes,
                None => ViewAction::Ignored,
            },
        }
    }

    fn search(&self) -> ViewAction {
        let Some(found) =
            query::search_route(&self.origin, &self.destination, self.routes, self.shapes)
        else {
            return ViewAction::NotFound;
        };
        let coordinates =
            query::coordinates_for_shape(&found.shape.shape_id, self.shapes).unwrap_or_default();
        ViewAction::DrawRoute {
            route_id: found.route_id,
            segments: query::sample_polyline(coordinates, self.stride),
            shape_id: found.shape.shape_id,
        }
    }
}

#[test]
fn buttons_do_not_overlap() {
    assert_eq!(Button::at(-113.66, 53.62), Some(Button::Search));
    assert_eq!(Button::at(-113.66, 53.611), Some(Button::ClearText));
    assert_eq!(Button::at(-113.66, 53.6015), Some(Button::ClearRoutes));
    assert_eq!(Button::at(-113.66, 53.615), None);
    assert_eq!(Button::at(-113.5, 53.62), None);
}

#[test]
fn buttons_sit_inside_the_map() {
    for button in Button::ALL {
        let region = button.region();
        assert!(Region::MAP.contains(region.min_x, region.min_y), "{}", button.label());
        assert!(Region::MAP.contains(region.max_x, region.max_y), "{}", button.label());
    }
    assert_eq!(Button::ClearRoutes.label(), "Clear Routes");
}

#[test]
fn button_edges_are_inside() {
    let region = Button::Search.region();
    assert!(region.contains(region.min_x, region.min_y));
    assert!(region.contains(region.max_x, region.max_y));
}
