use std::{collections::HashMap, sync::Arc, time::Instant};

use tracing::debug;

use crate::{
    dataset::{
        self,
        records::{self, TripRecord},
    },
    repository::{Route, RouteIndex, source::UniqueList},
};

#[derive(Debug, Default)]
struct RouteBuilder {
    id: Arc<str>,
    shape_ids: UniqueList,
    stop_names: UniqueList,
}

impl From<RouteBuilder> for Route {
    fn from(value: RouteBuilder) -> Self {
        Self {
            id: value.id,
            shape_ids: value.shape_ids.into(),
            stop_names: value.stop_names.into(),
        }
    }
}

impl RouteIndex {
    /// Builds the route index from the trips dataset.
    ///
    /// Every row adds its shape id and stop name to the route's lists unless
    /// already present. Any malformed row fails the whole load.
    pub fn parse(text: &str) -> Result<Self, dataset::Error> {
        debug!("Loading routes...");
        let now = Instant::now();
        let mut route_lookup: HashMap<Arc<str>, usize> = HashMap::new();
        let mut routes: Vec<RouteBuilder> = Vec::new();
        for row in records::rows(text) {
            let trip = TripRecord::try_from(&row?)?;
            let index = match route_lookup.get(trip.route_id.as_str()) {
                Some(index) => *index,
                None => {
                    let id: Arc<str> = trip.route_id.into();
                    route_lookup.insert(id.clone(), routes.len());
                    routes.push(RouteBuilder {
                        id,
                        ..Default::default()
                    });
                    routes.len() - 1
                }
            };
            let route = &mut routes[index];
            route.shape_ids.push(trip.shape_id);
            route.stop_names.push(trip.stop_name);
        }

        let index: RouteIndex = routes
            .into_iter()
            .map(Route::from)
            .collect::<Vec<_>>()
            .into();
        debug!("Loading {} routes took {:?}", index.len(), now.elapsed());
        Ok(index)
    }
}
