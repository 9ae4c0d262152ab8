use std::{collections::HashMap, sync::Arc, time::Instant};

use tracing::debug;

use crate::{
    dataset::{
        self,
        records::{self, ShapePointRecord},
    },
    repository::{Shape, ShapeIndex},
    shared::Coordinate,
};

impl ShapeIndex {
    /// Builds the shape index from the shapes dataset. Points keep the order
    /// of the file, so each shape is the path as listed.
    pub fn parse(text: &str) -> Result<Self, dataset::Error> {
        debug!("Loading shapes...");
        let now = Instant::now();
        let mut shape_lookup: HashMap<Arc<str>, usize> = HashMap::new();
        let mut shapes: Vec<(Arc<str>, Vec<Coordinate>)> = Vec::new();
        for row in records::rows(text) {
            let point = ShapePointRecord::try_from(&row?)?;
            match shape_lookup.get(point.shape_id.as_str()) {
                Some(index) => shapes[*index].1.push(point.coordinate),
                None => {
                    let id: Arc<str> = point.shape_id.into();
                    shape_lookup.insert(id.clone(), shapes.len());
                    shapes.push((id, vec![point.coordinate]));
                }
            }
        }

        let index: ShapeIndex = shapes
            .into_iter()
            .map(|(id, coordinates)| Shape {
                id,
                coordinates: coordinates.into(),
            })
            .collect::<Vec<_>>()
            .into();
        debug!("Loading {} shapes took {:?}", index.len(), now.elapsed());
        Ok(index)
    }
}
