use std::time::Instant;

use tracing::debug;

use crate::{
    dataset::{
        self, MonthTable,
        records::{self, DisruptionRecord},
    },
    repository::{Disruption, DisruptionIndex},
};

impl DisruptionIndex {
    /// Builds the disruption index from the disruptions dataset, resolving
    /// month names through `months`.
    ///
    /// A month name missing from the table fails the load. When a location
    /// appears more than once only its first date is kept; locations are
    /// compared by parsed value, not by how the point was written.
    pub fn parse(text: &str, months: &MonthTable) -> Result<Self, dataset::Error> {
        debug!("Loading disruptions...");
        let now = Instant::now();
        let disruptions = records::rows(text)
            .map(|row| {
                let record = DisruptionRecord::parse(&row?, months)?;
                Ok(Disruption {
                    coordinate: record.coordinate,
                    date: record.date,
                })
            })
            .collect::<Result<Vec<_>, dataset::Error>>()?;
        let rows = disruptions.len();

        let index = DisruptionIndex::from(disruptions);
        debug!(
            "Loading {} disruptions ({} duplicate rows) took {:?}",
            index.len(),
            rows - index.len(),
            now.elapsed()
        );
        Ok(index)
    }
}
