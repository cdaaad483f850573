//! Loads a city's trips from disk and applies the month/weekday filters.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

use crate::config::CityCatalog;
use crate::error::Result;
use crate::filters::FilterSpec;
use crate::trips::TripSet;

/// Reads every trip in the file at `path`, without filtering.
pub fn read_trips(path: &Path) -> Result<TripSet> {
    let file = File::open(path)?;
    let set = TripSet::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), records = set.len(), "Trip file decoded");
    Ok(set)
}

/// Loads the trips for `spec.city` and keeps those matching the month and
/// weekday filters.
///
/// The file is re-read on every call. A selection matching nothing is an
/// empty set, not an error.
#[tracing::instrument(skip_all, fields(city = %spec.city, month = %spec.month, weekday = %spec.weekday))]
pub fn load(catalog: &CityCatalog, spec: &FilterSpec) -> Result<TripSet> {
    let (_, path) = catalog.resolve(&spec.city)?;
    let all = read_trips(&path)?;
    let selected = all.filtered(spec.month, spec.weekday);

    info!(
        path = %path.display(),
        total = all.len(),
        retained = selected.len(),
        "Trips loaded"
    );
    Ok(selected)
}
