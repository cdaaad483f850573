use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::mean;
use crate::error::{BikeshareError, Result};
use crate::trips::TripSet;

/// Sum of trip durations in seconds; 0 for an empty set.
pub fn total_duration(trips: &TripSet) -> u64 {
    trips
        .records()
        .iter()
        .map(|r| r.trip_duration)
        .fold(0, u64::saturating_add)
}

/// Mean trip duration in seconds.
pub fn mean_duration(trips: &TripSet) -> Result<f64> {
    let durations: Vec<u64> = trips.records().iter().map(|r| r.trip_duration).collect();
    mean(&durations).ok_or(BikeshareError::EmptyInput {
        statistic: "mean trip duration",
    })
}

/// Total and mean together. The total is 0 and the mean `None` for an
/// empty set.
pub fn duration_stats(trips: &TripSet) -> DurationStats {
    DurationStats {
        total: total_duration(trips),
        mean: mean_duration(trips).ok(),
    }
}
