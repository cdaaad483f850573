//! Every statistics group for one filter selection, in a serializable bundle.

use serde::Serialize;

use crate::analyzers::duration::duration_stats;
use crate::analyzers::station::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::types::{DurationStats, StationStats, TimeStats, UserStats};
use crate::analyzers::users::user_stats;
use crate::filters::FilterSpec;
use crate::trips::TripSet;

/// Groups that need at least one trip are `None` for an empty selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub city: String,
    pub month: String,
    pub weekday: String,
    pub record_count: usize,
    pub time: Option<TimeStats>,
    pub stations: Option<StationStats>,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl Report {
    pub fn build(spec: &FilterSpec, trips: &TripSet) -> Self {
        Self {
            city: spec.city.clone(),
            month: spec.month.to_string(),
            weekday: spec.weekday.to_string(),
            record_count: trips.len(),
            time: time_stats(trips).ok(),
            stations: station_stats(trips).ok(),
            durations: duration_stats(trips),
            users: user_stats(trips),
        }
    }
}
