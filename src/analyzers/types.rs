//! Result types produced by the statistics engine.

use serde::Serialize;
use std::collections::BTreeMap;

/// Most frequent travel times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// 1-based month number.
    pub common_month: u32,
    /// Full weekday name, e.g. `"Friday"`.
    pub common_weekday: String,
    pub common_hour: u32,
}

/// Most popular stations and route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub common_start_station: String,
    pub common_end_station: String,
    /// `"{start} to {end}"`.
    pub common_route: String,
}

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total: u64,
    /// `None` for an empty selection.
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub oldest: i32,
    pub youngest: i32,
    pub most_common: i32,
}

/// Outcome for a birth-year statistic, a column some datasets do not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Column<T> {
    /// The dataset has no such column.
    Unavailable,
    /// The column exists but no selected trip has a value.
    Empty,
    Available(T),
}

impl<T> Column<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            _ => None,
        }
    }
}

pub type Counts = BTreeMap<String, usize>;

/// Demographic breakdown of the riders in a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Counts,
    /// `None` when the dataset has no gender column; an empty map when it
    /// does but nothing was selected.
    pub gender: Option<Counts>,
    pub birth_years: Column<BirthYearStats>,
}
