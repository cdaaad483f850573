use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::mode;
use crate::error::{BikeshareError, Result};
use crate::filters::weekday_name;
use crate::trips::TripSet;

/// Most common month, weekday and start hour.
///
/// Weekday ties resolve alphabetically by full name; month and hour ties
/// resolve to the smaller number.
pub fn time_stats(trips: &TripSet) -> Result<TimeStats> {
    let records = trips.records();
    let empty = || BikeshareError::EmptyInput {
        statistic: "most common travel times",
    };

    let common_month = mode(records.iter().map(|r| r.derived.month)).ok_or_else(empty)?;
    let common_weekday =
        mode(records.iter().map(|r| weekday_name(r.derived.weekday))).ok_or_else(empty)?;
    let common_hour = mode(records.iter().map(|r| r.derived.hour)).ok_or_else(empty)?;

    Ok(TimeStats {
        common_month,
        common_weekday: common_weekday.to_string(),
        common_hour,
    })
}
