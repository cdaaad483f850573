use crate::analyzers::types::{BirthYearStats, Column, Counts, UserStats};
use crate::analyzers::utility::{mode, value_counts};
use crate::error::{BikeshareError, Result};
use crate::trips::{COL_BIRTH_YEAR, COL_GENDER, TripSet};

/// Count per user type. Trips with a blank user type are not counted.
pub fn user_type_counts(trips: &TripSet) -> Counts {
    value_counts(trips.records().iter().filter_map(|r| r.user_type.as_deref()))
}

/// Count per gender, or `None` when the dataset has no gender column.
fn gender_column(trips: &TripSet) -> Option<Counts> {
    trips.schema().has_gender.then(|| {
        value_counts(trips.records().iter().filter_map(|r| r.gender.as_deref()))
    })
}

/// Count per gender, or [`BikeshareError::OptionalColumnUnavailable`] when
/// the dataset has no gender column.
pub fn gender_counts(trips: &TripSet) -> Result<Counts> {
    gender_column(trips).ok_or(BikeshareError::OptionalColumnUnavailable { column: COL_GENDER })
}

fn birth_year_column(trips: &TripSet) -> Column<BirthYearStats> {
    if !trips.schema().has_birth_year {
        return Column::Unavailable;
    }

    let years: Vec<i32> = trips.records().iter().filter_map(|r| r.birth_year).collect();
    let (Some(oldest), Some(youngest), Some(most_common)) = (
        years.iter().copied().min(),
        years.iter().copied().max(),
        mode(years.iter().copied()),
    ) else {
        return Column::Empty;
    };

    Column::Available(BirthYearStats {
        oldest,
        youngest,
        most_common,
    })
}

/// Earliest, latest and most common birth year over the trips that have one.
pub fn birth_year_stats(trips: &TripSet) -> Result<BirthYearStats> {
    match birth_year_column(trips) {
        Column::Available(stats) => Ok(stats),
        Column::Empty => Err(BikeshareError::EmptyInput {
            statistic: "birth year statistics",
        }),
        Column::Unavailable => Err(BikeshareError::OptionalColumnUnavailable {
            column: COL_BIRTH_YEAR,
        }),
    }
}

pub fn user_stats(trips: &TripSet) -> UserStats {
    UserStats {
        user_types: user_type_counts(trips),
        gender: gender_column(trips),
        birth_years: birth_year_column(trips),
    }
}
