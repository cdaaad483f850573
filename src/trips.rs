//! Trip records, their derived calendar fields, and the immutable [`TripSet`].

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::filters::{MonthFilter, WeekdayFilter};
use crate::parser::parse_timestamp;

pub const COL_START_TIME: &str = "Start Time";
pub const COL_END_TIME: &str = "End Time";
pub const COL_TRIP_DURATION: &str = "Trip Duration";
pub const COL_GENDER: &str = "Gender";
pub const COL_BIRTH_YEAR: &str = "Birth Year";

/// Longest accepted trip, in seconds.
pub const MAX_TRIP_DURATION_SECS: f64 = u32::MAX as f64;

/// A single CSV row as written by the city exports.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // Exports write years as floats, e.g. "1992.0".
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Calendar fields computed once from `start_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedFields {
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl DerivedFields {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        Self {
            month: ts.month(),
            weekday: ts.weekday(),
            hour: ts.hour(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    /// Whole seconds.
    pub trip_duration: u64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    #[serde(flatten)]
    pub derived: DerivedFields,
}

impl TripRecord {
    /// Normalizes a raw row. `row` is 1-based, excluding the header.
    fn from_raw(raw: RawTrip, row: usize) -> Result<Self> {
        let start_time =
            parse_timestamp(&raw.start_time).map_err(|_| BikeshareError::MalformedInput {
                row,
                column: COL_START_TIME,
                value: raw.start_time.clone(),
            })?;

        if !(0.0..=MAX_TRIP_DURATION_SECS).contains(&raw.trip_duration) {
            return Err(BikeshareError::MalformedInput {
                row,
                column: COL_TRIP_DURATION,
                value: raw.trip_duration.to_string(),
            });
        }

        let birth_year = match raw.birth_year {
            Some(year)
                if year.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&year) =>
            {
                Some(year as i32)
            }
            Some(year) => {
                return Err(BikeshareError::MalformedInput {
                    row,
                    column: COL_BIRTH_YEAR,
                    value: year.to_string(),
                });
            }
            None => None,
        };

        Ok(Self {
            derived: DerivedFields::from_timestamp(&start_time),
            start_time,
            end_time: blank_to_none(raw.end_time),
            trip_duration: raw.trip_duration.round() as u64,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: blank_to_none(raw.user_type),
            gender: blank_to_none(raw.gender),
            birth_year,
        })
    }

    /// `"{start} to {end}"`, the value used for route statistics.
    pub fn route(&self) -> String {
        format!("{} to {}", self.start_station, self.end_station)
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Which optional columns a dataset carries, taken from its header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_end_time: bool,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h.trim() == name);
        Self {
            has_end_time: has(COL_END_TIME),
            has_gender: has(COL_GENDER),
            has_birth_year: has(COL_BIRTH_YEAR),
        }
    }
}

/// An ordered, immutable set of trips sharing one [`Schema`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSet {
    schema: Schema,
    records: Vec<TripRecord>,
}

impl TripSet {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Self { schema, records }
    }

    /// Decodes a whole CSV export. Any bad row fails the entire read.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let schema = Schema::from_headers(rdr.headers()?);
        debug!(?schema, "Read trip file headers");

        let mut records = Vec::new();
        for (i, result) in rdr.deserialize::<RawTrip>().enumerate() {
            records.push(TripRecord::from_raw(result?, i + 1)?);
        }

        Ok(Self { schema, records })
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a new set holding only the matching trips, in original order.
    pub fn filtered(&self, month: MonthFilter, weekday: WeekdayFilter) -> TripSet {
        let records = self
            .records
            .iter()
            .filter(|r| month.matches(r.derived.month) && weekday.matches(r.derived.weekday))
            .cloned()
            .collect();
        TripSet {
            schema: self.schema,
            records,
        }
    }
}
