//! Month and weekday filters, and the validated [`FilterSpec`] triple.

use chrono::{Month, Weekday};
use std::fmt;
use std::str::FromStr;

use crate::config::CityCatalog;
use crate::error::BikeshareError;

/// The months covered by the trip datasets, in calendar order.
pub const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full title-cased English name, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// 1-based month number, or `None` for [`MonthFilter::All`].
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Only(month) => Some(month.number_from_month()),
        }
    }

    pub fn matches(&self, month: u32) -> bool {
        self.number().is_none_or(|wanted| wanted == month)
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(Self::All);
        }
        MONTHS
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(&wanted))
            .map(|m| Self::Only(*m))
            .ok_or(BikeshareError::InvalidMonth(wanted))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(month) => write!(f, "{}", month.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayFilter {
    All,
    Only(Weekday),
}

impl WeekdayFilter {
    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == day,
        }
    }
}

impl FromStr for WeekdayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(Self::All);
        }
        // chrono's own parser also takes "mon"; only full names are valid here.
        WEEKDAYS
            .iter()
            .find(|d| weekday_name(**d).eq_ignore_ascii_case(&wanted))
            .map(|d| Self::Only(*d))
            .ok_or(BikeshareError::InvalidWeekday(wanted))
    }
}

impl fmt::Display for WeekdayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(day) => write!(f, "{}", weekday_name(*day)),
        }
    }
}

/// The (city, month, weekday) selection for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: String,
    pub month: MonthFilter,
    pub weekday: WeekdayFilter,
}

impl FilterSpec {
    /// Validates raw user input against the catalog and the month/weekday sets.
    pub fn parse(
        catalog: &CityCatalog,
        city: &str,
        month: &str,
        weekday: &str,
    ) -> Result<Self, BikeshareError> {
        let (city, _) = catalog.resolve(city)?;
        Ok(Self {
            city: city.to_string(),
            month: month.parse()?,
            weekday: weekday.parse()?,
        })
    }
}
