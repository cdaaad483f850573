//! Descriptive statistics over a filtered [`TripSet`](crate::trips::TripSet).
//!
//! Each group (travel times, stations, durations, users) is computed
//! independently from a shared read-only set; [`report`] bundles them for
//! one filter selection.

pub mod duration;
pub mod report;
pub mod station;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;
