//! Human-readable and JSON rendering of statistics and raw trips.

use anyhow::Result;
use chrono::Month;
use std::fmt::Write;
use tracing::debug;

use crate::analyzers::duration::{mean_duration, total_duration};
use crate::analyzers::report::Report;
use crate::analyzers::station::station_stats;
use crate::analyzers::time::time_stats;
use crate::analyzers::types::{Column, Counts};
use crate::analyzers::users::user_stats;
use crate::error::BikeshareError;
use crate::trips::TripSet;

/// Raw trips shown per page.
pub const PAGE_SIZE: usize = 5;

pub const RULE: &str = "----------------------------------------";

/// A titled statistics section renderer.
pub struct Section {
    pub title: &'static str,
    pub render: fn(&TripSet) -> String,
}

/// The report sections in display order.
pub const SECTIONS: [Section; 4] = [
    Section {
        title: "Calculating The Most Frequent Times of Travel...",
        render: time_section,
    },
    Section {
        title: "Calculating The Most Popular Stations and Trip...",
        render: station_section,
    },
    Section {
        title: "Calculating Trip Duration...",
        render: duration_section,
    },
    Section {
        title: "Calculating User Stats...",
        render: user_section,
    },
];

fn no_data(err: &BikeshareError) -> String {
    debug!(error = %err, "Statistic skipped");
    "No trips match this selection.\n".to_string()
}

fn month_label(number: u32) -> String {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| format!("{number} ({})", m.name()))
        .unwrap_or_else(|| number.to_string())
}

pub fn time_section(trips: &TripSet) -> String {
    match time_stats(trips) {
        Ok(stats) => format!(
            "The most common month was... {}\n\
             The most common day was... {}\n\
             The most common start hour was... {}\n",
            month_label(stats.common_month),
            stats.common_weekday,
            stats.common_hour
        ),
        Err(e) => no_data(&e),
    }
}

pub fn station_section(trips: &TripSet) -> String {
    match station_stats(trips) {
        Ok(stats) => format!(
            "The most common start station was... {}\n\
             The most common end station was... {}\n\
             The most common route was... {}\n",
            stats.common_start_station, stats.common_end_station, stats.common_route
        ),
        Err(e) => no_data(&e),
    }
}

pub fn duration_section(trips: &TripSet) -> String {
    let mut out = format!(
        "The total duration of trips is... {} seconds\n",
        total_duration(trips)
    );
    match mean_duration(trips) {
        Ok(mean) => {
            let _ = writeln!(out, "The average duration of trips is... {mean:.2} seconds");
        }
        Err(e) => out.push_str(&no_data(&e)),
    }
    out
}

/// Counts largest first, ties by name.
fn write_counts(out: &mut String, counts: &Counts) {
    if counts.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    let mut rows: Vec<_> = counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (value, count) in rows {
        let _ = writeln!(out, "  {value}: {count}");
    }
}

pub fn user_section(trips: &TripSet) -> String {
    let stats = user_stats(trips);
    let mut out = String::from("The user type breakdown is...\n");
    write_counts(&mut out, &stats.user_types);

    match &stats.gender {
        Some(counts) => {
            out.push_str("The gender breakdown is...\n");
            write_counts(&mut out, counts);
        }
        None => out.push_str("No gender data is available for this dataset.\n"),
    }

    match &stats.birth_years {
        Column::Available(years) => {
            let _ = writeln!(out, "The oldest user was born in... {}", years.oldest);
            let _ = writeln!(out, "The youngest user was born in... {}", years.youngest);
            let _ = writeln!(
                out,
                "The year the most common users were born in is... {}",
                years.most_common
            );
        }
        Column::Empty => out.push_str("No birth year data matches this selection.\n"),
        Column::Unavailable => out.push_str("No birth year data is available for this dataset.\n"),
    }
    out
}

/// Renders trips `[page * PAGE_SIZE, (page + 1) * PAGE_SIZE)` as JSON lines,
/// or `None` once the selection is exhausted.
pub fn raw_page(trips: &TripSet, page: usize) -> Result<Option<String>> {
    let start = page.saturating_mul(PAGE_SIZE);
    let Some(rows) = trips.records().get(start..) else {
        return Ok(None);
    };
    if rows.is_empty() {
        return Ok(None);
    }

    let mut out = String::new();
    for record in rows.iter().take(PAGE_SIZE) {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(Some(out))
}

/// Serializes a report as pretty-printed JSON.
pub fn report_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
