// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Month-grid generation: a `YYYY-MM` month maps to a fixed 6x7 grid of
//! day cells, padded with days from the adjacent months.

use chrono::{Datelike, Days, NaiveDate};

use crate::{Error, Event, Result};

/// Number of cells in a month grid: 6 rows of 7 days, Monday first.
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    /// Day of month, 1-based.
    pub day: u32,

    /// The cell's own year, which may differ from the requested month's.
    pub year: i32,

    /// The cell's own month (1-based), which may differ from the requested one.
    pub month: u32,

    /// The cell's date.
    pub date: NaiveDate,

    /// Whether the cell belongs to the requested month.
    pub is_current_month: bool,

    /// Whether the cell is the caller-supplied "today".
    pub is_today: bool,

    /// Events whose date matches this cell.
    pub events: Vec<Event>,
}

impl DayCell {
    /// The canonical `YYYY-MM-DD` form of the cell date.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Generates the 42-cell grid for a month.
///
/// The grid starts on the Monday on or before the 1st (weekdays are
/// remapped so Monday=0 .. Sunday=6) and runs 42 consecutive days, so
/// leading cells come from the previous month and trailing cells from the
/// immediately following one. `today` is injected by the caller; the
/// function never reads the wall clock.
pub fn month_grid(
    year: i32,
    month: u32,
    events: &[Event],
    today: NaiveDate,
) -> Result<Vec<DayCell>> {
    let first = first_of_month(year, month)?;
    let offset = first.weekday().num_days_from_monday(); // Monday=0 .. Sunday=6
    let start = first
        .checked_sub_days(Days::new(offset.into()))
        .ok_or_else(|| Error::InvalidMonth(format!("{year:04}-{month:02}")))?;

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for i in 0..GRID_CELLS {
        let date = start
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| Error::InvalidMonth(format!("{year:04}-{month:02}")))?;
        cells.push(DayCell {
            day: date.day(),
            year: date.year(),
            month: date.month(),
            date,
            is_current_month: date.year() == year && date.month() == month,
            is_today: date == today,
            events: events.iter().filter(|e| e.date == date).cloned().collect(),
        });
    }

    Ok(cells)
}

/// Number of days in a month, from the calendar itself.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let (ny, nm) = next_month(year, month);
    let next_first = first_of_month(ny, nm)?;
    next_first
        .pred_opt()
        .map(|d| d.day())
        .ok_or_else(|| Error::InvalidMonth(format!("{year:04}-{month:02}")))
}

/// The month before `(year, month)`, with year rollover.
pub const fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// The month after `(year, month)`, with year rollover.
pub const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// Parses a `YYYY-MM` month string.
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let err = || Error::InvalidMonth(s.to_string());

    let (y, m) = s.split_once('-').ok_or_else(err)?;
    if y.len() != 4 || m.len() != 2 {
        return Err(err());
    }
    let year: i32 = y.parse().map_err(|_| err())?;
    let month: u32 = m.parse().map_err(|_| err())?;
    if !(1..=12).contains(&month) {
        return Err(err());
    }
    Ok((year, month))
}

/// Formats a month as the canonical `YYYY-MM` string.
pub fn format_month(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// Display label for a month, e.g. `2024年5月`.
pub fn month_label(year: i32, month: u32) -> String {
    format!("{year}年{month}月")
}

/// All `YYYY-MM` months in an inclusive range.
pub fn months_in_range(start_month: &str, end_month: &str) -> Result<Vec<String>> {
    let (mut year, mut month) = parse_month(start_month)?;
    let (end_year, end_month) = parse_month(end_month)?;

    let mut months = Vec::new();
    while (year, month) <= (end_year, end_month) {
        months.push(format_month(year, month));
        (year, month) = next_month(year, month);
    }
    Ok(months)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidMonth(format!("{year:04}-{month:02}")))
}
