// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Serializes a filtered event collection to CSV or JSON text.
//!
//! Both formats are external contracts: spreadsheet apps rely on the CSV
//! header, column order, quoting, and BOM; the JSON envelope is what the
//! importer of other instances expects.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Event, Result};

/// CSV header row: date, event name, types, place, city, color.
pub const CSV_HEADER: &str = "日期,事件名称,类型,地点,城市,颜色";

/// Separator joining multiple category labels in one CSV field.
pub const TYPE_SEPARATOR: &str = "、";

/// Localized filename prefix for exported files.
pub const EXPORT_FILE_PREFIX: &str = "演出日历";

/// Version stamped into JSON envelopes.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Inclusive `YYYY-MM` month range an export was filtered by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRange {
    #[serde(rename = "startMonth")]
    pub start_month: String,

    #[serde(rename = "endMonth")]
    pub end_month: String,
}

impl MonthRange {
    pub fn new(start_month: &str, end_month: &str) -> Self {
        Self {
            start_month: start_month.to_string(),
            end_month: end_month.to_string(),
        }
    }
}

/// The JSON export envelope. Importers accept both this and a bare event
/// array; new exports always produce the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub events: Vec<Event>,

    #[serde(rename = "dateRange")]
    pub date_range: MonthRange,

    /// RFC 3339 UTC timestamp of the export.
    #[serde(rename = "exportDate")]
    pub export_date: String,

    pub version: String,
}

/// Renders events as CSV text with the contract header and quoting, BOM
/// prefixed. An empty collection is an error: no file should be produced.
pub fn to_csv(events: &[Event]) -> Result<String> {
    if events.is_empty() {
        return Err(Error::NothingToExport);
    }

    let mut out = String::from('\u{FEFF}');
    out.push_str(CSV_HEADER);
    for event in events {
        let types = event
            .types
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<&str>>()
            .join(TYPE_SEPARATOR);

        // name/type/place/city are quoted unconditionally so embedded
        // commas and quotes survive; date and color never contain either.
        out.push('\n');
        out.push_str(&event.date_string());
        out.push(',');
        out.push_str(&quote(&event.name));
        out.push(',');
        out.push_str(&quote(&types));
        out.push(',');
        out.push_str(&quote(&event.place));
        out.push(',');
        out.push_str(&quote(&event.city));
        out.push(',');
        out.push_str(&event.color);
    }
    out.push('\n');
    Ok(out)
}

/// Renders events as the JSON envelope. `exported_at` is injected by the
/// caller; this function never reads the wall clock.
pub fn to_json(
    events: &[Event],
    range: &MonthRange,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    if events.is_empty() {
        return Err(Error::NothingToExport);
    }

    let envelope = ExportEnvelope {
        events: events.to_vec(),
        date_range: range.clone(),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: EXPORT_VERSION.to_string(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Filename for a CSV export of the given range.
pub fn csv_filename(range: &MonthRange) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}_{}_{}.csv",
        range.start_month, range.end_month
    )
}

/// Filename for a JSON export of the given range.
pub fn json_filename(range: &MonthRange) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}_{}_{}.json",
        range.start_month, range.end_month
    )
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
