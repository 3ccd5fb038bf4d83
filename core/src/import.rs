// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parses uploaded CSV or JSON text back into validated events and merges
//! them into the store.
//!
//! Parsing and validation are separate passes: parsing only extracts raw
//! field strings, validation decides row by row what is importable and
//! reports the rest. A file that is neither usable CSV nor JSON fails as a
//! whole with a single error and nothing is applied.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use crate::event::{Event, EventType, is_valid_color};
use crate::event_store::EventStore;
use crate::export::CSV_HEADER;
use crate::{Error, Result};

/// Color given to imported events that do not carry one.
pub const FALLBACK_IMPORT_COLOR: &str = "#666666";

/// The legacy CSV header dialect (types before name) still accepted on import.
const CSV_HEADER_LEGACY: &str = "日期,类型,名称,地点,城市,颜色";

/// Supported import file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "csv" => Some(ImportFormat::Csv),
            "json" => Some(ImportFormat::Json),
            _ => None,
        }
    }
}

/// What to do with the existing collection on import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ImportMode {
    /// Union with the store; imported records win on date collision.
    #[default]
    Merge,

    /// Replace the entire store with the imported set.
    Overwrite,
}

/// Import options chosen by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub mode: ImportMode,

    /// Reject the whole batch if any row fails validation, instead of
    /// skipping the offending rows.
    pub strict: bool,
}

/// Outcome of an import: how many rows were applied, how many skipped, and
/// one message per offending row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    /// Whether any changes were applied to the store.
    pub applied: bool,

    pub imported: usize,
    pub skipped: usize,

    /// One human-readable message per skipped row, 1-based row numbers.
    pub errors: Vec<String>,
}

/// A parsed but not yet validated event row.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    /// 1-based data row number, for error messages.
    pub row: usize,

    pub id: Option<String>,
    pub date: String,
    pub name: String,
    pub types: Vec<String>,
    pub place: String,
    pub city: String,
    pub color: Option<String>,

    /// False when the source carried a `type` field that is not an array.
    pub types_is_list: bool,
}

/// Parses and validates `text`, then applies the surviving events to the
/// store per the chosen mode. Returns the row-level report; fails wholesale
/// only when the file itself is unusable.
pub fn import(
    store: &EventStore,
    text: &str,
    format: ImportFormat,
    options: &ImportOptions,
) -> Result<ImportReport> {
    let records = match format {
        ImportFormat::Csv => parse_csv(text)?,
        ImportFormat::Json => parse_json(text)?,
    };

    let (events, errors) = validate(&records);
    let skipped = records.len() - events.len();

    if options.strict && !errors.is_empty() {
        tracing::debug!(skipped, "strict import rejected");
        return Ok(ImportReport {
            applied: false,
            imported: 0,
            skipped,
            errors,
        });
    }

    let imported = events.len();
    if imported > 0 {
        let combined = match options.mode {
            ImportMode::Overwrite => dedupe_by_date(events),
            ImportMode::Merge => {
                let imported_events = dedupe_by_date(events);
                let dates: HashSet<_> = imported_events.iter().map(|e| e.date).collect();
                let mut combined: Vec<Event> = store
                    .all()
                    .into_iter()
                    .filter(|e| !dates.contains(&e.date))
                    .collect();
                combined.extend(imported_events);
                combined
            }
        };
        // replace_all re-sorts by date ascending
        store.replace_all(combined)?;
    }

    Ok(ImportReport {
        applied: imported > 0,
        imported,
        skipped,
        errors,
    })
}

/// Validates raw records row by row: events that pass come back converted,
/// everything else contributes one error message. This step is independent
/// of where the rows were parsed from.
pub fn validate(records: &[RawRecord]) -> (Vec<Event>, Vec<String>) {
    let mut events = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for record in records {
        match validate_record(record) {
            Ok(event) => events.push(event),
            Err(mut errs) => errors.append(&mut errs),
        }
    }

    (events, errors)
}

fn validate_record(record: &RawRecord) -> std::result::Result<Event, Vec<String>> {
    let row = record.row;
    let mut errors = Vec::new();

    let date = match record.date.parse::<NaiveDate>() {
        Ok(date) if is_canonical_date(&record.date) => Some(date),
        _ => {
            errors.push(format!(
                "row {row}: invalid date '{}', expected YYYY-MM-DD",
                record.date
            ));
            None
        }
    };

    let name = record.name.trim();
    if name.is_empty() {
        errors.push(format!("row {row}: event name must not be empty"));
    }

    let mut types = Vec::new();
    if record.types_is_list {
        for label in &record.types {
            match label.parse::<EventType>() {
                Ok(t) if !types.contains(&t) => types.push(t),
                Ok(_) => {}
                Err(()) => errors.push(format!("row {row}: unknown event type '{label}'")),
            }
        }
    } else {
        errors.push(format!("row {row}: event types must be a list"));
    }

    let color = match &record.color {
        Some(color) if !is_valid_color(color) => {
            errors.push(format!(
                "row {row}: invalid color '{color}', expected #RRGGBB"
            ));
            None
        }
        Some(color) => Some(color.clone()),
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Event {
        id: record
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        date: date.expect("validated above"),
        types,
        name: name.to_string(),
        place: record.place.trim().to_string(),
        city: record.city.trim().to_string(),
        color: color.unwrap_or_else(|| FALLBACK_IMPORT_COLOR.to_string()),
    })
}

/// Parses CSV text. The first row is always the header; the canonical and
/// legacy header dialects map columns by name, anything else falls back to
/// the canonical column positions.
pub fn parse_csv(text: &str) -> Result<Vec<RawRecord>> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::UnrecognizedImport(format!("bad CSV: {e}")))?;
        rows.push(record);
    }

    let Some((header, data)) = rows.split_first() else {
        return Err(Error::UnrecognizedImport("empty CSV file".to_string()));
    };

    let columns = Columns::from_header(header);
    tracing::debug!(rows = data.len(), ?columns, "parsed CSV import");

    Ok(data
        .iter()
        .enumerate()
        .map(|(i, record)| columns.extract(i + 1, record))
        .collect())
}

/// Column indices for the six CSV fields.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    name: usize,
    types: usize,
    place: usize,
    city: usize,
    color: usize,
}

impl Columns {
    /// Canonical order: date, name, types, place, city, color.
    const CANONICAL: Columns = Columns {
        date: 0,
        name: 1,
        types: 2,
        place: 3,
        city: 4,
        color: 5,
    };

    /// Legacy order: date, types, name, place, city, color.
    const LEGACY: Columns = Columns {
        date: 0,
        name: 2,
        types: 1,
        place: 3,
        city: 4,
        color: 5,
    };

    fn from_header(header: &csv::StringRecord) -> Columns {
        let cells: Vec<&str> = header.iter().map(str::trim).collect();
        if cells == CSV_HEADER_LEGACY.split(',').collect::<Vec<_>>() {
            Columns::LEGACY
        } else {
            // canonical header, or unrecognized: use canonical positions
            if cells != CSV_HEADER.split(',').collect::<Vec<_>>() {
                tracing::debug!(?cells, "unrecognized CSV header, assuming canonical order");
            }
            Columns::CANONICAL
        }
    }

    fn extract(&self, row: usize, record: &csv::StringRecord) -> RawRecord {
        let cell = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        let color = cell(self.color);
        RawRecord {
            row,
            id: None,
            date: cell(self.date),
            name: cell(self.name),
            types: split_types(&cell(self.types)),
            place: cell(self.place),
            city: cell(self.city),
            color: (!color.is_empty()).then_some(color),
            types_is_list: true,
        }
    }
}

/// Parses JSON text: either a bare event array or an `{ "events": [...] }`
/// envelope.
pub fn parse_json(text: &str) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::UnrecognizedImport(format!("bad JSON: {e}")))?;

    let items = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("events") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                return Err(Error::UnrecognizedImport(
                    "expected an event array or an {\"events\": [...]} envelope".to_string(),
                ));
            }
        },
        _ => {
            return Err(Error::UnrecognizedImport(
                "expected an event array or an {\"events\": [...]} envelope".to_string(),
            ));
        }
    };

    tracing::debug!(rows = items.len(), "parsed JSON import");
    Ok(items
        .iter()
        .enumerate()
        .map(|(i, item)| json_record(i + 1, item))
        .collect())
}

fn json_record(row: usize, item: &Value) -> RawRecord {
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };

    let (types, types_is_list) = match item.get("type").or_else(|| item.get("types")) {
        None | Some(Value::Null) => (Vec::new(), true),
        Some(Value::Array(labels)) => (
            labels
                .iter()
                .map(|l| l.as_str().map_or_else(|| l.to_string(), str::to_string))
                .collect(),
            true,
        ),
        Some(_) => (Vec::new(), false),
    };

    let place = match item.get("place") {
        Some(Value::String(s)) => s.clone(),
        _ => text("location"),
    };
    let color = text("color");

    RawRecord {
        row,
        id: item
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string),
        date: text("date"),
        name: text("name"),
        types,
        place,
        city: text("city"),
        color: (!color.is_empty()).then_some(color),
        types_is_list,
    }
}

/// Splits a CSV type cell on the canonical `、` separator; the legacy `;`
/// separator is still accepted.
fn split_types(cell: &str) -> Vec<String> {
    cell.split(['、', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `YYYY-MM-DD` with exactly four/two/two digits; `NaiveDate::parse` alone
/// also accepts e.g. `2024-5-1`.
fn is_canonical_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
}

fn dedupe_by_date(events: Vec<Event>) -> Vec<Event> {
    // last record for a date wins, like repeated upserts would behave
    let mut deduped: Vec<Event> = Vec::with_capacity(events.len());
    for event in events {
        deduped.retain(|e| e.date != event.date);
        deduped.push(event);
    }
    deduped
}
