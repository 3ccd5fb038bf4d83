// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::Color;
use gigcal_core::{Event, TagConfig};

use crate::arg::OutputFormat;
use crate::table::{Column, Table};

/// Formats event lists as a table or as JSON.
#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    tags: TagConfig,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(tags: TagConfig, verbose: bool) -> Self {
        let columns = if verbose {
            vec![
                EventColumn::Id,
                EventColumn::Date,
                EventColumn::Name,
                EventColumn::Types,
                EventColumn::Place,
                EventColumn::City,
                EventColumn::Color,
            ]
        } else {
            vec![
                EventColumn::Id,
                EventColumn::Date,
                EventColumn::Name,
                EventColumn::Types,
                EventColumn::Place,
                EventColumn::City,
            ]
        };
        Self {
            columns,
            tags,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            OutputFormat::Table => {
                let columns: Vec<BoundColumn> = self
                    .formatter
                    .columns
                    .iter()
                    .map(|c| BoundColumn {
                        column: *c,
                        tags: &self.formatter.tags,
                    })
                    .collect();
                write!(f, "{}", Table::new(&columns, self.events))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum EventColumn {
    Id,
    Date,
    Name,
    Types,
    Place,
    City,
    Color,
}

/// A column with the tag vocabulary in scope, for category colors.
struct BoundColumn<'a> {
    column: EventColumn,
    tags: &'a TagConfig,
}

impl Column<Event> for BoundColumn<'_> {
    fn name(&self) -> &str {
        match self.column {
            EventColumn::Id => "Id",
            EventColumn::Date => "Date",
            EventColumn::Name => "Name",
            EventColumn::Types => "Types",
            EventColumn::Place => "Place",
            EventColumn::City => "City",
            EventColumn::Color => "Color",
        }
    }

    fn format(&self, event: &Event) -> String {
        match self.column {
            EventColumn::Id => event.id.chars().take(8).collect(),
            EventColumn::Date => event.date_string(),
            EventColumn::Name => event.name.clone(),
            EventColumn::Types => event
                .types
                .iter()
                .map(|t| t.as_ref())
                .collect::<Vec<&str>>()
                .join("、"),
            EventColumn::Place => event.place.clone(),
            EventColumn::City => event.city.clone(),
            EventColumn::Color => event.color.clone(),
        }
    }

    fn color(&self, event: &Event) -> Option<Color> {
        match self.column {
            EventColumn::Name => parse_hex_color(&event.color),
            EventColumn::Types => event
                .types
                .first()
                .and_then(|t| parse_hex_color(self.tags.color_of(*t))),
            _ => None,
        }
    }
}

/// `#RRGGBB` -> truecolor, `None` when malformed.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::TrueColor { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigcal_core::{Event, EventDraft, EventType};

    fn event() -> Event {
        let mut draft = EventDraft::new("2024-05-15".parse().unwrap());
        draft.name = "演唱会A".to_string();
        draft.types = vec![EventType::Live];
        draft.city = "上海".to_string();
        Event::from_draft(draft).unwrap()
    }

    #[test]
    fn test_table_output_contains_fields() {
        colored::control::set_override(false);

        let formatter = EventFormatter::new(TagConfig::default(), false);
        let out = formatter.format(&[event()]).to_string();

        assert!(out.contains("Date"));
        assert!(out.contains("2024-05-15"));
        assert!(out.contains("演唱会A"));
        assert!(out.contains("Live"));
        assert!(out.contains("上海"));
        assert!(!out.contains("#FF6B6B")); // color column only when verbose
    }

    #[test]
    fn test_verbose_adds_color_column() {
        colored::control::set_override(false);

        let formatter = EventFormatter::new(TagConfig::default(), true);
        let out = formatter.format(&[event()]).to_string();
        assert!(out.contains("#FF6B6B"));
    }

    #[test]
    fn test_json_output_is_parseable() {
        let formatter =
            EventFormatter::new(TagConfig::default(), false).with_output_format(OutputFormat::Json);
        let out = formatter.format(&[event()]).to_string();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "演唱会A");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF6B6B"),
            Some(Color::TrueColor {
                r: 0xFF,
                g: 0x6B,
                b: 0x6B
            })
        );
        assert_eq!(parse_hex_color("FF6B6B"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
    }
}
