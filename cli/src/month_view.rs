// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use colored::Colorize;
use gigcal_core::{DayCell, TagConfig, grid};
use unicode_width::UnicodeWidthStr;

use crate::event_formatter::parse_hex_color;

/// Renders the 42-cell month grid as plain text.
///
/// Day numbers from adjacent months are dimmed, today is highlighted, and
/// each event adds a dot in its first category's color.
pub fn render(year: i32, month: u32, cells: &[DayCell], tags: &TagConfig) -> String {
    const CELL_WIDTH: usize = 6;
    const WEEKDAYS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];

    let mut out = String::new();

    let label = grid::month_label(year, month);
    let total = CELL_WIDTH * 7;
    let indent = total.saturating_sub(label.width()) / 2;
    let _ = writeln!(out, "{}{}", " ".repeat(indent), label.bold());

    for day in WEEKDAYS {
        let _ = write!(out, "{}", pad(day, CELL_WIDTH));
    }
    out.push('\n');

    for week in cells.chunks(7) {
        for cell in week {
            let mut text = format!("{:>2}", cell.day);
            for _ in &cell.events {
                text.push('•');
            }

            let styled = if cell.is_today {
                text.clone().bold().reversed().to_string()
            } else if !cell.is_current_month {
                text.clone().bright_black().to_string()
            } else if let Some(color) = cell
                .events
                .first()
                .and_then(|e| e.types.first())
                .and_then(|t| parse_hex_color(tags.color_of(*t)))
                .or_else(|| cell.events.first().and_then(|e| parse_hex_color(&e.color)))
            {
                text.clone().color(color).to_string()
            } else {
                text.clone()
            };

            // pad on the unstyled text, ANSI codes have no width
            let padding = CELL_WIDTH.saturating_sub(text.width());
            let _ = write!(out, "{styled}{}", " ".repeat(padding));
        }
        out.push('\n');
    }

    out
}

fn pad(s: &str, width: usize) -> String {
    format!("{s}{}", " ".repeat(width.saturating_sub(s.width())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gigcal_core::{Event, EventDraft, EventType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn test_render_shape() {
        colored::control::set_override(false);

        let cells = grid::month_grid(2024, 5, &[], today()).unwrap();
        let out = render(2024, 5, &cells, &TagConfig::default());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8); // title + weekday header + 6 weeks
        assert!(lines[0].contains("2024年5月"));
        assert!(lines[1].starts_with("一"));
        // May 2024 starts on a Wednesday: the row holds Apr 29, 30, then May 1
        assert!(lines[2].contains("29"));
        assert!(lines[2].contains(" 1"));
    }

    #[test]
    fn test_render_marks_events() {
        colored::control::set_override(false);

        let mut draft = EventDraft::new(today());
        draft.name = "演唱会A".to_string();
        draft.types = vec![EventType::Live];
        let event = Event::from_draft(draft).unwrap();

        let cells = grid::month_grid(2024, 5, std::slice::from_ref(&event), today()).unwrap();
        let out = render(2024, 5, &cells, &TagConfig::default());
        assert!(out.contains("15•"));
    }
}
