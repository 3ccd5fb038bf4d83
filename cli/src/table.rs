// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use colored::{Color, Colorize};
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// A plain-text column table. Padding is computed on display width, so
/// CJK cells line up.
pub struct Table<'a, T, C: Column<T>> {
    pub columns: &'a [C],
    pub separator: &'a str,
    pub data: &'a [T],
}

pub trait Column<T> {
    /// Column header label.
    fn name(&self) -> &str;

    /// Cell content for one row.
    fn format(&self, data: &T) -> String;

    /// Optional cell color.
    fn color(&self, data: &T) -> Option<Color>;
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            separator: "  ",
            data,
        }
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.columns.iter().map(|c| c.name().to_string()).collect();
        let rows: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|c| c.format(row)).collect())
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let last = self.columns.len().saturating_sub(1);
        for (i, cell) in header.iter().enumerate() {
            let cell = pad(cell, widths[i], i == last);
            write!(f, "{}", cell.bold())?;
            write!(f, "{}", if i < last { self.separator } else { "\n" })?;
        }

        for (row, data) in rows.iter().zip(self.data) {
            for (i, cell) in row.iter().enumerate() {
                let cell = pad(cell, widths[i], i == last);
                match self.columns[i].color(data) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                write!(f, "{}", if i < last { self.separator } else { "\n" })?;
            }
        }

        Ok(())
    }
}

/// Pads with spaces up to `width` display columns; the last column is left
/// ragged.
fn pad(cell: &str, width: usize, is_last: bool) -> String {
    if is_last {
        return cell.to_string();
    }
    let padding = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(padding))
}
