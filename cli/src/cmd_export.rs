// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use gigcal_core::Gigcal;

use crate::arg::RangeArgs;
use crate::util::parse_month;

/// File format to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Export events of a month range to a CSV or JSON file.
#[derive(Debug, Clone)]
pub struct CmdExport {
    pub format: ExportFormat,
    pub start: Option<String>,
    pub end: Option<String>,
    pub dir: Option<PathBuf>,
}

impl CmdExport {
    pub const NAME: &str = "export";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Export events to a CSV or JSON file")
            .arg(
                arg!(--format <FORMAT> "File format")
                    .value_parser(value_parser!(ExportFormat))
                    .default_value("csv"),
            )
            .arg(RangeArgs::start())
            .arg(RangeArgs::end())
            .arg(
                arg!(--dir <DIR> "Directory to write the file into, defaults to the current one")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::DirPath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            format: matches
                .get_one("format")
                .copied()
                .unwrap_or(ExportFormat::Csv),
            start: RangeArgs::get_start(matches),
            end: RangeArgs::get_end(matches),
            dir: matches.get_one("dir").cloned(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "exporting events...");
        let (year, month) = gigcal.current_month();
        let current = gigcal_core::grid::format_month(year, month);
        let start = self.start.as_deref().unwrap_or(&current);
        let end = self.end.as_deref().unwrap_or(&current);
        parse_month(start)?;
        parse_month(end)?;

        let (filename, content) = match self.format {
            ExportFormat::Csv => gigcal.export_csv(start, end)?,
            ExportFormat::Json => gigcal.export_json(start, end)?,
        };

        let path = self.dir.unwrap_or_default().join(filename);
        fs::write(&path, content)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        println!("Exported to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    #[test]
    fn test_parse_export_defaults() {
        let cmd = Command::new("test").subcommand(CmdExport::command());
        let matches = cmd.try_get_matches_from(["test", "export"]).unwrap();
        let sub_matches = matches.subcommand_matches("export").unwrap();
        let parsed = CmdExport::from(sub_matches);

        assert_eq!(parsed.format, ExportFormat::Csv);
        assert_eq!(parsed.start, None);
        assert_eq!(parsed.end, None);
        assert_eq!(parsed.dir, None);
    }

    #[test]
    fn test_parse_export_json_range() {
        let cmd = Command::new("test").subcommand(CmdExport::command());
        let matches = cmd
            .try_get_matches_from([
                "test", "export", "--format", "json", "--start", "2024-01", "--end", "2024-12",
                "--dir", "/tmp",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("export").unwrap();
        let parsed = CmdExport::from(sub_matches);

        assert_eq!(parsed.format, ExportFormat::Json);
        assert_eq!(parsed.start.as_deref(), Some("2024-01"));
        assert_eq!(parsed.end.as_deref(), Some("2024-12"));
        assert_eq!(parsed.dir, Some(PathBuf::from("/tmp")));
    }
}
