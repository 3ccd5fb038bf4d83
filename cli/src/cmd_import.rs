// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use gigcal_core::{Gigcal, ImportFormat, ImportMode, ImportOptions};

/// Import events from a CSV or JSON file.
#[derive(Debug, Clone)]
pub struct CmdImport {
    pub file: PathBuf,
    pub format: Option<ImportFormat>,
    pub mode: ImportMode,
    pub strict: bool,
}

impl CmdImport {
    pub const NAME: &str = "import";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Import events from a CSV or JSON file")
            .arg(
                arg!(file: <FILE> "The file to import")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                arg!(--format <FORMAT> "File format, guessed from the extension when omitted")
                    .value_parser(value_parser!(ImportFormat)),
            )
            .arg(
                arg!(--mode <MODE> "How to combine with the existing events")
                    .value_parser(value_parser!(ImportMode))
                    .default_value("merge"),
            )
            .arg(arg!(--strict "Reject the whole file if any row fails validation"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: matches
                .get_one::<PathBuf>("file")
                .expect("file is required")
                .clone(),
            format: matches.get_one("format").copied(),
            mode: matches.get_one("mode").copied().unwrap_or_default(),
            strict: matches.get_flag("strict"),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "importing events...");
        let format = match self.format {
            Some(format) => format,
            None => ImportFormat::from_path(&self.file).ok_or_else(|| {
                format!(
                    "Cannot guess the format of {}; pass --format csv or --format json",
                    self.file.display()
                )
            })?,
        };

        let text = fs::read_to_string(&self.file)
            .map_err(|e| format!("Failed to read {}: {}", self.file.display(), e))?;

        let options = ImportOptions {
            mode: self.mode,
            strict: self.strict,
        };
        let report = gigcal.import(&text, format, &options)?;

        for error in &report.errors {
            println!("{} {error}", "Skipped:".yellow());
        }
        if report.applied {
            println!("Imported {} event(s), skipped {}", report.imported, report.skipped);
        } else {
            println!(
                "{} nothing imported ({} row(s) failed validation)",
                "Rejected:".red(),
                report.errors.len()
            );
        }
        Ok(())
    }
}
