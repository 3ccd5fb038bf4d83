// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use gigcal_core::Gigcal;

use crate::month_view;
use crate::util::parse_month;

/// Show the month grid. This is also the default command.
#[derive(Debug, Clone, Default)]
pub struct CmdMonth {
    /// `YYYY-MM` month to show; the current month when absent.
    pub month: Option<String>,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Show the month grid")
            .arg(arg!(month: [MONTH] "Month to show (YYYY-MM), defaults to the current month"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            month: matches.get_one("month").cloned(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing month grid...");
        let (year, month) = match &self.month {
            Some(month) => parse_month(month)?,
            None => gigcal.current_month(),
        };

        let cells = gigcal.month_view(year, month)?;
        let tags = gigcal.tags().get();
        print!("{}", month_view::render(year, month, &cells, &tags));
        Ok(())
    }
}
