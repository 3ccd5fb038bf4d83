// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use gigcal_core::Gigcal;

/// Show the current settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmdSettingsShow;

impl CmdSettingsShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show the current settings")
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        let settings = gigcal.settings().get();
        println!("font: {}", settings.font);
        println!("menu collapsed: {}", settings.menu_collapsed);
        println!("version: {}", settings.version);
        Ok(())
    }
}

/// Set the display font.
#[derive(Debug, Clone)]
pub struct CmdSettingsFont {
    pub font: String,
}

impl CmdSettingsFont {
    pub const NAME: &str = "font";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Set the display font")
            .arg(arg!(font: <FONT> "Font identifier, or 'system'"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            font: matches
                .get_one::<String>("font")
                .expect("font is required")
                .clone(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "setting font...");
        gigcal.settings().set_font(&self.font)?;
        println!("Font set to {}", self.font);
        Ok(())
    }
}

/// Collapse or expand the menu.
#[derive(Debug, Clone)]
pub struct CmdSettingsMenu {
    pub collapsed: bool,
}

impl CmdSettingsMenu {
    pub const NAME: &str = "menu";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Collapse or expand the menu")
            .arg(
                arg!(state: <STATE> "The menu state")
                    .value_parser(["collapsed", "expanded"]),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            collapsed: matches
                .get_one::<String>("state")
                .map(|s| s == "collapsed")
                .expect("state is required"),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        gigcal.settings().set_menu_collapsed(self.collapsed)?;
        Ok(())
    }
}

/// Reset the settings to the defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmdSettingsReset;

impl CmdSettingsReset {
    pub const NAME: &str = "reset";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Reset the settings to the defaults")
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        gigcal.settings().reset()?;
        println!("Settings reset to defaults");
        Ok(())
    }
}

/// Remove all persisted data: events, tags, and settings.
#[derive(Debug, Clone, Copy)]
pub struct CmdClearData {
    pub yes: bool,
}

impl CmdClearData {
    pub const NAME: &str = "clear-data";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Remove all persisted data: events, tags, and settings")
            .arg(arg!(--yes "Skip the confirmation"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            yes: matches.get_flag("yes"),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        if !self.yes {
            println!(
                "{} this removes every event, tag, and setting. Re-run with --yes to confirm.",
                "Warning:".yellow()
            );
            return Ok(());
        }

        gigcal.clear_all()?;
        println!("All data cleared");
        Ok(())
    }
}
