// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use gigcal_core::{APP_NAME, Gigcal};

use crate::cmd_backup::{CmdBackup, CmdRestore};
use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew};
use crate::cmd_export::CmdExport;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_import::CmdImport;
use crate::cmd_month::CmdMonth;
use crate::cmd_settings::{
    CmdClearData, CmdSettingsFont, CmdSettingsMenu, CmdSettingsReset, CmdSettingsShow,
};
use crate::cmd_tag::{CmdTagCity, CmdTagColor, CmdTagList, CmdTagPlace, CmdTagReset};
use crate::config::parse_config;

/// Run the gigcal command-line interface.
pub fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run() {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("A personal event calendar for gigs, meals, trips and workouts.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to the month grid
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/gigcal/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/gigcal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdMonth::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command())
                    .subcommand(CmdEventList::command()),
            )
            .subcommand(
                Command::new("tag")
                    .alias("t")
                    .about("Manage the tag vocabulary")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTagList::command())
                    .subcommand(CmdTagColor::command())
                    .subcommand(CmdTagPlace::command())
                    .subcommand(CmdTagCity::command())
                    .subcommand(CmdTagReset::command()),
            )
            .subcommand(CmdExport::command())
            .subcommand(CmdImport::command())
            .subcommand(CmdBackup::command())
            .subcommand(CmdRestore::command())
            .subcommand(
                Command::new("settings")
                    .about("Manage the settings")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdSettingsShow::command())
                    .subcommand(CmdSettingsFont::command())
                    .subcommand(CmdSettingsMenu::command())
                    .subcommand(CmdSettingsReset::command())
                    .subcommand(CmdClearData::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => EventDelete(CmdEventDelete::from(matches)),
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                _ => unreachable!(),
            },
            Some(("tag", matches)) => match matches.subcommand() {
                Some((CmdTagList::NAME, _)) => TagList(CmdTagList),
                Some((CmdTagColor::NAME, matches)) => TagColor(CmdTagColor::from(matches)),
                Some((CmdTagPlace::NAME, matches)) => TagPlace(CmdTagPlace::from(matches)),
                Some((CmdTagCity::NAME, matches)) => TagCity(CmdTagCity::from(matches)),
                Some((CmdTagReset::NAME, _)) => TagReset(CmdTagReset),
                _ => unreachable!(),
            },
            Some((CmdExport::NAME, matches)) => Export(CmdExport::from(matches)),
            Some((CmdImport::NAME, matches)) => Import(CmdImport::from(matches)),
            Some((CmdBackup::NAME, matches)) => Backup(CmdBackup::from(matches)),
            Some((CmdRestore::NAME, matches)) => Restore(CmdRestore::from(matches)),
            Some(("settings", matches)) => match matches.subcommand() {
                Some((CmdSettingsShow::NAME, _)) => SettingsShow(CmdSettingsShow),
                Some((CmdSettingsFont::NAME, matches)) => {
                    SettingsFont(CmdSettingsFont::from(matches))
                }
                Some((CmdSettingsMenu::NAME, matches)) => {
                    SettingsMenu(CmdSettingsMenu::from(matches))
                }
                Some((CmdSettingsReset::NAME, _)) => SettingsReset(CmdSettingsReset),
                Some((CmdClearData::NAME, matches)) => ClearData(CmdClearData::from(matches)),
                _ => unreachable!(),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Month(CmdMonth::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config)
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the month grid
    Month(CmdMonth),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Delete events
    EventDelete(CmdEventDelete),

    /// List events
    EventList(CmdEventList),

    /// Show the tag vocabulary
    TagList(CmdTagList),

    /// Set a category color
    TagColor(CmdTagColor),

    /// Manage the venue list
    TagPlace(CmdTagPlace),

    /// Manage the city list
    TagCity(CmdTagCity),

    /// Reset the tag vocabulary
    TagReset(CmdTagReset),

    /// Export events to a file
    Export(CmdExport),

    /// Import events from a file
    Import(CmdImport),

    /// Write a full-state backup
    Backup(CmdBackup),

    /// Restore from a backup file
    Restore(CmdRestore),

    /// Show the settings
    SettingsShow(CmdSettingsShow),

    /// Set the display font
    SettingsFont(CmdSettingsFont),

    /// Collapse or expand the menu
    SettingsMenu(CmdSettingsMenu),

    /// Reset the settings
    SettingsReset(CmdSettingsReset),

    /// Remove all persisted data
    ClearData(CmdClearData),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;

        // completion generation needs no configuration or storage
        if let GenerateCompletion(a) = &self {
            return a.run();
        }

        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config)?;
        let gigcal = Gigcal::new(core_config)?;

        match self {
            Month(a)         => a.run(&gigcal),
            EventNew(a)      => a.run(&gigcal),
            EventEdit(a)     => a.run(&gigcal),
            EventDelete(a)   => a.run(&gigcal),
            EventList(a)     => a.run(&gigcal),
            TagList(a)       => a.run(&gigcal),
            TagColor(a)      => a.run(&gigcal),
            TagPlace(a)      => a.run(&gigcal),
            TagCity(a)       => a.run(&gigcal),
            TagReset(a)      => a.run(&gigcal),
            Export(a)        => a.run(&gigcal),
            Import(a)        => a.run(&gigcal),
            Backup(a)        => a.run(&gigcal),
            Restore(a)       => a.run(&gigcal),
            SettingsShow(a)  => a.run(&gigcal),
            SettingsFont(a)  => a.run(&gigcal),
            SettingsMenu(a)  => a.run(&gigcal),
            SettingsReset(a) => a.run(&gigcal),
            ClearData(a)     => a.run(&gigcal),
            GenerateCompletion(_) => unreachable!(),
        }
    }
}
