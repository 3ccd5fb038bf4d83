// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use gigcal_core::{EventType, Gigcal};

use crate::event_formatter::parse_hex_color;

/// Show the tag vocabulary: category colors, venues, and cities.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmdTagList;

impl CmdTagList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show the tag vocabulary")
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!("listing tags...");
        let tags = gigcal.tags().get();

        println!("{}", "Categories".bold());
        for t in EventType::ALL {
            let color = tags.color_of(t);
            let swatch = match parse_hex_color(color) {
                Some(c) => "●".color(c).to_string(),
                None => "●".to_string(),
            };
            println!("  {swatch} {t} {color}");
        }

        println!("\n{}", "Places".bold());
        for place in &tags.places {
            println!("  {place}");
        }

        println!("\n{}", "Cities".bold());
        for city in &tags.cities {
            println!("  {city}");
        }
        Ok(())
    }
}

/// Change the color of one of the fixed categories.
#[derive(Debug, Clone)]
pub struct CmdTagColor {
    pub category: EventType,
    pub color: String,
}

impl CmdTagColor {
    pub const NAME: &str = "color";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Set the color of a category")
            .arg(
                arg!(category: <CATEGORY> "The category to recolor")
                    .value_parser(value_parser!(EventType)),
            )
            .arg(arg!(color: <COLOR> "The new color (#RRGGBB)"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            category: *matches
                .get_one::<EventType>("category")
                .expect("category is required"),
            color: matches
                .get_one::<String>("color")
                .expect("color is required")
                .clone(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "setting category color...");
        if !gigcal_core::is_valid_color(&self.color) {
            return Err(format!("Invalid color '{}', expected #RRGGBB", self.color).into());
        }
        gigcal.tags().set_type_color(self.category, &self.color)?;
        println!("{} is now {}", self.category, self.color);
        Ok(())
    }
}

/// Add or remove a venue name.
#[derive(Debug, Clone)]
pub struct CmdTagPlace {
    pub remove: bool,
    pub name: String,
}

impl CmdTagPlace {
    pub const NAME: &str = "place";
    pub const ADD: &str = "add";
    pub const REMOVE: &str = "remove";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Manage the venue list")
            .arg_required_else_help(true)
            .subcommand_required(true)
            .subcommand(
                Command::new(Self::ADD)
                    .about("Add a venue")
                    .arg(arg!(name: <NAME> "The venue name")),
            )
            .subcommand(
                Command::new(Self::REMOVE)
                    .alias("rm")
                    .about("Remove a venue")
                    .arg(arg!(name: <NAME> "The venue name")),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (sub, sub_matches) = matches.subcommand().expect("subcommand is required");
        Self {
            remove: sub == Self::REMOVE,
            name: sub_matches
                .get_one::<String>("name")
                .expect("name is required")
                .clone(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "updating venue list...");
        if self.remove {
            gigcal.tags().remove_place(&self.name)?;
        } else {
            gigcal.tags().add_place(&self.name)?;
        }
        Ok(())
    }
}

/// Add or remove a city name.
#[derive(Debug, Clone)]
pub struct CmdTagCity {
    pub remove: bool,
    pub name: String,
}

impl CmdTagCity {
    pub const NAME: &str = "city";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Manage the city list")
            .arg_required_else_help(true)
            .subcommand_required(true)
            .subcommand(
                Command::new(CmdTagPlace::ADD)
                    .about("Add a city")
                    .arg(arg!(name: <NAME> "The city name")),
            )
            .subcommand(
                Command::new(CmdTagPlace::REMOVE)
                    .alias("rm")
                    .about("Remove a city")
                    .arg(arg!(name: <NAME> "The city name")),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (sub, sub_matches) = matches.subcommand().expect("subcommand is required");
        Self {
            remove: sub == CmdTagPlace::REMOVE,
            name: sub_matches
                .get_one::<String>("name")
                .expect("name is required")
                .clone(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "updating city list...");
        if self.remove {
            gigcal.tags().remove_city(&self.name)?;
        } else {
            gigcal.tags().add_city(&self.name)?;
        }
        Ok(())
    }
}

/// Reset the tag vocabulary to the built-in defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmdTagReset;

impl CmdTagReset {
    pub const NAME: &str = "reset";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Reset the tag vocabulary to the defaults")
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!("resetting tags...");
        gigcal.tags().reset()?;
        println!("Tag vocabulary reset to defaults");
        Ok(())
    }
}
