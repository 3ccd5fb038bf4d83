// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use gigcal_core::EventType;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The id (or unique id prefix) of the event")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("id")
            .expect("id is required")
            .clone()
    }

    pub fn ids() -> Arg {
        arg!(id: <ID> "The ids (or unique id prefixes) of the events").num_args(1..)
    }

    pub fn get_ids(matches: &ArgMatches) -> Vec<String> {
        matches
            .get_many::<String>("id")
            .expect("id is required")
            .cloned()
            .collect()
    }

    pub fn name(positional: bool) -> Arg {
        if positional {
            arg!(name: <NAME> "Name of the event").required(false)
        } else {
            arg!(name: -n --name <NAME> "Name of the event")
        }
    }

    pub fn get_name(matches: &ArgMatches) -> Option<String> {
        matches.get_one("name").cloned()
    }

    pub fn date() -> Arg {
        arg!(--date <DATE> "Date of the event (YYYY-MM-DD)")
    }

    pub fn get_date(matches: &ArgMatches) -> Option<String> {
        matches.get_one("date").cloned()
    }

    pub fn types() -> Arg {
        arg!(--"type" <TYPE> "Category of the event, repeatable")
            .value_parser(value_parser!(EventType))
            .action(ArgAction::Append)
    }

    pub fn get_types(matches: &ArgMatches) -> Option<Vec<EventType>> {
        matches
            .get_many::<EventType>("type")
            .map(|types| types.copied().collect())
    }

    pub fn place() -> Arg {
        arg!(--place <PLACE> "Venue of the event")
    }

    pub fn get_place(matches: &ArgMatches) -> Option<String> {
        matches.get_one("place").cloned()
    }

    pub fn city() -> Arg {
        arg!(--city <CITY> "City of the event")
    }

    pub fn get_city(matches: &ArgMatches) -> Option<String> {
        matches.get_one("city").cloned()
    }

    pub fn color() -> Arg {
        arg!(--color <COLOR> "Marker color of the event (#RRGGBB)")
    }

    pub fn get_color(matches: &ArgMatches) -> Option<String> {
        matches.get_one("color").cloned()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RangeArgs;

impl RangeArgs {
    pub fn start() -> Arg {
        arg!(--start <MONTH> "First month of the range (YYYY-MM), defaults to the current month")
    }

    pub fn get_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("start").cloned()
    }

    pub fn end() -> Arg {
        arg!(--end <MONTH> "Last month of the range (YYYY-MM), defaults to the current month")
    }

    pub fn get_end(matches: &ArgMatches) -> Option<String> {
        matches.get_one("end").cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    fn command() -> Command {
        Command::new("test")
            .arg(EventArgs::name(true))
            .arg(EventArgs::date())
            .arg(EventArgs::types())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    #[test]
    fn test_event_args() {
        let matches = command()
            .try_get_matches_from([
                "test",
                "演唱会A",
                "--date",
                "2024-05-15",
                "--type",
                "live",
                "--type",
                "dining",
            ])
            .unwrap();

        assert_eq!(EventArgs::get_name(&matches).as_deref(), Some("演唱会A"));
        assert_eq!(EventArgs::get_date(&matches).as_deref(), Some("2024-05-15"));
        assert_eq!(
            EventArgs::get_types(&matches),
            Some(vec![EventType::Live, EventType::Dining])
        );
    }

    #[test]
    fn test_common_args_defaults() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert_eq!(CommonArgs::get_output_format(&matches), OutputFormat::Table);
        assert!(!CommonArgs::get_verbose(&matches));
        assert_eq!(EventArgs::get_types(&matches), None);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = command().try_get_matches_from(["test", "--type", "singing"]);
        assert!(result.is_err());
    }
}
