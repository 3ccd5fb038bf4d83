// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use gigcal_core::{Event, EventDraft, EventPatch, EventType, Gigcal};

use crate::arg::{CommonArgs, EventArgs, OutputFormat, RangeArgs};
use crate::event_formatter::EventFormatter;
use crate::util::{parse_date, resolve_event_id};

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub name: String,
    pub date: Option<String>,
    pub types: Option<Vec<EventType>>,
    pub place: Option<String>,
    pub city: Option<String>,
    pub color: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .arg(EventArgs::name(true).required(true))
            .arg(EventArgs::date())
            .arg(EventArgs::types())
            .arg(EventArgs::place())
            .arg(EventArgs::city())
            .arg(EventArgs::color())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: EventArgs::get_name(matches).expect("name is required"),
            date: EventArgs::get_date(matches),
            types: EventArgs::get_types(matches),
            place: EventArgs::get_place(matches),
            city: EventArgs::get_city(matches),
            color: EventArgs::get_color(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let date = match &self.date {
            Some(date) => parse_date(date)?,
            None => gigcal.today(),
        };

        let mut draft = EventDraft::new(date);
        draft.name = self.name;
        if let Some(types) = self.types {
            draft.types = types;
        }
        if let Some(place) = self.place {
            draft.place = place;
        }
        if let Some(city) = self.city {
            draft.city = city;
        }
        if let Some(color) = self.color {
            draft.color = color;
        }

        let event = gigcal.new_event(draft)?;
        print_events(gigcal, &[event], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub types: Option<Vec<EventType>>,
    pub place: Option<String>,
    pub city: Option<String>,
    pub color: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event")
            .arg(EventArgs::id())
            .arg(EventArgs::name(false))
            .arg(EventArgs::date())
            .arg(EventArgs::types())
            .arg(EventArgs::place())
            .arg(EventArgs::city())
            .arg(EventArgs::color())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            name: EventArgs::get_name(matches),
            date: EventArgs::get_date(matches),
            types: EventArgs::get_types(matches),
            place: EventArgs::get_place(matches),
            city: EventArgs::get_city(matches),
            color: EventArgs::get_color(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let date = match &self.date {
            Some(date) => Some(parse_date(date)?),
            None => None,
        };

        let patch = EventPatch {
            date,
            types: self.types,
            name: self.name,
            place: self.place,
            city: self.city,
            color: self.color,
        };
        if patch.is_empty() {
            println!("{}", "Nothing to change".italic());
            return Ok(());
        }

        let id = resolve_event_id(gigcal, &self.id)?;
        let event = gigcal.update_event(&id, patch)?;
        print_events(gigcal, &[event], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub ids: Vec<String>,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete events")
            .arg(EventArgs::ids())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: EventArgs::get_ids(matches),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting events...");
        for input in &self.ids {
            let id = resolve_event_id(gigcal, input)?;
            gigcal.delete_event(&id)?;
            println!("Deleted {id}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub start: Option<String>,
    pub end: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List events in a month range")
            .arg(RangeArgs::start())
            .arg(RangeArgs::end())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            start: RangeArgs::get_start(matches),
            end: RangeArgs::get_end(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let (year, month) = gigcal.current_month();
        let current = gigcal_core::grid::format_month(year, month);
        let start = self.start.as_deref().unwrap_or(&current);
        let end = self.end.as_deref().unwrap_or(&current);

        let events = gigcal.events().by_range(start, end)?;
        if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(gigcal, &events, self.output_format, self.verbose);
        Ok(())
    }
}

fn print_events(gigcal: &Gigcal, events: &[Event], output_format: OutputFormat, verbose: bool) {
    let formatter =
        EventFormatter::new(gigcal.tags().get(), verbose).with_output_format(output_format);
    println!("{}", formatter.format(events));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    #[test]
    fn test_parse_event_new() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());

        let matches = cmd
            .try_get_matches_from([
                "test",
                "new",
                "演唱会A",
                "--date",
                "2024-05-15",
                "--type",
                "live",
                "--place",
                "梅赛德斯奔驰文化中心",
                "--city",
                "上海",
                "--color",
                "#FF6B6B",
                "--output-format",
                "json",
                "--verbose",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("new").unwrap();
        let parsed = CmdEventNew::from(sub_matches);

        assert_eq!(parsed.name, "演唱会A");
        assert_eq!(parsed.date.as_deref(), Some("2024-05-15"));
        assert_eq!(parsed.types, Some(vec![EventType::Live]));
        assert_eq!(parsed.place.as_deref(), Some("梅赛德斯奔驰文化中心"));
        assert_eq!(parsed.city.as_deref(), Some("上海"));
        assert_eq!(parsed.color.as_deref(), Some("#FF6B6B"));
        assert_eq!(parsed.output_format, OutputFormat::Json);
        assert!(parsed.verbose);
    }

    #[test]
    fn test_parse_event_new_requires_name() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventNew::command());
        assert!(cmd.try_get_matches_from(["test", "new"]).is_err());
    }

    #[test]
    fn test_parse_event_edit() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventEdit::command());

        let matches = cmd
            .try_get_matches_from(["test", "edit", "abc123", "--name", "新名字"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("edit").unwrap();
        let parsed = CmdEventEdit::from(sub_matches);

        assert_eq!(parsed.id, "abc123");
        assert_eq!(parsed.name.as_deref(), Some("新名字"));
        assert_eq!(parsed.types, None);
    }

    #[test]
    fn test_parse_event_delete_many() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventDelete::command());

        let matches = cmd
            .try_get_matches_from(["test", "delete", "id1", "id2"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("delete").unwrap();
        let parsed = CmdEventDelete::from(sub_matches);
        assert_eq!(parsed.ids, ["id1", "id2"]);
    }

    #[test]
    fn test_parse_event_list_range() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventList::command());

        let matches = cmd
            .try_get_matches_from(["test", "list", "--start", "2024-01", "--end", "2024-03"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("list").unwrap();
        let parsed = CmdEventList::from(sub_matches);
        assert_eq!(parsed.start.as_deref(), Some("2024-01"));
        assert_eq!(parsed.end.as_deref(), Some("2024-03"));
    }
}
