// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::LazyLock;
use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Preset colors offered by the event editor. The first entry is the
/// default color for a fresh draft.
pub const PALETTE: [&str; 20] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57", "#FF9FF3", "#54A0FF", "#5F27CD",
    "#00D2D3", "#FF9F43", "#A3CB38", "#C4E538", "#FDA7DF", "#ED4C67", "#B53471", "#EE5A24",
    "#009432", "#0652DD", "#9980FA", "#833471",
];

/// Default color assigned to new event drafts.
pub const DEFAULT_EVENT_COLOR: &str = PALETTE[0];

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#[0-9A-Fa-f]{6}$").expect("color pattern must compile"));

/// Whether `s` is a `#RRGGBB` hex color.
pub fn is_valid_color(s: &str) -> bool {
    COLOR_RE.is_match(s)
}

/// A single calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, a UUID v4 assigned on first save.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// The day this event happens on.
    pub date: NaiveDate,

    /// Categories this event belongs to. May be empty.
    #[serde(rename = "type", alias = "types", default)]
    pub types: Vec<EventType>,

    /// Display label, non-empty after trimming.
    pub name: String,

    /// Venue name, may be empty.
    #[serde(default, alias = "location")]
    pub place: String,

    /// City name, may be empty.
    #[serde(default)]
    pub city: String,

    /// Marker color as a `#RRGGBB` hex string.
    #[serde(default = "default_event_color")]
    pub color: String,
}

fn default_event_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

impl Event {
    /// Builds a persistable event from a draft, assigning a fresh id.
    pub fn from_draft(draft: EventDraft) -> Result<Self> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if !is_valid_color(&draft.color) {
            return Err(Error::InvalidColor(draft.color));
        }

        Ok(Event {
            id: Uuid::new_v4().to_string(),
            date: draft.date,
            types: draft.types,
            name,
            place: draft.place.trim().to_string(),
            city: draft.city.trim().to_string(),
            color: draft.color,
        })
    }

    /// The canonical `YYYY-MM-DD` form of the event date.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Draft for an event, used for creating new events.
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// The day the event happens on.
    pub date: NaiveDate,

    /// Categories, may be empty.
    pub types: Vec<EventType>,

    /// Display label.
    pub name: String,

    /// Venue name, may be empty.
    pub place: String,

    /// City name, may be empty.
    pub city: String,

    /// Marker color as a `#RRGGBB` hex string.
    pub color: String,
}

impl EventDraft {
    /// Creates an empty draft for the given date with the palette default color.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            types: Vec::new(),
            name: String::new(),
            place: String::new(),
            city: String::new(),
            color: DEFAULT_EVENT_COLOR.to_string(),
        }
    }

    /// Creates a draft prefilled from an existing event.
    pub fn from_event(event: &Event) -> Self {
        Self {
            date: event.date,
            types: event.types.clone(),
            name: event.name.clone(),
            place: event.place.clone(),
            city: event.city.clone(),
            color: event.color.clone(),
        }
    }
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone)]
pub struct EventPatch {
    /// New event date, if set.
    pub date: Option<NaiveDate>,

    /// New category set, if set.
    pub types: Option<Vec<EventType>>,

    /// New display label, if set.
    pub name: Option<String>,

    /// New venue name, if set. An empty string clears the venue.
    pub place: Option<String>,

    /// New city name, if set. An empty string clears the city.
    pub city: Option<String>,

    /// New marker color, if set.
    pub color: Option<String>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.types.is_none()
            && self.name.is_none()
            && self.place.is_none()
            && self.city.is_none()
            && self.color.is_none()
    }

    /// Applies the patch to a mutable event, modifying it in place.
    pub fn apply_to(&self, event: &mut Event) -> Result<()> {
        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::EmptyName);
            }
            event.name = name.to_string();
        }

        if let Some(color) = &self.color {
            if !is_valid_color(color) {
                return Err(Error::InvalidColor(color.clone()));
            }
            event.color = color.clone();
        }

        if let Some(date) = self.date {
            event.date = date;
        }

        if let Some(types) = &self.types {
            event.types = types.clone();
        }

        if let Some(place) = &self.place {
            event.place = place.trim().to_string();
        }

        if let Some(city) = &self.city {
            event.city = city.trim().to_string();
        }

        Ok(())
    }
}

/// The fixed event categories. The set is closed: colors are configurable,
/// the labels are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventType {
    /// Live shows and concerts.
    #[serde(rename = "Live")]
    Live,

    /// Dining out (干饭).
    #[serde(rename = "干饭")]
    Dining,

    /// Travel (旅行).
    #[serde(rename = "旅行")]
    Travel,

    /// Sports and workouts (运动).
    #[serde(rename = "运动")]
    Sports,
}

const TYPE_LIVE: &str = "Live";
const TYPE_DINING: &str = "干饭";
const TYPE_TRAVEL: &str = "旅行";
const TYPE_SPORTS: &str = "运动";

impl EventType {
    /// All categories in display order.
    pub const ALL: [EventType; 4] = [
        EventType::Live,
        EventType::Dining,
        EventType::Travel,
        EventType::Sports,
    ];
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        match self {
            EventType::Live => TYPE_LIVE,
            EventType::Dining => TYPE_DINING,
            EventType::Travel => TYPE_TRAVEL,
            EventType::Sports => TYPE_SPORTS,
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventType {
    type Err = ();

    /// Parses the canonical label; ASCII aliases are accepted for
    /// keyboards without an input method.
    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            TYPE_LIVE | "live" => Ok(EventType::Live),
            TYPE_DINING | "dining" | "Dining" => Ok(EventType::Dining),
            TYPE_TRAVEL | "travel" | "Travel" => Ok(EventType::Travel),
            TYPE_SPORTS | "sports" | "Sports" => Ok(EventType::Sports),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            types: vec![EventType::Live],
            name: "演唱会A".to_string(),
            place: "梅赛德斯奔驰文化中心".to_string(),
            city: "上海".to_string(),
            color: "#FF6B6B".to_string(),
        }
    }

    #[test]
    fn test_from_draft_assigns_id() {
        let a = Event::from_draft(draft()).unwrap();
        let b = Event::from_draft(draft()).unwrap();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.date_string(), "2024-05-15");
    }

    #[test]
    fn test_from_draft_rejects_blank_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert!(matches!(Event::from_draft(d), Err(Error::EmptyName)));
    }

    #[test]
    fn test_from_draft_rejects_bad_color() {
        let mut d = draft();
        d.color = "#12345".to_string();
        assert!(matches!(Event::from_draft(d), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_patch_apply() {
        let mut event = Event::from_draft(draft()).unwrap();
        let patch = EventPatch {
            name: Some("演唱会B".to_string()),
            place: Some(String::new()),
            ..Default::default()
        };
        patch.apply_to(&mut event).unwrap();
        assert_eq!(event.name, "演唱会B");
        assert_eq!(event.place, "");
        assert_eq!(event.city, "上海");
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        let mut event = Event::from_draft(draft()).unwrap();
        let patch = EventPatch {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(patch.apply_to(&mut event).is_err());
        assert_eq!(event.name, "演唱会A");
    }

    #[test]
    fn test_event_type_round_trip() {
        for t in EventType::ALL {
            assert_eq!(t.to_string().parse::<EventType>(), Ok(t));
        }
        assert_eq!("dining".parse::<EventType>(), Ok(EventType::Dining));
        assert!("唱歌".parse::<EventType>().is_err());
    }

    #[test]
    fn test_event_serde_uses_contract_field_names() {
        let event = Event::from_draft(draft()).unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["date"], "2024-05-15");
        assert_eq!(value["type"][0], "Live");
        assert_eq!(value["place"], "梅赛德斯奔驰文化中心");
    }

    #[test]
    fn test_event_serde_accepts_aliases_and_defaults() {
        let event: Event = serde_json::from_str(
            r#"{"date": "2024-05-15", "types": ["旅行"], "name": "大阪行", "location": "环球影城"}"#,
        )
        .unwrap();
        assert_eq!(event.types, vec![EventType::Travel]);
        assert_eq!(event.place, "环球影城");
        assert_eq!(event.city, "");
        assert_eq!(event.color, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn test_is_valid_color() {
        assert!(is_valid_color("#FF6B6B"));
        assert!(is_valid_color("#a1b2c3"));
        assert!(!is_valid_color("FF6B6B"));
        assert!(!is_valid_color("#FF6B6"));
        assert!(!is_valid_color("#GG6B6B"));
    }
}
