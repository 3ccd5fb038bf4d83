// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::NaiveDate;
use gigcal_core::Gigcal;

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{s}'. Expected format: YYYY-MM-DD").into())
}

/// Parses a `YYYY-MM` month argument.
pub fn parse_month(s: &str) -> Result<(i32, u32), Box<dyn Error>> {
    gigcal_core::grid::parse_month(s)
        .map_err(|_| format!("Invalid month '{s}'. Expected format: YYYY-MM").into())
}

/// Resolves a full or prefix event id to the stored event id.
///
/// Ids are UUIDs; typing a unique prefix is enough. Ambiguous or unknown
/// prefixes are an error rather than a guess.
pub fn resolve_event_id(gigcal: &Gigcal, input: &str) -> Result<String, Box<dyn Error>> {
    if input.is_empty() {
        return Err("Event id must not be empty".into());
    }

    let matches: Vec<String> = gigcal
        .events()
        .all()
        .into_iter()
        .filter(|e| e.id.starts_with(input))
        .map(|e| e.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.clone()),
        [] => Err(format!("No event found with id '{input}'").into()),
        _ => Err(format!("Event id '{input}' is ambiguous ({} matches)", matches.len()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use gigcal_core::{EventDraft, MemoryStorage};
    use std::sync::Arc;

    fn gigcal() -> Gigcal {
        let now = Local.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        Gigcal::with_storage(Arc::new(MemoryStorage::new()), now)
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
        );
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-05").unwrap(), (2024, 5));
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn test_resolve_event_id_prefix() {
        let gigcal = gigcal();
        let mut draft = EventDraft::new(gigcal.today());
        draft.name = "演唱会A".to_string();
        let event = gigcal.new_event(draft).unwrap();

        assert_eq!(resolve_event_id(&gigcal, &event.id).unwrap(), event.id);
        assert_eq!(resolve_event_id(&gigcal, &event.id[..8]).unwrap(), event.id);
        assert!(resolve_event_id(&gigcal, "zzzz").is_err());
        assert!(resolve_event_id(&gigcal, "").is_err());
    }
}
