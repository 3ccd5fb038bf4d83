// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};

use crate::event_store::EventStore;
use crate::export::MonthRange;
use crate::grid::{self, DayCell};
use crate::import::{ImportFormat, ImportOptions, ImportReport};
use crate::settings::SettingsStore;
use crate::storage::{FileStorage, Storage};
use crate::tags::TagStore;
use crate::{Config, Error, Event, EventDraft, EventPatch, Result, backup, export, import};

/// gigcal application core: owns the stores and drives the calendar.
///
/// UI layers hold no live references into the stores; they fetch on render
/// and re-fetch after any mutation through this facade.
#[derive(Debug, Clone)]
pub struct Gigcal {
    now: DateTime<Local>,
    events: EventStore,
    tags: TagStore,
    settings: SettingsStore,
}

/// Editing state for one date: what is already there, and a prefilled
/// draft for the form.
#[derive(Debug, Clone)]
pub struct Editor {
    pub date: NaiveDate,
    pub existing: Vec<Event>,
    pub draft: EventDraft,
}

impl Gigcal {
    /// Creates a new gigcal instance with the given configuration.
    pub fn new(mut config: Config) -> Result<Self> {
        config.normalize()?;
        let dir = config
            .data_dir
            .ok_or_else(|| Error::Config("data directory not resolved".to_string()))?;
        tracing::debug!(path = %dir.display(), "opening data directory");

        let storage = FileStorage::open(dir)?;
        Ok(Self::with_storage(Arc::new(storage), Local::now()))
    }

    /// Creates an instance over an explicit backend, with an injected
    /// clock. This is the constructor tests use.
    pub fn with_storage(storage: Arc<dyn Storage>, now: DateTime<Local>) -> Self {
        Self {
            now,
            events: EventStore::new(storage.clone()),
            tags: TagStore::new(storage.clone()),
            settings: SettingsStore::new(storage),
        }
    }

    /// The current time in this instance.
    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    /// Refresh the current time to now.
    pub fn refresh_now(&mut self) {
        self.now = Local::now();
    }

    /// Today per the instance clock.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// The month containing today.
    pub fn current_month(&self) -> (i32, u32) {
        use chrono::Datelike;
        let today = self.today();
        (today.year(), today.month())
    }

    /// The event repository.
    pub fn events(&self) -> &EventStore {
        &self.events
    }

    /// The tag vocabulary repository.
    pub fn tags(&self) -> &TagStore {
        &self.tags
    }

    /// The settings repository.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// The 42-cell grid for a month, with events attached. Overflow cells
    /// from the adjacent months carry their events too.
    pub fn month_view(&self, year: i32, month: u32) -> Result<Vec<DayCell>> {
        let (py, pm) = grid::prev_month(year, month);
        let (ny, nm) = grid::next_month(year, month);
        let events = self
            .events
            .by_range(&grid::format_month(py, pm), &grid::format_month(ny, nm))?;
        grid::month_grid(year, month, &events, self.today())
    }

    /// Opens the editor for a date: existing events plus a prefilled draft.
    pub fn editor_for(&self, date: NaiveDate) -> Editor {
        let existing = self.events.events_on(date);
        let draft = match existing.first() {
            Some(event) => EventDraft::from_event(event),
            None => EventDraft::new(date),
        };
        Editor {
            date,
            existing,
            draft,
        }
    }

    /// Saves a new event from the given draft.
    pub fn new_event(&self, draft: EventDraft) -> Result<Event> {
        let event = Event::from_draft(draft)?;
        tracing::debug!(id = %event.id, date = %event.date_string(), "saving new event");
        self.events.save(event.clone())?;
        Ok(event)
    }

    /// Applies a patch to a stored event.
    pub fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event> {
        let mut event = self
            .events
            .get(id)
            .ok_or_else(|| Error::EventNotFound(id.to_string()))?;
        patch.apply_to(&mut event)?;
        self.events.save(event.clone())?;
        Ok(event)
    }

    /// Deletes an event by id. Returns whether anything was removed.
    pub fn delete_event(&self, id: &str) -> Result<bool> {
        self.events.delete(id)
    }

    /// Exports the events of an inclusive month range as CSV. Returns the
    /// contract filename and the file content.
    pub fn export_csv(&self, start_month: &str, end_month: &str) -> Result<(String, String)> {
        let events = self.events.by_range(start_month, end_month)?;
        let content = export::to_csv(&events)?;
        let range = MonthRange::new(start_month, end_month);
        Ok((export::csv_filename(&range), content))
    }

    /// Exports the events of an inclusive month range as the JSON envelope.
    pub fn export_json(&self, start_month: &str, end_month: &str) -> Result<(String, String)> {
        let events = self.events.by_range(start_month, end_month)?;
        let range = MonthRange::new(start_month, end_month);
        let content = export::to_json(&events, &range, self.now.to_utc())?;
        Ok((export::json_filename(&range), content))
    }

    /// Imports CSV or JSON text into the event store.
    pub fn import(
        &self,
        text: &str,
        format: ImportFormat,
        options: &ImportOptions,
    ) -> Result<ImportReport> {
        import::import(&self.events, text, format, options)
    }

    /// Serializes the full state (events, tags, settings) for backup.
    pub fn backup(&self) -> Result<String> {
        backup::export(&self.events, &self.tags, &self.settings, self.now.to_utc())
    }

    /// Restores whichever sections a backup file carries.
    pub fn restore(&self, text: &str) -> Result<()> {
        backup::restore(text, &self.events, &self.tags, &self.settings)
    }

    /// Removes all persisted state: events, tags, and settings.
    pub fn clear_all(&self) -> Result<()> {
        tracing::debug!("clearing all persisted state");
        self.events.clear()?;
        self.tags.clear()?;
        self.settings.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    fn gigcal() -> Gigcal {
        let now = Local.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        Gigcal::with_storage(Arc::new(MemoryStorage::new()), now)
    }

    fn draft(gigcal: &Gigcal, name: &str) -> EventDraft {
        let mut draft = EventDraft::new(gigcal.today());
        draft.name = name.to_string();
        draft.types = vec![EventType::Live];
        draft
    }

    #[test]
    fn test_month_view_marks_today_and_events() {
        let gigcal = gigcal();
        let event = gigcal.new_event(draft(&gigcal, "演唱会A")).unwrap();

        let cells = gigcal.month_view(2024, 5).unwrap();
        let today = cells.iter().find(|c| c.is_today).unwrap();
        assert_eq!(today.date, gigcal.today());
        assert_eq!(today.events, vec![event]);
    }

    #[test]
    fn test_month_view_includes_overflow_events() {
        let gigcal = gigcal();
        // 2024-06-01 lands in the trailing cells of the May grid
        let mut d = EventDraft::new("2024-06-01".parse().unwrap());
        d.name = "六月初".to_string();
        gigcal.new_event(d).unwrap();

        let cells = gigcal.month_view(2024, 5).unwrap();
        let cell = cells
            .iter()
            .find(|c| c.date_string() == "2024-06-01")
            .unwrap();
        assert!(!cell.is_current_month);
        assert_eq!(cell.events.len(), 1);
    }

    #[test]
    fn test_editor_prefills_from_existing_event() {
        let gigcal = gigcal();
        let event = gigcal.new_event(draft(&gigcal, "演唱会A")).unwrap();

        let editor = gigcal.editor_for(gigcal.today());
        assert_eq!(editor.existing, vec![event]);
        assert_eq!(editor.draft.name, "演唱会A");

        let empty = gigcal.editor_for("2024-05-16".parse().unwrap());
        assert!(empty.existing.is_empty());
        assert_eq!(empty.draft.color, crate::DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn test_update_event() {
        let gigcal = gigcal();
        let event = gigcal.new_event(draft(&gigcal, "演唱会A")).unwrap();

        let patch = EventPatch {
            city: Some("上海".to_string()),
            ..Default::default()
        };
        let updated = gigcal.update_event(&event.id, patch).unwrap();
        assert_eq!(updated.city, "上海");
        assert_eq!(gigcal.events().get(&event.id).unwrap().city, "上海");

        assert!(matches!(
            gigcal.update_event("missing", EventPatch::default()),
            Err(Error::EventNotFound(_))
        ));
    }

    #[test]
    fn test_export_uses_instance_clock() {
        let gigcal = gigcal();
        gigcal.new_event(draft(&gigcal, "演唱会A")).unwrap();

        let (name, content) = gigcal.export_json("2024-05", "2024-05").unwrap();
        assert_eq!(name, "演出日历_2024-05_2024-05.json");
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value["exportDate"],
            gigcal
                .now()
                .to_utc()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        );
    }

    #[test]
    fn test_export_empty_range_is_an_error() {
        let gigcal = gigcal();
        assert!(matches!(
            gigcal.export_csv("2024-01", "2024-02"),
            Err(Error::NothingToExport)
        ));
    }

    #[test]
    fn test_clear_all() {
        let gigcal = gigcal();
        gigcal.new_event(draft(&gigcal, "演唱会A")).unwrap();
        gigcal.tags().add_city("名古屋").unwrap();
        gigcal.settings().set_font("serif").unwrap();

        gigcal.clear_all().unwrap();
        assert!(gigcal.events().all().is_empty());
        assert_eq!(gigcal.tags().get(), crate::TagConfig::default());
        assert_eq!(gigcal.settings().get(), crate::Settings::default());
    }
}
