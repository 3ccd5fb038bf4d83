// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use chrono::NaiveDate;

use crate::storage::{KEY_EVENTS, Storage};
use crate::{Error, Event, Result};

/// Repository for the event collection.
///
/// The whole collection is one JSON blob under one key: every mutation is a
/// read-modify-write of the full set. That keeps each operation atomic from
/// the caller's perspective; two stores sharing one backend race with
/// last-write-wins, which is accepted for a single-user local tool.
#[derive(Debug, Clone)]
pub struct EventStore {
    storage: Arc<dyn Storage>,
}

impl EventStore {
    /// Creates a store over the given backend.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All events, sorted by date then id. Absent or malformed storage
    /// yields an empty collection, never an error.
    pub fn all(&self) -> Vec<Event> {
        let mut events = self.load();
        sort_events(&mut events);
        events
    }

    /// Looks up a single event by id.
    pub fn get(&self, id: &str) -> Option<Event> {
        self.load().into_iter().find(|e| e.id == id)
    }

    /// All events on the given date, in stored order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.load().into_iter().filter(|e| e.date == date).collect()
    }

    /// Upserts by id: replaces the stored event with the same id, or
    /// appends a new one.
    pub fn save(&self, event: Event) -> Result<()> {
        let mut events = self.load();
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => *slot = event,
            None => events.push(event),
        }
        self.persist(&mut events)
    }

    /// Removes the event with the given id. Returns whether anything was
    /// removed; an absent id is a no-op, not an error.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut events = self.load();
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Ok(false);
        }
        self.persist(&mut events)?;
        Ok(true)
    }

    /// Events within a single month.
    pub fn by_month(&self, year: i32, month: u32) -> Result<Vec<Event>> {
        let month = format!("{year:04}-{month:02}");
        self.by_range(&month, &month)
    }

    /// Events within an inclusive `YYYY-MM` month range.
    ///
    /// Comparison is on the canonical date string: `YYYY-MM-DD` orders
    /// lexicographically, so a plain string prefix comparison is exact.
    pub fn by_range(&self, start_month: &str, end_month: &str) -> Result<Vec<Event>> {
        crate::grid::parse_month(start_month)?;
        crate::grid::parse_month(end_month)?;

        let mut events: Vec<Event> = self
            .load()
            .into_iter()
            .filter(|e| {
                let date = e.date_string();
                let month = &date[..7];
                start_month <= month && month <= end_month
            })
            .collect();
        sort_events(&mut events);
        Ok(events)
    }

    /// Replaces the entire collection.
    pub fn replace_all(&self, mut events: Vec<Event>) -> Result<()> {
        self.persist(&mut events)
    }

    /// Removes every stored event.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(KEY_EVENTS)
    }

    fn load(&self) -> Vec<Event> {
        let Ok(Some(blob)) = self.storage.read(KEY_EVENTS) else {
            return Vec::new();
        };
        match serde_json::from_str(&blob) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(%err, "malformed event blob, treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, events: &mut Vec<Event>) -> Result<()> {
        sort_events(events);
        let blob = serde_json::to_string(events).map_err(Error::Serialization)?;
        self.storage.write(KEY_EVENTS, &blob)
    }
}

fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, EventType};
    use crate::storage::MemoryStorage;

    fn store() -> EventStore {
        EventStore::new(Arc::new(MemoryStorage::new()))
    }

    fn event(date: &str, name: &str) -> Event {
        let date = date.parse().unwrap();
        let mut draft = EventDraft::new(date);
        draft.name = name.to_string();
        draft.types = vec![EventType::Live];
        Event::from_draft(draft).unwrap()
    }

    #[test]
    fn test_empty_store_yields_empty_collection() {
        assert!(store().all().is_empty());
    }

    #[test]
    fn test_save_and_get() {
        let store = store();
        let e = event("2024-05-15", "演唱会A");
        store.save(e.clone()).unwrap();

        assert_eq!(store.get(&e.id), Some(e.clone()));
        assert_eq!(store.events_on(e.date), vec![e]);
    }

    #[test]
    fn test_save_upserts_by_id() {
        let store = store();
        let mut e = event("2024-05-15", "演唱会A");
        store.save(e.clone()).unwrap();

        e.name = "演唱会B".to_string();
        store.save(e.clone()).unwrap();

        let all = store.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "演唱会B");
    }

    #[test]
    fn test_multiple_events_per_date() {
        let store = store();
        store.save(event("2024-05-15", "午餐")).unwrap();
        store.save(event("2024-05-15", "演唱会")).unwrap();

        assert_eq!(store.events_on("2024-05-15".parse().unwrap()).len(), 2);
    }

    #[test]
    fn test_delete_is_noop_when_absent() {
        let store = store();
        let e = event("2024-05-15", "演唱会A");
        store.save(e.clone()).unwrap();

        assert!(store.delete(&e.id).unwrap());
        assert!(!store.delete(&e.id).unwrap());
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_all_sorted_by_date() {
        let store = store();
        store.save(event("2024-06-01", "b")).unwrap();
        store.save(event("2024-01-01", "a")).unwrap();
        store.save(event("2024-12-31", "c")).unwrap();

        let dates: Vec<String> = store.all().iter().map(Event::date_string).collect();
        assert_eq!(dates, ["2024-01-01", "2024-06-01", "2024-12-31"]);
    }

    #[test]
    fn test_range_boundaries_inclusive() {
        let store = store();
        for (date, name) in [
            ("2023-12-31", "out-before"),
            ("2024-01-01", "in-start"),
            ("2024-03-31", "in-end"),
            ("2024-04-01", "out-after"),
        ] {
            store.save(event(date, name)).unwrap();
        }

        let hits = store.by_range("2024-01", "2024-03").unwrap();
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["in-start", "in-end"]);
    }

    #[test]
    fn test_by_month() {
        let store = store();
        store.save(event("2024-02-29", "闰日")).unwrap();
        store.save(event("2024-03-01", "三月")).unwrap();

        let hits = store.by_month(2024, 2).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "闰日");
    }

    #[test]
    fn test_range_rejects_bad_month() {
        assert!(store().by_range("2024-13", "2024-12").is_err());
        assert!(store().by_range("2024/01", "2024-12").is_err());
    }

    #[test]
    fn test_malformed_blob_treated_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(KEY_EVENTS, "{not json").unwrap();

        let store = EventStore::new(storage);
        assert!(store.all().is_empty());

        // and the store recovers on the next write
        store.save(event("2024-05-15", "演唱会A")).unwrap();
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_last_write_wins_across_stores() {
        // Two stores over one backend model two tabs on the same data.
        let storage = Arc::new(MemoryStorage::new());
        let a = EventStore::new(storage.clone());
        let b = EventStore::new(storage);

        let ea = event("2024-05-15", "from-a");
        let eb = event("2024-05-16", "from-b");

        // Both read the empty collection, then write without seeing the
        // other: the second write silently discards the first.
        a.replace_all(vec![ea]).unwrap();
        b.replace_all(vec![eb.clone()]).unwrap();

        assert_eq!(a.all(), vec![eb]);
    }

    #[test]
    fn test_clear() {
        let store = store();
        store.save(event("2024-05-15", "演唱会A")).unwrap();
        store.clear().unwrap();
        assert!(store.all().is_empty());
    }
}
