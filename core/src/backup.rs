// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Full-state backup: one JSON file carrying the event collection, the tag
//! vocabulary, and the settings. Restoring applies whichever of the three
//! sections are present and leaves the rest untouched.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::event_store::EventStore;
use crate::settings::{Settings, SettingsStore};
use crate::tags::{TagConfig, TagStore};
use crate::{Error, Result};

/// The backup file shape. Every section is optional on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,

    /// RFC 3339 UTC timestamp of the backup.
    #[serde(rename = "exportDate")]
    pub export_date: String,
}

/// Serializes the full state of the three stores.
pub fn export(
    events: &EventStore,
    tags: &TagStore,
    settings: &SettingsStore,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    let backup = Backup {
        events: Some(events.all()),
        tags: Some(tags.get()),
        settings: Some(settings.get()),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Applies a backup file: each section present in the file replaces the
/// corresponding store; absent sections are left as they are.
pub fn restore(
    text: &str,
    events: &EventStore,
    tags: &TagStore,
    settings: &SettingsStore,
) -> Result<()> {
    let backup: Backup = serde_json::from_str(text)
        .map_err(|e| Error::UnrecognizedImport(format!("bad backup file: {e}")))?;

    if let Some(evs) = backup.events {
        events.replace_all(evs)?;
    }
    if let Some(tag_config) = backup.tags {
        tags.replace(&tag_config)?;
    }
    if let Some(s) = backup.settings {
        settings.replace(&s)?;
    }

    tracing::debug!("backup restored");
    Ok(())
}
