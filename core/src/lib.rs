// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

pub mod backup;
pub mod export;
pub mod grid;
pub mod import;

mod config;
mod error;
mod event;
mod event_store;
mod gigcal;
mod settings;
mod storage;
mod tags;

pub use crate::config::{APP_NAME, Config};
pub use crate::error::{Error, Result};
pub use crate::event::{
    DEFAULT_EVENT_COLOR, Event, EventDraft, EventPatch, EventType, PALETTE, is_valid_color,
};
pub use crate::event_store::EventStore;
pub use crate::export::{ExportEnvelope, MonthRange};
pub use crate::gigcal::{Editor, Gigcal};
pub use crate::grid::{DayCell, GRID_CELLS};
pub use crate::import::{ImportFormat, ImportMode, ImportOptions, ImportReport};
pub use crate::settings::{Settings, SettingsStore};
pub use crate::storage::{FileStorage, MemoryStorage, Storage};
pub use crate::tags::{TagConfig, TagStore};
