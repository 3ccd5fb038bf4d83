// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::event::EventType;
use crate::storage::{KEY_TAGS, Storage};
use crate::{Error, Result};

/// The tag vocabulary: a color per fixed category, plus freely editable
/// venue and city name lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    /// Color per category. All four categories are always present.
    #[serde(rename = "type", default = "default_type_colors")]
    pub types: BTreeMap<EventType, String>,

    /// Venue names, insertion-ordered, duplicate-free.
    #[serde(rename = "place", default = "default_places")]
    pub places: Vec<String>,

    /// City names, insertion-ordered, duplicate-free.
    #[serde(rename = "city", default = "default_cities")]
    pub cities: Vec<String>,
}

fn default_type_colors() -> BTreeMap<EventType, String> {
    BTreeMap::from([
        (EventType::Live, "#FF6B6B".to_string()),
        (EventType::Dining, "#4ECDC4".to_string()),
        (EventType::Travel, "#45B7D1".to_string()),
        (EventType::Sports, "#96CEB4".to_string()),
    ])
}

fn default_places() -> Vec<String> {
    vec!["梅赛德斯奔驰文化中心".into(), "静安体育中心".into()]
}

fn default_cities() -> Vec<String> {
    vec!["上海".into(), "东京".into(), "大阪".into()]
}

impl Default for TagConfig {
    /// The built-in vocabulary seed.
    fn default() -> Self {
        Self {
            types: default_type_colors(),
            places: default_places(),
            cities: default_cities(),
        }
    }
}

impl TagConfig {
    /// The color for a category, falling back to the default vocabulary.
    pub fn color_of(&self, t: EventType) -> &str {
        self.types.get(&t).map_or("#666666", String::as_str)
    }
}

/// Stored shape of the vocabulary: every top-level key optional, so older
/// or hand-edited blobs load cleanly.
#[derive(Debug, Default, Deserialize)]
struct PartialTagConfig {
    #[serde(rename = "type", default)]
    types: Option<BTreeMap<EventType, String>>,

    #[serde(rename = "place", default)]
    places: Option<Vec<String>>,

    #[serde(rename = "city", default)]
    cities: Option<Vec<String>>,
}

/// Merges a stored partial vocabulary over the defaults.
///
/// Top-level keys replace: a stored list wins wholly, never element-wise.
/// The one exception is the category map, where any category the stored map
/// lacks is refilled from the defaults so all four keys stay present.
fn merge_with_defaults(partial: PartialTagConfig, defaults: TagConfig) -> TagConfig {
    let mut types = partial.types.unwrap_or_else(|| defaults.types.clone());
    for t in EventType::ALL {
        if !types.contains_key(&t) {
            types.insert(t, defaults.color_of(t).to_string());
        }
    }

    TagConfig {
        types,
        places: partial.places.unwrap_or(defaults.places),
        cities: partial.cities.unwrap_or(defaults.cities),
    }
}

/// Repository for the tag vocabulary blob.
#[derive(Debug, Clone)]
pub struct TagStore {
    storage: Arc<dyn Storage>,
}

impl TagStore {
    /// Creates a store over the given backend.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The current vocabulary, defaults merged under missing keys. Absent
    /// or malformed storage yields the defaults, never an error.
    pub fn get(&self) -> TagConfig {
        let Ok(Some(blob)) = self.storage.read(KEY_TAGS) else {
            return TagConfig::default();
        };
        match serde_json::from_str::<PartialTagConfig>(&blob) {
            Ok(partial) => merge_with_defaults(partial, TagConfig::default()),
            Err(err) => {
                tracing::warn!(%err, "malformed tag blob, using defaults");
                TagConfig::default()
            }
        }
    }

    /// Overwrites the color of one of the fixed categories. The color is
    /// stored as given; hex validation belongs to the input boundary.
    pub fn set_type_color(&self, t: EventType, color: &str) -> Result<()> {
        let mut tags = self.get();
        tags.types.insert(t, color.to_string());
        self.persist(&tags)
    }

    /// Appends a venue name. Blank or already-present names are a no-op.
    pub fn add_place(&self, name: &str) -> Result<()> {
        let name = name.trim();
        let mut tags = self.get();
        if name.is_empty() || tags.places.iter().any(|p| p == name) {
            return Ok(());
        }
        tags.places.push(name.to_string());
        self.persist(&tags)
    }

    /// Removes all venue entries equal to `name`. Absent names are a no-op.
    pub fn remove_place(&self, name: &str) -> Result<()> {
        let mut tags = self.get();
        tags.places.retain(|p| p != name);
        self.persist(&tags)
    }

    /// Appends a city name. Blank or already-present names are a no-op.
    pub fn add_city(&self, name: &str) -> Result<()> {
        let name = name.trim();
        let mut tags = self.get();
        if name.is_empty() || tags.cities.iter().any(|c| c == name) {
            return Ok(());
        }
        tags.cities.push(name.to_string());
        self.persist(&tags)
    }

    /// Removes all city entries equal to `name`. Absent names are a no-op.
    pub fn remove_city(&self, name: &str) -> Result<()> {
        let mut tags = self.get();
        tags.cities.retain(|c| c != name);
        self.persist(&tags)
    }

    /// Replaces the stored vocabulary wholesale (used by restore).
    pub fn replace(&self, tags: &TagConfig) -> Result<()> {
        self.persist(tags)
    }

    /// Resets the vocabulary to the built-in defaults.
    pub fn reset(&self) -> Result<()> {
        self.persist(&TagConfig::default())
    }

    /// Removes the stored vocabulary blob entirely.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(KEY_TAGS)
    }

    fn persist(&self, tags: &TagConfig) -> Result<()> {
        let blob = serde_json::to_string(tags).map_err(Error::Serialization)?;
        self.storage.write(KEY_TAGS, &blob)
    }
}
