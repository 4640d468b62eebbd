// Project data models
// The parent manifest lists every project in the studio

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::dcc::DccSlot;

/// Manifest timestamp format, e.g. `2024-05-01 13:45:00`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in manifest format
pub fn now_timestamp() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// Project entry in the parent manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "creationDate")]
    pub creation_date: String,
    pub path: String,
    #[serde(rename = "Asset Count", default)]
    pub asset_count: i64,
    #[serde(rename = "Game Engine", default)]
    pub game_engine: DccSlot,
}

impl ProjectRecord {
    pub fn new(path: String) -> Self {
        Self {
            creation_date: now_timestamp(),
            path,
            asset_count: 0,
            game_engine: DccSlot::NotApplicable,
        }
    }

    pub fn increment_assets(&mut self) {
        self.asset_count += 1;
    }

    /// Never drops below zero, even if the manifest was already out of sync
    pub fn decrement_assets(&mut self) {
        if self.asset_count > 0 {
            self.asset_count -= 1;
        } else {
            log::warn!(
                "[manifest] Asset count for {} already at {}, not decrementing",
                self.path,
                self.asset_count
            );
            self.asset_count = 0;
        }
    }
}

/// Parent manifest: `{"Projects": {<name>: ProjectRecord}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentManifest {
    #[serde(rename = "Projects", default)]
    pub projects: BTreeMap<String, ProjectRecord>,
}

impl ParentManifest {
    pub fn names(&self) -> Vec<String> {
        self.projects.keys().cloned().collect()
    }
}
