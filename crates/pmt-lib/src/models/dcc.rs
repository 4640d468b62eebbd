// DCC slot models
// A slot is either "NA" or a {filename, version} record, both on disk and in memory

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Manifest sentinel for an unused slot
pub const NOT_APPLICABLE: &str = "NA";

/// Authoring tool with a per-asset slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DccTool {
    Maya,
    Substance,
}

impl DccTool {
    pub const ALL: [DccTool; 2] = [DccTool::Maya, DccTool::Substance];

    /// Manifest key and subfolder name
    pub fn key(&self) -> &'static str {
        match self {
            DccTool::Maya => "Maya",
            DccTool::Substance => "Substance",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            // ASCII scenes, so a placeholder can be written by hand
            DccTool::Maya => "ma",
            DccTool::Substance => "spp",
        }
    }
}

impl std::fmt::Display for DccTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DccTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maya" => Ok(DccTool::Maya),
            "substance" | "substance painter" => Ok(DccTool::Substance),
            other => Err(format!("Unknown DCC tool: {}", other)),
        }
    }
}

/// A file created by a DCC tool (or the game engine project file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DccFile {
    pub filename: String,
    pub version: String,
}

impl DccFile {
    pub fn new(filename: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            version: version.into(),
        }
    }
}

/// Slot value: unused, or the file created for it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawSlot", into = "RawSlot")]
pub enum DccSlot {
    #[default]
    NotApplicable,
    Present(DccFile),
}

impl DccSlot {
    pub fn is_present(&self) -> bool {
        matches!(self, DccSlot::Present(_))
    }

    pub fn file(&self) -> Option<&DccFile> {
        match self {
            DccSlot::Present(file) => Some(file),
            DccSlot::NotApplicable => None,
        }
    }
}

/// On-disk shape: the string "NA" or an object
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSlot {
    File(DccFile),
    Marker(String),
}

impl From<RawSlot> for DccSlot {
    fn from(raw: RawSlot) -> Self {
        match raw {
            RawSlot::File(file) => DccSlot::Present(file),
            RawSlot::Marker(_) => DccSlot::NotApplicable,
        }
    }
}

impl From<DccSlot> for RawSlot {
    fn from(slot: DccSlot) -> Self {
        match slot {
            DccSlot::Present(file) => RawSlot::File(file),
            DccSlot::NotApplicable => RawSlot::Marker(NOT_APPLICABLE.to_string()),
        }
    }
}
