// Asset data models
// One asset = one folder under a project's art depot, recorded in the project manifest

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::dcc::{DccFile, DccSlot, DccTool};

/// Asset category; decides the containing subfolder and the filename prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Characters,
    Environments,
    Props,
}

impl AssetType {
    pub const ALL: [AssetType; 3] = [
        AssetType::Characters,
        AssetType::Environments,
        AssetType::Props,
    ];

    /// Subfolder name inside the art and intermediate depots
    pub fn folder(&self) -> &'static str {
        match self {
            AssetType::Characters => "Characters",
            AssetType::Environments => "Environments",
            AssetType::Props => "Props",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            AssetType::Characters => "char_",
            AssetType::Environments => "env_",
            AssetType::Props => "prop_",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.folder())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "characters" | "character" | "char" => Ok(AssetType::Characters),
            "environments" | "environment" | "env" => Ok(AssetType::Environments),
            "props" | "prop" => Ok(AssetType::Props),
            other => Err(format!("Unknown asset type: {}", other)),
        }
    }
}

/// Asset entry in a project manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "creationDate")]
    pub creation_date: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub path: String,
    #[serde(rename = "Maya", default)]
    pub maya: DccSlot,
    #[serde(rename = "Substance", default)]
    pub substance: DccSlot,
}

impl AssetRecord {
    pub fn new(asset_type: AssetType, path: String, creation_date: String) -> Self {
        Self {
            creation_date,
            asset_type,
            path,
            maya: DccSlot::NotApplicable,
            substance: DccSlot::NotApplicable,
        }
    }

    pub fn slot(&self, tool: DccTool) -> &DccSlot {
        match tool {
            DccTool::Maya => &self.maya,
            DccTool::Substance => &self.substance,
        }
    }

    pub fn slot_mut(&mut self, tool: DccTool) -> &mut DccSlot {
        match tool {
            DccTool::Maya => &mut self.maya,
            DccTool::Substance => &mut self.substance,
        }
    }

    /// Tools with a populated slot
    pub fn present_tools(&self) -> Vec<DccTool> {
        DccTool::ALL
            .into_iter()
            .filter(|tool| self.slot(*tool).is_present())
            .collect()
    }

    /// `<prefix><assetName>.<ext>` for the given tool
    pub fn file_name_for(asset_type: AssetType, tool: DccTool, asset_name: &str) -> String {
        format!("{}{}.{}", asset_type.prefix(), asset_name, tool.extension())
    }

    /// New file record for a slot after the asset is renamed. Files that do not follow
    /// the naming convention keep their extension and get the conventional stem.
    pub fn renamed_file(&self, tool: DccTool, new_asset_name: &str) -> Option<DccFile> {
        let file = self.slot(tool).file()?;
        let extension = std::path::Path::new(&file.filename)
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| tool.extension().to_string());

        Some(DccFile {
            filename: format!("{}{}.{}", self.asset_type.prefix(), new_asset_name, extension),
            version: file.version.clone(),
        })
    }
}

/// Project manifest: `{"Assets": {<name>: AssetRecord}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(rename = "Assets", default)]
    pub assets: BTreeMap<String, AssetRecord>,
}

/// Keep only assets with a populated slot for `tool`
pub fn filter_by_tool(
    assets: &BTreeMap<String, AssetRecord>,
    tool: DccTool,
) -> BTreeMap<String, AssetRecord> {
    assets
        .iter()
        .filter(|(_, record)| record.slot(tool).is_present())
        .map(|(name, record)| (name.clone(), record.clone()))
        .collect()
}
