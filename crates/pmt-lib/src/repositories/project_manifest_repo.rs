// Project Manifest Repository
// Reads and writes <project>/Tools/PMT_<project>_Config.json

use std::path::{Path, PathBuf};

use crate::models::{AssetRecord, ProjectManifest};
use crate::utils::error::{PmtError, PmtResult};
use crate::utils::json_store::{read_json, read_json_or_default, write_json_atomic};
use crate::utils::paths::ProjectLayout;

/// Repository for one project's asset list
#[derive(Debug, Clone)]
pub struct ProjectManifestRepository {
    path: PathBuf,
}

impl ProjectManifestRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_project(layout: &ProjectLayout) -> Self {
        Self::new(layout.manifest_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load from disk; a missing or malformed file reads as an empty manifest
    pub fn load(&self) -> ProjectManifest {
        read_json_or_default(&self.path)
    }

    pub fn load_strict(&self) -> PmtResult<ProjectManifest> {
        if !self.path.exists() {
            return Ok(ProjectManifest::default());
        }
        read_json(&self.path)
    }

    pub fn save(&self, manifest: &ProjectManifest) -> PmtResult<()> {
        write_json_atomic(&self.path, manifest)
    }

    pub fn get(&self, asset_name: &str) -> PmtResult<AssetRecord> {
        self.load_strict()?
            .assets
            .get(asset_name)
            .cloned()
            .ok_or_else(|| PmtError::AssetNotFound {
                name: asset_name.to_string(),
            })
    }

    /// Load, apply `f`, save. Nothing is written if `f` fails.
    pub fn update<T, F>(&self, f: F) -> PmtResult<T>
    where
        F: FnOnce(&mut ProjectManifest) -> PmtResult<T>,
    {
        let mut manifest = self.load_strict()?;
        let out = f(&mut manifest)?;
        self.save(&manifest)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetType;
    use crate::utils::paths::StudioLayout;
    use tempfile::tempdir;

    #[test]
    fn test_for_project_path() {
        let layout = StudioLayout::new("/studio").project("Demo");
        let repo = ProjectManifestRepository::for_project(&layout);
        assert_eq!(
            repo.path(),
            Path::new("/studio/Demo/Tools/PMT_Demo_Config.json")
        );
    }

    #[test]
    fn test_round_trip_through_update() {
        let dir = tempdir().unwrap();
        let repo = ProjectManifestRepository::new(dir.path().join("PMT_Demo_Config.json"));
        repo.save(&ProjectManifest::default()).unwrap();

        repo.update(|m| {
            m.assets.insert(
                "Hero".to_string(),
                AssetRecord::new(AssetType::Characters, "/a".to_string(), "now".to_string()),
            );
            Ok(())
        })
        .unwrap();

        assert_eq!(repo.get("Hero").unwrap().asset_type, AssetType::Characters);
        assert!(matches!(repo.get("Villain"), Err(PmtError::AssetNotFound { .. })));
    }

    #[test]
    fn test_missing_manifest_lists_nothing() {
        let dir = tempdir().unwrap();
        let repo = ProjectManifestRepository::new(dir.path().join("missing.json"));
        assert!(repo.load().assets.is_empty());
    }
}
