// Parent Manifest Repository
// Reads and writes <base>/Tools/PMT_ParentConfig.json

use std::path::{Path, PathBuf};

use crate::models::{ParentManifest, ProjectRecord};
use crate::utils::error::{PmtError, PmtResult};
use crate::utils::json_store::{read_json, read_json_or_default, write_json_atomic};

/// Repository for the studio-wide project list
#[derive(Debug, Clone)]
pub struct ParentManifestRepository {
    path: PathBuf,
}

impl ParentManifestRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load from disk; a missing or malformed file reads as an empty manifest
    pub fn load(&self) -> ParentManifest {
        read_json_or_default(&self.path)
    }

    /// Load from disk, surfacing parse errors. Used before writes so a corrupt
    /// manifest is never silently replaced by an empty one.
    pub fn load_strict(&self) -> PmtResult<ParentManifest> {
        if !self.path.exists() {
            return Ok(ParentManifest::default());
        }
        read_json(&self.path)
    }

    pub fn save(&self, manifest: &ParentManifest) -> PmtResult<()> {
        write_json_atomic(&self.path, manifest)
    }

    /// Write an empty `{"Projects": {}}` if no manifest exists yet
    pub fn ensure_exists(&self) -> PmtResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&ParentManifest::default())?;
        log::info!("[manifest] Created parent manifest at {}", self.path.display());
        Ok(true)
    }

    /// Get one project record
    pub fn get(&self, name: &str) -> PmtResult<ProjectRecord> {
        self.load_strict()?
            .projects
            .get(name)
            .cloned()
            .ok_or_else(|| PmtError::ProjectNotFound {
                name: name.to_string(),
            })
    }

    /// Load, apply `f`, save. Nothing is written if `f` fails.
    pub fn update<T, F>(&self, f: F) -> PmtResult<T>
    where
        F: FnOnce(&mut ParentManifest) -> PmtResult<T>,
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
    use tempfile::tempdir;

    #[test]
    fn test_ensure_exists_writes_empty_manifest() {
        let dir = tempdir().unwrap();
        let repo = ParentManifestRepository::new(dir.path().join("Tools").join("parent.json"));

        assert!(repo.ensure_exists().unwrap());
        assert!(!repo.ensure_exists().unwrap());

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"Projects": {}}));
    }

    #[test]
    fn test_update_and_get() {
        let dir = tempdir().unwrap();
        let repo = ParentManifestRepository::new(dir.path().join("parent.json"));

        repo.update(|m| {
            m.projects
                .insert("Demo".to_string(), ProjectRecord::new("/studio/Demo".to_string()));
            Ok(())
        })
        .unwrap();

        assert_eq!(repo.get("Demo").unwrap().path, "/studio/Demo");
        assert!(matches!(
            repo.get("Ghost"),
            Err(PmtError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let dir = tempdir().unwrap();
        let repo = ParentManifestRepository::new(dir.path().join("parent.json"));
        repo.ensure_exists().unwrap();

        let result: PmtResult<()> = repo.update(|m| {
            m.projects
                .insert("Demo".to_string(), ProjectRecord::new("/p".to_string()));
            Err(PmtError::invalid("boom"))
        });

        assert!(result.is_err());
        assert!(repo.load().projects.is_empty());
    }

    #[test]
    fn test_corrupt_manifest() {
        let dir = tempdir().unwrap();
        let repo = ParentManifestRepository::new(dir.path().join("parent.json"));
        std::fs::write(repo.path(), "[1, 2").unwrap();

        assert!(repo.load().projects.is_empty());
        assert!(repo.load_strict().is_err());
    }
}
