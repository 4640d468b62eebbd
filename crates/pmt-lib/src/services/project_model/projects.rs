// Project operations
// Create, rename and delete project folders together with their parent manifest entries

use std::fs;
use std::path::Path;

use super::{build_project_tree, rebase_path, ProjectModel};
use crate::models::{OperationResult, ProjectRecord};
use crate::repositories::ProjectManifestRepository;
use crate::utils::error::{IoContext, PmtError, PmtResult};
use crate::utils::fs_ops::remove_dir_all_if_exists;
use crate::utils::paths::{
    is_reserved_project_name, manifest_file_name, validate_name, validate_new_project_name,
};

impl ProjectModel {
    /// Create the project tree, an empty project manifest and the parent manifest entry
    pub fn create_project(&self, name: &str) -> OperationResult {
        self.try_create_project(name).into()
    }

    pub fn rename_project(&self, old_name: &str, new_name: &str) -> OperationResult {
        self.try_rename_project(old_name, new_name).into()
    }

    /// Remove the project folder recursively, then its parent manifest entry. Irreversible.
    pub fn delete_project(&self, name: &str) -> OperationResult {
        self.try_delete_project(name).into()
    }

    fn try_create_project(&self, name: &str) -> PmtResult<String> {
        validate_new_project_name(name)?;

        let layout = self.layout.project(name);
        if layout.root().exists() {
            return Err(PmtError::AlreadyExists {
                kind: "Project",
                name: name.to_string(),
            });
        }

        if let Err(e) = build_project_tree(&layout, true) {
            discard_partial_tree(layout.root());
            return Err(e);
        }

        let registered = self.parent.update(|manifest| {
            if manifest.projects.contains_key(name) {
                log::warn!(
                    "[project-model] Replacing stale entry for {} with no folder on disk",
                    name
                );
            }
            manifest.projects.insert(
                name.to_string(),
                ProjectRecord::new(layout.root().to_string_lossy().to_string()),
            );
            Ok(())
        });

        if let Err(e) = registered {
            discard_partial_tree(layout.root());
            return Err(e);
        }

        log::info!("[project-model] Created project {}", name);
        Ok(format!("Project \"{}\" created successfully.", name))
    }

    fn try_rename_project(&self, old_name: &str, new_name: &str) -> PmtResult<String> {
        validate_name("Project", new_name)?;

        if is_reserved_project_name(old_name) {
            return Err(PmtError::invalid(format!(
                "\"{}\" cannot be renamed.",
                old_name
            )));
        }
        validate_new_project_name(new_name)?;

        if old_name == new_name {
            return Err(PmtError::invalid(
                "New project name is the same as the current name.",
            ));
        }

        let (_, old_layout) = self.require_project(old_name)?;
        let new_layout = self.layout.project(new_name);

        if new_layout.root().exists() || self.parent.load().projects.contains_key(new_name) {
            return Err(PmtError::AlreadyExists {
                kind: "Project",
                name: new_name.to_string(),
            });
        }

        // Directory first; the manifest file is then addressed inside its final location
        fs::rename(old_layout.root(), new_layout.root())
            .io_context(|| format!("Failed to rename project \"{}\"", old_name))?;

        let moved_manifest = new_layout.config_dir().join(manifest_file_name(old_name));
        let manifest_path = new_layout.manifest_path();

        if moved_manifest.exists() {
            if let Err(e) = fs::rename(&moved_manifest, &manifest_path) {
                revert_rename(new_layout.root(), old_layout.root());
                return Err(PmtError::Io {
                    context: format!("Failed to rename the manifest of \"{}\"", old_name),
                    source: e,
                });
            }
        } else {
            log::warn!(
                "[project-model] {} had no project manifest, writing an empty one",
                old_name
            );
        }

        let registered = self.parent.update(|manifest| {
            let mut record = manifest.projects.remove(old_name).ok_or_else(|| {
                PmtError::ProjectNotFound {
                    name: old_name.to_string(),
                }
            })?;
            record.path = new_layout.root().to_string_lossy().to_string();
            manifest.projects.insert(new_name.to_string(), record);
            Ok(())
        });

        if let Err(e) = registered {
            if manifest_path.exists() {
                revert_rename(&manifest_path, &moved_manifest);
            }
            revert_rename(new_layout.root(), old_layout.root());
            return Err(e);
        }

        let assets = ProjectManifestRepository::new(&manifest_path);
        let rewritten = assets.update(|manifest| {
            for record in manifest.assets.values_mut() {
                record.path = rebase_path(&record.path, old_layout.root(), new_layout.root());
            }
            Ok(())
        });
        if let Err(e) = rewritten {
            log::warn!(
                "[project-model] Asset paths of {} were not rewritten: {}",
                new_name,
                e
            );
        }

        log::info!("[project-model] Renamed project {} to {}", old_name, new_name);
        Ok(format!(
            "Project \"{}\" renamed to \"{}\" successfully.",
            old_name, new_name
        ))
    }

    fn try_delete_project(&self, name: &str) -> PmtResult<String> {
        validate_name("Project", name)?;
        if is_reserved_project_name(name) {
            return Err(PmtError::invalid(format!("\"{}\" cannot be deleted.", name)));
        }

        if !self.parent.load_strict()?.projects.contains_key(name) {
            return Err(PmtError::ProjectNotFound {
                name: name.to_string(),
            });
        }

        let layout = self.layout.project(name);
        if layout.root().exists() {
            fs::remove_dir_all(layout.root())
                .io_context(|| format!("Error deleting project \"{}\"", name))?;
        } else {
            log::warn!(
                "[project-model] Folder of {} already gone, removing its entry",
                name
            );
        }

        self.parent.update(|manifest| {
            manifest.projects.remove(name);
            Ok(())
        })?;

        log::info!("[project-model] Deleted project {}", name);
        Ok(format!("Project \"{}\" deleted successfully.", name))
    }
}

fn discard_partial_tree(root: &Path) {
    if let Err(e) = remove_dir_all_if_exists(root) {
        log::warn!(
            "[project-model] Could not clean up partial project {}: {}",
            root.display(),
            e
        );
    }
}

fn revert_rename(from: &Path, to: &Path) {
    if let Err(e) = fs::rename(from, to) {
        log::error!(
            "[project-model] Could not move {} back to {}: {}",
            from.display(),
            to.display(),
            e
        );
    }
}
