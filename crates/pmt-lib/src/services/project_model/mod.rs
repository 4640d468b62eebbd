// Project Model
// Sole mutator of the parent manifest, the project manifests and the studio directory tree.
//
// Every public mutating operation returns an OperationResult so a front end can show the
// message verbatim. Nothing is cached: each operation re-reads the manifests it needs.

mod assets;
mod engine;
mod projects;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::models::{AssetRecord, ParentManifest, ProjectManifest, ProjectRecord};
use crate::repositories::{ParentManifestRepository, ProjectManifestRepository};
use crate::services::dcc_bridge::{ProcessRunner, SystemProcessRunner};
use crate::services::shell;
use crate::utils::config::PmtConfig;
use crate::utils::error::{IoContext, PmtError, PmtResult};
use crate::utils::paths::{ProjectLayout, StudioLayout, STUDIO_ASSETS};

pub struct ProjectModel {
    config: PmtConfig,
    layout: StudioLayout,
    parent: ParentManifestRepository,
    runner: Box<dyn ProcessRunner>,
}

impl std::fmt::Debug for ProjectModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectModel")
            .field("base", &self.layout.base())
            .finish()
    }
}

impl ProjectModel {
    /// Prepare the studio base folder and open the model.
    ///
    /// Creates the base folder (hidden on Windows), the parent manifest and the
    /// Studio Assets pseudo-project when missing. Unlike every other operation this
    /// returns an error instead of an OperationResult: without a base folder nothing works.
    pub fn initialize(config: PmtConfig) -> PmtResult<Self> {
        Self::initialize_with_runner(config, Box::new(SystemProcessRunner))
    }

    /// Same as `initialize`, with a custom process runner for the DCC bridges
    pub fn initialize_with_runner(
        config: PmtConfig,
        runner: Box<dyn ProcessRunner>,
    ) -> PmtResult<Self> {
        let layout = StudioLayout::new(config.base_path.clone());
        let parent = ParentManifestRepository::new(layout.parent_manifest_path());

        let model = Self {
            config,
            layout,
            parent,
            runner,
        };

        model.create_base_folder()?;
        model.parent.ensure_exists()?;
        model.snapshot_path_config();

        if let Err(e) = model.ensure_studio_assets() {
            log::warn!("[project-model] Could not prepare {}: {}", STUDIO_ASSETS, e);
        }

        log::info!(
            "[project-model] Studio ready at {}",
            model.layout.base().display()
        );
        Ok(model)
    }

    pub fn config(&self) -> &PmtConfig {
        &self.config
    }

    pub fn layout(&self) -> &StudioLayout {
        &self.layout
    }

    /// Names of every registered project, read fresh from disk.
    /// A missing or malformed parent manifest lists nothing.
    pub fn list_projects(&self) -> Vec<String> {
        self.parent.load().names()
    }

    /// Full parent manifest, read fresh from disk
    pub fn projects(&self) -> ParentManifest {
        self.parent.load()
    }

    /// One project record, read fresh from disk
    pub fn project(&self, name: &str) -> Option<ProjectRecord> {
        self.parent.load().projects.get(name).cloned()
    }

    /// Full asset map of a project. The DCC filter is left to the caller
    /// (see `models::filter_by_tool`); unknown projects list nothing.
    pub fn list_assets(&self, project: &str) -> BTreeMap<String, AssetRecord> {
        self.project_manifest(project).load().assets
    }

    fn create_base_folder(&self) -> PmtResult<()> {
        let base = self.layout.base();
        if base.exists() {
            return Ok(());
        }

        fs::create_dir_all(base).map_err(|source| PmtError::BaseFolderUnavailable {
            path: base.to_path_buf(),
            source,
        })?;
        shell::hide_directory(base);

        log::info!("[project-model] Created base folder {}", base.display());
        Ok(())
    }

    /// Keep a copy of the path config next to the parent manifest for reference
    fn snapshot_path_config(&self) {
        let Some(source) = &self.config.path_config_file else {
            return;
        };

        let target = self.layout.path_config_snapshot();
        if let Err(e) = fs::copy(source, &target) {
            log::warn!(
                "[project-model] Could not copy path config {} to {}: {}",
                source.display(),
                target.display(),
                e
            );
        }
    }

    /// Create and register the Studio Assets pseudo-project. Returns true if anything changed.
    fn ensure_studio_assets(&self) -> PmtResult<bool> {
        let layout = self.layout.project(STUDIO_ASSETS);
        let mut changed = false;

        if !layout.root().exists() {
            build_project_tree(&layout, false)?;
            changed = true;
        }

        self.parent.update(|manifest| {
            if !manifest.projects.contains_key(STUDIO_ASSETS) {
                manifest.projects.insert(
                    STUDIO_ASSETS.to_string(),
                    ProjectRecord::new(layout.root().to_string_lossy().to_string()),
                );
                changed = true;
            }
            Ok(())
        })?;

        if changed {
            log::info!("[project-model] {} folder ready", STUDIO_ASSETS);
        }
        Ok(changed)
    }

    fn project_manifest(&self, project: &str) -> ProjectManifestRepository {
        ProjectManifestRepository::for_project(&self.layout.project(project))
    }

    /// Registered project with an existing folder
    fn require_project(&self, name: &str) -> PmtResult<(ProjectRecord, ProjectLayout)> {
        let record = self.parent.get(name)?;
        let layout = self.layout.project(name);

        if !layout.root().is_dir() {
            return Err(PmtError::ProjectNotFound {
                name: name.to_string(),
            });
        }

        Ok((record, layout))
    }
}

/// Build the fixed project tree: depots with type subfolders (the engine depot has none),
/// the config folder and an empty project manifest.
fn build_project_tree(layout: &ProjectLayout, with_engine: bool) -> PmtResult<()> {
    let context = || format!("Failed to create the project \"{}\"", layout.name());

    fs::create_dir_all(layout.root()).io_context(context)?;

    for (depot, typed) in layout.depots(with_engine) {
        fs::create_dir_all(&depot).io_context(context)?;
        if typed {
            for asset_type in crate::models::AssetType::ALL {
                fs::create_dir_all(depot.join(asset_type.folder())).io_context(context)?;
            }
        }
    }

    fs::create_dir_all(layout.config_dir()).io_context(context)?;
    ProjectManifestRepository::for_project(layout).save(&ProjectManifest::default())?;

    Ok(())
}

/// Rewrite `path` from under `old_root` to under `new_root`; other paths are returned unchanged
fn rebase_path(path: &str, old_root: &Path, new_root: &Path) -> String {
    match Path::new(path).strip_prefix(old_root) {
        Ok(rel) => new_root.join(rel).to_string_lossy().to_string(),
        Err(_) => path.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::services::dcc_bridge::testing::RecordingRunner;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Runner handle that can be shared with the model and inspected afterwards
    pub struct SharedRunner(pub Arc<RecordingRunner>);

    impl ProcessRunner for SharedRunner {
        fn run(
            &self,
            program: &str,
            args: &[String],
        ) -> std::io::Result<crate::services::dcc_bridge::ProcessOutput> {
            self.0.run(program, args)
        }
    }

    pub fn studio() -> (TempDir, ProjectModel) {
        studio_with_runner(Arc::new(RecordingRunner::succeeding()))
    }

    pub fn studio_with_runner(runner: Arc<RecordingRunner>) -> (TempDir, ProjectModel) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PmtConfig::new(dir.path().join("PMT"));
        config.templates_dir = dir.path().join("templates");
        config.maya_path = Some("maya".to_string());
        config.unreal_path = Some("UnrealEditor-Cmd".to_string());

        std::fs::create_dir_all(&config.templates_dir).unwrap();
        std::fs::write(config.substance_template(), b"SPP-EMPTY").unwrap();

        let model =
            ProjectModel::initialize_with_runner(config, Box::new(SharedRunner(runner))).unwrap();
        (dir, model)
    }
}
