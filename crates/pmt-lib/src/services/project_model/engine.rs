// Game engine and DCC bridge operations
// Unreal project creation plus the Maya export and Unreal import hand-offs

use std::fs;
use std::path::{Path, PathBuf};

use super::ProjectModel;
use crate::models::{DccFile, DccSlot, DccTool, OperationResult};
use crate::services::dcc_bridge::{MayaExportBridge, UnrealImportBridge};
use crate::utils::error::{IoContext, PmtError, PmtResult};
use crate::utils::fs_ops::copy_template_dir;
use crate::utils::paths::{ProjectLayout, STUDIO_ASSETS};

/// Item name placeholder inside the empty Unreal template
const UNREAL_TEMPLATE_PLACEHOLDER: &str = "emptyUnreal";

impl ProjectModel {
    /// Copy the empty Unreal project into the engine depot and record it in the parent manifest
    pub fn create_unreal_project(&self, project: &str) -> OperationResult {
        self.try_create_unreal_project(project).into()
    }

    /// Export an asset's Maya scene to FBX in the intermediate depot,
    /// optionally importing the result into the project's Unreal project
    pub fn export_asset_from_maya(
        &self,
        project: &str,
        asset_name: &str,
        import_to_unreal: bool,
    ) -> OperationResult {
        self.try_export_asset_from_maya(project, asset_name, import_to_unreal)
            .into()
    }

    pub fn import_asset_to_unreal(&self, project: &str, fbx_path: &Path) -> OperationResult {
        self.try_import_asset_to_unreal(project, fbx_path)
            .map(|_| "Asset imported to Unreal Engine successfully.".to_string())
            .into()
    }

    fn try_create_unreal_project(&self, project: &str) -> PmtResult<String> {
        if project == STUDIO_ASSETS {
            return Err(PmtError::invalid(format!(
                "\"{}\" has no game engine depot.",
                STUDIO_ASSETS
            )));
        }

        let (_, layout) = self.require_project(project)?;

        let template = self.config.unreal_template();
        if !template.is_dir() {
            return Err(PmtError::template_missing(&template));
        }

        let engine_depot = layout.engine_depot();
        if has_uproject(&engine_depot) {
            return Err(PmtError::AlreadyExists {
                kind: "Unreal project for",
                name: project.to_string(),
            });
        }

        let copied = copy_template_dir(
            &template,
            &engine_depot,
            UNREAL_TEMPLATE_PLACEHOLDER,
            project,
        )
        .io_context(|| format!("Failed to create the Unreal project for \"{}\"", project))?;
        log::info!(
            "[project-model] Copied {} template files into {}",
            copied,
            engine_depot.display()
        );

        let engine = DccFile::new(
            format!("{}.uproject", project),
            self.config.versions.unreal.clone(),
        );
        self.parent.update(|manifest| {
            let record = manifest.projects.get_mut(project).ok_or_else(|| {
                PmtError::ProjectNotFound {
                    name: project.to_string(),
                }
            })?;
            record.game_engine = DccSlot::Present(engine);
            Ok(())
        })?;

        Ok(format!(
            "Unreal project for \"{}\" created successfully.",
            project
        ))
    }

    fn try_export_asset_from_maya(
        &self,
        project: &str,
        asset_name: &str,
        import_to_unreal: bool,
    ) -> PmtResult<String> {
        let (_, layout) = self.require_project(project)?;
        let record = self.project_manifest(project).get(asset_name)?;

        let scene_file = record
            .slot(DccTool::Maya)
            .file()
            .ok_or_else(|| PmtError::SlotNotFound {
                asset: asset_name.to_string(),
                tool: DccTool::Maya.to_string(),
            })?;

        let maya = self.config.maya_path.as_deref().ok_or_else(|| {
            PmtError::invalid("Maya executable is not configured. Set MAYA in the path config.")
        })?;

        if import_to_unreal {
            self.unreal_target(&layout)?;
        }

        let scene = PathBuf::from(&record.path)
            .join(DccTool::Maya.key())
            .join(&scene_file.filename);
        if !scene.is_file() {
            return Err(PmtError::PathNotFound {
                path: scene.display().to_string(),
            });
        }

        let export_dir = layout.intermediate_dir(record.asset_type);
        fs::create_dir_all(&export_dir)
            .io_context(|| format!("Failed to create {}", export_dir.display()))?;

        let fbx = MayaExportBridge::new(maya).export(
            self.runner.as_ref(),
            &scene,
            &self.layout.scripts_dir(),
            &export_dir,
        )?;

        if !import_to_unreal {
            return Ok("Asset exported successfully.".to_string());
        }

        self.try_import_asset_to_unreal(project, &fbx)?;
        Ok("Asset exported and imported to Unreal Engine successfully.".to_string())
    }

    fn try_import_asset_to_unreal(&self, project: &str, fbx_path: &Path) -> PmtResult<()> {
        let (_, layout) = self.require_project(project)?;
        let (unreal, uproject) = self.unreal_target(&layout)?;

        if !fbx_path.is_file() {
            return Err(PmtError::PathNotFound {
                path: fbx_path.display().to_string(),
            });
        }

        UnrealImportBridge::new(unreal).import(
            self.runner.as_ref(),
            &uproject,
            &self.layout.scripts_dir(),
            fbx_path,
        )
    }

    /// Configured editor executable and the project's `.uproject`
    fn unreal_target(&self, layout: &ProjectLayout) -> PmtResult<(String, PathBuf)> {
        let uproject = layout.uproject_path();
        if !uproject.is_file() {
            return Err(PmtError::invalid(format!(
                "Create the Unreal Engine project for \"{}\" first.",
                layout.name()
            )));
        }

        let unreal = self.config.unreal_path.clone().ok_or_else(|| {
            PmtError::invalid(
                "Unreal Engine executable is not configured. Set UNREAL in the path config.",
            )
        })?;

        Ok((unreal, uproject))
    }
}

fn has_uproject(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    entries.flatten().any(|entry| {
        entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("uproject"))
    })
}
