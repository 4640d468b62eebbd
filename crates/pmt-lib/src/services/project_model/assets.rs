// Asset operations
// Asset folders under a project's art depot, their DCC files and project manifest entries

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::ProjectModel;
use crate::models::{
    now_timestamp, AssetRecord, AssetType, DccFile, DccSlot, DccTool, OperationResult,
};
use crate::services::shell;
use crate::utils::error::{IoContext, PmtError, PmtResult};
use crate::utils::fs_ops::{copy_dir_recursive, is_dir_empty, remove_dir_all_if_exists};
use crate::utils::paths::validate_name;

impl ProjectModel {
    /// Create an asset folder with one placeholder file per requested tool.
    ///
    /// With `individual_files` the asset may already exist: existing slots and the
    /// creation date are kept and only missing tool files are added.
    pub fn create_asset(
        &self,
        project: &str,
        asset_type: AssetType,
        asset_name: &str,
        tools: &[DccTool],
        individual_files: bool,
    ) -> OperationResult {
        self.try_create_asset(project, asset_type, asset_name, tools, individual_files)
            .into()
    }

    /// Remove one tool's files from an asset. The asset itself goes once its folder is empty.
    pub fn delete_asset(&self, project: &str, asset_name: &str, tool: DccTool) -> OperationResult {
        self.try_delete_asset(project, asset_name, tool).into()
    }

    /// Copy an asset into each target project, then remove the source when `move_asset` is set
    pub fn copy_move_asset(
        &self,
        source: &str,
        targets: &[String],
        asset_name: &str,
        move_asset: bool,
    ) -> OperationResult {
        self.try_copy_move_asset(source, targets, asset_name, move_asset)
            .into()
    }

    pub fn rename_asset(&self, project: &str, old_name: &str, new_name: &str) -> OperationResult {
        self.try_rename_asset(project, old_name, new_name).into()
    }

    /// Open a DCC file or folder with the default application
    pub fn open_asset(&self, path: &Path) -> OperationResult {
        shell::open_path(path)
            .map(|_| format!("Opening {}.", path.display()))
            .into()
    }

    fn try_create_asset(
        &self,
        project: &str,
        asset_type: AssetType,
        asset_name: &str,
        tools: &[DccTool],
        individual_files: bool,
    ) -> PmtResult<String> {
        validate_name("Asset", asset_name)?;
        let (_, layout) = self.require_project(project)?;

        let tools: BTreeSet<DccTool> = tools.iter().copied().collect();
        if tools.is_empty() {
            return Err(PmtError::invalid("Select at least one DCC tool."));
        }

        let repo = self.project_manifest(project);
        let existing = repo.load_strict()?.assets.get(asset_name).cloned();
        let asset_dir = layout.asset_dir(asset_type, asset_name);

        if !individual_files && (existing.is_some() || asset_dir.exists()) {
            return Err(PmtError::AlreadyExists {
                kind: "Asset",
                name: asset_name.to_string(),
            });
        }

        if let Some(record) = &existing {
            if record.asset_type != asset_type {
                return Err(PmtError::invalid(format!(
                    "Asset \"{}\" is a {} asset, not {}.",
                    asset_name, record.asset_type, asset_type
                )));
            }
        }

        let mut record = existing.clone().unwrap_or_else(|| {
            AssetRecord::new(
                asset_type,
                asset_dir.to_string_lossy().to_string(),
                now_timestamp(),
            )
        });

        let pending: Vec<DccTool> = tools
            .into_iter()
            .filter(|tool| !slot_file_exists(&asset_dir, record.slot(*tool), *tool))
            .collect();

        if pending.is_empty() {
            return Err(PmtError::AlreadyExists {
                kind: "Asset",
                name: asset_name.to_string(),
            });
        }

        let substance_template = self.config.substance_template();
        if pending.contains(&DccTool::Substance) && !substance_template.is_file() {
            return Err(PmtError::template_missing(&substance_template));
        }

        let created_folder = !asset_dir.exists();
        let written = pending.iter().try_for_each(|tool| -> PmtResult<()> {
            let file = self.write_placeholder(&asset_dir, asset_type, asset_name, *tool)?;
            *record.slot_mut(*tool) = DccSlot::Present(file);
            Ok(())
        });

        let saved = written.and_then(|_| {
            repo.update(|manifest| {
                manifest.assets.insert(asset_name.to_string(), record.clone());
                Ok(())
            })
        });

        if let Err(e) = saved {
            if created_folder {
                if let Err(cleanup) = remove_dir_all_if_exists(&asset_dir) {
                    log::warn!(
                        "[project-model] Could not remove partial asset {}: {}",
                        asset_dir.display(),
                        cleanup
                    );
                }
            }
            return Err(e);
        }

        if existing.is_none() {
            self.parent.update(|manifest| {
                if let Some(project_record) = manifest.projects.get_mut(project) {
                    project_record.increment_assets();
                }
                Ok(())
            })?;
            log::info!("[project-model] Created asset {} in {}", asset_name, project);
            return Ok(format!("Asset \"{}\" created successfully.", asset_name));
        }

        let names: Vec<String> = pending.iter().map(|tool| tool.to_string()).collect();
        log::info!(
            "[project-model] Added {} to asset {} in {}",
            names.join(", "),
            asset_name,
            project
        );
        Ok(format!(
            "Created {} file(s) for asset \"{}\".",
            names.join(" and "),
            asset_name
        ))
    }

    /// Write the placeholder for one tool into `<asset>/<Tool>/`
    fn write_placeholder(
        &self,
        asset_dir: &Path,
        asset_type: AssetType,
        asset_name: &str,
        tool: DccTool,
    ) -> PmtResult<DccFile> {
        let tool_dir = asset_dir.join(tool.key());
        fs::create_dir_all(&tool_dir)
            .io_context(|| format!("Failed to create {} folder for \"{}\"", tool, asset_name))?;

        let filename = AssetRecord::file_name_for(asset_type, tool, asset_name);
        let target = tool_dir.join(&filename);

        let version = match tool {
            DccTool::Maya => {
                let version = &self.config.versions.maya;
                fs::write(&target, maya_ascii_header(version))
                    .io_context(|| format!("Failed to write {}", target.display()))?;
                version.clone()
            }
            DccTool::Substance => {
                let template = self.config.substance_template();
                fs::copy(&template, &target).io_context(|| {
                    format!("Failed to copy {} to {}", template.display(), target.display())
                })?;
                self.config.versions.substance.clone()
            }
        };

        Ok(DccFile::new(filename, version))
    }

    fn try_delete_asset(
        &self,
        project: &str,
        asset_name: &str,
        tool: DccTool,
    ) -> PmtResult<String> {
        self.require_project(project)?;
        let repo = self.project_manifest(project);
        let mut record = repo.get(asset_name)?;

        let asset_dir = PathBuf::from(&record.path);
        let tool_dir = asset_dir.join(tool.key());

        if !record.slot(tool).is_present() && !tool_dir.exists() {
            return Err(PmtError::SlotNotFound {
                asset: asset_name.to_string(),
                tool: tool.to_string(),
            });
        }

        remove_dir_all_if_exists(&tool_dir).io_context(|| {
            format!("Failed to delete {} files of \"{}\"", tool, asset_name)
        })?;
        *record.slot_mut(tool) = DccSlot::NotApplicable;

        if !asset_folder_empty(&asset_dir) {
            repo.update(|manifest| {
                manifest.assets.insert(asset_name.to_string(), record.clone());
                Ok(())
            })?;

            log::info!("[project-model] Deleted {} slot of {} in {}", tool, asset_name, project);
            return Ok(format!(
                "Deleted {} file for asset \"{}\".",
                tool, asset_name
            ));
        }

        remove_dir_all_if_exists(&asset_dir)
            .io_context(|| format!("Failed to delete asset \"{}\"", asset_name))?;
        repo.update(|manifest| {
            manifest.assets.remove(asset_name);
            Ok(())
        })?;
        self.parent.update(|manifest| {
            if let Some(project_record) = manifest.projects.get_mut(project) {
                project_record.decrement_assets();
            }
            Ok(())
        })?;

        log::info!("[project-model] Deleted asset {} from {}", asset_name, project);
        Ok(format!("Deleted entire asset \"{}\".", asset_name))
    }

    fn try_copy_move_asset(
        &self,
        source: &str,
        targets: &[String],
        asset_name: &str,
        move_asset: bool,
    ) -> PmtResult<String> {
        self.require_project(source)?;
        let source_repo = self.project_manifest(source);
        let record = source_repo.get(asset_name)?;

        let targets: Vec<&String> = targets
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if targets.is_empty() {
            return Err(PmtError::invalid("Select at least one target project."));
        }

        let mut target_layouts = Vec::with_capacity(targets.len());
        for target in &targets {
            if target.as_str() == source {
                return Err(PmtError::invalid(format!(
                    "Asset \"{}\" is already in \"{}\".",
                    asset_name, source
                )));
            }
            let (_, layout) = self.require_project(target)?;

            let existing = self.project_manifest(target).load_strict()?;
            if let Some(other) = existing.assets.get(asset_name) {
                if other.asset_type != record.asset_type {
                    return Err(PmtError::invalid(format!(
                        "Project \"{}\" already has a {} asset named \"{}\".",
                        target, other.asset_type, asset_name
                    )));
                }
            }
            target_layouts.push(layout);
        }

        let source_dir = PathBuf::from(&record.path);
        if !source_dir.is_dir() {
            return Err(PmtError::PathNotFound {
                path: source_dir.display().to_string(),
            });
        }

        // Phase 1: files only. Folders created here are removed again on failure.
        let mut created: Vec<PathBuf> = Vec::new();
        for layout in &target_layouts {
            let target_dir = layout.asset_dir(record.asset_type, asset_name);
            if !target_dir.exists() {
                created.push(target_dir.clone());
            }

            if let Err(e) = copy_dir_recursive(&source_dir, &target_dir) {
                for dir in created.iter().rev() {
                    if let Err(cleanup) = remove_dir_all_if_exists(dir) {
                        log::warn!(
                            "[project-model] Could not remove {} after failed copy: {}",
                            dir.display(),
                            cleanup
                        );
                    }
                }
                return Err(PmtError::Io {
                    context: format!("Error copying asset to \"{}\"", layout.name()),
                    source: e,
                });
            }
        }

        // Phase 2: manifests
        let mut new_in: Vec<String> = Vec::new();
        for layout in &target_layouts {
            let mut copy = record.clone();
            copy.path = layout
                .asset_dir(record.asset_type, asset_name)
                .to_string_lossy()
                .to_string();

            let inserted = self.project_manifest(layout.name()).update(|manifest| {
                Ok(manifest
                    .assets
                    .insert(asset_name.to_string(), copy)
                    .is_none())
            })?;
            if inserted {
                new_in.push(layout.name().to_string());
            }
        }

        if move_asset {
            remove_dir_all_if_exists(&source_dir)
                .io_context(|| format!("Failed to remove \"{}\" from \"{}\"", asset_name, source))?;
            source_repo.update(|manifest| {
                manifest.assets.remove(asset_name);
                Ok(())
            })?;
        }

        self.parent.update(|manifest| {
            for name in &new_in {
                if let Some(project_record) = manifest.projects.get_mut(name) {
                    project_record.increment_assets();
                }
            }
            if move_asset {
                if let Some(project_record) = manifest.projects.get_mut(source) {
                    project_record.decrement_assets();
                }
            }
            Ok(())
        })?;

        let verb = if move_asset { "moved" } else { "copied" };
        let names: Vec<&str> = targets.iter().map(|t| t.as_str()).collect();
        log::info!(
            "[project-model] {} asset {} from {} to {:?}",
            verb,
            asset_name,
            source,
            names
        );
        Ok(format!(
            "Asset \"{}\" successfully {} to {}.",
            asset_name,
            verb,
            names.join(", ")
        ))
    }

    fn try_rename_asset(&self, project: &str, old_name: &str, new_name: &str) -> PmtResult<String> {
        validate_name("Asset", new_name)?;
        if old_name == new_name {
            return Err(PmtError::invalid(
                "New asset name is the same as the current name.",
            ));
        }

        self.require_project(project)?;
        let repo = self.project_manifest(project);
        let manifest = repo.load_strict()?;

        let record = manifest
            .assets
            .get(old_name)
            .cloned()
            .ok_or_else(|| PmtError::AssetNotFound {
                name: old_name.to_string(),
            })?;
        if manifest.assets.contains_key(new_name) {
            return Err(PmtError::AlreadyExists {
                kind: "Asset",
                name: new_name.to_string(),
            });
        }

        let old_dir = PathBuf::from(&record.path);
        let new_dir = match old_dir.parent() {
            Some(parent) => parent.join(new_name),
            None => {
                return Err(PmtError::invalid(format!(
                    "Asset \"{}\" has no containing folder.",
                    old_name
                )))
            }
        };
        if new_dir.exists() {
            return Err(PmtError::AlreadyExists {
                kind: "Asset",
                name: new_name.to_string(),
            });
        }

        fs::rename(&old_dir, &new_dir)
            .io_context(|| format!("Failed to rename asset \"{}\"", old_name))?;

        let mut renamed = record.clone();
        renamed.path = new_dir.to_string_lossy().to_string();
        let mut moved_files: Vec<(PathBuf, PathBuf)> = Vec::new();

        let outcome =
            rename_slot_files(&record, &mut renamed, &new_dir, new_name, &mut moved_files);

        let saved = outcome.and_then(|_| {
            repo.update(|manifest| {
                manifest.assets.remove(old_name);
                manifest.assets.insert(new_name.to_string(), renamed.clone());
                Ok(())
            })
        });

        if let Err(e) = saved {
            for (from, to) in moved_files.iter().rev() {
                if let Err(undo) = fs::rename(to, from) {
                    log::error!(
                        "[project-model] Could not restore {}: {}",
                        from.display(),
                        undo
                    );
                }
            }
            if let Err(undo) = fs::rename(&new_dir, &old_dir) {
                log::error!(
                    "[project-model] Could not restore {}: {}",
                    old_dir.display(),
                    undo
                );
            }
            return Err(e);
        }

        log::info!(
            "[project-model] Renamed asset {} to {} in {}",
            old_name,
            new_name,
            project
        );
        Ok(format!(
            "Asset \"{}\" renamed to \"{}\" successfully.",
            old_name, new_name
        ))
    }
}

/// Minimal Maya ASCII scene Maya accepts as an empty file
fn maya_ascii_header(version: &str) -> String {
    format!(
        "//Maya ASCII {version} scene\nrequires maya \"{version}\";\n",
        version = version
    )
}

/// A missing folder counts as empty. An unreadable one is kept.
fn asset_folder_empty(asset_dir: &Path) -> bool {
    if !asset_dir.exists() {
        return true;
    }
    match is_dir_empty(asset_dir) {
        Ok(empty) => empty,
        Err(e) => {
            log::warn!(
                "[project-model] Could not read {}: {}, keeping the asset",
                asset_dir.display(),
                e
            );
            false
        }
    }
}

/// Rename every populated slot file inside the already renamed asset folder.
/// Renamed pairs are pushed to `moved` so a caller can undo them.
fn rename_slot_files(
    record: &AssetRecord,
    renamed: &mut AssetRecord,
    asset_dir: &Path,
    new_name: &str,
    moved: &mut Vec<(PathBuf, PathBuf)>,
) -> PmtResult<()> {
    for tool in record.present_tools() {
        let (Some(current), Some(next)) =
            (record.slot(tool).file(), record.renamed_file(tool, new_name))
        else {
            continue;
        };

        let from = asset_dir.join(tool.key()).join(&current.filename);
        let to = asset_dir.join(tool.key()).join(&next.filename);

        if from.exists() {
            fs::rename(&from, &to).io_context(|| format!("Failed to rename {}", from.display()))?;
            moved.push((from, to));
        } else {
            log::warn!(
                "[project-model] {} is missing, only the manifest entry is renamed",
                from.display()
            );
        }

        *renamed.slot_mut(tool) = DccSlot::Present(next);
    }
    Ok(())
}

fn slot_file_exists(asset_dir: &Path, slot: &DccSlot, tool: DccTool) -> bool {
    slot.file()
        .map(|file| asset_dir.join(tool.key()).join(&file.filename).is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::studio;
    use super::*;
    use crate::utils::paths::ART_DEPOT;

    fn asset_dir(model: &ProjectModel, project: &str, folder: &str, name: &str) -> PathBuf {
        model
            .layout()
            .base()
            .join(project)
            .join(ART_DEPOT)
            .join(folder)
            .join(name)
    }

    #[test]
    fn test_demo_hero_scenario() {
        let (_dir, model) = studio();
        assert!(model.create_project("Demo").success);

        let result = model.create_asset(
            "Demo",
            AssetType::Characters,
            "Hero",
            &[DccTool::Maya],
            false,
        );
        assert!(result.success, "{}", result.message);
        assert_eq!(result.message, "Asset \"Hero\" created successfully.");

        let raw = fs::read_to_string(
            model
                .layout()
                .base()
                .join("Demo")
                .join("Tools")
                .join("PMT_Demo_Config.json"),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Assets"]["Hero"]["type"], "Characters");
        assert_eq!(value["Assets"]["Hero"]["Maya"]["filename"], "char_Hero.ma");
        assert_eq!(value["Assets"]["Hero"]["Maya"]["version"], "2024");
        assert_eq!(value["Assets"]["Hero"]["Substance"], "NA");

        assert_eq!(model.project("Demo").unwrap().asset_count, 1);

        let scene = asset_dir(&model, "Demo", "Characters", "Hero")
            .join("Maya")
            .join("char_Hero.ma");
        assert!(fs::read_to_string(scene)
            .unwrap()
            .starts_with("//Maya ASCII 2024 scene\n"));
    }

    #[test]
    fn test_create_asset_with_substance_copies_template() {
        let (_dir, model) = studio();
        model.create_project("Demo");

        let result = model.create_asset(
            "Demo",
            AssetType::Props,
            "Crate",
            &[DccTool::Maya, DccTool::Substance],
            false,
        );
        assert!(result.success, "{}", result.message);

        let dir = asset_dir(&model, "Demo", "Props", "Crate");
        assert_eq!(
            fs::read(dir.join("Substance").join("prop_Crate.spp")).unwrap(),
            b"SPP-EMPTY"
        );
        let record = &model.list_assets("Demo")["Crate"];
        assert_eq!(record.substance.file().unwrap().version, "2023");
    }

    #[test]
    fn test_create_asset_missing_template_touches_nothing() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        fs::remove_file(model.config().substance_template()).unwrap();

        let result = model.create_asset(
            "Demo",
            AssetType::Props,
            "Crate",
            &[DccTool::Substance],
            false,
        );
        assert!(!result.success);
        assert_eq!(result.code.as_deref(), Some("PMT_TEMPLATE_NOT_FOUND"));
        assert!(model.list_assets("Demo").is_empty());
        assert!(!asset_dir(&model, "Demo", "Props", "Crate").exists());
        assert_eq!(model.project("Demo").unwrap().asset_count, 0);
    }

    #[test]
    fn test_create_asset_existing_fails_without_individual_files() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset("Demo", AssetType::Props, "Crate", &[DccTool::Maya], false);

        let again = model.create_asset("Demo", AssetType::Props, "Crate", &[DccTool::Maya], false);
        assert!(!again.success);
        assert_eq!(again.code.as_deref(), Some("PMT_ALREADY_EXISTS"));
        assert_eq!(model.project("Demo").unwrap().asset_count, 1);
    }

    #[test]
    fn test_create_asset_additive_mode() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset("Demo", AssetType::Characters, "Hero", &[DccTool::Maya], false);
        let before = model.list_assets("Demo")["Hero"].clone();

        let result = model.create_asset(
            "Demo",
            AssetType::Characters,
            "Hero",
            &[DccTool::Maya, DccTool::Substance],
            true,
        );
        assert!(result.success, "{}", result.message);
        assert_eq!(result.message, "Created Substance file(s) for asset \"Hero\".");

        let after = model.list_assets("Demo")["Hero"].clone();
        assert_eq!(after.creation_date, before.creation_date);
        assert_eq!(after.maya, before.maya);
        assert_eq!(after.substance.file().unwrap().filename, "char_Hero.spp");
        assert_eq!(model.project("Demo").unwrap().asset_count, 1);
    }

    #[test]
    fn test_create_asset_requires_tool_and_project() {
        let (_dir, model) = studio();
        model.create_project("Demo");

        let none = model.create_asset("Demo", AssetType::Props, "Crate", &[], false);
        assert_eq!(none.code.as_deref(), Some("PMT_INVALID_INPUT"));

        let ghost = model.create_asset("Ghost", AssetType::Props, "Crate", &[DccTool::Maya], false);
        assert_eq!(ghost.code.as_deref(), Some("PMT_NOT_FOUND"));

        let blank = model.create_asset("Demo", AssetType::Props, " ", &[DccTool::Maya], false);
        assert_eq!(blank.code.as_deref(), Some("PMT_INVALID_INPUT"));
    }

    #[test]
    fn test_list_assets_unknown_project_is_empty() {
        let (_dir, model) = studio();
        assert!(model.list_assets("Ghost").is_empty());
    }

    #[test]
    fn test_delete_non_last_slot_keeps_asset() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset(
            "Demo",
            AssetType::Props,
            "Crate",
            &[DccTool::Maya, DccTool::Substance],
            false,
        );

        let result = model.delete_asset("Demo", "Crate", DccTool::Maya);
        assert!(result.success, "{}", result.message);
        assert_eq!(result.message, "Deleted Maya file for asset \"Crate\".");

        let dir = asset_dir(&model, "Demo", "Props", "Crate");
        assert!(!dir.join("Maya").exists());
        assert!(dir.join("Substance").is_dir());

        let record = &model.list_assets("Demo")["Crate"];
        assert!(!record.maya.is_present());
        assert!(record.substance.is_present());
        assert_eq!(model.project("Demo").unwrap().asset_count, 1);
    }

    #[test]
    fn test_delete_last_slot_removes_asset() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset("Demo", AssetType::Props, "Crate", &[DccTool::Maya], false);
        model.create_asset("Demo", AssetType::Props, "Barrel", &[DccTool::Maya], false);
        assert_eq!(model.project("Demo").unwrap().asset_count, 2);

        let result = model.delete_asset("Demo", "Crate", DccTool::Maya);
        assert!(result.success, "{}", result.message);
        assert_eq!(result.message, "Deleted entire asset \"Crate\".");

        assert!(!asset_dir(&model, "Demo", "Props", "Crate").exists());
        assert!(!model.list_assets("Demo").contains_key("Crate"));
        assert_eq!(model.project("Demo").unwrap().asset_count, 1);
    }

    #[test]
    fn test_delete_asset_not_found() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset("Demo", AssetType::Props, "Crate", &[DccTool::Maya], false);

        let missing = model.delete_asset("Demo", "Ghost", DccTool::Maya);
        assert_eq!(missing.code.as_deref(), Some("PMT_NOT_FOUND"));

        let no_slot = model.delete_asset("Demo", "Crate", DccTool::Substance);
        assert_eq!(no_slot.code.as_deref(), Some("PMT_NOT_FOUND"));
        assert_eq!(no_slot.message, "Asset \"Crate\" has no Substance file.");
    }

    #[test]
    fn test_move_asset() {
        let (_dir, model) = studio();
        model.create_project("P");
        model.create_project("Q");
        model.create_asset("P", AssetType::Environments, "Forest", &[DccTool::Maya], false);

        let result = model.copy_move_asset("P", &["Q".to_string()], "Forest", true);
        assert!(result.success, "{}", result.message);

        let q_dir = asset_dir(&model, "Q", "Environments", "Forest");
        let q_assets = model.list_assets("Q");
        assert_eq!(q_assets["Forest"].path, q_dir.to_string_lossy());
        assert!(q_dir.join("Maya").join("env_Forest.ma").is_file());

        assert!(!model.list_assets("P").contains_key("Forest"));
        assert!(!asset_dir(&model, "P", "Environments", "Forest").exists());
        assert_eq!(model.project("P").unwrap().asset_count, 0);
        assert_eq!(model.project("Q").unwrap().asset_count, 1);
    }

    #[test]
    fn test_copy_asset_keeps_source() {
        let (_dir, model) = studio();
        model.create_project("P");
        model.create_project("Q");
        model.create_project("R");
        model.create_asset("P", AssetType::Props, "Crate", &[DccTool::Maya], false);
        let source = model.list_assets("P")["Crate"].clone();

        let targets = vec!["Q".to_string(), "R".to_string()];
        let result = model.copy_move_asset("P", &targets, "Crate", false);
        assert!(result.success, "{}", result.message);
        assert_eq!(result.message, "Asset \"Crate\" successfully copied to Q, R.");

        assert_eq!(model.list_assets("P")["Crate"], source);
        assert!(asset_dir(&model, "P", "Props", "Crate").is_dir());
        for target in ["Q", "R"] {
            assert!(model.list_assets(target).contains_key("Crate"));
            assert_eq!(model.project(target).unwrap().asset_count, 1);
        }

        // Copying again overwrites without counting twice
        assert!(model.copy_move_asset("P", &targets, "Crate", false).success);
        assert_eq!(model.project("Q").unwrap().asset_count, 1);
    }

    #[test]
    fn test_copy_asset_validates_targets_first() {
        let (_dir, model) = studio();
        model.create_project("P");
        model.create_project("Q");
        model.create_asset("P", AssetType::Props, "Crate", &[DccTool::Maya], false);

        let targets = vec!["Q".to_string(), "Ghost".to_string()];
        let result = model.copy_move_asset("P", &targets, "Crate", true);
        assert_eq!(result.code.as_deref(), Some("PMT_NOT_FOUND"));
        assert!(!asset_dir(&model, "Q", "Props", "Crate").exists());
        assert!(model.list_assets("P").contains_key("Crate"));

        let itself = model.copy_move_asset("P", &["P".to_string()], "Crate", false);
        assert_eq!(itself.code.as_deref(), Some("PMT_INVALID_INPUT"));

        let empty = model.copy_move_asset("P", &[], "Crate", false);
        assert_eq!(empty.code.as_deref(), Some("PMT_INVALID_INPUT"));
    }

    #[test]
    fn test_rename_asset_is_structural() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset(
            "Demo",
            AssetType::Characters,
            "Hero",
            &[DccTool::Maya, DccTool::Substance],
            false,
        );

        let result = model.rename_asset("Demo", "Hero", "HeroHero");
        assert!(result.success, "{}", result.message);

        let dir = asset_dir(&model, "Demo", "Characters", "HeroHero");
        assert!(dir.join("Maya").join("char_HeroHero.ma").is_file());
        assert!(dir.join("Substance").join("char_HeroHero.spp").is_file());
        assert!(!asset_dir(&model, "Demo", "Characters", "Hero").exists());

        let assets = model.list_assets("Demo");
        assert!(!assets.contains_key("Hero"));
        let record = &assets["HeroHero"];
        assert_eq!(record.path, dir.to_string_lossy());
        assert_eq!(record.maya.file().unwrap().filename, "char_HeroHero.ma");

        // Renaming back must not produce char_HeroHeroHero or similar
        assert!(model.rename_asset("Demo", "HeroHero", "Hero").success);
        let record = &model.list_assets("Demo")["Hero"];
        assert_eq!(record.maya.file().unwrap().filename, "char_Hero.ma");
    }

    #[test]
    fn test_copy_asset_rejects_type_conflict() {
        let (_dir, model) = studio();
        model.create_project("P");
        model.create_project("Q");
        model.create_asset("P", AssetType::Environments, "Rock", &[DccTool::Maya], false);
        model.create_asset("Q", AssetType::Props, "Rock", &[DccTool::Maya], false);

        let result = model.copy_move_asset("P", &["Q".to_string()], "Rock", false);
        assert!(!result.success);
        assert_eq!(result.code.as_deref(), Some("PMT_INVALID_INPUT"));

        assert_eq!(model.list_assets("Q")["Rock"].asset_type, AssetType::Props);
        assert!(!asset_dir(&model, "Q", "Environments", "Rock").exists());
        assert!(asset_dir(&model, "Q", "Props", "Rock").is_dir());
        assert_eq!(model.project("P").unwrap().asset_count, 1);
        assert_eq!(model.project("Q").unwrap().asset_count, 1);
    }

    #[test]
    fn test_copy_asset_removes_created_folders_when_a_copy_fails() {
        let (_dir, model) = studio();
        for name in ["P", "Q", "R"] {
            model.create_project(name);
        }
        model.create_asset("P", AssetType::Props, "Crate", &[DccTool::Maya], false);

        // Q is copied first; a file where R's asset folder goes makes the second copy fail
        let blocker = asset_dir(&model, "R", "Props", "Crate");
        fs::write(&blocker, "not a folder").unwrap();

        let targets = vec!["R".to_string(), "Q".to_string()];
        let result = model.copy_move_asset("P", &targets, "Crate", true);
        assert!(!result.success);
        assert_eq!(result.code.as_deref(), Some("PMT_IO_ERROR"));

        assert!(!asset_dir(&model, "Q", "Props", "Crate").exists());
        assert!(blocker.is_file());
        for target in ["Q", "R"] {
            assert!(!model.list_assets(target).contains_key("Crate"));
            assert_eq!(model.project(target).unwrap().asset_count, 0);
        }
        assert!(model.list_assets("P").contains_key("Crate"));
        assert!(asset_dir(&model, "P", "Props", "Crate").join("Maya").is_dir());
        assert_eq!(model.project("P").unwrap().asset_count, 1);
    }

    #[test]
    fn test_rename_asset_reverts_when_a_file_rename_fails() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset(
            "Demo",
            AssetType::Characters,
            "Hero",
            &[DccTool::Maya, DccTool::Substance],
            false,
        );
        let before = model.list_assets("Demo")["Hero"].clone();

        // Maya is renamed first, then the Substance file hits a non-empty directory
        let hero = asset_dir(&model, "Demo", "Characters", "Hero");
        let blocker = hero.join("Substance").join("char_Villain.spp");
        fs::create_dir_all(&blocker).unwrap();
        fs::write(blocker.join("keep.txt"), "x").unwrap();

        let result = model.rename_asset("Demo", "Hero", "Villain");
        assert!(!result.success);
        assert_eq!(result.code.as_deref(), Some("PMT_IO_ERROR"));

        assert!(hero.join("Maya").join("char_Hero.ma").is_file());
        assert!(!hero.join("Maya").join("char_Villain.ma").exists());
        assert!(hero.join("Substance").join("char_Hero.spp").is_file());
        assert!(!asset_dir(&model, "Demo", "Characters", "Villain").exists());

        let assets = model.list_assets("Demo");
        assert_eq!(assets["Hero"], before);
        assert!(!assets.contains_key("Villain"));
    }

    #[test]
    fn test_unreadable_asset_folder_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("Crate");
        fs::write(&not_a_dir, "file").unwrap();

        assert!(!asset_folder_empty(&not_a_dir));
        assert!(asset_folder_empty(&dir.path().join("missing")));
        fs::create_dir(dir.path().join("Empty")).unwrap();
        assert!(asset_folder_empty(&dir.path().join("Empty")));
    }

    #[test]
    fn test_rename_asset_rejections() {
        let (_dir, model) = studio();
        model.create_project("Demo");
        model.create_asset("Demo", AssetType::Props, "Crate", &[DccTool::Maya], false);
        model.create_asset("Demo", AssetType::Props, "Barrel", &[DccTool::Maya], false);

        assert_eq!(
            model.rename_asset("Demo", "Crate", "").code.as_deref(),
            Some("PMT_INVALID_INPUT")
        );
        assert_eq!(
            model.rename_asset("Demo", "Crate", "Barrel").code.as_deref(),
            Some("PMT_ALREADY_EXISTS")
        );
        assert_eq!(
            model.rename_asset("Demo", "Ghost", "Spirit").code.as_deref(),
            Some("PMT_NOT_FOUND")
        );
        assert!(asset_dir(&model, "Demo", "Props", "Crate").is_dir());
    }

    #[test]
    fn test_open_missing_asset() {
        let (dir, model) = studio();
        let result = model.open_asset(&dir.path().join("missing.ma"));
        assert!(!result.success);
        assert_eq!(result.code.as_deref(), Some("PMT_NOT_FOUND"));
    }
}
