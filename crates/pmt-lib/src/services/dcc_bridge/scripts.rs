// Generated automation scripts executed inside the vendor tools

use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{IoContext, PmtResult};

pub const MAYA_EXPORT_SCRIPT: &str = "pmt_maya_export.py";
pub const UNREAL_IMPORT_SCRIPT: &str = "pmt_unreal_import.py";

/// Entry point defined by the Maya script
pub const MAYA_EXPORT_FN: &str = "pmt_export_and_close";
/// Entry point defined by the Unreal script
pub const UNREAL_IMPORT_FN: &str = "pmt_import_asset";

/// Exports all scene geometry to FBX once Maya is idle, saves, and quits
pub fn maya_export_script() -> String {
    format!(
        r#"# Generated by PMT. Exports the open scene to FBX, saves it and closes Maya.
import os
import maya.cmds as cmds


def {entry}(export_dir):
    if not cmds.pluginInfo('fbxmaya', q=True, loaded=True):
        cmds.loadPlugin('fbxmaya')

    if not os.path.exists(export_dir):
        os.makedirs(export_dir)

    scene = cmds.file(q=True, sn=True)
    if not scene:
        cmds.error('No file is currently open')
        return

    stem = os.path.splitext(os.path.basename(scene))[0]
    export_path = os.path.join(export_dir, stem + '.fbx')
    cmds.scriptJob(idleEvent=lambda: _pmt_save_and_quit(export_path), runOnce=True)


def _pmt_save_and_quit(export_path):
    geometry = cmds.ls(geometry=True)
    if not geometry:
        cmds.warning('No geometry found in the scene')
        cmds.quit(force=True, exitCode=1)
        return

    cmds.select(geometry)
    cmds.file(export_path, force=True, options='v=0;', typ='FBX export', pr=True, es=True)

    if cmds.file(modified=True, query=True):
        cmds.file(save=True, force=True)

    cmds.quit(force=True)
"#,
        entry = MAYA_EXPORT_FN
    )
}

/// Imports one interchange file into the open Unreal project
pub fn unreal_import_script() -> String {
    format!(
        r#"# Generated by PMT. Imports an interchange file into the current Unreal project.
import unreal


def {entry}(file_path, destination_path='/Game/Meshes/'):
    asset_tools = unreal.AssetToolsHelpers.get_asset_tools()
    import_data = unreal.AutomatedAssetImportData()
    import_data.destination_path = destination_path
    import_data.filenames = [file_path]
    import_data.replace_existing = True
    return asset_tools.import_assets_automated(import_data)
"#,
        entry = UNREAL_IMPORT_FN
    )
}

/// Write a script into `dir`, replacing any previous version
pub fn write_script(dir: &Path, file_name: &str, contents: &str) -> PmtResult<PathBuf> {
    fs::create_dir_all(dir)
        .io_context(|| format!("Failed to create script folder {}", dir.display()))?;

    let path = dir.join(file_name);
    fs::write(&path, contents)
        .io_context(|| format!("Failed to write script {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scripts_define_entry_points() {
        assert!(maya_export_script().contains("def pmt_export_and_close(export_dir):"));
        assert!(unreal_import_script()
            .contains("def pmt_import_asset(file_path, destination_path='/Game/Meshes/'):"));
    }

    #[test]
    fn test_write_script() {
        let dir = tempdir().unwrap();
        let scripts = dir.path().join("Tools").join("Scripts");
        let path = write_script(&scripts, MAYA_EXPORT_SCRIPT, &maya_export_script()).unwrap();
        assert_eq!(path, scripts.join(MAYA_EXPORT_SCRIPT));
        assert!(fs::read_to_string(path).unwrap().contains("FBX export"));
    }
}
