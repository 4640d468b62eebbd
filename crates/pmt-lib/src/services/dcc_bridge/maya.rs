// Maya export bridge
// Opens a scene in Maya, runs the generated export script, and expects an FBX in the export folder

use std::path::{Path, PathBuf};

use super::scripts::{self, MAYA_EXPORT_FN, MAYA_EXPORT_SCRIPT};
use super::{run_tool, ProcessRunner};
use crate::utils::error::PmtResult;
use crate::utils::paths::to_forward_slashes;

const TOOL_NAME: &str = "Maya";

#[derive(Debug, Clone)]
pub struct MayaExportBridge {
    executable: String,
}

impl MayaExportBridge {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Arguments for `maya -command "<mel>"`
    pub fn command_args(&self, scene: &Path, script: &Path, export_dir: &Path) -> Vec<String> {
        let mel = format!(
            "file -open \"{scene}\"; python(\"exec(open('{script}').read()); {entry}('{export_dir}')\")",
            scene = to_forward_slashes(scene),
            script = to_forward_slashes(script),
            entry = MAYA_EXPORT_FN,
            export_dir = to_forward_slashes(export_dir),
        );
        vec!["-command".to_string(), mel]
    }

    /// Where the script will write the FBX for `scene`
    pub fn export_path(scene: &Path, export_dir: &Path) -> PathBuf {
        let stem = scene
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        export_dir.join(format!("{}.fbx", stem))
    }

    /// Write the export script, launch Maya and wait for it to quit.
    /// Returns the expected FBX path on success.
    pub fn export(
        &self,
        runner: &dyn ProcessRunner,
        scene: &Path,
        scripts_dir: &Path,
        export_dir: &Path,
    ) -> PmtResult<PathBuf> {
        let script = scripts::write_script(
            scripts_dir,
            MAYA_EXPORT_SCRIPT,
            &scripts::maya_export_script(),
        )?;

        log::info!(
            "[dcc-bridge] Exporting {} to {}",
            scene.display(),
            export_dir.display()
        );

        let args = self.command_args(scene, &script, export_dir);
        run_tool(runner, TOOL_NAME, &self.executable, &args)?;

        Ok(Self::export_path(scene, export_dir))
    }
}
