// Unreal import bridge
// Runs the editor's pythonscript commandlet against a project to import one FBX

use std::path::Path;

use super::scripts::{self, UNREAL_IMPORT_FN, UNREAL_IMPORT_SCRIPT};
use super::{run_tool, ProcessRunner};
use crate::utils::error::PmtResult;
use crate::utils::paths::to_forward_slashes;

const TOOL_NAME: &str = "Unreal Engine";

/// Content folder imported meshes land in
pub const DEFAULT_DESTINATION: &str = "/Game/Meshes/";

#[derive(Debug, Clone)]
pub struct UnrealImportBridge {
    executable: String,
    destination: String,
}

impl UnrealImportBridge {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            destination: DEFAULT_DESTINATION.to_string(),
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn command_args(&self, uproject: &Path, script: &Path, fbx: &Path) -> Vec<String> {
        vec![
            to_forward_slashes(uproject),
            "-run=pythonscript".to_string(),
            format!(
                "-script=exec(open('{}').read()); {}('{}', '{}')",
                to_forward_slashes(script),
                UNREAL_IMPORT_FN,
                to_forward_slashes(fbx),
                self.destination
            ),
        ]
    }

    pub fn import(
        &self,
        runner: &dyn ProcessRunner,
        uproject: &Path,
        scripts_dir: &Path,
        fbx: &Path,
    ) -> PmtResult<()> {
        let script = scripts::write_script(
            scripts_dir,
            UNREAL_IMPORT_SCRIPT,
            &scripts::unreal_import_script(),
        )?;

        log::info!(
            "[dcc-bridge] Importing {} into {}",
            fbx.display(),
            uproject.display()
        );

        let args = self.command_args(uproject, &script, fbx);
        run_tool(runner, TOOL_NAME, &self.executable, &args)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::RecordingRunner;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_command_args() {
        let bridge = UnrealImportBridge::new("UnrealEditor-Cmd");
        let args = bridge.command_args(
            Path::new("/studio/Demo/Game Engine Depot/Demo.uproject"),
            Path::new("/studio/Tools/Scripts/pmt_unreal_import.py"),
            Path::new("/studio/Demo/Intermediate Depot/Props/prop_Crate.fbx"),
        );

        assert_eq!(args[0], "/studio/Demo/Game Engine Depot/Demo.uproject");
        assert_eq!(args[1], "-run=pythonscript");
        assert_eq!(
            args[2],
            "-script=exec(open('/studio/Tools/Scripts/pmt_unreal_import.py').read()); \
             pmt_import_asset('/studio/Demo/Intermediate Depot/Props/prop_Crate.fbx', '/Game/Meshes/')"
        );
    }

    #[test]
    fn test_custom_destination() {
        let bridge = UnrealImportBridge::new("ue").with_destination("/Game/Props/");
        let args = bridge.command_args(Path::new("p"), Path::new("s"), Path::new("f"));
        assert!(args[2].ends_with("'/Game/Props/')"));
    }

    #[test]
    fn test_import_runs_editor() {
        let dir = tempdir().unwrap();
        let runner = RecordingRunner::succeeding();
        UnrealImportBridge::new("ue")
            .import(&runner, Path::new("/p/Demo.uproject"), dir.path(), Path::new("/f.fbx"))
            .unwrap();

        assert!(dir.path().join(UNREAL_IMPORT_SCRIPT).is_file());
        assert_eq!(runner.calls()[0].1[0], "/p/Demo.uproject");
    }
}
