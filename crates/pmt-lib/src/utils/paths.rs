// Studio directory layout
// Every path the Project Model touches is derived here so the on-disk contract lives in one place

use std::path::{Path, PathBuf};

use crate::models::AssetType;
use crate::utils::error::{PmtError, PmtResult};

/// Config folder inside the base path and inside every project
pub const TOOLS_DIR: &str = "Tools";
/// Parent manifest file name (inside `<base>/Tools`)
pub const PARENT_MANIFEST_FILE: &str = "PMT_ParentConfig.json";
/// Path config snapshot file name (inside `<base>/Tools`)
pub const PATH_CONFIG_FILE: &str = "PMT_PathConfig.env";
/// Generated DCC automation scripts (inside `<base>/Tools`)
pub const SCRIPTS_DIR: &str = "Scripts";

/// Reserved pseudo-project shared by the whole studio
pub const STUDIO_ASSETS: &str = "Studio Assets";

pub const ART_DEPOT: &str = "Art Depot";
pub const GAME_ENGINE_DEPOT: &str = "Game Engine Depot";
pub const INTERMEDIATE_DEPOT: &str = "Intermediate Depot";

/// Names that can never be used for a new project
const RESERVED_PROJECT_NAMES: &[&str] = &[TOOLS_DIR, STUDIO_ASSETS];

/// Layout of the studio base folder
#[derive(Debug, Clone)]
pub struct StudioLayout {
    base: PathBuf,
}

impl StudioLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.base.join(TOOLS_DIR)
    }

    pub fn parent_manifest_path(&self) -> PathBuf {
        self.tools_dir().join(PARENT_MANIFEST_FILE)
    }

    pub fn path_config_snapshot(&self) -> PathBuf {
        self.tools_dir().join(PATH_CONFIG_FILE)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.tools_dir().join(SCRIPTS_DIR)
    }

    pub fn project(&self, name: &str) -> ProjectLayout {
        ProjectLayout {
            name: name.to_string(),
            root: self.base.join(name),
        }
    }
}

/// Layout of one project folder
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    name: String,
    root: PathBuf,
}

impl ProjectLayout {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(TOOLS_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.config_dir().join(manifest_file_name(&self.name))
    }

    pub fn art_depot(&self) -> PathBuf {
        self.root.join(ART_DEPOT)
    }

    pub fn engine_depot(&self) -> PathBuf {
        self.root.join(GAME_ENGINE_DEPOT)
    }

    pub fn intermediate_depot(&self) -> PathBuf {
        self.root.join(INTERMEDIATE_DEPOT)
    }

    pub fn asset_dir(&self, asset_type: AssetType, asset_name: &str) -> PathBuf {
        self.art_depot().join(asset_type.folder()).join(asset_name)
    }

    pub fn intermediate_dir(&self, asset_type: AssetType) -> PathBuf {
        self.intermediate_depot().join(asset_type.folder())
    }

    pub fn uproject_path(&self) -> PathBuf {
        self.engine_depot().join(format!("{}.uproject", self.name))
    }

    /// Depot folders for this project, with or without the engine depot
    pub fn depots(&self, with_engine: bool) -> Vec<(PathBuf, bool)> {
        let mut depots = vec![(self.art_depot(), true)];
        if with_engine {
            depots.push((self.engine_depot(), false));
        }
        depots.push((self.intermediate_depot(), true));
        depots
    }
}

/// Project manifest naming convention: `PMT_<project>_Config.json`
pub fn manifest_file_name(project: &str) -> String {
    format!("PMT_{}_Config.json", project)
}

/// Validate a project or asset name used as a folder name
pub fn validate_name(kind: &str, name: &str) -> PmtResult<()> {
    if name.trim().is_empty() {
        return Err(PmtError::invalid(format!("{} name cannot be empty.", kind)));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(PmtError::invalid(format!(
            "{} name \"{}\" is not a valid folder name.",
            kind, name
        )));
    }

    Ok(())
}

/// True for folder names under the base path that belong to the studio, not to a project
pub fn is_reserved_project_name(name: &str) -> bool {
    RESERVED_PROJECT_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name.trim()))
}

/// Validate a name for a brand new project
pub fn validate_new_project_name(name: &str) -> PmtResult<()> {
    validate_name("Project", name)?;

    if is_reserved_project_name(name) {
        return Err(PmtError::invalid(format!(
            "\"{}\" is reserved by the studio and cannot be used as a project name.",
            name
        )));
    }

    Ok(())
}

/// DCC tools only accept forward slashes in script arguments
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
