// PMT configuration
// Base path, DCC executables and template locations. Values come from the dotenv-style
// path config file (PMT_PathConfig.env) and can be overridden from the process environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::error::{PmtError, PmtResult};
use crate::utils::paths::TOOLS_DIR;

/// Folder name of the studio under the local app data directory
pub const APP_DIR_NAME: &str = "PMT";

/// Environment variable overriding the studio base path
pub const BASE_PATH_ENV: &str = "PMT_BASE_PATH";
/// Environment variable pointing at the path config file
pub const PATH_CONFIG_ENV: &str = "PMT_PATH_CONFIG";
/// Default path config file name
pub const PATH_CONFIG_FILE_NAME: &str = "PMT_PathConfig.env";

/// Default template folder (inside `<base>/Tools`)
const TEMPLATES_DIR_NAME: &str = "Templates";

fn default_maya_version() -> String {
    String::from("2024")
}

fn default_substance_version() -> String {
    String::from("2023")
}

fn default_unreal_version() -> String {
    String::from("5.3.2")
}

/// Versions recorded in manifests for files created by each tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolVersions {
    #[serde(default = "default_maya_version")]
    pub maya: String,
    #[serde(default = "default_substance_version")]
    pub substance: String,
    #[serde(default = "default_unreal_version")]
    pub unreal: String,
}

impl Default for ToolVersions {
    fn default() -> Self {
        Self {
            maya: default_maya_version(),
            substance: default_substance_version(),
            unreal: default_unreal_version(),
        }
    }
}

/// Resolved PMT configuration
#[derive(Debug, Clone)]
pub struct PmtConfig {
    /// Studio base folder holding every project
    pub base_path: PathBuf,
    /// Path config file the values were read from, if any
    pub path_config_file: Option<PathBuf>,
    pub maya_path: Option<String>,
    pub substance_path: Option<String>,
    pub unreal_path: Option<String>,
    /// Holds `emptySubstance.spp` and the `emptyUnreal` project
    pub templates_dir: PathBuf,
    pub versions: ToolVersions,
}

impl PmtConfig {
    /// Configuration with defaults for everything but the base path
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        let templates_dir = base_path.join(TOOLS_DIR).join(TEMPLATES_DIR_NAME);
        Self {
            base_path,
            path_config_file: None,
            maya_path: None,
            substance_path: None,
            unreal_path: None,
            templates_dir,
            versions: ToolVersions::default(),
        }
    }

    /// Default studio base folder: `<local app data>/PMT`
    pub fn default_base_path() -> PmtResult<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| {
                PmtError::invalid("Could not determine local application data directory")
            })
    }

    /// Default path config location: `<config dir>/PMT/PMT_PathConfig.env`
    pub fn default_path_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join(PATH_CONFIG_FILE_NAME))
    }

    /// Load configuration from the process environment and the path config file.
    /// Explicit arguments win over environment, environment wins over the file.
    pub fn load(
        base_override: Option<PathBuf>,
        config_override: Option<PathBuf>,
    ) -> PmtResult<Self> {
        Self::load_with_env(base_override, config_override, |key| std::env::var(key).ok())
    }

    pub fn load_with_env<F>(
        base_override: Option<PathBuf>,
        config_override: Option<PathBuf>,
        env: F,
    ) -> PmtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_file = config_override
            .or_else(|| env(PATH_CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_path_config_file)
            .filter(|p| p.is_file());

        let file_values = match &config_file {
            Some(path) => read_path_config(path)?,
            None => Vec::new(),
        };

        let file_base = file_values
            .iter()
            .find(|(k, _)| normalize_key(k) == "BASE_PATH")
            .map(|(_, v)| PathBuf::from(v));

        let base_path = match base_override
            .or_else(|| env(BASE_PATH_ENV).map(PathBuf::from))
            .or(file_base)
        {
            Some(path) => path,
            None => Self::default_base_path()?,
        };

        let mut config = Self::new(base_path);
        config.path_config_file = config_file;

        for (key, value) in &file_values {
            config.apply_value(key, value);
        }

        for key in ["MAYA", "SUBSTANCE", "UNREAL", "TEMPLATES"] {
            if let Some(value) = env(&format!("PMT_{}", key)) {
                config.apply_value(key, &value);
            }
        }

        log::debug!(
            "[config] base={} config_file={:?}",
            config.base_path.display(),
            config.path_config_file
        );

        Ok(config)
    }

    fn apply_value(&mut self, key: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }

        match normalize_key(key).as_str() {
            "MAYA" => self.maya_path = Some(value.to_string()),
            "SUBSTANCE" => self.substance_path = Some(value.to_string()),
            "UNREAL" => self.unreal_path = Some(value.to_string()),
            "TEMPLATES" => self.templates_dir = PathBuf::from(value),
            "MAYA_VERSION" => self.versions.maya = value.to_string(),
            "SUBSTANCE_VERSION" => self.versions.substance = value.to_string(),
            "UNREAL_VERSION" => self.versions.unreal = value.to_string(),
            "BASE_PATH" => {}
            other => log::debug!("[config] Ignoring unknown path config key: {}", other),
        }
    }

    pub fn substance_template(&self) -> PathBuf {
        self.templates_dir.join("emptySubstance.spp")
    }

    pub fn unreal_template(&self) -> PathBuf {
        self.templates_dir.join("emptyUnreal")
    }
}

/// Keys may be written bare (`MAYA`) or prefixed (`PMT_MAYA`)
fn normalize_key(key: &str) -> String {
    let upper = key.trim().to_ascii_uppercase();
    upper.strip_prefix("PMT_").map(str::to_string).unwrap_or(upper)
}

fn read_path_config(path: &Path) -> PmtResult<Vec<(String, String)>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| PmtError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut values = Vec::new();
    for item in iter {
        let (key, value) = item.map_err(|e| PmtError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        values.push((key, value));
    }

    Ok(values)
}
