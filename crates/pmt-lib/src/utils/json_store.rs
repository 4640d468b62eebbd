// JSON manifest file helpers
// Manifests are always read whole and replaced whole; the replace goes through a temp file + rename

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::error::{IoContext, PmtError, PmtResult};

/// Read and parse a JSON file, surfacing every failure
pub fn read_json<T: DeserializeOwned>(path: &Path) -> PmtResult<T> {
    let content = fs::read_to_string(path)
        .io_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).map_err(|source| PmtError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a JSON file; missing or malformed files yield `T::default()`
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        return T::default();
    }

    match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("[manifest] Treating unreadable manifest as empty: {}", e);
            T::default()
        }
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path`
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> PmtResult<()> {
    let parent = path
        .parent()
        .ok_or_else(|| PmtError::invalid(format!("Invalid manifest path: {}", path.display())))?;

    fs::create_dir_all(parent)
        .io_context(|| format!("Failed to create directory {}", parent.display()))?;

    let json = serde_json::to_string_pretty(value).map_err(|source| PmtError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "manifest.json".to_string());
    let temp_path = parent.join(format!(".{}.tmp", file_name));

    let mut file = fs::File::create(&temp_path)
        .io_context(|| format!("Failed to write {}", temp_path.display()))?;
    file.write_all(json.as_bytes())
        .io_context(|| format!("Failed to write {}", temp_path.display()))?;
    file.sync_all()
        .io_context(|| format!("Failed to flush {}", temp_path.display()))?;
    drop(file);

    fs::rename(&temp_path, path)
        .io_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}
