// Host OS integration
// Default-application open and hidden-folder attribute; both are best effort per platform

use std::path::Path;

use crate::utils::error::{PmtError, PmtResult};

/// Open a file or folder with the operating system's default handler
pub fn open_path(path: &Path) -> PmtResult<()> {
    if !path.exists() {
        return Err(PmtError::PathNotFound {
            path: path.display().to_string(),
        });
    }

    opener::open(path).map_err(|e| PmtError::Io {
        context: format!("Failed to open {}", path.display()),
        source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
    })?;

    log::info!("[shell] Opened {}", path.display());
    Ok(())
}

/// Mark a directory hidden. Only Windows has a hidden attribute; elsewhere this is a no-op.
/// Failures are logged and never returned.
#[cfg(target_os = "windows")]
pub fn hide_directory(path: &Path) {
    let result = std::process::Command::new("attrib")
        .arg("+h")
        .arg(path)
        .output();

    match result {
        Ok(output) if output.status.success() => {
            log::debug!("[shell] Hid {}", path.display());
        }
        Ok(output) => log::warn!(
            "[shell] attrib +h failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        ),
        Err(e) => log::warn!("[shell] Could not run attrib for {}: {}", path.display(), e),
    }
}

#[cfg(not(target_os = "windows"))]
pub fn hide_directory(path: &Path) {
    log::debug!(
        "[shell] Hidden attribute not supported on this platform, leaving {} visible",
        path.display()
    );
}
