//! Utility functions and helpers

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "tokmeter", "tokmeter").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn get_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "tokmeter", "tokmeter").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Default location of the persisted session usage.
pub fn default_usage_path() -> Option<PathBuf> {
    get_data_dir().map(|d| d.join("usage.json"))
}

/// Writes `contents` to `path` via a temp file and rename.
///
/// Readers see either the old file or the new one, never a partial write.
/// Missing parent directories are created.
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let temp_name = format!(
        ".{}.tmp.{}",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("usage"),
        Uuid::new_v4()
    );
    let temp_path = parent.join(temp_name);

    std::fs::write(&temp_path, contents).context("Failed to write temp file")?;
    std::fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}
