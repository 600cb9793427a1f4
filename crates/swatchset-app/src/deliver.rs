//! Export artifact delivery (native): write the PNG into a directory.

use crate::error::AppResult;
use std::fs;
use std::path::{Path, PathBuf};
use swatchset_render::ExportArtifact;

/// Write `artifact` into `dir` under its suggested file name.
///
/// Creates `dir` if needed and returns the written path.
pub fn write_artifact(artifact: &ExportArtifact, dir: &Path) -> AppResult<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.png)?;
    log::info!("Exported PNG to: {}", path.display());
    Ok(path)
}
