//! Per-attempt temporary build directories

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{SKETCH_EXTENSION, WORKSPACE_PREFIX};
use crate::errors::{FlasherError, Result};

/// Uniquely-named directory owning one rendered sketch.
///
/// The directory is removed by [`BuildWorkspace::cleanup`], or on drop if the
/// owner unwinds before reaching it.
#[derive(Debug)]
pub struct BuildWorkspace {
    dir: TempDir,
    sketch: PathBuf,
}

impl BuildWorkspace {
    /// Stage `rendered` under the OS temp directory
    pub fn stage(rendered: &str) -> Result<Self> {
        Self::stage_in(&std::env::temp_dir(), rendered)
    }

    /// Stage `rendered` under `root`.
    ///
    /// The sketch file is named after the directory (`<dir>/<dir>.ino`), which
    /// is what the toolchain expects of a sketch folder.
    pub fn stage_in(root: &Path, rendered: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|e| {
                FlasherError::io(
                    format!("creating build workspace in {}", root.display()),
                    e,
                )
            })?;

        let dir_name = dir
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| WORKSPACE_PREFIX.trim_end_matches('_').to_string());
        let sketch = dir
            .path()
            .join(format!("{}.{}", dir_name, SKETCH_EXTENSION));

        // On error `dir` drops here and takes the partial write with it
        std::fs::write(&sketch, rendered)
            .map_err(|e| FlasherError::io(format!("writing {}", sketch.display()), e))?;

        log::debug!("Staged sketch at {}", sketch.display());
        Ok(Self { dir, sketch })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn sketch_path(&self) -> &Path {
        &self.sketch
    }

    /// Remove the directory tree. Never fails; removal errors are only logged.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => log::debug!("Removed build workspace {}", path.display()),
            Err(e) => log::warn!(
                "Failed to remove build workspace {}: {}",
                path.display(),
                e
            ),
        }
    }
}
