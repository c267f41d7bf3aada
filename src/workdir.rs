//! Scoped working directory switch
//!
//! Templates resolve relative includes against the process working
//! directory, so the renderer moves into the workspace for the duration of
//! a transform. [`WorkdirGuard`] restores the previous directory when it is
//! dropped, including on early return and unwinding.

use std::env;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};

/// Restores the original working directory on drop
#[derive(Debug)]
pub struct WorkdirGuard {
    previous: PathBuf,
}

impl WorkdirGuard {
    /// Change into `dir`, remembering the current directory
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = env::current_dir().map_err(|e| Error::Workspace {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        env::set_current_dir(dir).map_err(|e| Error::Workspace {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        debug!("entered workspace {}", dir.display());
        Ok(Self { previous })
    }

    /// The directory restored on drop
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            warn!(
                "could not restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}
