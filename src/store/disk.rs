//! Definition store backed by a views directory on the host filesystem

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use super::{Definition, DefinitionStore};
use crate::config::WriteModes;
use crate::error::{Error, Result};
use crate::path;

/// A views directory on disk
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
    modes: WriteModes,
}

impl DiskStore {
    /// Open a store rooted at `root` with default permissions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_modes(root, WriteModes::default())
    }

    /// Open a store rooted at `root`, applying `modes` to created
    /// directories and written files
    pub fn with_modes(root: impl Into<PathBuf>, modes: WriteModes) -> Self {
        Self {
            root: root.into(),
            modes,
        }
    }

    /// The views directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `relative` below the root. Paths that would leave the
    /// root are refused.
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let relative = path::checked(relative)?;
        Ok(path::segments(&relative)
            .into_iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment)))
    }

    fn create_dir(&self, dir: &Path) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.modes.directory);
        }
        builder
            .create(dir)
            .map_err(|e| Error::write_failure(dir.display().to_string(), e))
    }

    fn write_file(&self, file: &Path, contents: &str) -> Result<()> {
        fs::write(file, contents).map_err(|e| Error::write_failure(file.display().to_string(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(self.modes.file);
            fs::set_permissions(file, perms)
                .map_err(|e| Error::write_failure(file.display().to_string(), e))?;
        }
        Ok(())
    }

    fn rename_path(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).map_err(|e| {
            Error::write_failure(
                from.display().to_string(),
                format!("could not rename to {}: {}", to.display(), e),
            )
        })
    }
}

impl DefinitionStore for DiskStore {
    fn load(&self, view_path: &str) -> Result<Definition> {
        let config_path = self.resolve(&path::config_file(view_path))?;
        let config = match fs::read_to_string(&config_path) {
            Ok(config) => config,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::not_found("View", config_path.display().to_string()))
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let template_path = self.resolve(&path::template_file(view_path))?;
        let template = match fs::read_to_string(&template_path) {
            Ok(template) => Some(template),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::Io(e)),
        };

        Ok(Definition { config, template })
    }

    fn store(&mut self, view_path: &str, config: &str, template: &str) -> Result<()> {
        self.create_dir(&self.resolve(view_path)?)?;
        self.write_file(&self.resolve(&path::config_file(view_path))?, config)?;
        self.write_file(&self.resolve(&path::template_file(view_path))?, template)?;
        debug!("stored view {} under {}", view_path, self.root.display());
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let destination = self.resolve(to)?;
        if destination.exists() {
            return Err(Error::write_failure(
                destination.display().to_string(),
                "destination already exists",
            ));
        }

        // Files are renamed inside the old directory first, then the
        // directory itself moves.
        let source_dir = self.resolve(from)?;
        let new_handle = path::handle(to);
        let old_config = source_dir.join(format!("{}{}", path::handle(from), path::CONFIG_SUFFIX));
        let old_template =
            source_dir.join(format!("{}{}", path::handle(from), path::TEMPLATE_SUFFIX));

        self.rename_path(
            &old_config,
            &source_dir.join(format!("{}{}", new_handle, path::CONFIG_SUFFIX)),
        )?;
        if old_template.exists() {
            self.rename_path(
                &old_template,
                &source_dir.join(format!("{}{}", new_handle, path::TEMPLATE_SUFFIX)),
            )?;
        }
        if let Some(parent) = destination.parent() {
            self.create_dir(parent)?;
        }
        self.rename_path(&source_dir, &destination)
    }

    fn delete(&mut self, view_path: &str) -> Result<()> {
        let dir = self.resolve(view_path)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::write_failure(dir.display().to_string(), e)),
        }
    }

    fn exists(&self, view_path: &str) -> bool {
        !view_path.is_empty()
            && self
                .resolve(&path::config_file(view_path))
                .is_ok_and(|config| config.is_file())
    }

    fn is_dir(&self, view_path: &str) -> bool {
        self.resolve(view_path).is_ok_and(|dir| dir.is_dir())
    }

    fn child_handles(&self, view_path: &str) -> Result<Vec<String>> {
        let dir = self.resolve(view_path)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut handles = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.exists(&path::join(view_path, &name)) {
                handles.push(name);
            }
        }
        handles.sort();
        Ok(handles)
    }
}
