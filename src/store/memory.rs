//! In-memory definition store

use std::collections::{BTreeMap, BTreeSet};

use super::{Definition, DefinitionStore};
use crate::error::{Error, Result};
use crate::path;

/// In-memory store of view files, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Files stored as relative path -> content
    files: BTreeMap<String, String>,
    /// Every directory that exists, including ones without a view
    dirs: BTreeSet<String>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a raw file, creating its parent directories.
    ///
    /// Useful for seeding malformed definitions that `store` would never
    /// produce.
    pub fn insert_file(&mut self, key: &str, contents: &str) {
        let key = path::normalize(key);
        if let Some(dir) = path::parent(&key) {
            self.add_dir(&dir);
        }
        self.files.insert(key, contents.to_string());
    }

    /// Get a raw file
    pub fn file(&self, key: &str) -> Option<&str> {
        self.files.get(&path::normalize(key)).map(String::as_str)
    }

    /// Create an empty directory (and its ancestors)
    pub fn add_dir(&mut self, dir: &str) {
        let mut current = String::new();
        for segment in path::segments(dir) {
            current = path::join(&current, segment);
            self.dirs.insert(current.clone());
        }
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the store holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn is_within(key: &str, dir: &str) -> bool {
        key == dir || key.starts_with(&format!("{}/", dir))
    }
}

impl DefinitionStore for MemoryStore {
    fn load(&self, view_path: &str) -> Result<Definition> {
        let config = self
            .files
            .get(&path::config_file(view_path))
            .ok_or_else(|| Error::not_found("View", view_path))?;
        Ok(Definition {
            config: config.clone(),
            template: self.files.get(&path::template_file(view_path)).cloned(),
        })
    }

    fn store(&mut self, view_path: &str, config: &str, template: &str) -> Result<()> {
        self.add_dir(view_path);
        self.files
            .insert(path::config_file(view_path), config.to_string());
        self.files
            .insert(path::template_file(view_path), template.to_string());
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return Ok(());
        }
        if !self.dirs.contains(from) {
            return Err(Error::write_failure(from, "no such directory"));
        }
        if self.dirs.contains(to) {
            return Err(Error::write_failure(to, "destination already exists"));
        }

        let old_handle = path::handle(from).to_string();
        let new_handle = path::handle(to).to_string();
        let relocate = |key: &str| -> String {
            let rest = &key[from.len()..];
            let rest = if rest == format!("/{}{}", old_handle, path::CONFIG_SUFFIX) {
                format!("/{}{}", new_handle, path::CONFIG_SUFFIX)
            } else if rest == format!("/{}{}", old_handle, path::TEMPLATE_SUFFIX) {
                format!("/{}{}", new_handle, path::TEMPLATE_SUFFIX)
            } else {
                rest.to_string()
            };
            format!("{}{}", to, rest)
        };

        let moved_files: Vec<String> = self
            .files
            .keys()
            .filter(|key| Self::is_within(key, from))
            .cloned()
            .collect();
        for key in moved_files {
            if let Some(contents) = self.files.remove(&key) {
                self.files.insert(relocate(&key), contents);
            }
        }

        let moved_dirs: Vec<String> = self
            .dirs
            .iter()
            .filter(|dir| Self::is_within(dir, from))
            .cloned()
            .collect();
        for dir in moved_dirs {
            self.dirs.remove(&dir);
            self.dirs.insert(format!("{}{}", to, &dir[from.len()..]));
        }
        self.add_dir(to);
        Ok(())
    }

    fn delete(&mut self, view_path: &str) -> Result<()> {
        self.files.retain(|key, _| !Self::is_within(key, view_path));
        self.dirs.retain(|dir| !Self::is_within(dir, view_path));
        Ok(())
    }

    fn exists(&self, view_path: &str) -> bool {
        self.files.contains_key(&path::config_file(view_path))
    }

    fn is_dir(&self, view_path: &str) -> bool {
        view_path.is_empty() || self.dirs.contains(view_path)
    }

    fn child_handles(&self, view_path: &str) -> Result<Vec<String>> {
        Ok(self
            .dirs
            .iter()
            .filter(|dir| path::parent(dir).unwrap_or_default() == view_path)
            .filter(|dir| self.exists(dir))
            .map(|dir| path::handle(dir).to_string())
            .collect())
    }
}
