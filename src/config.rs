//! # Settings File
//!
//! This module defines the structure of the `viewtree.yaml` settings file
//! and the logic for loading it. Settings are plain values handed to the
//! store and the renderer at construction time; nothing here is global.
//!
//! ```yaml
//! views: views
//! workspace: workspace
//! directory-write-mode: "0755"
//! file-write-mode: "0644"
//! data-sources:
//!   - handle: navigation
//!     items: [Home, About]
//!   - handle: latest
//!     dependencies: [navigation]
//!     parameters:
//!       latest-count: "2"
//! events:
//!   - handle: subscribe
//!     priority: 10
//!     trigger-on: email
//! ```
//!
//! Relative `views` and `workspace` paths resolve against the directory that
//! holds the settings file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Unix permission bits applied by the disk store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteModes {
    pub directory: u32,
    pub file: u32,
}

impl Default for WriteModes {
    fn default() -> Self {
        Self {
            directory: 0o755,
            file: 0o644,
        }
    }
}

/// A producer declared in the settings file rather than compiled in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StaticProducerSpec {
    /// Handle views reference this producer by
    pub handle: String,
    /// Event priority; higher runs earlier
    #[serde(default)]
    pub priority: i32,
    /// Handles of data sources that must run first
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Parameters written to the output register when the producer runs
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    /// Values emitted as `<item>` children of the producer's fragment
    #[serde(default)]
    pub items: Vec<String>,
    /// Only trigger when this request key is present (events)
    #[serde(default)]
    pub trigger_on: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSettings {
    views: Option<PathBuf>,
    workspace: Option<PathBuf>,
    directory_write_mode: Option<String>,
    file_write_mode: Option<String>,
    #[serde(default)]
    events: Vec<StaticProducerSpec>,
    #[serde(default)]
    data_sources: Vec<StaticProducerSpec>,
}

/// Parsed settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the view tree
    pub views: PathBuf,
    /// Working directory used while a template is transformed
    pub workspace: PathBuf,
    /// Permissions for created directories and files
    pub write_modes: WriteModes,
    /// Events declared in the settings file
    pub events: Vec<StaticProducerSpec>,
    /// Data sources declared in the settings file
    pub data_sources: Vec<StaticProducerSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            views: PathBuf::from(defaults::VIEWS_DIR),
            workspace: PathBuf::from(defaults::WORKSPACE_DIR),
            write_modes: WriteModes::default(),
            events: Vec::new(),
            data_sources: Vec::new(),
        }
    }
}

impl Settings {
    /// Re-anchor relative directories at `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.views.is_relative() {
            self.views = base.join(&self.views);
        }
        if self.workspace.is_relative() {
            self.workspace = base.join(&self.workspace);
        }
        self
    }
}

/// Parse an octal permission string such as `"0755"` or `"755"`
pub fn parse_mode(value: &str) -> Result<u32> {
    u32::from_str_radix(value.trim().trim_start_matches("0o"), 8).map_err(|e| Error::ConfigParse {
        message: format!("invalid write mode '{}': {}", value, e),
        hint: Some("Write modes are octal strings, e.g. \"0644\"".to_string()),
    })
}

/// Parse settings from a YAML string. Relative paths are left as written.
pub fn parse(yaml_content: &str) -> Result<Settings> {
    let raw: RawSettings = if yaml_content.trim().is_empty() {
        RawSettings::default()
    } else {
        serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: None,
        })?
    };

    let defaults = Settings::default();
    let mut write_modes = WriteModes::default();
    if let Some(mode) = &raw.directory_write_mode {
        write_modes.directory = parse_mode(mode)?;
    }
    if let Some(mode) = &raw.file_write_mode {
        write_modes.file = parse_mode(mode)?;
    }

    for spec in raw.events.iter().chain(raw.data_sources.iter()) {
        if spec.handle.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "producer declared without a handle".to_string(),
                hint: Some("Add 'handle:' to every event and data source".to_string()),
            });
        }
    }

    Ok(Settings {
        views: raw.views.unwrap_or(defaults.views),
        workspace: raw.workspace.unwrap_or(defaults.workspace),
        write_modes,
        events: raw.events,
        data_sources: raw.data_sources,
    })
}

/// Load settings from a file, resolving relative paths against its
/// directory
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(parse(&content)?.relative_to(base))
}
