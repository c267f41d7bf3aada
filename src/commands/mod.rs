//! # CLI Command Implementations
//!
//! Each subcommand of `viewtree` lives in its own module with:
//! - an `Args` struct deriving `clap::Args`, and
//! - an `execute` function taking the parsed `Args` and the shared
//!   [`Context`].
//!
//! Commands are thin: they load the settings, open the view tree on disk
//! and call into the `viewtree` library.

use std::path::PathBuf;

use anyhow::Result;

use viewtree::cache::ViewCache;
use viewtree::config::{self, Settings};
use viewtree::error::{Error, ErrorKind};
use viewtree::output::OutputConfig;
use viewtree::store::DiskStore;
use viewtree::suggestions;
use viewtree::view::Views;

pub mod check;
pub mod ls;
pub mod mv;
pub mod render;
pub mod rm;
pub mod tree;

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Path to the settings file
    pub config: PathBuf,
    pub output: OutputConfig,
}

impl Context {
    /// Load the settings file
    pub fn settings(&self) -> Result<Settings> {
        if !self.config.exists() {
            return Err(suggestions::config_not_found(&self.config));
        }
        config::from_file(&self.config).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load config from {}: {}",
                self.config.display(),
                e
            )
        })
    }

    /// Open the view tree the settings point at
    pub fn views(&self, settings: &Settings) -> Views<DiskStore> {
        Views::new(DiskStore::with_modes(&settings.views, settings.write_modes))
            .with_cache(ViewCache::new())
    }
}

/// Turn a `NotFound` for `target` into an error with hints
pub fn not_found_hint(error: Error, target: &str, settings: &Settings) -> anyhow::Error {
    match error.kind() {
        ErrorKind::NotFound => suggestions::view_not_found(target, &settings.views),
        _ => error.into(),
    }
}

/// Split `key=value` arguments
pub fn parse_pairs(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(suggestions::invalid_parameter(pair)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs(&["page=2".to_string(), "q=a=b".to_string()]).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "a=b".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_pairs_rejects_missing_separator() {
        assert!(parse_pairs(&["page".to_string()]).is_err());
        assert!(parse_pairs(&["=2".to_string()]).is_err());
    }

    #[test]
    fn test_settings_missing_file() {
        let context = Context {
            config: PathBuf::from("/nonexistent/viewtree.yaml"),
            output: OutputConfig::plain(),
        };
        let err = context.settings().unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }
}
