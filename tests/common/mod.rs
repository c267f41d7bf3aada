//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_settings(settings::MINIMAL)
//!         .with_view("blog", &view_config("Blog", &[]), "<h1>Blog</h1>");
//!     fixture.command().arg("ls").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::settings;
    #[allow(unused_imports)]
    pub use super::{view_config, TestFixture};
}

/// Settings files used across tests.
#[allow(dead_code)]
pub mod settings {
    /// Views under `views/`, no producers.
    pub const MINIMAL: &str = "views: views\n";

    /// Two data sources, one depending on the other, and one event that
    /// only triggers when the request carries `email`.
    pub const WITH_PRODUCERS: &str = r#"
views: views
data-sources:
  - handle: latest
    dependencies: [navigation]
    parameters:
      heading: "Latest from {$site}"
    items: [First post]
  - handle: navigation
    parameters:
      site: Example
    items: [Home, About]
events:
  - handle: subscribe
    trigger-on: email
    parameters:
      subscribed: "yes"
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "views: [unclosed";
}

/// Build a view configuration file.
///
/// Each `(field, values)` pair becomes a list element, e.g.
/// `("types", &["index"])`.
#[allow(dead_code)]
pub fn view_config(title: &str, lists: &[(&str, &[&str])]) -> String {
    let mut xml = format!("<view><title>{}</title>", title);
    for (field, values) in lists {
        xml.push_str(&format!("<{}>", field));
        for value in values.iter() {
            xml.push_str(&format!("<item>{}</item>", value));
        }
        xml.push_str(&format!("</{}>", field));
    }
    xml.push_str("</view>");
    xml
}

/// A temporary directory holding a settings file and a view tree.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `viewtree.yaml` with the given content.
    pub fn with_settings(self, content: &str) -> Self {
        self.temp_dir
            .child("viewtree.yaml")
            .write_str(content)
            .expect("Failed to write settings file");
        self
    }

    /// Write the configuration and template of the view at `view_path`
    /// under `views/`.
    pub fn with_view(self, view_path: &str, config: &str, template: &str) -> Self {
        let handle = view_path.rsplit('/').next().unwrap_or(view_path);
        let dir = self.temp_dir.child("views").child(view_path);
        dir.child(format!("{}.config.xml", handle))
            .write_str(config)
            .expect("Failed to write view configuration");
        dir.child(format!("{}.xsl", handle))
            .write_str(template)
            .expect("Failed to write view template");
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("viewtree");
        cmd.current_dir(self.path()).env_remove("VIEWTREE_CONFIG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_view_files() {
        let fixture = TestFixture::new().with_view("blog/articles", "<view/>", "<t/>");
        assert!(fixture
            .path()
            .join("views/blog/articles/articles.config.xml")
            .exists());
        assert!(fixture.path().join("views/blog/articles/articles.xsl").exists());
    }

    #[test]
    fn test_view_config_lists() {
        let xml = view_config("Home", &[("types", &["index"])]);
        assert_eq!(
            xml,
            "<view><title>Home</title><types><item>index</item></types></view>"
        );
    }

    #[test]
    fn test_settings_are_valid_yaml() {
        for settings in [settings::MINIMAL, settings::WITH_PRODUCERS] {
            serde_yaml::from_str::<serde_yaml::Value>(settings)
                .expect("Settings should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(settings::INVALID_YAML).is_err());
    }
}
