//! Default values shared across the library and the CLI.

/// Settings file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "viewtree.yaml";

/// Views directory, relative to the settings file.
pub const VIEWS_DIR: &str = "views";

/// Workspace directory, relative to the settings file.
pub const WORKSPACE_DIR: &str = "workspace";

/// Content type of a view that does not declare one.
pub const CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Type tags at most one view may carry.
pub const SINGLETON_TYPES: [&str; 3] = ["index", "404", "403"];

/// Root element of a freshly created composite document.
pub const DOCUMENT_ROOT: &str = "data";

/// Scope passed with every render hook notification.
pub const HOOK_SCOPE: &str = "/frontend/";
