//! # Error Suggestions
//!
//! Errors reported by the CLI say what went wrong and how to fix it.
//!
//! ```rust,ignore
//! use viewtree::suggestions;
//!
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

/// The settings file is missing.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a viewtree.yaml file next to your views directory\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set the VIEWTREE_CONFIG environment variable",
        path = path.display()
    )
}

/// No view resolves for a URL or path.
pub fn view_not_found(target: &str, views_dir: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "No view found for: {target}\n\n\
         hint: Each view needs <path>/<handle>.config.xml under {dir}\n\
         hint: Run 'viewtree ls' to see the views that exist",
        dir = views_dir.display()
    )
}

/// A glob passed to `ls --pattern` does not parse.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid glob pattern: {pattern}\n\
         error: {error}\n\n\
         hint: Patterns match view paths, e.g. 'blog/*' or '**/archive'\n\
         hint: Use [abc] for character classes, [!abc] to negate"
    )
}

/// A `-p` render parameter is not in `key=value` form.
pub fn invalid_parameter(raw: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid parameter: {raw}\n\n\
         hint: Pass parameters as key=value, e.g. -p page=2\n\
         hint: Repeat a key to build a list: -p tag=rust -p tag=xml"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_has_hints() {
        let message = config_not_found(Path::new("/tmp/viewtree.yaml")).to_string();
        assert!(message.contains("/tmp/viewtree.yaml"));
        assert!(message.contains("VIEWTREE_CONFIG"));
    }

    #[test]
    fn test_view_not_found_has_hints() {
        let message = view_not_found("/blog/x", Path::new("views")).to_string();
        assert!(message.contains("/blog/x"));
        assert!(message.contains("viewtree ls"));
    }

    #[test]
    fn test_invalid_glob_message() {
        let error = glob::Pattern::new("[").unwrap_err();
        let message = invalid_glob("[", &error).to_string();
        assert!(message.contains("Invalid glob pattern: ["));
    }

    #[test]
    fn test_invalid_parameter_message() {
        assert!(invalid_parameter("page").to_string().contains("key=value"));
    }
}
