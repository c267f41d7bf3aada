//! # Terminal Output
//!
//! Controls how the CLI decorates what it prints. Colour and symbols are
//! used only when the `--color` flag and the environment allow it:
//!
//! - `--color=always|never|auto`
//! - `NO_COLOR` disables colour when set (https://no-color.org/)
//! - `CLICOLOR=0` disables colour, `CLICOLOR_FORCE=1` forces it
//! - `TERM=dumb` disables colour

use std::env;

use console::style;

/// Whether decorated output is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag against the environment
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// `✓ message`, or `[ok] message` without colour
    pub fn success(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", style("✓").green().bold(), message)
        } else {
            format!("[ok] {}", message)
        }
    }

    /// `✗ message`, or `[error] message` without colour
    pub fn failure(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {}", style("✗").red().bold(), message)
        } else {
            format!("[error] {}", message)
        }
    }

    /// A de-emphasised annotation such as a guid or a type list
    pub fn dim(&self, text: &str) -> String {
        if self.use_color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
