//! Template engines
//!
//! The renderer hands the composite document, the view's template text and
//! the flattened parameter register to a [`TemplateEngine`], then asks the
//! engine whether the transform reported errors.
//!
//! [`TokenEngine`] is the engine shipped with the crate. It substitutes two
//! kinds of token in the template text:
//!
//! - `{$name}` is replaced with the value of parameter `name`.
//! - `{/data/path/to/element}` is replaced with the text of the first
//!   element on that path in the composite document.
//!
//! A token that does not resolve is recorded as an error.

use std::collections::BTreeMap;

use regex::{Captures, Regex};

use crate::document::Document;
use crate::error::{Error, Result};

const TOKEN_PATTERN: &str = r"\{(\$[A-Za-z_][A-Za-z0-9_.\-]*|/[^{}\s]*)\}";

/// Output flavour requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xml,
    Html,
    Text,
}

impl OutputFormat {
    /// Pick the format matching a view's content type
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if mime == "text/html" {
            OutputFormat::Html
        } else if mime.ends_with("/xml") || mime.ends_with("+xml") {
            OutputFormat::Xml
        } else {
            OutputFormat::Text
        }
    }
}

/// Engine-specific settings passed through the renderer untouched
pub type TransformOptions = BTreeMap<String, String>;

/// Turns a document and a template into output bytes
pub trait TemplateEngine {
    fn transform(
        &mut self,
        document: &Document,
        template: &str,
        format: OutputFormat,
        params: &BTreeMap<String, String>,
        options: &TransformOptions,
    ) -> Vec<u8>;

    /// Whether the last transform reported errors
    fn has_errors(&self) -> bool;

    /// Messages reported by the last transform
    fn errors(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Token substitution engine
#[derive(Debug, Clone)]
pub struct TokenEngine {
    pattern: Regex,
    errors: Vec<String>,
}

impl TokenEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: token_pattern()?,
            errors: Vec::new(),
        })
    }
}

impl TemplateEngine for TokenEngine {
    fn transform(
        &mut self,
        document: &Document,
        template: &str,
        _format: OutputFormat,
        params: &BTreeMap<String, String>,
        _options: &TransformOptions,
    ) -> Vec<u8> {
        let mut errors = Vec::new();
        let output = self.pattern.replace_all(template, |caps: &Captures| {
            let token = &caps[1];
            let resolved = match token.strip_prefix('$') {
                Some(name) => params.get(name).cloned(),
                None => document.select(token),
            };
            resolved.unwrap_or_else(|| {
                errors.push(format!("unresolved token {{{}}}", token));
                String::new()
            })
        });
        let output = output.into_owned().into_bytes();
        self.errors = errors;
        output
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }
}

fn token_pattern() -> Result<Regex> {
    Regex::new(TOKEN_PATTERN).map_err(Error::Regex)
}

/// Expand `{$name}` tokens in `text` from `params`. Unknown names are left
/// as written; document path tokens are not touched.
pub fn expand_parameters(text: &str, params: &BTreeMap<String, String>) -> Result<String> {
    let pattern = token_pattern()?;
    Ok(pattern
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .strip_prefix('$')
                .and_then(|name| params.get(name).cloned())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned())
}
