//! # Views
//!
//! A [`View`] is a named node in the view tree. It carries metadata (title,
//! content type, role tags), the handles of the events and data sources
//! that feed it, the names of the positional URL parameters it accepts,
//! and its template.
//!
//! Known attributes are typed fields. Anything else found in a definition
//! is kept in [`View::extra`] so it survives a load/save round trip.
//!
//! Navigation (parent, children, ancestry) and persistence (save, move,
//! delete) go through a [`Views`] repository, which resolves paths against
//! a [`crate::store::DefinitionStore`].

use std::collections::BTreeMap;

use crate::defaults;
use crate::error::{Error, Result};
use crate::params::{ParamValue, ParameterRegister};
use crate::path;

pub mod definition;
pub mod messages;
pub mod repository;

pub use messages::{FieldMessage, Messages};
pub use repository::{Children, Views};

/// An attribute value as found in a definition: scalar text or a list of
/// `<item>` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Text(String),
    List(Vec<String>),
}

impl Attribute {
    /// Interpret as a list. Empty text is an empty list; other text is a
    /// one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Attribute::List(items) => items,
            Attribute::Text(text) if text.is_empty() => Vec::new(),
            Attribute::Text(text) => vec![text],
        }
    }

    /// Interpret as text, joining list items with `", "`.
    pub fn into_text(self) -> String {
        match self {
            Attribute::Text(text) => text,
            Attribute::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Text(value.to_string())
    }
}

impl From<Vec<&str>> for Attribute {
    fn from(values: Vec<&str>) -> Self {
        Attribute::List(values.into_iter().map(str::to_string).collect())
    }
}

/// A node in the view tree
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    path: String,
    handle: String,
    guid: Option<String>,
    pub title: String,
    pub content_type: String,
    pub url_parameters: Vec<String>,
    pub types: Vec<String>,
    pub events: Vec<String>,
    pub data_sources: Vec<String>,
    pub template: Option<String>,
    /// Attributes without a typed field, in name order
    pub extra: BTreeMap<String, Attribute>,
    parameters: ParameterRegister,
}

impl View {
    /// Create an empty view at `path`
    pub fn new(view_path: &str) -> Self {
        let view_path = path::normalize(view_path);
        Self {
            handle: path::handle(&view_path).to_string(),
            path: view_path,
            guid: None,
            title: String::new(),
            content_type: defaults::CONTENT_TYPE.to_string(),
            url_parameters: Vec::new(),
            types: Vec::new(),
            events: Vec::new(),
            data_sources: Vec::new(),
            template: None,
            extra: BTreeMap::new(),
            parameters: ParameterRegister::new(),
        }
    }

    /// Build a view from a field mapping, as submitted by an editing form.
    pub fn from_fields<I, K>(view_path: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Attribute)>,
        K: AsRef<str>,
    {
        let mut view = View::new(view_path);
        for (name, value) in fields {
            view.set_attribute(name.as_ref(), value);
        }
        view
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    /// Assign a guid. A view that already has one keeps it.
    pub fn set_guid(&mut self, guid: impl Into<String>) {
        if self.guid.is_none() {
            self.guid = Some(guid.into());
        }
    }

    /// The view's guid, generating one on first use
    pub fn ensure_guid(&mut self) -> &str {
        self.guid.get_or_insert_with(generate_guid)
    }

    pub(crate) fn relocate(&mut self, view_path: &str) {
        self.path = path::normalize(view_path);
        self.handle = path::handle(&self.path).to_string();
    }

    /// Path of the parent view, `None` for a root view
    pub fn parent_path(&self) -> Option<String> {
        path::parent(&self.path)
    }

    pub fn is_root(&self) -> bool {
        self.path == self.handle
    }

    /// Relative location of the template file
    pub fn template_pathname(&self) -> String {
        path::template_file(&self.path)
    }

    /// Set an attribute by its definition name. Known names update the
    /// typed field; anything else lands in [`View::extra`].
    pub fn set_attribute(&mut self, name: &str, value: Attribute) {
        match name {
            "title" => self.title = value.into_text(),
            "content-type" => self.content_type = value.into_text(),
            "url-parameters" => self.url_parameters = value.into_list(),
            "types" => self.types = value.into_list(),
            "events" => self.events = value.into_list(),
            "data-sources" => self.data_sources = value.into_list(),
            "template" => self.template = Some(value.into_text()),
            "guid" => self.set_guid(value.into_text()),
            _ => {
                self.extra.insert(name.to_string(), value);
            }
        }
    }

    /// Read an attribute by its definition name
    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        let list = |items: &Vec<String>| Some(Attribute::List(items.clone()));
        match name {
            "title" => Some(Attribute::Text(self.title.clone())),
            "content-type" => Some(Attribute::Text(self.content_type.clone())),
            "url-parameters" => list(&self.url_parameters),
            "types" => list(&self.types),
            "events" => list(&self.events),
            "data-sources" => list(&self.data_sources),
            "template" => self.template.clone().map(Attribute::Text),
            "guid" => self.guid.clone().map(Attribute::Text),
            _ => self.extra.get(name).cloned(),
        }
    }

    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// Parameters bound from the URL
    pub fn parameters(&self) -> &ParameterRegister {
        &self.parameters
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.parameters.set(name, value);
    }

    /// Bind positional URL parameters to the declared `url-parameters`
    /// names.
    pub fn bind_parameters(&mut self, values: &[String]) -> Result<()> {
        if self.url_parameters.is_empty() {
            return Err(Error::DoesNotAcceptParameters {
                path: self.path.clone(),
            });
        }
        if values.len() > self.url_parameters.len() {
            return Err(Error::TooManyParameters {
                path: self.path.clone(),
                supplied: values.len(),
                accepted: self.url_parameters.len(),
            });
        }
        for (name, value) in self.url_parameters.iter().zip(values) {
            self.parameters.set(name.clone(), value.clone());
        }
        Ok(())
    }
}

/// Generate a new globally unique view id
pub fn generate_guid() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Guid of a stored definition that declares none. Stable while the
/// definition keeps its path and text.
pub fn derived_guid(view_path: &str, config: &str) -> String {
    let name = format!("{}\n{}", path::normalize(view_path), config);
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_URL, name.as_bytes())
        .simple()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_view_defaults() {
        let view = View::new("/blog/articles/");
        assert_eq!(view.path(), "blog/articles");
        assert_eq!(view.handle(), "articles");
        assert_eq!(view.content_type, "text/html;charset=utf-8");
        assert_eq!(view.guid(), None);
        assert!(!view.is_root());
        assert_eq!(view.parent_path(), Some("blog".to_string()));
        assert_eq!(view.template_pathname(), "blog/articles/articles.xsl");
    }

    #[test]
    fn test_from_fields_routes_known_and_unknown() {
        let view = View::from_fields(
            "home",
            vec![
                ("title", Attribute::from("Home")),
                ("types", Attribute::from(vec!["index"])),
                ("url-parameters", Attribute::from(vec!["page"])),
                ("layout", Attribute::from("wide")),
            ],
        );
        assert_eq!(view.title, "Home");
        assert!(view.has_type("index"));
        assert_eq!(view.url_parameters, vec!["page"]);
        assert_eq!(view.extra.get("layout"), Some(&Attribute::from("wide")));
        assert_eq!(view.attribute("layout"), Some(Attribute::from("wide")));
        assert!(view.is_root());
    }

    #[test]
    fn test_guid_is_stable_once_assigned() {
        let mut view = View::new("home");
        let first = view.ensure_guid().to_string();
        assert_eq!(view.ensure_guid(), first);
        view.set_guid("other");
        assert_eq!(view.guid(), Some(first.as_str()));
    }

    #[test]
    fn test_bind_parameters_positionally() {
        let mut view = View::new("blog");
        view.url_parameters = vec!["year".to_string(), "month".to_string()];
        view.bind_parameters(&["2024".to_string()]).unwrap();
        assert_eq!(view.parameters().get("year"), Some(&ParamValue::from("2024")));
        assert!(!view.parameters().contains("month"));
    }

    #[test]
    fn test_bind_too_many_parameters() {
        let mut view = View::new("blog");
        view.url_parameters = vec!["year".to_string()];
        let err = view
            .bind_parameters(&["2024".to_string(), "05".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyParameters {
                supplied: 2,
                accepted: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_bind_parameters_without_declared_names() {
        let mut view = View::new("about");
        let err = view.bind_parameters(&["x".to_string()]).unwrap_err();
        assert!(matches!(err, Error::DoesNotAcceptParameters { .. }));
    }

    #[test]
    fn test_attribute_conversions() {
        assert_eq!(Attribute::from("").into_list(), Vec::<String>::new());
        assert_eq!(Attribute::from("a").into_list(), vec!["a"]);
        assert_eq!(Attribute::from(vec!["a", "b"]).into_text(), "a, b");
    }
}
