//! Composite document
//!
//! The XML tree a render assembles from producer fragments and resolved
//! parameters, and the input handed to the template engine. It wraps an
//! [`xot::Xot`] arena holding a single document.

use std::fmt;

use xot::{Node, Xot};

use crate::error::{Error, Result};
use crate::producer::Fragment;

/// An XML document with a single root element
pub struct Document {
    xot: Xot,
    root: Node,
    doc: Node,
}

impl Document {
    /// A document holding only an empty `<root_name>` element
    pub fn new(root_name: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let name = xot.add_name(&element_name(root_name));
        let root = xot.new_element(name);
        let doc = xot.new_document_with_element(root).map_err(Error::xml)?;
        Ok(Self { xot, root, doc })
    }

    /// Parse an existing document
    pub fn parse(xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let doc = xot.parse(xml).map_err(Error::xml)?;
        let root = xot.document_element(doc).map_err(Error::xml)?;
        Ok(Self { xot, root, doc })
    }

    /// The document element
    pub fn root(&self) -> Node {
        self.root
    }

    /// Append an empty element to `parent`
    pub fn append_element(&mut self, parent: Node, name: &str) -> Result<Node> {
        let name = self.xot.add_name(&element_name(name));
        let element = self.xot.new_element(name);
        self.xot.append(parent, element).map_err(Error::xml)?;
        Ok(element)
    }

    /// Append `<name>text</name>` to `parent`
    pub fn append_text_element(&mut self, parent: Node, name: &str, text: &str) -> Result<Node> {
        let element = self.append_element(parent, name)?;
        if !text.is_empty() {
            self.xot.append_text(element, text).map_err(Error::xml)?;
        }
        Ok(element)
    }

    pub fn set_attribute(&mut self, node: Node, name: &str, value: &str) {
        let name = self.xot.add_name(name);
        self.xot.set_attribute(node, name, value);
    }

    pub fn attribute(&self, node: Node, name: &str) -> Option<&str> {
        let name = self.xot.name(name)?;
        self.xot.get_attribute(node, name)
    }

    /// Copy `fragment` into the document as the last child of `parent`
    pub fn append_fragment(&mut self, parent: Node, fragment: &Fragment) -> Result<()> {
        match fragment {
            Fragment::Text(text) => {
                if !text.is_empty() {
                    self.xot.append_text(parent, text).map_err(Error::xml)?;
                }
            }
            Fragment::Element {
                name,
                attributes,
                children,
            } => {
                let element = self.append_element(parent, name)?;
                for (key, value) in attributes {
                    self.set_attribute(element, key, value);
                }
                for child in children {
                    self.append_fragment(element, child)?;
                }
            }
        }
        Ok(())
    }

    /// Names of the element children of `node`, in document order
    pub fn child_names(&self, node: Node) -> Vec<String> {
        self.xot
            .children(node)
            .filter_map(|child| self.xot.element(child))
            .map(|element| self.xot.local_name_str(element.name()).to_string())
            .collect()
    }

    /// The first element, in document order, on an absolute path such as
    /// `/data/parameters/page`
    pub fn find(&self, path: &str) -> Option<Node> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (first, rest) = segments.split_first()?;
        if !self.has_name(self.root, first) {
            return None;
        }
        self.find_below(self.root, rest)
    }

    fn find_below(&self, node: Node, segments: &[&str]) -> Option<Node> {
        let Some((first, rest)) = segments.split_first() else {
            return Some(node);
        };
        self.xot
            .children(node)
            .filter(|child| self.has_name(*child, first))
            .find_map(|child| self.find_below(child, rest))
    }

    fn has_name(&self, node: Node, name: &str) -> bool {
        self.xot
            .element(node)
            .is_some_and(|element| self.xot.local_name_str(element.name()) == name)
    }

    /// Concatenated text of `node` and its descendants
    pub fn string_value(&self, node: Node) -> String {
        self.xot.string_value(node)
    }

    /// Text of the first element on `path`
    pub fn select(&self, path: &str) -> Option<String> {
        self.find(path).map(|node| self.string_value(node))
    }

    /// Serialize the whole document
    pub fn to_xml(&self) -> Result<String> {
        self.xot.to_string(self.doc).map_err(Error::xml)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_xml() {
            Ok(xml) => f.debug_tuple("Document").field(&xml).finish(),
            Err(_) => f.write_str("Document(<unserializable>)"),
        }
    }
}

/// Turn an arbitrary key into a usable element name. Characters outside
/// `[A-Za-z0-9_.-]` become `-`, and a name that cannot start an element
/// gets a `_` prefix.
pub fn element_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let valid_start = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start {
        name.insert(0, '_');
    }
    name
}
