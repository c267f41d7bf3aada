//! Reading and writing view configuration XML
//!
//! A configuration file looks like this:
//!
//! ```xml
//! <view guid="5f0c1e...">
//!   <title>Articles</title>
//!   <content-type>text/html;charset=utf-8</content-type>
//!   <url-parameters><item>year</item><item>month</item></url-parameters>
//!   <events><item>login</item></events>
//!   <data-sources><item>articles</item></data-sources>
//!   <types><item>index</item></types>
//! </view>
//! ```
//!
//! An element with `<item>` children is a list; any other element is text.

use xot::{Node, Xot};

use super::{derived_guid, generate_guid, Attribute, View};
use crate::error::{Error, Result};
use crate::path;
use crate::store::Definition;

/// Parse a stored definition into a view at `view_path`.
///
/// A view without a declared guid gets one derived from its path and
/// configuration text, so every load of an unchanged definition agrees.
pub fn parse(view_path: &str, definition: &Definition) -> Result<View> {
    let failure = |message: String| Error::ParseFailure {
        path: path::config_file(view_path),
        message,
    };

    let mut xot = Xot::new();
    let doc = xot
        .parse(&definition.config)
        .map_err(|e| failure(e.to_string()))?;
    let root = xot
        .document_element(doc)
        .map_err(|e| failure(e.to_string()))?;
    let guid_name = xot.add_name("guid");
    let item_name = xot.add_name("item");

    let mut attributes = Vec::new();
    for child in xot.children(root) {
        let Some(element) = xot.element(child) else {
            continue;
        };
        let name = xot.local_name_str(element.name()).to_string();
        let items: Vec<String> = xot
            .children(child)
            .filter(|c| xot.element(*c).is_some_and(|e| e.name() == item_name))
            .map(|c| xot.string_value(c))
            .collect();
        let value = if items.is_empty() {
            Attribute::Text(xot.string_value(child))
        } else {
            Attribute::List(items)
        };
        attributes.push((name, value));
    }

    let mut view = View::from_fields(view_path, attributes);
    match xot.get_attribute(root, guid_name) {
        Some(guid) if !guid.is_empty() => view.set_guid(guid),
        _ => view.set_guid(derived_guid(view_path, &definition.config)),
    }
    if definition.template.is_some() {
        view.template = definition.template.clone();
    }
    Ok(view)
}

/// Serialize a view's configuration.
///
/// Field order is fixed: title, content-type, url-parameters, events,
/// data-sources, types, then any extra attributes by name. Empty lists are
/// omitted. The guid is always written; a view without one is written with
/// a freshly generated guid.
pub fn to_xml(view: &View) -> Result<String> {
    let mut xot = Xot::new();
    let view_name = xot.add_name("view");
    let root = xot.new_element(view_name);
    let doc = xot.new_document_with_element(root).map_err(Error::xml)?;

    let guid_name = xot.add_name("guid");
    let guid = view.guid().map(str::to_string).unwrap_or_else(generate_guid);
    xot.set_attribute(root, guid_name, guid);

    append_text(&mut xot, root, "title", &view.title)?;
    append_text(&mut xot, root, "content-type", &view.content_type)?;
    append_list(&mut xot, root, "url-parameters", &view.url_parameters)?;
    append_list(&mut xot, root, "events", &view.events)?;
    append_list(&mut xot, root, "data-sources", &view.data_sources)?;
    append_list(&mut xot, root, "types", &view.types)?;

    for (name, value) in &view.extra {
        match value {
            Attribute::Text(text) => append_text(&mut xot, root, name, text)?,
            Attribute::List(items) => append_list(&mut xot, root, name, items)?,
        }
    }

    xot.to_string(doc).map_err(Error::xml)
}

/// Check that `text` is a well-formed XML document, returning the parser's
/// message if it is not.
pub fn check_well_formed(text: &str) -> std::result::Result<(), String> {
    let mut xot = Xot::new();
    xot.parse(text).map(|_| ()).map_err(|e| e.to_string())
}

fn append_text(xot: &mut Xot, parent: Node, name: &str, text: &str) -> Result<()> {
    let name = xot.add_name(name);
    let element = xot.new_element(name);
    xot.append(parent, element).map_err(Error::xml)?;
    if !text.is_empty() {
        xot.append_text(element, text).map_err(Error::xml)?;
    }
    Ok(())
}

fn append_list(xot: &mut Xot, parent: Node, name: &str, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let list_name = xot.add_name(name);
    let item_name = xot.add_name("item");
    let list = xot.new_element(list_name);
    xot.append(parent, list).map_err(Error::xml)?;
    for item in items {
        let element = xot.new_element(item_name);
        xot.append(list, element).map_err(Error::xml)?;
        if !item.is_empty() {
            xot.append_text(element, item).map_err(Error::xml)?;
        }
    }
    Ok(())
}
