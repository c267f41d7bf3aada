//! Composite Document Construction
//!
//! Folds producer output and the resolved parameters into the document
//! handed to the template engine. For a fresh document the result is:
//!
//! ```xml
//! <data>
//!   <events>
//!     <!-- event fragments, in invocation order -->
//!   </events>
//!   <!-- data source fragments, in dependency order -->
//!   <parameters>
//!     <page>2</page>
//!     <tags value="rust, xml"><item>rust</item><item>xml</item></tags>
//!   </parameters>
//! </data>
//! ```
//!
//! A caller-supplied document is extended the same way below its existing
//! document element.
//!
//! Parameters written by producers are merged into the caller's register
//! in the order they were written. A key written again replaces the value
//! and keeps its first position (last write wins).

use xot::Node;

use crate::document::Document;
use crate::error::Result;
use crate::params::ParameterRegister;
use crate::producer::Fragment;

/// Append the `<events>` wrapper to the document element
pub fn events_zone(document: &mut Document) -> Result<Node> {
    let root = document.root();
    document.append_element(root, "events")
}

/// Append `fragments` to `parent`, in order
pub fn append_fragments(document: &mut Document, parent: Node, fragments: &[Fragment]) -> Result<()> {
    for fragment in fragments {
        document.append_fragment(parent, fragment)?;
    }
    Ok(())
}

/// Merge producer output into the caller's register
pub fn merge_output(params: &mut ParameterRegister, output: &ParameterRegister) {
    params.merge(output);
}

/// Append the `<parameters>` zone reflecting `params`.
///
/// A sequence of more than one value becomes an element whose `value`
/// attribute holds the joined values, with one `<item>` child per value.
/// Anything else becomes a text element.
pub fn append_parameters(document: &mut Document, params: &ParameterRegister) -> Result<Node> {
    let root = document.root();
    let zone = document.append_element(root, "parameters")?;
    for (key, value) in params.iter() {
        if value.is_multi() {
            let element = document.append_element(zone, key)?;
            document.set_attribute(element, "value", &value.to_string());
            for item in value.values() {
                document.append_text_element(element, "item", item)?;
            }
        } else {
            document.append_text_element(zone, key, &value.to_string())?;
        }
    }
    Ok(zone)
}
