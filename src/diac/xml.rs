//! Small helpers over `xmltree` shared by every emitter.

use crate::error::RenderError;
use xmltree::{Element, EmitterConfig, XMLNode};

/// Declaration written at the top of every emitted document.
///
/// 4diac only recognises the hyphenated encoding token, so the declaration is written
/// here rather than left to the serializer.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Creates an element with attributes in the given order.
pub fn element(name: &str, attributes: &[(&str, &str)]) -> Element {
    let mut elem = Element::new(name);
    for (key, value) in attributes {
        elem.attributes.insert(key.to_string(), value.to_string());
    }
    elem
}

/// Appends `child` to the children of `parent`.
pub fn push_child(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}

/// Iterates over the direct child elements named `name`.
pub fn child_elements<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    parent.children.iter().filter_map(move |node| match node {
        XMLNode::Element(child) if child.name == name => Some(child),
        _ => None,
    })
}

/// Serializes a root element into a complete, indented UTF-8 document.
pub fn render_document(root: &Element) -> Result<String, RenderError> {
    let config = EmitterConfig::new()
        .perform_indent(true)
        .write_document_declaration(false);

    let mut buffer = Vec::new();
    root.write_with_config(&mut buffer, config)
        .map_err(|e| RenderError::Serialize {
            element: root.name.clone(),
            message: e.to_string(),
        })?;
    let body = String::from_utf8(buffer).map_err(|_| RenderError::Encoding(root.name.clone()))?;

    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}
