use super::{AttributeValue, Document, ElementKind, NodeId};
use crate::error::LoadError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parses SVG markup into a [`Document`] whose root is the outermost element.
///
/// Internal DTD entities are expanded, so compressed output from [`super::write`] reads back.
/// Whitespace-only text, comments and processing instructions are dropped.
pub fn load(markup: &str) -> Result<Document, LoadError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let xml = roxmltree::Document::parse_with_options(markup, options)?;

    let mut doc = Document::new();
    let root = convert_element(&mut doc, xml.root_element())?;
    doc.root = Some(root);
    Ok(doc)
}

/// `local` or `prefix:local`; SVG (or no) namespace keeps the bare local name.
fn qualified_name(el: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace {
        None | Some(SVG_NS) => local.to_string(),
        Some(XLINK_NS) => format!("xlink:{local}"),
        Some(XML_NS) => format!("xml:{local}"),
        Some(uri) => match el.lookup_prefix(uri) {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
            _ => local.to_string(),
        },
    }
}

/// Namespace declarations first made on `el`, as `xmlns`/`xmlns:prefix` attributes.
///
/// The SVG, xlink and xml namespaces are left out; the writer always declares them itself.
fn declared_namespaces(el: roxmltree::Node<'_, '_>) -> Vec<(String, String)> {
    let inherited = el.parent_element();
    el.namespaces()
        .filter(|ns| !matches!(ns.uri(), SVG_NS | XLINK_NS | XML_NS))
        .filter(|ns| match inherited {
            Some(parent) => !parent
                .namespaces()
                .any(|outer| outer.name() == ns.name() && outer.uri() == ns.uri()),
            None => true,
        })
        .map(|ns| {
            let name = match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            (name, ns.uri().to_string())
        })
        .collect()
}

fn convert_element(doc: &mut Document, el: roxmltree::Node<'_, '_>) -> Result<NodeId, LoadError> {
    let tag = qualified_name(el, el.tag_name().namespace(), el.tag_name().name());
    let kind = ElementKind::from_tag(&tag);
    let id = doc.create_element_with_id(kind.clone(), el.attribute("id").unwrap_or_default());

    for (name, uri) in declared_namespaces(el) {
        doc.nodes[id.0].set_attr(name, AttributeValue::Text(uri));
    }

    for attr in el.attributes() {
        if attr.namespace().is_none() && attr.name() == "id" {
            continue;
        }
        let name = qualified_name(el, attr.namespace(), attr.name());
        let value = AttributeValue::parse_for(&kind, &name, attr.value()).map_err(|source| {
            LoadError::Format {
                tag: tag.clone(),
                attribute: name.clone(),
                source,
            }
        })?;
        doc.nodes[id.0].set_attr(name, value);
    }

    for child in el.children() {
        let child_id = if child.is_element() {
            convert_element(doc, child)?
        } else if child.is_text() {
            match child.text() {
                Some(text) if !text.trim().is_empty() => doc.create_text(text),
                _ => continue,
            }
        } else {
            continue;
        };
        doc.nodes[child_id.0].parent = Some(id);
        doc.nodes[id.0].children.push(child_id);
    }

    Ok(id)
}
