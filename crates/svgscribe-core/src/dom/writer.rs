use super::{Document, Node, NodeId};
use crate::types::Length;
use rustc_hash::FxHashMap;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const DOCTYPE_IDS: &str =
    r#"PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd""#;

/// Attribute values at most this long are always written inline.
pub const ENTITY_MIN_LEN: usize = 30;

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Replace repeated long attribute values with internal DTD entities.
    pub compress: bool,
    /// Overrides the root `width` attribute.
    pub width: Option<Length>,
    /// Overrides the root `height` attribute.
    pub height: Option<Length>,
}

impl WriteOptions {
    pub fn compressed() -> Self {
        Self {
            compress: true,
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: Length, height: Length) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Serializes the subtree at `root` as a standalone SVG 1.1 document.
pub fn write(doc: &Document, root: NodeId, options: &WriteOptions) -> String {
    let mut w = Writer {
        doc,
        root,
        options,
        entities: EntityTable::default(),
    };
    if options.compress {
        w.collect_entities();
    }

    let mut body = String::new();
    w.write_node(&mut body, root);

    let mut out = String::with_capacity(body.len() + 256);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE svg ");
    out.push_str(DOCTYPE_IDS);
    if !w.entities.declared.is_empty() {
        out.push_str(" [\n");
        for (name, value) in &w.entities.declared {
            out.push_str("<!ENTITY ");
            out.push_str(name);
            out.push_str(" \"");
            out.push_str(value);
            out.push_str("\">\n");
        }
        out.push(']');
    }
    out.push_str(">\n");
    out.push_str(&body);
    out.push('\n');
    out
}

#[derive(Debug, Default)]
struct EntityTable {
    by_value: FxHashMap<String, String>,
    declared: Vec<(String, String)>,
}

struct Writer<'a> {
    doc: &'a Document,
    root: NodeId,
    options: &'a WriteOptions,
    entities: EntityTable,
}

fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

fn compressible(value: &str) -> bool {
    value.len() > ENTITY_MIN_LEN && !value.contains(['<', '&', '"', '%'])
}

impl Writer<'_> {
    /// Names every long value `E1`, `E2`, ... at first sight, then inlines the ones seen once.
    fn collect_entities(&mut self) {
        let mut first_seen: Vec<String> = Vec::new();
        let mut counts: FxHashMap<String, (usize, usize)> = FxHashMap::default();

        for id in self.doc.descendants(self.root) {
            let Some(node) = self.doc.node(id) else {
                continue;
            };
            for (name, value) in self.attributes_of(id, node) {
                if is_namespace_declaration(&name) || !compressible(&value) {
                    continue;
                }
                match counts.get_mut(&value) {
                    Some((_, n)) => *n += 1,
                    None => {
                        counts.insert(value.clone(), (first_seen.len() + 1, 1));
                        first_seen.push(value);
                    }
                }
            }
        }

        for value in first_seen {
            let Some(&(number, uses)) = counts.get(&value) else {
                continue;
            };
            if uses < 2 {
                continue;
            }
            let name = format!("E{number}");
            tracing::trace!(entity = %name, uses, "declaring entity");
            self.entities.by_value.insert(value.clone(), name.clone());
            self.entities.declared.push((name, value));
        }
        tracing::debug!(
            entities = self.entities.declared.len(),
            candidates = counts.len(),
            "attribute compression finished"
        );
    }

    /// Attributes as written, with the root size overrides applied.
    ///
    /// Foreign `xmlns:prefix` declarations pass through; the root's SVG and xlink ones are
    /// always written by [`Writer::write_node`].
    fn attributes_of(&self, id: NodeId, node: &Node) -> Vec<(String, String)> {
        let is_root = id == self.root;
        let mut attrs: Vec<(String, String)> = node
            .attributes()
            .filter(|(name, _)| !(is_root && matches!(*name, "xmlns" | "xmlns:xlink")))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        if is_root {
            let overrides = [("width", self.options.width), ("height", self.options.height)];
            for (name, value) in overrides {
                let Some(value) = value else {
                    continue;
                };
                let text = value.to_string();
                match attrs.iter_mut().find(|(n, _)| n == name) {
                    Some(slot) => slot.1 = text,
                    None => attrs.push((name.to_string(), text)),
                }
            }
        }
        attrs
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(node) = self.doc.node(id) else {
            return;
        };
        if node.is_character_data() {
            if let Some(text) = node.text() {
                escape_text_into(out, text);
            }
            return;
        }

        let tag = node.kind().tag();
        out.push('<');
        out.push_str(tag);
        if id == self.root {
            push_attr(out, "xmlns", SVG_NS);
            push_attr(out, "xmlns:xlink", XLINK_NS);
        }
        if !node.id().is_empty() {
            push_attr(out, "id", node.id());
        }
        for (name, value) in self.attributes_of(id, node) {
            let entity = if is_namespace_declaration(&name) {
                None
            } else {
                self.entities.by_value.get(&value)
            };
            match entity {
                Some(entity) => {
                    out.push(' ');
                    out.push_str(&name);
                    out.push_str("=\"&");
                    out.push_str(entity);
                    out.push_str(";\"");
                }
                None => push_attr(out, &name, &value),
            }
        }

        let children = node.children();
        if children.is_empty() && node.text().is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = node.text() {
            escape_text_into(out, text);
        }
        for child in children {
            self.write_node(out, *child);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attr_into(out, value);
    out.push('"');
}

fn escape_attr_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

fn escape_text_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

impl Document {
    /// Writes the whole document starting at [`Document::root`]. Empty when no root is set.
    pub fn to_svg(&self, options: &WriteOptions) -> String {
        match self.root() {
            Some(root) => write(self, root, options),
            None => String::new(),
        }
    }
}
