//! XML serialization of module forests into the package document.
//!
//! Fragments are built as an [`Element`] tree and rendered once, pretty-printed
//! with two-space indentation. Element order inside every module is fixed:
//! `name`, `script`, `packageName`, then the kind's own fields in schema order,
//! then (for folders) the children.

use std::fmt::{Display, Write as _};

use crate::constants::{DOCUMENT_ROOT, PACKAGE_PLACEHOLDERS, SCHEMA_VERSION, VERSION_PLACEHOLDERS};
use crate::factory::ModuleForest;
use crate::kind::Kind;
use crate::module::{ModuleArena, ModuleData, ModuleId};

/// Kind-specific part of a module's XML representation.
pub trait XmlFields {
    /// Attributes following `isActive` and `isFolder`.
    fn attributes(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Elements following `name`, `script` and `packageName`.
    fn elements(&self) -> Vec<Element>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self { tag: tag.into(), attributes: Vec::new(), children: Vec::new() }
    }

    /// An element holding only `value` as text. Empty values render as `<tag/>`.
    pub fn text<S: Into<String>, V: Display>(tag: S, value: V) -> Self {
        let value = value.to_string();
        let mut element = Self::new(tag);
        if !value.is_empty() {
            element.children.push(Node::Text(value));
        }
        element
    }

    /// A wrapper element with one `item_tag` child per item.
    pub fn list<S, I, V>(tag: S, item_tag: &str, items: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Display,
    {
        items
            .into_iter()
            .fold(Self::new(tag), |list, item| list.child(Self::text(item_tag, item)))
    }

    pub fn attr<K: Into<String>, V: Display>(mut self, key: K, value: V) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.tag);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape_attribute(value));
        }

        match self.children.as_slice() {
            [] => out.push_str("/>\n"),
            [Node::Text(text)] => {
                let _ = writeln!(out, ">{}</{}>", escape_text(text), self.tag);
            }
            children => {
                out.push_str(">\n");
                for child in children {
                    match child {
                        Node::Element(element) => element.write(out, depth + 1),
                        Node::Text(text) => {
                            let _ = writeln!(out, "{indent}  {}", escape_text(text));
                        }
                    }
                }
                let _ = writeln!(out, "{indent}</{}>", self.tag);
            }
        }
    }
}

/// Escapes markup characters and drops characters XML 1.0 cannot carry.
pub fn escape_text(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            // not representable in XML 1.0
            c if c.is_control() && c < '\u{80}' => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

fn fields(data: &ModuleData) -> &dyn XmlFields {
    match data {
        ModuleData::Alias(alias) => alias,
        ModuleData::Key(key) => key,
        ModuleData::Script(script) => script,
        ModuleData::Timer(timer) => timer,
        ModuleData::Trigger(trigger) => trigger,
        ModuleData::Action(action) => action,
    }
}

/// Renders one module and, if it is a folder, all of its descendants.
pub fn module_element(arena: &ModuleArena, id: ModuleId) -> Element {
    let module = &arena[id];
    let kind_fields = fields(module.data());
    let tag = if module.is_folder().is_yes() {
        format!("{}Group", module.kind().tag())
    } else {
        module.kind().tag().to_string()
    };

    let mut element =
        Element::new(tag).attr("isActive", module.is_active()).attr("isFolder", module.is_folder());
    for (key, value) in kind_fields.attributes() {
        element = element.attr(key, value);
    }

    element.push(Element::text("name", module.name()));
    element.push(Element::text("script", module.script()));
    element.push(Element::text("packageName", module.package_name()));
    for field in kind_fields.elements() {
        element.push(field);
    }

    if module.is_folder().is_yes() {
        for child in module.children() {
            element.push(module_element(arena, *child));
        }
    }

    element
}

/// Wraps the top-level modules of one kind, e.g. `<AliasPackage>`.
pub fn package_element(kind: Kind, forest: &ModuleForest) -> Element {
    forest.roots().iter().fold(Element::new(kind.package_tag()), |package, root| {
        package.child(module_element(forest.arena(), *root))
    })
}

/// Combines the per-kind packages under the document root.
pub fn document_element(packages: Vec<Element>) -> Element {
    packages
        .into_iter()
        .fold(Element::new(DOCUMENT_ROOT).attr("version", SCHEMA_VERSION), Element::child)
}

/// Renders the complete document including declaration and DTD.
pub fn render_document(root: &Element) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE {DOCUMENT_ROOT}>\n{}",
        root.render()
    )
}

/// Replaces every package name and version placeholder in the rendered document.
pub fn substitute_placeholders(document: &str, package: &str, version: &str) -> String {
    let package = escape_text(package);
    let version = escape_text(version);

    let document = PACKAGE_PLACEHOLDERS
        .iter()
        .fold(document.to_string(), |text, placeholder| text.replace(placeholder, &package));
    VERSION_PLACEHOLDERS
        .iter()
        .fold(document, |text, placeholder| text.replace(placeholder, &version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_drops_invalid_characters() {
        assert_eq!(escape_text("a\u{1}b\u{7}c"), "abc");
        assert_eq!(escape_text("tab\there\r\nnext"), "tab\there\r\nnext");
        assert_eq!(escape_text("é \u{85} \u{FFFF}"), "é \u{85} ");
        assert_eq!(Element::text("script", "x\u{0}y").render(), "<script>xy</script>\n");
    }

    #[test]
    fn test_render_nested_elements() {
        let element = Element::new("a")
            .attr("x", "1")
            .child(Element::text("b", "hi"))
            .child(Element::text("c", ""))
            .child(Element::list("d", "string", ["p", "q"]));

        assert_eq!(
            element.render(),
            "<a x=\"1\">\n  <b>hi</b>\n  <c/>\n  <d>\n    <string>p</string>\n    <string>q</string>\n  </d>\n</a>\n"
        );
    }

    #[test]
    fn test_escaping() {
        let element = Element::new("s").attr("q", "a\"b<").child(Element::text("t", "x < y && z"));
        assert_eq!(
            element.render(),
            "<s q=\"a&quot;b&lt;\">\n  <t>x &lt; y &amp;&amp; z</t>\n</s>\n"
        );
    }

    #[test]
    fn test_document_header() {
        let document = render_document(&document_element(vec![Element::new("AliasPackage")]));
        assert_eq!(
            document,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE MudletPackage>\n<MudletPackage version=\"1.001\">\n  <AliasPackage/>\n</MudletPackage>\n"
        );
    }
}
