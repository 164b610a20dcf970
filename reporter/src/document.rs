//! A minimal HTML document tree.
//!
//! Text and attribute values are escaped when the tree is rendered, raw nodes are written as-is and
//! are only used for the embedded stylesheet.

const INDENT: &str = "  ";

/// Elements that have no closing tag.
const VOID_ELEMENTS: [&str; 2] = ["br", "meta"];

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub(crate) fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub(crate) fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub(crate) fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub(crate) fn raw(mut self, html: impl Into<String>) -> Self {
        self.children.push(Node::Raw(html.into()));
        self
    }

    pub(crate) fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub(crate) fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);

        out.push_str(&indent);
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            out.push('\n');
            return;
        }

        // Elements holding only text stay on one line.
        if self
            .children
            .iter()
            .all(|child| matches!(child, Node::Text(_)))
        {
            for child in &self.children {
                if let Node::Text(text) = child {
                    out.push_str(&escape(text));
                }
            }
        } else {
            out.push('\n');
            let child_indent = INDENT.repeat(depth + 1);
            for child in &self.children {
                match child {
                    Node::Element(element) => element.write(out, depth + 1),
                    Node::Text(text) => {
                        out.push_str(&child_indent);
                        out.push_str(&escape(text));
                        out.push('\n');
                    }
                    Node::Raw(raw) => {
                        for line in raw.lines() {
                            out.push_str(&child_indent);
                            out.push_str(line);
                            out.push('\n');
                        }
                    }
                }
            }
            out.push_str(&indent);
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push_str(">\n");
    }
}

/// Render a complete HTML5 document.
pub(crate) fn document(head: Element, body: Element) -> String {
    let html = Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(body);

    format!("<!DOCTYPE html>\n{}", html.render())
}

pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
