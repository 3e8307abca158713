//! Tree nodes produced by the assembler.

use std::collections::BTreeMap;
use std::fmt;

use super::taxonomy;
use crate::error::{Error, Result};

/// Attribute map of an element, ordered by name.
pub type Attributes = BTreeMap<String, String>;

/// Non-element content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Text(String),
    CData(String),
    Comment(String),
    /// A declaration met while an element was open.
    Declaration(Declaration),
}

/// One entry in a node's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Node(Node),
    Leaf(Leaf),
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Leaf> for Child {
    fn from(leaf: Leaf) -> Self {
        Child::Leaf(leaf)
    }
}

/// One element instance.
///
/// Classification predicates are answered by the element taxonomy on every
/// call; nothing is cached on the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attributes: Attributes,
    children: Vec<Child>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_attributes(tag, Attributes::new())
    }

    pub fn with_attributes(tag: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            children: Vec::new(),
        }
    }

    /// Create a node, rejecting an empty tag name.
    pub fn try_new(tag: impl Into<String>, attributes: Option<Attributes>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::EmptyTagName);
        }
        Ok(Self::with_attributes(tag, attributes.unwrap_or_default()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn append(&mut self, child: impl Into<Child>) {
        self.children.push(child.into());
    }

    pub fn extend<I>(&mut self, children: I)
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
    }

    /// Builder form of [`Node::append`], handy for constructing expected trees.
    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.append(child);
        self
    }

    /// Builder form for a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Leaf::Text(text.into()))
    }

    pub fn is_inline(&self) -> bool {
        taxonomy::is_inline(&self.tag)
    }

    pub fn is_block(&self) -> bool {
        taxonomy::is_block(&self.tag)
    }

    pub fn is_void(&self) -> bool {
        taxonomy::is_void(&self.tag)
    }

    /// Whether the content model of this element excludes character data.
    pub fn is_element_only(&self) -> bool {
        taxonomy::is_element_only(&self.tag)
    }

    pub fn can_contain(&self, tag: &str) -> bool {
        taxonomy::can_contain(&self.tag, tag)
    }

    pub fn is_list_item(&self) -> bool {
        self.tag == "li"
    }

    pub fn is_preformatted(&self) -> bool {
        self.tag == "pre"
    }

    pub fn is_list_container(&self) -> bool {
        matches!(self.tag.as_str(), "ul" | "ol")
    }

    pub fn is_definition_item(&self) -> bool {
        matches!(self.tag.as_str(), "dt" | "dd")
    }

    pub fn is_definition_container(&self) -> bool {
        self.is_definition_item() || self.tag == "dl"
    }

    /// Whether `other` should close this node and open at the same level.
    ///
    /// Nodes are siblings when this node cannot contain the other and either
    /// both are definition items or both carry the same tag.
    pub fn is_sibling_of(&self, other: &Node) -> bool {
        if self.can_contain(&other.tag) {
            false
        } else {
            (self.is_definition_item() && other.is_definition_item()) || self.tag == other.tag
        }
    }

    /// Concatenated text and CDATA content of this subtree, comments excluded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    for child in &node.children {
        match child {
            Child::Node(n) => collect_text(n, out),
            Child::Leaf(Leaf::Text(s) | Leaf::CData(s)) => out.push_str(s),
            Child::Leaf(Leaf::Comment(_) | Leaf::Declaration(_)) => {}
        }
    }
}

/// An XML declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    pub version: Option<String>,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Declaration {
    /// Build a declaration from the pseudo-attributes of `<?xml ... ?>`.
    ///
    /// `body` is the text between `xml` and the closing `?`, for example
    /// `version="1.0" encoding="UTF-8"`. Unknown pseudo-attributes are
    /// ignored.
    pub fn parse_pseudo_attributes(body: &str) -> Self {
        let mut decl = Declaration::default();
        let mut rest = body;

        while let Some(eq) = rest.find('=') {
            let key = rest[..eq].trim().to_ascii_lowercase();
            let after = rest[eq + 1..].trim_start();
            let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
                break;
            };
            let Some(end) = after[1..].find(quote) else {
                break;
            };
            let value = after[1..1 + end].to_string();
            match key.as_str() {
                "version" => decl.version = Some(value),
                "encoding" => decl.encoding = Some(value),
                "standalone" => decl.standalone = Some(value),
                _ => {}
            }
            rest = &after[end + 2..];
        }

        decl
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<?xml ")?;
        let fields = [
            ("version", &self.version),
            ("encoding", &self.encoding),
            ("standalone", &self.standalone),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                write!(f, "{name}=\"{value}\" ")?;
            }
        }
        f.write_str("?>")
    }
}

/// A completed top-level entry of the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Node(Node),
    Declaration(Declaration),
}

impl Item {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Item::Node(node) => Some(node),
            Item::Declaration(_) => None,
        }
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Item::Node(node)
    }
}

/// The ordered sequence of completed top-level items.
pub type Forest = Vec<Item>;
