//! Owned XML element tree with a quick-xml based parser and writer.
//!
//! The merge engine mutates a parsed manifest in place, so the tree keeps
//! everything a round trip needs: the declaration, comments (including the
//! license comments Android projects put before the root element), attribute
//! order, and every element the merge does not touch.

mod parser;
mod writer;

pub use parser::parse_document;
pub use writer::write_document;

use thiserror::Error;

/// XML errors
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: usize, message: String },
    #[error("unexpected closing tag '</{0}>'")]
    UnexpectedClose(String),
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("document has no root element")]
    NoRoot,
    #[error("failed to serialize XML: {0}")]
    Serialize(#[from] quick_xml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The `<?xml ...?>` declaration, when present.
    pub decl: Option<XmlDecl>,

    /// Comments appearing before the root element.
    pub prologue: Vec<String>,

    /// The root element.
    pub root: Element,

    /// Comments appearing after the root element.
    pub epilogue: Vec<String>,
}

impl Document {
    /// Create a document holding just a root element.
    pub fn new(root: Element) -> Self {
        Self {
            decl: None,
            prologue: Vec::new(),
            root,
            epilogue: Vec::new(),
        }
    }
}

/// The XML declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// An element node. Attribute order is preserved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Any node an element can contain.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value of the attribute with this name, when present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements with this name, in document order.
    pub fn child_elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter_map(move |node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Mutable reference to the first child element with this name,
    /// appending an empty one when missing.
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        let exists = self
            .children
            .iter()
            .any(|node| matches!(node, Node::Element(element) if element.name == name));
        if !exists {
            self.children.push(Node::Element(Element::new(name)));
        }
        self.children
            .iter_mut()
            .find_map(|node| match node {
                Node::Element(element) if element.name == name => Some(element),
                _ => None,
            })
            .expect("child element exists after insertion")
    }

    /// Insert a child element directly after the last sibling with the same
    /// name, or at the end when there is none. Keeps repeated children
    /// grouped when new entries are appended to an existing document.
    pub fn insert_grouped(&mut self, element: Element) {
        let position = self.children.iter().rposition(
            |node| matches!(node, Node::Element(existing) if existing.name == element.name),
        );
        match position {
            Some(index) => self.children.insert(index + 1, Node::Element(element)),
            None => self.children.push(Node::Element(element)),
        }
    }
}
