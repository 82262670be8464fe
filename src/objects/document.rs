//! DiggsDocument - the root container of a generated DIGGS document.

use crate::objects::element::Element;

/// Name of the DIGGS root element.
pub const ROOT_ELEMENT: &str = "Diggs";

/// A complete DIGGS document, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiggsDocument {
    root: Element,
}

impl DiggsDocument {
    /// Wraps a finished root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consumes the document and returns its root element.
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Follows a path of child names from the root.
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.root.find(path)
    }

    /// All `gml:id` values in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.root.descendants().filter_map(Element::id)
    }

    /// The element carrying the given `gml:id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.root.descendants().find(|e| e.id() == Some(id))
    }

    /// All elements with the given name, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.root.descendants().filter(move |e| e.name() == name)
    }
}
