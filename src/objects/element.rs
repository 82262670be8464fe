//! Element - a node of the generated XML tree.
//!
//! Elements are built bottom-up with the consuming `with_*` methods and are
//! not changed once attached to a parent.

use std::borrow::Cow;

/// Text content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    /// Text written on the same line as the tags
    Inline(String),
    /// Text written one line per entry, indented below the element
    Lines(Vec<String>),
}

/// An XML element with ordered attributes, optional text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<Text>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Creates an element holding only text.
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    /// Creates a property element wrapping a single object element,
    /// e.g. `<project><Project .../></project>`.
    pub fn wrap(name: impl Into<String>, object: Element) -> Self {
        Self::new(name).with_child(object)
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Adds a `gml:id` attribute.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("gml:id", id)
    }

    /// Sets inline text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(Text::Inline(text.into()));
        self
    }

    /// Sets multi-line text.
    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.text = Some(Text::Lines(lines));
        self
    }

    /// Appends a child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child if one is given.
    pub fn with_optional_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    /// Appends several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Qualified element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of an attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `gml:id` of this element.
    pub fn id(&self) -> Option<&str> {
        self.attr("gml:id")
    }

    /// Raw text content.
    pub fn raw_text(&self) -> Option<&Text> {
        self.text.as_ref()
    }

    /// Text content; multi-line text is joined with single spaces.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self.text.as_ref()? {
            Text::Inline(s) => Some(Cow::Borrowed(s.as_str())),
            Text::Lines(lines) => Some(Cow::Owned(lines.join(" "))),
        }
    }

    /// Direct children.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follows a `/`-separated path of child names.
    pub fn find(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |element, segment| element.child(segment))
    }

    /// All elements of the subtree, this one included, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Returns true if the element has neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("Borehole")
            .with_id("bh_1")
            .with_child(Element::text_element("gml:name", "BH 1"))
            .with_child(Element::wrap(
                "referencePoint",
                Element::new("PointLocation")
                    .with_id("pl_bh_1")
                    .with_child(Element::text_element("gml:pos", "1 2 3")),
            ))
    }

    #[test]
    fn test_builder_and_accessors() {
        let e = sample();
        assert_eq!(e.name(), "Borehole");
        assert_eq!(e.id(), Some("bh_1"));
        assert_eq!(e.children().len(), 2);
        assert_eq!(
            e.child("gml:name").and_then(|c| c.text()).as_deref(),
            Some("BH 1")
        );
        assert!(e.attr("missing").is_none());
    }

    #[test]
    fn test_find_path() {
        let e = sample();
        let pos = e.find("referencePoint/PointLocation/gml:pos").unwrap();
        assert_eq!(pos.text().as_deref(), Some("1 2 3"));
        assert!(e.find("referencePoint/LinearExtent").is_none());
    }

    #[test]
    fn test_descendants_document_order() {
        let e = sample();
        let names: Vec<_> = e.descendants().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec![
                "Borehole",
                "gml:name",
                "referencePoint",
                "PointLocation",
                "gml:pos"
            ]
        );
    }

    #[test]
    fn test_lines_text() {
        let e = Element::new("timePositionList")
            .with_lines(vec!["0 1 2".to_string(), "3 4".to_string()]);
        assert_eq!(e.text().as_deref(), Some("0 1 2 3 4"));
        assert!(!e.is_empty());
        assert!(Element::new("x").is_empty());
    }

    #[test]
    fn test_optional_child() {
        let e = Element::new("a")
            .with_optional_child(None)
            .with_optional_child(Some(Element::new("b")));
        assert_eq!(e.children().len(), 1);
    }
}
