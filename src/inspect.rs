//! Structural inspection of generated DIGGS text.
//!
//! This module re-reads a DIGGS document with `quick-xml` and summarizes what
//! downstream consumers rely on: identifiers, local references, and the
//! cardinalities of the property catalogue, time domain and data block.
//! It does not validate against the XSD.
//!
//! # Example
//!
//! ```rust
//! use bor2diggs_rs::inspect::inspect_str;
//!
//! let xml = r##"<Diggs gml:id="d">
//!   <Project gml:id="pr_1"/>
//!   <projectRef xlink:href="#pr_1"/>
//! </Diggs>"##;
//!
//! let summary = inspect_str(xml).unwrap();
//! assert_eq!(summary.ids, vec!["d", "pr_1"]);
//! summary.check().unwrap();
//! ```

use crate::error::{Error, Result};
use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::collections::HashSet;
use std::io::BufRead;
use std::str;

/// Attributes whose `#id` values point at local elements.
const REFERENCE_ATTRIBUTES: &[&str] = &["xlink:href", "srsName"];

/// A local reference found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Element carrying the reference
    pub element: String,
    /// Attribute name (`xlink:href` or `srsName`)
    pub attribute: String,
    /// Target identifier, without the leading `#`
    pub target: String,
    /// Whether the target was defined earlier in document order
    pub defined_before: bool,
}

/// What a DIGGS document declares about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Name of the root element
    pub root: Option<String>,
    /// `gml:id` values in document order
    pub ids: Vec<String>,
    /// Local references in document order
    pub references: Vec<Reference>,
    /// `propertyName` of each `Property`, in catalogue order
    pub property_names: Vec<String>,
    /// Number of values in the time position list
    pub time_values: usize,
    /// Number of fields in each data row
    pub row_widths: Vec<usize>,
}

impl DocumentSummary {
    /// Identifiers defined more than once.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.ids
            .iter()
            .filter(|id| !seen.insert(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// References whose target was not defined before them.
    pub fn unresolved(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(|r| !r.defined_before)
    }

    /// Checks identifier uniqueness, reference resolution and cardinalities.
    pub fn check(&self) -> Result<()> {
        if let Some(id) = self.duplicate_ids().first() {
            return Err(Error::DuplicateId(id.to_string()));
        }

        if let Some(reference) = self.unresolved().next() {
            return Err(Error::UnresolvedReference(format!(
                "{} {}=\"#{}\"",
                reference.element, reference.attribute, reference.target
            )));
        }

        if self.row_widths.len() != self.time_values {
            return Err(Error::CardinalityMismatch(format!(
                "{} data rows for {} time values",
                self.row_widths.len(),
                self.time_values
            )));
        }

        let properties = self.property_names.len();
        if let Some((row, width)) = self
            .row_widths
            .iter()
            .enumerate()
            .find(|(_, width)| **width != properties)
        {
            return Err(Error::CardinalityMismatch(format!(
                "data row {} has {} values for {} properties",
                row, width, properties
            )));
        }

        Ok(())
    }
}

/// Elements whose text the inspector reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    PropertyName,
    TimePositions,
    DataValues,
}

impl Capture {
    fn for_element(name: &str) -> Option<Self> {
        match name {
            "propertyName" => Some(Capture::PropertyName),
            "timePositionList" => Some(Capture::TimePositions),
            "dataValues" => Some(Capture::DataValues),
            _ => None,
        }
    }
}

/// Streaming inspector over DIGGS text.
pub struct DocumentInspector<R: BufRead> {
    reader: Reader<R>,
    summary: DocumentSummary,
    defined: HashSet<String>,
    capture: Option<Capture>,
    text: String,
}

impl<R: BufRead> DocumentInspector<R> {
    /// Creates an inspector over any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            summary: DocumentSummary::default(),
            defined: HashSet::new(),
            capture: None,
            text: String::new(),
        }
    }

    /// Reads the whole document and returns its summary.
    pub fn run(mut self) -> Result<DocumentSummary> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let event = self.reader.read_event_into(&mut buf)?;
            match event {
                XmlEvent::Start(ref e) => {
                    let name = str::from_utf8(e.name().as_ref())?.to_string();
                    let attrs = Self::collect_attributes(e)?;
                    self.handle_element(&name, attrs);
                    self.capture = Capture::for_element(&name);
                    self.text.clear();
                }
                XmlEvent::Empty(ref e) => {
                    let name = str::from_utf8(e.name().as_ref())?.to_string();
                    let attrs = Self::collect_attributes(e)?;
                    self.handle_element(&name, attrs);
                }
                XmlEvent::Text(ref e) => {
                    if self.capture.is_some() {
                        self.text.push_str(&e.unescape()?);
                    }
                }
                XmlEvent::End(_) => {
                    if let Some(capture) = self.capture.take() {
                        let text = std::mem::take(&mut self.text);
                        self.finish_capture(capture, &text);
                    }
                }
                XmlEvent::Eof => break,
                _ => {}
            }
        }

        Ok(self.summary)
    }

    fn collect_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.to_string();
            attrs.push((key, value));
        }
        Ok(attrs)
    }

    fn handle_element(&mut self, name: &str, attrs: Vec<(String, String)>) {
        if self.summary.root.is_none() {
            self.summary.root = Some(name.to_string());
        }

        // Resolve references before registering this element's own id.
        for (key, value) in &attrs {
            if !REFERENCE_ATTRIBUTES.contains(&key.as_str()) {
                continue;
            }
            if let Some(target) = value.strip_prefix('#') {
                self.summary.references.push(Reference {
                    element: name.to_string(),
                    attribute: key.clone(),
                    target: target.to_string(),
                    defined_before: self.defined.contains(target),
                });
            }
        }

        if let Some((_, id)) = attrs.into_iter().find(|(k, _)| k == "gml:id") {
            self.defined.insert(id.clone());
            self.summary.ids.push(id);
        }
    }

    fn finish_capture(&mut self, capture: Capture, text: &str) {
        match capture {
            Capture::PropertyName => self.summary.property_names.push(text.trim().to_string()),
            Capture::TimePositions => self.summary.time_values = text.split_whitespace().count(),
            Capture::DataValues => {
                self.summary.row_widths = text
                    .split_whitespace()
                    .map(|row| row.split(',').count())
                    .collect();
            }
        }
    }
}

/// Inspects DIGGS text held in memory.
pub fn inspect_str(xml: &str) -> Result<DocumentSummary> {
    DocumentInspector::from_reader(xml.as_bytes()).run()
}

/// Inspects DIGGS text from a buffered reader.
pub fn inspect<R: BufRead>(reader: R) -> Result<DocumentSummary> {
    DocumentInspector::from_reader(reader).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SIMPLE_DIGGS: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<Diggs gml:id="diggs_f">
  <project>
    <Project gml:id="pr_p"/>
  </project>
  <samplingFeature>
    <Borehole gml:id="bh_b">
      <projectRef xlink:href="#pr_p"/>
      <centerLine>
        <LinearExtent gml:id="cl_bh_b"/>
      </centerLine>
      <linearReferencing>
        <LinearSpatialReferenceSystem gml:id="lr_bh_b">
          <glr:linearElement xlink:href="#cl_bh_b"/>
        </LinearSpatialReferenceSystem>
      </linearReferencing>
      <gml:posList srsName="#lr_bh_b" srsDimension="1">0 2</gml:posList>
    </Borehole>
  </samplingFeature>
  <MWDResult gml:id="mwdr_f">
    <timePositionList>
      0 1
      2
    </timePositionList>
    <properties>
      <Property gml:id="prop1_f" index="1"><propertyName>DEPTH</propertyName></Property>
      <Property gml:id="prop2_f" index="2"><propertyName>AS</propertyName></Property>
    </properties>
    <dataValues cs="," ts=" " decimal=".">0,1 1,1.5 2,</dataValues>
  </MWDResult>
</Diggs>"##;

    #[test]
    fn test_inspect_simple() {
        let summary = inspect(Cursor::new(SIMPLE_DIGGS)).unwrap();

        assert_eq!(summary.root.as_deref(), Some("Diggs"));
        assert_eq!(summary.ids.len(), 8);
        assert_eq!(summary.references.len(), 3);
        assert_eq!(summary.property_names, vec!["DEPTH", "AS"]);
        assert_eq!(summary.time_values, 3);
        assert_eq!(summary.row_widths, vec![2, 2, 2]);
        summary.check().unwrap();
    }

    #[test]
    fn test_forward_reference_is_unresolved() {
        let xml = r##"<Diggs gml:id="d">
  <projectRef xlink:href="#pr_p"/>
  <Project gml:id="pr_p"/>
</Diggs>"##;
        let summary = inspect_str(xml).unwrap();
        assert_eq!(summary.unresolved().count(), 1);
        assert!(matches!(summary.check(), Err(Error::UnresolvedReference(_))));
    }

    #[test]
    fn test_duplicate_id() {
        let xml = r#"<Diggs gml:id="d"><Project gml:id="p"/><Borehole gml:id="p"/></Diggs>"#;
        let summary = inspect_str(xml).unwrap();
        assert_eq!(summary.duplicate_ids(), vec!["p"]);
        assert!(matches!(summary.check(), Err(Error::DuplicateId(ref id)) if id == "p"));
    }

    #[test]
    fn test_cardinality_mismatch() {
        let xml = r#"<Diggs>
  <timePositionList>0 1</timePositionList>
  <propertyName>DEPTH</propertyName>
  <dataValues>0,1 1,2</dataValues>
</Diggs>"#;
        let summary = inspect_str(xml).unwrap();
        let err = summary.check().unwrap_err();
        assert!(matches!(err, Error::CardinalityMismatch(_)));
        assert!(err.to_string().contains("2 values for 1 properties"));

        let xml = r#"<Diggs>
  <timePositionList>0 1 2</timePositionList>
  <propertyName>DEPTH</propertyName>
  <dataValues>0 1</dataValues>
</Diggs>"#;
        let err = inspect_str(xml).unwrap().check().unwrap_err();
        assert!(err.to_string().contains("2 data rows for 3 time values"));
    }

    #[test]
    fn test_external_links_are_ignored() {
        let xml = r#"<Diggs gml:id="d"><ref xlink:href="http://example.org/x"/></Diggs>"#;
        let summary = inspect_str(xml).unwrap();
        assert!(summary.references.is_empty());
    }
}
