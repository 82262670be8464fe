//! DIGGS writer for serializing document trees to XML.
//!
//! This module serializes a [`DiggsDocument`] to XML text through
//! `quick-xml`, with optional indentation.
//!
//! # Example
//!
//! ```rust
//! use bor2diggs_rs::objects::{DiggsDocument, Element};
//! use bor2diggs_rs::writer::DiggsWriter;
//!
//! let root = Element::new("Diggs")
//!     .with_id("diggs_1")
//!     .with_child(Element::text_element("gml:name", "example"));
//! let doc = DiggsDocument::new(root);
//!
//! let xml = DiggsWriter::new().write_to_string(&doc).unwrap();
//! assert!(xml.contains("<gml:name>example</gml:name>"));
//! ```

use crate::error::{Error, Result};
use crate::objects::{DiggsDocument, Element, Text};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Configuration options for the DIGGS writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Whether to indent the output for readability
    pub indent: bool,
    /// Indentation string (default: two spaces)
    ///
    /// Each level is indented with as many copies of the string's first
    /// character as the string is long. That character must be ASCII;
    /// otherwise the output is not indented.
    pub indent_string: String,
    /// Whether to include the XML declaration
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: true,
            indent_string: "  ".to_string(),
            xml_declaration: true,
        }
    }
}

impl WriterConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compact configuration (no indentation).
    pub fn compact() -> Self {
        Self {
            indent: false,
            indent_string: String::new(),
            xml_declaration: true,
        }
    }

    /// Sets whether to indent the output.
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation string.
    pub fn with_indent_string(mut self, s: impl Into<String>) -> Self {
        self.indent_string = s.into();
        self
    }

    /// Sets whether to write the XML declaration.
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Indentation character and its count per level, if indenting.
    fn indent_unit(&self) -> Option<(u8, usize)> {
        if !self.indent {
            return None;
        }
        let first = *self.indent_string.as_bytes().first()?;
        first
            .is_ascii()
            .then_some((first, self.indent_string.len()))
    }
}

/// DIGGS XML writer.
pub struct DiggsWriter {
    config: WriterConfig,
}

impl DiggsWriter {
    /// Creates a new writer with default configuration.
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
        }
    }

    /// Creates a new writer with the specified configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Writes a document to a string.
    pub fn write_to_string(&self, doc: &DiggsDocument) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(doc, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Utf8(e.utf8_error()))
    }

    /// Writes a document to any Write implementation.
    pub fn write<W: Write>(&self, doc: &DiggsDocument, writer: W) -> Result<()> {
        let indent_unit = self.config.indent_unit();
        let mut xml_writer = match indent_unit {
            Some((indent_char, indent_size)) => {
                Writer::new_with_indent(writer, indent_char, indent_size)
            }
            None => Writer::new(writer),
        };

        if self.config.xml_declaration {
            xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        self.write_element(&mut xml_writer, doc.root(), 0)?;

        if indent_unit.is_some() {
            xml_writer.get_mut().write_all(b"\n")?;
        }

        Ok(())
    }

    /// Writes one element and its subtree at the given nesting depth.
    fn write_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        element: &Element,
        depth: usize,
    ) -> Result<()> {
        let mut start = BytesStart::new(element.name());
        for (key, value) in element.attributes() {
            start.push_attribute((key, value));
        }

        if element.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;

        match element.raw_text() {
            Some(Text::Inline(text)) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            Some(Text::Lines(lines)) => {
                let text = self.layout_lines(lines, depth);
                writer.write_event(Event::Text(BytesText::new(&text)))?;
            }
            None => {}
        }

        for child in element.children() {
            self.write_element(writer, child, depth + 1)?;
        }

        writer.write_event(Event::End(BytesEnd::new(element.name())))?;
        Ok(())
    }

    /// Lays out multi-line text one level below its element.
    ///
    /// The closing tag lands on its own line at the element's indentation.
    fn layout_lines(&self, lines: &[String], depth: usize) -> String {
        let (indent_char, indent_size) = match self.config.indent_unit() {
            Some(unit) => unit,
            None => return lines.join(" "),
        };
        let level = char::from(indent_char).to_string().repeat(indent_size);
        let outer = level.repeat(depth);
        let inner = level.repeat(depth + 1);

        let mut text = String::new();
        for line in lines {
            text.push('\n');
            text.push_str(&inner);
            text.push_str(line);
        }
        text.push('\n');
        text.push_str(&outer);
        text
    }
}

impl Default for DiggsWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to write a document to a string.
pub fn to_string(doc: &DiggsDocument) -> Result<String> {
    DiggsWriter::new().write_to_string(doc)
}

/// Convenience function to write a document to a string without indentation.
pub fn to_string_compact(doc: &DiggsDocument) -> Result<String> {
    DiggsWriter::with_config(WriterConfig::compact()).write_to_string(doc)
}

/// Convenience function to write a document to a writer.
pub fn write<W: Write>(doc: &DiggsDocument, writer: W) -> Result<()> {
    DiggsWriter::new().write(doc, writer)
}
